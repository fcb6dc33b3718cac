//! Run configuration and command line request parsing

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Index used when `--url` is not given
pub const DEFAULT_INDEX_URL: &str = "https://pypi.python.org/simple/";

/// Seconds an index fetch or download may go without progress, also the
/// connect timeout
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Delay between starting each download of one package (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// User agent sent with every HTTP request
pub const USER_AGENT: &str = concat!("pypi-get/", env!("CARGO_PKG_VERSION"));

/// One package query taken from a command line token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub name: String,
    /// Requested version, empty for "latest"
    pub version: String,
    /// File name suffix filter, empty for "any"
    pub extension: String,
    /// Index base URL, always ending with `/`
    pub base_url: String,
}

impl ReleaseRequest {
    /// Build a request from a `name` or `name=version` token.
    ///
    /// Only a token with exactly one `=` is split; anything else
    /// (e.g. `pkg==1.0`) is taken verbatim as the package name.
    pub fn from_token(token: &str, base_url: &str, extension: &str) -> Result<Self, ConfigError> {
        let (name, version) = match token.split_once('=') {
            Some((name, version)) if !version.contains('=') => (name, version),
            _ => (token, ""),
        };

        if name.is_empty() {
            return Err(ConfigError::EmptyPackageName(token.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            extension: extension.to_string(),
            base_url: base_url.to_string(),
        })
    }
}

/// Run configuration, built once from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub requests: Vec<ReleaseRequest>,
    pub output_dir: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn new(
        base_url: &str,
        extension: &str,
        packages: &[String],
        output_dir: PathBuf,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url)?;

        if packages.is_empty() {
            return Err(ConfigError::MissingPackages);
        }

        let requests = packages
            .iter()
            .map(|token| ReleaseRequest::from_token(token, &base_url, extension))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            requests,
            output_dir,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Validate the index URL and make sure it ends with `/`.
pub fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    if !url.starts_with("http") {
        return Err(ConfigError::InvalidBaseUrl(url.to_string()));
    }

    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{url}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://pypi.python.org/simple/", "https://pypi.python.org/simple/")]
    #[case("https://pypi.python.org/simple", "https://pypi.python.org/simple/")]
    #[case("http://localhost:8080", "http://localhost:8080/")]
    fn normalize_base_url_appends_trailing_slash(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(normalize_base_url(url).unwrap(), expected);
    }

    #[rstest]
    #[case("ftp://pypi.python.org/simple/")]
    #[case("pypi.python.org/simple/")]
    #[case("")]
    fn normalize_base_url_rejects_non_http(#[case] url: &str) {
        assert_eq!(
            normalize_base_url(url),
            Err(ConfigError::InvalidBaseUrl(url.to_string()))
        );
    }

    #[rstest]
    #[case("requests", "requests", "")]
    #[case("requests=1.0.0", "requests", "1.0.0")]
    #[case("requests=", "requests", "")]
    #[case("requests==1.0.0", "requests==1.0.0", "")]
    #[case("a=b=c", "a=b=c", "")]
    fn from_token_splits_on_single_equals(
        #[case] token: &str,
        #[case] name: &str,
        #[case] version: &str,
    ) {
        let request = ReleaseRequest::from_token(token, DEFAULT_INDEX_URL, "whl").unwrap();

        assert_eq!(
            request,
            ReleaseRequest {
                name: name.to_string(),
                version: version.to_string(),
                extension: "whl".to_string(),
                base_url: DEFAULT_INDEX_URL.to_string(),
            }
        );
    }

    #[test]
    fn from_token_rejects_empty_name() {
        assert_eq!(
            ReleaseRequest::from_token("=1.0", DEFAULT_INDEX_URL, ""),
            Err(ConfigError::EmptyPackageName("=1.0".to_string()))
        );
    }

    #[test]
    fn config_new_builds_one_request_per_token() {
        let packages = vec!["requests=1.0.0".to_string(), "six".to_string()];

        let config = Config::new(
            "http://localhost/simple",
            "tar.gz",
            &packages,
            PathBuf::from("out"),
            5,
        )
        .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.requests.len(), 2);
        assert_eq!(config.requests[0].version, "1.0.0");
        assert_eq!(config.requests[1].name, "six");
        assert!(
            config
                .requests
                .iter()
                .all(|r| r.base_url == "http://localhost/simple/" && r.extension == "tar.gz")
        );
    }

    #[test]
    fn config_new_fails_fast_on_bad_url() {
        let packages = vec!["requests".to_string()];

        let result = Config::new("file:///tmp", "", &packages, PathBuf::from("."), 30);

        assert_eq!(
            result,
            Err(ConfigError::InvalidBaseUrl("file:///tmp".to_string()))
        );
    }

    #[test]
    fn config_new_requires_packages() {
        let result = Config::new(DEFAULT_INDEX_URL, "", &[], PathBuf::from("."), 30);
        assert_eq!(result, Err(ConfigError::MissingPackages));
    }
}
