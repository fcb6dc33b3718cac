use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use pypi_get::config::{Config, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_INDEX_URL};
use pypi_get::fetch::HttpDownloader;
use pypi_get::index::SimpleIndexClient;
use pypi_get::run::run_requests;

#[derive(Parser)]
#[command(name = "pypi-get")]
#[command(version, about = "Download package releases from a PyPI-style simple index")]
struct Cli {
    /// Packages to fetch, as `name` or `name=version`
    #[arg(required = true, value_name = "PACKAGE")]
    packages: Vec<String>,

    /// The PyPI URL to use
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    url: String,

    /// Only download files with the extension given
    #[arg(long, default_value = "")]
    extension: String,

    /// Directory to write downloaded files to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Seconds without progress before an index fetch or download is abandoned
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    timeout: u64,

    /// Write logs as JSON to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {:?}", path))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_ref())?;

    let config = Config::new(
        &cli.url,
        &cli.extension,
        &cli.packages,
        cli.output_dir,
        cli.timeout,
    )?;

    let index = SimpleIndexClient::new(config.timeout)?;
    let downloader = HttpDownloader::new(config.timeout)?;

    let summary = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run_requests(
            &index,
            &downloader,
            &config,
            &mut std::io::stdout().lock(),
        ))?;

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("{} downloads or index fetches failed", summary.failures);
        Ok(ExitCode::FAILURE)
    }
}
