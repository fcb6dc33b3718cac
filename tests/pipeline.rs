//! Package request pipeline tests with in-memory collaborators

mod helper;

use std::path::PathBuf;

use helper::{MockIndex, RecordingDownloader};
use pypi_get::config::Config;
use pypi_get::run::run_requests;

const BASE_URL: &str = "https://pypi.example.org/simple/";

fn requests_index() -> MockIndex {
    MockIndex::new().with_page(
        "requests",
        vec![
            ("requests-1.0.0", "requests-1.0.0.tar.gz"),
            ("requests-2.0.0", "requests-2.0.0.tar.gz"),
        ],
    )
}

async fn run(
    index: &MockIndex,
    downloader: &RecordingDownloader,
    packages: &[&str],
    extension: &str,
) -> (String, bool) {
    let packages: Vec<String> = packages.iter().map(|p| p.to_string()).collect();
    let config = Config::new(BASE_URL, extension, &packages, PathBuf::from("dl"), 5).unwrap();
    let mut out = Vec::new();

    let summary = run_requests(index, downloader, &config, &mut out)
        .await
        .unwrap();

    (String::from_utf8(out).unwrap(), summary.is_success())
}

#[tokio::test]
async fn downloads_latest_release_when_no_version_requested() {
    let downloader = RecordingDownloader::new(335_548);

    let (output, success) = run(&requests_index(), &downloader, &["requests"], "").await;

    assert_eq!(output, "requests-2.0.0.tar.gz downloaded (335548 bytes)\n");
    assert!(success);
    assert_eq!(
        downloader.calls(),
        vec![(
            "https://pypi.example.org/simple/requests/requests-2.0.0.tar.gz".to_string(),
            PathBuf::from("dl/requests-2.0.0.tar.gz")
        )]
    );
}

#[tokio::test]
async fn reports_no_match_for_version_and_extension() {
    let downloader = RecordingDownloader::new(1);

    let (output, success) = run(&requests_index(), &downloader, &["requests=1.0.0"], "whl").await;

    assert_eq!(output, "No releases found for requests=1.0.0 (whl)\n");
    assert!(success);
    assert!(downloader.calls().is_empty());
}

#[tokio::test]
async fn reports_empty_catalog() {
    let index = MockIndex::new().with_page("requests", vec![]);
    let downloader = RecordingDownloader::new(1);

    let (output, success) = run(&index, &downloader, &["requests"], "").await;

    assert_eq!(output, "No releases found for requests\n");
    assert!(success);
}

#[tokio::test]
async fn requested_version_must_match_exactly() {
    let index = MockIndex::new().with_page(
        "flask",
        vec![
            ("flask-1.0.3.tar.gz", "flask-1.0.3.tar.gz"),
            ("flask-1.0.2.tar.gz", "flask-1.0.2.tar.gz"),
        ],
    );
    let downloader = RecordingDownloader::new(1);

    let (output, _) = run(&index, &downloader, &["flask=1.0"], "").await;

    assert_eq!(output, "No releases found for flask=1.0\n");
    assert!(downloader.calls().is_empty());
}

#[tokio::test]
async fn downloads_every_file_of_the_resolved_version() {
    let index = MockIndex::new().with_page(
        "six",
        vec![
            ("six-1.9.0.tar.gz", "six-1.9.0.tar.gz"),
            ("six-1.16.0-py2.py3-none-any.whl", "six-1.16.0-py2.py3-none-any.whl"),
            ("six-1.16.0.tar.gz", "six-1.16.0.tar.gz"),
            ("six-1.10.0.tar.gz", "six-1.10.0.tar.gz"),
        ],
    );
    let downloader = RecordingDownloader::new(10);

    let (output, success) = run(&index, &downloader, &["six"], "").await;

    assert_eq!(
        output,
        "six-1.16.0-py2.py3-none-any.whl downloaded (10 bytes)\n\
         six-1.16.0.tar.gz downloaded (10 bytes)\n"
    );
    assert!(success);
}

#[tokio::test]
async fn extension_filter_applies_to_every_request() {
    let index = requests_index().with_page(
        "six",
        vec![
            ("six-1.16.0-py2.py3-none-any.whl", "six-1.16.0-py2.py3-none-any.whl"),
            ("six-1.16.0.tar.gz", "six-1.16.0.tar.gz"),
        ],
    );
    let downloader = RecordingDownloader::new(3);

    let (output, _) = run(&index, &downloader, &["requests", "six"], "gz").await;

    assert_eq!(
        output,
        "requests-2.0.0.tar.gz downloaded (3 bytes)\n\
         six-1.16.0.tar.gz downloaded (3 bytes)\n"
    );
}

#[tokio::test]
async fn download_failure_does_not_stop_other_packages() {
    let index =
        requests_index().with_page("six", vec![("six-1.16.0.tar.gz", "six-1.16.0.tar.gz")]);
    let downloader = RecordingDownloader::new(5)
        .failing_on("https://pypi.example.org/simple/requests/requests-2.0.0.tar.gz");

    let (output, success) = run(&index, &downloader, &["requests", "missing", "six"], "").await;

    assert_eq!(
        output,
        "requests-2.0.0.tar.gz failed: server returned status 500\n\
         No releases found for missing\n\
         six-1.16.0.tar.gz downloaded (5 bytes)\n"
    );
    assert!(!success);
}
