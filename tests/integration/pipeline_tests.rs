//! Integration tests for the fetch/parse pipeline
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! pipeline end-to-end over real HTTP.

use std::time::Duration;
use tandem_scrape::config::Config;
use tandem_scrape::crawler::{Coordinator, RunSummary};
use tandem_scrape::output::TRUNCATION_MARKER;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for the given batch
fn create_test_config(urls: Vec<String>) -> Config {
    let mut config = Config::default();
    config.pipeline.urls = urls;
    config.http.timeout_secs = 5;
    config.http.connect_timeout_secs = 1;
    config
}

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn run(config: Config) -> RunSummary {
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    tokio::time::timeout(Duration::from_secs(30), coordinator.run())
        .await
        .expect("Pipeline did not complete")
}

#[tokio::test]
async fn test_not_found_yields_no_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(&mock_server, "/one", r#"<html><body><a href="/two">Two</a></body></html>"#).await;
    mount_html(&mock_server, "/three", "<html><body><p>Three</p></body></html>").await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<p>Not here</p>"))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/one", base_url),
        format!("{}/missing", base_url),
        format!("{}/three", base_url),
    ];
    let summary = run(create_test_config(urls.clone())).await;

    assert_eq!(summary.reports.len(), 2);
    assert!(summary.reports.iter().all(|r| r.url != urls[1]));

    let mut reported: Vec<&str> = summary.reports.iter().map(|r| r.url.as_str()).collect();
    reported.sort();
    assert_eq!(reported, vec![urls[0].as_str(), urls[2].as_str()]);

    let stats = &summary.statistics;
    assert_eq!(stats.fetch_units, 3);
    assert_eq!(stats.parse_units, 3);
    assert_eq!(stats.filtered, 1);
    assert_eq!(stats.idle_parsers, 1);
}

#[tokio::test]
async fn test_script_excluded_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><script>ignored()</script><p>Hello <a href="/x">there</a></p></body></html>"#,
    )
    .await;

    let summary = run(create_test_config(vec![format!("{}/", mock_server.uri())])).await;

    assert_eq!(summary.reports.len(), 1);
    let report = &summary.reports[0];
    assert_eq!(report.links, vec!["/x".to_string()]);
    assert_eq!(report.text, "Hello there");
}

#[tokio::test]
async fn test_unreachable_host_is_dropped() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/", "<p>Up</p>").await;

    // Nothing listens on port 1
    let urls = vec![
        format!("{}/", mock_server.uri()),
        "http://127.0.0.1:1/".to_string(),
    ];
    let summary = run(create_test_config(urls)).await;

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].text, "Up");
    assert_eq!(summary.statistics.unreachable, 1);
    assert_eq!(summary.statistics.idle_parsers, 1);
}

#[tokio::test]
async fn test_empty_body_is_reported() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/empty", "").await;

    let summary = run(create_test_config(vec![format!("{}/empty", mock_server.uri())])).await;

    assert_eq!(summary.reports.len(), 1);
    assert!(summary.reports[0].links.is_empty());
    assert!(summary.reports[0].text.is_empty());
}

#[tokio::test]
async fn test_windows_1252_page_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/menu"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"<p>caf\xe9 <a href=\"/carte\">carte</a></p>".to_vec())
                .insert_header("content-type", "text/html; charset=windows-1252"),
        )
        .mount(&mock_server)
        .await;

    let summary = run(create_test_config(vec![format!("{}/menu", mock_server.uri())])).await;

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].links, vec!["/carte"]);
    assert_eq!(summary.reports[0].text, "caf\u{e9} carte");
}

#[tokio::test]
async fn test_invalid_utf8_without_charset_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<p>caf\xe9</p>".to_vec()))
        .mount(&mock_server)
        .await;

    let summary = run(create_test_config(vec![format!("{}/latin1", mock_server.uri())])).await;

    assert_eq!(summary.reports.len(), 1);
    assert_eq!(summary.reports[0].text, "caf\u{FFFD}");
    assert_eq!(summary.statistics.tree_failed, 0);
}

#[tokio::test]
async fn test_binary_body_yields_no_report() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/binary"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xffu8, 0xfe, 0x00, 0x80]))
        .mount(&mock_server)
        .await;

    let summary = run(create_test_config(vec![format!("{}/binary", mock_server.uri())])).await;

    assert!(summary.reports.is_empty());
    assert_eq!(summary.statistics.fetched, 1);
    assert_eq!(summary.statistics.tree_failed, 1);
}

#[tokio::test]
async fn test_long_text_preview_is_truncated() {
    let mock_server = MockServer::start().await;
    let long_text = "word ".repeat(100);
    mount_html(&mock_server, "/long", &format!("<p>{}</p>", long_text)).await;

    let summary = run(create_test_config(vec![format!("{}/long", mock_server.uri())])).await;

    assert_eq!(summary.reports.len(), 1);
    let report = &summary.reports[0];
    assert_eq!(report.text, long_text.trim());

    let lines = report.lines(200);
    let text_line = lines
        .iter()
        .find(|line| line.contains("Extracted Text"))
        .expect("Missing text line");
    assert!(text_line.ends_with(TRUNCATION_MARKER));
    assert!(text_line.contains("first 200 chars"));
}
