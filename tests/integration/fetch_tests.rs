use hashfetch::batch::{build_http_client, Fetcher, HttpFetcher};
use hashfetch::config::HttpConfig;
use crate::truncated_server::start_truncated_server;
use hashfetch::FetchError;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    HttpFetcher::from_config(&HttpConfig::default()).expect("Failed to build fetcher")
}

fn url(base: &str, p: &str) -> Url {
    Url::parse(&format!("{}{}", base, p)).expect("Failed to parse mock URL")
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("response"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = fetcher()
        .fetch(&url(&mock_server.uri(), "/"))
        .await
        .expect("Fetch failed");

    assert_eq!(body, b"response");
}

#[tokio::test]
async fn test_fetch_server_error_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = fetcher().fetch(&url(&mock_server.uri(), "/")).await;

    assert!(matches!(result, Err(FetchError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_fetch_non_ok_success_status_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let result = fetcher().fetch(&url(&mock_server.uri(), "/")).await;

    assert!(matches!(result, Err(FetchError::Status { status: 204, .. })));
}

#[tokio::test]
async fn test_fetch_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let result = fetcher().fetch(&url(&mock_server.uri(), "/missing")).await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_fetch_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "TestFetcher/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpConfig {
        user_agent: "TestFetcher/1.0".to_string(),
        ..HttpConfig::default()
    };
    let fetcher = HttpFetcher::new(build_http_client(&config).expect("Failed to build client"));

    let body = fetcher
        .fetch(&url(&mock_server.uri(), "/"))
        .await
        .expect("Fetch failed");

    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_fetch_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = HttpConfig {
        timeout_secs: 1,
        ..HttpConfig::default()
    };
    let fetcher = HttpFetcher::from_config(&config).expect("Failed to build fetcher");

    let result = fetcher.fetch(&url(&mock_server.uri(), "/")).await;

    assert!(matches!(result, Err(FetchError::Transport { .. })));
}

#[tokio::test]
async fn test_fetch_truncated_body_is_read_error() {
    let base_url = start_truncated_server().await;

    let result = fetcher().fetch(&url(&base_url, "/")).await;

    assert!(matches!(result, Err(FetchError::Read { .. })));
}
