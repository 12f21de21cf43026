use crate::truncated_server::start_truncated_server;
use hashfetch::batch::{run, Coordinator, HttpFetcher};
use hashfetch::config::{Config, HttpConfig};
use hashfetch::{BodyHasher, HashAlgorithm, PageResult};
use std::collections::HashSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_STRING_MD5: &str = "6f8db599de986fab7a21625b7916589c";

/// Mounts `/ok` (body "test string"), `/other` (body "other") and `/broken` (500)
async fn start_mock_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("test string"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(ResponseTemplate::new(200).set_body_string("other"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    mock_server
}

fn http_coordinator(budget: i64, algorithm: HashAlgorithm) -> Coordinator {
    Coordinator::builder()
        .fetcher(HttpFetcher::from_config(&HttpConfig::default()).expect("Failed to build fetcher"))
        .hasher(algorithm)
        .budget(budget)
        .build()
        .expect("Failed to build coordinator")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_batch_against_mock_server() {
    let mock_server = start_mock_server().await;
    let base_url = mock_server.uri();

    let targets = vec![
        format!("{}/ok", base_url),
        format!("{}/other", base_url),
        format!("{}/broken", base_url),
        "not a url".to_string(),
    ];

    let (results, summary) = http_coordinator(2, HashAlgorithm::Md5)
        .run_batch_with_summary(targets)
        .await;

    let expected: HashSet<PageResult> = [
        PageResult::new(format!("{}/ok", base_url), TEST_STRING_MD5),
        PageResult::new(
            format!("{}/other", base_url),
            HashAlgorithm::Md5.digest(b"other"),
        ),
    ]
    .into_iter()
    .collect();

    assert_eq!(results.to_set(), expected);
    assert_eq!(summary.dispatched, 4);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.skipped, 2);
}

#[tokio::test]
async fn test_truncated_body_skipped_siblings_succeed() {
    let mock_server = start_mock_server().await;
    let base_url = mock_server.uri();
    let truncated_url = format!("{}/page", start_truncated_server().await);

    let (results, summary) = http_coordinator(3, HashAlgorithm::Md5)
        .run_batch_with_summary([
            format!("{}/ok", base_url),
            truncated_url.clone(),
            format!("{}/other", base_url),
        ])
        .await;

    assert_eq!(results.len(), 2);
    assert!(results.contains_url(&format!("{}/ok", base_url)));
    assert!(results.contains_url(&format!("{}/other", base_url)));
    assert!(!results.contains_url(&truncated_url));
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn test_every_target_requested_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body"))
        .expect(5)
        .mount(&mock_server)
        .await;

    let targets: Vec<String> = (0..5)
        .map(|i| format!("{}/page?n={}", mock_server.uri(), i))
        .collect();

    let results = http_coordinator(2, HashAlgorithm::Md5)
        .run_batch(targets)
        .await;

    assert_eq!(results.len(), 5);
    // MockServer verifies the expected request count on drop
}

#[tokio::test]
async fn test_scheme_less_host_port_rejected() {
    let mock_server = start_mock_server().await;
    let address = mock_server.address();

    let results = http_coordinator(1, HashAlgorithm::Md5)
        .run_batch([
            format!("{}:{}/ok", address.ip(), address.port()),
            format!("{}/ok", mock_server.uri()),
        ])
        .await;

    assert_eq!(results.len(), 1);
    assert!(results.contains_url(&format!("{}/ok", mock_server.uri())));
}

#[tokio::test]
async fn test_run_with_config_uses_algorithm() {
    let mock_server = start_mock_server().await;

    let mut config = Config::default();
    config.batch.parallel = 3;
    config.hash.algorithm = HashAlgorithm::Sha256;

    let (results, summary) = run(&config, vec![format!("{}/ok", mock_server.uri())])
        .await
        .expect("Batch failed");

    assert_eq!(summary.succeeded, 1);
    let page = results.iter().next().expect("Missing result");
    assert_eq!(
        page.hash,
        "d5579c46dfcc7f18207013e65b44e4cb4e2c2298f4ac457ba8f82743f31e930b"
    );
}

#[tokio::test]
async fn test_run_with_invalid_budget_fails_before_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.batch.parallel = 0;

    let result = run(&config, vec![format!("{}/ok", mock_server.uri())]).await;

    assert!(result.is_err());
}
