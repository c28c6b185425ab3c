// tests/fetch_http.rs
use std::time::Duration;

use multi_source_aggregator::fetch::http::HttpFetcher;
use multi_source_aggregator::{FetchError, Source, SourceFetcher};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn fetch_returns_decoded_payload_on_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "title": "t" }])),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(Source::Posts, format!("{}/posts", server.uri()), client());
    let payload = fetcher.fetch().await.unwrap();
    assert_eq!(payload[0]["id"], 1);
}

#[tokio::test]
async fn non_200_status_is_classified_as_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(Source::Github, format!("{}/repos", server.uri()), client());
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::BadStatus(status) if status.as_u16() == 503));
    assert_eq!(err.kind(), "bad-status");
}

#[tokio::test]
async fn connection_refused_is_classified_as_transport_error() {
    // nothing listens on the discard port
    let fetcher = HttpFetcher::new(Source::Users, "http://127.0.0.1:9/results", client());
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert_eq!(err.kind(), "transport-error");
}

#[tokio::test]
async fn malformed_json_body_is_a_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(Source::Posts, format!("{}/posts", server.uri()), client());
    assert!(fetcher.fetch().await.is_err());
}

#[tokio::test]
async fn client_timeout_is_classified_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let fetcher = HttpFetcher::new(Source::Posts, format!("{}/slow", server.uri()), client);
    let err = fetcher.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout));
    assert_eq!(err.kind(), "timeout");
}
