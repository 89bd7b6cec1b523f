//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, sleeper: &RecordingSleeper) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .build();

    HttpClient::new("secret-token", config)
        .unwrap()
        .with_sleeper(Arc::new(sleeper.clone()))
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.user_agent.starts_with("traewelling-export/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("http://localhost:8000")
        .build();
    assert_eq!(config.base_url, "http://localhost:8000");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new().query("page", "1").query("limit", "15");
    assert_eq!(
        config.query,
        vec![
            ("page".to_string(), "1".to_string()),
            ("limit".to_string(), "15".to_string())
        ]
    );
}

#[test]
fn test_empty_token_is_missing_credential() {
    let result = HttpClient::new("  ", HttpClientConfig::default());
    assert!(matches!(result, Err(Error::MissingCredential)));
}

#[tokio::test]
async fn test_get_json_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/user"))
        .and(header("Authorization", "Bearer secret-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"username": "gertrud"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let body: serde_json::Value = client.get_json("/api/v1/auth/user").await.unwrap();

    assert_eq!(body["data"]["username"], "gertrud");
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_get_json_with_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/gertrud/statuses"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let body: serde_json::Value = client
        .get_json_with_config(
            "api/v1/user/gertrud/statuses",
            RequestConfig::new().query("page", "3"),
        )
        .await
        .unwrap();

    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_absolute_url_ignores_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/absolute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("http://unused.invalid")
        .build();
    let client = HttpClient::new("token", config).unwrap();
    let body: serde_json::Value = client
        .get_json(&format!("{}/absolute", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_rate_limit_waits_retry_after_plus_one() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "2"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": 42})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let body: serde_json::Value = client.get_json("/api/limited").await.unwrap();

    assert_eq!(body["value"], 42);
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(3)]);
    assert!(sleeper.total() >= Duration::from_secs(3));
}

#[tokio::test]
async fn test_rate_limit_retries_without_ceiling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(7)
        .expect(7)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/busy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let _: serde_json::Value = client.get_json("/api/busy").await.unwrap();

    assert_eq!(sleeper.delays(), vec![Duration::from_secs(1); 7]);
}

#[tokio::test]
async fn test_rate_limit_without_retry_after_fails_loudly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let result: crate::error::Result<serde_json::Value> = client.get_json("/api/limited").await;

    assert!(matches!(result, Err(Error::MissingRetryAfter { .. })));
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn test_rate_limit_with_date_retry_after_fails_loudly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let result: crate::error::Result<serde_json::Value> = client.get_json("/api/limited").await;

    assert!(matches!(result, Err(Error::MissingRetryAfter { .. })));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let err = client
        .get_json::<serde_json::Value>("/api/missing")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sleeper = RecordingSleeper::new();
    let client = client_for(&mock_server, &sleeper);
    let err = client
        .get_json::<serde_json::Value>("/api/broken")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert!(sleeper.delays().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_sleeper_waits_full_duration() {
    let sleeper = TokioSleeper::new(Duration::from_secs(5));
    let start = tokio::time::Instant::now();

    sleeper.sleep(Duration::from_secs(12)).await;

    assert!(start.elapsed() >= Duration::from_secs(12));
}

#[tokio::test(start_paused = true)]
async fn test_tokio_sleeper_zero_duration_returns() {
    let sleeper = TokioSleeper::default();
    let start = tokio::time::Instant::now();

    sleeper.sleep(Duration::ZERO).await;

    assert_eq!(start.elapsed(), Duration::ZERO);
}
