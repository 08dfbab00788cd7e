//! Tests for the HTTP client module

use super::*;
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::Error;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build();
    HttpClient::new(config, Authenticator::from_key("test-key").unwrap()).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert_eq!(
        config.default_headers.get("accept"),
        Some(&JSON_API_MEDIA_TYPE.to_string())
    );
    assert_eq!(
        config.default_headers.get("content-type"),
        Some(&JSON_API_MEDIA_TYPE.to_string())
    );
}

#[test]
fn test_http_client_config_from_client_config() {
    let client_config = ClientConfig::builder("key")
        .base_url("https://example.com/api/v3")
        .timeout(Duration::from_secs(12))
        .user_agent("agent/2")
        .build()
        .unwrap();

    let config = HttpClientConfig::from(&client_config);
    assert_eq!(config.base_url.as_deref(), Some("https://example.com/api/v3"));
    assert_eq!(config.timeout, Duration::from_secs(12));
    assert_eq!(config.user_agent, "agent/2");
}

#[test]
fn test_api_request_builder() {
    let request = ApiRequest::get("/beta/users")
        .query("page[size]", "10")
        .queries([("sort", "-first_name")])
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10));

    assert_eq!(request.query.get("page[size]"), Some(&"10".to_string()));
    assert_eq!(request.query.get("sort"), Some(&"-first_name".to_string()));
    assert_eq!(
        request.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(request.body.is_none());
    assert_eq!(request.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_api_response_from_text() {
    assert_eq!(ApiResponse::from_text(204, "").body, serde_json::Value::Null);
    assert_eq!(
        ApiResponse::from_text(500, "Internal Server Error").body,
        json!("Internal Server Error")
    );
    assert_eq!(
        ApiResponse::from_text(200, r#"{"data": []}"#).body,
        json!({"data": []})
    );
}

#[test]
fn test_api_response_into_result() {
    let ok = ApiResponse::new(201, json!({"data": {}})).into_result();
    assert!(ok.is_ok());

    let err = ApiResponse::new(401, json!({"errors": []}))
        .into_result()
        .unwrap_err();
    assert!(err.is_auth());

    let err = ApiResponse::new(429, json!("slow down"))
        .into_result()
        .unwrap_err();
    assert!(matches!(err, Error::Request { status: 429, .. }));
}

#[tokio::test]
async fn test_send_get_with_auth_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beta/users"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("Accept", JSON_API_MEDIA_TYPE))
        .and(query_param("filter[email]", "a@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1", "type": "users"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .send(ApiRequest::get("/beta/users").query("filter[email]", "a@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["data"][0]["id"], "1");
}

#[tokio::test]
async fn test_send_post_keeps_json_api_content_type() {
    let mock_server = MockServer::start().await;
    let document = json!({"data": {"type": "users", "attributes": {"email": "a@b.c"}}});

    Mock::given(method("POST"))
        .and(path("/beta/users"))
        .and(header("Content-Type", JSON_API_MEDIA_TYPE))
        .and(body_json(document.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "99", "type": "users"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .send(ApiRequest::post("/beta/users", document))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body["data"]["id"], "99");
}

#[tokio::test]
async fn test_send_reports_status_without_judging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.send(ApiRequest::get("/missing")).await.unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.body, json!("Not found"));

    let err = response.into_result().unwrap_err();
    assert!(matches!(err, Error::Request { status: 404, .. }));
}

#[tokio::test]
async fn test_send_unauthorized_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beta/users"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"title": "Unauthorized"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.send(ApiRequest::get("/beta/users")).await.unwrap();
    let err = response.into_result().unwrap_err();

    assert!(err.is_auth());
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_send_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.send(ApiRequest::get("/flaky")).await.unwrap();

    assert_eq!(response.status, 503);
    assert_eq!(response.body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_send_delete_absolute_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/beta/users/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url("http://unused.invalid")
        .build();
    let client = HttpClient::new(config, Authenticator::from_key("k").unwrap()).unwrap();
    let response = client
        .send(ApiRequest::delete(format!("{}/beta/users/5", mock_server.uri())))
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    let config = HttpClientConfig::builder()
        .base_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .build();
    let client = HttpClient::new(config, Authenticator::from_key("k").unwrap()).unwrap();

    let result = client.send(ApiRequest::get("/anything")).await;
    assert!(matches!(result, Err(Error::Http(_))));
}
