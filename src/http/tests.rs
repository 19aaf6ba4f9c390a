//! Tests for the HTTP client module

use super::*;
use crate::error::{ApiError, Error, FieldError};
use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_bytes, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiClientConfig::builder()
        .base_url(format!("{}/api", server.uri()))
        .no_rate_limit()
        .build();
    ApiClient::new(config).unwrap()
}

fn expect_api_error(err: Error) -> ApiError {
    match err {
        Error::Api(api) => api,
        other => panic!("Expected Api error, got {other:?}"),
    }
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_api_client_config_default() {
    let config = ApiClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.base_url, "http://localhost:8080/api");
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("matjip-client/"));
}

#[test]
fn test_api_client_config_builder() {
    let config = ApiClientConfig::builder()
        .base_url("https://api.example.com/api")
        .timeout(Duration::from_secs(5))
        .header("X-Client", "cli")
        .user_agent("test-agent/1.0")
        .no_rate_limit()
        .build();

    assert_eq!(config.base_url, "https://api.example.com/api");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(
        config.default_headers.get("X-Client"),
        Some(&"cli".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert!(config.rate_limit.is_none());
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("cursor", 21)
        .query("limit", 21)
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10));

    assert_eq!(
        config.query,
        vec![
            ("cursor".to_string(), "21".to_string()),
            ("limit".to_string(), "21".to_string())
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn test_relative_base_url_rejected() {
    let config = ApiClientConfig::builder().base_url("not a url").build();
    let err = ApiClient::new(config).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

// ============================================================================
// Envelope Tests
// ============================================================================

#[test]
fn test_envelope_success() {
    let envelope: Envelope<Value> =
        serde_json::from_value(json!({"success": true, "data": {"id": 1}})).unwrap();
    let data = envelope.into_result(200).unwrap();
    assert_eq!(data, Some(json!({"id": 1})));
}

#[test]
fn test_envelope_success_false_on_2xx() {
    let envelope: Envelope<Value> = serde_json::from_value(json!({
        "success": false,
        "error": {"code": "NOT_FOUND", "message": "gone"}
    }))
    .unwrap();
    let err = envelope.into_result(200).unwrap_err();
    assert_eq!(
        err,
        ApiError::NotFound {
            message: "gone".to_string()
        }
    );
}

#[test]
fn test_envelope_validation_fields() {
    let envelope: Envelope<Value> = serde_json::from_value(json!({
        "success": false,
        "error": {
            "message": "Invalid",
            "fields": [{"field": "nickname", "messages": ["required"]}]
        }
    }))
    .unwrap();

    let err = envelope.into_result(400).unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation {
            message: "Invalid".to_string(),
            fields: vec![FieldError::new("nickname", "required")],
        }
    );
}

#[test_case(401, "Unauthorized" ; "unauthenticated")]
#[test_case(403, "Unauthorized" ; "forbidden")]
#[test_case(404, "NotFound" ; "not found")]
#[test_case(400, "Validation" ; "bad request")]
#[test_case(422, "Validation" ; "unprocessable")]
#[test_case(409, "Unknown" ; "conflict")]
#[test_case(500, "Unknown" ; "server error")]
fn test_classify_status(status: u16, expected: &str) {
    let err = classify(status, None);
    let kind = match err {
        ApiError::Transport { .. } => "Transport",
        ApiError::Unauthorized { .. } => "Unauthorized",
        ApiError::Validation { .. } => "Validation",
        ApiError::NotFound { .. } => "NotFound",
        ApiError::Unknown { .. } => "Unknown",
    };
    assert_eq!(kind, expected);
}

#[test]
fn test_classify_fields_win_over_status() {
    let body = ErrorBody {
        code: None,
        message: Some("Duplicate".to_string()),
        fields: vec![FieldError::new("email", "already registered")],
    };
    assert!(matches!(
        classify(409, Some(body)),
        ApiError::Validation { .. }
    ));
}

// ============================================================================
// Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_decodes_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 7, "nickname": "foodie"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data: Value = client
        .get("/users/me", RequestConfig::default())
        .await
        .unwrap();

    assert_eq!(data["nickname"], "foodie");
}

#[tokio::test]
async fn test_query_params_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me/likes"))
        .and(query_param("cursor", "0"))
        .and(query_param("limit", "21"))
        .and(header("X-Client", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"items": []}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ApiClientConfig::builder()
        .base_url(format!("{}/api/", mock_server.uri()))
        .header("X-Client", "cli")
        .no_rate_limit()
        .build();
    let client = ApiClient::new(config).unwrap();

    let data: Value = client
        .get(
            "users/me/likes",
            RequestConfig::new().query("cursor", 0).query("limit", 21),
        )
        .await
        .unwrap();
    assert_eq!(data["items"], json!([]));
}

#[tokio::test]
async fn test_validation_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "data": null,
            "error": {
                "message": "Invalid",
                "fields": [{"field": "nickname", "messages": ["required", "too short"]}]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .patch::<Value, _>("/users/me", &json!({"nickname": ""}))
        .await
        .unwrap_err();

    match expect_api_error(err) {
        ApiError::Validation { message, fields } => {
            assert_eq!(message, "Invalid");
            assert_eq!(fields[0].field, "nickname");
            assert_eq!(fields[0].messages, vec!["required", "too short"]);
        }
        other => panic!("Expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/users/me", RequestConfig::default())
        .await
        .unwrap_err();

    assert!(err.requires_login());
}

#[tokio::test]
async fn test_not_found_with_plain_text_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/reviews/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete("/reviews/99").await.unwrap_err();

    assert_eq!(
        expect_api_error(err),
        ApiError::NotFound {
            message: String::new()
        }
    );
}

#[tokio::test]
async fn test_malformed_success_body_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/users/me", RequestConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(
        expect_api_error(err),
        ApiError::Transport { .. }
    ));
}

#[tokio::test]
async fn test_missing_data_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<Value>("/users/me", RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        expect_api_error(err),
        ApiError::Transport { .. }
    ));
}

#[tokio::test]
async fn test_delete_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/restaurants/3/like"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.delete("/restaurants/3/like").await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let config = ApiClientConfig::builder()
        .base_url("http://127.0.0.1:9/api")
        .timeout(Duration::from_secs(2))
        .no_rate_limit()
        .build();
    let client = ApiClient::new(config).unwrap();

    let err = client
        .get::<Value>("/users/me", RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        expect_api_error(err),
        ApiError::Transport { .. }
    ));
}

// ============================================================================
// Session Cookie Tests
// ============================================================================

#[tokio::test]
async fn test_session_cookie_is_attached_after_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SESSION=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"success": true, "data": {"id": 1}})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("cookie", "SESSION=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"id": 1}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(!client.has_session_cookie());

    let _: Value = client
        .post("/auth/login", &json!({"email": "a@b.co", "password": "pw"}))
        .await
        .unwrap();
    assert!(client.has_session_cookie());

    let me: Value = client
        .get("/users/me", RequestConfig::default())
        .await
        .unwrap();
    assert_eq!(me["id"], 1);
}

// ============================================================================
// Presigned Upload Tests
// ============================================================================

#[tokio::test]
async fn test_presigned_upload_sends_raw_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/bucket/images/a.png"))
        .and(header("content-type", "image/png"))
        .and(body_bytes(vec![1u8, 2, 3]))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .upload_presigned(
            &format!("{}/bucket/images/a.png", mock_server.uri()),
            Bytes::from_static(&[1, 2, 3]),
            "image/png",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_presigned_upload_omits_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "SESSION=abc123; Path=/")
                .set_body_json(json!({"success": true, "data": {}})),
        )
        .mount(&mock_server)
        .await;

    // Any upload carrying a cookie is rejected
    Mock::given(method("PUT"))
        .and(path("/bucket/key"))
        .and(header_exists("cookie"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/bucket/key"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let _: Value = client.post("/auth/login", &json!({})).await.unwrap();

    client
        .upload_presigned(
            &format!("{}/bucket/key", mock_server.uri()),
            Bytes::from_static(b"jpeg"),
            "image/jpeg",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_presigned_upload_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/bucket/key"))
        .respond_with(ResponseTemplate::new(403).set_body_string("SignatureDoesNotMatch"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .upload_presigned(
            &format!("{}/bucket/key", mock_server.uri()),
            Bytes::from_static(b"x"),
            "image/jpeg",
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Api(ApiError::Unauthorized { status: 403, .. })
    ));
}
