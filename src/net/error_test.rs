use super::*;

// =============================================================
// from_response message selection
// =============================================================

#[test]
fn from_response_prefers_message_then_error() {
    let e = ApiError::from_response(500, &serde_json::json!({"message":"m1","error":"m2"}));
    assert_eq!(e.to_string(), "m1");

    let e = ApiError::from_response(500, &serde_json::json!({"error":"m2"}));
    assert_eq!(e.to_string(), "m2");
}

#[test]
fn from_response_falls_back_to_status_message() {
    let e = ApiError::from_response(502, &serde_json::json!({}));
    assert_eq!(e.to_string(), "HTTP 502 Error");

    let e = ApiError::from_response(404, &serde_json::Value::Null);
    assert_eq!(e.to_string(), "HTTP 404 Error");
}

#[test]
fn from_response_carries_timestamp() {
    let e = ApiError::from_response(
        429,
        &serde_json::json!({"message":"slow down","timestamp":"2024-06-01T10:00:00Z"}),
    );
    match e {
        ApiError::Http { timestamp, .. } => {
            assert_eq!(timestamp.as_deref(), Some("2024-06-01T10:00:00Z"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

// =============================================================
// Validation detail parsing
// =============================================================

#[test]
fn from_response_parses_field_errors_as_lists() {
    let e = ApiError::from_response(
        422,
        &serde_json::json!({
            "message": "Validation failed",
            "errors": {"email": ["taken", "invalid"], "name": "required"}
        }),
    );
    let errors = e.field_errors().expect("field errors");
    assert_eq!(errors["email"], vec!["taken", "invalid"]);
    assert_eq!(errors["name"], vec!["required"]);
}

#[test]
fn from_response_ignores_unusable_field_errors() {
    let e = ApiError::from_response(422, &serde_json::json!({"errors": {"email": 42}}));
    assert!(e.field_errors().is_none());

    let e = ApiError::from_response(422, &serde_json::json!({"errors": []}));
    assert!(e.field_errors().is_none());
}

// =============================================================
// Status classification
// =============================================================

#[test]
fn status_class_accessors() {
    let unauthorized = ApiError::from_response(401, &serde_json::json!({}));
    assert!(unauthorized.is_unauthorized());
    assert!(!unauthorized.is_forbidden());

    let forbidden = ApiError::from_response(403, &serde_json::json!({}));
    assert!(forbidden.is_forbidden());

    let limited = ApiError::from_response(429, &serde_json::json!({}));
    assert!(limited.is_rate_limited());

    let server = ApiError::from_response(503, &serde_json::json!({}));
    assert!(server.is_server_error());
    assert!(!ApiError::from_response(499, &serde_json::json!({})).is_server_error());
}

#[test]
fn connectivity_has_no_status() {
    assert_eq!(ApiError::Connectivity.status(), None);
    assert!(!ApiError::Connectivity.is_unauthorized());
    assert_eq!(
        ApiError::Connectivity.to_string(),
        "network error: check your connection"
    );
}
