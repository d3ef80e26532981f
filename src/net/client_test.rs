use super::*;
use crate::net::transport::testing::MockTransport;
use crate::net::transport::TransportError;
use futures::executor::block_on;

fn client_with(transport: &MockTransport) -> ApiClient {
    ApiClient::new(Rc::new(transport.clone()))
}

// =============================================================
// Outbound chain
// =============================================================

#[test]
fn every_request_is_marked_script_originated() {
    let transport = MockTransport::new();
    let client = client_with(&transport);

    block_on(client.get("/courses/index.php", RequestOptions::public())).expect("ok");

    let sent = transport.last_request().expect("request sent");
    assert_eq!(sent.header("X-Requested-With"), Some("XMLHttpRequest"));
}

#[test]
fn bearer_is_attached_only_once_installed() {
    let transport = MockTransport::new();
    let client = client_with(&transport);

    block_on(client.get("/courses/index.php", RequestOptions::public())).expect("ok");
    assert_eq!(transport.last_request().expect("sent").header("Authorization"), None);

    client.set_bearer("tok-123");
    block_on(client.get("/enrollments/index.php", RequestOptions::default())).expect("ok");
    assert_eq!(
        transport.last_request().expect("sent").header("Authorization"),
        Some("Bearer tok-123")
    );

    client.clear_bearer();
    block_on(client.get("/courses/index.php", RequestOptions::public())).expect("ok");
    assert_eq!(transport.last_request().expect("sent").header("Authorization"), None);
}

#[test]
fn caller_supplied_headers_are_not_duplicated() {
    let transport = MockTransport::new();
    let client = client_with(&transport);
    client.set_bearer("tok");

    let options = RequestOptions {
        headers: vec![("Authorization".to_owned(), "Bearer override".to_owned())],
        ..RequestOptions::default()
    };
    block_on(client.get("/x", options)).expect("ok");

    let sent = transport.last_request().expect("sent");
    let auth_headers = sent
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("authorization"))
        .count();
    assert_eq!(auth_headers, 1);
    assert_eq!(sent.header("Authorization"), Some("Bearer override"));
}

#[test]
fn paths_are_joined_onto_base_url_with_query() {
    let transport = MockTransport::new();
    let client = client_with(&transport);

    let options = RequestOptions {
        query: vec![("id".to_owned(), "7".to_owned())],
        auth: crate::net::transport::AuthScope::Public,
        headers: vec![],
    };
    block_on(client.get("/courses/view.php", options)).expect("ok");

    assert_eq!(
        transport.last_request().expect("sent").url,
        "/api/courses/view.php?id=7"
    );
}

// =============================================================
// CSRF propagation (P1)
// =============================================================

#[test]
fn mutating_body_is_unmodified_before_any_capture() {
    let transport = MockTransport::new();
    let client = client_with(&transport);

    let body = serde_json::json!({"course_id": 5});
    block_on(client.post("/enrollments/create.php", Some(body.clone()), RequestOptions::default()))
        .expect("ok");

    assert_eq!(transport.last_request().expect("sent").body, Some(body));
}

#[test]
fn captured_token_is_merged_into_later_mutating_bodies() {
    let transport = MockTransport::new();
    transport.respond(200, serde_json::json!({"csrf_token": "c-1"}));
    let client = client_with(&transport);

    block_on(client.get("/auth/csrf-token.php", RequestOptions::public())).expect("ok");
    assert_eq!(client.csrf_token().as_deref(), Some("c-1"));

    block_on(client.post(
        "/enrollments/create.php",
        Some(serde_json::json!({"course_id": 5})),
        RequestOptions::default(),
    ))
    .expect("ok");

    let sent = transport.last_request().expect("sent");
    let body = sent.body.expect("body");
    assert_eq!(body["course_id"], 5);
    assert_eq!(body["csrf_token"], "c-1");
}

#[test]
fn captured_token_fills_empty_mutating_bodies() {
    let transport = MockTransport::new();
    transport.respond(200, serde_json::json!({"csrf_token": "c-1"}));
    let client = client_with(&transport);

    block_on(client.get("/auth/csrf-token.php", RequestOptions::public())).expect("ok");
    block_on(client.delete("/enrollments/delete.php", None, RequestOptions::default())).expect("ok");

    let body = transport.last_request().expect("sent").body.expect("body");
    assert_eq!(body, serde_json::json!({"csrf_token": "c-1"}));
}

#[test]
fn get_requests_never_carry_the_token() {
    let transport = MockTransport::new();
    transport.respond(200, serde_json::json!({"csrf_token": "c-1"}));
    let client = client_with(&transport);

    block_on(client.get("/auth/csrf-token.php", RequestOptions::public())).expect("ok");
    block_on(client.get("/courses/index.php", RequestOptions::public())).expect("ok");

    let sent = transport.last_request().expect("sent");
    assert_eq!(sent.body, None);
}

#[test]
fn token_rotates_on_every_capture() {
    let transport = MockTransport::new();
    transport.respond(200, serde_json::json!({"csrf_token": "c-1"}));
    transport.respond(200, serde_json::json!({"ok": true, "csrf_token": "c-2"}));
    let client = client_with(&transport);

    block_on(client.get("/auth/csrf-token.php", RequestOptions::public())).expect("ok");
    block_on(client.post("/quizzes/submit.php", None, RequestOptions::default())).expect("ok");
    assert_eq!(client.csrf_token().as_deref(), Some("c-2"));
}

#[test]
fn non_object_bodies_are_left_alone() {
    let transport = MockTransport::new();
    transport.respond(200, serde_json::json!({"csrf_token": "c-1"}));
    let client = client_with(&transport);

    block_on(client.get("/auth/csrf-token.php", RequestOptions::public())).expect("ok");
    let body = serde_json::json!([1, 2, 3]);
    block_on(client.post("/bulk.php", Some(body.clone()), RequestOptions::default())).expect("ok");

    assert_eq!(transport.last_request().expect("sent").body, Some(body));
}

// =============================================================
// Inbound normalization
// =============================================================

#[test]
fn transport_failures_surface_as_connectivity() {
    let transport = MockTransport::new();
    transport.fail(TransportError::Timeout);
    let client = client_with(&transport);

    let err = block_on(client.get("/courses/index.php", RequestOptions::public())).unwrap_err();
    assert_eq!(err, ApiError::Connectivity);
}

#[test]
fn http_failures_carry_server_message_and_detail() {
    let transport = MockTransport::new();
    transport.respond(
        422,
        serde_json::json!({"message": "Validation failed", "errors": {"email": ["taken"]}}),
    );
    let client = client_with(&transport);

    let err = block_on(client.post("/auth/register", None, RequestOptions::public())).unwrap_err();
    assert_eq!(err.to_string(), "Validation failed");
    assert_eq!(err.field_errors().expect("errors")["email"], vec!["taken"]);
}

#[test]
fn decode_failure_is_reported_as_decode() {
    let transport = MockTransport::new();
    transport.respond(200, serde_json::json!({"unexpected": true}));
    let client = client_with(&transport);

    let response = block_on(client.get("/auth/verify", RequestOptions::public())).expect("ok");
    let parsed: Result<crate::net::types::User, _> = response.json();
    assert!(matches!(parsed, Err(ApiError::Decode(_))));
}

// =============================================================
// Session-expiry hook (P2)
// =============================================================

#[test]
fn unauthorized_on_required_request_fires_hook() {
    let transport = MockTransport::new();
    transport.respond(401, serde_json::json!({"message": "Token expired"}));
    let client = client_with(&transport);

    let fired = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&fired);
    client.set_session_expired_hook(move || *counter.borrow_mut() += 1);

    let err = block_on(client.post("/admin/courses.php", None, RequestOptions::default())).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(*fired.borrow(), 1);
}

#[test]
fn unauthorized_on_public_request_never_fires_hook() {
    let transport = MockTransport::new();
    transport.respond(401, serde_json::json!({}));
    let client = client_with(&transport);

    let fired = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&fired);
    client.set_session_expired_hook(move || *counter.borrow_mut() += 1);

    let err = block_on(client.get("/courses/index.php", RequestOptions::public())).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(*fired.borrow(), 0);
}

#[test]
fn other_failure_statuses_never_fire_hook() {
    let transport = MockTransport::new();
    transport.respond(403, serde_json::json!({}));
    transport.respond(429, serde_json::json!({}));
    transport.respond(500, serde_json::json!({}));
    let client = client_with(&transport);

    let fired = Rc::new(RefCell::new(0_u32));
    let counter = Rc::clone(&fired);
    client.set_session_expired_hook(move || *counter.borrow_mut() += 1);

    for _ in 0..3 {
        let _ = block_on(client.post("/admin/courses.php", None, RequestOptions::default()));
    }
    assert_eq!(*fired.borrow(), 0);
}

// =============================================================
// Interceptor steps in isolation
// =============================================================

fn bare_request(method: crate::net::transport::Method) -> HttpRequest {
    HttpRequest {
        method,
        url: "/api/x".to_owned(),
        headers: vec![],
        body: None,
        auth: crate::net::transport::AuthScope::Required,
    }
}

#[test]
fn attach_csrf_preserves_existing_fields() {
    let security = Security {
        bearer: None,
        csrf: Some("c-9".to_owned()),
    };
    let mut request = bare_request(crate::net::transport::Method::Put);
    request.body = Some(serde_json::json!({"name": "Jo", "csrf_token": "stale"}));

    attach_csrf(&mut request, &security);

    let body = request.body.expect("body");
    assert_eq!(body["name"], "Jo");
    assert_eq!(body["csrf_token"], "c-9");
}

#[test]
fn capture_csrf_ignores_non_string_tokens() {
    let mut security = Security::default();
    capture_csrf(&serde_json::json!({"csrf_token": 42}), &mut security);
    assert_eq!(security.csrf(), None);

    capture_csrf(&serde_json::json!({"csrf_token": "c-1"}), &mut security);
    assert_eq!(security.csrf(), Some("c-1"));
}

#[test]
fn mark_script_origin_is_idempotent() {
    let security = Security::default();
    let mut request = bare_request(crate::net::transport::Method::Get);
    mark_script_origin(&mut request, &security);
    mark_script_origin(&mut request, &security);
    assert_eq!(request.headers.len(), 1);
}
