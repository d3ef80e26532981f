//! Central HTTP client: every REST call goes through one `ApiClient`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client owns the base configuration, the bearer/CSRF security slots,
//! and two interceptor chains: an ordered list of outbound request
//! transformers and the inbound normalization that turns raw responses into
//! `ApiResponse`/`ApiError`. The session store writes the bearer slot through
//! `set_bearer`/`clear_bearer`; nothing else mutates it.
//!
//! ERROR HANDLING
//! ==============
//! HTTP-level failures never panic and never surface raw transport errors:
//! callers get `ApiError` (see `net::error`). A 401 on an auth-required
//! request additionally fires the session-expired hook installed at startup.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{AuthScope, HttpRequest, Method, Transport, with_query};

/// Body field the backend expects the CSRF token under on mutating calls.
pub const CSRF_FIELD: &str = "csrf_token";

/// Bearer token and CSRF token slots shared by the interceptor chains.
///
/// Owned by the client instead of living in module-level globals so tests can
/// construct isolated instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Security {
    bearer: Option<String>,
    csrf: Option<String>,
}

impl Security {
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    pub fn csrf(&self) -> Option<&str> {
        self.csrf.as_deref()
    }
}

/// Immutable client configuration, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint root every path is joined onto.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: "/api".to_owned() }
    }
}

/// Per-call options for the verb methods.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub auth: AuthScope,
}

impl RequestOptions {
    /// Options for an endpoint reachable without authentication.
    pub fn public() -> Self {
        Self { auth: AuthScope::Public, ..Self::default() }
    }
}

/// Successful pipeline result: status plus parsed JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Decode the body into a typed DTO.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Outbound transformer applied to every request before it leaves the client.
type RequestInterceptor = Box<dyn Fn(&mut HttpRequest, &Security)>;

struct ClientInner {
    config: ClientConfig,
    transport: Rc<dyn Transport>,
    security: RefCell<Security>,
    request_chain: Vec<RequestInterceptor>,
    on_session_expired: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Shared request pipeline. Cheap to clone; clones share security state.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self::with_config(ClientConfig::default(), transport)
    }

    pub fn with_config(config: ClientConfig, transport: Rc<dyn Transport>) -> Self {
        // Order matters: origin marker, then bearer, then CSRF body merge.
        let request_chain: Vec<RequestInterceptor> = vec![
            Box::new(mark_script_origin),
            Box::new(attach_bearer),
            Box::new(attach_csrf),
        ];
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                security: RefCell::new(Security::default()),
                request_chain,
                on_session_expired: RefCell::new(None),
            }),
        }
    }

    /// Endpoint root all paths are joined onto.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// Install the bearer token attached to all subsequent requests.
    pub fn set_bearer(&self, token: &str) {
        self.inner.security.borrow_mut().bearer = Some(token.to_owned());
    }

    /// Remove the bearer token; subsequent requests go out unauthenticated.
    pub fn clear_bearer(&self) {
        self.inner.security.borrow_mut().bearer = None;
    }

    pub fn bearer(&self) -> Option<String> {
        self.inner.security.borrow().bearer.clone()
    }

    /// Most recently captured CSRF token, if any response has carried one.
    pub fn csrf_token(&self) -> Option<String> {
        self.inner.security.borrow().csrf.clone()
    }

    /// Install the hook fired when an auth-required request gets a 401.
    /// The production hook clears credentials and hard-navigates to `/login`.
    pub fn set_session_expired_hook(&self, hook: impl Fn() + 'static) {
        *self.inner.on_session_expired.borrow_mut() = Some(Rc::new(hook));
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.execute(Method::Get, path, None, options).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(Method::Post, path, body, options).await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(Method::Put, path, body, options).await
    }

    pub async fn patch(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(Method::Patch, path, body, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.execute(Method::Delete, path, body, options).await
    }

    /// Assemble, intercept, send, and normalize one request.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.inner.config.base_url, with_query(path, &options.query));
        let mut request = HttpRequest {
            method,
            url,
            headers: options.headers,
            body,
            auth: options.auth,
        };

        {
            let security = self.inner.security.borrow();
            for step in &self.inner.request_chain {
                step(&mut request, &security);
            }
        }

        // Short correlation id so a failure can be matched to its request.
        let request_id = short_request_id();
        let auth = request.auth;
        let outcome = self.inner.transport.send(request).await;

        match outcome {
            Err(transport_error) => {
                leptos::logging::warn!(
                    "[{request_id}] {} {path} failed before a response arrived: {transport_error}",
                    method.as_str()
                );
                Err(ApiError::Connectivity)
            }
            Ok(response) if response.is_success() => {
                capture_csrf(&response.body, &mut self.inner.security.borrow_mut());
                Ok(ApiResponse { status: response.status, body: response.body })
            }
            Ok(response) => {
                let error = ApiError::from_response(response.status, &response.body);
                leptos::logging::warn!(
                    "[{request_id}] {} {path} -> {}: {error}",
                    method.as_str(),
                    response.status
                );
                if response.status == 401 && auth == AuthScope::Required {
                    let hook = self.inner.on_session_expired.borrow().clone();
                    if let Some(hook) = hook {
                        hook();
                    }
                }
                Err(error)
            }
        }
    }
}

/// First outbound step: mark the request as script-originated so the backend
/// can tell API calls from plain navigation.
pub fn mark_script_origin(request: &mut HttpRequest, _security: &Security) {
    if request.header("X-Requested-With").is_none() {
        request
            .headers
            .push(("X-Requested-With".to_owned(), "XMLHttpRequest".to_owned()));
    }
}

/// Second outbound step: attach the bearer token when a session exists.
pub fn attach_bearer(request: &mut HttpRequest, security: &Security) {
    if let Some(token) = security.bearer() {
        if request.header("Authorization").is_none() {
            request
                .headers
                .push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
    }
}

/// Third outbound step: merge the captured CSRF token into the body of
/// mutating requests. Bodies without a token captured yet go out unmodified;
/// non-object bodies are left alone.
pub fn attach_csrf(request: &mut HttpRequest, security: &Security) {
    if !request.method.is_mutating() {
        return;
    }
    let Some(token) = security.csrf() else {
        return;
    };
    match &mut request.body {
        None => {
            request.body = Some(serde_json::json!({ CSRF_FIELD: token }));
        }
        Some(serde_json::Value::Object(fields)) => {
            fields.insert(CSRF_FIELD.to_owned(), serde_json::Value::String(token.to_owned()));
        }
        Some(_) => {}
    }
}

/// Inbound step: rotate the CSRF slot whenever a successful response body
/// carries a token.
pub fn capture_csrf(body: &serde_json::Value, security: &mut Security) {
    if let Some(token) = body.get(CSRF_FIELD).and_then(serde_json::Value::as_str) {
        security.csrf = Some(token.to_owned());
    }
}

fn short_request_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    id[..8].to_owned()
}
