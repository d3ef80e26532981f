//! Transport seam between the request pipeline and the browser fetch API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` talks to a `Transport` trait object, never to `gloo-net`
//! directly, so the interceptor chains can be exercised natively against a
//! scripted transport. The real `FetchTransport` only exists under the `csr`
//! feature.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures::future::LocalBoxFuture;

/// Fixed per-request timeout enforced by the transport.
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// HTTP verb for an outgoing request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Whether the verb changes server state and therefore must carry the
    /// CSRF token once one has been issued.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Whether a 401 on this request means the session expired.
///
/// Catalog browsing, the CSRF bootstrap, the connectivity probe, and the
/// startup verify call are reachable without authentication; a 401 there is
/// an ordinary error, not a session event. The tag is attached per endpoint
/// in `net::api` instead of matching path substrings at interception time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthScope {
    /// A 401 response clears credentials and forces re-authentication.
    #[default]
    Required,
    /// A 401 response is surfaced like any other error.
    Public,
}

/// A fully assembled outgoing request, after interceptors have run.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute path under the configured base URL, query string included.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body, if any. Interceptors may merge fields into object bodies.
    pub body: Option<serde_json::Value>,
    pub auth: AuthScope,
}

impl HttpRequest {
    /// Look up a header value case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response before inbound interception.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; `Null` when the body was empty or not JSON.
    pub body: serde_json::Value,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response reached the client.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("request timed out after {REQUEST_TIMEOUT_MS} ms")]
    Timeout,
    #[error("transport not available in this environment")]
    Unavailable,
}

/// Request executor the pipeline is generic over.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>>;
}

/// Append query parameters to a path, URL-encoding values.
pub fn with_query(path: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path.to_owned();
    }
    let mut out = String::from(path);
    for (i, (key, value)) in query.iter().enumerate() {
        out.push(if i == 0 && !path.contains('?') { '?' } else { '&' });
        out.push_str(&encode_component(key));
        out.push('=');
        out.push_str(&encode_component(value));
    }
    out
}

/// Minimal percent-encoding for query components.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Transport used when no browser is available (native builds without a mock
/// installed). Every call fails without reaching a network.
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&self, _request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
        Box::pin(async { Err(TransportError::Unavailable) })
    }
}

/// Browser transport backed by `gloo-net`, bounded by [`REQUEST_TIMEOUT_MS`].
#[cfg(feature = "csr")]
pub struct FetchTransport;

#[cfg(feature = "csr")]
impl Transport for FetchTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let send = Box::pin(fetch_once(request));
            let timeout = Box::pin(gloo_timers::future::sleep(
                std::time::Duration::from_millis(u64::from(REQUEST_TIMEOUT_MS)),
            ));
            match futures::future::select(send, timeout).await {
                futures::future::Either::Left((result, _)) => result,
                futures::future::Either::Right(((), _)) => Err(TransportError::Timeout),
            }
        })
    }
}

/// Issue one fetch call and parse the body as JSON (`Null` when empty).
#[cfg(feature = "csr")]
async fn fetch_once(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Patch => Request::patch(&request.url),
        Method::Delete => Request::delete(&request.url),
    }
    .credentials(web_sys::RequestCredentials::Include);

    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let ready = match &request.body {
        Some(body) => builder
            .json(body)
            .map_err(|e| TransportError::Network(e.to_string()))?,
        None => builder
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?,
    };

    let resp = ready
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .json::<serde_json::Value>()
        .await
        .unwrap_or(serde_json::Value::Null);

    Ok(HttpResponse { status, body })
}

#[cfg(test)]
pub mod testing {
    //! Scripted transport for native pipeline tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::{HttpRequest, HttpResponse, Transport, TransportError};
    use futures::future::LocalBoxFuture;

    /// Records every request and replays a scripted queue of outcomes.
    /// When the queue runs dry, answers `200 {}`.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        requests: Rc<RefCell<Vec<HttpRequest>>>,
        script: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
            self.script
                .borrow_mut()
                .push_back(Ok(HttpResponse { status, body }));
            self
        }

        pub fn fail(&self, error: TransportError) -> &Self {
            self.script.borrow_mut().push_back(Err(error));
            self
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.borrow().clone()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: HttpRequest) -> LocalBoxFuture<'static, Result<HttpResponse, TransportError>> {
            self.requests.borrow_mut().push(request);
            let next = self.script.borrow_mut().pop_front().unwrap_or(Ok(HttpResponse {
                status: 200,
                body: serde_json::json!({}),
            }));
            Box::pin(async move { next })
        }
    }
}
