//! Normalized API error shape surfaced by the HTTP pipeline.
//!
//! ERROR HANDLING
//! ==============
//! Every pipeline failure reaches callers as one of these variants; raw
//! transport errors never escape `net::client`. Status-class accessors let
//! call sites branch without re-matching on numeric codes.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use thiserror::Error;

/// Field-level validation detail passed through from the server, keyed by
/// form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Uniform error for every failed pipeline call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response reached the client: offline, DNS failure, or the 30 s
    /// transport timeout.
    #[error("network error: check your connection")]
    Connectivity,

    /// The server answered with a non-success status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        errors: Option<FieldErrors>,
        timestamp: Option<String>,
    },

    /// The server answered 2xx but the body did not match the expected
    /// schema.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failure, if the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Connectivity | Self::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }

    /// Validation detail for inline form rendering, when the server sent any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Http { errors, .. } => errors.as_ref(),
            Self::Connectivity | Self::Decode(_) => None,
        }
    }

    /// Build the normalized error from a failed response.
    ///
    /// Prefers the server-supplied `message` (then `error`) body field and
    /// falls back to `"HTTP <status> Error"`. `errors` and `timestamp` are
    /// carried through verbatim when present.
    pub fn from_response(status: u16, body: &serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| body.get("error").and_then(serde_json::Value::as_str))
            .map_or_else(|| format!("HTTP {status} Error"), ToOwned::to_owned);

        let errors = body.get("errors").and_then(parse_field_errors);

        let timestamp = body
            .get("timestamp")
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned);

        Self::Http { status, message, errors, timestamp }
    }
}

/// Parse the `errors` body field into per-field message lists.
///
/// Accepts both `{"field": "msg"}` and `{"field": ["msg", ...]}` shapes since
/// the backend is not consistent across endpoints.
fn parse_field_errors(value: &serde_json::Value) -> Option<FieldErrors> {
    let map = value.as_object()?;
    let mut out = FieldErrors::new();
    for (field, detail) in map {
        let messages = match detail {
            serde_json::Value::String(s) => vec![s.clone()],
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
                .collect(),
            _ => continue,
        };
        if !messages.is_empty() {
            out.insert(field.clone(), messages);
        }
    }
    if out.is_empty() { None } else { Some(out) }
}
