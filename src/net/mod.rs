//! Networking: the shared HTTP pipeline and everything layered on it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` is the single choke point for REST calls; `transport` is its
//! browser/mock seam; `api` exposes typed endpoint wrappers; `retry` and
//! `upload` are opt-in helpers; `types` defines the wire schema; `error` the
//! normalized failure shape.

pub mod api;
pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;
pub mod upload;
