//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns the authenticated-session state machine, `storage` its
//! persistence seam, and `auth` the reactive snapshot components consume.

pub mod auth;
pub mod session;
pub mod storage;
