//! Cross-cutting UI helpers: auth guards, navigation, validation, display
//! formatting.

pub mod auth;
pub mod format;
pub mod navigation;
pub mod validate;
