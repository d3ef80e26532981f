//! # coursedeck
//!
//! Leptos + WASM browser client for the CourseDeck e-learning platform
//! (course catalog, enrollment, quizzes, account management) against an
//! external PHP REST API.
//!
//! The rigorous core is the networking/session layer: a single `ApiClient`
//! pipeline with explicit interceptor chains (security headers, CSRF
//! propagation, error normalization, session-expiry handling) and a
//! `SessionStore` owning the token lifecycle. Pages and components are thin
//! wrappers over that core.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: mount the app client-side.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Verbose logging in dev builds only.
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Warn };
    let _ = console_log::init_with_level(level);

    leptos::mount::mount_to_body(app::App);
}
