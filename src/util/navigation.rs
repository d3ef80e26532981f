//! Hard-navigation helpers for session expiry.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session expiry deliberately performs a full page navigation to `/login`
//! (not a soft route change) so no stale authenticated UI stays mounted.
//! The decision logic is pure so it can be tested without a browser.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

/// Path of the login page, target of the session-expiry reset.
pub const LOGIN_PATH: &str = "/login";

/// Whether the expiry reset should navigate, given the current path.
/// Already being on the login page means there is nothing to reset.
pub fn should_leave_for_login(current_path: &str) -> bool {
    current_path != LOGIN_PATH
}

/// Full-page navigation to the login page, unless already there.
///
/// This is the explicit "force re-authentication" action the pipeline's
/// session-expiry hook ends with.
pub fn force_reauthenticate() {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            let current = location.pathname().unwrap_or_default();
            if should_leave_for_login(&current) {
                let _ = location.set_href(LOGIN_PATH);
            }
        }
    }
}
