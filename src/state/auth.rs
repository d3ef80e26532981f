//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and role-dependent rendering. Mirrored from the session store's
//! snapshots into an `RwSignal` by the root component; components treat
//! `loading == true` as "do not decide auth/redirect yet".

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

use super::session::Session;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

impl From<&Session> for AuthState {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user.clone(),
            loading: session.loading,
        }
    }
}
