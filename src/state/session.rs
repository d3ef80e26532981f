//! Authentication session store: the single owner of token + user state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is the only writer of the pipeline's bearer slot and the
//! persisted token key. It moves through three states: Initializing
//! (`loading == true`, startup verify in flight) and the two terminal states
//! Anonymous and Authenticated. UI layers read via `snapshot()` and watch via
//! `subscribe()`; no view-framework types appear here.
//!
//! ERROR HANDLING
//! ==============
//! `login`/`register` absorb failures into `AuthOutcome` — a failed login is
//! an expected user-facing outcome, not an exception. Everything else
//! propagates or cleans up.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::types::{RegisterProfile, User};

use super::storage::{LOGIN_EMAIL_KEY, TOKEN_KEY, TokenStorage};

/// Point-in-time view of the session.
///
/// Invariant: `user` is only present when `token` is present and was accepted
/// by the backend (or freshly issued by login/register). `loading` is true
/// only while the startup verification is outstanding and transitions to
/// false exactly once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Result value for login/register, rendered inline by forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl AuthOutcome {
    fn ok() -> Self {
        Self { success: true, message: None }
    }

    fn failed(message: String) -> Self {
        Self { success: false, message: Some(message) }
    }
}

/// Remove the persisted token and the pipeline's bearer header.
///
/// Backs [`SessionStore::logout`], which both the logout action and the
/// pipeline's session-expiry hook go through, so every cleanup path stays
/// behaviorally identical.
pub fn clear_credentials(storage: &dyn TokenStorage, client: &ApiClient) {
    storage.remove(TOKEN_KEY);
    client.clear_bearer();
}

type Subscriber = Box<dyn Fn(&Session)>;

/// Process-wide session store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionStore {
    client: ApiClient,
    storage: Rc<dyn TokenStorage>,
    session: Rc<RefCell<Session>>,
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
    /// Set when [`initialize`] first runs, before its verify call awaits,
    /// so overlapping invocations cannot double-issue the startup request.
    ///
    /// [`initialize`]: SessionStore::initialize
    started: Rc<Cell<bool>>,
}

impl SessionStore {
    /// Create a store in the Initializing state. Call [`initialize`]
    /// (exactly once) to settle it.
    ///
    /// [`initialize`]: SessionStore::initialize
    pub fn new(client: ApiClient, storage: Rc<dyn TokenStorage>) -> Self {
        Self {
            client,
            storage,
            session: Rc::new(RefCell::new(Session {
                token: None,
                user: None,
                loading: true,
            })),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            started: Rc::new(Cell::new(false)),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Watch for session changes. The callback fires after every state
    /// transition with the new snapshot.
    pub fn subscribe(&self, subscriber: impl Fn(&Session) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }

    /// Last email a login succeeded with, for pre-filling the form.
    pub fn remembered_email(&self) -> Option<String> {
        self.storage.get(LOGIN_EMAIL_KEY)
    }

    /// Startup transition: load the persisted token and verify it.
    ///
    /// No stored token settles to Anonymous without a network call. A stored
    /// token is installed on the pipeline first, then checked against
    /// `/auth/verify`; rejection performs the same cleanup as logout.
    /// Repeat calls are no-ops, including ones that overlap the first while
    /// its verify request is still in flight.
    pub async fn initialize(&self) {
        if self.started.replace(true) || !self.session.borrow().loading {
            return;
        }

        let Some(token) = self.storage.get(TOKEN_KEY) else {
            self.settle(None, None);
            return;
        };

        self.client.set_bearer(&token);
        match api::verify(&self.client).await {
            Ok(user) => self.settle(Some(token), Some(user)),
            Err(error) => {
                leptos::logging::log!("stored session rejected, starting anonymous: {error}");
                clear_credentials(self.storage.as_ref(), &self.client);
                self.settle(None, None);
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On failure the state is untouched and the server's message (or the
    /// normalized fallback) is returned for inline rendering.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        match api::login(&self.client, email, password).await {
            Ok(payload) => {
                self.storage.set(LOGIN_EMAIL_KEY, email);
                self.establish(payload.token, payload.user);
                AuthOutcome::ok()
            }
            Err(error) => AuthOutcome::failed(error.to_string()),
        }
    }

    /// Create an account; contract identical to [`login`].
    ///
    /// [`login`]: SessionStore::login
    pub async fn register(&self, profile: &RegisterProfile) -> AuthOutcome {
        match api::register(&self.client, profile).await {
            Ok(payload) => {
                self.storage.set(LOGIN_EMAIL_KEY, &profile.email);
                self.establish(payload.token, payload.user);
                AuthOutcome::ok()
            }
            Err(error) => AuthOutcome::failed(error.to_string()),
        }
    }

    /// Drop the session locally: persisted token, bearer header, and
    /// in-memory state. Always succeeds, from any state; no network call.
    pub fn logout(&self) {
        clear_credentials(self.storage.as_ref(), &self.client);
        {
            let mut session = self.session.borrow_mut();
            session.token = None;
            session.user = None;
            session.loading = false;
        }
        self.notify();
    }

    /// Install a fresh session in strict order: persist, then bearer header,
    /// then in-memory state, so no reader observes a user without the token
    /// already durable and installed.
    fn establish(&self, token: String, user: User) {
        self.storage.set(TOKEN_KEY, &token);
        self.client.set_bearer(&token);
        {
            let mut session = self.session.borrow_mut();
            session.token = Some(token);
            session.user = Some(user);
            session.loading = false;
        }
        self.notify();
    }

    /// Leave Initializing for a terminal state.
    fn settle(&self, token: Option<String>, user: Option<User>) {
        {
            let mut session = self.session.borrow_mut();
            session.token = token;
            session.user = user;
            session.loading = false;
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        for subscriber in self.subscribers.borrow().iter() {
            subscriber(&snapshot);
        }
    }
}
