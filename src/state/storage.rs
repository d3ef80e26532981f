//! Durable client-side storage for the bearer token and login convenience
//! data.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists through this trait so native tests (and any
//! non-browser consumer) can swap in `MemoryStorage`. `BrowserStorage` wraps
//! `localStorage`; the token is stored as plain text, a known limitation of
//! the product.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "coursedeck_token";
/// Storage key remembering the last-used login email (not security-sensitive).
pub const LOGIN_EMAIL_KEY: &str = "coursedeck_login_email";

/// Minimal key/value persistence seam.
pub trait TokenStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage for tests and non-browser builds.
#[derive(Default)]
pub struct MemoryStorage {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// `localStorage`-backed storage. All failures degrade to "no value":
/// storage being unavailable (private browsing, disabled) must never crash
/// the app.
#[cfg(feature = "csr")]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok()).flatten() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok()).flatten() {
            let _ = storage.remove_item(key);
        }
    }
}
