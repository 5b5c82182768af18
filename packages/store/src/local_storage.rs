//! # Browser `localStorage` session storage
//!
//! [`BrowserStorage`] is the [`SessionStorage`] used on the web platform. It is a
//! zero-size handle that looks up `window.localStorage` on every call; the
//! browser keeps the underlying object alive, so there is nothing to cache.
//!
//! All methods swallow errors (storage disabled, quota exceeded, private mode).
//! A failed read looks like "signed out", which sends the user to the login page.

use crate::session::SessionStorage;

/// `window.localStorage`-backed SessionStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStorage for BrowserStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok()?
    }

    fn save(&self, key: &str, value: &str) {
        let Some(storage) = Self::local_storage() else {
            tracing::warn!("localStorage unavailable, session not persisted");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!("Failed to write {} to localStorage", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
