//! # Session store: the single source of truth for the signed-in user
//!
//! [`SessionStore`] wraps a [`SessionStorage`] backend and exposes typed
//! read/update/clear operations over the persisted [`Session`] blob. Every
//! mutation is written straight through to storage, so a reload always observes
//! the last write.
//!
//! ## [`SessionStorage`] trait
//!
//! A synchronous string key/value interface (`load`/`save`/`remove`), matching
//! the semantics of the browser's `localStorage`. Implementations live in sibling
//! modules (`memory`, and `local_storage` on the web).
//!
//! ## Corrupt data
//!
//! A blob that no longer deserializes is treated as "signed out" and removed, so
//! the user is sent back to the login page instead of the app failing to start.

use crate::models::{Session, UserInfo};

/// Storage key of the serialized session blob.
pub const SESSION_KEY: &str = "pinspire.session";

/// Synchronous key/value storage for the session blob.
pub trait SessionStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Typed access to the persisted [`Session`].
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the current session, if any.
    pub fn load(&self) -> Option<Session> {
        let raw = self.storage.load(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!("Discarding unreadable session blob: {}", e);
                self.storage.remove(SESSION_KEY);
                None
            }
        }
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.load().map(|s| s.user)
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    /// Cached connection flag. May be stale until the server confirms it.
    pub fn pinterest_connected(&self) -> bool {
        self.user().map(|u| u.pinterest_connected).unwrap_or(false)
    }

    /// Replace whatever is stored with a fresh session.
    pub fn sign_in(&self, token: String, user: UserInfo) -> Session {
        let session = Session { token, user };
        self.persist(&session);
        session
    }

    /// Mutate the stored user in place. Returns `None` when signed out.
    pub fn update_user(&self, f: impl FnOnce(&mut UserInfo)) -> Option<UserInfo> {
        let mut session = self.load()?;
        f(&mut session.user);
        self.persist(&session);
        Some(session.user)
    }

    /// Swap in the server's view of the user, keeping the token.
    pub fn replace_user(&self, user: UserInfo) -> Option<UserInfo> {
        self.update_user(|current| *current = user)
    }

    pub fn set_pinterest_connected(&self, connected: bool) -> Option<UserInfo> {
        self.update_user(|user| user.pinterest_connected = connected)
    }

    /// Forget the session (logout).
    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }

    fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => self.storage.save(SESSION_KEY, &raw),
            Err(e) => tracing::error!("Failed to serialize session: {}", e),
        }
    }
}
