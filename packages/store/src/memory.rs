use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::session::SessionStorage;

/// In-memory SessionStorage for testing and server-side rendering.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserInfo;
    use crate::session::{SessionStore, SESSION_KEY};

    fn alice() -> UserInfo {
        UserInfo {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            pinterest_connected: false,
        }
    }

    #[test]
    fn test_sign_in_and_load() {
        let store = SessionStore::new(MemoryStorage::new());

        // Initially signed out
        assert!(store.load().is_none());
        assert!(!store.is_authenticated());
        assert!(!store.pinterest_connected());

        store.sign_in("token-1".to_string(), alice());

        let session = store.load().unwrap();
        assert_eq!(session.token, "token-1");
        assert_eq!(session.user.username, "alice");
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_pinterest_flag_survives_reopen() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.sign_in("token-1".to_string(), alice());

        let updated = store.set_pinterest_connected(true).unwrap();
        assert!(updated.pinterest_connected);

        // A second store over the same storage sees the write
        let reopened = SessionStore::new(storage);
        assert!(reopened.pinterest_connected());
        assert_eq!(reopened.token().as_deref(), Some("token-1"));
    }

    #[test]
    fn test_update_user_when_signed_out() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(store.set_pinterest_connected(true).is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_replace_user_keeps_token() {
        let store = SessionStore::new(MemoryStorage::new());
        store.sign_in("token-1".to_string(), alice());

        let mut renamed = alice();
        renamed.username = "alice2".to_string();
        store.replace_user(renamed);

        let session = store.load().unwrap();
        assert_eq!(session.token, "token-1");
        assert_eq!(session.user.username, "alice2");
    }

    #[test]
    fn test_clear() {
        let store = SessionStore::new(MemoryStorage::new());
        store.sign_in("token-1".to_string(), alice());
        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_corrupt_blob_is_discarded() {
        let storage = MemoryStorage::new();
        storage.save(SESSION_KEY, "{not json");

        let store = SessionStore::new(storage.clone());
        assert!(store.load().is_none());
        assert!(storage.load(SESSION_KEY).is_none());
    }

    #[test]
    fn test_legacy_blob_without_flag() {
        let storage = MemoryStorage::new();
        storage.save(
            SESSION_KEY,
            r#"{"token":"t","user":{"id":"1","username":"bob","email":"b@x.io"}}"#,
        );

        let store = SessionStore::new(storage);
        let user = store.user().unwrap();
        assert_eq!(user.username, "bob");
        assert!(!user.pinterest_connected);
    }
}
