//! # Session models
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserInfo`] | The client-safe user record returned by the auth endpoints. Carries the `pinterest_connected` flag the UI reads to decide whether publishing is possible. |
//! | [`Session`] | What is persisted between page loads: the token issued at login plus the [`UserInfo`] it belongs to. |
//!
//! Both are `Serialize + Deserialize` so they cross the server/client boundary
//! and round-trip through browser storage unchanged.

use serde::{Deserialize, Serialize};

/// User information safe to send to the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Older stored blobs predate the flag; treat them as disconnected.
    #[serde(default)]
    pub pinterest_connected: bool,
}

impl UserInfo {
    /// Name shown in the navbar.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

/// The persisted client session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserInfo,
}
