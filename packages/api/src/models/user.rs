//! # User model for authenticated users
//!
//! Defines the two representations of a Pinspire user:
//!
//! ## [`User`] (server only)
//!
//! The complete database row from the `users` table, loaded with
//! [`sqlx::FromRow`]:
//!
//! - `id`: primary key (`UUID v4`).
//! - `username`, `email`: both unique; login is by username.
//! - `password_hash`: Argon2 PHC string.
//! - `pinterest_connected` plus the Pinterest access/refresh tokens obtained by
//!   the OAuth callback. Tokens never leave the server.
//! - `created_at` / `updated_at`: audit timestamps.
//!
//! [`User::to_info`] projects this into a [`UserInfo`].
//!
//! ## [`UserInfo`]
//!
//! Re-exported from the `store` crate, which persists it in the client session.
//!
//! ## [`AuthResponse`]
//!
//! What login, signup and demo login return: the issued token, its type
//! (`"bearer"`) and the user record.

use serde::{Deserialize, Serialize};

pub use store::UserInfo;

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub pinterest_connected: bool,
    pub pinterest_access_token: Option<String>,
    pub pinterest_refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            username: self.username.clone(),
            email: self.email.clone(),
            pinterest_connected: self.pinterest_connected,
        }
    }
}

/// Token and user returned by the login endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserInfo,
}
