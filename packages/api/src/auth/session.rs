//! Session helpers shared by every authenticated server function.
//!
//! The session cookie carries only the user id under [`SESSION_USER_ID_KEY`];
//! everything else is loaded from the `users` table on each request.

use dioxus::prelude::ServerFnError;
use tower_sessions::Session;
use uuid::Uuid;

use crate::db::get_pool;
use crate::models::User;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user id, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<Uuid>, ServerFnError> {
    let user_id: Option<String> = session
        .get(SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user_id
        .map(|id| Uuid::parse_str(&id).map_err(|e| ServerFnError::new(e.to_string())))
        .transpose()
}

/// The signed-in user id, or "Not authenticated".
pub async fn require_user_id(session: &Session) -> Result<Uuid, ServerFnError> {
    current_user_id(session)
        .await?
        .ok_or_else(|| ServerFnError::new("Not authenticated"))
}

/// The signed-in user's row.
pub async fn require_user(session: &Session) -> Result<User, ServerFnError> {
    let user_id = require_user_id(session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    user.ok_or_else(|| ServerFnError::new("User not found"))
}

/// Bind the session to `user_id` and return the token handed to the client.
pub async fn start_session(session: &Session, user_id: Uuid) -> Result<String, ServerFnError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .save()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .id()
        .map(|id| id.to_string())
        .ok_or_else(|| ServerFnError::new("Session was not persisted"))
}
