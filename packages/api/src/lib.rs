//! # API crate: shared fullstack server functions for Pinspire
//!
//! Every Dioxus server function the web frontend calls lives in this crate,
//! together with the models and services they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`ai`] | none | Caption, image and hashtag generation (`/api/ai/*`) |
//! | [`auth`] | none | Password rules and hashing, session helpers |
//! | [`crypto`] | `server` | AES-GCM encryption of per-user Pinterest app secrets |
//! | [`db`] | none | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`models`] | none | Users, posts, boards and the AI payloads |
//! | [`pinterest`] | none | Pinterest OAuth linking, boards and publishing (`/api/pinterest/*`) |
//! | [`posts`] | none | Post CRUD (`/api/posts`) |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` below is a Dioxus server function, compiled twice:
//! once with full server logic (behind `#[cfg(feature = "server")]`) and once as
//! a thin client stub that forwards the call over HTTP.
//!
//! - **Authentication**: `signup`, `login`, `demo_login`, `get_current_user`, `logout`
//! - **Account**: `update_profile`, `update_password`
//!
//! The token returned in [`AuthResponse`] is the id of the server-side session
//! the cookie refers to; the client keeps it only as a marker of being signed in.

use dioxus::prelude::*;

pub mod ai;
pub mod auth;
#[cfg(feature = "server")]
pub mod crypto;
pub mod db;
pub mod models;
pub mod pinterest;
pub mod posts;

pub use ai::{generate_caption, generate_image, suggest_hashtags};
pub use models::{AuthResponse, UserInfo};
pub use pinterest::{
    delete_pinterest_credentials, get_pinterest_credentials, pinterest_account, pinterest_boards,
    pinterest_callback, pinterest_connect, pinterest_disconnect, pinterest_mode, publish_post,
    save_pinterest_credentials,
};
pub use posts::{create_post, delete_post, get_post, list_posts, update_post};

#[cfg(feature = "server")]
const DEMO_USERNAME: &str = "demo";
#[cfg(feature = "server")]
const DEMO_EMAIL: &str = "demo@pinspire.app";
#[cfg(feature = "server")]
const DEMO_PASSWORD: &str = "demo123";

#[cfg(feature = "server")]
fn bearer(token: String, user: &models::User) -> AuthResponse {
    AuthResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user: user.to_info(),
    }
}

/// Normalize and check the username/email pair shared by signup and profile updates.
#[cfg(feature = "server")]
fn clean_identity(username: &str, email: &str) -> Result<(String, String), ServerFnError> {
    let username = username.trim().to_string();
    let email = email.trim().to_lowercase();

    if username.is_empty() {
        return Err(ServerFnError::new("Username is required"));
    }
    if email.is_empty() || !email.contains('@') {
        return Err(ServerFnError::new("Invalid email address"));
    }
    Ok((username, email))
}

/// Create an account and sign it in.
#[cfg(feature = "server")]
#[post("/api/auth/signup", session: tower_sessions::Session)]
pub async fn signup(
    username: String,
    email: String,
    password: String,
) -> Result<AuthResponse, ServerFnError> {
    use crate::db::get_pool;

    let (username, email) = clean_identity(&username, &email)?;
    auth::validate_new_password(&password).map_err(ServerFnError::new)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let existing: Option<(i32,)> =
        sqlx::query_as("SELECT 1 FROM users WHERE username = $1 OR email = $2")
            .bind(&username)
            .bind(&email)
            .fetch_optional(pool)
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;

    if existing.is_some() {
        return Err(ServerFnError::new("Username or email already exists"));
    }

    let password_hash = auth::hash_password(&password).map_err(ServerFnError::new)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let token = auth::start_session(&session, user.id).await?;
    tracing::info!(user = %user.username, "account created");

    Ok(bearer(token, &user))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signup")]
pub async fn signup(
    username: String,
    email: String,
    password: String,
) -> Result<AuthResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with username and password.
#[cfg(feature = "server")]
#[post("/api/auth/login", session: tower_sessions::Session)]
pub async fn login(username: String, password: String) -> Result<AuthResponse, ServerFnError> {
    use crate::db::get_pool;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(username.trim())
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user) = user else {
        return Err(ServerFnError::new("Incorrect username or password"));
    };

    let valid =
        auth::verify_password(&password, &user.password_hash).map_err(ServerFnError::new)?;
    if !valid {
        return Err(ServerFnError::new("Incorrect username or password"));
    }

    let token = auth::start_session(&session, user.id).await?;
    Ok(bearer(token, &user))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn login(username: String, password: String) -> Result<AuthResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign in as the shared demo account, creating it on first use.
#[cfg(feature = "server")]
#[post("/api/auth/demo", session: tower_sessions::Session)]
pub async fn demo_login() -> Result<AuthResponse, ServerFnError> {
    use crate::db::get_pool;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let password_hash = auth::hash_password(DEMO_PASSWORD).map_err(ServerFnError::new)?;

    let user: models::User = sqlx::query_as(
        "INSERT INTO users (id, username, email, password_hash) VALUES ($1, $2, $3, $4)
         ON CONFLICT (username) DO UPDATE SET updated_at = NOW()
         RETURNING *",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(DEMO_USERNAME)
    .bind(DEMO_EMAIL)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let token = auth::start_session(&session, user.id).await?;
    Ok(bearer(token, &user))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/demo")]
pub async fn demo_login() -> Result<AuthResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;

    let Some(user_id) = auth::current_user_id(&session).await? else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<models::User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Change the signed-in user's username and email.
#[cfg(feature = "server")]
#[put("/api/auth/update-profile", session: tower_sessions::Session)]
pub async fn update_profile(username: String, email: String) -> Result<UserInfo, ServerFnError> {
    use crate::db::get_pool;

    let user_id = auth::require_user_id(&session).await?;
    let (username, email) = clean_identity(&username, &email)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let taken: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM users WHERE (username = $1 OR email = $2) AND id <> $3",
    )
    .bind(&username)
    .bind(&email)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    if taken.is_some() {
        return Err(ServerFnError::new("Username or email already exists"));
    }

    let user: models::User = sqlx::query_as(
        "UPDATE users SET username = $1, email = $2, updated_at = NOW() WHERE id = $3 RETURNING *",
    )
    .bind(&username)
    .bind(&email)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[put("/api/auth/update-profile")]
pub async fn update_profile(username: String, email: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Replace the signed-in user's password after checking the current one.
#[cfg(feature = "server")]
#[put("/api/auth/update-password", session: tower_sessions::Session)]
pub async fn update_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user = auth::require_user(&session).await?;

    let valid = auth::verify_password(&current_password, &user.password_hash)
        .map_err(ServerFnError::new)?;
    if !valid {
        return Err(ServerFnError::new("Current password is incorrect"));
    }
    auth::validate_new_password(&new_password).map_err(ServerFnError::new)?;

    let password_hash = auth::hash_password(&new_password).map_err(ServerFnError::new)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(&password_hash)
        .bind(user.id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(user = %user.username, "password changed");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[put("/api/auth/update-password")]
pub async fn update_password(
    current_password: String,
    new_password: String,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
