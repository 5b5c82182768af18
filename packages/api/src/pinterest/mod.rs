//! # Pinterest server functions (`/api/pinterest/*`)
//!
//! | Function | Route | Purpose |
//! |----------|-------|---------|
//! | [`pinterest_mode`] | `GET /api/pinterest/mode` | Mock or real, for the dashboard banner |
//! | [`pinterest_connect`] | `GET /api/pinterest/connect` | Issues a `state` (10 minute expiry) and the authorization URL |
//! | [`pinterest_callback`] | `POST /api/pinterest/callback` | Consumes the `state` once and exchanges the code for tokens |
//! | [`pinterest_disconnect`] | `POST /api/pinterest/disconnect` | Forgets the tokens |
//! | [`pinterest_account`] | `GET /api/pinterest/account` | Username of the linked account |
//! | [`pinterest_boards`] | `GET /api/pinterest/boards` | The connected account's boards |
//! | [`publish_post`] | `POST /api/pinterest/post/:id` | One pin per board, then marks the post published |
//! | [`get_pinterest_credentials`] / [`save_pinterest_credentials`] / [`delete_pinterest_credentials`] | `/api/pinterest/credentials` | Per-user Pinterest app |
//!
//! A user's saved app credentials take precedence over the `PINTEREST_*`
//! environment variables. Changing or removing them drops any existing
//! connection, since its tokens belong to the previous app.
//!
//! An access token Pinterest rejects is refreshed once per request with the
//! stored refresh token; the rotated pair is written back to the user row.

use dioxus::prelude::*;

use crate::models::{
    BoardList, CallbackResult, ConnectHandle, PinterestAccount, PinterestCredentials,
    PinterestMode, PublishOutcome,
};

pub mod config;
#[cfg(feature = "server")]
mod service;

pub use config::PinterestConfig;
#[cfg(feature = "server")]
pub use service::{
    pin_title, AccountTokens, MockPinterest, NewPin, PinterestError, PinterestService,
    PublishReport, RealPinterest, TokenPair,
};

#[cfg(feature = "server")]
use crate::{auth, crypto, db::get_pool, models::User};

#[cfg(feature = "server")]
fn server_error(e: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

/// The Pinterest app configuration in effect for `user_id`.
#[cfg(feature = "server")]
async fn config_for_user(user_id: uuid::Uuid) -> Result<PinterestConfig, ServerFnError> {
    let pool = get_pool().await.map_err(server_error)?;

    let row: Option<(String, Vec<u8>, Vec<u8>, String)> = sqlx::query_as(
        "SELECT app_id, app_secret_enc, encryption_nonce, redirect_uri FROM pinterest_credentials WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(server_error)?;

    let Some((app_id, secret_enc, nonce, redirect_uri)) = row else {
        return Ok(PinterestConfig::from_env());
    };

    let secret = crypto::decrypt_secret(&secret_enc, &nonce).map_err(ServerFnError::new)?;
    let secret = String::from_utf8(secret).map_err(server_error)?;
    Ok(PinterestConfig::new(app_id, secret, redirect_uri))
}

#[cfg(feature = "server")]
async fn service_for_user(user_id: uuid::Uuid) -> Result<PinterestService, ServerFnError> {
    Ok(PinterestService::new(config_for_user(user_id).await?))
}

/// The stored tokens, or "Pinterest not connected".
#[cfg(feature = "server")]
fn connected_tokens(user: &User) -> Result<AccountTokens, ServerFnError> {
    match (&user.pinterest_access_token, user.pinterest_connected) {
        (Some(token), true) => Ok(AccountTokens::new(
            token.clone(),
            user.pinterest_refresh_token.clone(),
        )),
        _ => Err(ServerFnError::new("Pinterest not connected")),
    }
}

/// Write a refreshed token pair back to the user row.
#[cfg(feature = "server")]
async fn save_rotated_tokens(user_id: uuid::Uuid, tokens: &AccountTokens) -> Result<(), ServerFnError> {
    if !tokens.rotated {
        return Ok(());
    }
    let pool = get_pool().await.map_err(server_error)?;

    sqlx::query(
        "UPDATE users SET pinterest_access_token = $1, pinterest_refresh_token = $2, updated_at = NOW() WHERE id = $3",
    )
    .bind(&tokens.access_token)
    .bind(&tokens.refresh_token)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(server_error)?;

    tracing::info!(%user_id, "rotated Pinterest tokens saved");
    Ok(())
}

#[cfg(feature = "server")]
async fn clear_connection(user_id: uuid::Uuid) -> Result<(), ServerFnError> {
    let pool = get_pool().await.map_err(server_error)?;

    sqlx::query(
        "UPDATE users SET pinterest_connected = FALSE, pinterest_access_token = NULL, pinterest_refresh_token = NULL, updated_at = NOW() WHERE id = $1",
    )
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(server_error)?;

    Ok(())
}

#[cfg(feature = "server")]
#[get("/api/pinterest/mode", session: tower_sessions::Session)]
pub async fn pinterest_mode() -> Result<PinterestMode, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    Ok(config_for_user(user_id).await?.mode_info())
}

#[cfg(not(feature = "server"))]
#[get("/api/pinterest/mode")]
pub async fn pinterest_mode() -> Result<PinterestMode, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Start linking a Pinterest account.
#[cfg(feature = "server")]
#[get("/api/pinterest/connect", session: tower_sessions::Session)]
pub async fn pinterest_connect() -> Result<ConnectHandle, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let service = service_for_user(user_id).await?;

    let state = PinterestService::new_state();
    let auth_url = service.authorization_url(&state).map_err(server_error)?;

    let pool = get_pool().await.map_err(server_error)?;

    sqlx::query("DELETE FROM pinterest_oauth_states WHERE expires_at <= NOW()")
        .execute(pool)
        .await
        .map_err(server_error)?;

    sqlx::query(
        r#"
        INSERT INTO pinterest_oauth_states (state, user_id, expires_at)
        VALUES ($1, $2, NOW() + INTERVAL '10 minutes')
        "#,
    )
    .bind(&state)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(server_error)?;

    Ok(ConnectHandle {
        auth_url,
        state,
        is_mock: service.is_mock(),
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/pinterest/connect")]
pub async fn pinterest_connect() -> Result<ConnectHandle, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Finish linking: validate `state` and exchange `code` for tokens.
#[cfg(feature = "server")]
#[post("/api/pinterest/callback", session: tower_sessions::Session)]
pub async fn pinterest_callback(code: String, state: String) -> Result<CallbackResult, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let pool = get_pool().await.map_err(server_error)?;

    // Retrieve and delete the state in one statement so it can be used once
    let row: Option<(uuid::Uuid,)> = sqlx::query_as(
        r#"
        DELETE FROM pinterest_oauth_states
        WHERE state = $1 AND user_id = $2 AND expires_at > NOW()
        RETURNING user_id
        "#,
    )
    .bind(&state)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(server_error)?;

    if row.is_none() {
        return Err(ServerFnError::new("Invalid or expired OAuth state"));
    }

    let service = service_for_user(user_id).await?;
    let tokens = service.exchange_code(&code).await.map_err(|e| {
        tracing::warn!(error = %e, "Pinterest code exchange failed");
        server_error(e)
    })?;

    sqlx::query(
        "UPDATE users SET pinterest_connected = TRUE, pinterest_access_token = $1, pinterest_refresh_token = $2, updated_at = NOW() WHERE id = $3",
    )
    .bind(&tokens.access_token)
    .bind(&tokens.refresh_token)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(server_error)?;

    tracing::info!(%user_id, mock = service.is_mock(), "Pinterest account connected");

    Ok(CallbackResult {
        success: true,
        message: "Pinterest account connected successfully".to_string(),
        is_mock: service.is_mock(),
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/pinterest/callback")]
pub async fn pinterest_callback(code: String, state: String) -> Result<CallbackResult, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/pinterest/disconnect", session: tower_sessions::Session)]
pub async fn pinterest_disconnect() -> Result<(), ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    clear_connection(user_id).await
}

#[cfg(not(feature = "server"))]
#[post("/api/pinterest/disconnect")]
pub async fn pinterest_disconnect() -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/pinterest/boards", session: tower_sessions::Session)]
pub async fn pinterest_boards() -> Result<BoardList, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let mut tokens = connected_tokens(&user)?;

    let service = service_for_user(user.id).await?;
    let listed = service.list_boards(&mut tokens).await;
    save_rotated_tokens(user.id, &tokens).await?;
    let boards = listed.map_err(server_error)?;

    Ok(BoardList {
        boards,
        is_mock: service.is_mock(),
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/pinterest/boards")]
pub async fn pinterest_boards() -> Result<BoardList, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/pinterest/account", session: tower_sessions::Session)]
pub async fn pinterest_account() -> Result<PinterestAccount, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let mut tokens = connected_tokens(&user)?;

    let service = service_for_user(user.id).await?;
    let username = service.account_username(&mut tokens).await;
    save_rotated_tokens(user.id, &tokens).await?;

    Ok(PinterestAccount {
        username: username.map_err(server_error)?,
        is_mock: service.is_mock(),
    })
}

#[cfg(not(feature = "server"))]
#[get("/api/pinterest/account")]
pub async fn pinterest_account() -> Result<PinterestAccount, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Pin a saved post to the given boards (the post's own boards when empty).
///
/// Every board is attempted. When at least one pin was created the post is
/// marked published with the first pin id; any refused boards are then
/// reported in the returned error.
#[cfg(feature = "server")]
#[post("/api/pinterest/post/:id", session: tower_sessions::Session)]
pub async fn publish_post(id: String, board_ids: Vec<String>) -> Result<PublishOutcome, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let post_id = uuid::Uuid::parse_str(&id).map_err(|_| ServerFnError::new("Post not found"))?;
    let post = crate::posts::fetch_post(user.id, post_id).await?;
    let mut tokens = connected_tokens(&user)?;

    let Some(image_url) = post.image_url.as_deref() else {
        return Err(ServerFnError::new("Post has no image"));
    };
    let board_ids = if board_ids.is_empty() {
        post.boards.clone()
    } else {
        board_ids
    };
    if board_ids.is_empty() {
        return Err(ServerFnError::new("Select at least one board"));
    }

    let service = service_for_user(user.id).await?;
    let report = service
        .publish(&mut tokens, &board_ids, &post.caption, image_url)
        .await;
    save_rotated_tokens(user.id, &tokens).await?;

    if report.any_published() {
        let pool = get_pool().await.map_err(server_error)?;
        sqlx::query(
            "UPDATE posts SET status = 'published', published_at = NOW(), pinterest_post_id = $1, boards = $2, updated_at = NOW() WHERE id = $3",
        )
        .bind(report.first_pin_id())
        .bind(&board_ids)
        .bind(post.id)
        .execute(pool)
        .await
        .map_err(server_error)?;
    }

    if let Some(message) = report.failure_message() {
        tracing::warn!(post_id = %post.id, published = report.pins.len(), failed = report.failed.len(), "publish incomplete");
        return Err(ServerFnError::new(message));
    }

    let pin_ids = report.pin_ids();
    Ok(PublishOutcome {
        success: true,
        is_mock: service.is_mock(),
        message: format!(
            "Post published to Pinterest successfully ({} board{})",
            pin_ids.len(),
            if pin_ids.len() == 1 { "" } else { "s" }
        ),
        pin_ids,
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/pinterest/post/:id")]
pub async fn publish_post(id: String, board_ids: Vec<String>) -> Result<PublishOutcome, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The user's saved Pinterest app, if any. Never includes the secret.
#[cfg(feature = "server")]
#[get("/api/pinterest/credentials", session: tower_sessions::Session)]
pub async fn get_pinterest_credentials() -> Result<Option<PinterestCredentials>, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let pool = get_pool().await.map_err(server_error)?;

    let row: Option<(String, String)> = sqlx::query_as(
        "SELECT app_id, redirect_uri FROM pinterest_credentials WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(server_error)?;

    Ok(row.map(|(app_id, redirect_uri)| PinterestCredentials {
        app_id,
        redirect_uri,
        has_secret: true,
    }))
}

#[cfg(not(feature = "server"))]
#[get("/api/pinterest/credentials")]
pub async fn get_pinterest_credentials() -> Result<Option<PinterestCredentials>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[put("/api/pinterest/credentials", session: tower_sessions::Session)]
pub async fn save_pinterest_credentials(
    app_id: String,
    app_secret: String,
    redirect_uri: String,
) -> Result<PinterestCredentials, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;

    let config = PinterestConfig::new(app_id, app_secret, redirect_uri);
    if config.app_id.is_empty() {
        return Err(ServerFnError::new("App ID is required"));
    }
    if config.app_secret.is_empty() {
        return Err(ServerFnError::new("App secret is required"));
    }

    let (secret_enc, nonce) =
        crypto::encrypt_secret(config.app_secret.as_bytes()).map_err(ServerFnError::new)?;

    let pool = get_pool().await.map_err(server_error)?;
    sqlx::query(
        "INSERT INTO pinterest_credentials (user_id, app_id, app_secret_enc, encryption_nonce, redirect_uri)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (user_id) DO UPDATE SET
            app_id = $2,
            app_secret_enc = $3,
            encryption_nonce = $4,
            redirect_uri = $5,
            updated_at = NOW()",
    )
    .bind(user_id)
    .bind(&config.app_id)
    .bind(&secret_enc)
    .bind(&nonce)
    .bind(&config.redirect_uri)
    .execute(pool)
    .await
    .map_err(server_error)?;

    clear_connection(user_id).await?;
    tracing::info!(%user_id, mock = config.is_mock(), "Pinterest credentials saved");

    Ok(PinterestCredentials {
        app_id: config.app_id,
        redirect_uri: config.redirect_uri,
        has_secret: true,
    })
}

#[cfg(not(feature = "server"))]
#[put("/api/pinterest/credentials")]
pub async fn save_pinterest_credentials(
    app_id: String,
    app_secret: String,
    redirect_uri: String,
) -> Result<PinterestCredentials, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[delete("/api/pinterest/credentials", session: tower_sessions::Session)]
pub async fn delete_pinterest_credentials() -> Result<(), ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let pool = get_pool().await.map_err(server_error)?;

    sqlx::query("DELETE FROM pinterest_credentials WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(server_error)?;

    clear_connection(user_id).await
}

#[cfg(not(feature = "server"))]
#[delete("/api/pinterest/credentials")]
pub async fn delete_pinterest_credentials() -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
