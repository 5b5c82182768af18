//! Post CRUD server functions.
//!
//! Posts are scoped to the signed-in user; a post id belonging to someone else
//! behaves exactly like a missing one ("Post not found").

use dioxus::prelude::*;

use crate::models::{Post, PostInput, PostPatch};

#[cfg(feature = "server")]
use crate::{
    auth,
    db::get_pool,
    models::{PostRow, PostStatus},
};

/// Posts returned by [`list_posts`] at most.
pub const MAX_LISTED_POSTS: i64 = 100;

#[cfg(feature = "server")]
fn parse_post_id(id: &str) -> Result<uuid::Uuid, ServerFnError> {
    uuid::Uuid::parse_str(id).map_err(|_| ServerFnError::new("Post not found"))
}

#[cfg(feature = "server")]
fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load one of the user's posts.
#[cfg(feature = "server")]
pub(crate) async fn fetch_post(
    user_id: uuid::Uuid,
    post_id: uuid::Uuid,
) -> Result<PostRow, ServerFnError> {
    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: Option<PostRow> = sqlx::query_as("SELECT * FROM posts WHERE id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    row.ok_or_else(|| ServerFnError::new("Post not found"))
}

/// The user's posts, newest first.
#[cfg(feature = "server")]
#[get("/api/posts", session: tower_sessions::Session)]
pub async fn list_posts() -> Result<Vec<Post>, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<PostRow> = sqlx::query_as(
        "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(MAX_LISTED_POSTS)
    .fetch_all(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(rows.iter().map(PostRow::to_post).collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/posts")]
pub async fn list_posts() -> Result<Vec<Post>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/posts/:id", session: tower_sessions::Session)]
pub async fn get_post(id: String) -> Result<Post, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let row = fetch_post(user_id, parse_post_id(&id)?).await?;
    Ok(row.to_post())
}

#[cfg(not(feature = "server"))]
#[get("/api/posts/:id")]
pub async fn get_post(id: String) -> Result<Post, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a post. It is `scheduled` when a schedule time is given, else `draft`.
#[cfg(feature = "server")]
#[post("/api/posts", session: tower_sessions::Session)]
pub async fn create_post(input: PostInput) -> Result<Post, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;

    let caption = input.caption.trim().to_string();
    if caption.is_empty() {
        return Err(ServerFnError::new("Caption is required"));
    }
    let scheduled_time = clean_optional(input.scheduled_time);
    let status = PostStatus::for_schedule(scheduled_time.as_deref());

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: PostRow = sqlx::query_as(
        "INSERT INTO posts (id, user_id, caption, image_url, boards, scheduled_time, status, ai_generated_caption, ai_generated_image)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(user_id)
    .bind(&caption)
    .bind(clean_optional(input.image_url))
    .bind(&input.boards)
    .bind(&scheduled_time)
    .bind(status.as_str())
    .bind(input.ai_generated_caption)
    .bind(input.ai_generated_image)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::debug!(post = %row.id, status = %status, "post created");
    Ok(row.to_post())
}

#[cfg(not(feature = "server"))]
#[post("/api/posts")]
pub async fn create_post(input: PostInput) -> Result<Post, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Apply a partial update. Unpublished posts have their status recomputed
/// from the resulting schedule time; published posts stay published.
#[cfg(feature = "server")]
#[put("/api/posts/:id", session: tower_sessions::Session)]
pub async fn update_post(id: String, patch: PostPatch) -> Result<Post, ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let current = fetch_post(user_id, parse_post_id(&id)?).await?;

    let caption = match patch.caption {
        Some(c) if c.trim().is_empty() => return Err(ServerFnError::new("Caption is required")),
        Some(c) => c.trim().to_string(),
        None => current.caption.clone(),
    };
    let image_url = match patch.image_url {
        Some(url) => clean_optional(Some(url)),
        None => current.image_url.clone(),
    };
    let boards = patch.boards.unwrap_or_else(|| current.boards.clone());
    let scheduled_time = match patch.scheduled_time {
        Some(t) => clean_optional(Some(t)),
        None => current.scheduled_time.clone(),
    };

    let status = match PostStatus::parse(&current.status) {
        Some(PostStatus::Published) => PostStatus::Published,
        _ => PostStatus::for_schedule(scheduled_time.as_deref()),
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: PostRow = sqlx::query_as(
        "UPDATE posts SET caption = $1, image_url = $2, boards = $3, scheduled_time = $4, status = $5, updated_at = NOW()
         WHERE id = $6 AND user_id = $7
         RETURNING *",
    )
    .bind(&caption)
    .bind(&image_url)
    .bind(&boards)
    .bind(&scheduled_time)
    .bind(status.as_str())
    .bind(current.id)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(row.to_post())
}

#[cfg(not(feature = "server"))]
#[put("/api/posts/:id")]
pub async fn update_post(id: String, patch: PostPatch) -> Result<Post, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[delete("/api/posts/:id", session: tower_sessions::Session)]
pub async fn delete_post(id: String) -> Result<(), ServerFnError> {
    let user_id = auth::require_user_id(&session).await?;
    let post_id = parse_post_id(&id)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Post not found"));
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[delete("/api/posts/:id")]
pub async fn delete_post(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
