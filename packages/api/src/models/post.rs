//! # Posts
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Post`] | A post as the client sees it. Timestamps are RFC 3339 strings so the type works in WASM. |
//! | [`PostStatus`] | `draft`, `scheduled` or `published`, serialized lowercase. |
//! | [`PostInput`] | Body of `POST /api/posts`. |
//! | [`PostPatch`] | Body of `PUT /api/posts/:id`; `None` fields are left unchanged. |
//! | [`PostRow`] | (server only) the `posts` table row. |

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Lifecycle of a post.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(PostStatus::Draft),
            "scheduled" => Some(PostStatus::Scheduled),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }

    /// Status of an unpublished post: scheduled iff it carries a schedule time.
    pub fn for_schedule(scheduled_time: Option<&str>) -> Self {
        match scheduled_time {
            Some(t) if !t.trim().is_empty() => PostStatus::Scheduled,
            _ => PostStatus::Draft,
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post as returned by the posts endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub caption: String,
    pub image_url: Option<String>,
    /// `YYYY-MM-DDTHH:MM` as entered in the editor.
    pub scheduled_time: Option<String>,
    pub status: PostStatus,
    /// Pinterest board ids.
    pub boards: Vec<String>,
    pub ai_generated_caption: bool,
    pub ai_generated_image: bool,
    pub pinterest_post_id: Option<String>,
    pub created_at: String,
    pub published_at: Option<String>,
}

/// New post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostInput {
    pub caption: String,
    pub image_url: Option<String>,
    pub scheduled_time: Option<String>,
    pub boards: Vec<String>,
    pub ai_generated_caption: bool,
    pub ai_generated_image: bool,
}

/// Partial update of an existing post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PostPatch {
    pub caption: Option<String>,
    pub image_url: Option<String>,
    pub boards: Option<Vec<String>>,
    pub scheduled_time: Option<String>,
}

/// Row of the `posts` table.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caption: String,
    pub image_url: Option<String>,
    pub boards: Vec<String>,
    pub scheduled_time: Option<String>,
    pub status: String,
    pub ai_generated_caption: bool,
    pub ai_generated_image: bool,
    pub pinterest_post_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[cfg(feature = "server")]
impl PostRow {
    /// Convert to Post for client consumption.
    pub fn to_post(&self) -> Post {
        Post {
            id: self.id.to_string(),
            caption: self.caption.clone(),
            image_url: self.image_url.clone(),
            scheduled_time: self.scheduled_time.clone(),
            status: PostStatus::parse(&self.status).unwrap_or(PostStatus::Draft),
            boards: self.boards.clone(),
            ai_generated_caption: self.ai_generated_caption,
            ai_generated_image: self.ai_generated_image,
            pinterest_post_id: self.pinterest_post_id.clone(),
            created_at: self.created_at.to_rfc3339(),
            published_at: self.published_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_schedule() {
        assert_eq!(PostStatus::for_schedule(None), PostStatus::Draft);
        assert_eq!(PostStatus::for_schedule(Some("  ")), PostStatus::Draft);
        assert_eq!(
            PostStatus::for_schedule(Some("2026-10-20T09:30")),
            PostStatus::Scheduled
        );
    }

    #[test]
    fn test_status_names() {
        assert_eq!(PostStatus::Published.to_string(), "published");
        assert_eq!(PostStatus::parse("scheduled"), Some(PostStatus::Scheduled));
        assert_eq!(PostStatus::parse("archived"), None);
    }
}
