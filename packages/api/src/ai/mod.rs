//! AI generation server functions (`/api/ai/*`).

use dioxus::prelude::*;

use crate::models::{CaptionRequest, GeneratedCaption, GeneratedImage, ImageRequest};

pub mod prompt;
#[cfg(feature = "server")]
mod provider;

#[cfg(feature = "server")]
pub use provider::{AiClient, AiConfig, AiError};

/// Write a Pinterest caption for a topic.
#[cfg(feature = "server")]
#[post("/api/ai/generate-caption", session: tower_sessions::Session)]
pub async fn generate_caption(request: CaptionRequest) -> Result<GeneratedCaption, ServerFnError> {
    crate::auth::require_user_id(&session).await?;

    if request.topic.trim().is_empty() {
        return Err(ServerFnError::new("Topic is required"));
    }

    let caption = AiClient::from_env()
        .caption(&request)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "caption generation failed");
            ServerFnError::new(format!("Error generating caption: {}", e))
        })?;

    Ok(GeneratedCaption { caption })
}

#[cfg(not(feature = "server"))]
#[post("/api/ai/generate-caption")]
pub async fn generate_caption(request: CaptionRequest) -> Result<GeneratedCaption, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/ai/generate-image", session: tower_sessions::Session)]
pub async fn generate_image(request: ImageRequest) -> Result<GeneratedImage, ServerFnError> {
    crate::auth::require_user_id(&session).await?;

    if request.prompt.trim().is_empty() {
        return Err(ServerFnError::new("Prompt is required"));
    }

    AiClient::from_env().image(&request).await.map_err(|e| {
        tracing::warn!(error = %e, "image generation failed");
        ServerFnError::new(format!("Error generating image: {}", e))
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/ai/generate-image")]
pub async fn generate_image(request: ImageRequest) -> Result<GeneratedImage, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Hashtags for a topic, each starting with `#`.
#[cfg(feature = "server")]
#[post("/api/ai/suggest-hashtags", session: tower_sessions::Session)]
pub async fn suggest_hashtags(topic: String) -> Result<Vec<String>, ServerFnError> {
    crate::auth::require_user_id(&session).await?;

    if topic.trim().is_empty() {
        return Err(ServerFnError::new("Topic is required"));
    }

    AiClient::from_env()
        .hashtags(&topic)
        .await
        .map_err(|e| ServerFnError::new(format!("Error suggesting hashtags: {}", e)))
}

#[cfg(not(feature = "server"))]
#[post("/api/ai/suggest-hashtags")]
pub async fn suggest_hashtags(topic: String) -> Result<Vec<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
