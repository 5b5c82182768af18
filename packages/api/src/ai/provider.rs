//! # OpenAI-compatible provider client
//!
//! [`AiConfig`] is read from the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `OPENAI_API_KEY` | unset | Without it captions fail and images fall back to a placeholder |
//! | `OPENAI_MODEL` | `gpt-4o` | Chat model for captions and hashtags |
//! | `OPENAI_IMAGE_MODEL` | `dall-e-3` | Image model |
//! | `OPENAI_BASE_URL` | `https://api.openai.com/v1` | For compatible gateways |
//!
//! [`AiClient`] talks to the `chat/completions` and `images/generations`
//! endpoints with `reqwest`.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::prompt::{
    caption_prompt, hashtag_prompt, parse_hashtags, CAPTION_SYSTEM_PROMPT,
    HASHTAG_SYSTEM_PROMPT, PLACEHOLDER_IMAGE_URL,
};
use crate::models::{CaptionRequest, GeneratedImage, ImageRequest};

/// Errors from the AI provider.
#[derive(Error, Debug)]
pub enum AiError {
    #[error("AI provider is not configured (set OPENAI_API_KEY)")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("AI provider returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub image_model: String,
    pub base_url: String,
}

impl AiConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            image_model: std::env::var("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|_| "dall-e-3".to_string()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
    quality: &'a str,
    style: &'a str,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

pub struct AiClient {
    config: AiConfig,
    http: Client,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(AiConfig::from_env())
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config.api_key.as_deref().ok_or(AiError::NotConfigured)
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AiError> {
        let response = self
            .http
            .post(format!("{}/{}", self.config.base_url, path))
            .bearer_auth(self.api_key()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn chat(&self, system: &str, prompt: &str) -> Result<String, AiError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response: ChatResponse = self.post_json("chat/completions", &request).await?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    pub async fn caption(&self, request: &CaptionRequest) -> Result<String, AiError> {
        self.chat(CAPTION_SYSTEM_PROMPT, &caption_prompt(request))
            .await
    }

    pub async fn hashtags(&self, topic: &str) -> Result<Vec<String>, AiError> {
        let reply = self.chat(HASHTAG_SYSTEM_PROMPT, &hashtag_prompt(topic)).await?;
        Ok(parse_hashtags(&reply))
    }

    /// Generate an image, or return a placeholder when no key is configured.
    pub async fn image(&self, request: &ImageRequest) -> Result<GeneratedImage, AiError> {
        if self.config.api_key.is_none() {
            tracing::info!("no AI key configured, returning placeholder image");
            return Ok(GeneratedImage {
                image_url: PLACEHOLDER_IMAGE_URL.to_string(),
                prompt: request.prompt.clone(),
                revised_prompt: None,
                note: Some(
                    "Image generation is not configured; a placeholder image was used"
                        .to_string(),
                ),
            });
        }

        let body = ImageGenerationRequest {
            model: &self.config.image_model,
            prompt: &request.prompt,
            n: 1,
            size: &request.size,
            quality: &request.quality,
            style: &request.style,
        };

        let response: ImageGenerationResponse =
            self.post_json("images/generations", &body).await?;
        let image = response.data.into_iter().next().ok_or(AiError::EmptyResponse)?;

        Ok(GeneratedImage {
            image_url: image.url.ok_or(AiError::EmptyResponse)?,
            prompt: request.prompt.clone(),
            revised_prompt: image.revised_prompt,
            note: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> AiClient {
        AiClient::new(AiConfig {
            api_key: None,
            model: "gpt-4o".to_string(),
            image_model: "dall-e-3".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        })
    }

    #[tokio::test]
    async fn test_placeholder_image_without_key() {
        let request = ImageRequest {
            prompt: "a sunlit reading nook".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            style: "vivid".to_string(),
        };
        let image = unconfigured().image(&request).await.unwrap();

        assert_eq!(image.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(image.prompt, "a sunlit reading nook");
        assert!(image.note.is_some());
    }

    #[tokio::test]
    async fn test_caption_requires_key() {
        let request = CaptionRequest {
            topic: "plants".to_string(),
            tone: "casual".to_string(),
            keywords: Vec::new(),
        };
        let err = unconfigured().caption(&request).await.unwrap_err();
        assert!(matches!(err, AiError::NotConfigured));
    }
}
