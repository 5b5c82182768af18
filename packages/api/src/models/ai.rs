//! AI generation payloads and the option lists the editor offers.

use serde::{Deserialize, Serialize};

pub const CAPTION_TONES: &[&str] = &[
    "engaging",
    "professional",
    "casual",
    "enthusiastic",
    "informative",
];

pub const IMAGE_SIZES: &[&str] = &["1024x1024", "1792x1024", "1024x1792"];
pub const IMAGE_QUALITIES: &[&str] = &["standard", "hd"];
pub const IMAGE_STYLES: &[&str] = &["vivid", "natural"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionRequest {
    pub topic: String,
    pub tone: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedCaption {
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub style: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedImage {
    pub image_url: String,
    pub prompt: String,
    /// The provider's rewrite of the prompt, when it made one.
    pub revised_prompt: Option<String>,
    /// Set when no provider is configured and a placeholder was returned.
    pub note: Option<String>,
}
