//! Pinterest integration payloads.

use serde::{Deserialize, Serialize};

/// Redirect target registered with the Pinterest app when none is configured.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/pinterest/callback";

/// Whether Pinterest calls are simulated, and why.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinterestMode {
    pub is_mock: bool,
    /// `"MOCK"` or `"REAL"`.
    pub mode: String,
    pub message: String,
    pub app_id_configured: bool,
    pub app_secret_configured: bool,
}

/// Authorization handle returned by `GET /api/pinterest/connect`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectHandle {
    pub auth_url: String,
    pub state: String,
    pub is_mock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallbackResult {
    pub success: bool,
    pub message: String,
    pub is_mock: bool,
}

/// A Pinterest board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub pin_count: u32,
    pub privacy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardList {
    pub boards: Vec<Board>,
    pub is_mock: bool,
}

/// The linked Pinterest account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PinterestAccount {
    pub username: String,
    pub is_mock: bool,
}

/// Result of publishing a post to one or more boards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublishOutcome {
    pub success: bool,
    pub is_mock: bool,
    pub message: String,
    pub pin_ids: Vec<String>,
}

/// Per-user Pinterest app credentials. The secret is write-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinterestCredentials {
    pub app_id: String,
    pub redirect_uri: String,
    pub has_secret: bool,
}
