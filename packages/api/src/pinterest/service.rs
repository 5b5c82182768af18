//! # Pinterest service: mock and real strategies
//!
//! [`PinterestService`] is chosen from a [`PinterestConfig`]:
//!
//! - [`MockPinterest`] fabricates tokens, five sample boards and pin ids so the
//!   whole flow can be exercised without a Pinterest app.
//! - [`RealPinterest`] builds the authorization URL and exchanges the code with
//!   `oauth2`, then calls the v5 REST API (`/boards`, `/pins`, `/user_account`)
//!   with `reqwest`.
//!
//! Calls that carry an access token go through [`AccountTokens`]: a 401 from
//! Pinterest triggers one refresh-token exchange and a retry, and the rotated
//! pair is left in place for the caller to persist.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, RefreshToken, Scope, TokenResponse, TokenUrl,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::PinterestConfig;
use crate::models::Board;

const AUTH_URL: &str = "https://www.pinterest.com/oauth/";
const TOKEN_URL: &str = "https://api.pinterest.com/v5/oauth/token";
const API_BASE: &str = "https://api.pinterest.com/v5";
const SCOPES: &str = "boards:read,boards:write,pins:read,pins:write,user_accounts:read";
/// Longest pin title Pinterest accepts.
const MAX_TITLE_CHARS: usize = 100;

const MOCK_BOARD_NAMES: [&str; 5] = [
    "My Inspiration Board",
    "Design Ideas",
    "Marketing Tips",
    "Travel Dreams",
    "Recipe Collection",
];

#[derive(Error, Debug)]
pub enum PinterestError {
    #[error("invalid Pinterest configuration: {0}")]
    Config(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Pinterest request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pinterest API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Pinterest authorization expired, reconnect your account")]
    ReconnectRequired,
}

impl PinterestError {
    /// Pinterest rejected the access token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PinterestError::Api { status: 401, .. })
    }
}

/// Tokens obtained from a successful code or refresh-token exchange.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// A connected account's tokens for the length of one request.
#[derive(Debug, Clone)]
pub struct AccountTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Set once the pair has been refreshed; at most one refresh per request.
    pub rotated: bool,
}

impl AccountTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            rotated: false,
        }
    }
}

/// Per-board result of publishing one post.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// `(board id, pin id)` for every pin created, in board order.
    pub pins: Vec<(String, String)>,
    /// `(board id, error)` for every board that refused the pin.
    pub failed: Vec<(String, String)>,
}

impl PublishReport {
    pub fn pin_ids(&self) -> Vec<String> {
        self.pins.iter().map(|(_, pin)| pin.clone()).collect()
    }

    /// The pin id recorded on the post: the first one created.
    pub fn first_pin_id(&self) -> Option<&str> {
        self.pins.first().map(|(_, pin)| pin.as_str())
    }

    pub fn any_published(&self) -> bool {
        !self.pins.is_empty()
    }

    /// "Failed to publish to boards: a (reason), b (reason)" when any board failed.
    pub fn failure_message(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        let boards = self
            .failed
            .iter()
            .map(|(board, reason)| format!("{} ({})", board, reason))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("Failed to publish to boards: {}", boards))
    }
}

/// A pin to create on one board.
#[derive(Debug, Clone)]
pub struct NewPin<'a> {
    pub board_id: &'a str,
    pub caption: &'a str,
    pub image_url: &'a str,
}

/// Pin title: the caption's first line, cut to what Pinterest accepts.
pub fn pin_title(caption: &str) -> String {
    caption
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

fn short_hex(len: usize) -> String {
    uuid::Uuid::new_v4().simple().to_string()[..len].to_string()
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Simulated Pinterest. The default instance accepts everything.
#[derive(Debug, Default)]
pub struct MockPinterest {
    /// Boards whose pins are refused with a 400.
    rejected_boards: Vec<String>,
    /// Access tokens answered with a 401.
    expired_tokens: Vec<String>,
}

impl MockPinterest {
    fn authorize(&self, access_token: &str) -> Result<(), PinterestError> {
        if self.expired_tokens.iter().any(|t| t == access_token) {
            return Err(PinterestError::Api {
                status: 401,
                body: "Authentication failed".to_string(),
            });
        }
        Ok(())
    }

    fn authorization_url(&self, state: &str) -> String {
        format!("/pinterest/mock-auth?state={}&mock=true", state)
    }

    fn exchange_code(&self) -> TokenPair {
        TokenPair {
            access_token: format!("mock_access_token_{}", short_hex(16)),
            refresh_token: Some(format!("mock_refresh_token_{}", short_hex(16))),
        }
    }

    fn boards(&self) -> Vec<Board> {
        MOCK_BOARD_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let n = i as u32 + 1;
                Board {
                    id: format!("mock_board_{}", n),
                    name: name.to_string(),
                    description: Some(format!("A sample {} board", name.to_lowercase())),
                    pin_count: 10 + n * 5,
                    privacy: Some("PUBLIC".to_string()),
                }
            })
            .collect()
    }

    fn create_pin(&self, access_token: &str, pin: &NewPin<'_>) -> Result<String, PinterestError> {
        self.authorize(access_token)?;
        if self.rejected_boards.iter().any(|b| b == pin.board_id) {
            return Err(PinterestError::Api {
                status: 400,
                body: format!("Board {} not found", pin.board_id),
            });
        }
        Ok(format!("mock_pin_{}", short_hex(12)))
    }

    fn user_account(&self, access_token: &str) -> Result<String, PinterestError> {
        self.authorize(access_token)?;
        Ok("mock_user".to_string())
    }
}

#[derive(Deserialize)]
struct BoardPage {
    #[serde(default)]
    items: Vec<Board>,
}

#[derive(Serialize)]
struct MediaSource<'a> {
    source_type: &'a str,
    url: &'a str,
}

#[derive(Serialize)]
struct CreatePin<'a> {
    board_id: &'a str,
    title: String,
    description: &'a str,
    media_source: MediaSource<'a>,
}

#[derive(Deserialize)]
struct CreatedPin {
    id: String,
}

#[derive(Deserialize)]
struct UserAccount {
    username: String,
}

pub struct RealPinterest {
    config: PinterestConfig,
    http: Client,
}

impl RealPinterest {
    pub fn new(config: PinterestConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn create_client(&self) -> Result<ConfiguredClient, PinterestError> {
        let config_err = |e: oauth2::url::ParseError| PinterestError::Config(e.to_string());

        Ok(BasicClient::new(ClientId::new(self.config.app_id.clone()))
            .set_client_secret(ClientSecret::new(self.config.app_secret.clone()))
            .set_auth_uri(AuthUrl::new(AUTH_URL.to_string()).map_err(config_err)?)
            .set_token_uri(TokenUrl::new(TOKEN_URL.to_string()).map_err(config_err)?)
            .set_redirect_uri(
                RedirectUrl::new(self.config.redirect_uri.clone()).map_err(config_err)?,
            ))
    }

    fn authorization_url(&self, state: &str) -> Result<String, PinterestError> {
        let state = state.to_string();
        let (url, _) = self
            .create_client()?
            .authorize_url(move || CsrfToken::new(state))
            .add_scope(Scope::new(SCOPES.to_string()))
            .url();
        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenPair, PinterestError> {
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let token = self
            .create_client()?
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await
            .map_err(|e| PinterestError::TokenExchange(e.to_string()))?;

        Ok(TokenPair {
            access_token: token.access_token().secret().clone(),
            refresh_token: token.refresh_token().map(|t| t.secret().clone()),
        })
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenPair, PinterestError> {
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let token = self
            .create_client()?
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&http_client)
            .await
            .map_err(|e| PinterestError::TokenExchange(e.to_string()))?;

        Ok(TokenPair {
            access_token: token.access_token().secret().clone(),
            refresh_token: token.refresh_token().map(|t| t.secret().clone()),
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PinterestError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PinterestError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn boards(&self, access_token: &str) -> Result<Vec<Board>, PinterestError> {
        let response = self
            .http
            .get(format!("{}/boards", API_BASE))
            .bearer_auth(access_token)
            .send()
            .await?;

        let page: BoardPage = Self::check(response).await?.json().await?;
        Ok(page.items)
    }

    async fn create_pin(&self, access_token: &str, pin: &NewPin<'_>) -> Result<String, PinterestError> {
        let body = CreatePin {
            board_id: pin.board_id,
            title: pin_title(pin.caption),
            description: pin.caption,
            media_source: MediaSource {
                source_type: "image_url",
                url: pin.image_url,
            },
        };

        let response = self
            .http
            .post(format!("{}/pins", API_BASE))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await?;

        let created: CreatedPin = Self::check(response).await?.json().await?;
        Ok(created.id)
    }

    async fn user_account(&self, access_token: &str) -> Result<String, PinterestError> {
        let response = self
            .http
            .get(format!("{}/user_account", API_BASE))
            .bearer_auth(access_token)
            .send()
            .await?;

        let account: UserAccount = Self::check(response).await?.json().await?;
        Ok(account.username)
    }
}

/// Pinterest operations, simulated or real depending on configuration.
pub enum PinterestService {
    Mock(MockPinterest),
    Real(RealPinterest),
}

impl PinterestService {
    pub fn new(config: PinterestConfig) -> Self {
        if config.is_mock() {
            PinterestService::Mock(MockPinterest::default())
        } else {
            PinterestService::Real(RealPinterest::new(config))
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, PinterestService::Mock(_))
    }

    /// A fresh random value for the `state` parameter.
    pub fn new_state() -> String {
        CsrfToken::new_random().secret().clone()
    }

    pub fn authorization_url(&self, state: &str) -> Result<String, PinterestError> {
        match self {
            PinterestService::Mock(mock) => Ok(mock.authorization_url(state)),
            PinterestService::Real(real) => real.authorization_url(state),
        }
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, PinterestError> {
        match self {
            PinterestService::Mock(mock) => Ok(mock.exchange_code()),
            PinterestService::Real(real) => real.exchange_code(code).await,
        }
    }

    pub async fn boards(&self, access_token: &str) -> Result<Vec<Board>, PinterestError> {
        match self {
            PinterestService::Mock(mock) => Ok(mock.boards()),
            PinterestService::Real(real) => real.boards(access_token).await,
        }
    }

    /// Create a pin and return its id.
    pub async fn create_pin(
        &self,
        access_token: &str,
        pin: &NewPin<'_>,
    ) -> Result<String, PinterestError> {
        match self {
            PinterestService::Mock(mock) => mock.create_pin(access_token, pin),
            PinterestService::Real(real) => real.create_pin(access_token, pin).await,
        }
    }

    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenPair, PinterestError> {
        match self {
            PinterestService::Mock(mock) => Ok(mock.exchange_code()),
            PinterestService::Real(real) => real.refresh_access_token(refresh_token).await,
        }
    }

    /// Username of the account the token belongs to.
    pub async fn user_account(&self, access_token: &str) -> Result<String, PinterestError> {
        match self {
            PinterestService::Mock(mock) => mock.user_account(access_token),
            PinterestService::Real(real) => real.user_account(access_token).await,
        }
    }

    /// Swap in a fresh pair. Pinterest may omit the refresh token, in which
    /// case the old one stays valid.
    async fn renew(&self, tokens: &mut AccountTokens) -> Result<(), PinterestError> {
        if tokens.rotated {
            return Err(PinterestError::ReconnectRequired);
        }
        let Some(refresh_token) = tokens.refresh_token.as_deref() else {
            return Err(PinterestError::ReconnectRequired);
        };
        let fresh = self.refresh_access_token(refresh_token).await?;
        tokens.access_token = fresh.access_token;
        if fresh.refresh_token.is_some() {
            tokens.refresh_token = fresh.refresh_token;
        }
        tokens.rotated = true;
        tracing::info!("Pinterest access token refreshed");
        Ok(())
    }

    pub async fn list_boards(&self, tokens: &mut AccountTokens) -> Result<Vec<Board>, PinterestError> {
        match self.boards(&tokens.access_token).await {
            Err(e) if e.is_unauthorized() => {
                self.renew(tokens).await?;
                self.boards(&tokens.access_token).await
            }
            other => other,
        }
    }

    pub async fn account_username(&self, tokens: &mut AccountTokens) -> Result<String, PinterestError> {
        match self.user_account(&tokens.access_token).await {
            Err(e) if e.is_unauthorized() => {
                self.renew(tokens).await?;
                self.user_account(&tokens.access_token).await
            }
            other => other,
        }
    }

    async fn pin_with_refresh(
        &self,
        tokens: &mut AccountTokens,
        pin: &NewPin<'_>,
    ) -> Result<String, PinterestError> {
        match self.create_pin(&tokens.access_token, pin).await {
            Err(e) if e.is_unauthorized() && !tokens.rotated => {
                self.renew(tokens).await?;
                self.create_pin(&tokens.access_token, pin).await
            }
            other => other,
        }
    }

    /// Create one pin per board. Every board is attempted; failures are
    /// collected in the report instead of stopping the run.
    pub async fn publish(
        &self,
        tokens: &mut AccountTokens,
        board_ids: &[String],
        caption: &str,
        image_url: &str,
    ) -> PublishReport {
        let mut report = PublishReport::default();
        for board_id in board_ids {
            let pin = NewPin {
                board_id,
                caption,
                image_url,
            };
            match self.pin_with_refresh(tokens, &pin).await {
                Ok(pin_id) => report.pins.push((board_id.clone(), pin_id)),
                Err(e) => {
                    tracing::warn!(error = %e, %board_id, "pin creation failed");
                    report.failed.push((board_id.clone(), e.to_string()));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_selection() {
        assert!(PinterestService::new(PinterestConfig::new("MOCK_APP", "s", "")).is_mock());
        assert!(!PinterestService::new(PinterestConfig::new("1234567", "s", "")).is_mock());
    }

    #[test]
    fn test_real_authorization_url() {
        let service = PinterestService::new(PinterestConfig::new(
            "1234567",
            "secret",
            "http://localhost:8080/pinterest/callback",
        ));
        let url = service.authorization_url("abc123").unwrap();

        assert!(url.starts_with("https://www.pinterest.com/oauth/?"));
        assert!(url.contains("client_id=1234567"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=abc123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fpinterest%2Fcallback"));
        assert!(url.contains("boards%3Aread"));
    }

    #[tokio::test]
    async fn test_mock_round_trip() {
        let service = PinterestService::new(PinterestConfig::new("", "", ""));
        assert_eq!(
            service.authorization_url("xyz").unwrap(),
            "/pinterest/mock-auth?state=xyz&mock=true"
        );

        let tokens = service.exchange_code("mock_auth_code_abc").await.unwrap();
        assert!(tokens.access_token.starts_with("mock_access_token_"));

        let boards = service.boards(&tokens.access_token).await.unwrap();
        assert_eq!(boards.len(), 5);
        assert_eq!(boards[0].id, "mock_board_1");
        assert_eq!(boards[0].pin_count, 15);
        assert_eq!(boards[4].name, "Recipe Collection");
        assert_eq!(boards[4].pin_count, 35);

        let pin = NewPin {
            board_id: "mock_board_1",
            caption: "Cozy corner",
            image_url: "https://example.com/a.png",
        };
        let pin_id = service.create_pin(&tokens.access_token, &pin).await.unwrap();
        assert!(pin_id.starts_with("mock_pin_"));
        assert_eq!(pin_id.len(), "mock_pin_".len() + 12);
    }

    fn boards(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_publish_keeps_going_after_a_failed_board() {
        let service = PinterestService::Mock(MockPinterest {
            rejected_boards: boards(&["mock_board_2"]),
            ..Default::default()
        });
        let mut tokens = AccountTokens::new("mock_access_token_a", None);

        let report = service
            .publish(
                &mut tokens,
                &boards(&["mock_board_1", "mock_board_2", "mock_board_3"]),
                "Autumn porch",
                "https://example.com/a.png",
            )
            .await;

        assert_eq!(report.pins.len(), 2);
        assert_eq!(report.pins[0].0, "mock_board_1");
        assert_eq!(report.pins[1].0, "mock_board_3");
        assert!(report.any_published());
        assert_eq!(report.first_pin_id(), Some(report.pins[0].1.as_str()));
        assert_eq!(report.pin_ids().len(), 2);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "mock_board_2");
        let message = report.failure_message().unwrap();
        assert!(message.starts_with("Failed to publish to boards: mock_board_2 ("));
        assert!(message.contains("400"));
        assert!(!message.contains("mock_board_1"));
    }

    #[tokio::test]
    async fn test_publish_with_every_board_refused() {
        let service = PinterestService::Mock(MockPinterest {
            rejected_boards: boards(&["mock_board_1"]),
            ..Default::default()
        });
        let mut tokens = AccountTokens::new("t", None);

        let report = service
            .publish(&mut tokens, &boards(&["mock_board_1"]), "x", "https://example.com/a.png")
            .await;

        assert!(!report.any_published());
        assert_eq!(report.first_pin_id(), None);
        assert!(report.failure_message().is_some());
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_once() {
        let service = PinterestService::Mock(MockPinterest {
            expired_tokens: boards(&["stale"]),
            ..Default::default()
        });
        let mut tokens = AccountTokens::new("stale", Some("refresh_1".to_string()));

        let listed = service.list_boards(&mut tokens).await.unwrap();
        assert_eq!(listed.len(), 5);
        assert!(tokens.rotated);
        assert!(tokens.access_token.starts_with("mock_access_token_"));
        assert!(tokens.refresh_token.as_deref().unwrap().starts_with("mock_refresh_token_"));

        let username = service.account_username(&mut tokens).await.unwrap();
        assert_eq!(username, "mock_user");
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token() {
        let service = PinterestService::Mock(MockPinterest {
            expired_tokens: boards(&["stale"]),
            ..Default::default()
        });
        let mut tokens = AccountTokens::new("stale", None);

        let err = service.account_username(&mut tokens).await.unwrap_err();
        assert!(matches!(err, PinterestError::ReconnectRequired));
        assert!(!tokens.rotated);

        let report = service
            .publish(&mut tokens, &boards(&["mock_board_1"]), "x", "https://example.com/a.png")
            .await;
        assert!(!report.any_published());
        assert!(report.failure_message().unwrap().contains("reconnect"));
    }

    #[tokio::test]
    async fn test_publish_refreshes_mid_run() {
        let service = PinterestService::Mock(MockPinterest {
            expired_tokens: boards(&["stale"]),
            ..Default::default()
        });
        let mut tokens = AccountTokens::new("stale", Some("refresh_1".to_string()));

        let report = service
            .publish(
                &mut tokens,
                &boards(&["mock_board_1", "mock_board_2"]),
                "x",
                "https://example.com/a.png",
            )
            .await;

        assert_eq!(report.pins.len(), 2);
        assert!(report.failed.is_empty());
        assert!(tokens.rotated);
        assert_ne!(tokens.access_token, "stale");
    }

    #[test]
    fn test_unauthorized_detection() {
        let expired = PinterestError::Api {
            status: 401,
            body: String::new(),
        };
        let missing = PinterestError::Api {
            status: 404,
            body: String::new(),
        };
        assert!(expired.is_unauthorized());
        assert!(!missing.is_unauthorized());
    }

    #[test]
    fn test_pin_title() {
        assert_eq!(pin_title("\n  Fall table ideas \n#autumn"), "Fall table ideas");
        assert_eq!(pin_title(&"x".repeat(150)).len(), 100);
        assert_eq!(pin_title(""), "");
    }
}
