//! # Pinterest link flow
//!
//! ```text
//! Disconnected ──connect──▶ Connecting ──callback ok──▶ Connected
//!                               │
//!                               └──error──▶ Error ──▶ Disconnected
//! ```
//!
//! [`PinterestLink::connect`] asks the API for a [`ConnectHandle`] and lets an
//! [`OAuthStrategy`] decide how the authorization code is obtained:
//!
//! - [`RealOAuthClient`] sends the browser to Pinterest; the code comes back
//!   later through the callback page.
//! - [`MockOAuthClient`] makes up a `mock_auth_code_*` code and completes the
//!   callback immediately.
//!
//! The callback page parses its query string with [`CallbackParams::from_query`]
//! and hands it to [`PinterestLink::handle_callback`].

use api::models::{BoardList, CallbackResult, ConnectHandle, PinterestAccount, PinterestMode};
use percent_encoding::percent_decode_str;
use rand::seq::SliceRandom;
use store::{SessionStorage, SessionStore};

use crate::backend::PinspireBackend;
use crate::error::FlowError;
use crate::nav::{Destination, Transition, CALLBACK_ERROR_DELAY, CALLBACK_SUCCESS_DELAY};

pub const MOCK_CODE_PREFIX: &str = "mock_auth_code_";
const MOCK_CODE_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

impl LinkState {
    pub fn from_flag(connected: bool) -> Self {
        if connected {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        }
    }

    /// State shown on the connection card: an in-flight connect wins, then the
    /// last failure, then the cached flag.
    pub fn resolve(connected: bool, connecting: bool, error: Option<&str>) -> Self {
        if connecting {
            return LinkState::Connecting;
        }
        match error {
            Some(message) => LinkState::Error(message.to_string()),
            None => LinkState::from_flag(connected),
        }
    }
}

/// How the authorization code is going to arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Leave the app; Pinterest redirects back to the callback page.
    Redirect(String),
    /// A code is already available.
    Code { code: String, state: String },
}

pub trait OAuthStrategy {
    fn authorize(&self, handle: &ConnectHandle) -> Authorization;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealOAuthClient;

impl OAuthStrategy for RealOAuthClient {
    fn authorize(&self, handle: &ConnectHandle) -> Authorization {
        Authorization::Redirect(handle.auth_url.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockOAuthClient;

impl MockOAuthClient {
    /// `mock_auth_code_` followed by nine base-36 characters.
    pub fn surrogate_code() -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..MOCK_CODE_LEN)
            .filter_map(|_| BASE36.choose(&mut rng).map(|b| *b as char))
            .collect();
        format!("{MOCK_CODE_PREFIX}{suffix}")
    }
}

impl OAuthStrategy for MockOAuthClient {
    fn authorize(&self, handle: &ConnectHandle) -> Authorization {
        Authorization::Code {
            code: Self::surrogate_code(),
            state: handle.state.clone(),
        }
    }
}

/// The strategy matching the mode the server reported.
#[derive(Debug, Clone, Copy)]
pub enum OAuthClient {
    Real(RealOAuthClient),
    Mock(MockOAuthClient),
}

impl OAuthClient {
    pub fn for_handle(handle: &ConnectHandle) -> Self {
        if handle.is_mock {
            OAuthClient::Mock(MockOAuthClient)
        } else {
            OAuthClient::Real(RealOAuthClient)
        }
    }
}

impl OAuthStrategy for OAuthClient {
    fn authorize(&self, handle: &ConnectHandle) -> Authorization {
        match self {
            OAuthClient::Real(real) => real.authorize(handle),
            OAuthClient::Mock(mock) => mock.authorize(handle),
        }
    }
}

/// Query parameters Pinterest appends to the redirect URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Parse `?code=...&state=...` (leading `?` optional). Empty values count as missing.
    pub fn from_query(query: &str) -> Self {
        let mut params = CallbackParams::default();

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned();
            if value.is_empty() {
                continue;
            }
            match key {
                "code" => params.code = Some(value),
                "state" => params.state = Some(value),
                "error" => params.error = Some(value),
                _ => {}
            }
        }

        params
    }

    /// The code and state to exchange, or why there is nothing to exchange.
    pub fn into_exchange(self) -> Result<(String, String), FlowError> {
        if let Some(error) = self.error {
            return Err(FlowError::Callback(format!(
                "Pinterest authorization failed: {error}"
            )));
        }
        match (self.code, self.state) {
            (Some(code), Some(state)) => Ok((code, state)),
            _ => Err(FlowError::Callback("Invalid callback parameters".to_string())),
        }
    }
}

/// What the callback page shows before returning to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Connected { message: String, is_mock: bool },
    Failed(FlowError),
}

impl CallbackOutcome {
    pub fn message(&self) -> String {
        match self {
            CallbackOutcome::Connected { message, .. } => message.clone(),
            CallbackOutcome::Failed(e) => e.to_string(),
        }
    }

    pub fn transition(&self) -> Transition {
        let delay = match self {
            CallbackOutcome::Connected { .. } => CALLBACK_SUCCESS_DELAY,
            CallbackOutcome::Failed(_) => CALLBACK_ERROR_DELAY,
        };
        Transition::after(Destination::Dashboard, delay)
    }
}

/// Result of pressing "Connect".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// Navigate away to authorize.
    Redirect(Transition),
    /// Connected without leaving the app.
    Connected(CallbackResult),
}

pub struct PinterestLink<'a, B, S> {
    backend: &'a B,
    session: &'a SessionStore<S>,
}

impl<'a, B: PinspireBackend, S: SessionStorage> PinterestLink<'a, B, S> {
    pub fn new(backend: &'a B, session: &'a SessionStore<S>) -> Self {
        Self { backend, session }
    }

    pub fn state(&self) -> LinkState {
        LinkState::from_flag(self.session.pinterest_connected())
    }

    pub async fn connect(&self) -> Result<ConnectOutcome, FlowError> {
        let handle = self
            .backend
            .pinterest_connect()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to connect to Pinterest"))?;

        match OAuthClient::for_handle(&handle).authorize(&handle) {
            Authorization::Redirect(url) => Ok(ConnectOutcome::Redirect(Transition::now(
                Destination::External(url),
            ))),
            Authorization::Code { code, state } => {
                let result = self
                    .exchange(code, state, "Failed to complete connection")
                    .await?;
                Ok(ConnectOutcome::Connected(result))
            }
        }
    }

    /// Exchange a code and state for a connection.
    pub async fn callback(&self, code: String, state: String) -> Result<CallbackResult, FlowError> {
        self.exchange(code, state, "Failed to connect Pinterest").await
    }

    async fn exchange(
        &self,
        code: String,
        state: String,
        fallback: &str,
    ) -> Result<CallbackResult, FlowError> {
        let result = self
            .backend
            .pinterest_callback(code, state)
            .await
            .map_err(|e| FlowError::remote(e, fallback))?;

        if !result.success {
            let message = if result.message.is_empty() {
                fallback.to_string()
            } else {
                result.message.clone()
            };
            return Err(FlowError::Remote(message));
        }

        self.session.set_pinterest_connected(true);
        Ok(result)
    }

    /// Everything the callback page does, from raw parameters to outcome.
    pub async fn handle_callback(&self, params: CallbackParams) -> CallbackOutcome {
        let (code, state) = match params.into_exchange() {
            Ok(pair) => pair,
            Err(e) => return CallbackOutcome::Failed(e),
        };

        match self.callback(code, state).await {
            Ok(result) => CallbackOutcome::Connected {
                message: "Pinterest connected successfully!".to_string(),
                is_mock: result.is_mock,
            },
            Err(e) => CallbackOutcome::Failed(e),
        }
    }

    /// Unlink the account once `confirm` agrees.
    pub async fn disconnect(&self, confirm: impl FnOnce() -> bool) -> Result<(), FlowError> {
        if !confirm() {
            return Err(FlowError::Cancelled);
        }

        self.backend
            .pinterest_disconnect()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to disconnect"))?;

        self.session.set_pinterest_connected(false);
        Ok(())
    }

    pub async fn mode(&self) -> Result<PinterestMode, FlowError> {
        self.backend
            .pinterest_mode()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to load Pinterest mode"))
    }

    pub async fn boards(&self) -> Result<BoardList, FlowError> {
        self.backend
            .pinterest_boards()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to fetch boards"))
    }

    /// The linked account, or `None` while disconnected.
    pub async fn account(&self) -> Result<Option<PinterestAccount>, FlowError> {
        if !self.session.pinterest_connected() {
            return Ok(None);
        }
        self.backend
            .pinterest_account()
            .await
            .map(Some)
            .map_err(|e| FlowError::remote(e, "Failed to load Pinterest account"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in_session, FakeBackend};

    #[tokio::test]
    async fn test_mock_connect_completes_round_trip() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);
        assert_eq!(link.state(), LinkState::Disconnected);

        let outcome = link.connect().await.unwrap();

        assert!(matches!(outcome, ConnectOutcome::Connected(ref r) if r.is_mock));
        assert!(session.pinterest_connected());
        assert_eq!(link.state(), LinkState::Connected);

        let args = backend.args_of("pinterest_callback");
        assert_eq!(args.len(), 1);
        let (code, state) = args[0].split_once(':').unwrap();
        assert!(code.starts_with(MOCK_CODE_PREFIX));
        assert_eq!(state, "state-1");
    }

    #[tokio::test]
    async fn test_real_connect_redirects() {
        let backend = FakeBackend::new();
        backend.mock_mode.set(false);
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        let outcome = link.connect().await.unwrap();

        match outcome {
            ConnectOutcome::Redirect(t) => assert!(matches!(
                t.destination,
                Destination::External(ref url) if url.starts_with("https://www.pinterest.com/oauth/")
            )),
            other => panic!("expected redirect, got {other:?}"),
        }
        assert_eq!(backend.calls_to("pinterest_callback"), 0);
        assert!(!session.pinterest_connected());
    }

    #[tokio::test]
    async fn test_callback_missing_params_never_exchanges() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        for query in ["?state=abc", "?code=xyz", "", "?code=&state=abc"] {
            let outcome = link.handle_callback(CallbackParams::from_query(query)).await;
            assert_eq!(outcome.message(), "Invalid callback parameters");
            assert_eq!(outcome.transition().after, CALLBACK_ERROR_DELAY);
        }
        assert_eq!(backend.calls_to("pinterest_callback"), 0);
        assert!(!session.pinterest_connected());
    }

    #[tokio::test]
    async fn test_callback_error_param() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        let params = CallbackParams::from_query("?error=access%20denied&state=abc");
        let outcome = link.handle_callback(params).await;

        assert_eq!(outcome.message(), "Pinterest authorization failed: access denied");
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_callback_success_returns_after_two_seconds() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        let params = CallbackParams::from_query("code=abc&state=state-1");
        let outcome = link.handle_callback(params).await;

        assert_eq!(outcome.message(), "Pinterest connected successfully!");
        assert_eq!(
            outcome.transition(),
            Transition::after(Destination::Dashboard, CALLBACK_SUCCESS_DELAY)
        );
        assert!(session.pinterest_connected());
    }

    #[tokio::test]
    async fn test_callback_exchange_failure() {
        let backend = FakeBackend::new();
        backend.fail("pinterest_callback", "Invalid or expired OAuth state");
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        let outcome = link
            .handle_callback(CallbackParams::from_query("code=abc&state=old"))
            .await;

        assert_eq!(outcome.message(), "Invalid or expired OAuth state");
        assert_eq!(outcome.transition().after, CALLBACK_ERROR_DELAY);
        assert!(!session.pinterest_connected());
    }

    #[tokio::test]
    async fn test_disconnect_requires_confirmation() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        session.set_pinterest_connected(true);
        let link = PinterestLink::new(&backend, &session);

        assert_eq!(link.disconnect(|| false).await, Err(FlowError::Cancelled));
        assert_eq!(backend.total_calls(), 0);
        assert!(session.pinterest_connected());

        link.disconnect(|| true).await.unwrap();
        assert_eq!(backend.calls_to("pinterest_disconnect"), 1);
        assert!(!session.pinterest_connected());
    }

    #[test]
    fn test_link_state_resolution() {
        assert_eq!(LinkState::resolve(false, true, Some("boom")), LinkState::Connecting);
        assert_eq!(
            LinkState::resolve(true, false, Some("Failed to connect to Pinterest")),
            LinkState::Error("Failed to connect to Pinterest".to_string())
        );
        assert_eq!(LinkState::resolve(true, false, None), LinkState::Connected);
        assert_eq!(LinkState::resolve(false, false, None), LinkState::Disconnected);
    }

    #[tokio::test]
    async fn test_account_username_once_connected() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        assert_eq!(link.account().await.unwrap(), None);
        assert_eq!(backend.calls_to("pinterest_account"), 0);

        link.connect().await.unwrap();
        let account = link.account().await.unwrap().unwrap();
        assert_eq!(account.username, "mock_user");
        assert!(account.is_mock);

        backend.fail("pinterest_account", "Pinterest authorization expired, reconnect your account");
        let err = link.account().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Pinterest authorization expired, reconnect your account"
        );
    }

    #[tokio::test]
    async fn test_failed_connect_surfaces_as_error_state() {
        let backend = FakeBackend::new();
        backend.fail("pinterest_connect", "Pinterest is unavailable");
        let session = signed_in_session("maya");
        let link = PinterestLink::new(&backend, &session);

        let err = link.connect().await.unwrap_err();
        let state = LinkState::resolve(link.state() == LinkState::Connected, false, Some(&err.to_string()));

        assert_eq!(state, LinkState::Error("Pinterest is unavailable".to_string()));
        assert!(!session.pinterest_connected());
    }

    #[test]
    fn test_surrogate_code_shape() {
        let code = MockOAuthClient::surrogate_code();
        let suffix = code.strip_prefix(MOCK_CODE_PREFIX).unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_query_decoding() {
        let params = CallbackParams::from_query("?code=a%2Fb&state=s+1&extra=1");
        assert_eq!(params.code.as_deref(), Some("a/b"));
        assert_eq!(params.state.as_deref(), Some("s 1"));
        assert_eq!(params.error, None);
    }
}
