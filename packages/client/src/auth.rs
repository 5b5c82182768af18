//! # Auth flow
//!
//! Login, signup, demo login and logout, plus [`AuthFlow::reconcile`], which
//! replaces the cached user with the server's copy when the app mounts.
//!
//! Signup checks the password confirmation and length before any request is
//! sent. A successful login or signup writes the issued token and user into the
//! [`SessionStore`] and sends the user to the dashboard.

use api::auth::validate_new_password;
use api::models::{AuthResponse, UserInfo};
use store::{SessionStorage, SessionStore};

use crate::backend::PinspireBackend;
use crate::error::FlowError;
use crate::nav::{Destination, Transition};

pub const LOGIN_FALLBACK: &str = "Login failed. Please try again.";
pub const SIGNUP_FALLBACK: &str = "Signup failed. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Client-side checks, in the order the user sees them.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.password != self.confirm_password {
            return Err(FlowError::validation("Passwords do not match"));
        }
        validate_new_password(&self.password).map_err(FlowError::Validation)
    }
}

pub struct AuthFlow<'a, B, S> {
    backend: &'a B,
    session: &'a SessionStore<S>,
}

impl<'a, B: PinspireBackend, S: SessionStorage> AuthFlow<'a, B, S> {
    pub fn new(backend: &'a B, session: &'a SessionStore<S>) -> Self {
        Self { backend, session }
    }

    fn establish(&self, response: AuthResponse) -> Transition {
        tracing::info!(user = %response.user.username, "signed in");
        self.session.sign_in(response.access_token, response.user);
        Transition::now(Destination::Dashboard)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Transition, FlowError> {
        let response = self
            .backend
            .login(form.username.trim().to_string(), form.password.clone())
            .await
            .map_err(|e| FlowError::remote(e, LOGIN_FALLBACK))?;

        Ok(self.establish(response))
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<Transition, FlowError> {
        form.validate()?;

        let response = self
            .backend
            .signup(
                form.username.trim().to_string(),
                form.email.trim().to_string(),
                form.password.clone(),
            )
            .await
            .map_err(|e| FlowError::remote(e, SIGNUP_FALLBACK))?;

        Ok(self.establish(response))
    }

    pub async fn demo_login(&self) -> Result<Transition, FlowError> {
        let response = self
            .backend
            .demo_login()
            .await
            .map_err(|e| FlowError::remote(e, LOGIN_FALLBACK))?;

        Ok(self.establish(response))
    }

    /// End the session. The local session is cleared even if the server call fails.
    pub async fn logout(&self) -> Transition {
        if let Err(e) = self.backend.logout().await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.session.clear();
        Transition::now(Destination::Login)
    }

    /// Refresh the cached user from `/api/auth/me`.
    ///
    /// A server that no longer knows the session signs the client out. Network
    /// failures leave the cached user as is.
    pub async fn reconcile(&self) -> Result<Option<UserInfo>, FlowError> {
        if !self.session.is_authenticated() {
            return Ok(None);
        }

        match self.backend.current_user().await {
            Ok(Some(user)) => Ok(self.session.replace_user(user)),
            Ok(None) => {
                tracing::info!("server session expired, signing out");
                self.session.clear();
                Ok(None)
            }
            Err(e) => Err(FlowError::remote(e, "Failed to refresh session")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in_session, user, FakeBackend};
    use store::MemoryStorage;

    fn signup_form(password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            username: "maya".to_string(),
            email: "maya@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_sends_nothing() {
        let backend = FakeBackend::new();
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        let err = flow
            .signup(&signup_form("secret1", "secret2"))
            .await
            .unwrap_err();

        assert_eq!(err, FlowError::validation("Passwords do not match"));
        assert_eq!(backend.total_calls(), 0);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_short_password_sends_nothing() {
        let backend = FakeBackend::new();
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        let err = flow.signup(&signup_form("12345", "12345")).await.unwrap_err();

        assert_eq!(
            err,
            FlowError::validation("Password must be at least 6 characters")
        );
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_signup_success() {
        let backend = FakeBackend::new();
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        let transition = flow.signup(&signup_form("secret1", "secret1")).await.unwrap();

        assert_eq!(transition, Transition::now(Destination::Dashboard));
        assert_eq!(backend.args_of("signup"), vec!["maya:maya@example.com:secret1"]);
        assert_eq!(session.user().unwrap().email, "maya@example.com");
    }

    #[tokio::test]
    async fn test_login_stores_session_and_goes_to_dashboard() {
        let backend = FakeBackend::new();
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        let form = LoginForm {
            username: " maya ".to_string(),
            password: "secret1".to_string(),
        };
        let transition = flow.login(&form).await.unwrap();

        assert_eq!(transition.destination, Destination::Dashboard);
        assert_eq!(session.token().as_deref(), Some("token-1"));
        assert_eq!(session.user(), Some(user("maya")));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_server_message() {
        let backend = FakeBackend::new();
        backend.fail("login", "Incorrect username or password");
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        let err = flow.login(&LoginForm::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "Incorrect username or password");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_failure_without_message_uses_fallback() {
        let backend = FakeBackend::new();
        backend.fail("login", "");
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        let err = flow.login(&LoginForm::default()).await.unwrap_err();
        assert_eq!(err.to_string(), LOGIN_FALLBACK);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let backend = FakeBackend::new();
        backend.fail("logout", "network down");
        let session = signed_in_session("maya");
        let flow = AuthFlow::new(&backend, &session);

        let transition = flow.logout().await;

        assert_eq!(transition.destination, Destination::Login);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_reconcile_updates_stale_flag() {
        let backend = FakeBackend::new();
        let mut server_user = user("maya");
        server_user.pinterest_connected = true;
        *backend.server_user.borrow_mut() = Some(server_user);

        let session = signed_in_session("maya");
        assert!(!session.pinterest_connected());

        let flow = AuthFlow::new(&backend, &session);
        let refreshed = flow.reconcile().await.unwrap().unwrap();

        assert!(refreshed.pinterest_connected);
        assert!(session.pinterest_connected());
        assert_eq!(session.token().as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_reconcile_signs_out_unknown_session() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let flow = AuthFlow::new(&backend, &session);

        assert_eq!(flow.reconcile().await.unwrap(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_reconcile_skips_request_when_signed_out() {
        let backend = FakeBackend::new();
        let session = SessionStore::new(MemoryStorage::new());
        let flow = AuthFlow::new(&backend, &session);

        assert_eq!(flow.reconcile().await.unwrap(), None);
        assert_eq!(backend.total_calls(), 0);
    }
}
