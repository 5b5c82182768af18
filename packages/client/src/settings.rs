//! Settings: profile, password and the user's own Pinterest app.

use api::auth::validate_new_password;
use api::models::{PinterestCredentials, UserInfo, DEFAULT_REDIRECT_URI};
use store::{SessionStorage, SessionStore};

use crate::backend::PinspireBackend;
use crate::error::FlowError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
}

impl ProfileForm {
    pub fn from_user(user: &UserInfo) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.new_password != self.confirm_password {
            return Err(FlowError::validation("New passwords do not match"));
        }
        validate_new_password(&self.new_password).map_err(FlowError::Validation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CredentialsForm {
    pub app_id: String,
    /// Write-only; never filled from the server.
    pub app_secret: String,
    pub redirect_uri: String,
}

impl Default for CredentialsForm {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
        }
    }
}

impl CredentialsForm {
    pub fn from_saved(saved: &PinterestCredentials) -> Self {
        Self {
            app_id: saved.app_id.clone(),
            app_secret: String::new(),
            redirect_uri: saved.redirect_uri.clone(),
        }
    }
}

pub struct SettingsFlow<'a, B, S> {
    backend: &'a B,
    session: &'a SessionStore<S>,
}

impl<'a, B: PinspireBackend, S: SessionStorage> SettingsFlow<'a, B, S> {
    pub fn new(backend: &'a B, session: &'a SessionStore<S>) -> Self {
        Self { backend, session }
    }

    /// Save the profile and merge the server's copy into the session.
    pub async fn update_profile(&self, form: &ProfileForm) -> Result<&'static str, FlowError> {
        let user = self
            .backend
            .update_profile(form.username.trim().to_string(), form.email.trim().to_string())
            .await
            .map_err(|e| FlowError::remote(e, "Failed to update profile"))?;

        self.session.replace_user(user);
        Ok("Profile updated successfully!")
    }

    pub async fn update_password(&self, form: &PasswordForm) -> Result<&'static str, FlowError> {
        form.validate()?;

        self.backend
            .update_password(form.current_password.clone(), form.new_password.clone())
            .await
            .map_err(|e| FlowError::remote(e, "Failed to update password"))?;

        Ok("Password updated successfully!")
    }

    pub async fn credentials(&self) -> Result<CredentialsForm, FlowError> {
        let saved = self
            .backend
            .pinterest_credentials()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to load credentials"))?;

        Ok(saved
            .as_ref()
            .map(CredentialsForm::from_saved)
            .unwrap_or_default())
    }

    /// Save the app credentials. The existing connection is dropped server-side,
    /// so the cached flag is cleared too.
    pub async fn save_credentials(&self, form: &CredentialsForm) -> Result<&'static str, FlowError> {
        self.backend
            .save_pinterest_credentials(
                form.app_id.trim().to_string(),
                form.app_secret.trim().to_string(),
                form.redirect_uri.trim().to_string(),
            )
            .await
            .map_err(|e| FlowError::remote(e, "Failed to save credentials"))?;

        self.session.set_pinterest_connected(false);
        Ok("Pinterest credentials saved successfully! Reconnect Pinterest to use real API.")
    }

    pub async fn delete_credentials(
        &self,
        confirm: impl FnOnce() -> bool,
    ) -> Result<&'static str, FlowError> {
        if !confirm() {
            return Err(FlowError::Cancelled);
        }

        self.backend
            .delete_pinterest_credentials()
            .await
            .map_err(|e| FlowError::remote(e, "Failed to delete credentials"))?;

        self.session.set_pinterest_connected(false);
        Ok("Pinterest credentials deleted successfully!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{signed_in_session, FakeBackend};

    #[tokio::test]
    async fn test_password_checks_before_request() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let flow = SettingsFlow::new(&backend, &session);

        let mismatch = PasswordForm {
            current_password: "old-pass".to_string(),
            new_password: "new-pass1".to_string(),
            confirm_password: "new-pass2".to_string(),
        };
        assert_eq!(
            flow.update_password(&mismatch).await.unwrap_err().to_string(),
            "New passwords do not match"
        );

        let short = PasswordForm {
            current_password: "old-pass".to_string(),
            new_password: "abc".to_string(),
            confirm_password: "abc".to_string(),
        };
        assert_eq!(
            flow.update_password(&short).await.unwrap_err().to_string(),
            "Password must be at least 6 characters"
        );
        assert_eq!(backend.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_current_password_surfaces_server_message() {
        let backend = FakeBackend::new();
        backend.fail("update_password", "Current password is incorrect");
        let session = signed_in_session("maya");
        let flow = SettingsFlow::new(&backend, &session);

        let form = PasswordForm {
            current_password: "nope".to_string(),
            new_password: "new-pass".to_string(),
            confirm_password: "new-pass".to_string(),
        };
        assert_eq!(
            flow.update_password(&form).await.unwrap_err().to_string(),
            "Current password is incorrect"
        );
    }

    #[tokio::test]
    async fn test_profile_update_refreshes_session() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        let flow = SettingsFlow::new(&backend, &session);

        let form = ProfileForm {
            username: "maya_k".to_string(),
            email: "maya.k@example.com".to_string(),
        };
        flow.update_profile(&form).await.unwrap();

        let user = session.user().unwrap();
        assert_eq!(user.username, "maya_k");
        assert_eq!(user.email, "maya.k@example.com");
        assert_eq!(session.token().as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_credentials_change_resets_connection() {
        let backend = FakeBackend::new();
        let session = signed_in_session("maya");
        session.set_pinterest_connected(true);
        let flow = SettingsFlow::new(&backend, &session);

        let form = flow.credentials().await.unwrap();
        assert_eq!(form.redirect_uri, DEFAULT_REDIRECT_URI);

        let form = CredentialsForm {
            app_id: "1234567".to_string(),
            app_secret: "s3cret".to_string(),
            ..CredentialsForm::default()
        };
        flow.save_credentials(&form).await.unwrap();
        assert!(!session.pinterest_connected());

        session.set_pinterest_connected(true);
        assert_eq!(
            flow.delete_credentials(|| false).await,
            Err(FlowError::Cancelled)
        );
        assert!(session.pinterest_connected());

        flow.delete_credentials(|| true).await.unwrap();
        assert!(!session.pinterest_connected());
    }
}
