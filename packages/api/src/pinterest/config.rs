//! Pinterest app configuration and mock-mode detection.

use crate::models::{PinterestMode, DEFAULT_REDIRECT_URI};

/// Prefix marking placeholder app ids that keep the service in mock mode.
pub const MOCK_PREFIX: &str = "MOCK_";

/// Pinterest app credentials, from the environment or a user's saved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PinterestConfig {
    pub app_id: String,
    pub app_secret: String,
    pub redirect_uri: String,
}

impl PinterestConfig {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let redirect_uri = redirect_uri.into();
        Self {
            app_id: app_id.into().trim().to_string(),
            app_secret: app_secret.into().trim().to_string(),
            redirect_uri: if redirect_uri.trim().is_empty() {
                DEFAULT_REDIRECT_URI.to_string()
            } else {
                redirect_uri.trim().to_string()
            },
        }
    }

    /// Read `PINTEREST_APP_ID`, `PINTEREST_APP_SECRET` and `PINTEREST_REDIRECT_URI`.
    #[cfg(feature = "server")]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::new(
            std::env::var("PINTEREST_APP_ID").unwrap_or_default(),
            std::env::var("PINTEREST_APP_SECRET").unwrap_or_default(),
            std::env::var("PINTEREST_REDIRECT_URI").unwrap_or_default(),
        )
    }

    /// Mock mode holds unless both a real app id and a secret are present.
    pub fn is_mock(&self) -> bool {
        self.app_id.is_empty() || self.app_id.starts_with(MOCK_PREFIX) || self.app_secret.is_empty()
    }

    pub fn mode_info(&self) -> PinterestMode {
        let is_mock = self.is_mock();
        PinterestMode {
            is_mock,
            mode: if is_mock { "MOCK" } else { "REAL" }.to_string(),
            message: if is_mock {
                "Using mock Pinterest API for testing. Update credentials in settings to use real Pinterest."
            } else {
                "Connected to real Pinterest API"
            }
            .to_string(),
            app_id_configured: !self.app_id.is_empty() && !self.app_id.starts_with(MOCK_PREFIX),
            app_secret_configured: !self.app_secret.is_empty()
                && !self.app_secret.starts_with(MOCK_PREFIX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_detection() {
        assert!(PinterestConfig::new("", "secret", "").is_mock());
        assert!(PinterestConfig::new("MOCK_123", "secret", "").is_mock());
        assert!(PinterestConfig::new("1234567", "", "").is_mock());
        assert!(!PinterestConfig::new("1234567", "secret", "").is_mock());
    }

    #[test]
    fn test_default_redirect() {
        let config = PinterestConfig::new("1234567", "secret", "  ");
        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    }

    #[test]
    fn test_mode_info() {
        let mock = PinterestConfig::new("MOCK_APP", "MOCK_SECRET", "").mode_info();
        assert!(mock.is_mock);
        assert_eq!(mock.mode, "MOCK");
        assert!(!mock.app_id_configured);
        assert!(!mock.app_secret_configured);

        let real = PinterestConfig::new("1234567", "secret", "").mode_info();
        assert!(!real.is_mock);
        assert_eq!(real.mode, "REAL");
        assert_eq!(real.message, "Connected to real Pinterest API");
        assert!(real.app_id_configured && real.app_secret_configured);
    }
}
