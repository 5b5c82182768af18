//! Error taxonomy shared by every flow.

use thiserror::Error;

/// A failed call to the Pinspire API, carrying the server's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// Why a user action did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The API reported an error.
    #[error("{0}")]
    Remote(String),

    /// The OAuth callback was denied or malformed.
    #[error("{0}")]
    Callback(String),

    /// The user declined a confirmation prompt.
    #[error("Cancelled")]
    Cancelled,
}

impl FlowError {
    pub fn validation(message: impl Into<String>) -> Self {
        FlowError::Validation(message.into())
    }

    /// The server's message verbatim, or `fallback` when it carried none.
    pub fn remote(err: BackendError, fallback: &str) -> Self {
        let message = err.0.trim();
        if message.is_empty() {
            FlowError::Remote(fallback.to_string())
        } else {
            FlowError::Remote(message.to_string())
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FlowError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_fallback() {
        let err = FlowError::remote(BackendError::new(""), "Login failed. Please try again.");
        assert_eq!(err.to_string(), "Login failed. Please try again.");

        let err = FlowError::remote(
            BackendError::new("Incorrect username or password"),
            "Login failed. Please try again.",
        );
        assert_eq!(err.to_string(), "Incorrect username or password");
    }
}
