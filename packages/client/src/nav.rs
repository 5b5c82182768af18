//! Where a flow sends the user next.

use std::time::Duration;

/// Dashboard return after a successful OAuth callback.
pub const CALLBACK_SUCCESS_DELAY: Duration = Duration::from_secs(2);
/// Dashboard return after a failed OAuth callback.
pub const CALLBACK_ERROR_DELAY: Duration = Duration::from_secs(3);
/// Dashboard return after saving or scheduling a post.
pub const SAVE_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
/// Dashboard return after publishing to Pinterest.
pub const PUBLISH_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Login,
    Dashboard,
    /// A page outside the app, e.g. the Pinterest authorization screen.
    External(String),
}

/// A navigation to perform once `after` has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub destination: Destination,
    pub after: Duration,
}

impl Transition {
    pub fn now(destination: Destination) -> Self {
        Self {
            destination,
            after: Duration::ZERO,
        }
    }

    pub fn after(destination: Destination, after: Duration) -> Self {
        Self { destination, after }
    }
}
