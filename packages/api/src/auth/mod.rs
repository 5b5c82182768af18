//! Local (username + password) authentication and session helpers.

mod password;
#[cfg(feature = "server")]
mod session;

pub use password::{validate_new_password, MIN_PASSWORD_LEN};
#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{
    current_user_id, require_user, require_user_id, start_session, SESSION_USER_ID_KEY,
};
