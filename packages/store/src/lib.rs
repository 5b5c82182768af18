//! Client-side session persistence for Pinspire.
//!
//! The authenticated user and the token issued at login live in a single
//! serialized [`Session`] blob. [`SessionStore`] is the only reader and writer of
//! that blob; the bytes themselves go through a [`SessionStorage`] backend chosen
//! per platform.

pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::BrowserStorage;

pub use models::{Session, UserInfo};
pub use session::{SessionStorage, SessionStore, SESSION_KEY};
