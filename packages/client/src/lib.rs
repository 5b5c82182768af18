//! # Client flows for Pinspire
//!
//! Platform-independent logic behind every page: validation, calls to the API,
//! updates to the [`store::SessionStore`], and where to navigate afterwards.
//! The Dioxus components in `ui` and `web` only render state and forward
//! events here.
//!
//! | Module | Flow |
//! |--------|------|
//! | [`auth`] | Login, signup, demo login, logout, session reconciliation |
//! | [`pinterest`] | Connect (mock or real OAuth), callback, disconnect, boards |
//! | [`editor`] | AI caption/image/hashtags, save draft, schedule, publish |
//! | [`dashboard`] | Post list, status filter, counts, delete |
//! | [`settings`] | Profile, password, Pinterest app credentials |
//!
//! All flows reach the API through the [`PinspireBackend`] trait;
//! [`ServerBackend`] is the production implementation.

pub mod auth;
pub mod backend;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod nav;
pub mod op;
pub mod pinterest;
pub mod settings;

#[cfg(test)]
mod testing;

pub use backend::{PinspireBackend, ServerBackend};
pub use error::{BackendError, FlowError};
pub use nav::{Destination, Transition};
pub use op::AsyncOp;
