//! Browser hooks the flows need: timers, confirmation prompts, full-page
//! navigation and the current query string.
//!
//! Outside the browser (server-side rendering) the hooks are inert.

use std::time::Duration;

pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Ask the user to confirm a destructive action.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("confirm outside the browser: {}", message);
        false
    }
}

/// Leave the app for an external page (the Pinterest consent screen).
pub fn open_external(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                web_sys::console::error_1(&e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!("Cannot open {} outside the browser", url);
}

/// The raw query string of the current page, without the leading `?`.
pub fn query_string() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|s| s.trim_start_matches('?').to_string())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}
