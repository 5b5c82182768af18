//! Session context for the UI.
//!
//! [`SessionProvider`] owns the [`SessionStore`] for the platform and mirrors
//! the signed-in user into a signal so components re-render when a flow signs
//! in, updates the user, or signs out. Flows write to the store; call
//! [`AppSession::sync`] afterwards.

use api::UserInfo;
use client::auth::AuthFlow;
use client::ServerBackend;
use dioxus::prelude::*;
use store::SessionStore;

/// Where the session blob lives on this platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::BrowserStorage;
/// Where the session blob lives on this platform.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

fn platform_store() -> SessionStore<PlatformStorage> {
    SessionStore::new(PlatformStorage::default())
}

#[derive(Clone, Copy, PartialEq)]
pub struct AppSession {
    store: Signal<SessionStore<PlatformStorage>>,
    user: Signal<Option<UserInfo>>,
    /// True until the cached user has been checked against the server.
    checking: Signal<bool>,
}

impl AppSession {
    /// A handle on the store, for passing to a flow.
    pub fn store(&self) -> SessionStore<PlatformStorage> {
        self.store.read().clone()
    }

    pub fn user(&self) -> Option<UserInfo> {
        (self.user)()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    pub fn pinterest_connected(&self) -> bool {
        self.user
            .read()
            .as_ref()
            .map(|u| u.pinterest_connected)
            .unwrap_or(false)
    }

    pub fn is_checking(&self) -> bool {
        (self.checking)()
    }

    /// Re-read the user from the store after a flow changed it.
    pub fn sync(&mut self) {
        let user = self.store.read().user();
        if *self.user.peek() != user {
            self.user.set(user);
        }
    }
}

pub fn use_session() -> AppSession {
    use_context::<AppSession>()
}

/// Wrap the router with this so every page can reach the session.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let store = use_signal(platform_store);
    let user = use_signal(|| store.peek().user());
    let mut checking = use_signal(|| true);

    let mut session = use_context_provider(|| AppSession {
        store,
        user,
        checking,
    });

    // The cached flag may be stale; the server has the final word.
    let _ = use_resource(move || async move {
        let store = session.store();
        if let Err(e) = AuthFlow::new(&ServerBackend, &store).reconcile().await {
            tracing::warn!("Could not refresh session: {}", e);
        }
        session.sync();
        checking.set(false);
    });

    rsx! {
        {children}
    }
}
