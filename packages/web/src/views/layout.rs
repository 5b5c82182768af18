//! Shell for the signed-in pages: navbar plus an auth guard.

use client::auth::AuthFlow;
use client::ServerBackend;
use dioxus::prelude::*;
use ui::{use_session, Loader, Navbar};

use super::follow;
use crate::Route;

#[component]
pub fn AppLayout() -> Element {
    let mut session = use_session();
    let nav = use_navigator();

    if !session.is_authenticated() {
        if !session.is_checking() {
            nav.replace(Route::Login {});
        }
        return rsx! { Loader {} };
    }

    let logout = move |_| async move {
        let store = session.store();
        let transition = AuthFlow::new(&ServerBackend, &store).logout().await;
        session.sync();
        follow(nav, transition).await;
    };

    rsx! {
        Navbar {
            on_logout: logout,
            Link { to: Route::Dashboard {}, "Dashboard" }
            Link { to: Route::CreatePost {}, "Create post" }
            Link { to: Route::Settings {}, "Settings" }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
