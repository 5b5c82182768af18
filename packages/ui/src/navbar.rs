use dioxus::prelude::*;

use crate::icons::{FaRightFromBracket, FaThumbtack};
use crate::session::use_session;
use crate::Icon;

/// Top bar with the brand, page links passed as children, and the signed-in user.
#[component]
pub fn Navbar(on_logout: EventHandler<()>, children: Element) -> Element {
    let session = use_session();
    let name = session
        .user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        nav {
            class: "navbar",
            style: "display: flex; align-items: center; gap: 1rem; padding: 0.75rem 1.5rem; border-bottom: 1px solid #e5e5e5; background: #fff;",
            span {
                style: "display: flex; align-items: center; gap: 0.5rem; font-weight: 700; color: #e60023;",
                Icon { icon: FaThumbtack, width: 16, height: 16 }
                "Pinspire"
            }
            div {
                style: "display: flex; gap: 1rem; flex: 1;",
                {children}
            }
            if !name.is_empty() {
                span { style: "color: #555; font-size: 0.875rem;", "{name}" }
            }
            button {
                class: "btn btn-outline",
                title: "Log out",
                onclick: move |_| on_logout.call(()),
                Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            }
        }
    }
}
