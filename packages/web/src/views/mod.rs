use client::nav::{Destination, Transition};
use dioxus::prelude::*;
use dioxus::router::Navigator;

use crate::Route;

mod layout;
pub use layout::AppLayout;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod dashboard;
pub use dashboard::Dashboard;

mod post_editor;
pub use post_editor::{CreatePost, EditPost};

mod pinterest_callback;
pub use pinterest_callback::PinterestCallback;

mod settings;
pub use settings::Settings;

/// Carry out a flow's navigation once its delay has elapsed.
pub(crate) async fn follow(nav: Navigator, transition: Transition) {
    ui::platform::sleep(transition.after).await;
    match transition.destination {
        Destination::Login => {
            nav.replace(Route::Login {});
        }
        Destination::Dashboard => {
            nav.replace(Route::Dashboard {});
        }
        Destination::External(url) => ui::platform::open_external(&url),
    }
}

pub(crate) const GLOBAL_CSS: &str = r#"
body {
    margin: 0;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    color: #37352f;
    background: #fafafa;
}
.page { max-width: 960px; margin: 0 auto; padding: 1.5rem; }
.card { background: #fff; }
.field { display: flex; flex-direction: column; gap: 0.375rem; margin-bottom: 1rem; }
.field input, .field select, .field textarea {
    padding: 0.5rem 0.75rem;
    border: 1px solid #d9d9d6;
    border-radius: 6px;
    font-size: 0.9375rem;
    font-family: inherit;
}
.btn {
    display: inline-flex;
    align-items: center;
    gap: 0.375rem;
    padding: 0.5rem 1rem;
    border-radius: 6px;
    border: 1px solid transparent;
    font-size: 0.9375rem;
    cursor: pointer;
}
.btn:disabled { opacity: 0.5; cursor: not-allowed; }
.btn-primary { background: #e60023; color: #fff; }
.btn-outline { background: #fff; color: #37352f; border-color: #d9d9d6; }
.btn-danger { background: #fff; color: #b71c1c; border-color: #f3c1bd; }
.tabs { display: flex; gap: 0.5rem; margin: 1rem 0; }
.tab { padding: 0.375rem 0.875rem; border-radius: 999px; border: 1px solid #d9d9d6; background: #fff; cursor: pointer; text-transform: capitalize; }
.tab.active { background: #37352f; color: #fff; border-color: #37352f; }
.auth-box { max-width: 360px; margin: 4rem auto; padding: 2rem; border-radius: 8px; background: #fff; border: 1px solid #e5e5e5; }
"#;
