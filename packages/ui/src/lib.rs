//! Shared Dioxus components for Pinspire: the session context, the navbar and
//! the building blocks the pages in `web` are made of.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::FaPinterest;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod platform;

mod session;
pub use session::{use_session, AppSession, PlatformStorage, SessionProvider};

mod navbar;
pub use navbar::Navbar;

mod loader;
pub use loader::Loader;

mod notice;
pub use notice::{Notice, NoticeKind, OpNotice};

mod status_badge;
pub use status_badge::StatusBadge;

mod board_selector;
pub use board_selector::BoardSelector;

mod pinterest_connect;
pub use pinterest_connect::PinterestConnect;
