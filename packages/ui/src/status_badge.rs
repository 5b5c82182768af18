use api::models::PostStatus;
use dioxus::prelude::*;

#[component]
pub fn StatusBadge(status: PostStatus) -> Element {
    let (background, color) = match status {
        PostStatus::Draft => ("#f1f1ef", "#37352f"),
        PostStatus::Scheduled => ("#fff4e5", "#8a4b00"),
        PostStatus::Published => ("#e8f5e9", "#1b5e20"),
    };
    rsx! {
        span {
            class: "status-badge",
            style: "padding: 0.125rem 0.5rem; border-radius: 999px; font-size: 0.75rem; text-transform: capitalize; background: {background}; color: {color};",
            "{status}"
        }
    }
}
