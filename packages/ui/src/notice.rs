//! Inline success / error banners.

use client::AsyncOp;
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    fn colors(&self) -> (&'static str, &'static str) {
        match self {
            NoticeKind::Success => ("#e8f5e9", "#1b5e20"),
            NoticeKind::Error => ("#fdecea", "#b71c1c"),
            NoticeKind::Info => ("#e3f2fd", "#0d47a1"),
        }
    }
}

#[component]
pub fn Notice(kind: NoticeKind, message: String) -> Element {
    let (background, color) = kind.colors();
    rsx! {
        div {
            class: "notice",
            style: "padding: 0.75rem 1rem; border-radius: 6px; margin: 0.5rem 0; background: {background}; color: {color};",
            "{message}"
        }
    }
}

/// Show the outcome of an operation: its error, or `success` once it succeeded.
#[component]
pub fn OpNotice(op: AsyncOp<String>) -> Element {
    match op {
        AsyncOp::Failed(message) => rsx! {
            Notice { kind: NoticeKind::Error, message }
        },
        AsyncOp::Succeeded(message) if !message.is_empty() => rsx! {
            Notice { kind: NoticeKind::Success, message }
        },
        _ => rsx! {},
    }
}
