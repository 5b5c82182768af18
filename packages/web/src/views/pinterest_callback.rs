//! Landing page for the Pinterest OAuth redirect.

use client::pinterest::{CallbackOutcome, CallbackParams, PinterestLink};
use client::ServerBackend;
use dioxus::prelude::*;
use ui::{use_session, Loader, Notice, NoticeKind};

use super::follow;

#[component]
pub fn PinterestCallback() -> Element {
    let mut session = use_session();
    let nav = use_navigator();
    let mut outcome = use_signal(|| Option::<CallbackOutcome>::None);

    let _exchange = use_resource(move || async move {
        let params = CallbackParams::from_query(&ui::platform::query_string());
        let store = session.store();
        let result = PinterestLink::new(&ServerBackend, &store)
            .handle_callback(params)
            .await;
        session.sync();

        if let CallbackOutcome::Failed(e) = &result {
            tracing::warn!("Pinterest callback failed: {}", e);
        }
        let transition = result.transition();
        outcome.set(Some(result));
        follow(nav, transition).await;
    });

    rsx! {
        div {
            class: "auth-box",
            style: "text-align: center;",
            {match outcome() {
                None => rsx! { Loader { label: "Connecting your Pinterest account..." } },
                Some(done) => {
                    let kind = match &done {
                        CallbackOutcome::Connected { .. } => NoticeKind::Success,
                        CallbackOutcome::Failed(_) => NoticeKind::Error,
                    };
                    rsx! {
                        Notice { kind, message: done.message() }
                        p { style: "color: #787774;", "Returning to the dashboard..." }
                    }
                }
            }}
        }
    }
}
