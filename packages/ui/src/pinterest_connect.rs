//! Pinterest connection card shown on the dashboard.
//!
//! Displays the server's mode (mock or real) and the linked username, and
//! drives connect and disconnect through [`PinterestLink`]. A mock connection completes in place;
//! a real one leaves the app for the Pinterest consent page.

use client::nav::Destination;
use client::pinterest::{ConnectOutcome, LinkState, PinterestLink};
use client::{AsyncOp, ServerBackend};
use dioxus::prelude::*;

use crate::icons::FaPinterest;
use crate::notice::{Notice, NoticeKind};
use crate::platform;
use crate::session::use_session;
use crate::Icon;

#[component]
pub fn PinterestConnect() -> Element {
    let mut session = use_session();
    let mut op = use_signal(AsyncOp::<String>::default);
    let mut connecting = use_signal(|| false);

    let mode = use_resource(move || async move {
        let store = session.store();
        PinterestLink::new(&ServerBackend, &store).mode().await
    });

    // Re-runs when the connection flag flips.
    let account = use_resource(move || async move {
        let _ = session.pinterest_connected();
        let store = session.store();
        PinterestLink::new(&ServerBackend, &store).account().await
    });

    let state = LinkState::resolve(
        session.pinterest_connected(),
        connecting(),
        op.read().error(),
    );

    let connect = move |_| async move {
        if !op.write().start() {
            return;
        }
        connecting.set(true);
        let store = session.store();
        let result = PinterestLink::new(&ServerBackend, &store).connect().await;
        connecting.set(false);
        match result {
            Ok(ConnectOutcome::Redirect(transition)) => {
                if let Destination::External(url) = transition.destination {
                    tracing::info!("redirecting to Pinterest authorization");
                    platform::open_external(&url);
                }
                op.set(AsyncOp::Idle);
            }
            Ok(ConnectOutcome::Connected(result)) => {
                session.sync();
                op.set(AsyncOp::Succeeded(result.message));
            }
            Err(e) => op.write().finish(Err(e)),
        }
    };

    let disconnect = move |_| async move {
        if !op.write().start() {
            return;
        }
        let store = session.store();
        let result = PinterestLink::new(&ServerBackend, &store)
            .disconnect(|| platform::confirm("Disconnect your Pinterest account?"))
            .await;
        session.sync();
        op.write()
            .finish(result.map(|_| "Pinterest disconnected".to_string()));
    };

    let dismiss = move |_| op.set(AsyncOp::Idle);

    rsx! {
        section {
            class: "card pinterest-connect",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1.5rem;",
            h2 {
                style: "display: flex; align-items: center; gap: 0.5rem; margin: 0 0 0.75rem; font-size: 1.125rem;",
                Icon { icon: FaPinterest, width: 18, height: 18 }
                "Pinterest"
            }

            {match &*mode.read() {
                Some(Ok(info)) if info.is_mock => rsx! {
                    Notice { kind: NoticeKind::Info, message: info.message.clone() }
                },
                Some(Err(e)) => rsx! {
                    Notice { kind: NoticeKind::Error, message: e.to_string() }
                },
                _ => rsx! {},
            }}

            {match state {
                LinkState::Connected => rsx! {
                    {match &*account.read() {
                        Some(Ok(Some(linked))) => rsx! {
                            p { "Connected as " strong { "@{linked.username}" } }
                        },
                        Some(Err(e)) => rsx! {
                            p { "Your Pinterest account is connected." }
                            Notice { kind: NoticeKind::Error, message: e.to_string() }
                        },
                        _ => rsx! {
                            p { "Your Pinterest account is connected." }
                        },
                    }}
                    button {
                        class: "btn btn-outline",
                        disabled: op.read().is_pending(),
                        onclick: disconnect,
                        "Disconnect"
                    }
                },
                LinkState::Connecting => rsx! {
                    p { "Connecting to Pinterest..." }
                },
                LinkState::Error(message) => rsx! {
                    Notice { kind: NoticeKind::Error, message }
                    button { class: "btn btn-outline", onclick: dismiss, "Try again" }
                },
                LinkState::Disconnected => rsx! {
                    p { "Connect your account to publish posts to your boards." }
                    button {
                        class: "btn btn-primary",
                        disabled: op.read().is_pending(),
                        onclick: connect,
                        "Connect Pinterest"
                    }
                },
            }}

            if let Some(message) = op.read().value().cloned() {
                Notice { kind: NoticeKind::Success, message }
            }
        }
    }
}
