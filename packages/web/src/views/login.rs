//! Login page: username/password form plus the demo account shortcut.

use client::auth::{AuthFlow, LoginForm};
use client::{AsyncOp, ServerBackend};
use dioxus::prelude::*;
use ui::{use_session, OpNotice};

use super::follow;
use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut session = use_session();
    let nav = use_navigator();
    let mut form = use_signal(LoginForm::default);
    let mut op = use_signal(AsyncOp::<String>::default);

    if session.is_authenticated() && !op.read().is_pending() {
        nav.replace(Route::Dashboard {});
    }

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if !op.write().start() {
            return;
        }
        let store = session.store();
        let result = AuthFlow::new(&ServerBackend, &store).login(&form()).await;
        session.sync();
        match result {
            Ok(transition) => {
                op.set(AsyncOp::Succeeded(String::new()));
                follow(nav, transition).await;
            }
            Err(e) => op.write().finish(Err(e)),
        }
    };

    let demo = move |_| async move {
        if !op.write().start() {
            return;
        }
        let store = session.store();
        let result = AuthFlow::new(&ServerBackend, &store).demo_login().await;
        session.sync();
        match result {
            Ok(transition) => {
                op.set(AsyncOp::Succeeded(String::new()));
                follow(nav, transition).await;
            }
            Err(e) => op.write().finish(Err(e)),
        }
    };

    let pending = op.read().is_pending();

    rsx! {
        div {
            class: "auth-box",
            h1 { style: "margin-top: 0; color: #e60023;", "Pinspire" }
            p { style: "color: #787774;", "Log in to plan your pins." }

            form {
                onsubmit: submit,
                div {
                    class: "field",
                    label { r#for: "username", "Username" }
                    input {
                        id: "username",
                        r#type: "text",
                        autocomplete: "username",
                        value: form.read().username.clone(),
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: form.read().password.clone(),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    style: "width: 100%; justify-content: center;",
                    disabled: pending,
                    if pending { "Logging in..." } else { "Log in" }
                }
            }

            button {
                class: "btn btn-outline",
                style: "width: 100%; justify-content: center; margin-top: 0.75rem;",
                disabled: pending,
                onclick: demo,
                "Try the demo account"
            }

            OpNotice { op: op() }

            p {
                style: "margin-bottom: 0; font-size: 0.875rem;",
                "No account yet? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}
