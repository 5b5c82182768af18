use client::auth::{AuthFlow, SignupForm};
use client::{AsyncOp, ServerBackend};
use dioxus::prelude::*;
use ui::{use_session, OpNotice};

use super::follow;
use crate::Route;

#[component]
pub fn Signup() -> Element {
    let mut session = use_session();
    let nav = use_navigator();
    let mut form = use_signal(SignupForm::default);
    let mut op = use_signal(AsyncOp::<String>::default);

    let submit = move |evt: FormEvent| async move {
        evt.prevent_default();
        if !op.write().start() {
            return;
        }
        let store = session.store();
        let result = AuthFlow::new(&ServerBackend, &store).signup(&form()).await;
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
            h1 { style: "margin-top: 0; color: #e60023;", "Create your account" }

            form {
                onsubmit: submit,
                div {
                    class: "field",
                    label { r#for: "username", "Username" }
                    input {
                        id: "username",
                        r#type: "text",
                        value: form.read().username.clone(),
                        oninput: move |evt: FormEvent| form.write().username = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        value: form.read().email.clone(),
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form.read().password.clone(),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "confirm-password", "Confirm password" }
                    input {
                        id: "confirm-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form.read().confirm_password.clone(),
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    style: "width: 100%; justify-content: center;",
                    disabled: pending,
                    if pending { "Creating account..." } else { "Sign up" }
                }
            }

            OpNotice { op: op() }

            p {
                style: "margin-bottom: 0; font-size: 0.875rem;",
                "Already have an account? "
                Link { to: Route::Login {}, "Log in" }
            }
        }
    }
}
