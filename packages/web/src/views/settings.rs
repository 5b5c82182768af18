//! Account settings: profile, password and the user's own Pinterest app.

use client::settings::{CredentialsForm, PasswordForm, ProfileForm, SettingsFlow};
use client::{AsyncOp, ServerBackend};
use dioxus::prelude::*;
use ui::{use_session, OpNotice};

#[component]
pub fn Settings() -> Element {
    let mut session = use_session();
    let mut profile = use_signal(|| {
        session
            .user()
            .map(|u| ProfileForm::from_user(&u))
            .unwrap_or_default()
    });
    let mut password = use_signal(PasswordForm::default);
    let mut credentials = use_signal(CredentialsForm::default);
    let mut profile_op = use_signal(AsyncOp::<String>::default);
    let mut password_op = use_signal(AsyncOp::<String>::default);
    let mut credentials_op = use_signal(AsyncOp::<String>::default);

    let _loader = use_resource(move || async move {
        let store = session.store();
        match SettingsFlow::new(&ServerBackend, &store).credentials().await {
            Ok(form) => credentials.set(form),
            Err(e) => tracing::warn!("Failed to load Pinterest credentials: {}", e),
        }
    });

    let save_profile = move |evt: FormEvent| async move {
        evt.prevent_default();
        if !profile_op.write().start() {
            return;
        }
        let store = session.store();
        let result = SettingsFlow::new(&ServerBackend, &store)
            .update_profile(&profile())
            .await;
        session.sync();
        profile_op.write().finish(result.map(str::to_string));
    };

    let save_password = move |evt: FormEvent| async move {
        evt.prevent_default();
        if !password_op.write().start() {
            return;
        }
        let store = session.store();
        let result = SettingsFlow::new(&ServerBackend, &store)
            .update_password(&password())
            .await;
        if result.is_ok() {
            password.set(PasswordForm::default());
        }
        password_op.write().finish(result.map(str::to_string));
    };

    let save_credentials = move |evt: FormEvent| async move {
        evt.prevent_default();
        if !credentials_op.write().start() {
            return;
        }
        let store = session.store();
        let result = SettingsFlow::new(&ServerBackend, &store)
            .save_credentials(&credentials())
            .await;
        session.sync();
        if result.is_ok() {
            credentials.write().app_secret.clear();
        }
        credentials_op.write().finish(result.map(str::to_string));
    };

    let delete_credentials = move |_| async move {
        if !credentials_op.write().start() {
            return;
        }
        let store = session.store();
        let result = SettingsFlow::new(&ServerBackend, &store)
            .delete_credentials(|| {
                ui::platform::confirm(
                    "Delete your Pinterest app credentials? Pinterest will switch back to mock mode.",
                )
            })
            .await;
        session.sync();
        if result.is_ok() {
            credentials.set(CredentialsForm::default());
        }
        credentials_op.write().finish(result.map(str::to_string));
    };

    rsx! {
        h1 { "Settings" }

        section {
            class: "card",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1rem;",
            h2 { style: "margin-top: 0; font-size: 1.0625rem;", "Profile" }
            form {
                onsubmit: save_profile,
                div {
                    class: "field",
                    label { r#for: "profile-username", "Username" }
                    input {
                        id: "profile-username",
                        r#type: "text",
                        value: profile.read().username.clone(),
                        oninput: move |evt: FormEvent| profile.write().username = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "profile-email", "Email" }
                    input {
                        id: "profile-email",
                        r#type: "email",
                        value: profile.read().email.clone(),
                        oninput: move |evt: FormEvent| profile.write().email = evt.value(),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: profile_op.read().is_pending(),
                    "Save profile"
                }
            }
            OpNotice { op: profile_op() }
        }

        section {
            class: "card",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1rem;",
            h2 { style: "margin-top: 0; font-size: 1.0625rem;", "Password" }
            form {
                onsubmit: save_password,
                div {
                    class: "field",
                    label { r#for: "current-password", "Current password" }
                    input {
                        id: "current-password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: password.read().current_password.clone(),
                        oninput: move |evt: FormEvent| password.write().current_password = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "new-password", "New password" }
                    input {
                        id: "new-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: password.read().new_password.clone(),
                        oninput: move |evt: FormEvent| password.write().new_password = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "confirm-new-password", "Confirm new password" }
                    input {
                        id: "confirm-new-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: password.read().confirm_password.clone(),
                        oninput: move |evt: FormEvent| password.write().confirm_password = evt.value(),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: password_op.read().is_pending(),
                    "Update password"
                }
            }
            OpNotice { op: password_op() }
        }

        section {
            class: "card",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1rem;",
            h2 { style: "margin-top: 0; font-size: 1.0625rem;", "Pinterest app" }
            p {
                style: "color: #787774; font-size: 0.875rem;",
                "Use your own Pinterest developer app instead of the server default. "
                "Leave empty to stay in mock mode."
            }
            form {
                onsubmit: save_credentials,
                div {
                    class: "field",
                    label { r#for: "app-id", "App ID" }
                    input {
                        id: "app-id",
                        r#type: "text",
                        value: credentials.read().app_id.clone(),
                        oninput: move |evt: FormEvent| credentials.write().app_id = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "app-secret", "App secret" }
                    input {
                        id: "app-secret",
                        r#type: "password",
                        placeholder: "Stored encrypted; enter to replace",
                        value: credentials.read().app_secret.clone(),
                        oninput: move |evt: FormEvent| credentials.write().app_secret = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "redirect-uri", "Redirect URI" }
                    input {
                        id: "redirect-uri",
                        r#type: "url",
                        value: credentials.read().redirect_uri.clone(),
                        oninput: move |evt: FormEvent| credentials.write().redirect_uri = evt.value(),
                    }
                }
                div {
                    style: "display: flex; gap: 0.5rem;",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: credentials_op.read().is_pending(),
                        "Save credentials"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        disabled: credentials_op.read().is_pending(),
                        onclick: delete_credentials,
                        "Delete credentials"
                    }
                }
            }
            OpNotice { op: credentials_op() }
        }
    }
}
