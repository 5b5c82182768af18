//! Create / edit page: AI caption and image generation, scheduling, and
//! publishing to Pinterest boards.

use api::models::{CAPTION_TONES, IMAGE_QUALITIES, IMAGE_SIZES, IMAGE_STYLES};
use client::editor::{CaptionPrompt, ImagePrompt, PostEditor, PostForm};
use client::pinterest::PinterestLink;
use client::{AsyncOp, ServerBackend};
use dioxus::prelude::*;
use ui::icons::FaWandMagicSparkles;
use ui::{use_session, BoardSelector, Icon, Loader, Notice, NoticeKind, OpNotice};

use super::follow;

#[component]
pub fn CreatePost() -> Element {
    rsx! {
        PostEditorPage { edit_id: None }
    }
}

#[component]
pub fn EditPost(id: String) -> Element {
    rsx! {
        PostEditorPage { edit_id: Some(id) }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum SaveKind {
    Draft,
    Schedule,
    Publish,
}

#[component]
fn PostEditorPage(#[props(!optional)] edit_id: Option<String>) -> Element {
    let session = use_session();
    let nav = use_navigator();

    let mut post_id = use_signal(|| edit_id.clone());
    let mut form = use_signal(PostForm::default);
    let mut caption_prompt = use_signal(CaptionPrompt::default);
    let mut image_prompt = use_signal(ImagePrompt::default);
    let mut caption_op = use_signal(AsyncOp::<String>::default);
    let mut image_op = use_signal(AsyncOp::<String>::default);
    let mut save_op = use_signal(AsyncOp::<String>::default);
    let mut loading = use_signal(|| edit_id.is_some());
    let mut load_error = use_signal(|| Option::<String>::None);

    let is_editing = edit_id.is_some();
    let connected = session.pinterest_connected();

    let _loader = use_resource(move || async move {
        let Some(id) = post_id.peek().clone() else {
            return;
        };
        let store = session.store();
        let mut editor = PostEditor::new(&ServerBackend, &store, Some(id));
        match editor.load().await {
            Ok(()) => form.set(editor.form),
            Err(e) => load_error.set(Some(e.to_string())),
        }
        loading.set(false);
    });

    let boards = use_resource(move || async move {
        if !session.pinterest_connected() {
            return None;
        }
        let store = session.store();
        match PinterestLink::new(&ServerBackend, &store).boards().await {
            Ok(list) => Some(list),
            Err(e) => {
                tracing::warn!("Failed to fetch boards: {}", e);
                None
            }
        }
    });

    let generate_caption = move |_| async move {
        if !caption_op.write().start() {
            return;
        }
        let store = session.store();
        let mut editor = PostEditor::new(&ServerBackend, &store, post_id());
        let result = editor.generate_caption(&caption_prompt()).await;
        if let Ok(caption) = &result {
            form.with_mut(|f| f.apply_caption(caption));
        }
        caption_op
            .write()
            .finish(result.map(|_| "Caption generated".to_string()));
    };

    let suggest_hashtags = move |_| async move {
        if !caption_op.write().start() {
            return;
        }
        let store = session.store();
        let mut editor = PostEditor::new(&ServerBackend, &store, post_id());
        let result = editor.suggest_hashtags(&caption_prompt()).await;
        if let Ok(tags) = &result {
            form.with_mut(|f| f.append_hashtags(tags));
        }
        caption_op
            .write()
            .finish(result.map(|tags| format!("Added {} hashtags", tags.len())));
    };

    let generate_image = move |_| async move {
        if !image_op.write().start() {
            return;
        }
        let store = session.store();
        let mut editor = PostEditor::new(&ServerBackend, &store, post_id());
        let result = editor.generate_image(&image_prompt()).await;
        if let Ok(image) = &result {
            form.with_mut(|f| f.apply_image(&image.image_url));
        }
        image_op.write().finish(result.map(|image| {
            image
                .note
                .unwrap_or_else(|| "Image generated".to_string())
        }));
    };

    let submit = move |kind: SaveKind| {
        spawn(async move {
            if !save_op.write().start() {
                return;
            }
            let store = session.store();
            let mut editor = PostEditor::new(&ServerBackend, &store, post_id());
            editor.form = form();
            let result = match kind {
                SaveKind::Draft => editor.save_draft().await,
                SaveKind::Schedule => editor.schedule().await,
                SaveKind::Publish => {
                    let selected = editor.form.boards.clone();
                    editor.publish_to_pinterest(&selected).await
                }
            };
            post_id.set(editor.post_id().map(str::to_string));
            match result {
                Ok(saved) => {
                    save_op.set(AsyncOp::Succeeded(saved.message));
                    follow(nav, saved.transition).await;
                }
                Err(e) => save_op.write().finish(Err(e)),
            }
        });
    };

    if loading() {
        return rsx! { Loader { label: "Loading post..." } };
    }
    if let Some(message) = load_error() {
        return rsx! { Notice { kind: NoticeKind::Error, message } };
    }

    let saving = save_op.read().is_pending();
    let image_url = form.read().image_url.clone();

    rsx! {
        h1 { if is_editing { "Edit post" } else { "Create post" } }

        section {
            class: "card",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1rem;",
            h2 {
                style: "display: flex; align-items: center; gap: 0.5rem; margin-top: 0; font-size: 1.0625rem;",
                Icon { icon: FaWandMagicSparkles, width: 14, height: 14 }
                "AI caption"
            }
            div {
                class: "field",
                label { r#for: "topic", "Topic" }
                input {
                    id: "topic",
                    r#type: "text",
                    placeholder: "Autumn porch decor",
                    value: caption_prompt.read().topic.clone(),
                    oninput: move |evt: FormEvent| caption_prompt.write().topic = evt.value(),
                }
            }
            div {
                class: "field",
                label { r#for: "tone", "Tone" }
                select {
                    id: "tone",
                    value: caption_prompt.read().tone.clone(),
                    onchange: move |evt: FormEvent| caption_prompt.write().tone = evt.value(),
                    for tone in CAPTION_TONES {
                        option { key: "{tone}", value: "{tone}", "{tone}" }
                    }
                }
            }
            div {
                class: "field",
                label { r#for: "keywords", "Keywords (comma separated)" }
                input {
                    id: "keywords",
                    r#type: "text",
                    value: caption_prompt.read().keywords.clone(),
                    oninput: move |evt: FormEvent| caption_prompt.write().keywords = evt.value(),
                }
            }
            div {
                style: "display: flex; gap: 0.5rem;",
                button {
                    class: "btn btn-primary",
                    disabled: caption_op.read().is_pending(),
                    onclick: generate_caption,
                    if caption_op.read().is_pending() { "Generating..." } else { "Generate caption" }
                }
                button {
                    class: "btn btn-outline",
                    disabled: caption_op.read().is_pending(),
                    onclick: suggest_hashtags,
                    "Suggest hashtags"
                }
            }
            OpNotice { op: caption_op() }
        }

        section {
            class: "card",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1rem;",
            h2 {
                style: "display: flex; align-items: center; gap: 0.5rem; margin-top: 0; font-size: 1.0625rem;",
                Icon { icon: FaWandMagicSparkles, width: 14, height: 14 }
                "AI image"
            }
            div {
                class: "field",
                label { r#for: "image-prompt", "Prompt" }
                textarea {
                    id: "image-prompt",
                    rows: "3",
                    value: image_prompt.read().prompt.clone(),
                    oninput: move |evt: FormEvent| image_prompt.write().prompt = evt.value(),
                }
            }
            div {
                style: "display: flex; gap: 1rem;",
                div {
                    class: "field",
                    label { r#for: "size", "Size" }
                    select {
                        id: "size",
                        value: image_prompt.read().size.clone(),
                        onchange: move |evt: FormEvent| image_prompt.write().size = evt.value(),
                        for size in IMAGE_SIZES {
                            option { key: "{size}", value: "{size}", "{size}" }
                        }
                    }
                }
                div {
                    class: "field",
                    label { r#for: "quality", "Quality" }
                    select {
                        id: "quality",
                        value: image_prompt.read().quality.clone(),
                        onchange: move |evt: FormEvent| image_prompt.write().quality = evt.value(),
                        for quality in IMAGE_QUALITIES {
                            option { key: "{quality}", value: "{quality}", "{quality}" }
                        }
                    }
                }
                div {
                    class: "field",
                    label { r#for: "style", "Style" }
                    select {
                        id: "style",
                        value: image_prompt.read().style.clone(),
                        onchange: move |evt: FormEvent| image_prompt.write().style = evt.value(),
                        for style in IMAGE_STYLES {
                            option { key: "{style}", value: "{style}", "{style}" }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                disabled: image_op.read().is_pending(),
                onclick: generate_image,
                if image_op.read().is_pending() { "Generating..." } else { "Generate image" }
            }
            OpNotice { op: image_op() }
        }

        section {
            class: "card",
            style: "padding: 1.25rem; border: 1px solid #e5e5e5; border-radius: 8px; margin-bottom: 1rem;",
            h2 { style: "margin-top: 0; font-size: 1.0625rem;", "Post" }
            div {
                class: "field",
                label { r#for: "caption", "Caption" }
                textarea {
                    id: "caption",
                    rows: "6",
                    value: form.read().caption.clone(),
                    oninput: move |evt: FormEvent| form.write().caption = evt.value(),
                }
            }
            div {
                class: "field",
                label { r#for: "image-url", "Image URL" }
                input {
                    id: "image-url",
                    r#type: "url",
                    value: image_url.clone(),
                    oninput: move |evt: FormEvent| form.write().image_url = evt.value(),
                }
            }
            if !image_url.is_empty() {
                img {
                    src: "{image_url}",
                    alt: "Post image preview",
                    style: "max-width: 100%; max-height: 320px; border-radius: 6px; margin-bottom: 1rem;",
                }
            }
            div {
                class: "field",
                label { r#for: "scheduled-time", "Schedule for" }
                input {
                    id: "scheduled-time",
                    r#type: "datetime-local",
                    value: form.read().scheduled_time.clone(),
                    oninput: move |evt: FormEvent| form.write().scheduled_time = evt.value(),
                }
            }

            h3 { style: "font-size: 0.9375rem;", "Pinterest boards" }
            if !connected {
                p {
                    style: "color: #787774;",
                    "Connect Pinterest from the dashboard to choose boards."
                }
            } else {
                {match &*boards.read() {
                    None => rsx! { Loader { label: "Loading boards..." } },
                    Some(None) => rsx! {
                        Notice { kind: NoticeKind::Error, message: "Failed to fetch boards".to_string() }
                    },
                    Some(Some(list)) => rsx! {
                        BoardSelector {
                            boards: list.boards.clone(),
                            selected: form.read().boards.clone(),
                            is_mock: list.is_mock,
                            on_toggle: move |id: String| form.write().toggle_board(&id),
                        }
                    },
                }}
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 1.25rem;",
                button {
                    class: "btn btn-outline",
                    disabled: saving,
                    onclick: move |_| submit(SaveKind::Draft),
                    if is_editing { "Update post" } else { "Save draft" }
                }
                button {
                    class: "btn btn-outline",
                    disabled: saving,
                    onclick: move |_| submit(SaveKind::Schedule),
                    "Schedule"
                }
                button {
                    class: "btn btn-primary",
                    disabled: saving,
                    onclick: move |_| submit(SaveKind::Publish),
                    "Post to Pinterest"
                }
            }
            OpNotice { op: save_op() }
        }
    }
}
