//! Dashboard: Pinterest connection card, post counts, status tabs and the post list.

use api::models::Post;
use client::dashboard::{filter_posts, Dashboard as DashboardFlow, PostStats, StatusFilter};
use client::{AsyncOp, ServerBackend};
use dioxus::prelude::*;
use ui::icons::{FaPenToSquare, FaPlus, FaTrash};
use ui::{Icon, Loader, Notice, NoticeKind, OpNotice, PinterestConnect, StatusBadge};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let mut posts = use_signal(Vec::<Post>::new);
    let mut loading = use_signal(|| true);
    let mut load_error = use_signal(|| Option::<String>::None);
    let mut filter = use_signal(StatusFilter::default);
    let mut delete_op = use_signal(AsyncOp::<String>::default);

    let _loader = use_resource(move || async move {
        match DashboardFlow::new(&ServerBackend).list().await {
            Ok(list) => posts.set(list),
            Err(e) => {
                tracing::error!("Failed to fetch posts: {}", e);
                load_error.set(Some(e.to_string()));
            }
        }
        loading.set(false);
    });

    let delete = move |post_id: String| {
        spawn(async move {
            if !delete_op.write().start() {
                return;
            }
            let mut list = posts();
            let result = DashboardFlow::new(&ServerBackend)
                .delete(&mut list, &post_id, || {
                    ui::platform::confirm("Are you sure you want to delete this post?")
                })
                .await;
            if result.is_ok() {
                posts.set(list);
            }
            delete_op
                .write()
                .finish(result.map(|_| "Post deleted".to_string()));
        });
    };

    let stats = PostStats::of(&posts.read());
    let visible = filter_posts(&posts.read(), filter());

    rsx! {
        PinterestConnect {}

        div {
            style: "display: flex; align-items: center; justify-content: space-between;",
            h1 { style: "margin: 0;", "Your posts" }
            Link {
                to: Route::CreatePost {},
                class: "btn btn-primary",
                Icon { icon: FaPlus, width: 12, height: 12 }
                "Create post"
            }
        }

        div {
            class: "tabs",
            for tab in StatusFilter::TABS {
                button {
                    key: "{tab.label()}",
                    class: tab_class(filter() == tab),
                    onclick: move |_| filter.set(tab),
                    "{tab.label()} ({stats.count(tab)})"
                }
            }
        }

        OpNotice { op: delete_op() }

        if loading() {
            Loader { label: "Loading posts..." }
        } else if let Some(message) = load_error() {
            Notice { kind: NoticeKind::Error, message }
        } else if visible.is_empty() {
            p { style: "color: #787774;", "No posts yet. Create your first one!" }
        } else {
            div {
                style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem;",
                for post in visible {
                    article {
                        key: "{post.id}",
                        class: "card",
                        style: "border: 1px solid #e5e5e5; border-radius: 8px; overflow: hidden;",
                        if let Some(url) = post.image_url.clone() {
                            img {
                                src: "{url}",
                                alt: "",
                                style: "width: 100%; height: 160px; object-fit: cover;",
                            }
                        }
                        div {
                            style: "padding: 0.875rem;",
                            div {
                                style: "display: flex; justify-content: space-between; margin-bottom: 0.5rem;",
                                StatusBadge { status: post.status }
                                if let Some(time) = post.scheduled_time.clone() {
                                    span { style: "font-size: 0.75rem; color: #787774;", "{time}" }
                                }
                            }
                            p {
                                style: "margin: 0 0 0.75rem; white-space: pre-wrap; max-height: 6rem; overflow: hidden;",
                                "{post.caption}"
                            }
                            div {
                                style: "display: flex; gap: 0.5rem;",
                                Link {
                                    to: Route::EditPost { id: post.id.clone() },
                                    class: "btn btn-outline",
                                    Icon { icon: FaPenToSquare, width: 12, height: 12 }
                                    "Edit"
                                }
                                button {
                                    class: "btn btn-danger",
                                    disabled: delete_op.read().is_pending(),
                                    onclick: {
                                        let id = post.id.clone();
                                        move |_| delete(id.clone())
                                    },
                                    Icon { icon: FaTrash, width: 12, height: 12 }
                                    "Delete"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab active"
    } else {
        "tab"
    }
}
