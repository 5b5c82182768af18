//! Checkbox list of the user's Pinterest boards.

use api::models::Board;
use dioxus::prelude::*;

#[component]
pub fn BoardSelector(
    boards: Vec<Board>,
    selected: Vec<String>,
    is_mock: bool,
    on_toggle: EventHandler<String>,
) -> Element {
    if boards.is_empty() {
        return rsx! {
            p { style: "color: #787774;", "No boards found on your Pinterest account." }
        };
    }

    rsx! {
        div {
            class: "board-selector",
            style: "display: flex; flex-direction: column; gap: 0.5rem;",
            if is_mock {
                p {
                    style: "margin: 0; font-size: 0.8125rem; color: #8a4b00;",
                    "Mock boards: publishing is simulated."
                }
            }
            for board in boards {
                label {
                    key: "{board.id}",
                    style: "display: flex; align-items: center; gap: 0.5rem; cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: selected.contains(&board.id),
                        onchange: {
                            let id = board.id.clone();
                            move |_| on_toggle.call(id.clone())
                        },
                    }
                    span { "{board.name}" }
                    span {
                        style: "color: #787774; font-size: 0.8125rem;",
                        "{board.pin_count} pins"
                    }
                }
            }
        }
    }
}
