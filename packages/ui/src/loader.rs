use dioxus::prelude::*;

#[component]
pub fn Loader(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "loader",
            style: "display: flex; justify-content: center; padding: 3rem; color: #787774;",
            "{label}"
        }
    }
}
