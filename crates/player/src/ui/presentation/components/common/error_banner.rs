use dioxus::prelude::*;

use crate::presentation::state::use_game_state;

/// Dismissible banner showing the last failure
#[component]
pub fn ErrorBanner() -> Element {
    let mut game_state = use_game_state();
    let error = game_state.error.read().clone();

    rsx! {
        if let Some(message) = error {
            div {
                class: "error-banner",
                role: "alert",
                span { class: "error-banner__text", "{message}" }
                button {
                    class: "error-banner__close",
                    onclick: move |_| game_state.clear_error(),
                    "×"
                }
            }
        }
    }
}
