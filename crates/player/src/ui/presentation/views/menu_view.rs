//! Menu - start a new case, load a save, or open the usage monitor

use dioxus::prelude::*;

use crate::presentation::components::{SaveLoadPanel, UsageDashboard};
use crate::presentation::services::use_game_controller;
use crate::presentation::state::use_game_state;

#[component]
pub fn MenuView() -> Element {
    let controller = use_game_controller();
    let mut game_state = use_game_state();
    let mut show_saves = use_signal(|| false);
    let mut show_usage = use_signal(|| false);

    let generating = game_state.busy.read().generating;
    let save_count = game_state.saves.read().len();

    let on_generate = move |_| {
        let controller = controller.clone();
        game_state.clear_error();
        spawn(async move {
            if let Err(e) = controller.generate_new_case().await {
                game_state.report(&e);
            }
        });
    };

    rsx! {
        div {
            class: "menu",
            h1 { class: "menu__title", "Casebook" }
            p { class: "menu__tagline", "Every case is new. Every witness remembers differently." }

            div {
                class: "menu__actions",
                button {
                    class: "button button--primary button--large",
                    disabled: generating,
                    onclick: on_generate,
                    if generating { "Generating your case…" } else { "New Case" }
                }
                button {
                    class: "button button--large",
                    onclick: move |_| show_saves.set(true),
                    "Load Game ({save_count})"
                }
                button {
                    class: "button button--ghost",
                    onclick: move |_| show_usage.set(true),
                    "Usage Monitor"
                }
            }

            if generating {
                p { class: "muted", "Writing suspects, planting evidence. This can take a minute." }
            }
        }

        if show_saves() {
            SaveLoadPanel { on_close: move |_| show_saves.set(false) }
        }
        if show_usage() {
            UsageDashboard { session_id: None, on_close: move |_| show_usage.set(false) }
        }
    }
}
