//! Analysis - the backend's verdict on the player's theory

use dioxus::prelude::*;

use crate::presentation::components::SaveLoadPanel;
use crate::presentation::services::use_game_controller;
use crate::presentation::state::use_game_state;

#[component]
pub fn AnalysisView() -> Element {
    let controller = use_game_controller();
    let mut game_state = use_game_state();
    let mut show_saves = use_signal(|| false);

    let continue_ctrl = controller.clone();
    let menu_ctrl = controller.clone();

    let session = game_state.session.read().clone();
    let Some(case) = session.case.as_ref() else {
        return rsx! {};
    };
    let selected: Vec<String> = case
        .evidence
        .iter()
        .filter(|e| session.selected_evidence.contains(&e.id))
        .map(|e| e.name.clone())
        .collect();

    rsx! {
        div {
            class: "analysis",
            header {
                class: "analysis__header",
                h1 { "{case.title}" }
                p { class: "muted", "Analysis of your theory" }
            }

            section {
                class: "card",
                h3 { "Your Theory" }
                p { "{session.theory}" }
                h4 { "Evidence cited" }
                ul {
                    for name in selected.iter() {
                        li { key: "{name}", "{name}" }
                    }
                }
            }

            section {
                class: "card analysis__verdict",
                h3 { "Detective's Assessment" }
                for (idx, paragraph) in session.analysis.split("\n\n").enumerate() {
                    p { key: "{idx}", "{paragraph}" }
                }
            }

            div {
                class: "analysis__actions",
                button {
                    class: "button button--primary",
                    onclick: move |_| {
                        if let Err(e) = continue_ctrl.continue_investigation() {
                            game_state.report(&e);
                        }
                    },
                    "Continue Investigation"
                }
                button {
                    class: "button",
                    onclick: move |_| show_saves.set(true),
                    "Save Game"
                }
                button {
                    class: "button button--ghost",
                    onclick: move |_| {
                        if let Err(e) = menu_ctrl.return_to_menu() {
                            game_state.report(&e);
                        }
                    },
                    "New Case"
                }
            }
        }

        if show_saves() {
            SaveLoadPanel { on_close: move |_| show_saves.set(false) }
        }
    }
}
