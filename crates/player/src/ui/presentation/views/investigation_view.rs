//! Investigation - roster, interrogation, evidence board and theory
//!
//! Layout:
//! - header with the case summary and crime scene image
//! - left column: characters, then the interrogation panel for the
//!   selected character
//! - right column: evidence board, notes, theory and the analyse button

use dioxus::prelude::*;

use casebook_domain::{CharacterId, EvidenceId};

use crate::presentation::components::{
    CharacterCard, ConversationLog, EvidenceCard, GalleryModal, SaveLoadPanel, UsageDashboard,
};
use crate::presentation::services::use_game_controller;
use crate::presentation::state::use_game_state;

#[component]
pub fn InvestigationView() -> Element {
    let controller = use_game_controller();
    let mut game_state = use_game_state();
    let mut show_gallery = use_signal(|| false);
    let mut show_saves = use_signal(|| false);
    let mut show_usage = use_signal(|| false);

    let select_ctrl = controller.clone();
    let on_select_character = use_callback(move |id: CharacterId| {
        select_ctrl.select_character(Some(id));
    });

    let toggle_ctrl = controller.clone();
    let on_toggle_evidence = use_callback(move |id: EvidenceId| {
        if let Err(e) = toggle_ctrl.toggle_evidence_selection(&id) {
            game_state.report(&e);
        }
    });

    let ask_ctrl = controller.clone();
    let on_ask = move |_| {
        let controller = ask_ctrl.clone();
        spawn(async move {
            if let Err(e) = controller.ask_active_character().await {
                game_state.report(&e);
            }
        });
    };

    let analyze_ctrl = controller.clone();
    let on_analyze = move |_| {
        let controller = analyze_ctrl.clone();
        spawn(async move {
            if let Err(e) = controller.analyze_selected().await {
                game_state.report(&e);
            }
        });
    };

    let draft_ctrl = controller.clone();
    let notes_ctrl = controller.clone();
    let theory_ctrl = controller.clone();
    let menu_ctrl = controller.clone();

    let session = game_state.session.read().clone();
    let busy = *game_state.busy.read();
    let polling = *game_state.polling.read();
    let Some(case) = session.case.clone() else {
        return rsx! {};
    };

    let active = session
        .active_character
        .as_ref()
        .and_then(|id| case.character(id))
        .cloned();
    let transcript = active
        .as_ref()
        .map(|c| session.conversations.transcript(&c.id).to_vec())
        .unwrap_or_default();
    let selected_count = session.selected_evidence.len();
    let can_analyze =
        !busy.analyzing && selected_count > 0 && !session.theory.trim().is_empty();
    let can_ask = !busy.questioning && !session.question_draft.trim().is_empty();
    let gallery_case = case.clone();

    rsx! {
        div {
            class: "investigation",

            header {
                class: "case-header",
                div {
                    class: "case-header__text",
                    h1 { "{case.title}" }
                    p { class: "case-header__meta", "{case.setting}" }
                    p {
                        span { class: "label", "Victim: " }
                        "{case.victim_name}"
                    }
                    p { "{case.crime_scene_description}" }
                    if let Some(difficulty) = case.difficulty.as_ref() {
                        span { class: "badge", "{difficulty}" }
                    }
                }
                div {
                    class: "case-header__image",
                    onclick: move |_| show_gallery.set(true),
                    if let Some(url) = case.crime_scene_image_url.as_ref().filter(|u| !u.trim().is_empty()) {
                        img { src: "{url}", alt: "Crime scene" }
                    } else if polling {
                        div { class: "placeholder", "Generating crime scene image…" }
                    } else {
                        div { class: "placeholder", "No crime scene image" }
                    }
                }
                div {
                    class: "case-header__actions",
                    button {
                        class: "button",
                        onclick: move |_| show_gallery.set(true),
                        "Gallery ({case.visual_scenes.len()})"
                    }
                    button {
                        class: "button",
                        onclick: move |_| show_saves.set(true),
                        "Save / Load"
                    }
                    button {
                        class: "button button--ghost",
                        onclick: move |_| show_usage.set(true),
                        "Usage"
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

            div {
                class: "investigation__columns",

                div {
                    class: "column",
                    h2 { "Characters" }
                    div {
                        class: "character-grid",
                        for character in case.characters.iter() {
                            CharacterCard {
                                key: "{character.id}",
                                character: character.clone(),
                                active: active.as_ref().is_some_and(|a| a.id == character.id),
                                exchanges: session.conversations.transcript(&character.id).len(),
                                on_select: on_select_character,
                            }
                        }
                    }

                    if let Some(character) = active.as_ref() {
                        section {
                            class: "interrogation card",
                            h3 { "Questioning {character.name}" }
                            ConversationLog {
                                character_name: character.name.clone(),
                                entries: transcript.clone(),
                            }
                            textarea {
                                class: "input",
                                rows: 3,
                                placeholder: "Ask {character.name} a question…",
                                value: "{session.question_draft}",
                                oninput: move |evt| draft_ctrl.set_question_draft(evt.value()),
                            }
                            button {
                                class: "button button--primary",
                                disabled: !can_ask,
                                onclick: on_ask,
                                if busy.questioning { "Waiting for an answer…" } else { "Ask" }
                            }
                        }
                    } else {
                        p { class: "muted", "Select a character to question them." }
                    }
                }

                div {
                    class: "column",
                    h2 { "Evidence ({selected_count} selected)" }
                    div {
                        class: "evidence-list",
                        for evidence in case.evidence.iter() {
                            EvidenceCard {
                                key: "{evidence.id}",
                                evidence: evidence.clone(),
                                selected: session.selected_evidence.contains(&evidence.id),
                                on_toggle: on_toggle_evidence,
                            }
                        }
                    }

                    section {
                        class: "card",
                        h3 { "Notes" }
                        textarea {
                            class: "input",
                            rows: 4,
                            placeholder: "Anything worth remembering…",
                            value: "{session.notes}",
                            oninput: move |evt| notes_ctrl.set_notes(evt.value()),
                        }
                    }

                    section {
                        class: "card",
                        h3 { "Your Theory" }
                        textarea {
                            class: "input",
                            rows: 4,
                            placeholder: "Who did it, how, and why?",
                            value: "{session.theory}",
                            oninput: move |evt| theory_ctrl.set_theory(evt.value()),
                        }
                        button {
                            class: "button button--primary",
                            disabled: !can_analyze,
                            onclick: on_analyze,
                            if busy.analyzing { "Analysing…" } else { "Analyse Evidence" }
                        }
                    }
                }
            }
        }

        if show_gallery() {
            GalleryModal { case: gallery_case, on_close: move |_| show_gallery.set(false) }
        }
        if show_saves() {
            SaveLoadPanel { on_close: move |_| show_saves.set(false) }
        }
        if show_usage() {
            UsageDashboard {
                session_id: session.session_id.clone(),
                on_close: move |_| show_usage.set(false),
            }
        }
    }
}
