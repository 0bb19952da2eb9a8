//! Save / load panel
//!
//! Lists local saves newest last. Deleting asks for confirmation inline
//! before anything is removed.

use dioxus::prelude::*;

use casebook_domain::{SaveId, SaveRecord};

use super::common::ModalFrame;
use crate::presentation::services::use_game_controller;
use crate::presentation::state::use_game_state;

#[component]
pub fn SaveLoadPanel(on_close: EventHandler<()>) -> Element {
    let controller = use_game_controller();
    let mut game_state = use_game_state();
    let mut save_name = use_signal(String::new);
    let mut pending_delete: Signal<Option<SaveId>> = use_signal(|| None);
    let mut status: Signal<Option<String>> = use_signal(|| None);

    // Pick up saves written by another window since the last read
    let refresh_ctrl = controller.clone();
    use_effect(move || {
        game_state.saves.set(refresh_ctrl.list_saves());
    });

    let save_ctrl = controller.clone();
    let on_save = move |_| {
        let name = save_name.read().clone();
        match save_ctrl.save_game(Some(&name)) {
            Ok(record) => {
                status.set(Some(format!("Saved \"{}\"", record.name)));
                save_name.set(String::new());
            }
            Err(e) => game_state.report(&e),
        }
    };

    let load_ctrl = controller.clone();
    let on_load = use_callback(move |record: SaveRecord| match load_ctrl.load_game(&record) {
        Ok(()) => on_close.call(()),
        Err(e) => game_state.report(&e),
    });

    let delete_ctrl = controller.clone();
    let on_confirm_delete = use_callback(move |id: SaveId| {
        pending_delete.set(None);
        match delete_ctrl.delete_save(&id, true) {
            Ok(_) => status.set(Some("Save deleted".to_string())),
            Err(e) => game_state.report(&e),
        }
    });

    let has_case = game_state.session.read().case.is_some();
    let saves = game_state.saves.read().clone();
    let confirming = pending_delete.read().clone();

    rsx! {
        ModalFrame {
            title: "Saved Games".to_string(),
            on_close: move |_| on_close.call(()),

            if has_case {
                div {
                    class: "save-form",
                    input {
                        class: "input",
                        placeholder: "Save name (optional)",
                        value: "{save_name}",
                        oninput: move |evt| save_name.set(evt.value()),
                    }
                    button { class: "button button--primary", onclick: on_save, "Save Game" }
                }
            }

            if let Some(message) = status.read().as_ref() {
                p { class: "status", "{message}" }
            }

            if saves.is_empty() {
                p { class: "muted", "No saved games yet." }
            }
            ul {
                class: "save-list",
                for record in saves.iter() {
                    SaveRow {
                        key: "{record.id}",
                        record: record.clone(),
                        confirming: confirming.as_ref() == Some(&record.id),
                        on_load: on_load,
                        on_request_delete: move |id| pending_delete.set(Some(id)),
                        on_confirm_delete: on_confirm_delete,
                        on_cancel_delete: move |_| pending_delete.set(None),
                    }
                }
            }
        }
    }
}

#[component]
fn SaveRow(
    record: SaveRecord,
    confirming: bool,
    on_load: EventHandler<SaveRecord>,
    on_request_delete: EventHandler<SaveId>,
    on_confirm_delete: EventHandler<SaveId>,
    on_cancel_delete: EventHandler<()>,
) -> Element {
    let for_load = record.clone();
    let request_id = record.id.clone();
    let confirm_id = record.id.clone();
    let exchanges = record.snapshot.conversations.exchange_count();

    rsx! {
        li {
            class: "save-row",
            div {
                class: "save-row__info",
                h4 { "{record.name}" }
                p { class: "save-row__meta", "{record.case_title()} · {record.timestamp}" }
                p { class: "save-row__meta", "{exchanges} exchange(s) · {record.snapshot.screen.as_str()}" }
            }
            if confirming {
                div {
                    class: "save-row__actions",
                    span { class: "warning", "Delete this save?" }
                    button {
                        class: "button button--danger",
                        onclick: move |_| on_confirm_delete.call(confirm_id.clone()),
                        "Delete"
                    }
                    button {
                        class: "button button--ghost",
                        onclick: move |_| on_cancel_delete.call(()),
                        "Cancel"
                    }
                }
            } else {
                div {
                    class: "save-row__actions",
                    button {
                        class: "button button--primary",
                        onclick: move |_| on_load.call(for_load.clone()),
                        "Load"
                    }
                    button {
                        class: "button button--ghost",
                        onclick: move |_| on_request_delete.call(request_id.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
