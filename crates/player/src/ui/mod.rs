use dioxus::prelude::*;

pub mod presentation;

use casebook_domain::ScreenMode;
use presentation::components::common::ErrorBanner;
use presentation::components::NotificationStack;
use presentation::services::use_game_controller;
use presentation::state::GameState;
use presentation::views::{AnalysisView, InvestigationView, MenuView};

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/main.rs`).
    let controller = use_game_controller();

    // Must be created inside an active Dioxus runtime.
    let game_state = use_context_provider(GameState::new);

    // Mirror every controller change into the signals
    let sync_ctrl = controller.clone();
    use_future(move || {
        let controller = sync_ctrl.clone();
        let mut game_state = game_state;
        async move {
            let mut changes = controller.subscribe();
            game_state.sync(&controller);
            while changes.changed().await.is_ok() {
                game_state.sync(&controller);
            }
        }
    });

    let dismiss_ctrl = controller.clone();
    let screen = game_state.session.read().screen;
    let notifications = game_state.notifications.read().clone();

    rsx! {
        div {
            class: "app",
            ErrorBanner {}
            {match screen {
                ScreenMode::Menu => rsx! { MenuView {} },
                ScreenMode::Playing => rsx! { InvestigationView {} },
                ScreenMode::Analysis => rsx! { AnalysisView {} },
            }}
            NotificationStack {
                notifications,
                on_dismiss: move |id| {
                    dismiss_ctrl.dismiss_notification(&id);
                },
            }
        }
    }
}
