//! Game state management using Dioxus signals
//!
//! Mirrors the controller into signals. The root component re-syncs after
//! every revision on the controller's change feed; components only read.

use dioxus::prelude::*;

use casebook_domain::SaveRecord;

use crate::application::{Action, GameController, GameError, GameSession, Notification};

/// Which backend actions are waiting on a response
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyFlags {
    pub generating: bool,
    pub questioning: bool,
    pub analyzing: bool,
}

impl BusyFlags {
    fn of(controller: &GameController) -> Self {
        Self {
            generating: controller.is_busy(Action::GenerateCase),
            questioning: controller.is_busy(Action::QuestionCharacter),
            analyzing: controller.is_busy(Action::AnalyzeEvidence),
        }
    }
}

/// Central game state for the player window
#[derive(Clone, Copy)]
pub struct GameState {
    pub session: Signal<GameSession>,
    pub notifications: Signal<Vec<Notification>>,
    pub saves: Signal<Vec<SaveRecord>>,
    pub busy: Signal<BusyFlags>,
    /// Whether the crime scene image is still being waited on
    pub polling: Signal<bool>,
    /// Last failure shown to the player
    pub error: Signal<Option<String>>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            session: Signal::new(GameSession::default()),
            notifications: Signal::new(Vec::new()),
            saves: Signal::new(Vec::new()),
            busy: Signal::new(BusyFlags::default()),
            polling: Signal::new(false),
            error: Signal::new(None),
        }
    }

    /// Copy the controller's current state into the signals
    pub fn sync(&mut self, controller: &GameController) {
        self.session.set(controller.session());
        self.notifications.set(controller.notifications());
        self.saves.set(controller.cached_saves());
        self.busy.set(BusyFlags::of(controller));
        self.polling.set(controller.polling_case().is_some());
    }

    pub fn report(&mut self, error: &GameError) {
        if error.is_silent() {
            return;
        }
        self.error.set(Some(error.to_string()));
    }

    pub fn clear_error(&mut self) {
        self.error.set(None);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_game_state() -> GameState {
    use_context::<GameState>()
}
