//! Signal-backed UI state

pub mod game_state;

pub use game_state::{use_game_state, BusyFlags, GameState};
