//! Casebook player - desktop client for the detective game backend.
//!
//! Layers, innermost first:
//! - `ports`: outbound traits (HTTP, time, randomness, storage)
//! - `state`: the `Platform` container over the platform ports
//! - `application`: typed services and the game controller
//! - `infrastructure`: reqwest, file storage and config adapters
//! - `ui`: Dioxus components and views

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod state;
pub mod ui;

pub use ui::presentation;

// Re-export commonly used entrypoints
pub use application::{GameController, GameError};
pub use ui::app;
