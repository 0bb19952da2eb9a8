//! Application layer
//!
//! Use cases over the outbound ports: the typed API, backend services, and
//! the game controller with its supporting session, save store, notification
//! queue and case refresher.

pub mod api;
pub mod controller;
pub mod dto;
pub mod error;
pub mod notifications;
pub mod refresher;
pub mod save_store;
pub mod services;
pub mod session;

pub use controller::{GameController, QuestionOutcome};
pub use error::{Action, GameError};
pub use notifications::{Notification, NotificationKind, NotificationQueue};
pub use session::{ChangeFeed, GameSession, SessionHandle};
