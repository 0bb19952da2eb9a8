//! Casebook domain model
//!
//! Case content as disclosed by the backend, per-character transcripts, save
//! snapshots, and the screen-mode state machine. No I/O lives here.

pub mod conversation;
pub mod entities;
pub mod error;
pub mod ids;
pub mod save;
pub mod screen;
pub mod telemetry;

pub use conversation::{ConversationEntry, Conversations};
pub use entities::{Case, CaseDelta, Character, Evidence, VisualScene};
pub use error::DomainError;
pub use ids::{CaseId, CharacterId, EvidenceId, NotificationId, SaveId, SceneId, SessionId};
pub use save::{GameSnapshot, SaveRecord};
pub use screen::{ScreenEvent, ScreenMode};
