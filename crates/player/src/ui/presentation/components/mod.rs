//! Reusable UI components

pub mod character_card;
pub mod common;
pub mod conversation_log;
pub mod evidence_card;
pub mod gallery_modal;
pub mod notification_stack;
pub mod save_load_panel;
pub mod usage_dashboard;

pub use character_card::CharacterCard;
pub use conversation_log::ConversationLog;
pub use evidence_card::EvidenceCard;
pub use gallery_modal::GalleryModal;
pub use notification_stack::NotificationStack;
pub use save_load_panel::SaveLoadPanel;
pub use usage_dashboard::UsageDashboard;
