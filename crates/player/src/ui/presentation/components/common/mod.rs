//! Small shared widgets

mod error_banner;
mod modal_frame;

pub use error_banner::ErrorBanner;
pub use modal_frame::ModalFrame;
