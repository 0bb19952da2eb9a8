//! Top-level screens, one per screen mode

mod analysis_view;
mod investigation_view;
mod menu_view;

pub use analysis_view::AnalysisView;
pub use investigation_view::InvestigationView;
pub use menu_view::MenuView;
