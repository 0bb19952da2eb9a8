//! Screen-mode state machine
//!
//! ```text
//!            CaseStarted / SaveLoaded
//!   Menu ───────────────────────────────▶ Playing ◀──────┐
//!    ▲                                     │             │ ContinueInvestigation
//!    │ NewCaseRequested                    │ AnalysisCompleted
//!    └──────────────── Playing/Analysis    ▼             │
//!                                        Analysis ───────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Which top-level screen the player is on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenMode {
    #[default]
    Menu,
    Playing,
    Analysis,
}

/// Events that drive screen transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// A freshly generated case arrived
    CaseStarted,
    /// A save record was restored
    SaveLoaded,
    /// The backend returned an evidence analysis
    AnalysisCompleted,
    /// Player left the analysis screen
    ContinueInvestigation,
    /// Player asked for a new case; unsaved progress is discarded
    NewCaseRequested,
}

impl ScreenMode {
    /// Default for snapshots that predate the screen-mode field
    pub fn playing() -> Self {
        Self::Playing
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenMode::Menu => "menu",
            ScreenMode::Playing => "playing",
            ScreenMode::Analysis => "analysis",
        }
    }

    /// Apply an event, returning the next mode.
    pub fn apply(self, event: ScreenEvent) -> Result<ScreenMode, DomainError> {
        use ScreenEvent::*;
        use ScreenMode::*;

        match (self, event) {
            (_, CaseStarted) | (_, SaveLoaded) => Ok(Playing),
            (Playing, AnalysisCompleted) => Ok(Analysis),
            (Analysis, ContinueInvestigation) => Ok(Playing),
            (_, NewCaseRequested) => Ok(Menu),
            (from, event) => Err(DomainError::invalid_transition(format!(
                "{event:?} is not allowed from {}",
                from.as_str()
            ))),
        }
    }
}
