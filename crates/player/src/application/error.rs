//! Application error types
//!
//! Every controller action reports one of these. Each is terminal for the
//! attempted action only; the session is never left half-updated.

use std::fmt;

use casebook_domain::DomainError;
use thiserror::Error;

use crate::ports::outbound::{ApiError, StorageError};

/// Controller actions that talk to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GenerateCase,
    QuestionCharacter,
    AnalyzeEvidence,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::GenerateCase => "Case generation",
            Action::QuestionCharacter => "Questioning",
            Action::AnalyzeEvidence => "Evidence analysis",
        })
    }
}

/// Errors surfaced to the player
#[derive(Debug, Error)]
pub enum GameError {
    /// Transport or HTTP failure, carrying the best-effort server message
    #[error("{0}")]
    Api(ApiError),

    /// The call succeeded but the payload lacked required fields
    #[error("Unexpected response from server: {0}")]
    MalformedResponse(String),

    /// A local precondition was not met; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// Local save storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No active case")]
    NoActiveCase,

    /// The same action is already in flight
    #[error("{0} is already in progress")]
    Busy(Action),

    /// The investigation changed while the request was in flight; the result was dropped
    #[error("The investigation changed before the response arrived")]
    Superseded,

    #[error("{0}")]
    InvalidTransition(String),
}

impl GameError {
    pub fn validation(msg: impl Into<String>) -> Self {
        GameError::Validation(msg.into())
    }

    /// Errors the UI should not bother the player with
    pub fn is_silent(&self) -> bool {
        matches!(self, GameError::Busy(_) | GameError::Superseded)
    }
}

impl From<ApiError> for GameError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::InvalidBody(msg) | ApiError::Parse(msg) => GameError::MalformedResponse(msg),
            other => GameError::Api(other),
        }
    }
}

impl From<DomainError> for GameError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidStateTransition(msg) => GameError::InvalidTransition(msg),
        }
    }
}
