//! Per-character interrogation transcripts

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CharacterId;

/// One question/answer exchange with a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub question: String,
    pub response: String,
    /// Client-side time the answer arrived
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn new(
        question: impl Into<String>,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
            timestamp,
        }
    }
}

/// Transcripts keyed by character id; each transcript is append-only.
///
/// Keys are not pruned when the case changes shape, so a stale key is harmless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversations(BTreeMap<CharacterId, Vec<ConversationEntry>>);

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, character_id: CharacterId, entry: ConversationEntry) {
        self.0.entry(character_id).or_default().push(entry);
    }

    pub fn transcript(&self, character_id: &CharacterId) -> &[ConversationEntry] {
        self.0
            .get(character_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of exchanges across all characters
    pub fn exchange_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CharacterId, &Vec<ConversationEntry>)> {
        self.0.iter()
    }
}
