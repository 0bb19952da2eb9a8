//! Save records - full client-side snapshots of one play-through

use std::collections::BTreeSet;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::{Case, Conversations, EvidenceId, SaveId, ScreenMode, SessionId};

/// Everything needed to resume an investigation.
///
/// Every field except the case is optional on the wire; absent fields load as
/// empty values and an absent screen mode loads as `playing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub case: Case,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default)]
    pub conversations: Conversations,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub selected_evidence: BTreeSet<EvidenceId>,
    #[serde(default)]
    pub theory: String,
    #[serde(default)]
    pub analysis: String,
    #[serde(default = "ScreenMode::playing")]
    pub screen: ScreenMode,
}

impl GameSnapshot {
    pub fn new(case: Case) -> Self {
        Self {
            case,
            session_id: None,
            conversations: Conversations::new(),
            notes: String::new(),
            selected_evidence: BTreeSet::new(),
            theory: String::new(),
            analysis: String::new(),
            screen: ScreenMode::Playing,
        }
    }
}

/// A named, timestamped snapshot stored in the local save list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Derived from creation time (epoch millis)
    pub id: SaveId,
    pub name: String,
    /// Human-readable local time of the save
    pub timestamp: String,
    #[serde(flatten)]
    pub snapshot: GameSnapshot,
}

impl SaveRecord {
    /// Build a record; the display name defaults to `"Case: <title>"`.
    pub fn new(
        id: SaveId,
        name: Option<&str>,
        created_at: DateTime<Utc>,
        snapshot: GameSnapshot,
    ) -> Self {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Self::default_name(&snapshot.case));

        Self {
            id,
            name,
            timestamp: created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            snapshot,
        }
    }

    pub fn default_name(case: &Case) -> String {
        format!("Case: {}", case.title)
    }

    pub fn case_title(&self) -> &str {
        &self.snapshot.case.title
    }
}
