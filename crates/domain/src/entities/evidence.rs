use serde::{Deserialize, Serialize};

use crate::EvidenceId;

/// A piece of physical or documentary evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: EvidenceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location_found: String,
    #[serde(default)]
    pub significance: String,
    #[serde(default)]
    pub is_key_evidence: bool,
}

impl Evidence {
    pub fn new(id: impl Into<EvidenceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            location_found: String::new(),
            significance: String::new(),
            is_key_evidence: false,
        }
    }

    pub fn key(mut self) -> Self {
        self.is_key_evidence = true;
        self
    }
}
