use serde::{Deserialize, Serialize};

use crate::CharacterId;

/// A person of interest in the case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub alibi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motive: Option<String>,
    /// Disclosed through dialogue rather than present at case generation
    #[serde(default)]
    pub is_dynamic: bool,
}

impl Character {
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            background: String::new(),
            alibi: String::new(),
            motive: None,
            is_dynamic: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_alibi(mut self, alibi: impl Into<String>) -> Self {
        self.alibi = alibi.into();
        self
    }

    /// Initials for the avatar badge ("Lady Gray" -> "LG")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}
