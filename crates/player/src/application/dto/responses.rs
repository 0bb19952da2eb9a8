use casebook_domain::{Case, Character, SessionId, VisualScene};
use serde::Deserialize;

/// `POST /api/generate-case`
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedCase {
    pub case: Case,
    #[serde(default)]
    pub session_id: Option<SessionId>,
}

/// `GET /api/cases/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CaseEnvelope {
    pub case: Case,
}

/// A character disclosed by testimony
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoveredCharacter {
    pub character: Character,
    #[serde(default)]
    pub discovered_through: String,
    #[serde(default)]
    pub context: String,
}

/// `POST /api/question-character`
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub character_name: String,
    pub response: String,
    #[serde(default)]
    pub new_characters_discovered: Option<Vec<DiscoveredCharacter>>,
    #[serde(default)]
    pub visual_scene_generated: Option<VisualScene>,
}

impl QuestionResponse {
    pub fn discoveries(&self) -> &[DiscoveredCharacter] {
        self.new_characters_discovered.as_deref().unwrap_or(&[])
    }
}

/// `POST /api/analyze-evidence`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}
