use serde::{Deserialize, Serialize};

use crate::SceneId;

/// An image-backed illustration of a moment described in testimony
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualScene {
    pub id: SceneId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// "crime_scene", "testimony", "evidence_analysis" or "manual"
    #[serde(default)]
    pub generated_from: String,
    /// What triggered the generation
    #[serde(default)]
    pub context: String,
    /// Name of the character whose testimony produced the scene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_involved: Option<String>,
    /// Server-side generation time, kept verbatim
    #[serde(default)]
    pub timestamp: String,
}

impl VisualScene {
    pub fn new(
        id: impl Into<SceneId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image_url: image_url.into(),
            generated_from: String::new(),
            context: String::new(),
            character_involved: None,
            timestamp: String::new(),
        }
    }
}
