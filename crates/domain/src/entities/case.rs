//! Case aggregate - one mystery scenario as disclosed by the backend so far

use serde::{Deserialize, Serialize};

use super::{Character, Evidence, VisualScene};
use crate::{CaseId, CharacterId, EvidenceId};

/// A mystery case.
///
/// The backend keeps discovering content while the player investigates, so the
/// character and scene lists only ever grow and the crime-scene image can
/// arrive long after the case itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub setting: String,
    #[serde(default)]
    pub victim_name: String,
    #[serde(default)]
    pub crime_scene_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crime_scene_image_url: Option<String>,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub visual_scenes: Vec<VisualScene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// What a background refresh added to the live case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseDelta {
    /// The crime-scene image URL arrived with this refresh
    pub image_added: bool,
    /// Number of visual scenes appended
    pub scenes_added: usize,
}

impl CaseDelta {
    pub fn is_empty(&self) -> bool {
        !self.image_added && self.scenes_added == 0
    }
}

impl Case {
    /// Create an empty case shell with the given id and title
    pub fn new(id: impl Into<CaseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            setting: String::new(),
            victim_name: String::new(),
            crime_scene_description: String::new(),
            crime_scene_image_url: None,
            characters: Vec::new(),
            evidence: Vec::new(),
            visual_scenes: Vec::new(),
            difficulty: None,
        }
    }

    /// Whether the crime-scene illustration has been produced yet.
    /// An empty URL counts as absent.
    pub fn has_crime_scene_image(&self) -> bool {
        self.crime_scene_image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    pub fn evidence_item(&self, id: &EvidenceId) -> Option<&Evidence> {
        self.evidence.iter().find(|e| &e.id == id)
    }

    pub fn has_evidence(&self, id: &EvidenceId) -> bool {
        self.evidence_item(id).is_some()
    }

    /// Append a character disclosed mid-investigation.
    ///
    /// No deduplication: a character reported twice is listed twice.
    pub fn add_discovered_character(&mut self, mut character: Character) {
        character.is_dynamic = true;
        self.characters.push(character);
    }

    /// Append a generated visual scene
    pub fn add_scene(&mut self, scene: VisualScene) {
        self.visual_scenes.push(scene);
    }

    /// Merge a freshly fetched copy of this case into the live one.
    ///
    /// Only two things are taken from `fetched`: the crime-scene image if it
    /// is newly present, and any scenes beyond the current count. The fetched
    /// scene list is assumed to be a superset in the same order.
    pub fn absorb_refresh(&mut self, fetched: &Case) -> CaseDelta {
        let mut delta = CaseDelta::default();

        if !self.has_crime_scene_image() && fetched.has_crime_scene_image() {
            self.crime_scene_image_url = fetched.crime_scene_image_url.clone();
            delta.image_added = true;
        }

        let known = self.visual_scenes.len();
        if fetched.visual_scenes.len() > known {
            let fresh = &fetched.visual_scenes[known..];
            delta.scenes_added = fresh.len();
            self.visual_scenes.extend(fresh.iter().cloned());
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(id: &str) -> VisualScene {
        VisualScene::new(id, format!("Scene {id}"), format!("https://img/{id}.png"))
    }

    #[test]
    fn minimal_backend_case_deserializes() {
        let case: Case = serde_json::from_str(
            r#"{"id":"c1","title":"The Study","characters":[],"evidence":[]}"#,
        )
        .unwrap();

        assert_eq!(case.id.as_str(), "c1");
        assert_eq!(case.title, "The Study");
        assert!(case.characters.is_empty());
        assert!(!case.has_crime_scene_image());
    }

    #[test]
    fn null_or_blank_image_counts_as_missing() {
        let mut case = Case::new("c1", "t");
        case.crime_scene_image_url = Some("  ".to_string());
        assert!(!case.has_crime_scene_image());

        let parsed: Case =
            serde_json::from_str(r#"{"id":"c1","crime_scene_image_url":null}"#).unwrap();
        assert!(!parsed.has_crime_scene_image());
    }

    #[test]
    fn discovered_characters_are_appended_without_dedup() {
        let mut case = Case::new("c1", "t");
        let gardener = Character::new("c2", "Gardener");

        case.add_discovered_character(gardener.clone());
        case.add_discovered_character(gardener);

        assert_eq!(case.characters.len(), 2);
        assert!(case.characters.iter().all(|c| c.is_dynamic));
    }

    #[test]
    fn refresh_takes_image_and_extra_scenes_only() {
        let mut live = Case::new("c1", "Live title");
        live.add_scene(scene("s1"));

        let mut fetched = Case::new("c1", "Server title");
        fetched.crime_scene_image_url = Some("https://img/crime.png".to_string());
        fetched.visual_scenes = vec![scene("s1"), scene("s2"), scene("s3")];

        let delta = live.absorb_refresh(&fetched);

        assert!(delta.image_added);
        assert_eq!(delta.scenes_added, 2);
        assert_eq!(live.title, "Live title");
        assert_eq!(live.visual_scenes.len(), 3);
        assert_eq!(live.visual_scenes[2].id.as_str(), "s3");
    }

    #[test]
    fn refresh_keeps_existing_image() {
        let mut live = Case::new("c1", "t");
        live.crime_scene_image_url = Some("https://img/first.png".to_string());

        let mut fetched = Case::new("c1", "t");
        fetched.crime_scene_image_url = Some("https://img/second.png".to_string());

        let delta = live.absorb_refresh(&fetched);
        assert!(delta.is_empty());
        assert_eq!(
            live.crime_scene_image_url.as_deref(),
            Some("https://img/first.png")
        );
    }

    #[test]
    fn shorter_fetched_scene_list_is_ignored() {
        let mut live = Case::new("c1", "t");
        live.add_scene(scene("s1"));
        live.add_scene(scene("s2"));

        let mut fetched = Case::new("c1", "t");
        fetched.visual_scenes = vec![scene("s1")];

        assert!(live.absorb_refresh(&fetched).is_empty());
        assert_eq!(live.visual_scenes.len(), 2);
    }
}
