//! Game controller - the single entry point for every player intent
//!
//! The controller owns the live session and drives the save store, the
//! notification queue and the case refresher. Each backend-backed action:
//!
//! 1. checks local preconditions (nothing is sent if they fail)
//! 2. claims a per-action in-flight slot
//! 3. captures the session epoch, awaits the backend
//! 4. applies every resulting change under one write lock, or none if the
//!    epoch moved on in the meantime

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use casebook_domain::{
    CaseId, Character, CharacterId, ConversationEntry, EvidenceId, NotificationId,
    SaveId, SaveRecord, ScreenEvent, ScreenMode, VisualScene,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::application::dto::{AnalysisRequest, QuestionRequest};
use crate::application::error::{Action, GameError};
use crate::application::notifications::{Notification, NotificationKind, NotificationQueue};
use crate::application::refresher::CaseRefresher;
use crate::application::save_store::SaveStore;
use crate::application::services::CaseService;
use crate::application::session::{ChangeFeed, GameSession, SessionHandle};
use crate::infrastructure::PollConfig;
use crate::state::Platform;

/// What a successful question produced
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionOutcome {
    pub character_name: String,
    pub response: String,
    pub discovered: Vec<Character>,
    pub scene: Option<VisualScene>,
}

#[derive(Clone)]
pub struct GameController {
    cases: CaseService,
    session: SessionHandle,
    saves: SaveStore,
    notifications: NotificationQueue,
    refresher: CaseRefresher,
    platform: Platform,
    in_flight: Arc<Mutex<HashSet<Action>>>,
}

impl GameController {
    pub fn new(cases: CaseService, platform: Platform, poll: PollConfig) -> Self {
        let changes = ChangeFeed::new();
        let session = SessionHandle::new(changes.clone());
        Self {
            refresher: CaseRefresher::new(cases.clone(), session.clone(), poll),
            saves: SaveStore::new(platform.clone(), changes.clone()),
            notifications: NotificationQueue::new(platform.clone(), changes),
            cases,
            session,
            platform,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Clone of the live session
    pub fn session(&self) -> GameSession {
        self.session.current()
    }

    pub fn screen(&self) -> ScreenMode {
        self.session.read(|s| s.screen)
    }

    /// Revision counter bumped on every session, save or notification change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.session.changes().subscribe()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.items()
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.lock_in_flight().contains(&action)
    }

    /// Case currently being polled for late assets
    pub fn polling_case(&self) -> Option<CaseId> {
        self.refresher.polling()
    }

    // -------------------------------------------------------------------------
    // Backend-backed actions
    // -------------------------------------------------------------------------

    /// Ask the backend for a new case and start investigating it.
    ///
    /// On failure the current session is left untouched.
    pub async fn generate_new_case(&self) -> Result<CaseId, GameError> {
        let _guard = self.begin(Action::GenerateCase)?;
        let epoch = self.session.read(|s| s.epoch);
        info!("Generating new case");

        let generated = self
            .cases
            .generate_case()
            .await
            .map_err(GameError::from)
            .inspect_err(|e| error!(error = %e, "Case generation failed"))?;

        let case = generated.case;
        let case_id = case.id.clone();
        self.session
            .try_update(|s| {
                if s.epoch != epoch {
                    return None;
                }
                let screen = s.screen.apply(ScreenEvent::CaseStarted).ok()?;
                s.start_case(case.clone(), generated.session_id.clone(), screen);
                Some(())
            })
            .ok_or(GameError::Superseded)?;

        self.notifications.clear();
        self.refresher.watch(&case);
        info!(case_id = %case_id, title = %case.title, "Case started");
        Ok(case_id)
    }

    /// Question a character of the active case.
    ///
    /// Returns `Ok(None)` without contacting the backend when the question is
    /// blank or the character is not part of the active case.
    pub async fn question_character(
        &self,
        character_id: &CharacterId,
        question: &str,
    ) -> Result<Option<QuestionOutcome>, GameError> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        let Some((case_id, epoch)) = self.session.read(|s| {
            let case = s.case.as_ref()?;
            case.character(character_id)?;
            Some((case.id.clone(), s.epoch))
        }) else {
            debug!(character_id = %character_id, "No active character to question");
            return Ok(None);
        };

        let _guard = self.begin(Action::QuestionCharacter)?;
        let request = QuestionRequest {
            case_id,
            character_id: character_id.clone(),
            question: question.to_string(),
        };
        let response = self
            .cases
            .question_character(&request)
            .await
            .map_err(GameError::from)
            .inspect_err(|e| error!(error = %e, character_id = %character_id, "Questioning failed"))?;

        let answered_at = self.now();
        let outcome = QuestionOutcome {
            character_name: response.character_name.clone(),
            response: response.response.clone(),
            discovered: response
                .discoveries()
                .iter()
                .map(|d| d.character.clone())
                .collect(),
            scene: response.visual_scene_generated.clone(),
        };

        self.session
            .try_update(|s| {
                if s.epoch != epoch {
                    return None;
                }
                let case = s.case.as_mut()?;
                for character in &outcome.discovered {
                    case.add_discovered_character(character.clone());
                }
                if let Some(scene) = &outcome.scene {
                    case.add_scene(scene.clone());
                }
                s.conversations.record(
                    character_id.clone(),
                    ConversationEntry::new(question, &response.response, answered_at),
                );
                s.question_draft.clear();
                Some(())
            })
            .ok_or(GameError::Superseded)?;

        for discovery in response.discoveries() {
            info!(character = %discovery.character.name, "New character discovered");
            self.notifications.push(NotificationKind::CharacterDiscovered {
                character: discovery.character.clone(),
                discovered_through: discovery.discovered_through.clone(),
                context: discovery.context.clone(),
            });
        }
        if let Some(scene) = &outcome.scene {
            info!(scene = %scene.title, "Visual scene generated");
            self.notifications
                .push(NotificationKind::SceneGenerated { scene: scene.clone() });
        }

        Ok(Some(outcome))
    }

    /// Question the selected character using the drafted question
    pub async fn ask_active_character(&self) -> Result<Option<QuestionOutcome>, GameError> {
        let (active, draft) = self
            .session
            .read(|s| (s.active_character.clone(), s.question_draft.clone()));
        match active {
            Some(character_id) => self.question_character(&character_id, &draft).await,
            None => Ok(None),
        }
    }

    /// Submit a theory with the given evidence for analysis.
    ///
    /// The theory and at least one evidence id are required; otherwise a
    /// validation error is returned and nothing is sent.
    pub async fn analyze_evidence(
        &self,
        theory: &str,
        evidence_ids: &[EvidenceId],
    ) -> Result<String, GameError> {
        let theory = theory.trim();
        if theory.is_empty() {
            return Err(GameError::validation("Please write down your theory first"));
        }
        if evidence_ids.is_empty() {
            return Err(GameError::validation("Select at least one piece of evidence"));
        }
        let (case_id, epoch) = self
            .session
            .read(|s| s.case_id().cloned().map(|id| (id, s.epoch)))
            .ok_or(GameError::NoActiveCase)?;

        let _guard = self.begin(Action::AnalyzeEvidence)?;
        let request = AnalysisRequest {
            case_id,
            evidence_ids: evidence_ids.to_vec(),
            theory: theory.to_string(),
        };
        let response = self
            .cases
            .analyze_evidence(&request)
            .await
            .map_err(GameError::from)
            .inspect_err(|e| error!(error = %e, "Evidence analysis failed"))?;

        self.session
            .try_update(|s| {
                if s.epoch != epoch {
                    return Some(Err(GameError::Superseded));
                }
                let next = match s.screen.apply(ScreenEvent::AnalysisCompleted) {
                    Ok(next) => next,
                    Err(e) => return Some(Err(e.into())),
                };
                s.theory = theory.to_string();
                s.analysis = response.analysis.clone();
                s.screen = next;
                Some(Ok(()))
            })
            .unwrap_or(Err(GameError::Superseded))?;

        info!(evidence = evidence_ids.len(), "Evidence analysed");
        Ok(response.analysis)
    }

    /// Analyse the session's own theory and evidence selection
    pub async fn analyze_selected(&self) -> Result<String, GameError> {
        let (theory, selected) = self.session.read(|s| {
            (
                s.theory.clone(),
                s.selected_evidence.iter().cloned().collect::<Vec<_>>(),
            )
        });
        self.analyze_evidence(&theory, &selected).await
    }

    // -------------------------------------------------------------------------
    // Local intents
    // -------------------------------------------------------------------------

    /// Flip selection of one evidence item; returns whether it is now selected.
    pub fn toggle_evidence_selection(&self, evidence_id: &EvidenceId) -> Result<bool, GameError> {
        self.session
            .try_update(|s| {
                let case = s.case.as_ref()?;
                if !case.has_evidence(evidence_id) {
                    return Some(Err(GameError::validation(format!(
                        "Unknown evidence {evidence_id}"
                    ))));
                }
                let selected = if s.selected_evidence.remove(evidence_id) {
                    false
                } else {
                    s.selected_evidence.insert(evidence_id.clone());
                    true
                };
                Some(Ok(selected))
            })
            .unwrap_or(Err(GameError::NoActiveCase))
    }

    /// Choose which character the question box addresses
    pub fn select_character(&self, character_id: Option<CharacterId>) {
        self.session.update(|s| {
            if character_id.as_ref() != s.active_character.as_ref() {
                s.question_draft.clear();
            }
            s.active_character = character_id;
        });
    }

    pub fn set_question_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.session.update(|s| s.question_draft = text);
    }

    pub fn set_notes(&self, notes: impl Into<String>) {
        let notes = notes.into();
        self.session.update(|s| s.notes = notes);
    }

    pub fn set_theory(&self, theory: impl Into<String>) {
        let theory = theory.into();
        self.session.update(|s| s.theory = theory);
    }

    /// Leave the analysis screen and keep investigating
    pub fn continue_investigation(&self) -> Result<(), GameError> {
        self.transition(ScreenEvent::ContinueInvestigation)
    }

    /// Abandon the investigation (unsaved progress is discarded) and show the menu
    pub fn return_to_menu(&self) -> Result<(), GameError> {
        self.session
            .try_update(|s| match s.screen.apply(ScreenEvent::NewCaseRequested) {
                Ok(next) => {
                    s.end_case(next);
                    Some(Ok(()))
                }
                Err(e) => Some(Err(GameError::from(e))),
            })
            .unwrap_or(Ok(()))?;

        self.refresher.stop();
        self.notifications.clear();
        info!("Returned to menu");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Saves
    // -------------------------------------------------------------------------

    /// Snapshot the investigation into a new save record
    pub fn save_game(&self, name: Option<&str>) -> Result<SaveRecord, GameError> {
        let snapshot = self
            .session
            .read(GameSession::snapshot)
            .ok_or(GameError::NoActiveCase)?;

        let record = self
            .saves
            .create(name, self.now(), snapshot)
            .inspect_err(|e| error!(error = %e, "Saving failed"))?;
        Ok(record)
    }

    /// Replace the session with a saved snapshot
    pub fn load_game(&self, record: &SaveRecord) -> Result<(), GameError> {
        let mut snapshot = record.snapshot.clone();
        if snapshot.screen == ScreenMode::Menu {
            snapshot.screen = ScreenMode::Menu.apply(ScreenEvent::SaveLoaded)?;
        }
        let case = snapshot.case.clone();

        self.notifications.clear();
        self.session.update(|s| s.restore(snapshot));
        self.refresher.watch(&case);
        info!(save_id = %record.id, case_id = %case.id, "Save loaded");
        Ok(())
    }

    /// Delete a save. The caller must have asked the player to confirm.
    pub fn delete_save(&self, id: &SaveId, confirmed: bool) -> Result<bool, GameError> {
        if !confirmed {
            return Err(GameError::validation("Deleting a save must be confirmed"));
        }
        self.saves
            .remove(id)
            .inspect_err(|e| error!(error = %e, save_id = %id, "Deleting save failed"))
            .map_err(GameError::from)
    }

    /// Saves as currently stored
    pub fn list_saves(&self) -> Vec<SaveRecord> {
        self.saves.list()
    }

    /// Saves as of the last read or write, without touching storage
    pub fn cached_saves(&self) -> Vec<SaveRecord> {
        self.saves.cached()
    }

    pub fn dismiss_notification(&self, id: &NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn transition(&self, event: ScreenEvent) -> Result<(), GameError> {
        self.session
            .try_update(|s| match s.screen.apply(event) {
                Ok(next) => {
                    s.screen = next;
                    Some(Ok(()))
                }
                Err(e) => Some(Err(GameError::from(e))),
            })
            .unwrap_or(Ok(()))
    }

    fn begin(&self, action: Action) -> Result<InFlight, GameError> {
        if !self.lock_in_flight().insert(action) {
            debug!(%action, "Ignoring duplicate request");
            return Err(GameError::Busy(action));
        }
        self.session.changes().notify();
        Ok(InFlight {
            set: self.in_flight.clone(),
            changes: self.session.changes().clone(),
            action,
        })
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<Action>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> DateTime<Utc> {
        i64::try_from(self.platform.now_millis())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_else(Utc::now)
    }
}

/// Releases an in-flight slot when the action finishes, however it finishes
struct InFlight {
    set: Arc<Mutex<HashSet<Action>>>,
    changes: ChangeFeed,
    action: Action,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.action);
        self.changes.notify();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::api::Api;
    use crate::infrastructure::platform::mock::{create_mock_platform, MockPlatformHandles};
    use crate::infrastructure::testing::{api_failure, sample_case, scene_json};
    use crate::ports::outbound::{ApiError, MockRawApiPort, RawApiPort};
    use casebook_domain::{Case, GameSnapshot};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::sync::Notify;

    fn controller_with(raw: Arc<dyn RawApiPort>) -> (GameController, MockPlatformHandles) {
        let (platform, handles) = create_mock_platform();
        let cases = CaseService::new(Api::new(raw));
        (
            GameController::new(cases, platform, PollConfig::default()),
            handles,
        )
    }

    fn controller(raw: MockRawApiPort) -> (GameController, MockPlatformHandles) {
        controller_with(Arc::new(raw))
    }

    /// Sample case with its image already rendered, so nothing polls
    fn ready_case() -> Case {
        let mut case = sample_case();
        case.crime_scene_image_url = Some("https://img/crime.png".to_string());
        case
    }

    fn start_case(controller: &GameController) {
        let record = SaveRecord::new(
            SaveId::new("seed"),
            None,
            Utc::now(),
            GameSnapshot::new(ready_case()),
        );
        controller.load_game(&record).unwrap();
    }

    fn e(id: &str) -> EvidenceId {
        EvidenceId::new(id)
    }

    #[tokio::test]
    async fn generate_case_starts_playing_with_fresh_state() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, _| path == "/api/generate-case")
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "case": {"id": "c1", "title": "The Study", "characters": [], "evidence": [],
                             "crime_scene_image_url": "https://img/study.png"},
                    "session_id": "s1"
                }))
            });
        let (controller, _) = controller(raw);
        start_case(&controller);
        controller.set_notes("old notes");
        controller.toggle_evidence_selection(&e("e1")).unwrap();

        let case_id = controller.generate_new_case().await.unwrap();

        let session = controller.session();
        assert_eq!(case_id.as_str(), "c1");
        assert_eq!(session.screen, ScreenMode::Playing);
        assert_eq!(session.case_id().map(CaseId::as_str), Some("c1"));
        assert_eq!(session.session_id.as_ref().map(|s| s.as_str()), Some("s1"));
        assert!(session.conversations.is_empty());
        assert!(session.notes.is_empty());
        assert!(session.selected_evidence.is_empty());
        assert!(!controller.is_busy(Action::GenerateCase));
    }

    #[tokio::test]
    async fn failed_generation_leaves_session_untouched() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().times(2).returning(move |_, _| {
            match calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) {
                0 => Err(api_failure("Failed to generate case")),
                _ => Ok(json!({"case": null, "session_id": "s2"})),
            }
        });
        let (controller, _) = controller(raw);
        start_case(&controller);
        controller.set_notes("keep me");
        let before = controller.session();

        let err = controller.generate_new_case().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate case");
        assert_eq!(controller.session(), before);

        let err = controller.generate_new_case().await.unwrap_err();
        assert!(matches!(err, GameError::MalformedResponse(_)));
        assert_eq!(controller.session(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn question_records_answer_and_discoveries() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == "/api/question-character"
                    && body["case_id"] == "case-1"
                    && body["character_id"] == "c2"
                    && body["question"] == "Where were you?"
            })
            .times(1)
            .returning(|_, _| {
                Ok(json!({
                    "character_name": "Lady Gray",
                    "response": "I was in the library.",
                    "new_characters_discovered": [{
                        "character": {"id": "c9", "name": "Gardener"},
                        "discovered_through": "Lady Gray",
                        "context": "mentioned the gardener"
                    }]
                }))
            });
        let (controller, _) = controller(raw);
        start_case(&controller);
        controller.select_character(Some(CharacterId::new("c2")));
        controller.set_question_draft("  Where were you?  ");

        let outcome = controller.ask_active_character().await.unwrap().unwrap();
        assert_eq!(outcome.response, "I was in the library.");

        let session = controller.session();
        let transcript = session.conversations.transcript(&CharacterId::new("c2"));
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].question, "Where were you?");
        assert_eq!(transcript[0].response, "I was in the library.");
        assert!(session.question_draft.is_empty());

        let case = session.case.unwrap();
        let gardener = case.characters.last().unwrap();
        assert_eq!(gardener.name, "Gardener");
        assert!(gardener.is_dynamic);

        let notes = controller.notifications();
        assert_eq!(notes.len(), 1);
        assert!(matches!(notes[0].kind, NotificationKind::CharacterDiscovered { .. }));

        tokio::time::sleep(Duration::from_millis(9_500)).await;
        assert_eq!(controller.notifications().len(), 1);
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(controller.notifications().is_empty());
    }

    #[tokio::test]
    async fn repeated_discoveries_and_scenes_are_appended() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().times(2).returning(|_, _| {
            Ok(json!({
                "character_name": "Mrs. Hale",
                "response": "The gardener again.",
                "new_characters_discovered": [{"character": {"id": "c9", "name": "Gardener"}}],
                "visual_scene_generated": scene_json("s1")
            }))
        });
        let (controller, _) = controller(raw);
        start_case(&controller);
        let hale = CharacterId::new("c1");

        controller.question_character(&hale, "Who?").await.unwrap();
        controller.question_character(&hale, "Who again?").await.unwrap();

        let case = controller.session().case.unwrap();
        assert_eq!(case.characters.len(), 4);
        assert_eq!(case.visual_scenes.len(), 2);
        assert_eq!(controller.notifications().len(), 4);
        assert_eq!(
            controller.session().conversations.transcript(&hale).len(),
            2
        );
    }

    #[tokio::test]
    async fn blank_question_or_unknown_character_is_a_no_op() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().never();
        let (controller, _) = controller(raw);

        assert_eq!(
            controller
                .question_character(&CharacterId::new("c1"), "Where?")
                .await
                .unwrap(),
            None
        );

        start_case(&controller);
        let before = controller.session();
        assert_eq!(
            controller
                .question_character(&CharacterId::new("c1"), "   ")
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            controller
                .question_character(&CharacterId::new("nobody"), "Where?")
                .await
                .unwrap(),
            None
        );
        assert_eq!(controller.ask_active_character().await.unwrap(), None);
        assert_eq!(controller.session(), before);
    }

    #[tokio::test]
    async fn analysis_requires_theory_and_evidence() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().never();
        let (controller, _) = controller(raw);
        start_case(&controller);

        let err = controller.analyze_evidence("", &[e("e1")]).await.unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));

        let err = controller.analyze_evidence("The butler", &[]).await.unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
        assert_eq!(controller.screen(), ScreenMode::Playing);
    }

    #[tokio::test]
    async fn analysis_moves_to_analysis_screen_and_back() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == "/api/analyze-evidence"
                    && body["evidence_ids"] == json!(["e1", "e3"])
                    && body["theory"] == "Lady Ashworth did it"
            })
            .times(1)
            .returning(|_, _| Ok(json!({"analysis": "Compelling, but the watch says otherwise."})));
        let (controller, _) = controller(raw);
        start_case(&controller);
        controller.toggle_evidence_selection(&e("e1")).unwrap();
        controller.toggle_evidence_selection(&e("e3")).unwrap();
        controller.set_theory("Lady Ashworth did it");

        let analysis = controller.analyze_selected().await.unwrap();
        assert_eq!(analysis, "Compelling, but the watch says otherwise.");
        let session = controller.session();
        assert_eq!(session.screen, ScreenMode::Analysis);
        assert_eq!(session.analysis, analysis);

        controller.continue_investigation().unwrap();
        assert_eq!(controller.screen(), ScreenMode::Playing);
        assert!(matches!(
            controller.continue_investigation(),
            Err(GameError::InvalidTransition(_))
        ));
    }

    #[test]
    fn toggling_tracks_odd_counts() {
        let (controller, _) = controller(MockRawApiPort::new());
        assert!(matches!(
            controller.toggle_evidence_selection(&e("e1")),
            Err(GameError::NoActiveCase)
        ));
        start_case(&controller);

        let sequence = ["e1", "e2", "e1", "e3", "e1", "e2"];
        for id in sequence {
            controller.toggle_evidence_selection(&e(id)).unwrap();
        }
        for id in ["e1", "e2", "e3"] {
            let odd = sequence.iter().filter(|t| **t == id).count() % 2 == 1;
            assert_eq!(
                controller.session().selected_evidence.contains(&e(id)),
                odd,
                "{id}"
            );
        }

        assert!(matches!(
            controller.toggle_evidence_selection(&e("e99")),
            Err(GameError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn save_then_load_restores_the_investigation() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().returning(|path, _| match path {
            "/api/question-character" => Ok(json!({"character_name": "Mrs. Hale", "response": "Yes."})),
            _ => Ok(json!({"analysis": "Sound reasoning."})),
        });
        let (controller, _) = controller(raw);
        start_case(&controller);
        controller
            .question_character(&CharacterId::new("c1"), "Did you hear the shot?")
            .await
            .unwrap();
        controller.set_notes("Watch stopped at 9:47");
        controller.toggle_evidence_selection(&e("e3")).unwrap();
        controller.analyze_evidence("The widow", &[e("e3")]).await.unwrap();

        let before = controller.session().snapshot().unwrap();
        let record = controller.save_game(None).unwrap();
        assert_eq!(record.name, "Case: Murder at Ashworth Manor");

        controller.return_to_menu().unwrap();
        assert_eq!(controller.screen(), ScreenMode::Menu);
        assert!(controller.session().case.is_none());

        let stored = controller.list_saves();
        assert_eq!(stored.len(), 1);
        controller.load_game(&stored[0]).unwrap();
        assert_eq!(controller.session().snapshot().unwrap(), before);
        assert_eq!(controller.screen(), ScreenMode::Analysis);
    }

    #[test]
    fn load_defaults_missing_fields() {
        let (controller, _) = controller(MockRawApiPort::new());
        let mut case: Value = serde_json::to_value(ready_case()).unwrap();
        case["id"] = json!("legacy");
        let record: SaveRecord = serde_json::from_value(json!({
            "id": "1600000000000",
            "name": "Old save",
            "timestamp": "2020-09-13 12:26:40",
            "case": case
        }))
        .unwrap();

        controller.load_game(&record).unwrap();
        let session = controller.session();
        assert_eq!(session.screen, ScreenMode::Playing);
        assert!(session.conversations.is_empty());
        assert!(session.notes.is_empty() && session.theory.is_empty() && session.analysis.is_empty());
        assert!(session.selected_evidence.is_empty());
    }

    #[test]
    fn save_requires_a_case_and_surfaces_storage_failures() {
        let (controller, handles) = controller(MockRawApiPort::new());
        assert!(matches!(controller.save_game(Some("x")), Err(GameError::NoActiveCase)));

        start_case(&controller);
        controller.save_game(Some("first")).unwrap();

        handles.storage.set_fail_writes(true);
        let err = controller.save_game(Some("second")).unwrap_err();
        assert!(matches!(err, GameError::Storage(_)));
        assert_eq!(controller.cached_saves().len(), 1);
    }

    #[test]
    fn delete_needs_confirmation_and_keeps_order() {
        let (controller, handles) = controller(MockRawApiPort::new());
        start_case(&controller);
        let ids: Vec<SaveId> = ["a", "b", "c"]
            .into_iter()
            .map(|name| {
                handles.time.advance_millis(1);
                controller.save_game(Some(name)).unwrap().id
            })
            .collect();

        assert!(matches!(
            controller.delete_save(&ids[1], false),
            Err(GameError::Validation(_))
        ));
        assert_eq!(controller.list_saves().len(), 3);

        assert!(controller.delete_save(&ids[1], true).unwrap());
        let remaining: Vec<SaveId> = controller.list_saves().into_iter().map(|r| r.id).collect();
        assert_eq!(remaining, [ids[0].clone(), ids[2].clone()]);
    }

    #[tokio::test]
    async fn duplicate_action_is_rejected_while_in_flight() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().never();
        let (controller, _) = controller(raw);

        let guard = controller.begin(Action::GenerateCase).unwrap();
        assert!(controller.is_busy(Action::GenerateCase));
        assert!(matches!(
            controller.generate_new_case().await,
            Err(GameError::Busy(Action::GenerateCase))
        ));

        drop(guard);
        assert!(!controller.is_busy(Action::GenerateCase));
    }

    #[tokio::test]
    async fn return_to_menu_follows_screen_transitions() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .returning(|_, _| Ok(json!({"analysis": "Plausible."})));
        let (controller, _) = controller(raw);

        controller.return_to_menu().unwrap();
        assert_eq!(controller.screen(), ScreenMode::Menu);

        start_case(&controller);
        controller.analyze_evidence("The butler", &[e("e1")]).await.unwrap();
        assert_eq!(controller.screen(), ScreenMode::Analysis);
        let epoch = controller.session().epoch;

        controller.return_to_menu().unwrap();
        let session = controller.session();
        assert_eq!(session.screen, ScreenMode::Menu);
        assert!(session.case.is_none());
        assert!(session.analysis.is_empty());
        assert_eq!(session.epoch, epoch + 1);
        assert!(controller.notifications().is_empty());
    }

    /// Holds every request until released
    struct GatedApi {
        entered: Arc<Notify>,
        release: Arc<Notify>,
        body: Value,
    }

    #[async_trait::async_trait]
    impl RawApiPort for GatedApi {
        async fn get_json(&self, _path: &str) -> Result<Value, ApiError> {
            Ok(self.body.clone())
        }

        async fn post_json(&self, _path: &str, _body: &Value) -> Result<Value, ApiError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(self.body.clone())
        }
    }

    #[tokio::test]
    async fn result_arriving_after_return_to_menu_is_discarded() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let api = GatedApi {
            entered: entered.clone(),
            release: release.clone(),
            body: json!({
                "case": {"id": "late", "title": "Too Late", "crime_scene_image_url": "https://img/x.png"},
                "session_id": "s9"
            }),
        };
        let (controller, _) = controller_with(Arc::new(api));
        start_case(&controller);

        let pending = tokio::spawn({
            let controller = controller.clone();
            async move { controller.generate_new_case().await }
        });
        entered.notified().await;
        controller.return_to_menu().unwrap();
        release.notify_one();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(GameError::Superseded)));
        assert_eq!(controller.screen(), ScreenMode::Menu);
        assert!(controller.session().case.is_none());
    }

    #[tokio::test]
    async fn generated_case_without_image_is_polled() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json().returning(|_, _| {
            Ok(json!({"case": {"id": "c1", "title": "The Study"}, "session_id": "s1"}))
        });
        raw.expect_get_json()
            .returning(|_| Ok(json!({"case": {"id": "c1", "title": "The Study"}})));
        let (controller, _) = controller(raw);

        controller.generate_new_case().await.unwrap();
        assert_eq!(controller.polling_case(), Some(CaseId::new("c1")));

        controller.return_to_menu().unwrap();
        assert_eq!(controller.polling_case(), None);
    }
}
