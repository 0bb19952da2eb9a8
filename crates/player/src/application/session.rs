//! Live game session shared by the controller, the refresher and the UI
//!
//! `SessionHandle` wraps the session in an `Arc<RwLock<..>>` and publishes a
//! revision number on every write, so the UI can re-read after each change.
//! Locks are never held across an `.await`.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use casebook_domain::{
    Case, CaseId, CharacterId, Conversations, EvidenceId, GameSnapshot, ScreenMode, SessionId,
};
use tokio::sync::watch;

/// Everything the player is working on right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSession {
    pub case: Option<Case>,
    pub session_id: Option<SessionId>,
    pub conversations: Conversations,
    pub notes: String,
    pub selected_evidence: BTreeSet<EvidenceId>,
    pub theory: String,
    pub analysis: String,
    pub screen: ScreenMode,

    // Not persisted
    pub active_character: Option<CharacterId>,
    pub question_draft: String,
    /// Bumped whenever the investigation is replaced; in-flight results
    /// captured under an older epoch are discarded.
    pub epoch: u64,
}

impl GameSession {
    pub fn case_id(&self) -> Option<&CaseId> {
        self.case.as_ref().map(|c| &c.id)
    }

    /// The persisted part of the session, if a case is loaded
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        let case = self.case.clone()?;
        Some(GameSnapshot {
            case,
            session_id: self.session_id.clone(),
            conversations: self.conversations.clone(),
            notes: self.notes.clone(),
            selected_evidence: self.selected_evidence.clone(),
            theory: self.theory.clone(),
            analysis: self.analysis.clone(),
            screen: self.screen,
        })
    }

    /// Replace the investigation with a freshly generated case
    pub fn start_case(&mut self, case: Case, session_id: Option<SessionId>, screen: ScreenMode) {
        self.replace(GameSnapshot {
            session_id,
            screen,
            ..GameSnapshot::new(case)
        });
    }

    /// Replace the investigation with a restored snapshot
    pub fn restore(&mut self, snapshot: GameSnapshot) {
        self.replace(snapshot);
    }

    /// Drop the investigation and show `screen` instead
    pub fn end_case(&mut self, screen: ScreenMode) {
        let epoch = self.epoch + 1;
        *self = GameSession {
            epoch,
            screen,
            ..GameSession::default()
        };
    }

    fn replace(&mut self, snapshot: GameSnapshot) {
        *self = GameSession {
            case: Some(snapshot.case),
            session_id: snapshot.session_id,
            conversations: snapshot.conversations,
            notes: snapshot.notes,
            selected_evidence: snapshot.selected_evidence,
            theory: snapshot.theory,
            analysis: snapshot.analysis,
            screen: snapshot.screen,
            active_character: None,
            question_draft: String::new(),
            epoch: self.epoch + 1,
        };
    }
}

/// Revision counter broadcast to observers after every change
#[derive(Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn notify(&self) {
        self.tx.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.tx.borrow()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the live session
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<GameSession>>,
    changes: ChangeFeed,
}

impl SessionHandle {
    pub fn new(changes: ChangeFeed) -> Self {
        Self {
            state: Arc::new(RwLock::new(GameSession::default())),
            changes,
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Clone of the current session
    pub fn current(&self) -> GameSession {
        self.read(GameSession::clone)
    }

    /// Mutate under the write lock, then notify observers
    pub fn update<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let result = {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        self.changes.notify();
        result
    }

    /// Like `update`, but observers are only notified when `f` returns `Some`.
    ///
    /// `f` must leave the session untouched when it returns `None`.
    pub fn try_update<R>(&self, f: impl FnOnce(&mut GameSession) -> Option<R>) -> Option<R> {
        let result = {
            let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        };
        if result.is_some() {
            self.changes.notify();
        }
        result
    }

    pub fn changes(&self) -> &ChangeFeed {
        &self.changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::sample_case;

    #[test]
    fn snapshot_round_trips_through_restore() {
        let mut session = GameSession::default();
        session.start_case(sample_case(), Some(SessionId::new("sess-1")), ScreenMode::Playing);
        session.notes = "Watch stopped at 9:47".to_string();
        session.selected_evidence.insert(EvidenceId::new("e1"));
        session.screen = ScreenMode::Analysis;

        let snapshot = session.snapshot().unwrap();
        let mut restored = GameSession::default();
        restored.restore(snapshot.clone());

        assert_eq!(restored.snapshot().unwrap(), snapshot);
    }

    #[test]
    fn replacing_the_case_bumps_epoch_and_clears_drafts() {
        let mut session = GameSession::default();
        session.start_case(sample_case(), None, ScreenMode::Playing);
        session.active_character = Some(CharacterId::new("c1"));
        session.question_draft = "Why?".to_string();
        let epoch = session.epoch;

        session.end_case(ScreenMode::Menu);
        assert!(session.case.is_none());
        assert_eq!(session.screen, ScreenMode::Menu);
        assert_eq!(session.epoch, epoch + 1);
        assert!(session.question_draft.is_empty());
    }

    #[test]
    fn try_update_only_notifies_on_change() {
        let feed = ChangeFeed::new();
        let handle = SessionHandle::new(feed.clone());

        assert_eq!(handle.try_update(|_| None::<()>), None);
        assert_eq!(feed.revision(), 0);

        handle.update(|s| s.notes.push_str("x"));
        assert_eq!(feed.revision(), 1);
        assert_eq!(handle.read(|s| s.notes.clone()), "x");
    }
}
