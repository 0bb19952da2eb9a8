//! Self-expiring notifications
//!
//! Each notification gets its own expiry task keyed by id. Dismissing a
//! notification aborts its task; expiring one removes it by id, so a timer
//! that fires after dismissal finds nothing to remove.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use casebook_domain::{Character, NotificationId, VisualScene};
use tokio::task::AbortHandle;
use tracing::debug;

use crate::application::session::ChangeFeed;
use crate::state::Platform;

const CHARACTER_DISCOVERY_TTL: Duration = Duration::from_secs(10);
const VISUAL_SCENE_TTL: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationKind {
    CharacterDiscovered {
        character: Character,
        discovered_through: String,
        context: String,
    },
    SceneGenerated {
        scene: VisualScene,
    },
}

impl NotificationKind {
    /// How long the notification stays up unless dismissed
    pub fn ttl(&self) -> Duration {
        match self {
            NotificationKind::CharacterDiscovered { .. } => CHARACTER_DISCOVERY_TTL,
            NotificationKind::SceneGenerated { .. } => VISUAL_SCENE_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub created_at_ms: u64,
}

#[derive(Default)]
struct QueueState {
    items: Vec<Notification>,
    timers: HashMap<NotificationId, AbortHandle>,
}

/// Insertion-ordered notification list with per-item expiry.
///
/// `push` spawns onto the current tokio runtime.
#[derive(Clone)]
pub struct NotificationQueue {
    platform: Platform,
    state: Arc<Mutex<QueueState>>,
    changes: ChangeFeed,
}

impl NotificationQueue {
    pub fn new(platform: Platform, changes: ChangeFeed) -> Self {
        Self {
            platform,
            state: Arc::new(Mutex::new(QueueState::default())),
            changes,
        }
    }

    pub fn push(&self, kind: NotificationKind) -> NotificationId {
        let id = NotificationId::new(self.platform.unique_id());
        let ttl = kind.ttl();
        let notification = Notification {
            id: id.clone(),
            kind,
            created_at_ms: self.platform.now_millis(),
        };

        {
            let mut state = self.lock();
            state.items.push(notification);

            let queue = self.clone();
            let expiring = id.clone();
            let task = tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                queue.expire(&expiring);
            });
            state.timers.insert(id.clone(), task.abort_handle());
        }

        debug!(notification_id = %id, ttl_secs = ttl.as_secs(), "Notification queued");
        self.changes.notify();
        id
    }

    /// Remove a notification before it expires. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: &NotificationId) -> bool {
        let removed = {
            let mut state = self.lock();
            if let Some(timer) = state.timers.remove(id) {
                timer.abort();
            }
            Self::remove_item(&mut state, id)
        };
        if removed {
            self.changes.notify();
        }
        removed
    }

    /// Drop every notification and cancel all timers
    pub fn clear(&self) {
        let had_items = {
            let mut state = self.lock();
            for (_, timer) in state.timers.drain() {
                timer.abort();
            }
            let had_items = !state.items.is_empty();
            state.items.clear();
            had_items
        };
        if had_items {
            self.changes.notify();
        }
    }

    /// Current notifications in display order
    pub fn items(&self) -> Vec<Notification> {
        self.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expire(&self, id: &NotificationId) {
        let removed = {
            let mut state = self.lock();
            state.timers.remove(id);
            Self::remove_item(&mut state, id)
        };
        if removed {
            debug!(notification_id = %id, "Notification expired");
            self.changes.notify();
        }
    }

    fn remove_item(state: &mut QueueState, id: &NotificationId) -> bool {
        let before = state.items.len();
        state.items.retain(|n| &n.id != id);
        state.items.len() != before
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
