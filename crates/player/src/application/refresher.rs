//! Case refresher - polls the backend for late-arriving case assets
//!
//! The crime-scene image and some visual scenes are rendered after the case
//! is generated. While the live case has no image, one task per case id
//! re-fetches it on a fixed interval until the image shows up or the
//! deadline passes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use casebook_domain::{Case, CaseId};
use tokio::task::AbortHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::application::services::CaseService;
use crate::application::session::SessionHandle;
use crate::infrastructure::PollConfig;

struct ActivePoll {
    case_id: CaseId,
    token: u64,
    handle: AbortHandle,
}

#[derive(Clone)]
pub struct CaseRefresher {
    cases: CaseService,
    session: SessionHandle,
    policy: PollConfig,
    active: Arc<Mutex<Option<ActivePoll>>>,
    next_token: Arc<AtomicU64>,
}

impl CaseRefresher {
    pub fn new(cases: CaseService, session: SessionHandle, policy: PollConfig) -> Self {
        Self {
            cases,
            session,
            policy,
            active: Arc::new(Mutex::new(None)),
            next_token: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start polling for `case` if it still lacks an image.
    ///
    /// Any poll for a different case is stopped first; a poll already running
    /// for the same case is left alone.
    pub fn watch(&self, case: &Case) {
        let mut active = self.lock();

        if let Some(current) = active.as_ref() {
            if current.case_id == case.id && !current.handle.is_finished() {
                return;
            }
        }
        if let Some(previous) = active.take() {
            previous.handle.abort();
            debug!(case_id = %previous.case_id, "Stopped polling previous case");
        }

        if case.has_crime_scene_image() {
            return;
        }

        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let refresher = self.clone();
        let case_id = case.id.clone();
        let task = tokio::spawn(async move {
            refresher.poll(case_id).await;
            refresher.finish(token);
        });

        info!(case_id = %case.id, "Polling for crime scene image");
        *active = Some(ActivePoll {
            case_id: case.id.clone(),
            token,
            handle: task.abort_handle(),
        });
    }

    /// Cancel the running poll, if any
    pub fn stop(&self) {
        if let Some(previous) = self.lock().take() {
            previous.handle.abort();
            debug!(case_id = %previous.case_id, "Polling stopped");
        }
    }

    /// Case currently being polled
    pub fn polling(&self) -> Option<CaseId> {
        self.lock()
            .as_ref()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.case_id.clone())
    }

    async fn poll(&self, case_id: CaseId) {
        let deadline = sleep(self.policy.timeout);
        tokio::pin!(deadline);

        // First fetch happens one interval after the case arrives
        let mut ticker = interval_at(Instant::now() + self.policy.interval, self.policy.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    info!(case_id = %case_id, "Gave up waiting for crime scene image");
                    return;
                }
                _ = ticker.tick() => {
                    if self.refresh_once(&case_id).await {
                        return;
                    }
                }
            }
        }
    }

    /// One poll round. Returns `true` when polling should end.
    async fn refresh_once(&self, case_id: &CaseId) -> bool {
        let fetched = match self.cases.fetch_case(case_id).await {
            Ok(case) => case,
            Err(e) => {
                warn!(case_id = %case_id, error = %e, "Case refresh failed");
                return false;
            }
        };

        let delta = self.session.try_update(|session| {
            let live = session.case.as_mut().filter(|c| &c.id == case_id)?;
            let delta = live.absorb_refresh(&fetched);
            (!delta.is_empty()).then_some(delta)
        });
        if let Some(delta) = delta {
            info!(
                case_id = %case_id,
                image_added = delta.image_added,
                scenes_added = delta.scenes_added,
                "Merged refreshed case"
            );
        }

        self.session.read(|session| match session.case.as_ref() {
            Some(live) if &live.id == case_id => live.has_crime_scene_image(),
            _ => {
                debug!(case_id = %case_id, "Case no longer active");
                true
            }
        })
    }

    fn finish(&self, token: u64) {
        let mut active = self.lock();
        if active.as_ref().is_some_and(|p| p.token == token) {
            *active = None;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ActivePoll>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
