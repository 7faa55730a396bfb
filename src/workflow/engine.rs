use std::sync::{Arc, RwLock};

use log::{error, info};

use crate::api::Backend;
use crate::error::{Error, Result};
use crate::models::{Timetable, TimetableStatus};
use crate::session::SessionStore;

use super::machine::{self, TransitionEvent};

#[derive(Default)]
struct QueueState {
    timetables: Vec<Timetable>,
    selected: Option<Timetable>,
}

struct EngineInner {
    backend: Arc<dyn Backend>,
    session: SessionStore,
    state: RwLock<QueueState>,
}

/// Drives the approval workflow against the server's authoritative
/// state.
///
/// Transitions are never applied optimistically: the engine sends the
/// request, then refreshes its cached list whether the request
/// succeeded or not, so the views always converge on what the server
/// decided, including the case where another approver got there
/// first.
#[derive(Clone)]
pub struct WorkflowEngine {
    inner: Arc<EngineInner>,
}

impl WorkflowEngine {
    pub fn new(backend: Arc<dyn Backend>, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                backend,
                session,
                state: RwLock::new(QueueState::default()),
            }),
        }
    }

    fn token(&self) -> Result<String> {
        self.inner
            .session
            .token()
            .ok_or_else(|| Error::validation("not signed in"))
    }

    /// Whether the signed-in role may trigger `event`. UI enablement
    /// only; the server still arbitrates the real transition.
    pub fn permits(&self, event: TransitionEvent) -> bool {
        self.inner
            .session
            .role()
            .map(|role| machine::permitted(role, event))
            .unwrap_or(false)
    }

    /// Reload the cached list. A selection whose record disappeared or
    /// changed status while we were away is dropped.
    pub async fn refresh(&self, status: Option<TimetableStatus>) -> Result<Vec<Timetable>> {
        let token = self.token()?;
        let timetables = self.inner.backend.list_timetables(&token, status).await?;

        let mut state = self.inner.state.write().unwrap();
        if let Some(selected) = &state.selected {
            let still_there = timetables
                .iter()
                .any(|t| t.id == selected.id && t.status == selected.status);
            if !still_there {
                info!("selection #{} is stale, clearing", selected.id);
                state.selected = None;
            }
        }
        state.timetables = timetables.clone();
        Ok(timetables)
    }

    pub fn pending(&self) -> Vec<Timetable> {
        self.filtered(TimetableStatus::Pending)
    }

    pub fn approved(&self) -> Vec<Timetable> {
        self.filtered(TimetableStatus::Approved)
    }

    pub fn drafts(&self) -> Vec<Timetable> {
        self.filtered(TimetableStatus::Draft)
    }

    fn filtered(&self, status: TimetableStatus) -> Vec<Timetable> {
        self.inner
            .state
            .read()
            .unwrap()
            .timetables
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    /// Fetch the full record (including periods) and make it the
    /// current selection.
    pub async fn select(&self, id: i64) -> Result<Timetable> {
        let token = self.token()?;
        let timetable = self.inner.backend.get_timetable(&token, id).await?;
        self.inner.state.write().unwrap().selected = Some(timetable.clone());
        Ok(timetable)
    }

    pub fn selected(&self) -> Option<Timetable> {
        self.inner.state.read().unwrap().selected.clone()
    }

    /// Hand a draft to the approval queue.
    pub async fn send_for_approval(&self, id: i64) -> Result<Timetable> {
        let token = self.token()?;
        let result = self.inner.backend.send_for_approval(&token, id).await;
        self.refresh_after_attempt().await;
        let timetable = result?;
        info!("timetable #{id} sent for approval");
        Ok(timetable)
    }

    /// Approve or reject a pending timetable. The comment is optional
    /// either way; rejection returns the record to draft.
    pub async fn decide(
        &self,
        id: i64,
        approved: bool,
        comment: Option<String>,
    ) -> Result<Timetable> {
        let token = self.token()?;
        let result = self
            .inner
            .backend
            .decide_approval(&token, id, approved, comment)
            .await;
        self.refresh_after_attempt().await;
        let timetable = result?;
        info!(
            "timetable #{id} {}",
            if approved { "approved" } else { "rejected" }
        );
        Ok(timetable)
    }

    // The list is reloaded after every transition attempt, success or
    // failure, so a rejected request still leaves the view showing the
    // server's state.
    async fn refresh_after_attempt(&self) {
        if let Err(err) = self.refresh(None).await {
            error!("failed to refresh timetables after transition: {err}");
        }
    }
}
