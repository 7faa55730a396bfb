use std::sync::{Arc, RwLock};

use log::info;
use serde::Serialize;

use crate::api::Backend;
use crate::error::{Error, Result};
use crate::models::{GenerationOutcome, InfeasibilityReport, Timetable};
use crate::session::SessionStore;

#[derive(Default)]
struct GeneratorState {
    variants: Vec<Timetable>,
    active: usize,
    infeasibility: Option<InfeasibilityReport>,
}

/// UI-facing view of the generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSnapshot {
    pub variants: Vec<Timetable>,
    pub active: usize,
    pub infeasibility: Option<InfeasibilityReport>,
}

struct CoordinatorInner {
    backend: Arc<dyn Backend>,
    session: SessionStore,
    state: RwLock<GeneratorState>,
}

/// Runs generation requests and holds the resulting candidate variants.
///
/// An infeasible run is a first-class outcome carrying the solver's
/// relaxation suggestions; it replaces the variant list rather than
/// erroring. Variant switching and clearing are purely local.
#[derive(Clone)]
pub struct GenerationCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl GenerationCoordinator {
    pub fn new(backend: Arc<dyn Backend>, session: SessionStore) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                backend,
                session,
                state: RwLock::new(GeneratorState::default()),
            }),
        }
    }

    /// Request `count` candidate schedules. The UI offers 1–5 but the
    /// coordinator only insists on a positive count.
    pub async fn generate(&self, count: u32) -> Result<GenerationOutcome> {
        if count == 0 {
            return Err(Error::validation("variant count must be at least 1"));
        }
        let token = self
            .inner
            .session
            .token()
            .ok_or_else(|| Error::validation("not signed in"))?;

        let outcome = self
            .inner
            .backend
            .generate_timetables(&token, count)
            .await?;

        let mut state = self.inner.state.write().unwrap();
        match &outcome {
            GenerationOutcome::Variants(variants) => {
                info!("generated {} variant(s)", variants.len());
                state.variants = variants.clone();
                state.active = 0;
                state.infeasibility = None;
            }
            GenerationOutcome::Infeasible(report) => {
                info!(
                    "generation infeasible: {} ({} suggestion(s))",
                    report.error,
                    report.suggestions.len()
                );
                state.variants.clear();
                state.active = 0;
                state.infeasibility = Some(report.clone());
            }
        }
        Ok(outcome)
    }

    /// Switch the active variant. Local state only; never a request.
    pub fn set_active(&self, index: usize) -> Result<()> {
        let mut state = self.inner.state.write().unwrap();
        if index >= state.variants.len() {
            return Err(Error::validation(format!(
                "variant index {index} out of range ({} available)",
                state.variants.len()
            )));
        }
        state.active = index;
        Ok(())
    }

    pub fn active_variant(&self) -> Option<Timetable> {
        let state = self.inner.state.read().unwrap();
        state.variants.get(state.active).cloned()
    }

    pub fn snapshot(&self) -> GeneratorSnapshot {
        let state = self.inner.state.read().unwrap();
        GeneratorSnapshot {
            variants: state.variants.clone(),
            active: state.active,
            infeasibility: state.infeasibility.clone(),
        }
    }

    /// Drop all local generator state. Never observable as a network
    /// call.
    pub fn clear(&self) {
        let mut state = self.inner.state.write().unwrap();
        *state = GeneratorState::default();
    }
}
