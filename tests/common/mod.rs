//! In-memory timetable service for driving the client components
//! without a network.
//!
//! Tokens are derived from the account email, codes are checked against
//! a single configured value, and every call is appended to a log so
//! tests can assert which operations did (or did not) reach the
//! service.

// Not every test crate uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use tempfile::TempDir;

use timegrid_lib::api::Backend;
use timegrid_lib::error::{Error, Result};
use timegrid_lib::generator::GenerationCoordinator;
use timegrid_lib::models::{
    Batch, ConstraintSuggestion, ExportFormat, ExportPayload, Faculty, GenerationOutcome,
    InfeasibilityReport, Period, Role, Room, Subject, Timetable, TimetableStatus, User,
};
use timegrid_lib::session::SessionStore;
use timegrid_lib::workflow::WorkflowEngine;

pub const VALID_CODE: &str = "482913";

pub struct ServiceState {
    pub accounts: Vec<User>,
    pub timetables: Vec<Timetable>,
    pub next_id: i64,
    pub infeasible: bool,
    pub calls: Vec<&'static str>,
}

pub struct FakeService {
    pub state: Mutex<ServiceState>,
    pub verify_delay: Option<Duration>,
}

impl FakeService {
    fn base() -> Self {
        Self {
            state: Mutex::new(ServiceState {
                accounts: vec![
                    account(1, "scheduler@uni.edu", Role::Scheduler),
                    account(2, "approver@uni.edu", Role::Approver),
                    account(3, "student@uni.edu", Role::Readonly),
                ],
                timetables: Vec::new(),
                next_id: 1,
                infeasible: false,
                calls: Vec::new(),
            }),
            verify_delay: None,
        }
    }

    pub fn new() -> Arc<Self> {
        Arc::new(Self::base())
    }

    pub fn with_verify_delay(delay: Duration) -> Arc<Self> {
        let mut service = Self::base();
        service.verify_delay = Some(delay);
        Arc::new(service)
    }

    pub fn mark_infeasible(&self) {
        self.state.lock().unwrap().infeasible = true;
    }

    /// Insert a timetable directly, bypassing the workflow, for
    /// setting up approval scenarios.
    pub fn seed_timetable(&self, status: TimetableStatus) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        let timetable = Timetable {
            id,
            version: 1,
            status,
            created_by: 1,
            created_at: Utc::now(),
            approved_by: None,
            approved_at: None,
            comment: None,
            public_url: None,
            periods: sample_periods(id),
        };
        state.timetables.push(timetable);
        id
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn status_of(&self, id: i64) -> Option<TimetableStatus> {
        self.state
            .lock()
            .unwrap()
            .timetables
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.status)
    }

    fn log(&self, call: &'static str) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn account_for_token(&self, token: &str) -> Result<User> {
        self.state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|user| token == format!("tok-{}", user.email))
            .cloned()
            .ok_or_else(|| Error::backend(Some(401), "Could not validate credentials"))
    }

    fn require_role(&self, token: &str, role: Role) -> Result<User> {
        let user = self.account_for_token(token)?;
        if user.role != role {
            return Err(Error::backend(Some(403), "Not enough permissions"));
        }
        Ok(user)
    }
}

fn account(id: i64, email: &str, role: Role) -> User {
    User {
        id,
        email: email.to_string(),
        role,
        is_active: true,
        created_at: Some(Utc::now()),
    }
}

pub fn sample_periods(timetable_id: i64) -> Vec<Period> {
    let room = Room {
        id: 1,
        name: "LH-101".to_string(),
        kind: "lecture".to_string(),
        capacity: 60,
        available_slots: None,
    };
    let batch = Batch {
        id: 1,
        name: "CSE-A".to_string(),
        size: 60,
        programme: "B.Tech CSE".to_string(),
    };
    let subject = Subject {
        id: 1,
        code: "CS101".to_string(),
        name: "Data Structures".to_string(),
        hours_week: 3,
        kind: "lecture".to_string(),
        semester: 4,
    };
    let faculty = Faculty {
        id: 1,
        name: "Dr. Rao".to_string(),
        max_day: 4,
        max_week: 18,
        leave_avg: 0.1,
        subjects: vec![],
    };

    (1..=2)
        .map(|n| Period {
            id: timetable_id * 10 + n as i64,
            timetable_id,
            day: 0,
            period_no: n,
            room_id: room.id,
            batch_id: batch.id,
            subject_id: subject.id,
            faculty_id: faculty.id,
            room: room.clone(),
            batch: batch.clone(),
            subject: subject.clone(),
            faculty: faculty.clone(),
        })
        .collect()
}

#[async_trait]
impl Backend for FakeService {
    async fn request_login_code(&self, email: &str) -> Result<()> {
        self.log("request_login_code");
        let known = self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .any(|user| user.email == email);
        if !known {
            return Err(Error::backend(Some(404), "No account with this email"));
        }
        Ok(())
    }

    async fn verify_login_code(&self, email: &str, code: &str) -> Result<String> {
        if let Some(delay) = self.verify_delay {
            tokio::time::sleep(delay).await;
        }
        self.log("verify_login_code");
        if code != VALID_CODE {
            return Err(Error::InvalidCode);
        }
        Ok(format!("tok-{email}"))
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        self.log("current_user");
        self.account_for_token(token)
    }

    async fn generate_timetables(
        &self,
        token: &str,
        num_variants: u32,
    ) -> Result<GenerationOutcome> {
        self.log("generate_timetables");
        let creator = self.require_role(token, Role::Scheduler)?;

        let mut state = self.state.lock().unwrap();
        if state.infeasible {
            return Ok(GenerationOutcome::Infeasible(InfeasibilityReport {
                error: "No feasible timetable found".to_string(),
                suggestions: vec![ConstraintSuggestion {
                    kind: "faculty_overload".to_string(),
                    message: "Dr. Rao exceeds the weekly limit".to_string(),
                    solution: "Raise max_week or add faculty".to_string(),
                }],
            }));
        }

        let mut variants = Vec::new();
        for version in 1..=num_variants {
            let id = state.next_id;
            state.next_id += 1;
            let timetable = Timetable {
                id,
                version: version as i32,
                status: TimetableStatus::Draft,
                created_by: creator.id,
                created_at: Utc::now(),
                approved_by: None,
                approved_at: None,
                comment: None,
                public_url: None,
                periods: sample_periods(id),
            };
            state.timetables.push(timetable.clone());
            variants.push(timetable);
        }
        Ok(GenerationOutcome::Variants(variants))
    }

    async fn list_timetables(
        &self,
        token: &str,
        status: Option<TimetableStatus>,
    ) -> Result<Vec<Timetable>> {
        self.log("list_timetables");
        self.account_for_token(token)?;
        let state = self.state.lock().unwrap();
        Ok(state
            .timetables
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect())
    }

    async fn get_timetable(&self, token: &str, id: i64) -> Result<Timetable> {
        self.log("get_timetable");
        self.account_for_token(token)?;
        self.state
            .lock()
            .unwrap()
            .timetables
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Error::backend(Some(404), "Timetable not found"))
    }

    async fn send_for_approval(&self, token: &str, id: i64) -> Result<Timetable> {
        self.log("send_for_approval");
        self.require_role(token, Role::Scheduler)?;
        let mut state = self.state.lock().unwrap();
        let timetable = state
            .timetables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::backend(Some(404), "Timetable not found"))?;
        if timetable.status != TimetableStatus::Draft {
            return Err(Error::backend(
                Some(400),
                format!("Timetable is already in {} status", timetable.status.as_str()),
            ));
        }
        timetable.status = TimetableStatus::Pending;
        Ok(timetable.clone())
    }

    async fn decide_approval(
        &self,
        token: &str,
        id: i64,
        approved: bool,
        comment: Option<String>,
    ) -> Result<Timetable> {
        self.log("decide_approval");
        let approver = self.require_role(token, Role::Approver)?;
        let mut state = self.state.lock().unwrap();
        let timetable = state
            .timetables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::backend(Some(404), "Timetable not found"))?;
        if timetable.status != TimetableStatus::Pending {
            return Err(Error::backend(
                Some(400),
                format!(
                    "Timetable is in {} status, not pending",
                    timetable.status.as_str()
                ),
            ));
        }
        timetable.comment = comment;
        timetable.approved_by = Some(approver.id);
        if approved {
            timetable.status = TimetableStatus::Approved;
            timetable.approved_at = Some(Utc::now());
            timetable.public_url = Some(format!("shared-{id}"));
        } else {
            timetable.status = TimetableStatus::Draft;
        }
        Ok(timetable.clone())
    }

    async fn export_timetable(
        &self,
        token: Option<&str>,
        id: i64,
        format: ExportFormat,
    ) -> Result<ExportPayload> {
        self.log("export_timetable");
        if let Some(token) = token {
            self.account_for_token(token)?;
        }
        let state = self.state.lock().unwrap();
        let timetable = state
            .timetables
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::backend(Some(404), "Timetable not found"))?;
        if token.is_none() && timetable.status != TimetableStatus::Approved {
            return Err(Error::backend(Some(404), "Published timetable not found"));
        }
        Ok(ExportPayload {
            filename: format!("timetable_{id}.{}", format.as_str()),
            content_type: Some(format.mime_type().to_string()),
            content: STANDARD.encode(format!("export of timetable {id}")),
        })
    }

    async fn public_timetable(&self, public_url: &str) -> Result<Timetable> {
        self.log("public_timetable");
        self.state
            .lock()
            .unwrap()
            .timetables
            .iter()
            .find(|t| {
                t.public_url.as_deref() == Some(public_url)
                    && t.status == TimetableStatus::Approved
            })
            .cloned()
            .ok_or_else(|| Error::backend(Some(404), "Published timetable not found"))
    }
}

/// The assembled client core: session, generator, and workflow over one
/// fake service. The temp dir keeps the credential file alive for the
/// test's duration.
pub struct TestHarness {
    pub service: Arc<FakeService>,
    pub session: SessionStore,
    pub generator: GenerationCoordinator,
    pub workflow: WorkflowEngine,
    #[allow(dead_code)]
    pub dir: TempDir,
}

pub fn harness() -> TestHarness {
    harness_with(FakeService::new())
}

pub fn harness_with(service: Arc<FakeService>) -> TestHarness {
    let dir = tempfile::tempdir().expect("temp dir");
    let backend: Arc<dyn Backend> = service.clone();
    let session = SessionStore::new(dir.path().join("session.json"), backend.clone());
    TestHarness {
        generator: GenerationCoordinator::new(backend.clone(), session.clone()),
        workflow: WorkflowEngine::new(backend, session.clone()),
        service,
        session,
        dir,
    }
}

pub async fn sign_in(harness: &TestHarness, email: &str) -> User {
    harness
        .session
        .verify_code(email, VALID_CODE)
        .await
        .expect("sign in")
}
