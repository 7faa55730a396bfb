use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Batch, Faculty, Room, Subject};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimetableStatus {
    Draft,
    Pending,
    Approved,
}

impl TimetableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimetableStatus::Draft => "draft",
            TimetableStatus::Pending => "pending",
            TimetableStatus::Approved => "approved",
        }
    }
}

/// One scheduled hour. `day` runs 0–5 (Monday–Saturday), `period_no`
/// 1–8 starting at 08:00. The referenced room/batch/subject/faculty are
/// embedded by value; the client never dereferences ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Period {
    pub id: i64,
    pub timetable_id: i64,
    pub day: u8,
    pub period_no: u8,
    pub room_id: i64,
    pub batch_id: i64,
    pub subject_id: i64,
    pub faculty_id: i64,
    pub room: Room,
    pub batch: Batch,
    pub subject: Subject,
    pub faculty: Faculty,
}

/// A timetable as the server owns it. Everything the client holds is a
/// transient, possibly stale cache of this record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timetable {
    pub id: i64,
    pub version: i32,
    pub status: TimetableStatus,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub approved_by: Option<i64>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub periods: Vec<Period>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstraintSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub solution: String,
}

/// The solver's "no feasible schedule" answer: a headline plus concrete
/// constraint relaxations the user could apply. A legitimate outcome,
/// not a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfeasibilityReport {
    pub error: String,
    pub suggestions: Vec<ConstraintSuggestion>,
}

/// What a generation request can come back with.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum GenerationOutcome {
    Infeasible(InfeasibilityReport),
    Variants(Vec<Timetable>),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Csv => "text/csv",
        }
    }
}

/// Base64-encoded export body as served by the pdf/csv endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPayload {
    pub filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
    pub content: String,
}
