//! Wire models for the timetable service.
//!
//! Field names match the server's JSON verbatim (snake_case), so these
//! types double as the transport schema. UI-only payloads live next to
//! the component that produces them and use camelCase instead.

mod masters;
mod timetable;
mod user;

pub use masters::{
    Batch, BatchInput, Faculty, FacultyInput, FixedSlot, FixedSlotInput, Room, RoomInput, Subject,
    SubjectInput,
};
pub use timetable::{
    ConstraintSuggestion, ExportFormat, ExportPayload, GenerationOutcome, InfeasibilityReport,
    Period, Timetable, TimetableStatus,
};
pub use user::{Role, User};
