//! Master-data records: the building blocks the generator schedules
//! around. The client treats them as opaque CRUD resources.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: i32,
    #[serde(default)]
    pub available_slots: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub capacity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub id: i64,
    pub name: String,
    pub size: i32,
    pub programme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    pub name: String,
    pub size: i32,
    pub programme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub hours_week: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectInput {
    pub code: String,
    pub name: String,
    pub hours_week: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Faculty {
    pub id: i64,
    pub name: String,
    pub max_day: i32,
    pub max_week: i32,
    pub leave_avg: f64,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyInput {
    pub name: String,
    pub max_day: i32,
    pub max_week: i32,
    pub leave_avg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_ids: Option<Vec<i64>>,
}

/// A slot the generator must leave occupied, e.g. a standing lab block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedSlot {
    pub id: i64,
    pub day: u8,
    pub period: u8,
    #[serde(default)]
    pub room_id: Option<i64>,
    pub batch_id: i64,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub batch: Option<Batch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedSlotInput {
    pub day: u8,
    pub period: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    pub batch_id: i64,
}
