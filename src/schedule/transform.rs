//! Pure projection of a period list into a renderable week.
//!
//! No state, no I/O: the same periods and selection always produce the
//! same schedule. Grouping is keyed by display name, so two entities
//! sharing a name merge into one group, a known limitation of the
//! name-driven selection UI.

use std::collections::BTreeSet;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::Period;

use super::palette;

pub const DAY_NAMES: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Periods start on the hour from 08:00; each slot is one hour.
const FIRST_SLOT_HOUR: u32 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Batch,
    Room,
    Faculty,
}

impl GroupBy {
    fn key_of<'p>(&self, period: &'p Period) -> &'p str {
        match self {
            GroupBy::Batch => &period.batch.name,
            GroupBy::Room => &period.room.name,
            GroupBy::Faculty => &period.faculty.name,
        }
    }
}

/// One rendered calendar block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    /// 0 = Monday … 5 = Saturday; Sunday never appears.
    pub day: u8,
    pub day_name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub color: String,
    pub batch: String,
    pub subject: String,
    pub faculty: String,
    pub room: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualSchedule {
    pub group_by: GroupBy,
    pub group_keys: Vec<String>,
    pub selected: Option<String>,
    pub events: Vec<CalendarEvent>,
}

/// Sorted, de-duplicated display names available under `group_by`.
pub fn group_keys(periods: &[Period], group_by: GroupBy) -> Vec<String> {
    periods
        .iter()
        .map(|p| group_by.key_of(p).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The default selection is the first *batch* key, whatever grouping
/// the caller renders with.
pub fn default_selection(periods: &[Period]) -> Option<String> {
    group_keys(periods, GroupBy::Batch).into_iter().next()
}

/// Build the week view for one group. With no explicit selection the
/// default batch key is used; a selection that matches nothing renders
/// an empty week rather than failing.
pub fn build_schedule(
    periods: &[Period],
    group_by: GroupBy,
    selected: Option<&str>,
) -> VisualSchedule {
    let group_keys = group_keys(periods, group_by);
    let selected = selected
        .map(str::to_string)
        .or_else(|| default_selection(periods));

    let events = match &selected {
        Some(key) => periods
            .iter()
            .filter(|p| group_by.key_of(p) == key)
            .map(period_event)
            .collect(),
        None => Vec::new(),
    };

    VisualSchedule {
        group_by,
        group_keys,
        selected,
        events,
    }
}

fn period_event(period: &Period) -> CalendarEvent {
    // Out-of-range days render on Monday; the generator owns validity
    // and the viewer just shows something sensible.
    let day = if usize::from(period.day) < DAY_NAMES.len() {
        period.day
    } else {
        0
    };

    let (start, end) = slot_times(period.period_no);

    CalendarEvent {
        id: period.id,
        title: format!("{} - {}", period.subject.code, period.faculty.name),
        day,
        day_name: DAY_NAMES[usize::from(day)].to_string(),
        start,
        end,
        color: palette::color_for(&period.batch.name).to_string(),
        batch: period.batch.name.clone(),
        subject: period.subject.name.clone(),
        faculty: period.faculty.name.clone(),
        room: period.room.name.clone(),
    }
}

/// `08:00 + (period_no - 1)` hours, one hour long. A period number
/// whose slot would leave the clock falls back to the first slot.
fn slot_times(period_no: u8) -> (NaiveTime, NaiveTime) {
    let start_hour = FIRST_SLOT_HOUR + u32::from(period_no).saturating_sub(1);
    match (
        NaiveTime::from_hms_opt(start_hour, 0, 0),
        NaiveTime::from_hms_opt(start_hour + 1, 0, 0),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => (
            NaiveTime::from_hms_opt(FIRST_SLOT_HOUR, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(FIRST_SLOT_HOUR + 1, 0, 0).unwrap(),
        ),
    }
}
