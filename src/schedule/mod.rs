pub(crate) mod commands;
pub mod palette;
mod transform;

pub use transform::{
    build_schedule, default_selection, group_keys, CalendarEvent, GroupBy, VisualSchedule,
};
