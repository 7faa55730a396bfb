use tauri::State;

use crate::api::Backend;
use crate::models::Timetable;
use crate::AppState;

use super::{build_schedule, GroupBy, VisualSchedule};

/// Week view for an authenticated timetable.
#[tauri::command]
pub async fn visual_schedule(
    state: State<'_, AppState>,
    id: i64,
    group_by: GroupBy,
    selected: Option<String>,
) -> Result<VisualSchedule, String> {
    let timetable = state.workflow.select(id).await.map_err(|e| e.to_string())?;
    Ok(build_schedule(
        &timetable.periods,
        group_by,
        selected.as_deref(),
    ))
}

/// Anonymous view of a published timetable.
#[tauri::command]
pub async fn public_timetable(
    state: State<'_, AppState>,
    public_url: String,
) -> Result<Timetable, String> {
    state
        .backend
        .public_timetable(&public_url)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn public_visual_schedule(
    state: State<'_, AppState>,
    public_url: String,
    group_by: GroupBy,
    selected: Option<String>,
) -> Result<VisualSchedule, String> {
    let timetable = state
        .backend
        .public_timetable(&public_url)
        .await
        .map_err(|e| e.to_string())?;
    Ok(build_schedule(
        &timetable.periods,
        group_by,
        selected.as_deref(),
    ))
}
