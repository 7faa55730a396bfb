use serde::Serialize;
use tauri::State;

use crate::models::{Timetable, TimetableStatus};
use crate::notify::Notification;
use crate::AppState;

use super::TransitionEvent;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub timetable: Timetable,
    pub notification: Notification,
}

#[tauri::command]
pub async fn refresh_timetables(
    state: State<'_, AppState>,
    status: Option<TimetableStatus>,
) -> Result<Vec<Timetable>, String> {
    state
        .workflow
        .refresh(status)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_pending_timetables(state: State<'_, AppState>) -> Result<Vec<Timetable>, String> {
    Ok(state.workflow.pending())
}

#[tauri::command]
pub async fn list_approved_timetables(
    state: State<'_, AppState>,
) -> Result<Vec<Timetable>, String> {
    Ok(state.workflow.approved())
}

#[tauri::command]
pub async fn list_draft_timetables(state: State<'_, AppState>) -> Result<Vec<Timetable>, String> {
    Ok(state.workflow.drafts())
}

#[tauri::command]
pub async fn select_timetable(
    state: State<'_, AppState>,
    id: i64,
) -> Result<Timetable, String> {
    state.workflow.select(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn transition_permitted(
    state: State<'_, AppState>,
    event: TransitionEvent,
) -> Result<bool, String> {
    Ok(state.workflow.permits(event))
}

#[tauri::command]
pub async fn decide_timetable(
    state: State<'_, AppState>,
    id: i64,
    approved: bool,
    comment: Option<String>,
) -> Result<DecisionOutcome, String> {
    let timetable = state
        .workflow
        .decide(id, approved, comment)
        .await
        .map_err(|e| e.to_string())?;

    let notification = if approved {
        Notification::success("Timetable approved successfully")
    } else {
        Notification::info("Timetable rejected")
    };

    Ok(DecisionOutcome {
        timetable,
        notification,
    })
}

/// Send-for-approval as invoked from a plain timetable view (the
/// generator has its own wrapper that also clears the variant list).
#[tauri::command]
pub async fn send_timetable_for_approval(
    state: State<'_, AppState>,
    id: i64,
) -> Result<DecisionOutcome, String> {
    let timetable = state
        .workflow
        .send_for_approval(id)
        .await
        .map_err(|e| e.to_string())?;

    Ok(DecisionOutcome {
        notification: Notification::success(format!(
            "Timetable #{} sent for approval successfully!",
            timetable.id
        )),
        timetable,
    })
}
