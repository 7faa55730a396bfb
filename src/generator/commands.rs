use serde::Serialize;
use tauri::State;

use crate::models::Timetable;
use crate::notify::{Navigation, Notification};
use crate::AppState;

use super::GeneratorSnapshot;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalHandoff {
    pub timetable: Timetable,
    pub notification: Notification,
    pub navigate: Navigation,
}

#[tauri::command]
pub async fn generate_timetables(
    state: State<'_, AppState>,
    num_variants: u32,
) -> Result<GeneratorSnapshot, String> {
    state
        .generator
        .generate(num_variants)
        .await
        .map_err(|e| e.to_string())?;
    Ok(state.generator.snapshot())
}

#[tauri::command]
pub async fn set_active_variant(state: State<'_, AppState>, index: usize) -> Result<(), String> {
    state.generator.set_active(index).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn generator_snapshot(
    state: State<'_, AppState>,
) -> Result<GeneratorSnapshot, String> {
    Ok(state.generator.snapshot())
}

#[tauri::command]
pub async fn clear_variants(state: State<'_, AppState>) -> Result<(), String> {
    state.generator.clear();
    Ok(())
}

/// Hand the chosen variant to the approval workflow, then leave the
/// generator view: variants are cleared and the caller is pointed back
/// at the dashboard with a success notification.
#[tauri::command]
pub async fn send_variant_for_approval(
    state: State<'_, AppState>,
    id: i64,
) -> Result<ApprovalHandoff, String> {
    let timetable = state
        .workflow
        .send_for_approval(id)
        .await
        .map_err(|e| e.to_string())?;

    state.generator.clear();

    Ok(ApprovalHandoff {
        notification: Notification::success(format!(
            "Timetable #{} sent for approval successfully!",
            timetable.id
        )),
        navigate: Navigation::Dashboard,
        timetable,
    })
}
