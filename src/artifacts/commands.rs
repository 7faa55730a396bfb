use tauri::State;

use crate::api::Backend;
use crate::models::ExportFormat;
use crate::AppState;

use super::SavedArtifact;

/// Fetch a rendered export and save it locally. Published timetables
/// export without a session; everything else sends the bearer token.
#[tauri::command]
pub async fn export_timetable(
    state: State<'_, AppState>,
    id: i64,
    format: ExportFormat,
) -> Result<SavedArtifact, String> {
    let token = state.session.token();
    let payload = state
        .backend
        .export_timetable(token.as_deref(), id, format)
        .await
        .map_err(|e| e.to_string())?;

    let mime_type = payload
        .content_type
        .unwrap_or_else(|| format.mime_type().to_string());

    let saved = state
        .downloads
        .save(&payload.content, &payload.filename, &mime_type)
        .map_err(|e| e.to_string())?;

    // Point the file manager at the fresh download.
    if let Err(err) = tauri_plugin_opener::reveal_item_in_dir(&saved.path) {
        log::warn!("could not reveal {}: {err}", saved.path.display());
    }

    Ok(saved)
}

/// Save an already-fetched payload, e.g. from a view that batched the
/// export call itself.
#[tauri::command]
pub async fn save_artifact(
    state: State<'_, AppState>,
    content: String,
    filename: String,
    mime_type: String,
) -> Result<SavedArtifact, String> {
    state
        .downloads
        .save(&content, &filename, &mime_type)
        .map_err(|e| e.to_string())
}
