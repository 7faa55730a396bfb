use serde::Serialize;
use tauri::{Emitter, State};

use crate::models::User;
use crate::notify::Navigation;
use crate::AppState;

use super::SessionSnapshot;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOutcome {
    pub user: User,
    pub navigate: Navigation,
}

fn emit_session_changed(app: &tauri::AppHandle, snapshot: &SessionSnapshot) {
    let _ = app.emit("session-changed", snapshot);
}

#[tauri::command]
pub async fn request_login_code(
    state: State<'_, AppState>,
    email: String,
) -> Result<(), String> {
    state
        .session
        .request_code(&email)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn verify_login_code(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    email: String,
    code: String,
) -> Result<VerifyOutcome, String> {
    let user = state
        .session
        .verify_code(&email, &code)
        .await
        .map_err(|e| e.to_string())?;

    emit_session_changed(&app, &state.session.snapshot());

    // The store only authenticates; where to land is decided here.
    Ok(VerifyOutcome {
        navigate: Navigation::for_role(user.role),
        user,
    })
}

#[tauri::command]
pub async fn restore_session(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    Ok(state.session.restore().await)
}

#[tauri::command]
pub async fn current_session(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    Ok(state.session.snapshot())
}

#[tauri::command]
pub async fn logout(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
) -> Result<Navigation, String> {
    state.session.logout();
    emit_session_changed(&app, &state.session.snapshot());
    Ok(Navigation::Login)
}
