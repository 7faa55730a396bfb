//! Master-data CRUD pass-through. No client-side logic beyond
//! serialization and the bearer token; the server validates everything.

use tauri::State;

use crate::models::{
    Batch, BatchInput, Faculty, FacultyInput, FixedSlot, FixedSlotInput, Room, RoomInput, Subject,
    SubjectInput,
};
use crate::AppState;

fn token(state: &State<'_, AppState>) -> Result<String, String> {
    state.session.token().ok_or_else(|| "not signed in".to_string())
}

#[tauri::command]
pub async fn list_rooms(state: State<'_, AppState>) -> Result<Vec<Room>, String> {
    let token = token(&state)?;
    state.api.list_rooms(&token).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_room(state: State<'_, AppState>, input: RoomInput) -> Result<Room, String> {
    let token = token(&state)?;
    state
        .api
        .create_room(&token, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_room(
    state: State<'_, AppState>,
    id: i64,
    input: RoomInput,
) -> Result<Room, String> {
    let token = token(&state)?;
    state
        .api
        .update_room(&token, id, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_room(state: State<'_, AppState>, id: i64) -> Result<(), String> {
    let token = token(&state)?;
    state
        .api
        .delete_room(&token, id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_faculty(state: State<'_, AppState>) -> Result<Vec<Faculty>, String> {
    let token = token(&state)?;
    state
        .api
        .list_faculty(&token)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_faculty(
    state: State<'_, AppState>,
    input: FacultyInput,
) -> Result<Faculty, String> {
    let token = token(&state)?;
    state
        .api
        .create_faculty(&token, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_faculty(
    state: State<'_, AppState>,
    id: i64,
    input: FacultyInput,
) -> Result<Faculty, String> {
    let token = token(&state)?;
    state
        .api
        .update_faculty(&token, id, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_faculty(state: State<'_, AppState>, id: i64) -> Result<(), String> {
    let token = token(&state)?;
    state
        .api
        .delete_faculty(&token, id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_batches(state: State<'_, AppState>) -> Result<Vec<Batch>, String> {
    let token = token(&state)?;
    state
        .api
        .list_batches(&token)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_batch(state: State<'_, AppState>, input: BatchInput) -> Result<Batch, String> {
    let token = token(&state)?;
    state
        .api
        .create_batch(&token, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_batch(
    state: State<'_, AppState>,
    id: i64,
    input: BatchInput,
) -> Result<Batch, String> {
    let token = token(&state)?;
    state
        .api
        .update_batch(&token, id, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_batch(state: State<'_, AppState>, id: i64) -> Result<(), String> {
    let token = token(&state)?;
    state
        .api
        .delete_batch(&token, id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_subjects(state: State<'_, AppState>) -> Result<Vec<Subject>, String> {
    let token = token(&state)?;
    state
        .api
        .list_subjects(&token)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_subject(
    state: State<'_, AppState>,
    input: SubjectInput,
) -> Result<Subject, String> {
    let token = token(&state)?;
    state
        .api
        .create_subject(&token, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_subject(
    state: State<'_, AppState>,
    id: i64,
    input: SubjectInput,
) -> Result<Subject, String> {
    let token = token(&state)?;
    state
        .api
        .update_subject(&token, id, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_subject(state: State<'_, AppState>, id: i64) -> Result<(), String> {
    let token = token(&state)?;
    state
        .api
        .delete_subject(&token, id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_fixed_slots(state: State<'_, AppState>) -> Result<Vec<FixedSlot>, String> {
    let token = token(&state)?;
    state
        .api
        .list_fixed_slots(&token)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_fixed_slot(
    state: State<'_, AppState>,
    input: FixedSlotInput,
) -> Result<FixedSlot, String> {
    let token = token(&state)?;
    state
        .api
        .create_fixed_slot(&token, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn update_fixed_slot(
    state: State<'_, AppState>,
    id: i64,
    input: FixedSlotInput,
) -> Result<FixedSlot, String> {
    let token = token(&state)?;
    state
        .api
        .update_fixed_slot(&token, id, &input)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn delete_fixed_slot(state: State<'_, AppState>, id: i64) -> Result<(), String> {
    let token = token(&state)?;
    state
        .api
        .delete_fixed_slot(&token, id)
        .await
        .map_err(|e| e.to_string())
}
