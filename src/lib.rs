pub mod api;
pub mod artifacts;
pub mod error;
pub mod generator;
pub mod masters;
pub mod models;
pub mod notify;
pub mod schedule;
pub mod session;
pub mod workflow;

use std::sync::Arc;

use log::info;
use tauri::Manager;

use api::{Backend, HttpBackend};
use artifacts::{
    commands::{export_timetable, save_artifact},
    ArtifactDownloader,
};
use generator::{
    commands::{
        clear_variants, generate_timetables, generator_snapshot, send_variant_for_approval,
        set_active_variant,
    },
    GenerationCoordinator,
};
use masters::commands::{
    create_batch, create_faculty, create_fixed_slot, create_room, create_subject, delete_batch,
    delete_faculty, delete_fixed_slot, delete_room, delete_subject, list_batches, list_faculty,
    list_fixed_slots, list_rooms, list_subjects, update_batch, update_faculty, update_fixed_slot,
    update_room, update_subject,
};
use schedule::commands::{public_timetable, public_visual_schedule, visual_schedule};
use session::{
    commands::{current_session, logout, request_login_code, restore_session, verify_login_code},
    SessionStore,
};
use workflow::{
    commands::{
        decide_timetable, list_approved_timetables, list_draft_timetables,
        list_pending_timetables, refresh_timetables, select_timetable,
        send_timetable_for_approval, transition_permitted,
    },
    WorkflowEngine,
};

pub(crate) struct AppState {
    pub(crate) session: SessionStore,
    /// The service behind the core components, as a seam.
    pub(crate) backend: Arc<dyn Backend>,
    /// The same service, concrete, for the master-data pass-through.
    pub(crate) api: HttpBackend,
    pub(crate) generator: GenerationCoordinator,
    pub(crate) workflow: WorkflowEngine,
    pub(crate) downloads: ArtifactDownloader,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("TimeGrid starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let http = HttpBackend::from_env();
                let backend: Arc<dyn Backend> = Arc::new(http.clone());

                let session =
                    SessionStore::new(app_data_dir.join("session.json"), backend.clone());

                // Re-validate any credential left over from the last
                // run; a rejected token just means an anonymous start.
                {
                    let session_for_restore = session.clone();
                    tauri::async_runtime::block_on(async move {
                        let snapshot = session_for_restore.restore().await;
                        match snapshot.user {
                            Some(user) => info!("restored session for {}", user.email),
                            None => info!("no stored session, starting anonymous"),
                        }
                    });
                }

                let downloads_dir = app
                    .path()
                    .download_dir()
                    .unwrap_or_else(|_| app_data_dir.join("exports"));

                app.manage(AppState {
                    generator: GenerationCoordinator::new(backend.clone(), session.clone()),
                    workflow: WorkflowEngine::new(backend.clone(), session.clone()),
                    downloads: ArtifactDownloader::new(downloads_dir),
                    api: http,
                    backend,
                    session,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            // session
            request_login_code,
            verify_login_code,
            restore_session,
            current_session,
            logout,
            // generation
            generate_timetables,
            set_active_variant,
            generator_snapshot,
            clear_variants,
            send_variant_for_approval,
            // approval workflow
            refresh_timetables,
            list_pending_timetables,
            list_approved_timetables,
            list_draft_timetables,
            select_timetable,
            transition_permitted,
            decide_timetable,
            send_timetable_for_approval,
            // schedule views
            visual_schedule,
            public_timetable,
            public_visual_schedule,
            // exports
            export_timetable,
            save_artifact,
            // master data
            list_rooms,
            create_room,
            update_room,
            delete_room,
            list_faculty,
            create_faculty,
            update_faculty,
            delete_faculty,
            list_batches,
            create_batch,
            update_batch,
            delete_batch,
            list_subjects,
            create_subject,
            update_subject,
            delete_subject,
            list_fixed_slots,
            create_fixed_slot,
            update_fixed_slot,
            delete_fixed_slot,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
