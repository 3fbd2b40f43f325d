use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use std::sync::Mutex;

use crate::api_json::handlers::{
    file_activate_handler, file_delete_handler, file_get_handler, files_list_handler, help_handler,
    schedule_grouped_handler, schedule_handler, schedule_meta_handler, upload_schedule_handler,
};
use crate::config::AppConfig;
use crate::excel::ScheduleParser;
use crate::storage::ScheduleStore;

/// Shared state of the HTTP service.
pub struct AppState {
    pub store: Mutex<ScheduleStore>,
    /// Held for the whole of an upload so that uploads never interleave.
    pub upload_lock: tokio::sync::Mutex<()>,
    pub parser: ScheduleParser,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: ScheduleStore, config: &AppConfig) -> Self {
        AppState {
            store: Mutex::new(store),
            upload_lock: tokio::sync::Mutex::new(()),
            parser: ScheduleParser::new(config.parser.clone()),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Registers every route; shared by `run_server` and the handler tests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/schedule/upload", web::post().to(upload_schedule_handler))
        .route("/schedule", web::get().to(schedule_handler))
        .route("/schedule/grouped", web::get().to(schedule_grouped_handler))
        .route("/schedule/meta", web::get().to(schedule_meta_handler))
        .route("/schedule/files", web::get().to(files_list_handler))
        .route("/schedule/files/{id}", web::get().to(file_get_handler))
        .route("/schedule/files/{id}", web::delete().to(file_delete_handler))
        .route("/schedule/files/{id}/activate", web::post().to(file_activate_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let store = ScheduleStore::open(&config.db_path)
        .map_err(|e| std::io::Error::other(format!("failed to open schedule store: {}", e)))?;
    let state = web::Data::new(AppState::new(store, &config));
    let origin = config.allowed_origin.clone();
    // multipart streams are capped by the handler; the payload config covers plain bodies
    let payload_limit = config.max_upload_bytes;

    info!("listening on http://{} (CORS origin {})", config.bind, origin);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&origin)
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allow_any_header()
            .max_age(3600);
        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(payload_limit))
            .configure(configure_routes)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
