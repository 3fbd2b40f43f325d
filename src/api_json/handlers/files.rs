use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::with_store;
use crate::server::AppState;

pub async fn files_list_handler(state: web::Data<AppState>) -> impl Responder {
    match with_store(&state, |store| store.list_files()) {
        Ok(files) => HttpResponse::Ok().json(json!({"files": files})),
        Err(resp) => resp,
    }
}

pub async fn file_get_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match with_store(&state, |store| store.get_file(&id)) {
        Ok(Some(file)) => HttpResponse::Ok().json(file),
        Ok(None) => HttpResponse::NotFound().json(json!({"error": format!("file '{}' not found", id)})),
        Err(resp) => resp,
    }
}

/// POST /schedule/files/{id}/activate
pub async fn file_activate_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match with_store(&state, |store| store.activate_file(&id)) {
        Ok(Some(lessons)) => HttpResponse::Ok().json(json!({"status": "activated", "id": id, "lessonCount": lessons.len()})),
        Ok(None) => HttpResponse::NotFound().json(json!({"error": format!("file '{}' not found", id)})),
        Err(resp) => resp,
    }
}

/// DELETE /schedule/files/{id}
/// Deleting the active file leaves no active schedule.
pub async fn file_delete_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match with_store(&state, |store| store.delete_file(&id)) {
        Ok(true) => HttpResponse::Ok().json(json!({"status": "deleted", "id": id})),
        Ok(false) => HttpResponse::NotFound().json(json!({"error": format!("file '{}' not found", id)})),
        Err(resp) => resp,
    }
}
