use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use log::{info, warn};
use serde_json::json;

use super::with_store;
use crate::api_json::{has_allowed_extension, UploadResponse, ALLOWED_EXTENSIONS};
use crate::error::ScheduleError;
use crate::excel::read_workbook_from_bytes;
use crate::server::AppState;

/// POST /schedule/upload
/// Multipart field `file`. Parses the workbook, stores it and makes it the
/// active schedule. Uploads are handled one at a time.
pub async fn upload_schedule_handler(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let _upload_guard = state.upload_lock.lock().await;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("multipart field error: {}", e)})),
        };
        let disposition = field.content_disposition().clone();
        if disposition.get_name() != Some("file") {
            continue;
        }

        let filename = disposition
            .get_filename()
            .map(|s| s.to_string())
            .unwrap_or_default();
        if !has_allowed_extension(&filename) {
            return HttpResponse::BadRequest().json(json!({
                "error": format!("unsupported file type '{}'", filename),
                "allowed": ALLOWED_EXTENSIONS,
            }));
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => {
                    if bytes.len() + data.len() > state.max_upload_bytes {
                        warn!("upload '{}' rejected: larger than {} bytes", filename, state.max_upload_bytes);
                        return HttpResponse::PayloadTooLarge().json(json!({
                            "error": format!("file exceeds the {} byte limit", state.max_upload_bytes)
                        }));
                    }
                    bytes.extend_from_slice(&data);
                }
                Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("upload stream error: {}", e)})),
            }
        }
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = match upload {
        Some(u) => u,
        None => return HttpResponse::BadRequest().json(json!({"error": "missing multipart field 'file'"})),
    };
    info!("parsing upload '{}' ({} bytes)", filename, bytes.len());

    let parser = state.parser.clone();
    let parsed = tokio::task::spawn_blocking(move || {
        let workbook = read_workbook_from_bytes(bytes)?;
        parser.parse_workbook(&workbook)
    })
    .await;

    let report = match parsed {
        Ok(Ok(r)) => r,
        Ok(Err(ScheduleError::NoLessonsProduced { skipped })) => {
            warn!("upload '{}' contains no lessons", filename);
            return HttpResponse::UnprocessableEntity().json(json!({
                "error": "file contains no usable schedule data",
                "skipped": skipped.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            }));
        }
        Ok(Err(e @ ScheduleError::Workbook(_))) => {
            return HttpResponse::BadRequest().json(json!({"error": e.to_string()}));
        }
        Ok(Err(e)) => return HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
        Err(e) => return HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)})),
    };

    let skipped: Vec<String> = report.skipped.iter().map(|e| e.to_string()).collect();
    let warnings = report.warnings;
    let lesson_count = report.records.len();

    let stored = with_store(&state, |store| {
        let file = store.save_file(&filename, report.records)?;
        store.activate_file(&file.id)?;
        store.active_file()
    });
    match stored {
        Ok(Some(file)) => HttpResponse::Ok().json(UploadResponse { file, lesson_count, skipped, warnings }),
        Ok(None) => HttpResponse::InternalServerError().json(json!({"error": "stored file could not be activated"})),
        Err(resp) => resp,
    }
}
