pub mod docs;
pub mod files;
pub mod schedule;
pub mod upload;

pub use docs::*;
pub use files::*;
pub use schedule::*;
pub use upload::*;

use actix_web::HttpResponse;
use log::error;
use serde_json::json;

use crate::error::StoreError;
use crate::server::AppState;
use crate::storage::ScheduleStore;

/// Runs `f` against the locked store, turning failures into a 500 response.
pub(crate) fn with_store<T, F>(state: &AppState, f: F) -> Result<T, HttpResponse>
where
    F: FnOnce(&ScheduleStore) -> Result<T, StoreError>,
{
    let store = match state.store.lock() {
        Ok(s) => s,
        Err(_) => {
            error!("schedule store lock poisoned");
            return Err(HttpResponse::InternalServerError()
                .json(json!({"error": "schedule store unavailable"})));
        }
    };
    f(&store).map_err(|e| {
        error!("schedule store error: {}", e);
        HttpResponse::InternalServerError().json(json!({"error": format!("storage error: {}", e)}))
    })
}
