use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::with_store;
use crate::algorithm::{
    apply_filters, group_by_category, group_by_day, group_by_grade, sorted_days, sorted_grades,
    LessonFilter,
};
use crate::api_json::{GroupedQuery, GroupedView};
use crate::server::AppState;

/// GET /schedule?grade=&shift=&day=
pub async fn schedule_handler(state: web::Data<AppState>, query: web::Query<LessonFilter>) -> impl Responder {
    let lessons = match with_store(&state, |store| store.active_schedule()) {
        Ok(l) => l,
        Err(resp) => return resp,
    };
    let lessons = apply_filters(lessons, &query);
    HttpResponse::Ok().json(json!({"count": lessons.len(), "lessons": lessons}))
}

/// GET /schedule/grouped?view=day|grade|category
pub async fn schedule_grouped_handler(state: web::Data<AppState>, query: web::Query<GroupedQuery>) -> impl Responder {
    let view = match query.view() {
        Some(v) => v,
        None => {
            return HttpResponse::BadRequest().json(json!({
                "error": format!("unknown view '{}'", query.view.as_deref().unwrap_or("")),
                "views": ["day", "grade", "category"],
            }))
        }
    };
    let lessons = match with_store(&state, |store| store.active_schedule()) {
        Ok(l) => l,
        Err(resp) => return resp,
    };
    match view {
        GroupedView::Day => HttpResponse::Ok().json(group_by_day(&lessons)),
        GroupedView::Grade => HttpResponse::Ok().json(group_by_grade(&lessons)),
        GroupedView::Category => HttpResponse::Ok().json(group_by_category(&lessons)),
    }
}

/// GET /schedule/meta
/// Selector contents for the schedule page.
pub async fn schedule_meta_handler(state: web::Data<AppState>) -> impl Responder {
    let (lessons, active) = match with_store(&state, |store| Ok((store.active_schedule()?, store.active_file()?))) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(json!({
        "activeFile": active,
        "lessonCount": lessons.len(),
        "days": sorted_days(&lessons),
        "grades": sorted_grades(&lessons),
        "categories": group_by_category(&lessons),
    }))
}
