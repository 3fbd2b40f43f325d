use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::ALLOWED_EXTENSIONS;

pub async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "School timetable API. Upload a timetable workbook; its lessons become the active schedule.",
        "endpoints": [
            {"method": "POST", "path": "/schedule/upload", "body": "multipart/form-data, field 'file'", "formats": ALLOWED_EXTENSIONS},
            {"method": "GET", "path": "/schedule", "query": "grade, shift (I|II), day"},
            {"method": "GET", "path": "/schedule/grouped", "query": "view = day | grade | category"},
            {"method": "GET", "path": "/schedule/meta"},
            {"method": "GET", "path": "/schedule/files"},
            {"method": "GET", "path": "/schedule/files/{id}"},
            {"method": "POST", "path": "/schedule/files/{id}/activate"},
            {"method": "DELETE", "path": "/schedule/files/{id}"},
        ],
        "get_example_query": "/schedule?grade=5А&shift=I&day=Дүйсенбі",
        "lesson_example": {
            "id": 1,
            "day": "Дүйсенбі",
            "time": "08:00-08:45",
            "grade": "5А",
            "subject": "Математика",
            "room": "203",
            "shift": "I",
            "lessonNumber": 1
        }
    });

    HttpResponse::Ok().json(help)
}
