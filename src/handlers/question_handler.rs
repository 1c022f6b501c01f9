use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::ApiResponse};

#[get("/api/questions")]
pub async fn list_questions(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let questions = state.question_service.list_questions().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(questions)))
}
