use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{StatusQuery, SubmitAnswerRequest},
        response::ApiResponse,
    },
};

#[post("/api/submit")]
pub async fn submit_answer(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    log::debug!(
        "[{}] Submission for session {} question {}",
        get_request_id(&req).unwrap_or_default(),
        request.session_id,
        request.question_id
    );

    let response = state.attempt_service.submit_answer(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

#[get("/api/students/status")]
pub async fn student_status(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, AppError> {
    let statuses = state
        .attempt_service
        .session_statuses(query.into_inner(), Utc::now())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(statuses)))
}

#[get("/api/attempts/{id}")]
pub async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let attempt = state.attempt_service.get_attempt(&id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(attempt)))
}
