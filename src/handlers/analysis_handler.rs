use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::FinalAnalysisRequest,
        response::{ApiResponse, FinalAnalysisResponse},
    },
};

#[post("/api/analyze/final")]
pub async fn analyze_final(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<FinalAnalysisRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    log::info!(
        "[{}] Final analysis requested for session {}",
        get_request_id(&req).unwrap_or_default(),
        request.session_id
    );

    let report = state
        .session_aggregator
        .analyze_session(&request.session_id, request.use_judgment)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(FinalAnalysisResponse::from(report))))
}
