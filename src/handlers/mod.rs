pub mod analysis_handler;
pub mod attempt_handler;
pub mod health_handler;
pub mod question_handler;

use actix_web::web;

use crate::errors::AppError;

pub use analysis_handler::analyze_final;
pub use attempt_handler::{get_attempt, student_status, submit_answer};
pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use question_handler::list_questions;

/// Registers every route plus JSON and query extractors that answer with the
/// standard error body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(health_check)
    .service(health_check_live)
    .service(health_check_ready)
    .service(list_questions)
    .service(submit_answer)
    .service(student_status)
    .service(get_attempt)
    .service(analyze_final);
}
