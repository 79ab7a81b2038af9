pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Submission + pipeline
        .route(
            "/api/v1/submit-questionnaire",
            post(handlers::handle_submit_questionnaire),
        )
        .route(
            "/api/v1/questionnaires/:id/generate-analysis",
            post(handlers::handle_generate_analysis),
        )
        // Read-only records
        .route(
            "/api/v1/questionnaires",
            get(handlers::handle_list_questionnaires),
        )
        .route(
            "/api/v1/questionnaires/:id",
            get(handlers::handle_get_questionnaire),
        )
        .route("/api/v1/analyses", get(handlers::handle_list_analyses))
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        .route(
            "/api/v1/analyses/:id/raw",
            get(handlers::handle_get_analysis_raw),
        )
        .route("/api/v1/users", get(handlers::handle_list_users))
        .with_state(state)
}
