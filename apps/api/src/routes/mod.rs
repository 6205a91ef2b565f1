pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::enhance::handlers as enhance;
use crate::ingest::handlers as ingest;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Ingest API
        .route(
            "/api/v1/resumes/parse",
            post(ingest::handle_parse_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Enhancement API
        .route("/api/v1/resumes/enhance", post(enhance::handle_enhance))
        .route(
            "/api/v1/resumes/suggest-skills",
            post(enhance::handle_suggest_skills),
        )
        .route(
            "/api/v1/resumes/enhance-description",
            post(enhance::handle_enhance_description),
        )
        .with_state(state)
}
