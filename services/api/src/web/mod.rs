pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

// Re-export the handlers to make them easily accessible
// to the binary that builds the web server router.
pub use rest::{
    assess_handler, delete_assessment_handler, health_handler, ingest_anonymous_handler,
    ingest_full_handler, list_assessments_handler, set_preference_handler,
};
use state::AppState;

/// Builds the API routes over the given state. CORS and Swagger UI are layered on by the binary.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route(
            "/assessments",
            post(assess_handler).get(list_assessments_handler),
        )
        .route("/assessments/{id}", delete(delete_assessment_handler))
        .route("/users/preference", put(set_preference_handler))
        .route("/api/assessments", post(ingest_full_handler))
        .route("/api/assessments/anonymous", post(ingest_anonymous_handler))
        .with_state(app_state)
}
