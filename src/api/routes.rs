use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_session_id, session_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// The session middleware sits outside the trace layer so every request span
/// carries the session ID it was served under.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_session_id))
        .layer(middleware::from_fn(session_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new().route("/recommend", post(handlers::recommend))
}
