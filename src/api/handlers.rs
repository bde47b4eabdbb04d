use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::middleware::SessionId;
use crate::models::{Candidate, Preferences};

use super::AppState;

// Response types

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendedMovie>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub reasons: Vec<String>,
}

impl RecommendedMovie {
    fn from_candidate(candidate: Candidate, image_base_url: &str) -> Self {
        let poster_url = candidate
            .record
            .poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url, path));

        Self {
            title: candidate.record.title,
            overview: candidate.record.overview,
            release_date: candidate.record.release_date,
            poster_url,
            reasons: candidate.reasons,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Home view
///
/// Reloading home starts the session over: the caller's recommendation
/// memory is cleared so earlier picks become eligible again.
pub async fn home(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<Value> {
    state.sessions.reset(session_id.0).await;

    tracing::info!(session_id = %session_id, "Session reset from home view");

    Json(json!({
        "service": "cinematch-api",
        "status": "ready",
    }))
}

/// Handler for the recommendation endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(preferences): Json<Preferences>,
) -> AppResult<Json<RecommendationResponse>> {
    let candidates = state
        .recommender
        .recommend(session_id.0, &preferences)
        .await?;

    let recommendations = candidates
        .into_iter()
        .map(|c| RecommendedMovie::from_candidate(c, &state.image_base_url))
        .collect();

    Ok(Json(RecommendationResponse { recommendations }))
}
