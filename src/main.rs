use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::config::Config;
use cinematch_api::services::providers::TmdbCatalog;
use cinematch_api::services::{Recommender, ScoringWeights, SessionStore, SystemClock};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Arc::new(TmdbCatalog::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let sessions = SessionStore::new();
    let weights = ScoringWeights {
        jitter: config.score_jitter,
        ..ScoringWeights::default()
    };
    let recommender = Arc::new(Recommender::new(
        catalog,
        sessions.clone(),
        Arc::new(SystemClock),
        weights,
        config.min_seed_matches,
        config.rating_threshold,
    ));

    let state = AppState::new(recommender, sessions, config.image_base_url.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "cinematch-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}
