use std::sync::Arc;

use crate::services::{Recommender, SessionStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub sessions: SessionStore,
    /// Prefix for poster image paths returned by the catalog
    pub image_base_url: String,
}

impl AppState {
    pub fn new(
        recommender: Arc<Recommender>,
        sessions: SessionStore,
        image_base_url: String,
    ) -> Self {
        Self {
            recommender,
            sessions,
            image_base_url,
        }
    }
}
