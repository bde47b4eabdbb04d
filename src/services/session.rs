use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Session-scoped recommendation memory
///
/// Tracks which movie ids each session has already been shown so repeated
/// requests keep surfacing fresh picks. State only grows within a session;
/// reloading the home view clears it.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, HashSet<u64>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the ids already recommended to this session
    pub async fn seen(&self, session_id: Uuid) -> HashSet<u64> {
        let inner = self.inner.read().await;
        inner.get(&session_id).cloned().unwrap_or_default()
    }

    /// Record freshly recommended ids against this session
    pub async fn record(&self, session_id: Uuid, movie_ids: &[u64]) {
        let mut inner = self.inner.write().await;
        let seen = inner.entry(session_id).or_default();
        seen.extend(movie_ids.iter().copied());
    }

    /// Forget everything shown to this session
    pub async fn reset(&self, session_id: Uuid) {
        let mut inner = self.inner.write().await;
        inner.remove(&session_id);
    }
}
