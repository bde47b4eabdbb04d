/// Movie catalog abstraction
///
/// This module provides a pluggable architecture for the upstream movie
/// catalog (TMDB today). The ranker only ever talks to this trait, so tests
/// and alternative catalogs slot in without touching the scoring logic.
use crate::{
    error::AppResult,
    models::{FilterSet, MovieRecord},
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Trait for movie catalog collaborators
///
/// All three operations are best-effort: callers treat an error the same as
/// an empty result and move on to the next data source.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fuzzy-match a free-text title, first result wins
    async fn search_title(&self, query: &str) -> AppResult<Option<MovieRecord>>;

    /// Bulk filtered query, server-side sorted by popularity descending
    ///
    /// Returns whatever single page the catalog yields; there is no
    /// pagination merge.
    async fn discover(&self, filters: &FilterSet) -> AppResult<Vec<MovieRecord>>;

    /// Related titles for one movie, used as the fallback candidate pool
    async fn recommendations_for(&self, movie_id: u64) -> AppResult<Vec<MovieRecord>>;
}
