/// TMDB API catalog
///
/// Implements all three catalog contracts against TMDB v3:
/// 1. Title search: /search/movie → first hit wins
/// 2. Discovery: /discover/movie, popularity-sorted with the derived filters
/// 3. Related pool: /movie/{id}/recommendations
use crate::{
    error::{AppError, AppResult},
    models::{FilterSet, MovieRecord, TmdbPage},
    services::providers::MovieCatalog,
};
use reqwest::Client as HttpClient;

const SORT_BY: &str = "popularity.desc";
const ORIGINAL_LANGUAGE: &str = "en";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Issues a GET and deserializes the standard TMDB results page
    async fn fetch_page(&self, url: &str, params: &[(String, String)]) -> AppResult<TmdbPage> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let page: TmdbPage = response.json().await?;
        Ok(page)
    }

    /// Builds the discover query parameters from a derived filter set
    fn discover_params(&self, filters: &FilterSet) -> Vec<(String, String)> {
        let mut params = vec![
            ("api_key".to_string(), self.api_key.clone()),
            ("sort_by".to_string(), SORT_BY.to_string()),
            (
                "vote_average.gte".to_string(),
                filters.rating_threshold.to_string(),
            ),
            (
                "with_original_language".to_string(),
                ORIGINAL_LANGUAGE.to_string(),
            ),
        ];

        if let Some(genre_id) = filters.genre_id() {
            params.push(("with_genres".to_string(), genre_id.to_string()));
        }

        let (min_year, max_year) = filters.year_range;
        params.push((
            "primary_release_date.gte".to_string(),
            format!("{}-01-01", min_year),
        ));
        params.push((
            "primary_release_date.lte".to_string(),
            format!("{}-12-31", max_year),
        ));

        if let Some((min_runtime, max_runtime)) = filters.runtime_range {
            params.push(("with_runtime.gte".to_string(), min_runtime.to_string()));
            params.push(("with_runtime.lte".to_string(), max_runtime.to_string()));
        }

        params
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn search_title(&self, query: &str) -> AppResult<Option<MovieRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.api_url);
        let params = vec![
            ("api_key".to_string(), self.api_key.clone()),
            ("query".to_string(), query.to_string()),
        ];

        let page = self.fetch_page(&url, &params).await?;
        let record = page.results.into_iter().next().map(MovieRecord::from);

        tracing::info!(
            query = %query,
            found = record.is_some(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(record)
    }

    async fn discover(&self, filters: &FilterSet) -> AppResult<Vec<MovieRecord>> {
        let url = format!("{}/discover/movie", self.api_url);
        let params = self.discover_params(filters);

        let page = self.fetch_page(&url, &params).await?;
        let records: Vec<MovieRecord> = page.results.into_iter().map(MovieRecord::from).collect();

        tracing::info!(
            results = records.len(),
            genre = ?filters.genre_id(),
            rating_threshold = filters.rating_threshold,
            provider = "tmdb",
            "Discovery completed"
        );

        Ok(records)
    }

    async fn recommendations_for(&self, movie_id: u64) -> AppResult<Vec<MovieRecord>> {
        let url = format!("{}/movie/{}/recommendations", self.api_url, movie_id);
        let params = vec![("api_key".to_string(), self.api_key.clone())];

        let page = self.fetch_page(&url, &params).await?;
        let records: Vec<MovieRecord> = page.results.into_iter().map(MovieRecord::from).collect();

        tracing::info!(
            movie_id = movie_id,
            results = records.len(),
            provider = "tmdb",
            "Recommendation pool fetched"
        );

        Ok(records)
    }
}
