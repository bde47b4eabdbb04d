use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{genre, Candidate, FilterSet, GenreFilter, MovieRecord, Preferences};
use crate::services::providers::MovieCatalog;
use crate::services::session::SessionStore;

/// Half-width of the release-year window derived from the seed average
const YEAR_WINDOW: i32 = 40;
/// Half-width of the runtime window around the requested runtime
const RUNTIME_WINDOW: i32 = 10;
/// Upper bound on candidates returned per request
const MAX_RECOMMENDATIONS: usize = 2;

/// Clock seam for the date-window fallback
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn current_year(&self) -> i32 {
        self.today().year()
    }
}

/// Wall clock used outside of tests
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Tunable scoring constants
///
/// The directional contract is what matters: reward a genre match, reward
/// rating above the threshold, reward landing inside the year window, and
/// optionally jitter to break ties. The magnitudes are tuning, not law.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Added when a caller-requested genre matches
    pub requested_genre_bonus: f64,
    /// Subtracted when a caller-requested genre does not match
    pub requested_genre_penalty: f64,
    /// Added when the seed-derived dominant genre matches
    pub derived_genre_bonus: f64,
    /// Added when the release year lands inside the active window
    pub recency_bonus: f64,
    /// Amplitude of the uniform tie-breaking jitter; 0 disables it
    pub jitter: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            requested_genre_bonus: 10.0,
            requested_genre_penalty: 5.0,
            derived_genre_bonus: 5.0,
            recency_bonus: 2.0,
            jitter: 1.0,
        }
    }
}

/// The recommendation ranker
///
/// Resolves seed titles against the catalog, derives query filters from the
/// seeds and the caller's overrides, ranks discovery candidates, and falls
/// back to the per-seed recommendation pools when discovery comes up short.
/// Already-shown ids are tracked per session through the shared store.
pub struct Recommender {
    catalog: Arc<dyn MovieCatalog>,
    sessions: SessionStore,
    clock: Arc<dyn Clock>,
    weights: ScoringWeights,
    min_seed_matches: usize,
    default_rating_threshold: f64,
}

impl Recommender {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        sessions: SessionStore,
        clock: Arc<dyn Clock>,
        weights: ScoringWeights,
        min_seed_matches: usize,
        default_rating_threshold: f64,
    ) -> Self {
        Self {
            catalog,
            sessions,
            clock,
            weights,
            min_seed_matches,
            default_rating_threshold,
        }
    }

    /// Produce 1-2 ranked, justified picks for this session
    pub async fn recommend(
        &self,
        session_id: Uuid,
        prefs: &Preferences,
    ) -> AppResult<Vec<Candidate>> {
        // Short inputs fail before any upstream call
        if prefs.movies.len() < self.min_seed_matches {
            return Err(AppError::InsufficientSeeds(self.min_seed_matches));
        }

        let seeds = self.resolve_seeds(&prefs.movies).await;
        if seeds.len() < self.min_seed_matches {
            return Err(AppError::InsufficientSeeds(self.min_seed_matches));
        }

        let filters = self.derive_filters(&seeds, prefs);

        let mut excluded: HashSet<u64> = seeds.iter().map(|s| s.id).collect();
        excluded.extend(self.sessions.seen(session_id).await);

        let discovered = match self.catalog.discover(&filters).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Discovery failed, treating as empty");
                Vec::new()
            }
        };
        let pool: Vec<MovieRecord> = discovered
            .into_iter()
            .filter(|m| !excluded.contains(&m.id))
            .collect();

        let mut picks = self.rank(pool, &filters, MAX_RECOMMENDATIONS);

        // Top up from the aggregated per-seed recommendation pools
        if picks.len() < MAX_RECOMMENDATIONS {
            for pick in &picks {
                excluded.insert(pick.record.id);
            }
            let fallback = self.fallback_pool(&seeds, &excluded).await;
            let needed = MAX_RECOMMENDATIONS - picks.len();
            picks.extend(self.rank(fallback, &filters, needed));
        }

        if picks.is_empty() {
            return Err(AppError::NoRecommendation);
        }

        let ids: Vec<u64> = picks.iter().map(|c| c.record.id).collect();
        self.sessions.record(session_id, &ids).await;

        tracing::info!(
            session_id = %session_id,
            returned = ids.len(),
            top_score = picks[0].score,
            "Recommendation completed"
        );

        Ok(picks)
    }

    /// Resolve free-text titles, dropping the ones the catalog cannot match
    async fn resolve_seeds(&self, titles: &[String]) -> Vec<MovieRecord> {
        let mut records = Vec::new();
        for title in titles {
            match self.catalog.search_title(title).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {
                    tracing::warn!(title = %title, "No catalog match for seed title, dropping");
                }
                Err(e) => {
                    tracing::warn!(title = %title, error = %e, "Seed search failed, dropping");
                }
            }
        }
        records
    }

    /// Derive the query filters from the resolved seeds and caller overrides
    fn derive_filters(&self, seeds: &[MovieRecord], prefs: &Preferences) -> FilterSet {
        let requested = prefs.genre.as_deref().and_then(genre::id_for_name);
        let genre_filter = match requested {
            Some(id) => Some(GenreFilter::Requested(id)),
            None => genre::dominant_genre(seeds).map(GenreFilter::Derived),
        };

        let year_range = prefs
            .explicit_year_range()
            .unwrap_or_else(|| match average_release_year(seeds) {
                Some(avg) => (avg - YEAR_WINDOW, avg + YEAR_WINDOW),
                None => {
                    let current = self.clock.current_year();
                    (current - YEAR_WINDOW, current)
                }
            });

        let rating_threshold = prefs
            .rating_threshold
            .unwrap_or(self.default_rating_threshold);

        let runtime_range = prefs
            .runtime_minutes()
            .map(|r| (r - RUNTIME_WINDOW, r + RUNTIME_WINDOW));

        FilterSet {
            genre: genre_filter,
            rating_threshold,
            year_range,
            runtime_range,
        }
    }

    /// Aggregate the related-titles pools of every seed, minus exclusions
    async fn fallback_pool(
        &self,
        seeds: &[MovieRecord],
        excluded: &HashSet<u64>,
    ) -> Vec<MovieRecord> {
        let mut pool = Vec::new();
        for seed in seeds {
            match self.catalog.recommendations_for(seed.id).await {
                Ok(records) => pool.extend(records),
                Err(e) => {
                    tracing::warn!(
                        seed_id = seed.id,
                        error = %e,
                        "Recommendation pool fetch failed, skipping seed"
                    );
                }
            }
        }

        // The same title can surface from several seeds
        let mut picked = HashSet::new();
        pool.into_iter()
            .filter(|m| !excluded.contains(&m.id) && picked.insert(m.id))
            .collect()
    }

    /// Score the pool and keep the best `take` candidates
    fn rank(&self, pool: Vec<MovieRecord>, filters: &FilterSet, take: usize) -> Vec<Candidate> {
        if take == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = pool
            .into_iter()
            .map(|record| self.score_candidate(record, filters))
            .collect();

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(take);
        candidates
    }

    /// Weighted sum over the scoring factors, with reasons for each that fired
    fn score_candidate(&self, record: MovieRecord, filters: &FilterSet) -> Candidate {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        match filters.genre {
            Some(GenreFilter::Requested(id)) => {
                // Requested ids always come from the genre catalog
                let name = genre::name_for_id(id).unwrap_or("chosen");
                if record.genre_ids.contains(&id) {
                    score += self.weights.requested_genre_bonus;
                    reasons.push(format!("Matches your requested {} genre", name));
                } else {
                    score -= self.weights.requested_genre_penalty;
                    reasons.push(format!("Outside your requested {} genre", name));
                }
            }
            Some(GenreFilter::Derived(id)) => {
                if record.genre_ids.contains(&id) {
                    score += self.weights.derived_genre_bonus;
                    match genre::name_for_id(id) {
                        Some(name) => {
                            reasons.push(format!("Shares the {} genre with your picks", name));
                        }
                        None => reasons.push("Shares a favorite genre with your picks".to_string()),
                    }
                }
            }
            None => {}
        }

        score += record.vote_average - filters.rating_threshold;
        if record.vote_average >= filters.rating_threshold {
            reasons.push(format!(
                "Rated {:.1}, at or above your {:.1} minimum",
                record.vote_average, filters.rating_threshold
            ));
        }

        if let Some(year) = record.release_year() {
            if filters.year_contains(year) {
                score += self.weights.recency_bonus;
                let (min, max) = filters.year_range;
                reasons.push(format!(
                    "Released in {}, inside the {}-{} window",
                    year, min, max
                ));
            }
        }

        if self.weights.jitter > 0.0 {
            score += rand::thread_rng().gen_range(-self.weights.jitter..=self.weights.jitter);
        }

        Candidate {
            record,
            score,
            reasons,
        }
    }
}

/// Truncating integer average of the seeds' release years
fn average_release_year(records: &[MovieRecord]) -> Option<i32> {
    let years: Vec<i32> = records.iter().filter_map(|r| r.release_year()).collect();
    if years.is_empty() {
        None
    } else {
        Some(years.iter().sum::<i32>() / years.len() as i32)
    }
}
