use serde::{Deserialize, Serialize};

pub mod genre;
mod preferences;

pub use preferences::Preferences;

/// A movie as we hold it internally, immutable once fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// TMDB identifier
    pub id: u64,
    pub title: String,
    pub overview: String,
    /// ISO date string as returned by the API, possibly absent or empty
    pub release_date: Option<String>,
    /// Genre identifiers, interpreted against the fixed genre catalog
    pub genre_ids: Vec<u64>,
    /// Vote average on the 0-10 scale
    pub vote_average: f64,
    pub poster_path: Option<String>,
}

impl MovieRecord {
    /// Release year parsed from the first four characters of the release date
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse::<i32>().ok())
    }
}

/// Genre constraint carried by a derived filter set
///
/// Scoring treats an explicitly requested genre differently from one inferred
/// from the seeds, so the origin travels with the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreFilter {
    /// The caller named this genre
    Requested(u64),
    /// Most frequent genre across the resolved seeds
    Derived(u64),
}

impl GenreFilter {
    pub fn id(&self) -> u64 {
        match self {
            GenreFilter::Requested(id) | GenreFilter::Derived(id) => *id,
        }
    }
}

/// Query filters derived from the resolved seeds and the caller's overrides
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub genre: Option<GenreFilter>,
    pub rating_threshold: f64,
    /// Inclusive release-year window; always present, the derivation falls
    /// back to a window ending at the current year
    pub year_range: (i32, i32),
    pub runtime_range: Option<(i32, i32)>,
}

impl FilterSet {
    pub fn genre_id(&self) -> Option<u64> {
        self.genre.map(|g| g.id())
    }

    pub fn year_contains(&self, year: i32) -> bool {
        let (min, max) = self.year_range;
        year >= min && year <= max
    }
}

/// A scored movie produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub record: MovieRecord,
    pub score: f64,
    /// Human-readable notes on which scoring factors fired; informational only
    pub reasons: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One movie entry as TMDB returns it
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// One page of TMDB results; only the entries are consumed
#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

impl From<TmdbMovie> for MovieRecord {
    fn from(movie: TmdbMovie) -> Self {
        // TMDB sends "" instead of omitting unknown release dates
        let release_date = movie.release_date.filter(|d| !d.is_empty());

        MovieRecord {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            release_date,
            genre_ids: movie.genre_ids,
            vote_average: movie.vote_average,
            poster_path: movie.poster_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_movie_deserialization() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "overview": "A computer hacker learns about the true nature of reality.",
            "release_date": "1999-03-31",
            "genre_ids": [28, 878],
            "vote_average": 8.2,
            "poster_path": "/matrix.jpg"
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.genre_ids, vec![28, 878]);
        assert_eq!(movie.vote_average, 8.2);
        assert_eq!(movie.poster_path, Some("/matrix.jpg".to_string()));
    }

    #[test]
    fn test_tmdb_movie_deserialization_sparse() {
        // Discovery results frequently omit optional fields
        let json = r#"{"id": 42}"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 42);
        assert_eq!(movie.title, "");
        assert_eq!(movie.release_date, None);
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn test_tmdb_movie_to_record_drops_empty_release_date() {
        let movie = TmdbMovie {
            id: 42,
            title: "Untitled".to_string(),
            overview: String::new(),
            release_date: Some(String::new()),
            genre_ids: vec![],
            vote_average: 0.0,
            poster_path: None,
        };

        let record = MovieRecord::from(movie);
        assert_eq!(record.release_date, None);
        assert_eq!(record.release_year(), None);
    }

    #[test]
    fn test_release_year_parses_prefix() {
        let record = MovieRecord {
            id: 603,
            title: "The Matrix".to_string(),
            overview: String::new(),
            release_date: Some("1999-03-31".to_string()),
            genre_ids: vec![],
            vote_average: 8.2,
            poster_path: None,
        };
        assert_eq!(record.release_year(), Some(1999));
    }

    #[test]
    fn test_release_year_rejects_garbage() {
        let record = MovieRecord {
            id: 1,
            title: String::new(),
            overview: String::new(),
            release_date: Some("n/a".to_string()),
            genre_ids: vec![],
            vote_average: 0.0,
            poster_path: None,
        };
        assert_eq!(record.release_year(), None);
    }

    #[test]
    fn test_filter_set_year_contains() {
        let filters = FilterSet {
            genre: None,
            rating_threshold: 7.0,
            year_range: (1980, 2020),
            runtime_range: None,
        };
        assert!(filters.year_contains(1980));
        assert!(filters.year_contains(2020));
        assert!(!filters.year_contains(1979));
        assert!(!filters.year_contains(2021));
    }

    #[test]
    fn test_genre_filter_id() {
        assert_eq!(GenreFilter::Requested(878).id(), 878);
        assert_eq!(GenreFilter::Derived(28).id(), 28);
    }
}
