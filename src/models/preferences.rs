use serde::{Deserialize, Serialize};

/// User taste input for a recommendation request
///
/// Seed titles are free text and get resolved against the catalog; everything
/// else is an optional override of what the ranker would otherwise infer from
/// the resolved seeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Seed movie titles used to infer taste
    #[serde(default)]
    pub movies: Vec<String>,

    /// Explicit genre name (case-insensitive against the genre catalog)
    #[serde(default)]
    pub genre: Option<String>,

    /// Explicit release-year window; both bounds must be present to take effect
    #[serde(default)]
    pub min_year: Option<i32>,

    #[serde(default)]
    pub max_year: Option<i32>,

    /// Minimum vote average; falls back to the configured default
    #[serde(default)]
    pub rating_threshold: Option<f64>,

    /// Target runtime in minutes, as typed into the form
    #[serde(default)]
    pub runtime: Option<String>,
}

impl Preferences {
    /// Runtime preference parsed to minutes, if it parses at all
    pub fn runtime_minutes(&self) -> Option<i32> {
        self.runtime
            .as_deref()
            .and_then(|r| r.trim().parse::<i32>().ok())
    }

    /// Explicit year window, only when both bounds were supplied
    pub fn explicit_year_range(&self) -> Option<(i32, i32)> {
        match (self.min_year, self.max_year) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"movies": ["The Matrix", "Inception"]}"#).unwrap();
        assert_eq!(prefs.movies.len(), 2);
        assert_eq!(prefs.genre, None);
        assert_eq!(prefs.rating_threshold, None);
        assert_eq!(prefs.runtime_minutes(), None);
    }

    #[test]
    fn test_deserialize_full() {
        let prefs: Preferences = serde_json::from_str(
            r#"{
                "movies": ["Alien"],
                "genre": "Horror",
                "min_year": 1970,
                "max_year": 1990,
                "rating_threshold": 6.5,
                "runtime": "117"
            }"#,
        )
        .unwrap();
        assert_eq!(prefs.genre.as_deref(), Some("Horror"));
        assert_eq!(prefs.explicit_year_range(), Some((1970, 1990)));
        assert_eq!(prefs.rating_threshold, Some(6.5));
        assert_eq!(prefs.runtime_minutes(), Some(117));
    }

    #[test]
    fn test_runtime_parse_is_lenient() {
        let prefs = Preferences {
            runtime: Some("about two hours".to_string()),
            ..Default::default()
        };
        assert_eq!(prefs.runtime_minutes(), None);

        let prefs = Preferences {
            runtime: Some(" 95 ".to_string()),
            ..Default::default()
        };
        assert_eq!(prefs.runtime_minutes(), Some(95));
    }

    #[test]
    fn test_year_range_requires_both_bounds() {
        let prefs = Preferences {
            min_year: Some(1980),
            ..Default::default()
        };
        assert_eq!(prefs.explicit_year_range(), None);
    }
}
