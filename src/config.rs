use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL for poster images (w500 size)
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum number of seed titles that must resolve before we recommend
    #[serde(default = "default_min_seed_matches")]
    pub min_seed_matches: usize,

    /// Rating floor applied when the caller does not supply one
    #[serde(default = "default_rating_threshold")]
    pub rating_threshold: f64,

    /// Amplitude of the random tie-breaking jitter added to scores (0 disables)
    #[serde(default = "default_score_jitter")]
    pub score_jitter: f64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_min_seed_matches() -> usize {
    2
}

fn default_rating_threshold() -> f64 {
    7.0
}

fn default_score_jitter() -> f64 {
    1.0
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
