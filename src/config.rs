use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster paths are appended to
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Placeholder returned when no poster can be resolved
    #[serde(default = "default_poster_fallback_url")]
    pub poster_fallback_url: String,

    /// Timeout for a single metadata lookup, in seconds
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Catalog CSV (movie_id, title, ...)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Similarity matrix CSV
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Where to download the similarity matrix from when it is missing locally
    #[serde(default)]
    pub similarity_url: Option<String>,

    /// Timeout for the startup artifact download, in seconds
    #[serde(default = "default_artifact_download_timeout_secs")]
    pub artifact_download_timeout_secs: u64,

    /// Number of recommendations when the caller does not ask for a count
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Largest accepted recommendation count
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Poster cache TTL in seconds; cache is disabled when unset
    #[serde(default)]
    pub poster_cache_ttl_secs: Option<u64>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_fallback_url() -> String {
    "https://via.placeholder.com/500x750?text=No+Image+Available".to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    5
}

fn default_catalog_path() -> String {
    "data/movies.csv".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.csv".to_string()
}

fn default_artifact_download_timeout_secs() -> u64 {
    300
}

fn default_k() -> usize {
    5
}

fn default_max_k() -> usize {
    50
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_k > config.max_k {
            anyhow::bail!(
                "DEFAULT_K ({}) must not exceed MAX_K ({})",
                config.default_k,
                config.max_k
            );
        }

        Ok(config)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    pub fn artifact_download_timeout(&self) -> Duration {
        Duration::from_secs(self.artifact_download_timeout_secs)
    }

    pub fn poster_cache_ttl(&self) -> Option<Duration> {
        self.poster_cache_ttl_secs.map(Duration::from_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
