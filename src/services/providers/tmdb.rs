/// TMDB (The Movie Database) metadata provider
///
/// API Flow:
/// 1. GET /movie/{id}?api_key=... → movie details, including `poster_path`
/// 2. Poster URLs are built by the enricher from the image CDN base URL
use crate::{
    error::{AppError, AppResult},
    models::{ItemId, TmdbMovie},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_poster_path(&self, external_id: &ItemId) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
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

        let response_text = response.text().await?;

        let movie: TmdbMovie = serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        let poster_path = movie.poster_path.filter(|path| !path.trim().is_empty());

        tracing::debug!(
            external_id = %external_id,
            has_poster = poster_path.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(poster_path)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
