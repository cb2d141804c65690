use std::sync::Arc;

use crate::{
    models::{ItemId, Recommendation, ScoredItem},
    services::{poster_cache::PosterCache, providers::MetadataProvider},
};

/// Attaches poster URLs to ranked items
///
/// Lookups never fail from the caller's point of view: any provider error,
/// missing poster or task failure yields the fallback URL instead.
#[derive(Clone)]
pub struct PosterEnricher {
    provider: Arc<dyn MetadataProvider>,
    image_base_url: String,
    fallback_url: String,
    cache: Option<PosterCache>,
}

impl PosterEnricher {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        image_base_url: String,
        fallback_url: String,
    ) -> Self {
        Self {
            provider,
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            fallback_url,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: PosterCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url,
            poster_path.trim_start_matches('/')
        )
    }

    /// Resolves the poster URL for one item, falling back on any failure
    pub async fn fetch_poster(&self, external_id: &ItemId) -> String {
        if let Some(cache) = &self.cache {
            if let Some(url) = cache.get(external_id).await {
                tracing::debug!(external_id = %external_id, "Poster cache hit");
                return url;
            }
        }

        match self.provider.fetch_poster_path(external_id).await {
            Ok(Some(path)) => {
                let url = self.poster_url(&path);
                if let Some(cache) = &self.cache {
                    cache.insert(external_id.clone(), url.clone()).await;
                }
                url
            }
            Ok(None) => {
                tracing::warn!(
                    external_id = %external_id,
                    provider = self.provider.name(),
                    "No poster available, using fallback"
                );
                self.fallback_url.clone()
            }
            Err(e) => {
                tracing::warn!(
                    external_id = %external_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed, using fallback"
                );
                self.fallback_url.clone()
            }
        }
    }

    /// Enriches ranked items with posters, one concurrent lookup per item
    ///
    /// Output order matches input order.
    pub async fn enrich(&self, ranked: Vec<ScoredItem>) -> Vec<Recommendation> {
        let mut tasks = Vec::with_capacity(ranked.len());

        for scored in &ranked {
            let enricher = self.clone();
            let external_id = scored.item.external_id.clone();
            let task = tokio::spawn(async move { enricher.fetch_poster(&external_id).await });
            tasks.push(task);
        }

        let mut results = Vec::with_capacity(ranked.len());

        for (scored, task) in ranked.into_iter().zip(tasks) {
            let poster_url = match task.await {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!(error = %e, "Poster task join error");
                    self.fallback_url.clone()
                }
            };
            results.push(Recommendation::new(scored, poster_url));
        }

        results
    }
}
