use chrono::{DateTime, Utc};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;

use crate::models::ItemId;

#[derive(Debug, Clone)]
struct CachedPoster {
    url: String,
    cached_at: DateTime<Utc>,
}

/// In-memory poster URL cache keyed by external id
///
/// Entries older than the TTL are treated as absent and replaced on the next
/// successful lookup.
#[derive(Debug, Clone)]
pub struct PosterCache {
    ttl: chrono::Duration,
    entries: Arc<RwLock<HashMap<ItemId, CachedPoster>>>,
}

impl PosterCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the cached URL if present and not expired
    pub async fn get(&self, external_id: &ItemId) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(external_id)
            .filter(|entry| Utc::now() - entry.cached_at < self.ttl)
            .map(|entry| entry.url.clone())
    }

    pub async fn insert(&self, external_id: ItemId, url: String) {
        let mut entries = self.entries.write().await;
        entries.insert(
            external_id,
            CachedPoster {
                url,
                cached_at: Utc::now(),
            },
        );
    }
}
