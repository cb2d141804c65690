use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier used to look an item up in the external metadata service
///
/// TMDB uses numeric ids, but catalogs built from other sources may carry
/// string ids, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Text(String),
}

impl ItemId {
    /// Parses a raw catalog value, preferring the numeric form
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<u64>()
            .map(ItemId::Numeric)
            .unwrap_or_else(|_| ItemId::Text(raw.to_string()))
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Numeric(id) => write!(f, "{}", id),
            ItemId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// A catalog entry
///
/// `index` is the item's row in the catalog and its row/column in the
/// similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub index: usize,
    pub external_id: ItemId,
    pub title: String,
}

/// One entry of a ranked recommendation, before enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item: Item,
    pub score: f32,
}

/// A recommended item with its display metadata, returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub index: usize,
    pub external_id: ItemId,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}

impl Recommendation {
    pub fn new(scored: ScoredItem, poster_url: String) -> Self {
        Self {
            index: scored.item.index,
            external_id: scored.item.external_id,
            title: scored.item.title,
            score: scored.score,
            poster_url,
        }
    }
}

/// Response for the recommendations endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub selected: Item,
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the TMDB `GET /movie/{id}` response that we consume
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
}
