/// Display metadata providers
///
/// A provider performs the raw lookup against an external catalog service and
/// is free to fail. Turning failures into the fallback poster is the
/// enricher's job, see [`crate::services::enricher::PosterEnricher`].
use crate::{error::AppResult, models::ItemId};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for external metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the poster path for an item
    ///
    /// Returns `Ok(None)` when the service knows the item but has no poster.
    async fn fetch_poster_path(&self, external_id: &ItemId) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
