pub mod bootstrap;
pub mod catalog;
pub mod similarity;

pub use bootstrap::ensure_artifact;
pub use catalog::Catalog;
pub use similarity::SimilarityMatrix;

use std::path::Path;

use crate::error::AppResult;

/// Loads the catalog and its similarity matrix, failing if they disagree on size
pub fn load_artifacts(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> AppResult<(Catalog, SimilarityMatrix)> {
    let catalog = Catalog::load(catalog_path)?;
    let matrix = SimilarityMatrix::load(similarity_path)?;
    matrix.ensure_matches(&catalog)?;
    Ok((catalog, matrix))
}
