use std::{fs::File, io::Read, path::Path};

use crate::{
    error::{AppError, AppResult},
    store::Catalog,
};

/// Dense N×N matrix of precomputed pairwise similarity scores
///
/// Stored row-major in a single buffer. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Loads the matrix from a headerless CSV file, one matrix row per line
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AppError::Load(format!("similarity {}: {}", path.display(), e)))?;

        let matrix = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            dim = matrix.dim(),
            "Loaded similarity matrix"
        );

        Ok(matrix)
    }

    /// Parses matrix CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (row_idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = record
                .iter()
                .enumerate()
                .map(|(col_idx, field)| {
                    field.parse::<f32>().map_err(|e| {
                        AppError::Load(format!(
                            "invalid score '{}' at row {}, column {}: {}",
                            field, row_idx, col_idx, e
                        ))
                    })
                })
                .collect::<AppResult<Vec<f32>>>()?;
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    /// Builds a matrix from its rows, checking it is square and finite
    pub fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(AppError::Consistency(format!(
                    "similarity matrix is not square: row {} has {} columns, expected {}",
                    row_idx,
                    row.len(),
                    dim
                )));
            }
            if let Some(col_idx) = row.iter().position(|score| !score.is_finite()) {
                return Err(AppError::Load(format!(
                    "non-finite score at row {}, column {}",
                    row_idx, col_idx
                )));
            }
            scores.extend(row);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Every column of the given row, paired with its column index
    pub fn row(&self, index: usize) -> AppResult<impl Iterator<Item = (usize, f32)> + '_> {
        if index >= self.dim {
            return Err(AppError::Index {
                index,
                len: self.dim,
            });
        }

        let start = index * self.dim;
        Ok(self.scores[start..start + self.dim]
            .iter()
            .copied()
            .enumerate())
    }

    /// Fails unless the matrix has exactly one row and column per catalog item
    pub fn ensure_matches(&self, catalog: &Catalog) -> AppResult<()> {
        if self.dim != catalog.len() {
            return Err(AppError::Consistency(format!(
                "similarity matrix is {}x{} but catalog has {} items",
                self.dim,
                self.dim,
                catalog.len()
            )));
        }
        Ok(())
    }
}
