use std::cmp::Ordering;

use crate::{
    error::AppResult,
    models::{Item, ScoredItem},
    store::{Catalog, SimilarityMatrix},
};

/// Ranks catalog items by precomputed similarity to a selected item
///
/// Owns the catalog and matrix; both are read-only after construction, so a
/// single `Recommender` can serve concurrent requests behind an `Arc`.
#[derive(Debug)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl Recommender {
    /// Pairs a catalog with its matrix, rejecting mismatched dimensions
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> AppResult<Self> {
        matrix.ensure_matches(&catalog)?;
        Ok(Self { catalog, matrix })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolves a title to its catalog item
    pub fn find(&self, title: &str) -> AppResult<&Item> {
        let index = self.catalog.get_index_by_title(title)?;
        self.catalog.get_item(index)
    }

    /// Returns up to `k` items most similar to `selected_title`
    ///
    /// The selected item itself is always excluded, even if other items tie
    /// with its self-similarity score. Results are ordered by score descending,
    /// then by catalog index ascending, so output is deterministic.
    pub fn recommend(&self, selected_title: &str, k: usize) -> AppResult<Vec<ScoredItem>> {
        let index = self.catalog.get_index_by_title(selected_title)?;

        let mut candidates: Vec<(usize, f32)> = self
            .matrix
            .row(index)?
            .filter(|&(other, _)| other != index)
            .collect();

        if k < candidates.len() {
            candidates.select_nth_unstable_by(k, rank_order);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(rank_order);

        candidates
            .into_iter()
            .map(|(other, score)| {
                Ok(ScoredItem {
                    item: self.catalog.get_item(other)?.clone(),
                    score,
                })
            })
            .collect()
    }
}

/// Score descending, ties by index ascending
fn rank_order(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, models::ItemId};

    fn recommender(titles: &[&str], rows: Vec<Vec<f32>>) -> Recommender {
        let catalog = Catalog::from_entries(
            titles
                .iter()
                .enumerate()
                .map(|(i, title)| (ItemId::Numeric(i as u64 + 100), *title)),
        );
        let matrix = SimilarityMatrix::from_rows(rows).unwrap();
        Recommender::new(catalog, matrix).unwrap()
    }

    fn abcd() -> Recommender {
        recommender(
            &["A", "B", "C", "D"],
            vec![
                vec![1.0, 0.9, 0.9, 0.1],
                vec![0.9, 1.0, 0.3, 0.2],
                vec![0.9, 0.3, 1.0, 0.4],
                vec![0.1, 0.2, 0.4, 1.0],
            ],
        )
    }

    fn titles_and_scores(results: &[ScoredItem]) -> Vec<(&str, f32)> {
        results
            .iter()
            .map(|r| (r.item.title.as_str(), r.score))
            .collect()
    }

    #[test]
    fn test_ties_broken_by_index() {
        let results = abcd().recommend("A", 2).unwrap();
        assert_eq!(titles_and_scores(&results), vec![("B", 0.9), ("C", 0.9)]);
    }

    #[test]
    fn test_excludes_self_and_sorts_descending() {
        let results = abcd().recommend("D", 5).unwrap();
        assert_eq!(
            titles_and_scores(&results),
            vec![("C", 0.4), ("B", 0.2), ("A", 0.1)]
        );
    }

    #[test]
    fn test_length_is_min_of_k_and_n_minus_one() {
        let rec = abcd();
        for k in 0..6 {
            let results = rec.recommend("B", k).unwrap();
            assert_eq!(results.len(), k.min(3));
            assert!(results.iter().all(|r| r.item.title != "B"));
        }
    }

    #[test]
    fn test_k_zero_is_empty() {
        assert!(abcd().recommend("A", 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_item_catalog_is_empty() {
        let rec = recommender(&["Solo"], vec![vec![1.0]]);
        assert!(rec.recommend("Solo", 5).unwrap().is_empty());
    }

    #[test]
    fn test_self_excluded_by_index_not_position() {
        // B ties with A's self-score; only A itself is dropped
        let rec = recommender(
            &["A", "B", "C"],
            vec![
                vec![1.0, 1.0, 0.5],
                vec![1.0, 1.0, 0.5],
                vec![0.5, 0.5, 1.0],
            ],
        );
        let results = rec.recommend("A", 2).unwrap();
        assert_eq!(titles_and_scores(&results), vec![("B", 1.0), ("C", 0.5)]);
    }

    #[test]
    fn test_self_excluded_when_not_highest() {
        let rec = recommender(
            &["A", "B", "C"],
            vec![
                vec![0.2, 0.9, 0.5],
                vec![0.9, 1.0, 0.5],
                vec![0.5, 0.5, 1.0],
            ],
        );
        let results = rec.recommend("A", 3).unwrap();
        assert_eq!(titles_and_scores(&results), vec![("B", 0.9), ("C", 0.5)]);
    }

    #[test]
    fn test_partial_selection_matches_full_sort() {
        let titles: Vec<String> = (0..20).map(|i| format!("M{}", i)).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let rows: Vec<Vec<f32>> = (0..20)
            .map(|i| (0..20).map(|j| ((i * 7 + j * 3) % 5) as f32 / 4.0).collect())
            .collect();
        let rec = recommender(&title_refs, rows);

        let top = rec.recommend("M3", 6).unwrap();
        let all = rec.recommend("M3", 19).unwrap();
        assert_eq!(top, all[..6].to_vec());

        for pair in all.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].item.index < pair[1].item.index);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let rec = abcd();
        assert_eq!(rec.recommend("C", 3).unwrap(), rec.recommend("C", 3).unwrap());
    }

    #[test]
    fn test_unknown_title_not_found() {
        let result = abcd().recommend("Z", 3);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_new_rejects_mismatched_dimensions() {
        let catalog = Catalog::from_entries([(ItemId::Numeric(1), "A"), (ItemId::Numeric(2), "B")]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        assert!(matches!(
            Recommender::new(catalog, matrix),
            Err(AppError::Consistency(_))
        ));
    }

    #[test]
    fn test_find() {
        let rec = abcd();
        let item = rec.find("C").unwrap();
        assert_eq!(item.index, 2);
        assert_eq!(item.external_id, ItemId::Numeric(102));
    }
}
