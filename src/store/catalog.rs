use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::{Item, ItemId},
};

/// Raw catalog row; columns other than these are ignored
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "external_id")]
    movie_id: String,
    title: String,
}

/// Ordered, immutable collection of catalog items
///
/// Row order in the source artifact defines each item's index, which is also
/// its row/column in the similarity matrix.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Loads the catalog from a CSV file with `movie_id` and `title` columns
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| AppError::Load(format!("catalog {}: {}", path.display(), e)))?;

        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            items = catalog.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    /// Parses catalog CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            rows.push((ItemId::parse(&row.movie_id), row.title));
        }

        if rows.is_empty() {
            return Err(AppError::Load("catalog contains no items".to_string()));
        }

        Ok(Self::from_entries(rows))
    }

    /// Builds a catalog from `(external_id, title)` pairs in index order
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ItemId, S)>,
        S: Into<String>,
    {
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(index, (external_id, title))| Item {
                index,
                external_id,
                title: title.into(),
            })
            .collect();

        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolves a title to its index
    ///
    /// Titles are not guaranteed unique. When several items share the title,
    /// the one that comes first in catalog order wins.
    pub fn get_index_by_title(&self, title: &str) -> AppResult<usize> {
        self.items
            .iter()
            .find(|item| item.title == title)
            .map(|item| item.index)
            .ok_or_else(|| AppError::NotFound(format!("No item titled '{}'", title)))
    }

    pub fn get_item(&self, index: usize) -> AppResult<&Item> {
        self.items.get(index).ok_or(AppError::Index {
            index,
            len: self.items.len(),
        })
    }

    /// All titles in catalog order, for populating a selection control
    pub fn all_titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MOVIES_CSV: &str = "\
movie_id,title,tags
19995,Avatar,action adventure fantasy
285,Pirates of the Caribbean: At World's End,adventure fantasy
206647,Spectre,action adventure crime
49026,The Dark Knight Rises,action crime drama
";

    #[test]
    fn test_from_reader_assigns_indices_in_row_order() {
        let catalog = Catalog::from_reader(MOVIES_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 4);

        let spectre = catalog.get_item(2).unwrap();
        assert_eq!(spectre.index, 2);
        assert_eq!(spectre.title, "Spectre");
        assert_eq!(spectre.external_id, ItemId::Numeric(206647));
    }

    #[test]
    fn test_external_id_alias_and_string_ids() {
        let csv = "external_id,title\ntt0499549,Avatar\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            catalog.get_item(0).unwrap().external_id,
            ItemId::Text("tt0499549".to_string())
        );
    }

    #[test]
    fn test_missing_title_column_is_load_error() {
        let csv = "movie_id,name\n1,Avatar\n";
        let result = Catalog::from_reader(csv.as_bytes());
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_empty_catalog_is_load_error() {
        let result = Catalog::from_reader("movie_id,title\n".as_bytes());
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let result = Catalog::load("/nonexistent/movies.csv");
        assert!(matches!(result, Err(AppError::Load(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MOVIES_CSV.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_get_index_by_title() {
        let catalog = Catalog::from_reader(MOVIES_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.get_index_by_title("The Dark Knight Rises").unwrap(), 3);
    }

    #[test]
    fn test_get_index_by_title_not_found() {
        let catalog = Catalog::from_reader(MOVIES_CSV.as_bytes()).unwrap();
        let result = catalog.get_index_by_title("avatar");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first() {
        let catalog = Catalog::from_entries([
            (ItemId::Numeric(1), "Heat"),
            (ItemId::Numeric(2), "Alien"),
            (ItemId::Numeric(3), "Heat"),
        ]);
        assert_eq!(catalog.get_index_by_title("Heat").unwrap(), 0);
    }

    #[test]
    fn test_get_item_out_of_bounds() {
        let catalog = Catalog::from_reader(MOVIES_CSV.as_bytes()).unwrap();
        let result = catalog.get_item(4);
        assert!(matches!(result, Err(AppError::Index { index: 4, len: 4 })));
    }

    #[test]
    fn test_all_titles_in_catalog_order() {
        let catalog = Catalog::from_reader(MOVIES_CSV.as_bytes()).unwrap();
        assert_eq!(
            catalog.all_titles(),
            vec![
                "Avatar",
                "Pirates of the Caribbean: At World's End",
                "Spectre",
                "The Dark Knight Rises"
            ]
        );
    }
}
