use crate::prelude::{CatalogError, CatalogResult};
use csv::ByteRecord;
use std::borrow::Cow;

/// Columns of the catalog export this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Author,
    MyRating,
    NumberOfPages,
    YearPublished,
    DateAdded,
    DateRead,
    ReadCount,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Title,
        Column::Author,
        Column::MyRating,
        Column::NumberOfPages,
        Column::YearPublished,
        Column::DateAdded,
        Column::DateRead,
        Column::ReadCount,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Author => "Author",
            Column::MyRating => "My Rating",
            Column::NumberOfPages => "Number of Pages",
            Column::YearPublished => "Year Published",
            Column::DateAdded => "Date Added",
            Column::DateRead => "Date Read",
            Column::ReadCount => "Read Count",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Position of each known column in the source header.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: [Option<usize>; 8],
}

impl ColumnMap {
    /// Fails only when none of the known columns are present.
    pub fn resolve(headers: &ByteRecord) -> CatalogResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|field| normalize_header(&String::from_utf8_lossy(field)))
            .collect();

        let mut map = ColumnMap::default();
        for column in Column::ALL {
            let wanted = column.header().to_lowercase();
            map.positions[column.slot()] = normalized.iter().position(|name| *name == wanted);
        }

        if map.positions.iter().all(Option::is_none) {
            return Err(CatalogError::Schema {
                missing: map.missing(),
            });
        }
        Ok(map)
    }

    pub fn contains(&self, column: Column) -> bool {
        self.positions[column.slot()].is_some()
    }

    pub fn missing(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .filter(|column| !self.contains(**column))
            .map(|column| column.header().to_string())
            .collect()
    }

    /// Trimmed cell for `column`, or `None` when the column or cell is missing.
    pub fn cell<'r>(&self, column: Column, row: &'r ByteRecord) -> Option<Cow<'r, str>> {
        let position = self.positions[column.slot()]?;
        let raw = row.get(position)?;
        match String::from_utf8_lossy(raw) {
            Cow::Borrowed(text) => Some(Cow::Borrowed(text.trim())),
            Cow::Owned(text) => Some(Cow::Owned(text.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_matches_headers_loosely() {
        let headers = ByteRecord::from(vec!["\u{feff}title", " Author ", "My  Rating", "Extra"]);
        let map = ColumnMap::resolve(&headers).unwrap();
        assert!(map.contains(Column::Title));
        assert!(map.contains(Column::Author));
        assert!(map.contains(Column::MyRating));
        assert!(!map.contains(Column::DateRead));
        assert_eq!(map.missing().len(), 5);
    }

    #[test]
    fn resolve_rejects_unrelated_files() {
        let headers = ByteRecord::from(vec!["id", "price", "qty"]);
        match ColumnMap::resolve(&headers) {
            Err(CatalogError::Schema { missing }) => {
                assert_eq!(missing.len(), 8);
                assert!(missing.contains(&"Date Added".to_string()));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn cell_handles_short_rows() {
        let headers = ByteRecord::from(vec!["Title", "Author"]);
        let map = ColumnMap::resolve(&headers).unwrap();
        let row = ByteRecord::from(vec!["  Dune "]);
        assert_eq!(map.cell(Column::Title, &row).as_deref(), Some("Dune"));
        assert!(map.cell(Column::Author, &row).is_none());
        assert!(map.cell(Column::DateAdded, &row).is_none());
    }
}
