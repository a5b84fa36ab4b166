use crate::catalog::record::CatalogRecord;
use crate::catalog::table::{CatalogTable, YearRange};
use crate::math::stats::StatsHelper;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Headline numbers shown next to the charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSummary {
    pub year: Option<i32>,
    pub rows: usize,
    pub rated: usize,
    pub read: usize,
    pub unread: usize,
    pub distinct_authors: usize,
    /// Mean over every present rating, 0 included. Exports that write 0 for
    /// "not rated" pull this down.
    pub mean_rating: Option<f64>,
    pub total_pages: u64,
    pub year_range: Option<YearRange>,
}

impl CatalogSummary {
    pub fn compute(table: &CatalogTable, year: Option<i32>) -> Self {
        let rows: Vec<&CatalogRecord> = table.added_in(year).collect();
        let ratings: Vec<i64> = rows
            .iter()
            .filter_map(|record| record.rating.map(i64::from))
            .collect();
        let read = rows.iter().filter(|record| record.is_read()).count();
        let distinct_authors = rows
            .iter()
            .map(|record| record.author.as_str())
            .filter(|author| !author.is_empty())
            .collect::<HashSet<_>>()
            .len();
        let total_pages = rows
            .iter()
            .filter_map(|record| record.pages)
            .map(u64::from)
            .sum();

        Self {
            year,
            rows: rows.len(),
            rated: ratings.len(),
            read,
            unread: rows.len() - read,
            distinct_authors,
            mean_rating: (!ratings.is_empty()).then(|| StatsHelper::mean(&ratings)),
            total_pages,
            year_range: table.year_range(),
        }
    }
}
