use crate::catalog::record::CatalogRecord;
use crate::prelude::ParseWarning;
use serde::{Deserialize, Serialize};

/// Inclusive span of `date_added` years present in a catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }
}

/// Normalized, read-only catalog. One record per input row.
#[derive(Debug, Clone, Default)]
pub struct CatalogTable {
    records: Vec<CatalogRecord>,
    warnings: Vec<ParseWarning>,
    missing_columns: Vec<String>,
}

impl CatalogTable {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn with_diagnostics(
        records: Vec<CatalogRecord>,
        warnings: Vec<ParseWarning>,
        missing_columns: Vec<String>,
    ) -> Self {
        Self {
            records,
            warnings,
            missing_columns,
        }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Contract columns that were absent from the source header.
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    /// Rows whose `date_added` falls in `year`, or every row when unscoped.
    pub fn added_in(&self, year: Option<i32>) -> impl Iterator<Item = &CatalogRecord> + '_ {
        self.records.iter().filter(move |record| record.added_in(year))
    }

    pub fn year_range(&self) -> Option<YearRange> {
        let mut years = self.records.iter().filter_map(CatalogRecord::added_year);
        let first = years.next()?;
        let (min, max) = years.fold((first, first), |(lo, hi), year| (lo.min(year), hi.max(year)));
        Some(YearRange { min, max })
    }
}
