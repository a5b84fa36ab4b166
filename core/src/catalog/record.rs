use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One normalized row of a catalog export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogRecord {
    pub title: String,
    pub author: String,
    pub rating: Option<u8>,
    pub pages: Option<u32>,
    pub year_published: Option<i32>,
    pub date_added: Option<NaiveDate>,
    pub date_read: Option<NaiveDate>,
    pub read_count: Option<u32>,
}

impl CatalogRecord {
    pub fn is_read(&self) -> bool {
        self.read_count.unwrap_or(0) > 0
    }

    pub fn added_year(&self) -> Option<i32> {
        self.date_added.map(|date| date.year())
    }

    pub fn read_year(&self) -> Option<i32> {
        self.date_read.map(|date| date.year())
    }

    /// True when the row takes part in an aggregate scoped to `year`.
    pub fn added_in(&self, year: Option<i32>) -> bool {
        match year {
            Some(year) => self.added_year() == Some(year),
            None => true,
        }
    }

    pub fn read_in(&self, year: Option<i32>) -> bool {
        match year {
            Some(year) => self.read_year() == Some(year),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_read_count_counts_as_unread() {
        let record = CatalogRecord::default();
        assert!(!record.is_read());
        let record = CatalogRecord {
            read_count: Some(2),
            ..Default::default()
        };
        assert!(record.is_read());
    }

    #[test]
    fn year_scope_requires_a_date() {
        let record = CatalogRecord::default();
        assert!(record.added_in(None));
        assert!(!record.added_in(Some(2023)));

        let record = CatalogRecord {
            date_added: NaiveDate::from_ymd_opt(2023, 4, 1),
            ..Default::default()
        };
        assert!(record.added_in(Some(2023)));
        assert!(!record.added_in(Some(2022)));
    }
}
