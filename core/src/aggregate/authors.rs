use crate::catalog::CatalogTable;
use crate::math::FrequencyCounter;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};

pub const DEFAULT_TOP_AUTHORS: usize = 10;

/// Most frequent authors, highest count first.
///
/// Equal counts keep the order in which authors first appear in the scoped
/// rows. That order follows the export and is not otherwise guaranteed.
pub struct TopAuthors {
    limit: usize,
}

impl TopAuthors {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for TopAuthors {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_AUTHORS)
    }
}

impl Aggregation for TopAuthors {
    fn metric(&self) -> Metric {
        Metric::TopAuthors
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        let counter: FrequencyCounter<&str> = table
            .added_in(year)
            .map(|record| record.author.as_str())
            .filter(|author| !author.is_empty())
            .collect();

        let points = counter
            .into_ranked(Some(self.limit))
            .into_iter()
            .map(|(author, count)| {
                DatasetPoint::new(Category::Author(author.to_string()), count as i64)
            })
            .collect();
        DerivedDataset::new(self.metric(), year, points)
    }
}
