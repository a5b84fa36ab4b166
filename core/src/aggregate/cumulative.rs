use crate::catalog::CatalogTable;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};
use chrono::NaiveDate;

/// Running count of catalog additions ordered by `date_added`.
#[derive(Default)]
pub struct CumulativeAcquisitions;

impl Aggregation for CumulativeAcquisitions {
    fn metric(&self) -> Metric {
        Metric::CumulativeAcquisitions
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        let mut dates: Vec<NaiveDate> = table
            .added_in(year)
            .filter_map(|record| record.date_added)
            .collect();
        dates.sort();

        let points = dates
            .into_iter()
            .zip(1i64..)
            .map(|(date, running)| DatasetPoint::new(Category::Date(date), running))
            .collect();
        DerivedDataset::new(self.metric(), year, points)
    }
}
