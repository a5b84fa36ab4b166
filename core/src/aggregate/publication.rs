use crate::catalog::CatalogTable;
use crate::math::stats::StatsHelper;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};

/// Publication years across the whole catalog. A year filter is ignored.
#[derive(Default)]
pub struct PublicationYears;

impl Aggregation for PublicationYears {
    fn metric(&self) -> Metric {
        Metric::PublicationYears
    }

    fn is_year_scoped(&self) -> bool {
        false
    }

    fn compute(&self, table: &CatalogTable, _year: Option<i32>) -> DerivedDataset {
        let points: Vec<DatasetPoint> = table
            .records()
            .iter()
            .filter_map(|record| record.year_published)
            .map(|year| DatasetPoint::new(Category::Year(year), i64::from(year)))
            .collect();

        let values: Vec<i64> = points.iter().map(|point| point.value).collect();
        DerivedDataset::new(self.metric(), None, points).with_summary(StatsHelper::summarize(&values))
    }
}
