use crate::catalog::CatalogTable;
use crate::math::stats::StatsHelper;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};

/// Page counts of every scoped item with a known length, in table order.
#[derive(Default)]
pub struct PageLengths;

impl Aggregation for PageLengths {
    fn metric(&self) -> Metric {
        Metric::PageLengths
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        let points: Vec<DatasetPoint> = table
            .added_in(year)
            .filter_map(|record| match record.pages {
                Some(pages) if pages > 0 => Some(DatasetPoint::new(
                    Category::Item(record.title.clone()),
                    i64::from(pages),
                )),
                _ => None,
            })
            .collect();

        let values: Vec<i64> = points.iter().map(|point| point.value).collect();
        DerivedDataset::new(self.metric(), year, points).with_summary(StatsHelper::summarize(&values))
    }
}
