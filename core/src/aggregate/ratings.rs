use crate::catalog::CatalogTable;
use crate::math::stats::StatsHelper;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};
use crate::telemetry::LogManager;

/// Frequency of each rating value (0..=5) in the scoped rows.
pub struct RatingDistribution {
    logger: LogManager,
}

impl RatingDistribution {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("ratings"),
        }
    }
}

impl Default for RatingDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregation for RatingDistribution {
    fn metric(&self) -> Metric {
        Metric::RatingDistribution
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        let mut counts = [0i64; 6];
        let mut ratings = Vec::new();
        for rating in table.added_in(year).filter_map(|record| record.rating) {
            if let Some(slot) = counts.get_mut(usize::from(rating)) {
                *slot += 1;
                ratings.push(i64::from(rating));
            }
        }

        let points: Vec<DatasetPoint> = counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(rating, &count)| DatasetPoint::new(Category::Rating(rating as u8), count))
            .collect();

        self.logger
            .trace(&format!("{} ratings across {} values", ratings.len(), points.len()));
        DerivedDataset::new(self.metric(), year, points)
            .with_summary(StatsHelper::summarize(&ratings))
    }
}
