use crate::catalog::CatalogTable;
use crate::prelude::{Aggregation, Category, DatasetPoint, DerivedDataset, Metric};

pub const READ_BUCKET: &str = "Read Books";
pub const UNREAD_BUCKET: &str = "Unread Books";

/// Two-bucket split of the scoped rows by `read_count`.
#[derive(Default)]
pub struct ReadStatus;

impl Aggregation for ReadStatus {
    fn metric(&self) -> Metric {
        Metric::ReadStatus
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        let (read, unread) = table
            .added_in(year)
            .fold((0i64, 0i64), |(read, unread), record| {
                if record.is_read() {
                    (read + 1, unread)
                } else {
                    (read, unread + 1)
                }
            });

        let points = if read + unread == 0 {
            Vec::new()
        } else {
            vec![
                DatasetPoint::new(Category::Bucket(READ_BUCKET.into()), read),
                DatasetPoint::new(Category::Bucket(UNREAD_BUCKET.into()), unread),
            ]
        };
        DerivedDataset::new(self.metric(), year, points)
    }
}
