pub mod record;
pub mod summary;
pub mod table;

pub use record::CatalogRecord;
pub use summary::CatalogSummary;
pub use table::{CatalogTable, YearRange};
