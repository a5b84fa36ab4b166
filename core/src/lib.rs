//! Catalog ingestion and aggregation core for the reading-history dashboard.
//!
//! A catalog export is normalized once into an immutable [`CatalogTable`];
//! each aggregation then derives a fresh [`DerivedDataset`] from it, optionally
//! scoped to the year items were added.

pub mod aggregate;
pub mod catalog;
pub mod ingest;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use aggregate::{PanelSpec, Pipeline, PipelineConfig};
pub use catalog::{CatalogRecord, CatalogSummary, CatalogTable, YearRange};
pub use ingest::CatalogReader;
pub use prelude::{
    Aggregation, CatalogError, CatalogResult, Category, ChartKind, DatasetPoint, DerivedDataset,
    Metric, ParseWarning,
};
