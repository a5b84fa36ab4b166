use crate::workflow::config::DashboardConfig;
use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use shelfcore::aggregate::{PanelSpec, Pipeline};
use shelfcore::telemetry::{MetricsRecorder, MetricsSnapshot};
use shelfcore::{CatalogReader, CatalogSummary, CatalogTable, DerivedDataset, ParseWarning, YearRange};
use std::path::Path;
use std::sync::Arc;

/// One panel rendered side by side: whole catalog and the selected year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelResult {
    pub spec: PanelSpec,
    pub all_time: DerivedDataset,
    pub scoped: Option<DerivedDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardReport {
    pub year: Option<i32>,
    pub year_range: Option<YearRange>,
    pub summary: CatalogSummary,
    pub scoped_summary: Option<CatalogSummary>,
    pub panels: Vec<PanelResult>,
    pub warnings: Vec<ParseWarning>,
    pub missing_columns: Vec<String>,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: DashboardConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<CatalogTable> {
        let path = path.as_ref();
        let table = CatalogReader::new()
            .load_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        self.metrics
            .record_catalog(table.len(), table.warnings().len());
        Ok(table)
    }

    pub fn load_str(&self, contents: &str) -> anyhow::Result<CatalogTable> {
        let table = CatalogReader::new()
            .load_str(contents)
            .context("loading uploaded catalog")?;
        self.metrics
            .record_catalog(table.len(), table.warnings().len());
        Ok(table)
    }

    /// Picks the year to scope panels to: the requested year clamped into
    /// the catalog's range, or the latest year when none is requested.
    pub fn resolve_year(table: &CatalogTable, requested: Option<i32>) -> Option<i32> {
        let range = table.year_range()?;
        Some(requested.map_or(range.max, |year| range.clamp(year)))
    }

    pub fn execute(&self, table: &CatalogTable, requested_year: Option<i32>) -> DashboardReport {
        let pipeline = Pipeline::new(&self.config.to_pipeline_config());
        let year = Self::resolve_year(table, requested_year);
        if let (Some(requested), Some(year)) = (requested_year, year) {
            if requested != year {
                info!("year {} outside catalog range, using {}", requested, year);
            }
        }

        let panels = self
            .config
            .panels
            .iter()
            .map(|spec| {
                let aggregation = pipeline.aggregation(spec.metric);
                let all_time = aggregation.compute(table, None);
                self.metrics.record_dataset();
                let scoped = match year {
                    Some(year) if spec.year_scoped && aggregation.is_year_scoped() => {
                        self.metrics.record_dataset();
                        Some(aggregation.compute(table, Some(year)))
                    }
                    _ => None,
                };
                PanelResult {
                    spec: *spec,
                    all_time,
                    scoped,
                }
            })
            .collect();

        DashboardReport {
            year,
            year_range: table.year_range(),
            summary: CatalogSummary::compute(table, None),
            scoped_summary: year.map(|year| CatalogSummary::compute(table, Some(year))),
            panels,
            warnings: table.warnings().to_vec(),
            missing_columns: table.missing_columns().to_vec(),
            metrics: self.metrics.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_example_catalog, GeneratorConfig};
    use shelfcore::{CatalogError, Metric};

    const CSV: &str = "Title,Author,My Rating,Number of Pages,Year Published,Date Added,Date Read,Read Count\n\
        Dune,Frank Herbert,5,412,1965,2021/03/04,2021/04/01,1\n\
        Emma,Jane Austen,4,474,1815,2023/01/09,,0\n\
        Circe,Madeline Miller,,393,2018,2023/06/30,2023/07/15,1\n";

    #[test]
    fn runner_builds_side_by_side_panels() {
        let runner = Runner::new(DashboardConfig::default());
        let table = runner.load_str(CSV).unwrap();
        let report = runner.execute(&table, None);

        assert_eq!(report.year, Some(2023));
        assert_eq!(report.year_range, Some(YearRange { min: 2021, max: 2023 }));
        assert_eq!(report.panels.len(), runner.config().panels.len());
        assert_eq!(report.summary.rows, 3);
        assert_eq!(report.scoped_summary.as_ref().unwrap().rows, 2);

        let ratings = &report.panels[0];
        assert_eq!(ratings.spec.metric, Metric::RatingDistribution);
        assert_eq!(ratings.all_time.total(), 2);
        let scoped = ratings.scoped.as_ref().unwrap();
        assert_eq!(scoped.title, "Distribution of Book Ratings in 2023");
        assert_eq!(scoped.total(), 1);

        let publication = report
            .panels
            .iter()
            .find(|panel| panel.spec.metric == Metric::PublicationYears)
            .unwrap();
        assert!(publication.scoped.is_none());
        assert_eq!(report.metrics.catalogs_loaded, 1);
    }

    #[test]
    fn requested_year_is_clamped() {
        let runner = Runner::new(DashboardConfig::default());
        let table = runner.load_str(CSV).unwrap();
        assert_eq!(Runner::resolve_year(&table, Some(1990)), Some(2021));
        assert_eq!(Runner::resolve_year(&table, Some(2022)), Some(2022));
        assert_eq!(runner.execute(&table, Some(2099)).year, Some(2023));
    }

    #[test]
    fn catalog_without_dates_has_no_scoped_panels() {
        let runner = Runner::new(DashboardConfig::default());
        let table = runner.load_str("Title,Author\nDune,Frank Herbert\n").unwrap();
        let report = runner.execute(&table, Some(2020));
        assert_eq!(report.year, None);
        assert!(report.panels.iter().all(|panel| panel.scoped.is_none()));
        assert_eq!(report.missing_columns.len(), 6);
        let cumulative = report
            .panels
            .iter()
            .find(|panel| panel.spec.metric == Metric::CumulativeAcquisitions)
            .unwrap();
        assert!(cumulative.all_time.is_empty());
    }

    #[test]
    fn schema_errors_survive_context() {
        let runner = Runner::new(DashboardConfig::default());
        let err = runner.load_str("a,b\n1,2\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::Schema { .. })
        ));
    }

    #[test]
    fn runner_handles_generated_catalog() {
        let runner = Runner::new(DashboardConfig::default());
        let csv = build_example_catalog(&GeneratorConfig::default()).unwrap();
        let table = runner.load_str(&csv).unwrap();
        let report = runner.execute(&table, None);
        let read_status = report
            .panels
            .iter()
            .find(|panel| panel.spec.metric == Metric::ReadStatus)
            .unwrap();
        assert_eq!(read_status.all_time.total(), table.len() as i64);
    }
}
