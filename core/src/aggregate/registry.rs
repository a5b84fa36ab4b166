use crate::aggregate::{
    CumulativeAcquisitions, PageLengths, PublicationYears, RatingDistribution, ReadStatus,
    TitleWords, TopAuthors,
};
use crate::aggregate::authors::DEFAULT_TOP_AUTHORS;
use crate::aggregate::title_words::{DEFAULT_MAX_WORDS, DEFAULT_MIN_WORD_LEN};
use crate::catalog::CatalogTable;
use crate::prelude::{Aggregation, ChartKind, DerivedDataset, Metric};
use serde::{Deserialize, Serialize};

/// Tunables shared by the aggregations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineConfig {
    pub top_authors: usize,
    pub max_words: usize,
    pub min_word_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_authors: DEFAULT_TOP_AUTHORS,
            max_words: DEFAULT_MAX_WORDS,
            min_word_len: DEFAULT_MIN_WORD_LEN,
        }
    }
}

/// Declarative description of one dashboard panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelSpec {
    pub metric: Metric,
    pub chart: ChartKind,
    pub year_scoped: bool,
}

impl PanelSpec {
    pub fn new(metric: Metric, chart: ChartKind, year_scoped: bool) -> Self {
        Self {
            metric,
            chart,
            year_scoped,
        }
    }
}

/// Panels in the order the dashboard lays them out.
pub fn default_panels() -> Vec<PanelSpec> {
    vec![
        PanelSpec::new(Metric::RatingDistribution, ChartKind::Histogram, true),
        PanelSpec::new(Metric::CumulativeAcquisitions, ChartKind::Line, true),
        PanelSpec::new(Metric::TopAuthors, ChartKind::HorizontalBar, true),
        PanelSpec::new(Metric::PageLengths, ChartKind::Histogram, true),
        PanelSpec::new(Metric::ReadStatus, ChartKind::Pie, true),
        PanelSpec::new(Metric::TitleWords, ChartKind::WordCloud, true),
        PanelSpec::new(Metric::PublicationYears, ChartKind::Histogram, false),
    ]
}

/// Dispatches metrics to their aggregation.
pub struct Pipeline {
    ratings: RatingDistribution,
    authors: TopAuthors,
    cumulative: CumulativeAcquisitions,
    pages: PageLengths,
    read_status: ReadStatus,
    publication: PublicationYears,
    title_words: TitleWords,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            ratings: RatingDistribution::new(),
            authors: TopAuthors::new(config.top_authors),
            cumulative: CumulativeAcquisitions,
            pages: PageLengths,
            read_status: ReadStatus,
            publication: PublicationYears,
            title_words: TitleWords::new(config.max_words, config.min_word_len),
        }
    }

    pub fn aggregation(&self, metric: Metric) -> &dyn Aggregation {
        match metric {
            Metric::RatingDistribution => &self.ratings,
            Metric::TopAuthors => &self.authors,
            Metric::CumulativeAcquisitions => &self.cumulative,
            Metric::PageLengths => &self.pages,
            Metric::ReadStatus => &self.read_status,
            Metric::PublicationYears => &self.publication,
            Metric::TitleWords => &self.title_words,
        }
    }

    pub fn compute(&self, metric: Metric, table: &CatalogTable, year: Option<i32>) -> DerivedDataset {
        self.aggregation(metric).compute(table, year)
    }

    /// Every metric for one scope, in [`Metric::ALL`] order.
    pub fn compute_all(&self, table: &CatalogTable, year: Option<i32>) -> Vec<DerivedDataset> {
        Metric::ALL
            .iter()
            .map(|metric| self.compute(*metric, table, year))
            .collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}
