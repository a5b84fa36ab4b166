use crate::catalog::CatalogTable;
use crate::math::stats::SummaryStats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metrics the aggregation pipeline knows how to derive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RatingDistribution,
    TopAuthors,
    CumulativeAcquisitions,
    PageLengths,
    ReadStatus,
    PublicationYears,
    TitleWords,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::RatingDistribution,
        Metric::TopAuthors,
        Metric::CumulativeAcquisitions,
        Metric::PageLengths,
        Metric::ReadStatus,
        Metric::PublicationYears,
        Metric::TitleWords,
    ];

    /// Base title shown above the chart, without any year suffix.
    pub fn base_title(self) -> &'static str {
        match self {
            Metric::RatingDistribution => "Distribution of Book Ratings",
            Metric::TopAuthors => "Most Common Authors",
            Metric::CumulativeAcquisitions => "Cumulative Number of Books Added",
            Metric::PageLengths => "Distribution of Book Lengths",
            Metric::ReadStatus => "Read vs. Unread Books",
            Metric::PublicationYears => "Distribution of Publication Years",
            Metric::TitleWords => "Word Cloud of Book Titles Read",
        }
    }

    pub fn title(self, year: Option<i32>) -> String {
        match year {
            Some(year) => format!("{} in {}", self.base_title(), year),
            None => self.base_title().to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_title())
    }
}

/// Rendering hint handed to the presentation layer alongside a dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    HorizontalBar,
    Line,
    Pie,
    WordCloud,
}

/// Key of a single dataset point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rating(u8),
    Author(String),
    Date(NaiveDate),
    Item(String),
    Bucket(String),
    Year(i32),
    Word(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetPoint {
    pub category: Category,
    pub value: i64,
}

impl DatasetPoint {
    pub fn new(category: Category, value: i64) -> Self {
        Self { category, value }
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedDataset {
    pub metric: Metric,
    pub title: String,
    pub year: Option<i32>,
    pub points: Vec<DatasetPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryStats>,
}

impl DerivedDataset {
    pub fn new(metric: Metric, year: Option<i32>, points: Vec<DatasetPoint>) -> Self {
        Self {
            metric,
            title: metric.title(year),
            year,
            points,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: Option<SummaryStats>) -> Self {
        self.summary = summary;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.points.iter().map(|point| point.value)
    }

    pub fn total(&self) -> i64 {
        self.values().sum()
    }
}

/// Common error type for catalog loading.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("schema error: missing columns {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv failure: {0}")]
    Csv(#[from] csv::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// A malformed cell that was replaced by an absent value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line in the source, header included.
    pub line: usize,
    pub column: String,
    pub value: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: unparseable {} value {:?}",
            self.line, self.column, self.value
        )
    }
}

/// Trait implemented by every aggregation in the pipeline.
///
/// Aggregations are total: any normalized table, including an empty one,
/// yields a dataset.
pub trait Aggregation {
    fn metric(&self) -> Metric;

    /// Whether a year filter changes the result.
    fn is_year_scoped(&self) -> bool {
        true
    }

    fn compute(&self, table: &CatalogTable, year: Option<i32>) -> DerivedDataset;
}
