use serde::{Deserialize, Serialize};

/// Descriptive statistics over a set of integer observations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
}

pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[i64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let sum: i64 = values.iter().sum();
        sum as f64 / values.len() as f64
    }

    pub fn median(values: &[i64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        }
    }

    /// Returns `None` for an empty set.
    pub fn summarize(values: &[i64]) -> Option<SummaryStats> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        Some(SummaryStats {
            count: values.len(),
            mean: Self::mean(values),
            median: Self::median(values),
            min,
            max,
        })
    }
}
