use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Counters accumulated over a dashboard session.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub catalogs_loaded: usize,
    pub rows_ingested: usize,
    pub parse_warnings: usize,
    pub datasets_computed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_catalog(&self, rows: usize, warnings: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.catalogs_loaded += 1;
            metrics.rows_ingested += rows;
            metrics.parse_warnings += warnings;
        }
    }

    pub fn record_dataset(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.datasets_computed += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
