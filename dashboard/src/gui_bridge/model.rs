use crate::workflow::runner::DashboardReport;
use serde::{Deserialize, Serialize};

/// State served to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub status: String,
    pub report: Option<DashboardReport>,
}

impl VisualizationModel {
    pub fn ready(status: impl Into<String>, report: DashboardReport) -> Self {
        Self {
            status: status.into(),
            report: Some(report),
        }
    }
}
