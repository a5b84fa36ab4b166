use crate::prelude::ParseWarning;
use log::{debug, info, warn};

/// Thin wrapper over the `log` facade, tagged with a component name.
pub struct LogManager {
    component: &'static str,
}

impl LogManager {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.component, message);
    }

    pub fn trace(&self, message: &str) {
        debug!("[{}] {}", self.component, message);
    }

    pub fn warning(&self, warning: &ParseWarning) {
        warn!("[{}] {}", self.component, warning);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("shelfcore")
    }
}
