use anyhow::Context;
use serde::{Deserialize, Serialize};
use shelfcore::aggregate::{default_panels, PanelSpec, PipelineConfig};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub panels: Vec<PanelSpec>,
    pub top_authors: usize,
    pub max_words: usize,
    pub min_word_len: usize,
    pub bind: SocketAddr,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let pipeline = PipelineConfig::default();
        Self {
            panels: default_panels(),
            top_authors: pipeline.top_authors,
            max_words: pipeline.max_words,
            min_word_len: pipeline.min_word_len,
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            top_authors: self.top_authors,
            max_words: self.max_words,
            min_word_len: self.min_word_len,
        }
    }
}
