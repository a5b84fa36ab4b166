pub mod frequency;
pub mod stats;

pub use frequency::FrequencyCounter;
pub use stats::{StatsHelper, SummaryStats};
