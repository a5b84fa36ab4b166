pub mod authors;
pub mod cumulative;
pub mod pages;
pub mod publication;
pub mod ratings;
pub mod read_status;
pub mod registry;
pub mod title_words;

pub use authors::TopAuthors;
pub use cumulative::CumulativeAcquisitions;
pub use pages::PageLengths;
pub use publication::PublicationYears;
pub use ratings::RatingDistribution;
pub use read_status::ReadStatus;
pub use registry::{default_panels, PanelSpec, Pipeline, PipelineConfig};
pub use title_words::TitleWords;
