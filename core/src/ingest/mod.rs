pub mod columns;
pub mod parse;
pub mod reader;

pub use columns::{Column, ColumnMap};
pub use reader::CatalogReader;
