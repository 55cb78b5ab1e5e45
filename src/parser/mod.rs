//! HTML parsing and data extraction
//!
//! This module turns listing pages into [`Record`](crate::models::Record)s.

pub mod selectors;
pub mod table;

pub use selectors::TableSelectors;
pub use table::{extract, TableExtractor};
