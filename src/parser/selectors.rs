//! CSS selectors for listing-page tables
//!
//! Selectors are parsed once and shared by every extractor instance.

use lazy_static::lazy_static;
use scraper::Selector;

// Selector literals are constants; a parse failure is a programming error
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    static ref TABLE: Selector = parse_selector!("table");
    static ref HEADER_CELL: Selector = parse_selector!("th");
    static ref ROW: Selector = parse_selector!("tr");
    static ref DATA_CELL: Selector = parse_selector!("td");
}

/// Selectors for the listing table
#[derive(Debug, Clone, Copy)]
pub struct TableSelectors {
    pub table: &'static Selector,
    pub header_cell: &'static Selector,
    pub row: &'static Selector,
    pub data_cell: &'static Selector,
}

impl TableSelectors {
    pub fn new() -> Self {
        Self {
            table: &TABLE,
            header_cell: &HEADER_CELL,
            row: &ROW,
            data_cell: &DATA_CELL,
        }
    }
}

impl Default for TableSelectors {
    fn default() -> Self {
        Self::new()
    }
}
