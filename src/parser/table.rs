//! Listing-table extraction
//!
//! Turns a listing page into records keyed by the table's header cells.
//! Ragged rows (ads, merged cells, footnotes) are dropped rather than
//! failing the whole page.

use scraper::{ElementRef, Html};

use crate::models::Record;
use crate::parser::selectors::TableSelectors;
use crate::utils::error::ExtractError;
use crate::utils::truncate_text;

/// Extracts records from the first `<table>` of a document
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor {
    selectors: TableSelectors,
}

impl TableExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selectors: TableSelectors::new(),
        }
    }

    /// Extract records from raw HTML
    ///
    /// The header is every `<th>` in the first table. Every `<tr>` after the
    /// first contributes one record when its `<td>` count equals the header
    /// count; other rows are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::NoTableFound` if the document has no table.
    /// A table without valid rows (or without headers) yields an empty vec.
    pub fn extract(&self, html: &str) -> Result<Vec<Record>, ExtractError> {
        let document = Html::parse_document(html);

        let table = document
            .select(self.selectors.table)
            .next()
            .ok_or(ExtractError::NoTableFound)?;

        let headers: Vec<String> = table
            .select(self.selectors.header_cell)
            .map(cell_text)
            .collect();

        if headers.is_empty() {
            tracing::debug!("Listing table has no header cells");
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in table.select(self.selectors.row).skip(1) {
            let cells: Vec<String> = row.select(self.selectors.data_cell).map(cell_text).collect();

            if cells.len() != headers.len() {
                skipped += 1;
                tracing::trace!(
                    expected = headers.len(),
                    found = cells.len(),
                    row = %truncate_text(&cells.join(" | "), 80),
                    "Skipping row with mismatched cell count"
                );
                continue;
            }

            records.push(headers.iter().cloned().zip(cells).collect());
        }

        tracing::debug!(
            columns = headers.len(),
            records = records.len(),
            skipped,
            "Extracted listing table"
        );

        Ok(records)
    }
}

/// Text content of a cell, trimmed of surrounding whitespace
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Extract records with a default extractor
pub fn extract(html: &str) -> Result<Vec<Record>, ExtractError> {
    TableExtractor::new().extract(html)
}
