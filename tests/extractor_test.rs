//! Table extractor integration tests using HTML fixture files

use concursos::parser::{extract, TableExtractor};
use concursos::server::split_records;
use concursos::utils::error::ExtractError;
use proptest::prelude::*;
use std::fs;

/// Test fixture paths
const FIXTURES_DIR: &str = "tests/fixtures/html";

fn load_fixture(filename: &str) -> String {
    let path = format!("{FIXTURES_DIR}/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

// ============================================================================
// Fixture Tests
// ============================================================================

#[test]
fn test_listing_page() {
    let html = load_fixture("listing_pa.html");
    let records = extract(&html).unwrap();

    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["Órgão", "Vagas", "Situação"]
        );
    }

    assert_eq!(records[0].get("Órgão"), Some("Prefeitura de Belém"));
    assert_eq!(records[0].get("Vagas"), Some("320"));
    assert_eq!(records[2].get("Situação"), Some("Inscrições abertas"));
    assert_eq!(records[4].get("Órgão"), Some("Câmara de Ananindeua"));
}

#[test]
fn test_listing_page_classification() {
    let records = extract(&load_fixture("listing_pa.html")).unwrap();
    let (open, planned) = split_records(&records);

    let names = |records: &[&concursos::Record]| {
        records
            .iter()
            .map(|r| r.get("Órgão").unwrap_or_default().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        names(&open),
        vec!["Prefeitura de Belém", "UFPA", "Câmara de Ananindeua"]
    );
    assert_eq!(names(&planned), vec!["TJ-PA", "SEFA-PA"]);
}

#[test]
fn test_ragged_rows_skipped() {
    let records = extract(&load_fixture("listing_ragged.html")).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Órgão"), Some("SEDUC-AM"));
    assert_eq!(records[1].get("Órgão"), Some("UEA"));
}

#[test]
fn test_page_without_table() {
    let result = extract(&load_fixture("listing_no_table.html"));
    assert_eq!(result.unwrap_err(), ExtractError::NoTableFound);
}

#[test]
fn test_extraction_is_idempotent() {
    let html = load_fixture("listing_pa.html");
    let extractor = TableExtractor::new();

    assert_eq!(extractor.extract(&html), extractor.extract(&html));
}

// ============================================================================
// Property Tests
// ============================================================================

fn cell_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ]{0,10}[A-Za-z0-9]"
}

fn build_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<html><body><table><tr>");
    for header in headers {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{cell}</td>"));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></body></html>");
    html
}

proptest! {
    #[test]
    fn prop_well_formed_table_yields_one_record_per_row(
        (headers, rows) in prop::collection::hash_set(cell_text(), 1..6)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_flat_map(|headers| {
                let width = headers.len();
                (
                    Just(headers),
                    prop::collection::vec(prop::collection::vec(cell_text(), width), 0..8),
                )
            })
    ) {
        let records = extract(&build_table(&headers, &rows)).unwrap();

        prop_assert_eq!(records.len(), rows.len());
        for (record, row) in records.iter().zip(&rows) {
            prop_assert_eq!(record.keys().collect::<Vec<_>>(), headers.iter().map(String::as_str).collect::<Vec<_>>());
            prop_assert_eq!(record.values().collect::<Vec<_>>(), row.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn prop_rows_of_wrong_width_are_dropped(
        width in 2usize..5,
        short in 0usize..4,
        good in 0usize..4,
    ) {
        let headers: Vec<String> = (0..width).map(|i| format!("H{i}")).collect();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for i in 0..good {
            rows.push((0..width).map(|j| format!("v{i}{j}")).collect());
        }
        for i in 0..short {
            rows.push((0..width - 1).map(|j| format!("s{i}{j}")).collect());
        }

        let records = extract(&build_table(&headers, &rows)).unwrap();
        prop_assert_eq!(records.len(), good);
    }
}
