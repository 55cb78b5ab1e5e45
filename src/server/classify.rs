//! Open/planned classification and the per-region response body

use serde::Serialize;

use crate::models::{Record, RegionSnapshot};
use crate::regions::Region;

/// Substring that marks a record as planned, matched case-insensitively
pub const PLANNED_MARKER: &str = "previsto";

/// Body returned for a region with no records yet
pub const PENDING_MESSAGE: &str = "Os dados estão sendo coletados ou não há concursos disponíveis no momento. Tente novamente em alguns segundos.";

/// A record is planned when any of its values mentions "previsto"
pub fn is_planned(record: &Record) -> bool {
    record
        .values()
        .any(|value| value.to_lowercase().contains(PLANNED_MARKER))
}

/// Split records into `(open, planned)`, keeping snapshot order in each
pub fn split_records(records: &[Record]) -> (Vec<&Record>, Vec<&Record>) {
    records.iter().partition(|record| !is_planned(record))
}

/// JSON body for `GET /{uf}`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RegionBody<'a> {
    Listings {
        desenvolvido_por: &'a str,
        estado: &'static str,
        uf: &'static str,
        concursos_abertos: Vec<&'a Record>,
        concursos_previstos: Vec<&'a Record>,
    },
    Pending {
        desenvolvido_por: &'a str,
        estado: &'static str,
        uf: &'static str,
        message: &'static str,
    },
}

impl<'a> RegionBody<'a> {
    /// Build the body for a region's current snapshot
    pub fn new(developer: &'a str, region: &Region, snapshot: &'a RegionSnapshot) -> Self {
        if snapshot.is_empty() {
            return Self::Pending {
                desenvolvido_por: developer,
                estado: region.name,
                uf: region.code,
                message: PENDING_MESSAGE,
            };
        }

        let (open, planned) = split_records(&snapshot.records);
        Self::Listings {
            desenvolvido_por: developer,
            estado: region.name,
            uf: region.code,
            concursos_abertos: open,
            concursos_previstos: planned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionRegistry;
    use serde_json::json;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_is_planned() {
        assert!(is_planned(&record(&[("Situação", "Autorizado (PREVISTO)")])));
        assert!(is_planned(&record(&[("Órgão", "TJ-PA previsto"), ("Vagas", "10")])));
        assert!(!is_planned(&record(&[("Órgão", "UFPA"), ("Situação", "Inscrições abertas")])));
        assert!(!is_planned(&Record::new()));
    }

    #[test]
    fn test_split_keeps_order() {
        let records = vec![
            record(&[("Órgão", "A")]),
            record(&[("Órgão", "B previsto")]),
            record(&[("Órgão", "C")]),
            record(&[("Órgão", "D Previsto")]),
        ];

        let (open, planned) = split_records(&records);
        let names = |v: &[&Record]| v.iter().map(|r| r.get("Órgão").unwrap().to_string()).collect::<Vec<_>>();
        assert_eq!(names(&open), vec!["A", "C"]);
        assert_eq!(names(&planned), vec!["B previsto", "D Previsto"]);
    }

    #[test]
    fn test_pending_body() {
        let region = RegionRegistry::brazil().get("pa").unwrap();
        let snapshot = RegionSnapshot::empty("pa");
        let body = serde_json::to_value(RegionBody::new("Jeiel Miranda", region, &snapshot)).unwrap();

        assert_eq!(
            body,
            json!({
                "desenvolvido_por": "Jeiel Miranda",
                "estado": "Pará",
                "uf": "pa",
                "message": PENDING_MESSAGE,
            })
        );
    }

    #[test]
    fn test_listings_body() {
        let region = RegionRegistry::brazil().get("sp").unwrap();
        let snapshot = RegionSnapshot::refreshed(
            "sp",
            vec![
                record(&[("Órgão", "USP"), ("Situação", "Aberto")]),
                record(&[("Órgão", "TJ-SP"), ("Situação", "Previsto")]),
            ],
        );
        let body = serde_json::to_value(RegionBody::new("Dev", region, &snapshot)).unwrap();

        assert_eq!(body["estado"], "São Paulo");
        assert_eq!(body["concursos_abertos"], json!([{"Órgão": "USP", "Situação": "Aberto"}]));
        assert_eq!(body["concursos_previstos"][0]["Órgão"], "TJ-SP");
        assert!(body.get("message").is_none());
    }
}
