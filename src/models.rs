// Core data structures for the concursos scraper

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One scraped table row: column header -> cell text
///
/// Keys are unique and keep source column order. Serializes as a JSON object
/// whose keys appear in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. A repeated header overwrites the earlier value but
    /// keeps the earlier position.
    pub(crate) fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == header) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Get a field value by header
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == header)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate fields in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Headers in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Cell values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Latest successfully scraped records for one region
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RegionSnapshot {
    /// Region code
    pub uf: &'static str,

    /// Records in source order
    pub records: Vec<Record>,

    /// When the last successful refresh committed; `None` until the first one
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl RegionSnapshot {
    /// Placeholder for a region that has never been refreshed
    pub fn empty(uf: &'static str) -> Self {
        Self {
            uf,
            records: Vec::new(),
            refreshed_at: None,
        }
    }

    /// Snapshot for a successful refresh, stamped now
    pub fn refreshed(uf: &'static str, records: Vec<Record>) -> Self {
        Self {
            uf,
            records,
            refreshed_at: Some(Utc::now()),
        }
    }

    /// Whether at least one refresh has succeeded for this region
    pub fn is_populated(&self) -> bool {
        self.refreshed_at.is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
