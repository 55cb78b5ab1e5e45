//! Registry of Brazil's federative units
//!
//! The registry is the single source of truth for valid region codes. Its
//! order is preserved everywhere regions are listed.

use serde::Serialize;

/// One federative unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    /// Lowercase two-letter code (e.g. "pa")
    pub code: &'static str,

    /// Display name (e.g. "Pará")
    pub name: &'static str,
}

const REGIONS: &[Region] = &[
    Region { code: "ac", name: "Acre" },
    Region { code: "al", name: "Alagoas" },
    Region { code: "ap", name: "Amapá" },
    Region { code: "am", name: "Amazonas" },
    Region { code: "ba", name: "Bahia" },
    Region { code: "ce", name: "Ceará" },
    Region { code: "df", name: "Distrito Federal" },
    Region { code: "es", name: "Espírito Santo" },
    Region { code: "go", name: "Goiás" },
    Region { code: "ma", name: "Maranhão" },
    Region { code: "mt", name: "Mato Grosso" },
    Region { code: "ms", name: "Mato Grosso do Sul" },
    Region { code: "mg", name: "Minas Gerais" },
    Region { code: "pa", name: "Pará" },
    Region { code: "pb", name: "Paraíba" },
    Region { code: "pr", name: "Paraná" },
    Region { code: "pe", name: "Pernambuco" },
    Region { code: "pi", name: "Piauí" },
    Region { code: "rj", name: "Rio de Janeiro" },
    Region { code: "rn", name: "Rio Grande do Norte" },
    Region { code: "rs", name: "Rio Grande do Sul" },
    Region { code: "ro", name: "Rondônia" },
    Region { code: "rr", name: "Roraima" },
    Region { code: "sc", name: "Santa Catarina" },
    Region { code: "sp", name: "São Paulo" },
    Region { code: "se", name: "Sergipe" },
    Region { code: "to", name: "Tocantins" },
];

/// Static region registry
#[derive(Debug, Clone, Copy)]
pub struct RegionRegistry {
    regions: &'static [Region],
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::brazil()
    }
}

impl RegionRegistry {
    /// The 26 states plus the Federal District
    #[must_use]
    pub const fn brazil() -> Self {
        Self { regions: REGIONS }
    }

    /// All regions in registry order
    pub fn list(&self) -> &'static [Region] {
        self.regions
    }

    /// Look up a region by code. Matching is case-insensitive.
    pub fn get(&self, code: &str) -> Option<&'static Region> {
        let code = code.to_lowercase();
        self.regions.iter().find(|r| r.code == code)
    }

    /// Check whether `code` names a registry region (case-insensitive)
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Registry codes in order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        self.regions.iter().map(|r| r.code)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_27_units() {
        let registry = RegionRegistry::brazil();
        assert_eq!(registry.len(), 27);
    }

    #[test]
    fn test_codes_are_unique_lowercase_pairs() {
        let registry = RegionRegistry::brazil();
        let codes: HashSet<_> = registry.codes().collect();
        assert_eq!(codes.len(), registry.len());

        for code in registry.codes() {
            assert_eq!(code.len(), 2);
            assert!(code.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = RegionRegistry::brazil();
        assert_eq!(registry.get("pa").map(|r| r.name), Some("Pará"));
        assert_eq!(registry.get("PA").map(|r| r.name), Some("Pará"));
        assert_eq!(registry.get("Sp").map(|r| r.name), Some("São Paulo"));
        assert!(registry.get("xx").is_none());
        assert!(!registry.contains(""));
    }

    #[test]
    fn test_registry_order() {
        let codes: Vec<_> = RegionRegistry::brazil().codes().take(4).collect();
        assert_eq!(codes, vec!["ac", "al", "ap", "am"]);
    }
}
