use crate::catalog::Catalog;
use crate::error::LabError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const ALIASES_JSON: &str = include_str!("../../../../data/aliases.json");

/// Synonym table mapping free-text test names to canonical catalog names.
///
/// Keys are stored lower-cased and trimmed, so lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct AliasTable {
    map: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> AliasTable {
        AliasTable::default()
    }

    pub fn insert(&mut self, raw: &str, canonical: impl Into<String>) {
        self.map.insert(alias_key(raw), canonical.into());
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.map.get(&alias_key(raw)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(alias, canonical)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = AliasTable::new();
        for (raw, canonical) in iter {
            table.insert(raw.as_ref(), canonical);
        }
        table
    }
}

impl From<HashMap<String, String>> for AliasTable {
    fn from(map: HashMap<String, String>) -> AliasTable {
        map.into_iter().collect()
    }
}

impl From<AliasTable> for HashMap<String, String> {
    fn from(table: AliasTable) -> HashMap<String, String> {
        table.map
    }
}

fn alias_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolves raw test names to canonical catalog names.
///
/// Lookup order:
/// 1. Alias table (case-insensitive)
/// 2. Catalog test names (case-insensitive), returning the catalog's casing
/// 3. The trimmed input, unchanged
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer<'a> {
    aliases: &'a AliasTable,
    catalog: &'a Catalog,
}

impl<'a> Canonicalizer<'a> {
    pub fn new(aliases: &'a AliasTable, catalog: &'a Catalog) -> Canonicalizer<'a> {
        Canonicalizer { aliases, catalog }
    }

    pub fn canonicalize(&self, raw: &str) -> String {
        if let Some(canonical) = self.aliases.get(raw) {
            return canonical.to_string();
        }

        if let Some(location) = self.catalog.find_test(raw) {
            return location.test.name.clone();
        }

        tracing::trace!(name = raw, "no alias or catalog entry; passing name through");
        raw.trim().to_string()
    }
}

/// Load an alias table from a JSON file.
pub fn load_aliases(path: &Path) -> Result<AliasTable, LabError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabError::AliasesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| LabError::AliasesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse an alias table from a JSON string.
pub fn parse_aliases_str(json: &str) -> Result<AliasTable, LabError> {
    Ok(serde_json::from_str(json)?)
}

/// The alias table bundled with the crate.
pub fn builtin_aliases() -> Result<AliasTable, LabError> {
    parse_aliases_str(ALIASES_JSON)
}
