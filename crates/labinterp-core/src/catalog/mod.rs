pub mod builtin;
pub mod schema;

use crate::error::LabError;
use schema::{Category, CatalogDef, Panel, TestDef};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

/// The reference catalog: categories -> panels -> tests.
///
/// Test names are indexed case-insensitively when the catalog is built.
/// If the same name appears in several panels, the first one in catalog
/// order is the one lookups return.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CatalogDef", into = "CatalogDef")]
pub struct Catalog {
    categories: Vec<Category>,
    index: HashMap<String, (usize, usize, usize)>,
}

/// Where a test lives in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct TestLocation<'a> {
    pub category: &'a Category,
    pub panel: &'a Panel,
    pub test: &'a TestDef,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Catalog {
        let mut index = HashMap::new();
        for (ci, category) in categories.iter().enumerate() {
            for (pi, panel) in category.panels.iter().enumerate() {
                for (ti, test) in panel.tests.iter().enumerate() {
                    if let Entry::Vacant(slot) = index.entry(test.name.to_lowercase()) {
                        slot.insert((ci, pi, ti));
                    }
                }
            }
        }
        Catalog { categories, index }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Find a test by name, ignoring case.
    pub fn find_test(&self, name: &str) -> Option<TestLocation<'_>> {
        let &(ci, pi, ti) = self.index.get(&name.trim().to_lowercase())?;
        let category = &self.categories[ci];
        let panel = &category.panels[pi];
        Some(TestLocation {
            category,
            panel,
            test: &panel.tests[ti],
        })
    }

    /// Iterate every test in catalog order, duplicates included.
    pub fn tests(&self) -> impl Iterator<Item = TestLocation<'_>> {
        self.categories.iter().flat_map(|category| {
            category.panels.iter().flat_map(move |panel| {
                panel.tests.iter().map(move |test| TestLocation {
                    category,
                    panel,
                    test,
                })
            })
        })
    }

    /// Number of distinct test names.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl From<CatalogDef> for Catalog {
    fn from(def: CatalogDef) -> Catalog {
        Catalog::new(def.categories)
    }
}

impl From<Catalog> for CatalogDef {
    fn from(catalog: Catalog) -> CatalogDef {
        CatalogDef {
            categories: catalog.categories,
        }
    }
}

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog, LabError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a catalog from a JSON string.
pub fn parse_catalog(json: &str, source: &Path) -> Result<Catalog, LabError> {
    let catalog: Catalog = serde_json::from_str(json).map_err(|e| LabError::CatalogLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<Catalog, LabError> {
    let catalog: Catalog = serde_json::from_str(json).map_err(LabError::Json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
///
/// Range syntax is already checked while deserializing. Duplicate test
/// names are allowed (the first one wins) but logged.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), LabError> {
    if catalog.categories.is_empty() {
        return Err(LabError::CatalogInvalid(
            "categories must not be empty".into(),
        ));
    }

    let mut seen: HashMap<String, &str> = HashMap::new();
    for category in &catalog.categories {
        if category.name.trim().is_empty() {
            return Err(LabError::CatalogInvalid(format!(
                "category '{}' has an empty name",
                category.id
            )));
        }

        for panel in &category.panels {
            if panel.name.trim().is_empty() {
                return Err(LabError::CatalogInvalid(format!(
                    "panel '{}' in category '{}' has an empty name",
                    panel.id, category.name
                )));
            }

            for test in &panel.tests {
                if test.name.trim().is_empty() {
                    return Err(LabError::CatalogInvalid(format!(
                        "panel '{}' contains a test with an empty name",
                        panel.name
                    )));
                }

                if let Some(first_panel) = seen.insert(test.name.to_lowercase(), &panel.name) {
                    tracing::debug!(
                        test = %test.name,
                        first = first_panel,
                        duplicate = %panel.name,
                        "duplicate test name in catalog; first occurrence wins"
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "categories": [
            {
                "id": "biochemistry",
                "name": "Biochemistry",
                "panels": [
                    {
                        "id": "sugar",
                        "name": "Blood Sugar",
                        "tests": [
                            { "name": "Fasting Glucose", "unit": "mg/dL", "normalRange": "70-100" },
                            { "name": "HbA1c", "unit": "%", "normalRange": "<5.7" }
                        ]
                    },
                    {
                        "id": "minerals",
                        "name": "Minerals",
                        "tests": [
                            { "name": "Calcium", "unit": "mg/dL", "normalRange": "8.5-10.5" }
                        ]
                    }
                ]
            },
            {
                "id": "fluids",
                "name": "Body Fluids",
                "panels": [
                    {
                        "id": "kft",
                        "name": "Kidney Function Test (KFT)",
                        "tests": [
                            { "name": "calcium", "unit": "mg/dL", "normalRange": "8.0-10.0" },
                            { "name": "Urine Protein", "unit": "result", "normalRange": "Negative",
                              "type": "select", "options": ["Negative", "Trace", "1+"] }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_valid_catalog() {
        let catalog = parse_catalog_str(SMALL).unwrap();
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.tests().count(), 5);
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_find_test_case_insensitive() {
        let catalog = parse_catalog_str(SMALL).unwrap();
        let loc = catalog.find_test("fasting glucose").unwrap();
        assert_eq!(loc.test.name, "Fasting Glucose");
        assert_eq!(loc.panel.name, "Blood Sugar");
        assert_eq!(loc.category.name, "Biochemistry");
        assert!(catalog.find_test("Unknown Test").is_none());
    }

    #[test]
    fn test_duplicate_name_first_wins() {
        let catalog = parse_catalog_str(SMALL).unwrap();
        let loc = catalog.find_test("CALCIUM").unwrap();
        assert_eq!(loc.panel.name, "Minerals");
        assert_eq!(loc.test.name, "Calcium");
    }

    #[test]
    fn test_select_options_preserved() {
        let catalog = parse_catalog_str(SMALL).unwrap();
        let loc = catalog.find_test("Urine Protein").unwrap();
        assert_eq!(loc.test.value_type, schema::ValueType::Select);
        assert_eq!(loc.test.options, vec!["Negative", "Trace", "1+"]);
    }

    #[test]
    fn test_malformed_range_rejected_at_load() {
        let json = r#"{ "categories": [ { "id": "c", "name": "C", "panels": [
            { "id": "p", "name": "P", "tests": [ { "name": "X", "normalRange": "5-abc" } ] }
        ] } ] }"#;
        assert!(parse_catalog_str(json).is_err());
    }

    #[test]
    fn test_empty_categories_rejected() {
        assert!(parse_catalog_str(r#"{ "categories": [] }"#).is_err());
    }

    #[test]
    fn test_empty_test_name_rejected() {
        let json = r#"{ "categories": [ { "id": "c", "name": "C", "panels": [
            { "id": "p", "name": "P", "tests": [ { "name": "  ", "normalRange": "1-2" } ] }
        ] } ] }"#;
        assert!(parse_catalog_str(json).is_err());
    }
}
