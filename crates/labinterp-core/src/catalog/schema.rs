use crate::parsing::range::ReferenceRange;
use serde::{Deserialize, Serialize};

/// How a test's result is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Number,
    /// Chosen from a fixed list of literal options.
    Select,
}

/// A single laboratory test definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDef {
    /// Canonical test name, unique within the catalog (case-insensitive).
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub normal_range: ReferenceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, rename = "type")]
    pub value_type: ValueType,
    /// Allowed literal values, in display order (select tests only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Short clinical description shown next to the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// A named group of related tests within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub name: String,
    pub tests: Vec<TestDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub panels: Vec<Panel>,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub categories: Vec<Category>,
}
