use super::{parse_catalog_str, Catalog};
use crate::error::LabError;

const CATALOG_JSON: &str = include_str!("../../../../data/catalog.json");

/// Load the reference catalog bundled with the crate.
pub fn load_builtin() -> Result<Catalog, LabError> {
    parse_catalog_str(CATALOG_JSON)
}
