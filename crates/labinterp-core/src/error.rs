use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LabError {
    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("failed to load alias table from {path}: {reason}")]
    AliasesLoad { path: PathBuf, reason: String },

    #[error("failed to load rule table from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid rule table: {0}")]
    RulesInvalid(String),

    #[error("invalid reference range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("failed to read observations: {0}")]
    ObservationsLoad(String),

    #[error("failed to load reference data from {path}: {reason}")]
    ReferencesLoad { path: PathBuf, reason: String },

    #[error("no reference data for test '{0}'")]
    ReferenceNotFound(String),

    #[error("reference lookup failed: {0}")]
    ReferenceLookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
