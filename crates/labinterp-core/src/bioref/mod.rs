//! Biological reference ranges and known assay interferences.
//!
//! Lookups go to the bundled local dataset first. A remote provider can be
//! attached (see [`remote`], behind the `remote` feature); its failures
//! are logged and treated as "no reference data".

#[cfg(feature = "remote")]
pub mod remote;

use crate::error::LabError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Reference information for one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BioReference {
    pub test: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interferences: Vec<Interference>,
    /// Where the entry came from ("local", a provider name, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl BioReference {
    /// True if the entry carries notes or interferences.
    pub fn has_interference_info(&self) -> bool {
        !self.notes.is_empty() || !self.interferences.is_empty()
    }
}

/// A substance or condition known to bias a test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Somewhere reference data can be looked up by test name.
///
/// `Ok(None)` means the source has nothing for the test; `Err` means the
/// lookup itself failed.
pub trait ReferenceSource {
    fn reference(&self, test: &str) -> Result<Option<BioReference>, LabError>;
    fn interferences(&self, test: &str) -> Result<Option<BioReference>, LabError>;

    /// Reference and interferences in a single lookup, for sources that
    /// offer one. The default has nothing.
    fn combined(&self, _test: &str) -> Result<Option<BioReference>, LabError> {
        Ok(None)
    }
}

/// Reference data held in memory, keyed by exact test name.
#[derive(Debug, Clone, Default)]
pub struct LocalReferences {
    entries: HashMap<String, BioReference>,
}

impl LocalReferences {
    pub fn new(entries: HashMap<String, BioReference>) -> LocalReferences {
        LocalReferences { entries }
    }

    /// The bundled dataset.
    pub fn builtin() -> Result<LocalReferences, LabError> {
        let json = include_str!("../../../../data/bio-ref.json");
        parse_references(json, Path::new("<builtin>"))
    }

    pub fn get(&self, test: &str) -> Option<&BioReference> {
        self.entries.get(test)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReferenceSource for LocalReferences {
    fn reference(&self, test: &str) -> Result<Option<BioReference>, LabError> {
        Ok(self.get(test).cloned())
    }

    fn interferences(&self, test: &str) -> Result<Option<BioReference>, LabError> {
        Ok(self
            .get(test)
            .filter(|r| r.has_interference_info())
            .cloned())
    }
}

/// Load a reference dataset from a JSON file (object keyed by test name).
pub fn load_references(path: &Path) -> Result<LocalReferences, LabError> {
    let content = std::fs::read_to_string(path).map_err(|e| LabError::ReferencesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_references(&content, path)
}

fn parse_references(json: &str, source: &Path) -> Result<LocalReferences, LabError> {
    let entries: HashMap<String, BioReference> =
        serde_json::from_str(json).map_err(|e| LabError::ReferencesLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(LocalReferences::new(entries))
}

/// Local data first, then an optional remote source.
pub struct ReferenceService {
    local: LocalReferences,
    remote: Option<Box<dyn ReferenceSource>>,
}

impl ReferenceService {
    pub fn new(local: LocalReferences) -> ReferenceService {
        ReferenceService {
            local,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: Box<dyn ReferenceSource>) -> ReferenceService {
        self.remote = Some(remote);
        self
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Reference range and notes for a test.
    pub fn reference(&self, test: &str) -> Option<BioReference> {
        if let Some(local) = self.local.get(test) {
            return Some(local.clone());
        }
        self.ask_remote(test, |r| r.reference(test))
    }

    /// Interference information for a test. A local entry without notes or
    /// interferences does not count.
    pub fn interferences(&self, test: &str) -> Option<BioReference> {
        if let Some(local) = self.local.get(test).filter(|r| r.has_interference_info()) {
            return Some(local.clone());
        }
        self.ask_remote(test, |r| r.interferences(test))
    }

    /// Reference data together with interferences.
    ///
    /// The remote's combined lookup is tried first. Without an answer there,
    /// the separate reference and interference lookups are merged; the
    /// reference alone is returned if the second one yields nothing.
    pub fn combined(&self, test: &str) -> Option<BioReference> {
        if let Some(local) = self.local.get(test) {
            return Some(local.clone());
        }
        if let Some(found) = self.ask_remote(test, |r| r.combined(test)) {
            return Some(found);
        }
        let mut reference = self.ask_remote(test, |r| r.reference(test))?;
        if let Some(extra) = self.ask_remote(test, |r| r.interferences(test)) {
            reference.interferences = extra.interferences;
        }
        Some(reference)
    }

    fn ask_remote<F>(&self, test: &str, lookup: F) -> Option<BioReference>
    where
        F: FnOnce(&dyn ReferenceSource) -> Result<Option<BioReference>, LabError>,
    {
        let remote = self.remote.as_deref()?;
        match lookup(remote) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(test, error = %e, "remote reference lookup failed");
                None
            }
        }
    }
}
