//! HTTP reference provider.

use super::{BioReference, ReferenceSource};
use crate::error::LabError;

/// Connection settings for a reference provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL, e.g. `https://bioref.example.org/api`.
    pub base_url: String,
    pub api_key: Option<String>,
    /// Header carrying the key. `Authorization` sends `Bearer <key>`,
    /// any other header sends the key as is.
    pub auth_header: String,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> RemoteConfig {
        RemoteConfig {
            base_url: base_url.into(),
            api_key: None,
            auth_header: "Authorization".to_string(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> RemoteConfig {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_auth_header(mut self, header: impl Into<String>) -> RemoteConfig {
        self.auth_header = header.into();
        self
    }

    /// Full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// The auth header name and value, if a key is configured.
    pub fn auth(&self) -> Option<(String, String)> {
        let key = self.api_key.as_deref()?;
        if self.auth_header.eq_ignore_ascii_case("authorization") {
            Some(("Authorization".to_string(), format!("Bearer {key}")))
        } else {
            Some((self.auth_header.clone(), key.to_string()))
        }
    }
}

/// Reference provider reached over HTTP.
///
/// `GET {base}/reference?test=<name>` and `GET {base}/interference?test=<name>`
/// both answer with a single [`BioReference`] object. A 404 means the
/// provider has no data for the test.
pub struct RemoteReferences {
    config: RemoteConfig,
    agent: ureq::Agent,
}

impl RemoteReferences {
    pub fn new(config: RemoteConfig) -> RemoteReferences {
        RemoteReferences {
            config,
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn fetch(&self, path: &str, test: &str) -> Result<Option<BioReference>, LabError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, test, "requesting reference data");

        let mut request = self
            .agent
            .get(&url)
            .query("test", test)
            .header("Content-Type", "application/json");
        if let Some((name, value)) = self.config.auth() {
            request = request.header(name, value);
        }

        let mut response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => return Ok(None),
            Err(e) => return Err(LabError::ReferenceLookup(format!("{url}: {e}"))),
        };

        let reference: BioReference = response
            .body_mut()
            .read_json()
            .map_err(|e| LabError::ReferenceLookup(format!("{url}: {e}")))?;
        Ok(Some(reference))
    }
}

impl ReferenceSource for RemoteReferences {
    fn reference(&self, test: &str) -> Result<Option<BioReference>, LabError> {
        self.fetch("/reference", test)
    }

    fn interferences(&self, test: &str) -> Result<Option<BioReference>, LabError> {
        self.fetch("/interference", test)
    }

    fn combined(&self, test: &str) -> Result<Option<BioReference>, LabError> {
        self.fetch("/combined", test)
    }
}
