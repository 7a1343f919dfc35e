//! Provider manifests
//!
//! A manifest is the serialized list of security definitions and header
//! parameters an API description requires:
//!
//! ```yaml
//! security_definitions:
//!   - name: apikey_auth
//!     type: apiKey
//!     in: header
//!     key: X-API-Key
//! headers:
//!   - name: X-Request-ID
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::descriptor::{HeaderParameters, SecurityDefinitions};
use crate::error::{Error, Result};

/// Declared requirements of a provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderManifest {
    #[serde(default)]
    pub security_definitions: SecurityDefinitions,
    #[serde(default)]
    pub headers: HeaderParameters,
}

impl ProviderManifest {
    /// Load a manifest from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str::<Option<Self>>(yaml)
            .map(Option::unwrap_or_default)
            .map_err(|e| Error::parse(format!("Invalid manifest: {}", e)))
    }

    /// Load a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::parse(format!("Invalid manifest: {}", e)))
    }

    /// Load a manifest from a file (JSON or YAML based on extension)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e.to_string()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
        .map_err(|e| e.with_path(path.display().to_string()))
    }

    /// Returns true if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.security_definitions.is_empty() && self.headers.is_empty()
    }
}
