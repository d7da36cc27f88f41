//! # Registry Configuration
//!
//! Adjusts the default parameter bindings of a [`TypeRegistry`] from a YAML
//! (or JSON) file:
//!
//! ```yaml
//! parameters:
//!   homepage: str
//!   patches: string_or_tuple_list
//! untyped: [docurls]
//! dependency_parameters: [testdependencies]
//! ```
//!
//! Descriptors are referred to by their catalog name; unknown names are
//! rejected when the configuration is applied.
//!
//! [`TypeRegistry`]: crate::registry::TypeRegistry

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameter bindings to add, replace or remove.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Parameter name to catalog name; adds or overrides a binding.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,

    /// Parameters whose binding is removed, so they are not type checked.
    #[serde(default)]
    pub untyped: Vec<String>,

    /// Extra parameters holding a list of dependencies.
    #[serde(default)]
    pub dependency_parameters: Vec<String>,
}

/// Error loading a [`RegistryConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read registry config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The file is not a valid configuration document.
    #[error("invalid registry config '{path}': {reason}")]
    Parse { path: String, reason: String },
}

impl RegistryConfig {
    /// Parse a configuration document. `origin` names it in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            parameters = config.parameters.len(),
            untyped = config.untyped.len(),
            "loaded registry config"
        );
        Ok(config)
    }
}
