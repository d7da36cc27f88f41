//! # ecfg-cli: Easyconfig Type Checking CLI
//!
//! Provides the `ecfg` command-line interface over the type registry of
//! `ecfg-types`.
//!
//! ## Subcommands
//!
//! - `ecfg check`: Check (and convert) the parameters of a document.
//! - `ecfg types`: List the parameter type registry.
//!
//! ```bash
//! ecfg check zlib-1.3.yaml --convert
//! ecfg --config registry.yaml types --expand
//! ```

pub mod check;
pub mod types;

use std::path::Path;

use anyhow::{Context, Result};

use ecfg_types::{RegistryConfig, TypeRegistry};

/// Build the type registry, applying the configuration file if given.
pub fn build_registry(config: Option<&Path>) -> Result<TypeRegistry> {
    let Some(path) = config else {
        return Ok(TypeRegistry::new());
    };
    let config = RegistryConfig::load(path)?;
    TypeRegistry::with_config(&config)
        .with_context(|| format!("invalid registry config {}", path.display()))
}
