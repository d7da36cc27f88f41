//! # Dependency Specifications
//!
//! Converts a dependency given as a dict into the canonical dependency dict
//! with `name`/`version`/`versionsuffix`/`toolchain` keys, or into the
//! external module form.
//!
//! ```text
//! {'foo': '1.2.3', 'toolchain': 'GCC, 4.8.2'}
//! => {'name': 'foo', 'version': '1.2.3', 'toolchain': {'name': 'GCC', 'version': '4.8.2'}}
//!
//! {'name': 'fftw/3.3.4.1', 'external_module': True}
//! => {'external_module': True, 'full_mod_name': 'fftw/3.3.4.1', 'name': None,
//!     'short_mod_name': 'fftw/3.3.4.1', 'version': None}
//! ```
//!
//! Tuple forms such as `(name, version[, versionsuffix[, toolchain]])` are
//! handled by the easyconfig parser, not here.

use ecfg_core::{Dict, ShapeError, Value};

use super::lists::sequence;
use super::toolchain::ToolchainSpec;

/// A dependency in dict form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySpec {
    /// Built from an easyconfig.
    Regular {
        name: String,
        version: String,
        versionsuffix: Option<String>,
        toolchain: Option<ToolchainSpec>,
    },
    /// Provided by an existing module, referred to by its module name.
    External { module: String },
}

/// `str()` of a scalar, or the literal rendering of anything else.
fn text_of(value: &Value) -> String {
    value.scalar_text().unwrap_or_else(|| value.to_string())
}

impl DependencySpec {
    pub fn from_dict(dep: &Dict) -> Result<Self, ShapeError> {
        let is_external = dep
            .get_str("external_module")
            .is_some_and(Value::is_truthy);
        if is_external {
            Self::external(dep)
        } else {
            Self::regular(dep)
        }
    }

    fn external(dep: &Dict) -> Result<Self, ShapeError> {
        let mut keys = dep.str_keys().unwrap_or_default();
        keys.sort_unstable();
        match dep.get_str("name") {
            Some(Value::Str(module)) if keys == ["external_module", "name"] => {
                Ok(DependencySpec::External {
                    module: module.clone(),
                })
            }
            _ => Err(ShapeError::ExternalModuleKeys {
                value: Value::Dict(dep.clone()),
            }),
        }
    }

    fn regular(dep: &Dict) -> Result<Self, ShapeError> {
        // name and version first, so the result does not depend on key order
        let mut name = dep.get_str("name").map(text_of);
        let mut version = dep.get_str("version").map(text_of);
        let mut versionsuffix = None;
        let mut toolchain = None;

        for (key, value) in dep.iter() {
            match key.as_str() {
                Some("name" | "version") => {}
                Some("versionsuffix") => versionsuffix = Some(text_of(value)),
                Some("toolchain") => toolchain = Some(ToolchainSpec::parse(value)?),
                _ if name.is_none() || version.is_none() => {
                    name = Some(text_of(key));
                    version = Some(text_of(value));
                }
                _ => {
                    return Err(ShapeError::UnexpectedDependencyKey {
                        key: key.clone(),
                        value: value.clone(),
                    })
                }
            }
        }

        match (name, version) {
            (Some(name), Some(version)) => Ok(DependencySpec::Regular {
                name,
                version,
                versionsuffix,
                toolchain,
            }),
            _ => Err(ShapeError::MissingNameVersion {
                value: Value::Dict(dep.clone()),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            DependencySpec::Regular { name, .. } => Some(name),
            DependencySpec::External { .. } => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, DependencySpec::External { .. })
    }

    /// Canonical dict form.
    pub fn into_value(self) -> Value {
        let mut dict = Dict::new();
        match self {
            DependencySpec::Regular {
                name,
                version,
                versionsuffix,
                toolchain,
            } => {
                dict.insert("name", name);
                dict.insert("version", version);
                if let Some(suffix) = versionsuffix {
                    dict.insert("versionsuffix", suffix);
                }
                if let Some(tc) = toolchain {
                    dict.insert("toolchain", tc.into_value());
                }
            }
            DependencySpec::External { module } => {
                dict.insert("external_module", true);
                dict.insert("full_mod_name", module.clone());
                dict.insert("name", Value::Null);
                dict.insert("short_mod_name", module);
                dict.insert("version", Value::Null);
            }
        }
        Value::Dict(dict)
    }
}

/// Convert a dependency given as a dict.
///
/// Any other value is passed down unchanged for the easyconfig parser.
pub fn to_dependency(dep: &Value) -> Result<Value, ShapeError> {
    match dep {
        Value::Dict(dict) => DependencySpec::from_dict(dict).map(DependencySpec::into_value),
        Value::List(_) | Value::Tuple(_) => {
            tracing::debug!(kind = %dep.kind(), %dep, "passing down dependency value without touching it");
            Ok(dep.clone())
        }
        other => {
            tracing::warn!(kind = %other.kind(), value = %other, "unknown type of dependency value, passing it down as is");
            Ok(other.clone())
        }
    }
}

/// Convert a list of dependencies given as dicts.
pub fn to_dependencies(deps: &Value) -> Result<Value, ShapeError> {
    sequence(deps)?
        .iter()
        .map(|dep| match dep {
            Value::Dict(_) => to_dependency(dep),
            other => Err(ShapeError::UnparsedDependency {
                value: other.clone(),
                kind: other.kind(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}
