//! # Parameter Type Registry
//!
//! Binds easyconfig parameter names to their expected descriptor and owns
//! the conversion table. A parameter without a binding is not type checked.
//!
//! The registry is built once and never mutated; it is `Send + Sync` and
//! can be shared freely between threads.

use std::collections::BTreeMap;

use ecfg_core::{RegistryError, TypeCheckError, TypeDescriptor, Value};

use crate::catalog::StandardTypes;
use crate::config::RegistryConfig;
use crate::convert::{Conformance, ConversionTable};
use crate::matcher;

/// Parameters that hold a list of dependencies.
pub const DEPENDENCY_PARAMETERS: [&str; 3] =
    ["builddependencies", "dependencies", "hiddendependencies"];

/// Expected descriptor per parameter name, and the normalizers to reach it.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: StandardTypes,
    parameters: BTreeMap<String, TypeDescriptor>,
    conversions: ConversionTable,
}

impl TypeRegistry {
    /// The registry with the default parameter bindings.
    pub fn new() -> Self {
        let types = StandardTypes::new();
        let mut parameters: BTreeMap<String, TypeDescriptor> = [
            ("checksums", &types.checksums),
            ("docurls", &types.list_of_strings),
            ("name", &TypeDescriptor::STR),
            ("osdependencies", &types.string_or_tuple_list),
            ("patches", &types.string_or_tuple_or_dict_list),
            ("sanity_check_paths", &types.sanity_check_paths_dict),
            ("toolchain", &types.toolchain_dict),
            ("version", &TypeDescriptor::STR),
        ]
        .into_iter()
        .map(|(name, descriptor)| (name.to_string(), descriptor.clone()))
        .collect();
        for name in DEPENDENCY_PARAMETERS {
            parameters.insert(name.to_string(), types.dependencies.clone());
        }
        let conversions = ConversionTable::standard(&types);
        Self {
            types,
            parameters,
            conversions,
        }
    }

    /// The default registry adjusted by `config`.
    pub fn with_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for (param, type_name) in &config.parameters {
            let descriptor = registry.types.by_name(type_name).cloned().ok_or_else(|| {
                RegistryError::UnknownDescriptor {
                    name: type_name.clone(),
                }
            })?;
            registry.parameters.insert(param.clone(), descriptor);
        }
        for param in &config.dependency_parameters {
            registry
                .parameters
                .insert(param.clone(), registry.types.dependencies.clone());
        }
        for param in &config.untyped {
            registry.parameters.remove(param);
        }
        tracing::debug!(
            parameters = registry.parameters.len(),
            "built type registry from config"
        );
        Ok(registry)
    }

    pub fn types(&self) -> &StandardTypes {
        &self.types
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Expected descriptor of a parameter, if it is type checked.
    pub fn parameter_type(&self, param: &str) -> Option<&TypeDescriptor> {
        self.parameters.get(param)
    }

    /// All bound parameters, sorted by name.
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.parameters.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn is_value_of_type(
        &self,
        value: &Value,
        expected: &TypeDescriptor,
    ) -> Result<bool, RegistryError> {
        matcher::is_value_of_type(value, expected)
    }

    /// Check the value of an easyconfig parameter against its expected
    /// type, converting it if `auto_convert` is set.
    ///
    /// Errors name the parameter.
    pub fn check_type_of_param_value(
        &self,
        param: &str,
        value: &Value,
        auto_convert: bool,
    ) -> Result<Conformance, TypeCheckError> {
        let expected = self.parameter_type(param);
        if expected.is_none() {
            tracing::debug!(
                "Value type checking of easyconfig parameter '{}' skipped, no type known",
                param
            );
        }
        self.conversions
            .check_and_convert(value, expected, auto_convert)
            .map_err(|e| e.for_param(param))
    }

    /// Convert a value to the given type.
    pub fn convert_value_type(
        &self,
        value: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, TypeCheckError> {
        self.conversions.convert_value_type(value, target)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
