//! # Conversion Dispatch
//!
//! Maps target descriptors to the normalizer that produces them, and runs
//! the check-then-convert protocol:
//!
//! 1. No descriptor: the value conforms trivially and passes through.
//! 2. The value already matches: it is returned unchanged.
//! 3. Conversion not requested: mismatch, no value.
//! 4. Otherwise the normalizer registered for the descriptor runs and its
//!    result is checked against the same descriptor again.
//!
//! ## Invariant
//!
//! A normalizer's output always matches its descriptor. A result that does
//! not is reported as [`TypeCheckError::Inconsistent`], never as bad input.

use std::collections::HashMap;

use ecfg_core::{RegistryError, ShapeError, TypeCheckError, TypeDescriptor, Value};

use crate::catalog::StandardTypes;
use crate::matcher::is_value_of_type;
use crate::normalize;

/// A function converting a value into the canonical shape of a descriptor.
pub type Normalizer = fn(&Value) -> Result<Value, ShapeError>;

/// Outcome of [`ConversionTable::check_and_convert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Conformance {
    /// The value already had the expected type, or no type is expected.
    Conforms(Value),
    /// The value was converted into the expected type.
    Converted(Value),
    /// The value does not have the expected type and no conversion was
    /// attempted.
    Mismatch,
}

impl Conformance {
    pub fn is_ok(&self) -> bool {
        !matches!(self, Conformance::Mismatch)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Conformance::Conforms(v) | Conformance::Converted(v) => Some(v),
            Conformance::Mismatch => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Conformance::Conforms(v) | Conformance::Converted(v) => Some(v),
            Conformance::Mismatch => None,
        }
    }
}

/// Target descriptor to normalizer, built once.
#[derive(Debug, Clone)]
pub struct ConversionTable {
    entries: HashMap<TypeDescriptor, (&'static str, Normalizer)>,
}

impl ConversionTable {
    /// The standard normalizers for the descriptors in `types`.
    pub fn standard(types: &StandardTypes) -> Self {
        let entries: [(&TypeDescriptor, &'static str, Normalizer); 10] = [
            (&TypeDescriptor::STR, "to_string", normalize::to_string),
            (&TypeDescriptor::INT, "to_int", normalize::to_int),
            (&TypeDescriptor::FLOAT, "to_float", normalize::to_float),
            (&types.checksums, "to_checksums", normalize::to_checksums),
            (&types.dependencies, "to_dependencies", normalize::to_dependencies),
            (&types.list_of_strings, "to_list_of_strings", normalize::to_list_of_strings),
            (&types.toolchain_dict, "to_toolchain_dict", normalize::to_toolchain_dict),
            (
                &types.sanity_check_paths_dict,
                "to_sanity_check_paths_dict",
                normalize::to_sanity_check_paths_dict,
            ),
            (
                &types.string_or_tuple_list,
                "to_list_of_strings_and_tuples",
                normalize::to_list_of_strings_and_tuples,
            ),
            (
                &types.string_or_tuple_or_dict_list,
                "to_list_of_strings_and_tuples_and_dicts",
                normalize::to_list_of_strings_and_tuples_and_dicts,
            ),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(descriptor, name, normalizer)| (descriptor.clone(), (name, normalizer)))
                .collect(),
        }
    }

    /// Name and function of the normalizer for `target`.
    pub fn get(&self, target: &TypeDescriptor) -> Option<(&'static str, Normalizer)> {
        self.entries.get(target).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert `value` to `target` using the registered normalizer.
    ///
    /// The result is checked against `target`; a mismatch means the
    /// normalizer is broken.
    pub fn convert_value_type(
        &self,
        value: &Value,
        target: &TypeDescriptor,
    ) -> Result<Value, TypeCheckError> {
        let (name, normalizer) = self.get(target).ok_or_else(|| RegistryError::NoConversion {
            target: target.clone(),
        })?;

        let result = normalizer(value).map_err(|source| TypeCheckError::Conversion {
            value: value.clone(),
            kind: value.kind(),
            target: target.clone(),
            source,
        })?;
        tracing::debug!(
            "Converted value '{}' using {} to type {}: {}",
            value,
            name,
            target,
            result
        );

        if !is_value_of_type(&result, target)? {
            return Err(TypeCheckError::Inconsistent {
                value: value.clone(),
                target: target.clone(),
                result,
            });
        }
        Ok(result)
    }

    /// Check `value` against `expected`, converting it if it does not match
    /// and `convert` is set.
    pub fn check_and_convert(
        &self,
        value: &Value,
        expected: Option<&TypeDescriptor>,
        convert: bool,
    ) -> Result<Conformance, TypeCheckError> {
        let Some(expected) = expected else {
            return Ok(Conformance::Conforms(value.clone()));
        };

        if is_value_of_type(value, expected)? {
            tracing::debug!("Value '{}' is of expected type {}", value, expected);
            return Ok(Conformance::Conforms(value.clone()));
        }
        if !convert {
            tracing::debug!("Value '{}' is not of expected type {}", value, expected);
            return Ok(Conformance::Mismatch);
        }

        tracing::debug!(
            "Value '{}' ({}) is not of expected type {}, trying conversion",
            value,
            value.kind(),
            expected
        );
        self.convert_value_type(value, expected).map(Conformance::Converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecfg_core::ErrorClass;

    fn table() -> (StandardTypes, ConversionTable) {
        let types = StandardTypes::new();
        let table = ConversionTable::standard(&types);
        (types, table)
    }

    #[test]
    fn ten_normalizers_registered() {
        let (types, table) = table();
        assert_eq!(table.len(), 10);
        assert_eq!(table.get(&types.checksums).map(|(n, _)| n), Some("to_checksums"));
        assert!(table.get(&types.checksum_dict).is_none());
    }

    #[test]
    fn no_descriptor_passes_through() {
        let (_, table) = table();
        let value = Value::from(42);
        let res = table.check_and_convert(&value, None, false).unwrap();
        assert_eq!(res, Conformance::Conforms(value));
    }

    #[test]
    fn matching_value_is_returned_unchanged() {
        let (types, table) = table();
        let value = Value::list(["a", "b"]);
        let res = table
            .check_and_convert(&value, Some(&types.list_of_strings), true)
            .unwrap();
        assert_eq!(res, Conformance::Conforms(value));
    }

    #[test]
    fn mismatch_without_conversion() {
        let (types, table) = table();
        let res = table
            .check_and_convert(&Value::from("a"), Some(&types.list_of_strings), false)
            .unwrap();
        assert_eq!(res, Conformance::Mismatch);
        assert!(!res.is_ok());
        assert_eq!(res.into_value(), None);
    }

    #[test]
    fn converts_when_asked() {
        let (types, table) = table();
        let res = table
            .check_and_convert(&Value::from("GCC, 9.3.0"), Some(&types.toolchain_dict), true)
            .unwrap();
        assert!(res.is_ok());
        assert_eq!(
            res.value(),
            Some(&Value::dict([("name", "GCC"), ("version", "9.3.0")]))
        );
        assert!(matches!(res, Conformance::Converted(_)));
    }

    #[test]
    fn missing_normalizer_is_a_registry_error() {
        let (types, table) = table();
        let err = table
            .check_and_convert(&Value::from(1), Some(&types.checksum_dict), true)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Registry);
        assert!(err.to_string().contains("no conversion function available"));
    }

    #[test]
    fn normalizer_failure_is_user_input() {
        let (types, table) = table();
        let err = table
            .convert_value_type(&Value::from(5), &types.toolchain_dict)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::UserInput);
        match err {
            TypeCheckError::Conversion { value, source, .. } => {
                assert_eq!(value, Value::from(5));
                assert!(matches!(source, ShapeError::UnexpectedKind { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    fn broken(_: &Value) -> Result<Value, ShapeError> {
        Ok(Value::from(1))
    }

    #[test]
    fn broken_normalizer_is_inconsistent() {
        let (types, _) = table();
        let mut entries = HashMap::new();
        entries.insert(types.list_of_strings.clone(), ("broken", broken as Normalizer));
        let table = ConversionTable { entries };
        let err = table
            .convert_value_type(&Value::from("a"), &types.list_of_strings)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Internal);
        assert_eq!(
            err,
            TypeCheckError::Inconsistent {
                value: Value::from("a"),
                target: types.list_of_strings.clone(),
                result: Value::from(1),
            }
        );
    }

    #[test]
    fn primitive_coercion() {
        let (_, table) = table();
        let res = table
            .check_and_convert(&Value::from(3), Some(&TypeDescriptor::STR), true)
            .unwrap();
        assert_eq!(res, Conformance::Converted(Value::from("3")));
    }
}
