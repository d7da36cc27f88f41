//! # Error Types: Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! Three classes of failure, kept apart so callers can tell who is at fault:
//!
//! - [`ShapeError`]: the supplied value has a shape no normalizer
//!   recognizes. Carries the offending value, its kind, and what was
//!   expected. Recoverable by the caller.
//! - [`RegistryError`]: the static descriptor or conversion tables are
//!   wrong (unknown requirement name, missing normalizer). Fatal.
//! - [`TypeCheckError::Inconsistent`]: a normalizer claimed success but its
//!   output does not match its own descriptor. Implicates the normalizer.

use thiserror::Error;

use crate::descriptor::{Container, TypeDescriptor};
use crate::value::{Value, ValueKind};

/// Who is at fault for a [`TypeCheckError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The supplied value is wrong.
    UserInput,
    /// The descriptor or conversion tables are wrong.
    Registry,
    /// A normalizer produced output that fails its own descriptor.
    Internal,
}

/// A value that no normalizer could bring into the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("expected value to be {expected}, found {value} ({kind})")]
    UnexpectedKind {
        expected: &'static str,
        value: Value,
        kind: ValueKind,
    },

    #[error("expected elements to be of type {expected}, got {value} ({kind})")]
    UnexpectedElement {
        expected: &'static str,
        value: Value,
        kind: ValueKind,
    },

    #[error("expected keys to be of type string, got {key} ({kind})")]
    NonStringKey { key: Value, kind: ValueKind },

    #[error("can not convert {value} ({kind}) to {target}")]
    NotConvertible {
        value: Value,
        kind: ValueKind,
        target: ValueKind,
    },

    #[error("invalid truth value '{token}'")]
    InvalidTruthValue { token: String },

    #[error("can not convert {value} to toolchain dict: expected 2 or 3 elements, found {len}")]
    ToolchainArity { value: Value, len: usize },

    #[error("incorrect set of keys in provided dictionary, should be only name/version/hidden: {value}")]
    ToolchainKeys { value: Value },

    #[error("unexpected format for dependency marked as external module: {value}")]
    ExternalModuleKeys { value: Value },

    #[error("found unexpected (key, value) pair: {key}, {value}")]
    UnexpectedDependencyKey { key: Value, value: Value },

    #[error("can not parse dependency without name and version: {value}")]
    MissingNameVersion { value: Value },

    #[error("dependency {value} ({kind}) is not a dict; it must be parsed by the easyconfig parser")]
    UnparsedDependency { value: Value, kind: ValueKind },

    #[error("unexpected None in {value}")]
    NullChecksum { value: Value },

    #[error("unexpected type of {kind}: {value}")]
    UnexpectedChecksum { value: Value, kind: ValueKind },

    #[error("invalid checksums: {checksums}\n\terror: {source}")]
    InvalidChecksums {
        checksums: Value,
        source: Box<ShapeError>,
    },

    #[error("unknown sanity check category {key}, expected 'files' or 'dirs'")]
    UnknownSanityCheckCategory { key: Value },

    #[error("sanity check paths {value} lack the required '{category}' entry")]
    MissingSanityCheckCategory {
        value: Value,
        category: &'static str,
    },

    #[error(
        "unsupported type {kind} for license specification {value}: \
         can either be None, a string, or a tuple/list of strings"
    )]
    LicenseSpec { value: Value, kind: ValueKind },
}

/// The static descriptor or conversion tables are mis-configured.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("unknown type requirement specified: {name}")]
    UnknownRequirement { name: String },

    #[error("requirement '{name}' given as {form} is not supported for {parent} descriptors")]
    MalformedRequirement {
        name: String,
        form: &'static str,
        parent: Container,
    },

    #[error("no conversion function available (yet) for target type {target}")]
    NoConversion { target: TypeDescriptor },

    #[error("unknown type descriptor '{name}'")]
    UnknownDescriptor { name: String },
}

/// Failure of a type check or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeCheckError {
    #[error("converting type of {value} ({kind}) to {target} failed: {source}")]
    Conversion {
        value: Value,
        kind: ValueKind,
        target: TypeDescriptor,
        source: ShapeError,
    },

    #[error("type registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("converting value {value} to type {target} didn't work as expected: got {result}")]
    Inconsistent {
        value: Value,
        target: TypeDescriptor,
        result: Value,
    },

    #[error("easyconfig parameter '{param}': {source}")]
    Parameter {
        param: String,
        source: Box<TypeCheckError>,
    },
}

impl TypeCheckError {
    /// Who is at fault.
    pub fn class(&self) -> ErrorClass {
        match self {
            TypeCheckError::Conversion { .. } => ErrorClass::UserInput,
            TypeCheckError::Registry(_) => ErrorClass::Registry,
            TypeCheckError::Inconsistent { .. } => ErrorClass::Internal,
            TypeCheckError::Parameter { source, .. } => source.class(),
        }
    }

    /// Attach the name of the parameter being checked.
    pub fn for_param(self, param: impl Into<String>) -> Self {
        TypeCheckError::Parameter {
            param: param.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with any parameter wrapping removed.
    pub fn root(&self) -> &TypeCheckError {
        match self {
            TypeCheckError::Parameter { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion_error() -> TypeCheckError {
        TypeCheckError::Conversion {
            value: Value::from(1),
            kind: ValueKind::Int,
            target: TypeDescriptor::list_of([TypeDescriptor::STR]),
            source: ShapeError::UnexpectedKind {
                expected: "a list",
                value: Value::from(1),
                kind: ValueKind::Int,
            },
        }
    }

    #[test]
    fn class_of_each_kind() {
        assert_eq!(conversion_error().class(), ErrorClass::UserInput);
        let reg: TypeCheckError = RegistryError::UnknownRequirement {
            name: "max_len".into(),
        }
        .into();
        assert_eq!(reg.class(), ErrorClass::Registry);
        let bad = TypeCheckError::Inconsistent {
            value: Value::from("a"),
            target: TypeDescriptor::INT,
            result: Value::from("a"),
        };
        assert_eq!(bad.class(), ErrorClass::Internal);
    }

    #[test]
    fn parameter_wrapping_keeps_class_and_root() {
        let wrapped = conversion_error().for_param("docurls");
        assert_eq!(wrapped.class(), ErrorClass::UserInput);
        assert_eq!(wrapped.root(), &conversion_error());
        let msg = wrapped.to_string();
        assert!(msg.starts_with("easyconfig parameter 'docurls': converting type of 1 (int)"));
    }

    #[test]
    fn message_names_value_kind_and_target() {
        let msg = conversion_error().to_string();
        assert!(msg.contains("1 (int)"), "{msg}");
        assert!(msg.contains("list{elem_types=[str]}"), "{msg}");
        assert!(msg.contains("expected value to be a list"), "{msg}");
    }

    #[test]
    fn invalid_checksums_chains_source() {
        let err = ShapeError::InvalidChecksums {
            checksums: Value::list([Value::list([Value::Null])]),
            source: Box::new(ShapeError::NullChecksum {
                value: Value::list([Value::Null]),
            }),
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("unexpected None in [None]"));
    }
}
