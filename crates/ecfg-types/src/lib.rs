//! # ecfg-types: Easyconfig Parameter Type Checking
//!
//! Checks easyconfig parameter values against their expected type and
//! converts legacy or shorthand forms into the canonical shape.
//!
//! ## Layers
//!
//! - [`catalog`]: the standard composite descriptors (toolchain,
//!   dependency, checksum and sanity check path shapes).
//! - [`matcher`]: decides whether a value conforms to a descriptor.
//! - [`normalize`]: one normalizer per convertible descriptor.
//! - [`convert`]: descriptor to normalizer table and the
//!   check-then-convert protocol.
//! - [`registry`]: parameter name to descriptor, optionally adjusted by a
//!   [`config::RegistryConfig`].
//!
//! ## Example
//!
//! ```
//! use ecfg_core::Value;
//! use ecfg_types::TypeRegistry;
//!
//! let registry = TypeRegistry::new();
//! let res = registry
//!     .check_type_of_param_value("toolchain", &Value::from("GCC, 9.3.0"), true)
//!     .unwrap();
//! assert_eq!(
//!     res.into_value(),
//!     Some(Value::dict([("name", "GCC"), ("version", "9.3.0")]))
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod convert;
pub mod matcher;
pub mod normalize;
pub mod registry;

pub use catalog::StandardTypes;
pub use config::{ConfigError, RegistryConfig};
pub use convert::{Conformance, ConversionTable, Normalizer};
pub use matcher::is_value_of_type;
pub use normalize::{DependencySpec, ToolchainSpec};
pub use registry::{TypeRegistry, DEPENDENCY_PARAMETERS};
