//! # ecfg-core: Foundational Types for Easyconfig Type Checking
//!
//! This crate is the leaf of the workspace. It defines the data that the
//! type-checking engine in `ecfg-types` operates on, and nothing else.
//!
//! ## Key Design Principles
//!
//! 1. **An explicit value variant.** [`Value`] distinguishes lists from
//!    tuples and allows arbitrary dict keys, so matching and conversion are
//!    exhaustive `match`es rather than runtime type queries.
//!
//! 2. **Descriptors are plain data.** [`TypeDescriptor`] is a closed enum
//!    (`Primitive` | `Composite`) with derived structural `Eq`/`Hash`, so a
//!    descriptor can key the conversion table and sit inside another
//!    descriptor's requirement set.
//!
//! 3. **`CanonicalRequirements` newtype.** All requirement sets flow through
//!    [`canonicalize`]; there is no other way to build one, so two
//!    descriptors written with their requirements in a different order are
//!    the same descriptor.
//!
//! 4. **Three error classes.** User-input shape errors, registry
//!    misconfiguration and normalizer defects are separate types.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ecfg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod descriptor;
pub mod error;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use canonical::{canonicalize, CanonicalRequirements, RequirementValue};
pub use descriptor::{CompositeType, Container, Requirement, TypeDescriptor};
pub use error::{ErrorClass, RegistryError, ShapeError, TypeCheckError};
pub use value::{Dict, Value, ValueKind};
