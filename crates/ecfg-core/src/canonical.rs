//! # Canonical Requirement Sets
//!
//! This module defines `CanonicalRequirements`, the only form in which a
//! composite descriptor's structural requirements are stored.
//!
//! ## Invariant
//!
//! The `CanonicalRequirements` newtype has a private inner field. The only
//! way to construct it is through [`canonicalize`], which:
//!
//! 1. **Sorts requirement names**: two mappings holding the same entries
//!    in a different insertion order produce equal values with equal hashes.
//! 2. **Sorts nested per-key tables**: `elem_types` given as a key → types
//!    table is canonicalized recursively the same way.
//! 3. **Keeps list order**: descriptor lists and key lists are stored as
//!    written; they are compared positionally.
//! 4. **Collapses duplicate names**: a later entry for the same name
//!    replaces an earlier one, as building a mapping would.
//!
//! Because every requirement set goes through this pipeline, composite
//! descriptors can derive `Eq` and `Hash` structurally and be used as
//! conversion-table keys and as members of other descriptors' type lists.

use std::collections::BTreeMap;
use std::fmt;

use crate::descriptor::TypeDescriptor;

/// The value of one named requirement, before or after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequirementValue {
    /// A list of allowed descriptors (any one must match).
    Types(Vec<TypeDescriptor>),
    /// A list of dict keys.
    Keys(Vec<String>),
    /// Per-key tables, e.g. `elem_types` keyed by dict key name.
    PerKey(Vec<(String, RequirementValue)>),
}

impl RequirementValue {
    /// Convenience constructor for a key list.
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RequirementValue::Keys(keys.into_iter().map(Into::into).collect())
    }

    /// Convenience constructor for a per-key table of allowed types.
    pub fn per_key<I, S, T>(table: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: IntoIterator<Item = TypeDescriptor>,
    {
        RequirementValue::PerKey(
            table
                .into_iter()
                .map(|(k, types)| (k.into(), RequirementValue::Types(types.into_iter().collect())))
                .collect(),
        )
    }

    /// Short name of the form this value takes, for diagnostics.
    pub fn form(&self) -> &'static str {
        match self {
            RequirementValue::Types(_) => "type list",
            RequirementValue::Keys(_) => "key list",
            RequirementValue::PerKey(_) => "per-key table",
        }
    }
}

impl fmt::Display for RequirementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementValue::Types(types) => {
                f.write_str("[")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str("]")
            }
            RequirementValue::Keys(keys) => {
                f.write_str("[")?;
                for (i, k) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{k}'")?;
                }
                f.write_str("]")
            }
            RequirementValue::PerKey(table) => {
                f.write_str("{")?;
                for (i, (k, v)) in table.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "'{k}': {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A requirement set in canonical form: sorted by name, nested tables
/// sorted, immutable.
///
/// # Invariants
///
/// - The only constructor is [`canonicalize`].
/// - Names are unique and in ascending order.
/// - Every `PerKey` value, at any depth, is itself sorted and unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalRequirements(Vec<(String, RequirementValue)>);

impl CanonicalRequirements {
    /// Look up a requirement by name.
    pub fn get(&self, name: &str) -> Option<&RequirementValue> {
        self.0
            .binary_search_by(|(k, _)| k.as_str().cmp(name))
            .ok()
            .map(|i| &self.0[i].1)
    }

    /// Requirements in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RequirementValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Convert a requirement mapping into its canonical, hashable form.
///
/// Pure and deterministic: equal mappings canonicalize to equal values
/// regardless of the order their entries were supplied in.
pub fn canonicalize<I, K>(requirements: I) -> CanonicalRequirements
where
    I: IntoIterator<Item = (K, RequirementValue)>,
    K: AsRef<str>,
{
    CanonicalRequirements(canonical_table(requirements))
}

fn canonical_table<I, K>(entries: I) -> Vec<(String, RequirementValue)>
where
    I: IntoIterator<Item = (K, RequirementValue)>,
    K: AsRef<str>,
{
    let mut sorted = BTreeMap::new();
    for (name, value) in entries {
        sorted.insert(name.as_ref().to_string(), canonical_value(value));
    }
    sorted.into_iter().collect()
}

fn canonical_value(value: RequirementValue) -> RequirementValue {
    match value {
        RequirementValue::PerKey(table) => RequirementValue::PerKey(canonical_table(table)),
        other => other,
    }
}
