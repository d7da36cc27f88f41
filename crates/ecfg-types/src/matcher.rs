//! # Structural Matcher
//!
//! Decides whether a [`Value`] conforms to a [`TypeDescriptor`].
//!
//! Primitive descriptors match by exact kind: a `bool` never matches an
//! `int` descriptor. Composite descriptors first require the value's kind
//! to be the parent container kind, then evaluate every requirement and
//! AND the results:
//!
//! - `elem_types` on a list or tuple: every element matches at least one
//!   of the allowed descriptors.
//! - `elem_types` on a dict, as a flat type list: every value matches at
//!   least one allowed descriptor. As a per-key table: every value matches
//!   one of the descriptors listed for its key; a key with no entry has no
//!   allowed types and fails.
//! - `key_types`: every key matches at least one allowed descriptor.
//! - `req_keys`: every listed key is present.
//! - `opt_keys`: every key is in `req_keys ∪ opt_keys`.
//!
//! A requirement name the matcher does not know, or a requirement given in
//! a form that makes no sense for the parent container, is a
//! [`RegistryError`]: the descriptor table is broken, not the input.

use ecfg_core::{
    CompositeType, Container, Dict, RegistryError, Requirement, RequirementValue, TypeDescriptor,
    Value,
};

/// Check whether `value` conforms to `expected`.
pub fn is_value_of_type(value: &Value, expected: &TypeDescriptor) -> Result<bool, RegistryError> {
    match expected {
        TypeDescriptor::Primitive(kind) => Ok(value.kind() == *kind),
        TypeDescriptor::Composite(composite) => matches_composite(value, composite),
    }
}

fn matches_composite(value: &Value, composite: &CompositeType) -> Result<bool, RegistryError> {
    let parent = composite.parent();
    if value.kind() != parent.kind() {
        tracing::debug!(
            "Parent type of value {} doesn't match {}: {}",
            value,
            parent,
            value.kind()
        );
        return Ok(false);
    }
    tracing::debug!("Parent type of value {} matches {}, going in...", value, parent);

    let requirements = composite.requirements();
    let mut type_ok = true;
    for (name, requirement) in requirements.iter() {
        let kind = Requirement::from_name(name).ok_or_else(|| RegistryError::UnknownRequirement {
            name: name.to_string(),
        })?;
        let check_ok = match (value, kind) {
            (_, Requirement::ElemTypes) => check_element_types(value, requirement, parent)?,
            (Value::Dict(dict), Requirement::KeyTypes) => {
                check_key_types(dict, type_list(name, requirement, parent)?)?
            }
            (Value::Dict(dict), Requirement::ReqKeys) => {
                check_required_keys(dict, key_list(name, requirement, parent)?)
            }
            (Value::Dict(dict), Requirement::OptKeys) => {
                let mut allowed = key_list(name, requirement, parent)?.to_vec();
                if let Some(req_keys) = requirements.get(Requirement::ReqKeys.name()) {
                    allowed.extend_from_slice(key_list(Requirement::ReqKeys.name(), req_keys, parent)?);
                }
                check_known_keys(dict, &allowed)
            }
            (_, Requirement::KeyTypes | Requirement::ReqKeys | Requirement::OptKeys) => {
                return Err(RegistryError::MalformedRequirement {
                    name: name.to_string(),
                    form: requirement.form(),
                    parent,
                })
            }
        };
        tracing::debug!(
            "Check for {} requirement ({}) {} for {}",
            name,
            requirement,
            if check_ok { "passed" } else { "FAILED" },
            value
        );
        type_ok &= check_ok;
    }

    tracing::debug!(
        "Non-trivial value type checking of easyconfig value '{}': {}",
        value,
        if type_ok { "passed" } else { "FAILED" }
    );
    Ok(type_ok)
}

fn type_list<'a>(
    name: &str,
    requirement: &'a RequirementValue,
    parent: Container,
) -> Result<&'a [TypeDescriptor], RegistryError> {
    match requirement {
        RequirementValue::Types(types) => Ok(types),
        other => Err(RegistryError::MalformedRequirement {
            name: name.to_string(),
            form: other.form(),
            parent,
        }),
    }
}

fn key_list<'a>(
    name: &str,
    requirement: &'a RequirementValue,
    parent: Container,
) -> Result<&'a [String], RegistryError> {
    match requirement {
        RequirementValue::Keys(keys) => Ok(keys),
        other => Err(RegistryError::MalformedRequirement {
            name: name.to_string(),
            form: other.form(),
            parent,
        }),
    }
}

fn matches_any(value: &Value, allowed: &[TypeDescriptor]) -> Result<bool, RegistryError> {
    for expected in allowed {
        if is_value_of_type(value, expected)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check whether the elements of a list, tuple or dict have allowed types.
///
/// For sequences `allowed` must be a flat type list. For dicts it may be a
/// flat list (applied to every value) or a per-key table.
pub fn check_element_types(
    elems: &Value,
    allowed: &RequirementValue,
    parent: Container,
) -> Result<bool, RegistryError> {
    let name = Requirement::ElemTypes.name();
    match elems {
        Value::List(items) | Value::Tuple(items) => {
            let allowed = type_list(name, allowed, parent)?;
            for item in items {
                if !matches_any(item, allowed)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Value::Dict(dict) => match allowed {
            RequirementValue::Types(types) => {
                for item in dict.values() {
                    if !matches_any(item, types)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            RequirementValue::PerKey(table) => {
                for (key, item) in dict.iter() {
                    let entry = key
                        .as_str()
                        .and_then(|k| table.binary_search_by(|(t, _)| t.as_str().cmp(k)).ok())
                        .map(|i| &table[i].1);
                    // keys without an entry have no allowed types
                    let Some(entry) = entry else {
                        return Ok(false);
                    };
                    if !matches_any(item, type_list(name, entry, parent)?)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            RequirementValue::Keys(_) => Err(RegistryError::MalformedRequirement {
                name: name.to_string(),
                form: allowed.form(),
                parent,
            }),
        },
        _ => Ok(false),
    }
}

/// Check whether every key of a dict matches one of the allowed types.
pub fn check_key_types(dict: &Dict, allowed: &[TypeDescriptor]) -> Result<bool, RegistryError> {
    for key in dict.keys() {
        if !matches_any(key, allowed)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Check whether every key of a dict is a known key.
pub fn check_known_keys(dict: &Dict, allowed_keys: &[String]) -> bool {
    dict.keys().all(|key| {
        key.as_str()
            .is_some_and(|k| allowed_keys.iter().any(|a| a == k))
    })
}

/// Check whether all required keys are present in a dict.
pub fn check_required_keys(dict: &Dict, required_keys: &[String]) -> bool {
    required_keys.iter().all(|k| dict.contains_str(k))
}
