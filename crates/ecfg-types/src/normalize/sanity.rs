//! # Sanity Check Paths
//!
//! `sanity_check_paths` maps the `files` and `dirs` categories to a list of
//! paths. A path is a string, a group of alternatives, or a dict mapping a
//! name to either of those. Groups arrive as lists from YAML and are frozen
//! into tuples.
//!
//! ```text
//! {'files': ['file1', ['file2a', 'file2b']], 'dirs': ['foo/bar']}
//! => {'files': ['file1', ('file2a', 'file2b')], 'dirs': ['foo/bar']}
//! ```

use ecfg_core::{Dict, ShapeError, Value};

use super::lists::{sequence, string_or_group};

/// Category of paths that must be files.
pub const SANITY_CHECK_PATHS_FILES: &str = "files";
/// Category of paths that must be directories.
pub const SANITY_CHECK_PATHS_DIRS: &str = "dirs";

const CATEGORIES: [&str; 2] = [SANITY_CHECK_PATHS_FILES, SANITY_CHECK_PATHS_DIRS];

/// Normalize the path list of one category.
pub fn to_sanity_check_paths_entry(spec: &Value) -> Result<Value, ShapeError> {
    sequence(spec)?
        .iter()
        .map(|elem| match elem {
            Value::Dict(dict) => named_groups(dict).map(Value::Dict),
            _ => string_or_group(elem, "string, tuple/list or dict"),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

fn named_groups(dict: &Dict) -> Result<Dict, ShapeError> {
    dict.iter()
        .map(|(key, value)| {
            if !key.is_str() {
                return Err(ShapeError::NonStringKey {
                    key: key.clone(),
                    kind: key.kind(),
                });
            }
            Ok((key.clone(), string_or_group(value, "string, tuple or list")?))
        })
        .collect()
}

/// Normalize a whole `sanity_check_paths` dict.
///
/// Both categories must be present and no other key is accepted.
pub fn to_sanity_check_paths_dict(spec: &Value) -> Result<Value, ShapeError> {
    let dict = spec.as_dict().ok_or_else(|| ShapeError::UnexpectedKind {
        expected: "a dict",
        value: spec.clone(),
        kind: spec.kind(),
    })?;
    let mut result = Dict::new();
    for (key, entry) in dict.iter() {
        if !key.as_str().is_some_and(|k| CATEGORIES.contains(&k)) {
            return Err(ShapeError::UnknownSanityCheckCategory { key: key.clone() });
        }
        result.insert(key.clone(), to_sanity_check_paths_entry(entry)?);
    }
    if let Some(category) = CATEGORIES.into_iter().find(|c| !result.contains_str(c)) {
        return Err(ShapeError::MissingSanityCheckCategory {
            value: spec.clone(),
            category,
        });
    }
    Ok(Value::Dict(result))
}
