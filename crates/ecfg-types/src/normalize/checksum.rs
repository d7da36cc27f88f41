//! # Checksum Entries
//!
//! Each entry of a `checksums` list can be:
//!
//! - `None` (no checksum),
//! - a checksum string,
//! - a 2-element sequence holding a checksum type and value,
//! - a tuple of alternative checksums, one of which must match,
//! - a list of checksums that must all match,
//! - a dict mapping file names to any of the above.
//!
//! ## Ambiguity
//!
//! A 2-element sequence of strings at the top of an entry is either a
//! `(type, value)` pair or two checksums. It becomes a typed pair only when
//! its second element is not a string or when it sits inside another
//! sequence; otherwise it is returned unchanged. Nesting is bounded at two
//! levels: anything deeper is read with tuple semantics and may not nest
//! again.

use ecfg_core::{Dict, ShapeError, Value};

use super::lists::sequence;

/// Nesting level that forbids any further sequence.
const NO_FURTHER_NESTING: u8 = 99;

fn is_typed_pair(items: &[Value]) -> bool {
    matches!(items, [Value::Str(_), Value::Str(_) | Value::Int(_)])
}

fn normalize_entry(checksum: &Value, list_level: u8, allow_dict: bool) -> Result<Value, ShapeError> {
    match checksum {
        Value::Null | Value::Str(_) => return Ok(checksum.clone()),
        Value::List(items) | Value::Tuple(items) if is_typed_pair(items) => {
            return if !items[1].is_str() || list_level > 0 {
                Ok(Value::Tuple(items.clone()))
            } else {
                Ok(checksum.clone())
            };
        }
        Value::List(items) | Value::Tuple(items) if list_level < 2 => {
            if items.iter().any(Value::is_null) {
                return Err(ShapeError::NullChecksum {
                    value: checksum.clone(),
                });
            }
            let is_tuple = matches!(checksum, Value::Tuple(_));
            return if is_tuple || list_level > 0 {
                // dicts only as direct elements of a top level sequence
                let allow = allow_dict && list_level == 0;
                items
                    .iter()
                    .map(|item| normalize_entry(item, NO_FURTHER_NESTING, allow))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Tuple)
            } else {
                items
                    .iter()
                    .map(|item| normalize_entry(item, list_level + 1, allow_dict))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::List)
            };
        }
        Value::Dict(dict) if allow_dict => return per_file(dict).map(Value::Dict),
        _ => {}
    }
    Err(ShapeError::UnexpectedChecksum {
        value: checksum.clone(),
        kind: checksum.kind(),
    })
}

fn per_file(dict: &Dict) -> Result<Dict, ShapeError> {
    dict.iter()
        .map(|(file, checksum)| {
            if !file.is_str() {
                return Err(ShapeError::NonStringKey {
                    key: file.clone(),
                    kind: file.kind(),
                });
            }
            Ok((file.clone(), normalize_entry(checksum, 0, false)?))
        })
        .collect()
}

/// Normalize a single checksum entry.
pub fn to_checksum(checksum: &Value) -> Result<Value, ShapeError> {
    normalize_entry(checksum, 0, true)
}

/// Normalize a whole `checksums` list, one entry per source or patch file.
///
/// A failing entry is reported together with the complete list.
pub fn to_checksums(checksums: &Value) -> Result<Value, ShapeError> {
    sequence(checksums)?
        .iter()
        .map(to_checksum)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
        .map_err(|err| ShapeError::InvalidChecksums {
            checksums: checksums.clone(),
            source: Box::new(err),
        })
}
