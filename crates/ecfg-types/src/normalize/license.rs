//! License file/server specifications (`license_file`).

use ecfg_core::{ShapeError, Value};

/// Normalize license specifications into a list.
///
/// `None` becomes `[None]`, a string `s` becomes `[s]` and a list or
/// tuple of strings becomes a list.
pub fn to_license_specs(specs: &Value) -> Result<Value, ShapeError> {
    match specs {
        Value::Null | Value::Str(_) => Ok(Value::List(vec![specs.clone()])),
        Value::List(items) | Value::Tuple(items) if items.iter().all(Value::is_str) => {
            Ok(Value::List(items.clone()))
        }
        other => Err(ShapeError::LicenseSpec {
            value: other.clone(),
            kind: other.kind(),
        }),
    }
}
