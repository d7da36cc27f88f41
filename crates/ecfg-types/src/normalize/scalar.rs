//! Primitive coercions.

use ecfg_core::{ShapeError, Value, ValueKind};

fn not_convertible(value: &Value, target: ValueKind) -> ShapeError {
    ShapeError::NotConvertible {
        value: value.clone(),
        kind: value.kind(),
        target,
    }
}

/// String form of a scalar; null and containers are rejected.
pub fn to_string(value: &Value) -> Result<Value, ShapeError> {
    value
        .scalar_text()
        .map(Value::Str)
        .ok_or_else(|| not_convertible(value, ValueKind::Str))
}

/// Integer from a decimal string, a finite float (truncated) or a bool.
pub fn to_int(value: &Value) -> Result<Value, ShapeError> {
    match value {
        Value::Int(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| not_convertible(value, ValueKind::Int)),
        Value::Float(f) if f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64 => {
            Ok(Value::Int(f.trunc() as i64))
        }
        _ => Err(not_convertible(value, ValueKind::Int)),
    }
}

/// Float from a trimmed numeric string, an integer or a bool.
pub fn to_float(value: &Value) -> Result<Value, ShapeError> {
    match value {
        Value::Float(_) => Ok(value.clone()),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| not_convertible(value, ValueKind::Float)),
        _ => Err(not_convertible(value, ValueKind::Float)),
    }
}
