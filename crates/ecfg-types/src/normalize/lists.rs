//! Generic list normalizers.
//!
//! ```text
//! ['foo', ['bar', 'baz']]   => ['foo', ('bar', 'baz')]
//! ('a', 'b')                => ['a', 'b']            (list of strings)
//! ```

use ecfg_core::{Dict, ShapeError, Value};

/// The sequence elements of `spec`, or a shape error naming it.
pub(crate) fn sequence(spec: &Value) -> Result<&[Value], ShapeError> {
    spec.as_seq().ok_or_else(|| ShapeError::UnexpectedKind {
        expected: "a list",
        value: spec.clone(),
        kind: spec.kind(),
    })
}

/// Check that every element is a string and freeze the group as a tuple.
pub(crate) fn string_group(items: &[Value]) -> Result<Value, ShapeError> {
    if let Some(bad) = items.iter().find(|item| !item.is_str()) {
        return Err(ShapeError::UnexpectedElement {
            expected: "string",
            value: bad.clone(),
            kind: bad.kind(),
        });
    }
    Ok(Value::Tuple(items.to_vec()))
}

/// A string, or a list/tuple of strings frozen into a tuple.
pub(crate) fn string_or_group(elem: &Value, expected: &'static str) -> Result<Value, ShapeError> {
    match elem {
        Value::Str(_) => Ok(elem.clone()),
        Value::List(items) | Value::Tuple(items) => string_group(items),
        other => Err(ShapeError::UnexpectedElement {
            expected,
            value: other.clone(),
            kind: other.kind(),
        }),
    }
}

/// Convert a value to a list of strings.
///
/// Accepts a list of strings (returned as-is), a single string, or a tuple
/// of strings.
pub fn to_list_of_strings(value: &Value) -> Result<Value, ShapeError> {
    let all_strings = |items: &[Value]| items.iter().all(Value::is_str);
    match value {
        Value::List(items) if all_strings(items) => Ok(value.clone()),
        Value::Str(_) => Ok(Value::List(vec![value.clone()])),
        Value::Tuple(items) if all_strings(items) => Ok(Value::List(items.clone())),
        other => Err(ShapeError::UnexpectedKind {
            expected: "a string, or a list or tuple of strings",
            value: other.clone(),
            kind: other.kind(),
        }),
    }
}

/// Convert a list of strings and lists to a list of strings and tuples.
pub fn to_list_of_strings_and_tuples(spec: &Value) -> Result<Value, ShapeError> {
    sequence(spec)?
        .iter()
        .map(|elem| string_or_group(elem, "string, tuple or list"))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

/// Like [`to_list_of_strings_and_tuples`], additionally passing through
/// dicts mapping strings to strings.
pub fn to_list_of_strings_and_tuples_and_dicts(spec: &Value) -> Result<Value, ShapeError> {
    sequence(spec)?
        .iter()
        .map(|elem| match elem {
            Value::Dict(dict) => string_dict(dict).map(|()| elem.clone()),
            _ => string_or_group(elem, "string, tuple, dict or list"),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

fn string_dict(dict: &Dict) -> Result<(), ShapeError> {
    for (key, value) in dict.iter() {
        if !key.is_str() {
            return Err(ShapeError::NonStringKey {
                key: key.clone(),
                kind: key.kind(),
            });
        }
        if !value.is_str() {
            return Err(ShapeError::UnexpectedElement {
                expected: "string",
                value: value.clone(),
                kind: value.kind(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_of_strings_forms() {
        let list = Value::list(["a", "b"]);
        assert_eq!(to_list_of_strings(&list).unwrap(), list);
        assert_eq!(
            to_list_of_strings(&Value::from("a")).unwrap(),
            Value::list(["a"])
        );
        assert_eq!(
            to_list_of_strings(&Value::tuple(["a", "b"])).unwrap(),
            list
        );
    }

    #[test]
    fn list_of_strings_rejects_mixed() {
        let value = Value::list([Value::from("a"), Value::from(1)]);
        assert!(matches!(
            to_list_of_strings(&value),
            Err(ShapeError::UnexpectedKind { .. })
        ));
        assert!(to_list_of_strings(&Value::Null).is_err());
    }

    #[test]
    fn nested_lists_become_tuples() {
        let spec = Value::list([Value::from("foo"), Value::list(["bar", "baz"])]);
        let res = to_list_of_strings_and_tuples(&spec).unwrap();
        assert_eq!(
            res,
            Value::list([Value::from("foo"), Value::tuple(["bar", "baz"])])
        );
    }

    #[test]
    fn outer_tuple_becomes_list() {
        let spec = Value::tuple([Value::from("foo"), Value::tuple(["bar"])]);
        let res = to_list_of_strings_and_tuples(&spec).unwrap();
        assert_eq!(res, Value::list([Value::from("foo"), Value::tuple(["bar"])]));
    }

    #[test]
    fn bad_element_named_with_kind() {
        let spec = Value::list([Value::from("foo"), Value::from(3)]);
        let err = to_list_of_strings_and_tuples(&spec).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected elements to be of type string, tuple or list, got 3 (int)"
        );
    }

    #[test]
    fn non_string_inside_group_rejected() {
        let spec = Value::list([Value::list([Value::from("a"), Value::from(true)])]);
        assert!(matches!(
            to_list_of_strings_and_tuples(&spec),
            Err(ShapeError::UnexpectedElement { expected: "string", .. })
        ));
    }

    #[test]
    fn not_a_sequence() {
        let err = to_list_of_strings_and_tuples(&Value::from("foo")).unwrap_err();
        assert!(matches!(err, ShapeError::UnexpectedKind { expected: "a list", .. }));
    }

    #[test]
    fn dicts_pass_through() {
        let patch = Value::dict([("name", "fix.patch"), ("level", "1")]);
        let spec = Value::list([patch.clone(), Value::list(["a.patch", "src"])]);
        let res = to_list_of_strings_and_tuples_and_dicts(&spec).unwrap();
        assert_eq!(res, Value::list([patch, Value::tuple(["a.patch", "src"])]));
    }

    #[test]
    fn dict_with_non_string_value_rejected() {
        let spec = Value::list([Value::dict([("level", 1)])]);
        assert!(to_list_of_strings_and_tuples_and_dicts(&spec).is_err());
    }
}
