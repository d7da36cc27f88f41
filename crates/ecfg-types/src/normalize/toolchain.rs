//! # Toolchain Specifications
//!
//! Converts a comma-separated string or a 2/3-element sequence of strings
//! into a toolchain dict with `name`/`version` keys and an optional
//! `hidden` key. A dict is accepted as-is when its key set is exactly
//! `name`/`version` or `name`/`version`/`hidden`.
//!
//! ```text
//! "intel, 2015a"        => {'name': 'intel', 'version': '2015a'}
//! "foss, 2016a, True"   => {'name': 'foss', 'version': '2016a', 'hidden': True}
//! ```

use ecfg_core::{Dict, ShapeError, Value};

/// Name of the toolchain that builds with the system compiler.
pub const SYSTEM_TOOLCHAIN_NAME: &str = "system";

const TRUE_TOKENS: [&str; 6] = ["yes", "true", "t", "y", "1", "on"];
const FALSE_TOKENS: [&str; 6] = ["no", "false", "f", "n", "0", "off"];

/// A parsed toolchain specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSpec {
    pub name: String,
    pub version: String,
    pub hidden: Option<bool>,
}

impl ToolchainSpec {
    /// Parse any of the accepted toolchain forms.
    pub fn parse(spec: &Value) -> Result<Self, ShapeError> {
        match spec {
            Value::Str(s) => {
                let parts: Vec<&str> = s.split(',').collect();
                Self::from_parts(&parts, spec)
            }
            Value::List(items) | Value::Tuple(items) => {
                let parts = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| ShapeError::UnexpectedElement {
                            expected: "string",
                            value: item.clone(),
                            kind: item.kind(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_parts(&parts, spec)
            }
            Value::Dict(dict) => Self::from_dict(dict, spec),
            other => Err(ShapeError::UnexpectedKind {
                expected: "a toolchain string, list or dict",
                value: other.clone(),
                kind: other.kind(),
            }),
        }
    }

    fn from_parts(parts: &[&str], spec: &Value) -> Result<Self, ShapeError> {
        match parts {
            [name, version] => Ok(Self {
                name: name.trim().to_string(),
                version: version.trim().to_string(),
                hidden: None,
            }),
            [name, version, hidden] => Ok(Self {
                name: name.trim().to_string(),
                version: version.trim().to_string(),
                hidden: Some(parse_truth_value(hidden)?),
            }),
            _ => Err(ShapeError::ToolchainArity {
                value: spec.clone(),
                len: parts.len(),
            }),
        }
    }

    fn from_dict(dict: &Dict, spec: &Value) -> Result<Self, ShapeError> {
        let mut keys = dict.str_keys().unwrap_or_default();
        keys.sort_unstable();
        if keys.len() != dict.len()
            || !(keys == ["name", "version"] || keys == ["hidden", "name", "version"])
        {
            return Err(ShapeError::ToolchainKeys {
                value: spec.clone(),
            });
        }
        let text = |key: &str| -> Result<String, ShapeError> {
            match dict.get_str(key) {
                Some(Value::Str(s)) => Ok(s.clone()),
                Some(other) => Err(ShapeError::UnexpectedElement {
                    expected: "string",
                    value: other.clone(),
                    kind: other.kind(),
                }),
                None => Err(ShapeError::ToolchainKeys {
                    value: spec.clone(),
                }),
            }
        };
        let hidden = match dict.get_str("hidden") {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(other) => {
                return Err(ShapeError::UnexpectedElement {
                    expected: "bool",
                    value: other.clone(),
                    kind: other.kind(),
                })
            }
        };
        Ok(Self {
            name: text("name")?,
            version: text("version")?,
            hidden,
        })
    }

    /// Whether this is the system toolchain (case-insensitive).
    pub fn is_system(&self) -> bool {
        self.name.eq_ignore_ascii_case(SYSTEM_TOOLCHAIN_NAME)
    }

    /// Canonical dict form.
    pub fn into_value(self) -> Value {
        let mut dict = Dict::new();
        dict.insert("name", self.name);
        dict.insert("version", self.version);
        if let Some(hidden) = self.hidden {
            dict.insert("hidden", hidden);
        }
        Value::Dict(dict)
    }
}

/// Parse a truth value token, case-insensitively and ignoring surrounding
/// whitespace.
pub fn parse_truth_value(token: &str) -> Result<bool, ShapeError> {
    let token = token.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Ok(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Ok(false)
    } else {
        Err(ShapeError::InvalidTruthValue { token })
    }
}

/// Normalizer for the toolchain dict descriptor.
pub fn to_toolchain_dict(spec: &Value) -> Result<Value, ShapeError> {
    ToolchainSpec::parse(spec).map(ToolchainSpec::into_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(name: &str, version: &str, hidden: Option<bool>) -> Value {
        ToolchainSpec {
            name: name.into(),
            version: version.into(),
            hidden,
        }
        .into_value()
    }

    #[test]
    fn from_comma_separated_string() {
        let res = to_toolchain_dict(&Value::from("GCC, 9.3.0")).unwrap();
        assert_eq!(res, Value::dict([("name", "GCC"), ("version", "9.3.0")]));
    }

    #[test]
    fn from_string_with_hidden() {
        let res = to_toolchain_dict(&Value::from("foss, 2016a, True")).unwrap();
        assert_eq!(res, expected("foss", "2016a", Some(true)));
    }

    #[test]
    fn from_three_element_list() {
        let res = to_toolchain_dict(&Value::list(["GCC", "9.3.0", "true"])).unwrap();
        assert_eq!(
            res,
            Value::dict([
                ("name", Value::from("GCC")),
                ("version", Value::from("9.3.0")),
                ("hidden", Value::from(true)),
            ])
        );
    }

    #[test]
    fn from_tuple_with_falsy_token() {
        let res = to_toolchain_dict(&Value::tuple(["GCC", "9.3.0", " OFF "])).unwrap();
        assert_eq!(res, expected("GCC", "9.3.0", Some(false)));
    }

    #[test]
    fn truth_vocabulary() {
        for t in ["yes", "TRUE", "t", "Y", "1", "On"] {
            assert_eq!(parse_truth_value(t), Ok(true), "{t}");
        }
        for t in ["no", "False", "f", "N", "0", "off"] {
            assert_eq!(parse_truth_value(t), Ok(false), "{t}");
        }
    }

    #[test]
    fn invalid_truth_value() {
        let err = to_toolchain_dict(&Value::list(["GCC", "9.3.0", "maybe"])).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidTruthValue {
                token: "maybe".into()
            }
        );
    }

    #[test]
    fn wrong_arity() {
        let err = to_toolchain_dict(&Value::from("GCC")).unwrap_err();
        assert!(matches!(err, ShapeError::ToolchainArity { len: 1, .. }));
        let err = to_toolchain_dict(&Value::list(["a", "b", "yes", "d"])).unwrap_err();
        assert!(matches!(err, ShapeError::ToolchainArity { len: 4, .. }));
    }

    #[test]
    fn non_string_element() {
        let err = to_toolchain_dict(&Value::list([Value::from("GCC"), Value::from(9)])).unwrap_err();
        assert!(matches!(err, ShapeError::UnexpectedElement { expected: "string", .. }));
    }

    #[test]
    fn dict_with_exact_keys_is_kept() {
        let spec = Value::dict([
            ("version", Value::from("9.3.0")),
            ("hidden", Value::from(false)),
            ("name", Value::from("GCC")),
        ]);
        assert_eq!(to_toolchain_dict(&spec).unwrap(), spec);
    }

    #[test]
    fn dict_with_bogus_key_rejected() {
        let spec = Value::dict([
            ("name", Value::from("GCC")),
            ("version", Value::from("9.3.0")),
            ("bogus", Value::from(1)),
        ]);
        let err = to_toolchain_dict(&spec).unwrap_err();
        assert_eq!(err, ShapeError::ToolchainKeys { value: spec });
    }

    #[test]
    fn dict_with_non_bool_hidden_rejected() {
        let spec = Value::dict([("name", "GCC"), ("version", "9.3.0"), ("hidden", "yes")]);
        assert!(matches!(
            to_toolchain_dict(&spec),
            Err(ShapeError::UnexpectedElement { expected: "bool", .. })
        ));
    }

    #[test]
    fn unsupported_kind() {
        let err = to_toolchain_dict(&Value::from(3)).unwrap_err();
        assert!(matches!(err, ShapeError::UnexpectedKind { .. }));
    }

    #[test]
    fn system_toolchain() {
        let tc = ToolchainSpec::parse(&Value::from("SYSTEM, system")).unwrap();
        assert!(tc.is_system());
        let tc = ToolchainSpec::parse(&Value::from("GCC, 9.3.0")).unwrap();
        assert!(!tc.is_system());
    }
}
