//! End-to-end checks of easyconfig parameter values through the default
//! [`TypeRegistry`], as the easyconfig parser would call it.

use ecfg_core::{ErrorClass, ShapeError, TypeCheckError, TypeDescriptor, Value};
use ecfg_types::{Conformance, TypeRegistry};

fn convert(registry: &TypeRegistry, param: &str, value: Value) -> Result<Value, TypeCheckError> {
    registry
        .check_type_of_param_value(param, &value, true)
        .map(|res| res.into_value().unwrap_or(Value::Null))
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[test]
fn bool_is_not_an_int() {
    let registry = TypeRegistry::new();
    assert!(!registry
        .is_value_of_type(&Value::from(true), &TypeDescriptor::INT)
        .unwrap());
    assert!(registry
        .is_value_of_type(&Value::from(1), &TypeDescriptor::INT)
        .unwrap());
}

#[test]
fn required_and_optional_keys() {
    let registry = TypeRegistry::new();
    let toolchain = &registry.types().toolchain_dict;
    let check = |v: Value| registry.is_value_of_type(&v, toolchain).unwrap();

    assert!(check(Value::dict([("name", "GCC"), ("version", "9.3.0")])));
    assert!(!check(Value::dict([("name", "GCC")])));
    assert!(!check(Value::dict([("name", "GCC"), ("version", "9.3.0"), ("foo", "x")])));
    assert!(check(Value::dict([
        ("name", Value::from("GCC")),
        ("version", Value::from("9.3.0")),
        ("hidden", Value::from(true)),
    ])));
}

#[test]
fn empty_containers() {
    let registry = TypeRegistry::new();
    let types = registry.types();
    assert!(registry
        .is_value_of_type(&Value::list(Vec::<Value>::new()), &types.list_of_strings)
        .unwrap());
    assert!(registry
        .is_value_of_type(&Value::dict(Vec::<(Value, Value)>::new()), &types.string_dict)
        .unwrap());
    assert!(!registry
        .is_value_of_type(&Value::dict(Vec::<(Value, Value)>::new()), &types.toolchain_dict)
        .unwrap());
}

#[test]
fn list_is_not_a_tuple() {
    let registry = TypeRegistry::new();
    let types = registry.types();
    assert!(!registry
        .is_value_of_type(&Value::tuple(["a"]), &types.list_of_strings)
        .unwrap());
    assert!(registry
        .is_value_of_type(&Value::tuple(["a"]), &types.tuple_of_strings)
        .unwrap());
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

#[test]
fn toolchain_forms() {
    let registry = TypeRegistry::new();
    assert_eq!(
        convert(&registry, "toolchain", Value::from("GCC, 9.3.0")).unwrap(),
        Value::dict([("name", "GCC"), ("version", "9.3.0")])
    );
    assert_eq!(
        convert(&registry, "toolchain", Value::list(["GCC", "9.3.0", "true"])).unwrap(),
        Value::dict([
            ("name", Value::from("GCC")),
            ("version", Value::from("9.3.0")),
            ("hidden", Value::from(true)),
        ])
    );
    let err = convert(
        &registry,
        "toolchain",
        Value::dict([
            ("name", Value::from("GCC")),
            ("version", Value::from("9.3.0")),
            ("bogus", Value::from(1)),
        ]),
    )
    .unwrap_err();
    assert_eq!(err.class(), ErrorClass::UserInput);
}

#[test]
fn dependency_forms() {
    let registry = TypeRegistry::new();
    let deps = Value::list([
        Value::dict([
            ("name", "foo"),
            ("version", "1.2.3"),
            ("toolchain", "GCC, 9.3.0"),
        ]),
        Value::dict([
            ("external_module", Value::from(true)),
            ("name", Value::from("fftw/3.3.4")),
        ]),
    ]);
    let converted = convert(&registry, "dependencies", deps).unwrap();
    assert_eq!(
        converted,
        Value::list([
            Value::dict([
                ("name", Value::from("foo")),
                ("version", Value::from("1.2.3")),
                ("toolchain", Value::dict([("name", "GCC"), ("version", "9.3.0")])),
            ]),
            Value::dict([
                ("external_module", Value::from(true)),
                ("name", Value::Null),
                ("short_mod_name", Value::from("fftw/3.3.4")),
                ("full_mod_name", Value::from("fftw/3.3.4")),
                ("version", Value::Null),
            ]),
        ])
    );
}

#[test]
fn checksum_nesting() {
    let registry = TypeRegistry::new();
    let converted = convert(
        &registry,
        "checksums",
        Value::list([Value::list([Value::from("abcd1234"), Value::list(["sha256", "ef56"])])]),
    )
    .unwrap();
    assert_eq!(
        converted,
        Value::list([Value::list([
            Value::from("abcd1234"),
            Value::tuple(["sha256", "ef56"]),
        ])])
    );
}

#[test]
fn two_string_tuple_at_top_is_alternatives() {
    let registry = TypeRegistry::new();
    let entry = Value::tuple(["sha256", "abcd"]);
    let checksums = Value::list([entry.clone()]);
    let res = registry
        .check_type_of_param_value("checksums", &checksums, true)
        .unwrap();
    assert_eq!(res, Conformance::Conforms(Value::list([entry])));
}

#[test]
fn null_in_alternatives_rejected() {
    let registry = TypeRegistry::new();
    let checksums = Value::list([Value::list([
        Value::from("abcd"),
        Value::tuple([Value::Null, Value::from("a"), Value::from("b")]),
    ])]);
    let err = convert(&registry, "checksums", checksums).unwrap_err();
    match err.root() {
        TypeCheckError::Conversion {
            source: ShapeError::InvalidChecksums { source, .. },
            ..
        } => assert!(matches!(**source, ShapeError::NullChecksum { .. })),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn sanity_check_paths() {
    let registry = TypeRegistry::new();
    let converted = convert(
        &registry,
        "sanity_check_paths",
        Value::dict([
            (
                "files",
                Value::list([Value::from("bin/foo"), Value::list(["lib/a.so", "lib/a.a"])]),
            ),
            ("dirs", Value::list(["include"])),
        ]),
    )
    .unwrap();
    assert_eq!(
        converted,
        Value::dict([
            (
                "files",
                Value::list([Value::from("bin/foo"), Value::tuple(["lib/a.so", "lib/a.a"])]),
            ),
            ("dirs", Value::list(["include"])),
        ])
    );
}

#[test]
fn patches_and_osdependencies() {
    let registry = TypeRegistry::new();
    assert_eq!(
        convert(
            &registry,
            "osdependencies",
            Value::list([Value::from("zlib"), Value::list(["openssl-devel", "libssl-dev"])])
        )
        .unwrap(),
        Value::list([Value::from("zlib"), Value::tuple(["openssl-devel", "libssl-dev"])])
    );
    let patch = Value::dict([("name", "fix.patch"), ("sourcepath", "src")]);
    assert_eq!(
        convert(&registry, "patches", Value::list([patch.clone()])).unwrap(),
        Value::list([patch])
    );
}

#[test]
fn version_from_number() {
    let registry = TypeRegistry::new();
    assert_eq!(
        convert(&registry, "version", Value::from(2.1)).unwrap(),
        Value::from("2.1")
    );
}

#[test]
fn conforming_values_are_untouched() {
    let registry = TypeRegistry::new();
    let values = [
        ("toolchain", Value::dict([("name", "foss"), ("version", "2023a")])),
        ("docurls", Value::list(["https://example.org"])),
        ("checksums", Value::list([Value::Null, Value::from("abcd")])),
        ("name", Value::from("zlib")),
    ];
    for (param, value) in values {
        let res = registry
            .check_type_of_param_value(param, &value, true)
            .unwrap();
        assert_eq!(res, Conformance::Conforms(value), "{param}");
    }
}

#[test]
fn no_conversion_without_request() {
    let registry = TypeRegistry::new();
    let res = registry
        .check_type_of_param_value("toolchain", &Value::from("GCC, 9.3.0"), false)
        .unwrap();
    assert_eq!(res, Conformance::Mismatch);
}

#[test]
fn values_loaded_from_json() {
    let registry = TypeRegistry::new();
    let doc: Value = serde_json::from_str(
        r#"{"checksums": [["sha256", "abcd"], {"foo.tar.gz": ["size", 1024]}],
            "builddependencies": [{"CMake": "3.27.6"}]}"#,
    )
    .unwrap();
    let doc = doc.as_dict().unwrap();

    let checksums = convert(&registry, "checksums", doc.get_str("checksums").unwrap().clone()).unwrap();
    assert_eq!(
        checksums,
        Value::list([
            Value::list(["sha256", "abcd"]),
            Value::dict([("foo.tar.gz", Value::tuple([Value::from("size"), Value::from(1024)]))]),
        ])
    );

    let deps = convert(
        &registry,
        "builddependencies",
        doc.get_str("builddependencies").unwrap().clone(),
    )
    .unwrap();
    assert_eq!(
        deps,
        Value::list([Value::dict([("name", "CMake"), ("version", "3.27.6")])])
    );
}
