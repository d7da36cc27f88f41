//! # Standard Descriptor Catalog
//!
//! The fixed set of composite descriptors used by easyconfig parameters.
//! [`StandardTypes::new`] builds every descriptor once; the registry and
//! the conversion table both hold clones of the same `Arc`-shared values.
//!
//! ## Checksums
//!
//! A `checksums` value is a list with one entry per source or patch file.
//! Each entry can be:
//!
//! - `None` (no checksum),
//! - a single checksum string,
//! - a `(type, value)` tuple; the value may be an int for type `size`,
//! - a list of checksums that must *all* match,
//! - a tuple of alternative checksums of which *one* must match,
//! - a dict mapping file names to any of the above.
//!
//! `checksum_and_type` is more permissive than a pair: it accepts a tuple
//! of any length holding strings and ints.

use ecfg_core::{Container, Requirement, RequirementValue, TypeDescriptor};

use crate::normalize::sanity::{SANITY_CHECK_PATHS_DIRS, SANITY_CHECK_PATHS_FILES};

/// The standard descriptors, each addressable by name.
#[derive(Debug, Clone)]
pub struct StandardTypes {
    pub toolchain_dict: TypeDescriptor,
    pub dependency_dict: TypeDescriptor,
    pub external_module_dict: TypeDescriptor,
    pub dependencies: TypeDescriptor,
    pub tuple_of_strings: TypeDescriptor,
    pub list_of_strings: TypeDescriptor,
    pub string_or_tuple_list: TypeDescriptor,
    pub string_dict: TypeDescriptor,
    pub string_or_tuple_dict: TypeDescriptor,
    pub string_or_tuple_or_dict_list: TypeDescriptor,
    pub sanity_check_paths_entry: TypeDescriptor,
    pub sanity_check_paths_dict: TypeDescriptor,
    pub checksum_and_type: TypeDescriptor,
    pub checksum_list: TypeDescriptor,
    pub checksum_tuple: TypeDescriptor,
    pub checksum_dict: TypeDescriptor,
    pub checksum_list_w_dict: TypeDescriptor,
    pub checksum_tuple_w_dict: TypeDescriptor,
    pub checksums: TypeDescriptor,
}

static PRIMITIVES: [(&str, TypeDescriptor); 8] = [
    ("str", TypeDescriptor::STR),
    ("bool", TypeDescriptor::BOOL),
    ("int", TypeDescriptor::INT),
    ("float", TypeDescriptor::FLOAT),
    ("null", TypeDescriptor::NULL),
    ("list", TypeDescriptor::LIST),
    ("tuple", TypeDescriptor::TUPLE),
    ("dict", TypeDescriptor::DICT),
];

fn types(list: impl IntoIterator<Item = TypeDescriptor>) -> RequirementValue {
    RequirementValue::Types(list.into_iter().collect())
}

impl StandardTypes {
    pub fn new() -> Self {
        use TypeDescriptor as T;

        // dict with only name/version as keys with string values, and
        // optionally a hidden key with a bool value
        let toolchain_dict = T::composite(
            Container::Dict,
            [
                (
                    Requirement::ElemTypes,
                    RequirementValue::per_key([
                        ("hidden", vec![T::BOOL]),
                        ("name", vec![T::STR]),
                        ("version", vec![T::STR]),
                    ]),
                ),
                (Requirement::OptKeys, RequirementValue::keys(["hidden"])),
                (Requirement::ReqKeys, RequirementValue::keys(["name", "version"])),
            ],
        );

        let dependency_dict = T::composite(
            Container::Dict,
            [
                (
                    Requirement::ElemTypes,
                    RequirementValue::per_key([
                        ("full_mod_name", vec![T::STR]),
                        ("name", vec![T::STR]),
                        ("short_mod_name", vec![T::STR]),
                        ("toolchain", vec![toolchain_dict.clone()]),
                        ("version", vec![T::STR]),
                        ("versionsuffix", vec![T::STR]),
                    ]),
                ),
                (
                    Requirement::OptKeys,
                    RequirementValue::keys([
                        "full_mod_name",
                        "short_mod_name",
                        "toolchain",
                        "versionsuffix",
                    ]),
                ),
                (Requirement::ReqKeys, RequirementValue::keys(["name", "version"])),
            ],
        );

        // dependency provided by an existing module rather than built
        let external_module_dict = T::composite(
            Container::Dict,
            [
                (
                    Requirement::ElemTypes,
                    RequirementValue::per_key([
                        ("external_module", vec![T::BOOL]),
                        ("full_mod_name", vec![T::STR]),
                        ("name", vec![T::NULL]),
                        ("short_mod_name", vec![T::STR]),
                        ("version", vec![T::NULL]),
                    ]),
                ),
                (Requirement::OptKeys, RequirementValue::keys(Vec::<String>::new())),
                (
                    Requirement::ReqKeys,
                    RequirementValue::keys([
                        "external_module",
                        "full_mod_name",
                        "name",
                        "short_mod_name",
                        "version",
                    ]),
                ),
            ],
        );

        let dependencies = T::list_of([dependency_dict.clone(), external_module_dict.clone()]);

        let tuple_of_strings = T::tuple_of([T::STR]);
        let list_of_strings = T::list_of([T::STR]);
        let string_or_tuple_list = T::list_of([T::STR, tuple_of_strings.clone()]);
        let string_dict = T::composite(
            Container::Dict,
            [
                (Requirement::ElemTypes, types([T::STR])),
                (Requirement::KeyTypes, types([T::STR])),
            ],
        );
        let string_or_tuple_dict = T::composite(
            Container::Dict,
            [
                (Requirement::ElemTypes, types([T::STR, tuple_of_strings.clone()])),
                (Requirement::KeyTypes, types([T::STR])),
            ],
        );
        let string_or_tuple_or_dict_list =
            T::list_of([T::STR, tuple_of_strings.clone(), string_dict.clone()]);
        let sanity_check_paths_entry = T::list_of([
            T::STR,
            tuple_of_strings.clone(),
            string_or_tuple_dict.clone(),
        ]);
        let sanity_check_paths_dict = T::composite(
            Container::Dict,
            [
                (
                    Requirement::ElemTypes,
                    RequirementValue::per_key([
                        (SANITY_CHECK_PATHS_FILES, vec![sanity_check_paths_entry.clone()]),
                        (SANITY_CHECK_PATHS_DIRS, vec![sanity_check_paths_entry.clone()]),
                    ]),
                ),
                (Requirement::OptKeys, RequirementValue::keys(Vec::<String>::new())),
                (
                    Requirement::ReqKeys,
                    RequirementValue::keys([SANITY_CHECK_PATHS_FILES, SANITY_CHECK_PATHS_DIRS]),
                ),
            ],
        );

        let checksum_and_type = T::tuple_of([T::STR, T::INT]);
        let checksum_tuple = T::tuple_of([T::STR, checksum_and_type.clone()]);
        let checksum_list = T::list_of([T::STR, checksum_and_type.clone(), checksum_tuple.clone()]);
        let checksum_dict = T::composite(
            Container::Dict,
            [
                (
                    Requirement::ElemTypes,
                    types([
                        T::NULL,
                        T::STR,
                        checksum_and_type.clone(),
                        checksum_tuple.clone(),
                        checksum_list.clone(),
                    ]),
                ),
                (Requirement::KeyTypes, types([T::STR])),
            ],
        );
        // at the top level, lists and tuples may contain a dict
        let checksum_list_w_dict = T::list_of([
            T::STR,
            checksum_and_type.clone(),
            checksum_tuple.clone(),
            checksum_dict.clone(),
        ]);
        let checksum_tuple_w_dict =
            T::tuple_of([T::STR, checksum_and_type.clone(), checksum_dict.clone()]);
        let checksums = T::list_of([
            T::NULL,
            T::STR,
            checksum_and_type.clone(),
            checksum_list_w_dict.clone(),
            checksum_tuple_w_dict.clone(),
            checksum_dict.clone(),
        ]);

        Self {
            toolchain_dict,
            dependency_dict,
            external_module_dict,
            dependencies,
            tuple_of_strings,
            list_of_strings,
            string_or_tuple_list,
            string_dict,
            string_or_tuple_dict,
            string_or_tuple_or_dict_list,
            sanity_check_paths_entry,
            sanity_check_paths_dict,
            checksum_and_type,
            checksum_list,
            checksum_tuple,
            checksum_dict,
            checksum_list_w_dict,
            checksum_tuple_w_dict,
            checksums,
        }
    }

    fn composites(&self) -> [(&'static str, &TypeDescriptor); 19] {
        [
            ("toolchain_dict", &self.toolchain_dict),
            ("dependency_dict", &self.dependency_dict),
            ("external_module_dict", &self.external_module_dict),
            ("dependencies", &self.dependencies),
            ("tuple_of_strings", &self.tuple_of_strings),
            ("list_of_strings", &self.list_of_strings),
            ("string_or_tuple_list", &self.string_or_tuple_list),
            ("string_dict", &self.string_dict),
            ("string_or_tuple_dict", &self.string_or_tuple_dict),
            ("string_or_tuple_or_dict_list", &self.string_or_tuple_or_dict_list),
            ("sanity_check_paths_entry", &self.sanity_check_paths_entry),
            ("sanity_check_paths_dict", &self.sanity_check_paths_dict),
            ("checksum_and_type", &self.checksum_and_type),
            ("checksum_list", &self.checksum_list),
            ("checksum_tuple", &self.checksum_tuple),
            ("checksum_dict", &self.checksum_dict),
            ("checksum_list_w_dict", &self.checksum_list_w_dict),
            ("checksum_tuple_w_dict", &self.checksum_tuple_w_dict),
            ("checksums", &self.checksums),
        ]
    }

    /// Look up a descriptor, composite or primitive, by its catalog name.
    pub fn by_name(&self, name: &str) -> Option<&TypeDescriptor> {
        self.composites()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| d)
            .or_else(|| PRIMITIVES.iter().find(|(n, _)| *n == name).map(|(_, d)| d))
    }

    /// Catalog name of a descriptor, if it is one of the standard ones.
    pub fn name_of(&self, descriptor: &TypeDescriptor) -> Option<&'static str> {
        self.composites()
            .into_iter()
            .find(|(_, d)| *d == descriptor)
            .map(|(n, _)| n)
            .or_else(|| {
                PRIMITIVES
                    .iter()
                    .find(|(_, d)| d == descriptor)
                    .map(|(n, _)| *n)
            })
    }

    /// All catalog names: composites first, then primitives.
    pub fn names(&self) -> Vec<&'static str> {
        self.composites()
            .into_iter()
            .map(|(n, _)| n)
            .chain(PRIMITIVES.iter().map(|(n, _)| *n))
            .collect()
    }
}

impl Default for StandardTypes {
    fn default() -> Self {
        Self::new()
    }
}
