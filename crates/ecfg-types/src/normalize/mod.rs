//! # Normalizers
//!
//! Each normalizer converts the legacy or shorthand forms of one kind of
//! parameter value into the canonical shape of its descriptor. Normalizers
//! are plain functions of type [`crate::convert::Normalizer`]; they never
//! mutate their input and report unrecognized shapes as [`ShapeError`]s.
//!
//! [`ShapeError`]: ecfg_core::ShapeError

pub mod checksum;
pub mod dependency;
pub mod license;
pub mod lists;
pub mod sanity;
pub mod scalar;
pub mod toolchain;

pub use checksum::{to_checksum, to_checksums};
pub use dependency::{to_dependencies, to_dependency, DependencySpec};
pub use license::to_license_specs;
pub use lists::{
    to_list_of_strings, to_list_of_strings_and_tuples, to_list_of_strings_and_tuples_and_dicts,
};
pub use sanity::{to_sanity_check_paths_dict, to_sanity_check_paths_entry};
pub use scalar::{to_float, to_int, to_string};
pub use toolchain::{parse_truth_value, to_toolchain_dict, ToolchainSpec, SYSTEM_TOOLCHAIN_NAME};
