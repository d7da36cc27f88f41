//! # Type Descriptors
//!
//! A [`TypeDescriptor`] is either a primitive kind, matched by exact runtime
//! kind, or a composite: a parent container plus a canonical requirement
//! set. Composites nest inside each other's requirement sets, so the whole
//! type is structurally `Eq + Hash` and cheap to clone (composites are
//! shared behind an `Arc`).
//!
//! Descriptors are built once at startup and never mutated.

use std::fmt;
use std::sync::Arc;

use crate::canonical::{canonicalize, CanonicalRequirements, RequirementValue};
use crate::value::ValueKind;

/// Container kinds a composite descriptor can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    List,
    Tuple,
    Dict,
}

impl Container {
    /// The value kind a matching value must have.
    pub fn kind(self) -> ValueKind {
        match self {
            Container::List => ValueKind::List,
            Container::Tuple => ValueKind::Tuple,
            Container::Dict => ValueKind::Dict,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().as_str())
    }
}

/// Named structural requirements understood by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    /// Allowed element types (list/tuple), or allowed value types (dict),
    /// either flat or per key.
    ElemTypes,
    /// Allowed key types (dict only).
    KeyTypes,
    /// Keys that must be present (dict only).
    ReqKeys,
    /// Keys allowed besides the required ones (dict only).
    OptKeys,
}

impl Requirement {
    pub fn name(self) -> &'static str {
        match self {
            Requirement::ElemTypes => "elem_types",
            Requirement::KeyTypes => "key_types",
            Requirement::ReqKeys => "req_keys",
            Requirement::OptKeys => "opt_keys",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "elem_types" => Some(Requirement::ElemTypes),
            "key_types" => Some(Requirement::KeyTypes),
            "req_keys" => Some(Requirement::ReqKeys),
            "opt_keys" => Some(Requirement::OptKeys),
            _ => None,
        }
    }
}

impl AsRef<str> for Requirement {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

/// A composite descriptor: parent container plus canonical requirements.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CompositeType {
    parent: Container,
    requirements: CanonicalRequirements,
}

impl CompositeType {
    pub fn parent(&self) -> Container {
        self.parent
    }

    pub fn requirements(&self) -> &CanonicalRequirements {
        &self.requirements
    }
}

/// Expected shape of a parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(ValueKind),
    Composite(Arc<CompositeType>),
}

impl TypeDescriptor {
    pub const NULL: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Null);
    pub const BOOL: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Bool);
    pub const INT: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Int);
    pub const FLOAT: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Float);
    pub const STR: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Str);
    pub const LIST: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::List);
    pub const TUPLE: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Tuple);
    pub const DICT: TypeDescriptor = TypeDescriptor::Primitive(ValueKind::Dict);

    /// Build a composite descriptor. Requirement names are not validated
    /// here; an unknown name surfaces as a registry error when matching.
    pub fn composite<I, K>(parent: Container, requirements: I) -> Self
    where
        I: IntoIterator<Item = (K, RequirementValue)>,
        K: AsRef<str>,
    {
        TypeDescriptor::Composite(Arc::new(CompositeType {
            parent,
            requirements: canonicalize(requirements),
        }))
    }

    /// `list` whose elements each match one of `elem_types`.
    pub fn list_of(elem_types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::sequence_of(Container::List, elem_types)
    }

    /// `tuple` whose elements each match one of `elem_types`.
    pub fn tuple_of(elem_types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::sequence_of(Container::Tuple, elem_types)
    }

    fn sequence_of(parent: Container, elem_types: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        Self::composite(
            parent,
            [(
                Requirement::ElemTypes,
                RequirementValue::Types(elem_types.into_iter().collect()),
            )],
        )
    }

    /// The kind a value must have before any requirement is considered.
    pub fn outer_kind(&self) -> ValueKind {
        match self {
            TypeDescriptor::Primitive(kind) => *kind,
            TypeDescriptor::Composite(c) => c.parent.kind(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => f.write_str(kind.as_str()),
            TypeDescriptor::Composite(c) => write!(f, "{}{{{}}}", c.parent, c.requirements),
        }
    }
}
