//! # IronGen Model
//!
//! The type model that the IronGen code generator lowers into source code.
//!
//! This crate provides:
//! - An arena of tagged type definitions addressed by [`TypeId`]
//! - Object, enum, primitive, composition and generic type shapes
//! - Structural type diffing used to merge equivalent types
//! - Arena integrity validation
//! - Identifier case conversion helpers

pub mod diff;
pub mod error;
pub mod model;
pub mod naming;
pub mod types;
pub mod validation;

pub use diff::TypeDiffKind;
pub use error::{ModelError, Result};
pub use model::TypeModel;
pub use types::{
    ArrayType, CompositionType, DecoratingType, DictionaryType, EnumMember, EnumType,
    ExternalReference, GenericSourceIdentifierType, GenericSourceType, GenericTargetIdentifier,
    GenericTargetType, HardcodedReference, InterfaceType, ObjectType, PrimitiveKind,
    PrimitiveType, PrimitiveValue, Property, TypeDef, TypeId, UnknownKind, UnknownType,
};
pub use validation::validate_model;
