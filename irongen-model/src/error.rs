//! Error types for the type model.

use thiserror::Error;

/// Error type for type model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A type id points outside the arena.
    #[error("type id {id} referenced from {referenced_by} is out of range")]
    DanglingTypeId {
        /// Raw arena index.
        id: usize,
        /// Description of the referencing type.
        referenced_by: String,
    },

    /// Two named types share a qualified name.
    #[error("duplicate type name '{name}'")]
    DuplicateTypeName {
        /// Qualified name.
        name: String,
    },

    /// Two enum members share a value.
    #[error("duplicate value '{value}' in enum '{enum_name}'")]
    DuplicateEnumMember {
        /// Enum name.
        enum_name: String,
        /// Duplicated value.
        value: String,
    },

    /// A generic instantiation is malformed.
    #[error("invalid generic target {description}: {message}")]
    InvalidGenericTarget {
        /// Description of the target type.
        description: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ModelError {
    /// Creates a dangling id error.
    pub fn dangling(id: usize, referenced_by: impl Into<String>) -> Self {
        Self::DanglingTypeId {
            id,
            referenced_by: referenced_by.into(),
        }
    }
}

/// Result type alias for type model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
