//! Error types for AST operations.

use thiserror::Error;

use crate::id::NodeId;

/// Error type for AST construction, traversal and rewriting.
#[derive(Debug, Error)]
pub enum AstError {
    /// A reference points at a node that is not in the current tree generation.
    #[error("reference target {id} not found; a previous pass left a dangling reference")]
    ReferenceNodeNotFound {
        /// Target id of the reference.
        id: NodeId,
    },

    /// A node already carrying an id was given a different one.
    #[error("node id is already {current} and cannot be changed to {requested}")]
    IdReassigned {
        /// Id the node already has.
        current: NodeId,
        /// Id that was requested.
        requested: NodeId,
    },

    /// Two declarations claim the same type.
    #[error("type {type_name} is declared more than once")]
    DuplicateDeclaration {
        /// Description of the type.
        type_name: String,
    },

    /// A node does not have the shape an earlier pass should have guaranteed.
    #[error("unexpected node shape: expected {expected}, found {found}")]
    UnexpectedShape {
        /// Expected shape.
        expected: String,
        /// Actual shape.
        found: String,
    },

    /// A type model combination that cannot be lowered.
    #[error("unsupported: {message}")]
    Unsupported {
        /// Description of the unsupported combination.
        message: String,
    },
}

impl AstError {
    /// Creates an unexpected shape error.
    pub fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an unsupported error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}

/// Result type alias for AST operations.
pub type Result<T> = std::result::Result<T, AstError>;
