//! Error types for code generation.

use irongen_ast::AstError;
use irongen_model::ModelError;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Tree invariant violated or shape not supported.
    #[error("ast error: {0}")]
    Ast(#[from] AstError),

    /// Type model integrity error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error in {pass}: {message}")]
    Generation {
        /// Pass or stage that failed.
        pass: String,
        /// Error message.
        message: String,
    },

    /// Type model combination that cannot be lowered.
    #[error("unsupported: {message}")]
    Unsupported {
        /// Description of the combination.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(pass: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            pass: pass.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}

/// Result type alias for code generation.
pub type Result<T> = std::result::Result<T, CodegenError>;
