//! # IronGen
//!
//! Source code generation from a language-agnostic type model.
//!
//! IronGen lowers a type model (objects, enums, unions, generics) into a
//! language-neutral code tree, rewrites that tree through an ordered pipeline of
//! passes, and prints it with a pluggable renderer.
//!
//! ## Features
//!
//! - **Typed code AST** - Owned nodes with stable ids and id-based references
//! - **Visitor and reducer** - Read-only traversal with early exit, bottom-up rewrites
//! - **Configurable pipeline** - Fourteen passes driven by [`CodeOptions`]
//! - **Pluggable strategies** - Naming, supertype and type-node policies per target
//! - **Reference renderer** - Java-like output, one file per compilation unit
//!
//! ## Quick Start
//!
//! ```ignore
//! use irongen::prelude::*;
//!
//! let mut model = TypeModel::new("zoo");
//! let name = model.primitive(PrimitiveType::new(PrimitiveKind::String));
//! model.add_exported(TypeDef::Object(
//!     ObjectType::new("Animal").with_property(Property::new("name", name)),
//! ));
//!
//! let options = CodeOptions::builder().package("com.zoo").build();
//! let written = irongen::generate_to_dir(model, &options, "generated".as_ref())?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Type model, diffing and validation
//! - [`ast`] - Code tree, visitor, reducer and root strategies
//! - [`codegen`] - Options, pipeline passes and renderers

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod prelude;

/// Type model consumed by the generator.
pub mod model {
    pub use irongen_model::*;
}

/// Code tree, traversal and rewriting.
pub mod ast {
    pub use irongen_ast::*;
}

/// Generation options, passes and rendering.
pub mod codegen {
    pub use irongen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use irongen_ast::CodeRoot;
pub use irongen_codegen::{
    CodeOptions, CodeOptionsBuilder, CodegenError, JavaLikeRenderer, Pipeline, RenderedFile,
    Renderer, Result, build_tree, generate,
};
pub use irongen_model::TypeModel;

/// Generates source files for a model and writes them below `dir`.
///
/// # Arguments
/// * `model` - Type model to lower
/// * `options` - Generation options
/// * `dir` - Output root; package directories are created beneath it
///
/// # Returns
/// The paths of the written files.
///
/// # Errors
/// Returns `CodegenError` if generation fails or a file cannot be written.
pub fn generate_to_dir(
    model: TypeModel,
    options: &CodeOptions,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    let model_name = model.name.clone();
    let files = generate(model, options)?;
    let written = irongen_codegen::write_files(dir, &files)?;
    info!(model = %model_name, files = written.len(), "generation finished");
    Ok(written)
}

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
