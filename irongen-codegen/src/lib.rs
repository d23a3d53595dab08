//! # IronGen Codegen
//!
//! Lowers a type model into a source tree and prints it.
//!
//! This crate provides:
//! - Generation options with a consuming builder
//! - The ordered transformer pipeline and its fourteen passes
//! - The renderer contract and a Java-like reference renderer
//! - Writing rendered files to disk

pub mod error;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod transform;

#[cfg(test)]
mod fixtures;
pub(crate) mod util;

pub use error::{CodegenError, Result};
pub use options::{CodeOptions, CodeOptionsBuilder, GENERATED_COMMENT};
pub use pipeline::{Pipeline, Transformer};
pub use render::{JavaLikeRenderer, RenderedFile, Renderer, write_files};

use irongen_ast::CodeRoot;
use irongen_model::TypeModel;

/// Runs the standard pipeline over a model and returns the finished tree.
///
/// # Arguments
/// * `model` - Type model to lower
/// * `options` - Generation options
///
/// # Errors
/// Returns `CodegenError` if the model is inconsistent or a pass fails.
pub fn build_tree(model: TypeModel, options: &CodeOptions) -> Result<CodeRoot> {
    irongen_model::validate_model(&model)?;
    let mut root = CodeRoot::new(model);
    Pipeline::standard().run(&mut root, options)?;
    Ok(root)
}

/// Lowers a model and renders it with the reference renderer.
///
/// # Arguments
/// * `model` - Type model to lower
/// * `options` - Generation options
///
/// # Returns
/// One rendered file per compilation unit.
///
/// # Errors
/// Returns `CodegenError` if lowering or rendering fails.
pub fn generate(model: TypeModel, options: &CodeOptions) -> Result<Vec<RenderedFile>> {
    let root = build_tree(model, options)?;
    JavaLikeRenderer::default().render(&root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_renders_exported_types() {
        let (model, _) = fixtures::person_model();
        let files = generate(model, &CodeOptions::default()).expect("generate");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "Person.java");
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        use irongen_model::{ObjectType, Property, TypeDef};

        let mut other = fixtures::empty_model();
        for name in ["A", "B", "C"] {
            other.add(TypeDef::Object(ObjectType::new(name)));
        }
        let ghost = other.add(TypeDef::Object(ObjectType::new("Ghost")));

        let mut model = fixtures::empty_model();
        model.add_exported(TypeDef::Object(
            ObjectType::new("Broken").with_property(Property::new("ghost", ghost)),
        ));
        let err = build_tree(model, &CodeOptions::default()).expect_err("dangling type id");
        assert!(matches!(err, CodegenError::Model(_)));
    }
}
