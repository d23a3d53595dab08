//! Ordered transformer pipeline.
//!
//! ```text
//! AddObjectDeclarations ─► one compilation unit per declarable type
//! AddFields             ─► backing fields
//! AddComments           ─► doc comments
//! AddAbstractAccessors  ─► abstract getters, interface members
//! AddAccessors          ─► getters and setters
//! AddConstructors       ─► constructors, super calls
//! AddCompositionMembers ─► union and intersection lowering
//! AddGeneratedComment   ─► file markers
//! InnerTypeCompression  ─► nesting of singly used types
//! SimplifyGenerics      ─► inlined generic parameters
//! SimplifyAndClean      ─► spliced groups, empty members removed
//! ResolveNames          ─► local names and imports
//! ReorderMembers        ─► weighted member order
//! PrettyCode            ─► blank lines
//! ```
//!
//! Each pass relies on what the earlier ones established, so the order of
//! [`Pipeline::standard`] is fixed.

use irongen_ast::CodeRoot;
use tracing::{debug, info};

use crate::error::Result;
use crate::options::CodeOptions;
use crate::transform::{
    AddAbstractAccessors, AddAccessors, AddComments, AddCompositionMembers, AddConstructors,
    AddFields, AddGeneratedComment, AddObjectDeclarations, InnerTypeCompression, PrettyCode,
    ReorderMembers, ResolveNames, SimplifyAndClean, SimplifyGenerics,
};

/// One pass over the tree.
pub trait Transformer {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Applies the pass.
    ///
    /// # Errors
    /// Returns `CodegenError` if an invariant is violated or a shape is unsupported.
    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()>;
}

/// Ordered list of passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Transformer>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full pipeline in dependency order.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddComments)
            .add_pass(AddAbstractAccessors)
            .add_pass(AddAccessors)
            .add_pass(AddConstructors)
            .add_pass(AddCompositionMembers)
            .add_pass(AddGeneratedComment)
            .add_pass(InnerTypeCompression)
            .add_pass(SimplifyGenerics)
            .add_pass(SimplifyAndClean)
            .add_pass(ResolveNames)
            .add_pass(ReorderMembers)
            .add_pass(PrettyCode)
    }

    /// Appends a pass.
    #[must_use]
    pub fn add_pass(mut self, pass: impl Transformer + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Names of the passes, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Number of passes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Returns true if there are no passes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs every pass in order. The first failure aborts the run.
    ///
    /// # Errors
    /// Returns the error of the failing pass.
    pub fn run(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        info!(
            model = %root.model().name,
            passes = self.passes.len(),
            "running pipeline"
        );
        for pass in &self.passes {
            debug!(pass = pass.name(), "running pass");
            pass.transform(root, options)?;
            root.invalidate_references();
        }
        debug!(units = root.children().len(), "pipeline finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Count(Rc<Cell<usize>>);

    impl Transformer for Count {
        fn name(&self) -> &'static str {
            "Count"
        }

        fn transform(&self, _root: &mut CodeRoot, _options: &CodeOptions) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_standard_order() {
        let names = Pipeline::standard().names();
        assert_eq!(names.first(), Some(&"AddObjectDeclarations"));
        assert_eq!(names.last(), Some(&"PrettyCode"));
        let position = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .expect("pass registered")
        };
        assert!(position("AddComments") < position("AddAccessors"));
        assert!(position("AddAccessors") < position("AddConstructors"));
        assert!(position("SimplifyGenerics") < position("ResolveNames"));
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn test_custom_pipeline_runs_each_pass_once() {
        let counter = Rc::new(Cell::new(0));
        let pipeline = Pipeline::new()
            .add_pass(Count(Rc::clone(&counter)))
            .add_pass(Count(Rc::clone(&counter)));
        let mut root = CodeRoot::new(fixtures::empty_model());

        pipeline
            .run(&mut root, &CodeOptions::default())
            .expect("pipeline runs");
        assert_eq!(counter.get(), 2);
    }
}
