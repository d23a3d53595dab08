//! Removal of empty constructors and redundant super calls.

use irongen_ast::node::{
    Block, CompilationUnit, ConstructorDeclaration, EnumDeclaration, ModifierKind, Node,
    SuperConstructorCall,
};
use irongen_ast::reduce::{self, Reduced, Reducer};
use irongen_ast::CodeRoot;
use tracing::debug;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;

/// Splices node groups into their parents and drops constructors and super calls
/// that do nothing. Enums are implicitly static, so they lose the modifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyAndClean;

impl Transformer for SimplifyAndClean {
    fn name(&self) -> &'static str {
        "SimplifyAndClean"
    }

    fn transform(&self, root: &mut CodeRoot, _options: &CodeOptions) -> Result<()> {
        let mut cleaner = Cleaner::default();
        root.reduce(&mut cleaner)?;
        let children = std::mem::take(root.children_mut());
        *root.children_mut() = splice(children);
        debug!(
            spliced = cleaner.spliced,
            constructors = cleaner.constructors,
            super_calls = cleaner.super_calls,
            "cleaned tree"
        );
        Ok(())
    }
}

#[derive(Default)]
struct Cleaner {
    spliced: usize,
    constructors: usize,
    super_calls: usize,
}

impl Cleaner {
    fn splice_counted(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        if nodes.iter().any(|n| matches!(n, Node::Nodes(_))) {
            self.spliced += 1;
            splice(nodes)
        } else {
            nodes
        }
    }
}

/// Replaces every node group with its children, recursively.
fn splice(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Nodes(group) => out.extend(splice(group.children)),
            other => out.push(other),
        }
    }
    out
}

impl Reducer for Cleaner {
    fn reduce_block(&mut self, node: Block) -> Reduced<Block> {
        let Some(mut block) = reduce::reduce_block(self, node)? else {
            return Ok(None);
        };
        block.children = self.splice_counted(block.children);
        Ok(Some(block))
    }

    fn reduce_compilation_unit(&mut self, node: CompilationUnit) -> Reduced<CompilationUnit> {
        let Some(mut unit) = reduce::reduce_compilation_unit(self, node)? else {
            return Ok(None);
        };
        unit.children = self.splice_counted(unit.children);
        Ok(Some(unit))
    }

    fn reduce_super_constructor_call(
        &mut self,
        node: SuperConstructorCall,
    ) -> Reduced<SuperConstructorCall> {
        let Some(call) = reduce::reduce_super_constructor_call(self, node)? else {
            return Ok(None);
        };
        if call.arguments.children.is_empty() {
            self.super_calls += 1;
            return Ok(None);
        }
        Ok(Some(call))
    }

    fn reduce_constructor_declaration(
        &mut self,
        node: ConstructorDeclaration,
    ) -> Reduced<ConstructorDeclaration> {
        let Some(constructor) = reduce::reduce_constructor_declaration(self, node)? else {
            return Ok(None);
        };
        if constructor.parameters.children.is_empty()
            && constructor.body.children.is_empty()
            && !constructor.modifiers.has(ModifierKind::Private)
        {
            self.constructors += 1;
            return Ok(None);
        }
        Ok(Some(constructor))
    }

    fn reduce_enum_declaration(&mut self, node: EnumDeclaration) -> Reduced<EnumDeclaration> {
        let Some(mut declaration) = reduce::reduce_enum_declaration(self, node)? else {
            return Ok(None);
        };
        declaration.shape.modifiers.remove(ModifierKind::Static);
        Ok(Some(declaration))
    }
}
