//! Blank-line markers between dissimilar members.

use irongen_ast::node::{
    Block, CompilationUnit, DeclarationShape, FormatNewline, NamespaceBlock, Node,
};
use irongen_ast::reduce::{self, Reduced, Reducer};
use irongen_ast::CodeRoot;
use tracing::debug;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;

/// Inserts blank lines between members of different kinds, and after every
/// method and nested declaration. Expects members to be in their final order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyCode;

impl Transformer for PrettyCode {
    fn name(&self) -> &'static str {
        "PrettyCode"
    }

    fn transform(&self, root: &mut CodeRoot, _options: &CodeOptions) -> Result<()> {
        let mut pretty = Pretty::default();
        root.reduce(&mut pretty)?;
        debug!(newlines = pretty.inserted, "formatted tree");
        Ok(())
    }
}

#[derive(Default)]
struct Pretty {
    format_block: Vec<bool>,
    inserted: usize,
}

impl Pretty {
    fn formatting<T>(&mut self, format: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        self.format_block.push(format);
        let out = f(self);
        self.format_block.pop();
        out
    }
}

/// Adds the blank lines in place and returns how many were added.
fn prettify(members: &mut Vec<Node>) -> usize {
    let mut inserted = 0;
    for i in (0..members.len().saturating_sub(1)).rev() {
        let current = &members[i];
        let next = &members[i + 1];
        if matches!(current, Node::FormatNewline(_)) || matches!(next, Node::FormatNewline(_)) {
            continue;
        }
        let separate = matches!(current, Node::MethodDeclaration(_))
            || current.is_object_declaration()
            || current.kind_name() != next.kind_name();
        if separate {
            members.insert(i + 1, FormatNewline::new().into());
            inserted += 1;
        }
    }
    inserted
}

impl Reducer for Pretty {
    fn reduce_declaration_shape(&mut self, node: DeclarationShape) -> Reduced<DeclarationShape> {
        self.formatting(true, |r| reduce::reduce_declaration_shape(r, node))
    }

    fn reduce_namespace_block(&mut self, node: NamespaceBlock) -> Reduced<NamespaceBlock> {
        self.formatting(true, |r| reduce::reduce_namespace_block(r, node))
    }

    fn reduce_block(&mut self, node: Block) -> Reduced<Block> {
        let format = self.format_block.last().copied().unwrap_or(false);
        let reduced = self.formatting(false, |r| reduce::reduce_block(r, node))?;
        let Some(mut block) = reduced else {
            return Ok(None);
        };
        if format {
            self.inserted += prettify(&mut block.children);
        }
        Ok(Some(block))
    }

    fn reduce_compilation_unit(&mut self, node: CompilationUnit) -> Reduced<CompilationUnit> {
        let Some(mut unit) = reduce::reduce_compilation_unit(self, node)? else {
            return Ok(None);
        };
        self.inserted += prettify(&mut unit.children);
        Ok(Some(unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{
        AddAccessors, AddConstructors, AddFields, AddObjectDeclarations, ReorderMembers,
    };
    use irongen_ast::node::HardCoded;

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddAccessors)
            .add_pass(AddConstructors)
            .add_pass(ReorderMembers)
            .add_pass(PrettyCode)
    }

    #[test]
    fn test_prettify_separates_different_kinds() {
        let mut members: Vec<Node> = vec![
            HardCoded::new("a").into(),
            HardCoded::new("b").into(),
            FormatNewline::new().into(),
            HardCoded::new("c").into(),
        ];
        assert_eq!(prettify(&mut members), 0);

        let mut members: Vec<Node> = vec![
            HardCoded::new("a").into(),
            FormatNewline::new().into(),
            HardCoded::new("b").into(),
        ];
        members.insert(1, Block::default().into());
        assert_eq!(prettify(&mut members), 1);
        let kinds: Vec<&str> = members.iter().map(Node::kind_name).collect();
        assert_eq!(kinds[0], "hard-coded");
        assert_eq!(kinds[2], "block");
    }

    #[test]
    fn test_class_body_gets_blank_lines() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let members = fixtures::members(&root, person);
        let newlines = members
            .iter()
            .filter(|n| matches!(n, Node::FormatNewline(_)))
            .count();
        assert!(newlines > 0);
        for pair in members.windows(2) {
            assert!(!(matches!(pair[0], Node::FormatNewline(_))
                && matches!(pair[1], Node::FormatNewline(_))));
        }
        assert!(!matches!(members.last(), Some(Node::FormatNewline(_))));
    }

    #[test]
    fn test_running_twice_adds_nothing() {
        let (model, person) = fixtures::person_model();
        let mut root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());
        let before = fixtures::members(&root, person).len();
        PrettyCode
            .transform(&mut root, &CodeOptions::default())
            .expect("second run");
        assert_eq!(fixtures::members(&root, person).len(), before);
    }

    #[test]
    fn test_constructor_body_is_left_alone() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());
        let constructor = fixtures::members(&root, person)
            .iter()
            .find_map(|n| match n {
                Node::ConstructorDeclaration(c) => Some(c),
                _ => None,
            })
            .expect("constructor");
        assert!(constructor
            .body
            .children
            .iter()
            .all(|n| !matches!(n, Node::FormatNewline(_))));
    }
}
