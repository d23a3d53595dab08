//! Generated-code marker comment.

use irongen_ast::node::{Comment, CommentKind, FreeTextNode, Node};
use irongen_ast::CodeRoot;

use crate::error::Result;
use crate::options::{CodeOptions, GENERATED_COMMENT};
use crate::pipeline::Transformer;

/// Marks every compilation unit as generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddGeneratedComment;

impl Transformer for AddGeneratedComment {
    fn name(&self) -> &'static str {
        "AddGeneratedComment"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        if !options.include_generated_comment {
            return Ok(());
        }
        for node in root.children_mut() {
            if let Node::CompilationUnit(unit) = node {
                unit.comments = Some(Comment::new(
                    FreeTextNode::text(GENERATED_COMMENT),
                    CommentKind::Single,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::AddObjectDeclarations;

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddGeneratedComment)
            .add_pass(AddGeneratedComment)
    }

    fn unit_comments(root: &CodeRoot) -> Vec<Option<&Comment>> {
        root.children()
            .iter()
            .filter_map(|n| match n {
                Node::CompilationUnit(unit) => Some(unit.comments.as_ref()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_every_unit_is_marked_once() {
        let (model, _, _, _) = fixtures::animal_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let comments = unit_comments(&root);
        assert_eq!(comments.len(), 3);
        for comment in comments {
            let comment = comment.expect("marked");
            assert_eq!(comment.kind, CommentKind::Single);
            assert_eq!(comment.text.plain_text(), GENERATED_COMMENT);
        }
    }

    #[test]
    fn test_disabled_marker() {
        let (model, _) = fixtures::person_model();
        let options = CodeOptions::builder()
            .include_generated_comment(false)
            .build();
        let root = fixtures::run_passes(model, &options, pipeline());
        assert!(unit_comments(&root).iter().all(Option::is_none));
    }
}
