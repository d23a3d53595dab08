//! Doc comments from type, property and enum member descriptions.

use irongen_ast::node::Node;
use irongen_ast::CodeRoot;
use irongen_model::TypeModel;
use tracing::trace;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Turns type, property and enum member descriptions into doc comments.
///
/// Existing comments are left alone. Does nothing when `include_comments` is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddComments;

impl Transformer for AddComments {
    fn name(&self) -> &'static str {
        "AddComments"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        if !options.include_comments {
            return Ok(());
        }
        util::with_children(root, |root, children| {
            util::for_each_declaration_mut(children, &mut |node| {
                let model = root.model();
                let Some(shape) = node.shape_mut() else {
                    return Ok(());
                };
                let Some(type_id) = shape.type_id() else {
                    return Ok(());
                };

                if shape.comments.is_none() {
                    shape.comments = description(model, type_id).map(util::doc_comment);
                }

                let members = util::enum_of(model, type_id).map(|e| e.members.as_slice());
                for child in &mut shape.body.children {
                    match child {
                        Node::Field(field) if field.comments.is_none() => {
                            let text = field
                                .property
                                .as_ref()
                                .and_then(|p| p.description.as_deref());
                            if let Some(text) = text {
                                trace!(field = %field.identifier.value, "comment");
                                field.comments = Some(util::doc_comment(text));
                            }
                        }
                        Node::EnumItemList(list) => {
                            let Some(members) = members else { continue };
                            for (item, member) in list.children.iter_mut().zip(members) {
                                if item.comments.is_none() {
                                    item.comments =
                                        member.description.as_deref().map(util::doc_comment);
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(())
            })
        })
    }
}

fn description(model: &TypeModel, type_id: irongen_model::TypeId) -> Option<&str> {
    model
        .get(type_id)
        .description()
        .or_else(|| model.get(model.undecorated(type_id)).description())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{AddFields, AddObjectDeclarations};
    use irongen_model::{EnumMember, EnumType, PrimitiveKind, PrimitiveValue, TypeDef};

    fn commented() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddComments)
    }

    #[test]
    fn test_descriptions_become_doc_comments() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), commented());

        let shape = fixtures::declaration(&root, person).shape().expect("shape");
        let comment = shape.comments.as_ref().expect("class comment");
        assert_eq!(comment.text.plain_text(), "Somebody at the zoo.");

        let fields: Vec<_> = shape.body.children.iter().filter_map(Node::as_field).collect();
        assert_eq!(
            fields[0].comments.as_ref().map(|c| c.text.plain_text()),
            Some("Full name.".to_string())
        );
        assert!(fields[1].comments.is_none());
    }

    #[test]
    fn test_disabled_comments_add_nothing() {
        let (model, person) = fixtures::person_model();
        let options = CodeOptions::builder().include_comments(false).build();
        let root = fixtures::run_passes(model, &options, commented());

        let shape = fixtures::declaration(&root, person).shape().expect("shape");
        assert!(shape.comments.is_none());
        assert!(shape
            .body
            .children
            .iter()
            .filter_map(Node::as_field)
            .all(|f| f.comments.is_none()));
    }

    #[test]
    fn test_enum_members_are_commented_in_order() {
        let mut model = fixtures::empty_model();
        let mut members = vec![
            EnumMember::new(PrimitiveValue::from("open")),
            EnumMember::new(PrimitiveValue::from("closed")),
        ];
        members[1].description = Some("No longer accepting visitors.".to_string());
        let gate = model.add_exported(TypeDef::Enum(EnumType {
            name: "Gate".to_string(),
            namespace: None,
            item_kind: PrimitiveKind::String,
            members,
            extended_by: None,
            description: None,
        }));
        let root = fixtures::run_passes(model, &CodeOptions::default(), commented());

        let Some(Node::EnumItemList(list)) = fixtures::members(&root, gate).first() else {
            panic!("expected enum items");
        };
        assert!(list.children[0].comments.is_none());
        assert_eq!(
            list.children[1]
                .comments
                .as_ref()
                .map(|c| c.text.plain_text()),
            Some("No longer accepting visitors.".to_string())
        );
    }
}
