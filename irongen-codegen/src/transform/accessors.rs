//! Getter and setter synthesis for fields.

use irongen_ast::node::{
    Block, FieldBackedGetter, FieldBackedSetter, FieldReference, Identifier,
    MethodDeclaration, MethodDeclarationSignature, MethodName, ModifierKind, Node,
    ReturnStatement,
};
use irongen_ast::{CodeRoot, NodeId};
use tracing::trace;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Adds a getter, and a setter unless the field is final, for every property field.
///
/// Fields holding a constant are replaced by a getter returning the literal. When
/// `field_prefix` is set the field is renamed while its accessors keep the
/// property name, and the field's comment moves onto its getter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddAccessors;

impl Transformer for AddAccessors {
    fn name(&self) -> &'static str {
        "AddAccessors"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        util::with_children(root, |root, children| {
            util::for_each_declaration_mut(children, &mut |node| {
                let Node::ClassDeclaration(class) = node else {
                    return Ok(());
                };
                let body = &mut class.shape.body.children;
                if body.iter().any(|n| matches!(n, Node::FieldBackedGetter(_))) {
                    return Ok(());
                }

                let mut accessors = Vec::new();
                let mut index = 0;
                while index < body.len() {
                    if let Some(getter) = constant_getter(root, &body[index]) {
                        trace!(class = %class.shape.name.value, "constant getter");
                        body[index] = getter;
                        index += 1;
                        continue;
                    }
                    if let Node::Field(field) = &mut body[index] {
                        if field.property.is_some() && !field.modifiers.has(ModifierKind::Static) {
                            let id = root.ids().id_of(&field.id);
                            let name = Identifier::with_original(
                                field.identifier.value.clone(),
                                field.identifier.original_or_value(),
                            );
                            prefix(&mut field.identifier, &options.field_prefix);

                            let mut getter = FieldBackedGetter::new(FieldReference::new(id));
                            getter.getter_name = Some(name.clone());
                            getter.comments = field.comments.take();
                            accessors.push(Node::FieldBackedGetter(getter));
                            if !field.is_immutable() {
                                accessors.push(setter(id, name));
                            }
                        }
                    }
                    index += 1;
                }
                body.extend(accessors);
                Ok(())
            })
        })
    }
}

fn prefix(identifier: &mut Identifier, field_prefix: &str) {
    if field_prefix.is_empty() {
        return;
    }
    if identifier.original.is_none() {
        identifier.original = Some(identifier.value.clone());
    }
    identifier.value = format!("{field_prefix}{}", identifier.value);
}

fn setter(field_id: NodeId, name: Identifier) -> Node {
    let mut setter = FieldBackedSetter::new(FieldReference::new(field_id));
    setter.identifier = Some(name);
    Node::FieldBackedSetter(setter)
}

/// Getter method replacing a field whose property is a constant.
fn constant_getter(root: &CodeRoot, node: &Node) -> Option<Node> {
    let Node::Field(field) = node else {
        return None;
    };
    let property = field.property.as_ref()?;
    root.model().constant_value_of(property.type_id)?;
    let Some(Node::Literal(literal)) = field.initializer.as_deref() else {
        return None;
    };

    let mut signature = MethodDeclarationSignature::new(
        MethodName::getter(
            Identifier::with_original(
                field.identifier.value.clone(),
                field.identifier.original_or_value(),
            ),
            Some(property.type_id),
        ),
        root.create_type_node(property.type_id, false),
        Vec::new(),
    )
    .with_modifiers(&[ModifierKind::Public]);
    signature.comments = field.comments.clone();
    let body = Block::new(vec![ReturnStatement::new(literal.clone().into()).into()]);
    Some(MethodDeclaration::new(signature, body).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{AddComments, AddFields, AddObjectDeclarations};

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddComments)
            .add_pass(AddAccessors)
    }

    fn count(members: &[Node], f: impl Fn(&Node) -> bool) -> usize {
        members.iter().filter(|n| f(n)).count()
    }

    #[test]
    fn test_final_field_has_no_setter() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let members = fixtures::members(&root, person);
        assert_eq!(count(members, |n| matches!(n, Node::FieldBackedGetter(_))), 2);
        assert_eq!(count(members, |n| matches!(n, Node::FieldBackedSetter(_))), 1);

        let Some(Node::FieldBackedSetter(setter)) = members
            .iter()
            .find(|n| matches!(n, Node::FieldBackedSetter(_)))
        else {
            panic!("expected a setter");
        };
        let field = root
            .resolve_field(setter.field_ref.target_id)
            .expect("setter targets a field");
        assert_eq!(field.identifier.value, "nickname");
    }

    #[test]
    fn test_prefix_renames_field_only() {
        let (model, person) = fixtures::person_model();
        let options = CodeOptions::builder().field_prefix("_").build();
        let root = fixtures::run_passes(model, &options, pipeline());

        let members = fixtures::members(&root, person);
        let field = members.iter().find_map(Node::as_field).expect("field");
        assert_eq!(field.identifier.value, "_name");
        assert_eq!(field.identifier.original_or_value(), "name");
        assert!(field.comments.is_none());

        let Some(Node::FieldBackedGetter(getter)) = members
            .iter()
            .find(|n| matches!(n, Node::FieldBackedGetter(_)))
        else {
            panic!("expected a getter");
        };
        assert_eq!(getter.getter_name.as_ref().map(|n| n.value.as_str()), Some("name"));
        assert_eq!(
            getter.comments.as_ref().map(|c| c.text.plain_text()),
            Some("Full name.".to_string())
        );
    }

    #[test]
    fn test_constant_field_becomes_getter() {
        let (model, _, _, cat) = fixtures::animal_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let members = fixtures::members(&root, cat);
        assert_eq!(count(members, |n| n.as_field().is_some()), 0);
        let Some(Node::MethodDeclaration(method)) = members.first() else {
            panic!("expected a constant getter");
        };
        assert!(method.signature.identifier.is_getter());
        let Some(Node::ReturnStatement(ret)) = method.body.children.first() else {
            panic!("expected a return");
        };
        assert!(matches!(&*ret.expression, Node::Literal(l) if l.value.to_string() == "cat"));
    }

    #[test]
    fn test_running_twice_adds_nothing() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(
            model,
            &CodeOptions::default(),
            pipeline().add_pass(AddAccessors),
        );
        assert_eq!(fixtures::members(&root, person).len(), 5);
    }
}
