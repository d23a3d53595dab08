//! Abstract getter signatures for abstract properties.

use irongen_ast::node::{MethodDeclarationSignature, MethodName, ModifierKind, Node};
use irongen_ast::CodeRoot;
use irongen_model::{PrimitiveKind, PrimitiveType, TypeDef, TypeId};
use tracing::trace;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Declares the members that have no backing field.
///
/// Abstract properties of an object become abstract getters and make the class
/// abstract. Interfaces with an empty body get a getter, and a setter unless the
/// property is read-only, for every visible property.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddAbstractAccessors;

impl Transformer for AddAbstractAccessors {
    fn name(&self) -> &'static str {
        "AddAbstractAccessors"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        let void = root
            .model_mut()
            .primitive(PrimitiveType::new(PrimitiveKind::Void));

        util::with_children(root, |root, children| {
            util::for_each_declaration_mut(children, &mut |node| {
                match node {
                    Node::ClassDeclaration(class) => {
                        let Some(type_id) = class.shape.type_id() else {
                            return Ok(());
                        };
                        let getters =
                            abstract_getters(root, type_id, &class.shape.body.children, options);
                        if !getters.is_empty() {
                            trace!(
                                class = %class.shape.name.value,
                                getters = getters.len(),
                                "abstract getters"
                            );
                            class.shape.modifiers.add(ModifierKind::Abstract);
                            class.shape.body.children.extend(getters);
                        }
                    }
                    Node::InterfaceDeclaration(interface)
                        if interface.shape.body.children.is_empty() =>
                    {
                        let Some(type_id) = interface.shape.type_id() else {
                            return Ok(());
                        };
                        interface.shape.body.children = util::interface_members(
                            root,
                            type_id,
                            void,
                            options.immutable,
                            options.include_comments,
                        );
                    }
                    _ => {}
                }
                Ok(())
            })
        })
    }
}

fn abstract_getters(
    root: &CodeRoot,
    type_id: TypeId,
    body: &[Node],
    options: &CodeOptions,
) -> Vec<Node> {
    let model = root.model();
    if !matches!(model.get(model.undecorated(type_id)), TypeDef::Object(_)) {
        return Vec::new();
    }
    let resolver = root.name_resolver();
    let existing: Vec<&str> = body
        .iter()
        .filter_map(|n| match n {
            Node::AbstractMethodDeclaration(m) => {
                Some(m.signature.identifier.identifier().value.as_str())
            }
            _ => None,
        })
        .collect();

    let mut getters = Vec::new();
    for property in model.properties_of(type_id) {
        if !property.is_abstract || property.hidden {
            continue;
        }
        let identifier = util::member_identifier(resolver, &property.name);
        if existing.contains(&identifier.value.as_str()) {
            continue;
        }
        let mut signature = MethodDeclarationSignature::new(
            MethodName::getter(identifier, Some(property.type_id)),
            root.create_type_node(property.type_id, false),
            Vec::new(),
        )
        .with_modifiers(&[ModifierKind::Public, ModifierKind::Abstract]);
        if options.include_comments {
            signature.comments = property.description.as_deref().map(util::doc_comment);
        }
        getters.push(util::abstract_method(signature));
    }
    getters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{AddFields, AddObjectDeclarations};
    use irongen_model::{InterfaceType, ObjectType, Property};

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddAbstractAccessors)
    }

    #[test]
    fn test_abstract_property_makes_class_abstract() {
        let mut model = fixtures::empty_model();
        let s = fixtures::string(&mut model);
        let shape = model.add_exported(TypeDef::Object(
            ObjectType::new("Shape")
                .with_property(Property::new("label", s))
                .with_property(Property::new("area", s).abstract_property()),
        ));
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let declaration = fixtures::declaration(&root, shape).shape().expect("shape");
        assert!(declaration.modifiers.has(ModifierKind::Abstract));
        let abstract_methods: Vec<_> = declaration
            .body
            .children
            .iter()
            .filter_map(|n| match n {
                Node::AbstractMethodDeclaration(m) => Some(m),
                _ => None,
            })
            .collect();
        assert_eq!(abstract_methods.len(), 1);
        assert!(abstract_methods[0].signature.identifier.is_getter());
        assert_eq!(
            abstract_methods[0].signature.identifier.identifier().value,
            "area"
        );
        let fields = declaration.body.children.iter().filter_map(Node::as_field);
        assert_eq!(fields.count(), 1);
    }

    #[test]
    fn test_interface_gets_getters_and_setters() {
        let (mut model, person) = fixtures::person_model();
        let interface = model.add_exported(TypeDef::Interface(InterfaceType {
            of: person,
            name: None,
            namespace: Some("com.zoo".to_string()),
        }));
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let members = fixtures::members(&root, interface);
        // name is read-only: getter only; nickname: getter and setter
        assert_eq!(members.len(), 3);
        assert!(members
            .iter()
            .all(|m| matches!(m, Node::AbstractMethodDeclaration(_))));
    }

    #[test]
    fn test_concrete_class_is_untouched() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());
        let declaration = fixtures::declaration(&root, person).shape().expect("shape");
        assert!(!declaration.modifiers.has(ModifierKind::Abstract));
    }
}
