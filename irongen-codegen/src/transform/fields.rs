//! Field synthesis from object properties.

use irongen_ast::node::{Field, Literal, ModifierKind, ModifierList, Node};
use irongen_ast::CodeRoot;
use irongen_model::{Property, TypeDef};
use tracing::trace;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Adds one private field per visible property of every object class.
///
/// Abstract and hidden properties are skipped, as are properties that can only
/// hold null unless `include_always_null_properties` is set. Constant properties
/// get their value as initializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddFields;

impl Transformer for AddFields {
    fn name(&self) -> &'static str {
        "AddFields"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        util::with_children(root, |root, children| {
            util::for_each_declaration_mut(children, &mut |node| {
                let Node::ClassDeclaration(class) = node else {
                    return Ok(());
                };
                let Some(type_id) = class.shape.type_id() else {
                    return Ok(());
                };
                let model = root.model();
                if !matches!(model.get(model.undecorated(type_id)), TypeDef::Object(_)) {
                    return Ok(());
                }

                let class_name = class.shape.name.value.clone();
                let body = &mut class.shape.body.children;
                for property in model.properties_of(type_id) {
                    if !wanted(root, property, options) || has_field(body, &property.name) {
                        continue;
                    }
                    trace!(property = %property.name, class = %class_name, "field");
                    body.push(field(root, property, options).into());
                }
                Ok(())
            })
        })
    }
}

fn wanted(root: &CodeRoot, property: &Property, options: &CodeOptions) -> bool {
    if property.is_abstract || property.hidden {
        return false;
    }
    options.include_always_null_properties || !root.model().is_null(property.type_id)
}

fn has_field(body: &[Node], property_name: &str) -> bool {
    body.iter().any(|n| {
        n.as_field()
            .and_then(|f| f.property.as_ref())
            .is_some_and(|p| p.name == property_name)
    })
}

/// Backing field for a property.
pub(crate) fn field(root: &CodeRoot, property: &Property, options: &CodeOptions) -> Field {
    let model = root.model();
    let mut field = Field::new(
        root.create_type_node(property.type_id, false),
        util::member_identifier(root.name_resolver(), &property.name),
    );

    let mut modifiers = vec![ModifierKind::Private];
    if options.immutable || property.read_only || model.is_null(property.type_id) {
        modifiers.push(ModifierKind::Final);
    }
    field.modifiers = ModifierList::of(&modifiers);

    if let Some(value) = model.constant_value_of(property.type_id) {
        let kind = model
            .get(model.undecorated(property.type_id))
            .as_primitive()
            .map(|p| p.kind);
        let literal = match kind {
            Some(kind) => Literal::typed(value.clone(), kind),
            None => Literal::new(value.clone()),
        };
        field = field.with_initializer(literal.into());
    }
    field.property = Some(property.clone());
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::AddObjectDeclarations;

    fn declare_fields() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
    }

    fn fields_of(root: &CodeRoot, type_id: irongen_model::TypeId) -> Vec<&Field> {
        fixtures::members(root, type_id)
            .iter()
            .filter_map(Node::as_field)
            .collect()
    }

    #[test]
    fn test_read_only_property_is_final() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(
            model,
            &CodeOptions::default(),
            declare_fields(),
        );

        let fields = fields_of(&root, person);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].identifier.value, "name");
        assert!(fields[0].is_immutable());
        assert!(!fields[1].is_immutable());
        assert!(fields[1].modifiers.has(ModifierKind::Private));
    }

    #[test]
    fn test_constant_property_gets_initializer() {
        let (model, _, _, cat) = fixtures::animal_model();
        let root = fixtures::run_passes(
            model,
            &CodeOptions::default(),
            declare_fields(),
        );

        let fields = fields_of(&root, cat);
        assert_eq!(fields.len(), 1);
        let Some(Node::Literal(literal)) = fields[0].initializer.as_deref() else {
            panic!("expected a literal initializer");
        };
        assert_eq!(literal.value.to_string(), "cat");
    }

    #[test]
    fn test_always_null_property_is_optional() {
        let (mut model, person) = fixtures::person_model();
        let null = model.primitive(irongen_model::PrimitiveType::new(
            irongen_model::PrimitiveKind::Null,
        ));
        let mut object = model.get(person).as_object().expect("object").clone();
        object.properties.push(Property::new("nothing", null));
        model.replace(person, TypeDef::Object(object));

        let default_root = fixtures::run_passes(
            model.clone(),
            &CodeOptions::default(),
            declare_fields(),
        );
        assert_eq!(fields_of(&default_root, person).len(), 2);

        let options = CodeOptions::builder()
            .include_always_null_properties(true)
            .build();
        let root = fixtures::run_passes(
            model,
            &options,
            declare_fields(),
        );
        let fields = fields_of(&root, person);
        assert_eq!(fields.len(), 3);
        assert!(fields[2].is_immutable());
    }
}
