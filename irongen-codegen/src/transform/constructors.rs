//! Constructor synthesis from required fields and supertype parameters.

use std::collections::{HashMap, HashSet};

use irongen_ast::node::{
    self_field, Block, ClassDeclaration, ConstructorDeclaration, ConstructorParameter,
    DeclarationReference, Field, FieldReference, Identifier, Literal, ModifierKind, Node,
    Statement, SuperConstructorCall, TypeNode,
};
use irongen_ast::{CodeRoot, NodeId};
use irongen_model::{Property, TypeId};
use tracing::{debug, trace};

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Adds a constructor taking every field that must be set at construction.
///
/// A field is required when it has no initializer, is not static, and either has
/// a setter or is final. Required fields of superclasses come first and are
/// passed on to the super call. A superclass field that the subclass pins to a
/// constant gets the literal instead of a parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddConstructors;

impl Transformer for AddConstructors {
    fn name(&self) -> &'static str {
        "AddConstructors"
    }

    fn transform(&self, root: &mut CodeRoot, _options: &CodeOptions) -> Result<()> {
        let mut plans = plan_all(root);
        debug!(constructors = plans.len(), "planned constructors");
        if plans.is_empty() {
            return Ok(());
        }

        util::with_children(root, |_, children| {
            util::for_each_declaration_mut(children, &mut |node| {
                let Node::ClassDeclaration(class) = node else {
                    return Ok(());
                };
                let planned = class.shape.type_id().and_then(|t| plans.remove(&t));
                if let Some(constructor) = planned {
                    class.shape.body.children.push(constructor.into());
                }
                Ok(())
            })
        })
    }
}

fn plan_all(root: &CodeRoot) -> HashMap<TypeId, ConstructorDeclaration> {
    let mut classes: Vec<&ClassDeclaration> = Vec::new();
    util::for_each_declaration(root.children(), &mut |node| {
        if let Node::ClassDeclaration(class) = node {
            classes.push(&**class);
        }
    });

    let mut planner = Planner {
        root,
        memo: HashMap::new(),
        visiting: HashSet::new(),
    };
    let mut plans = HashMap::new();
    for class in classes {
        let has_constructor = class
            .shape
            .body
            .children
            .iter()
            .any(|n| matches!(n, Node::ConstructorDeclaration(_)));
        if has_constructor {
            continue;
        }
        let Some(type_id) = class.shape.type_id() else {
            continue;
        };
        if let Some(constructor) = planner.plan(class, type_id) {
            trace!(
                class = %class.shape.name.value,
                parameters = constructor.parameters.children.len(),
                "constructor"
            );
            plans.insert(type_id, constructor);
        }
    }
    plans
}

/// Field that a constructor has to set.
#[derive(Debug, Clone)]
struct Required {
    field_id: NodeId,
    property_name: Option<String>,
    parameter_name: String,
    type_node: TypeNode,
}

impl Required {
    fn parameter(&self) -> ConstructorParameter {
        ConstructorParameter::new(
            FieldReference::new(self.field_id),
            self.type_node.clone(),
            Identifier::new(self.parameter_name.clone()),
        )
    }
}

struct Planner<'a> {
    root: &'a CodeRoot,
    memo: HashMap<TypeId, Vec<Required>>,
    visiting: HashSet<TypeId>,
}

impl<'a> Planner<'a> {
    fn plan(
        &mut self,
        class: &'a ClassDeclaration,
        type_id: TypeId,
    ) -> Option<ConstructorDeclaration> {
        let root = self.root;
        let ids = root.ids();
        let own = self.own_required(class);
        let super_class = self.super_class(class);
        let inherited = super_class.map(|s| self.all_required(s)).unwrap_or_default();

        let mut parameters = Vec::new();
        let mut reused: HashMap<usize, NodeId> = HashMap::new();
        let mut super_args: Vec<Node> = Vec::new();
        for required in &inherited {
            if let Some(literal) = self.pinned_constant(type_id, required) {
                super_args.push(literal.into());
                continue;
            }
            let same_named = own.iter().enumerate().position(|(i, o)| {
                o.parameter_name == required.parameter_name && !reused.contains_key(&i)
            });
            let parameter = match same_named {
                Some(i) => {
                    let parameter = own[i].parameter();
                    reused.insert(i, ids.id_of(&parameter.id));
                    parameter
                }
                None => required.parameter(),
            };
            super_args.push(DeclarationReference::new(ids.id_of(&parameter.id)).into());
            parameters.push(parameter);
        }

        let mut body: Vec<Node> = Vec::new();
        let has_super_args = !super_args.is_empty();
        if super_class.is_some() {
            body.push(Statement::new(SuperConstructorCall::new(super_args).into()).into());
        }
        for (i, required) in own.iter().enumerate() {
            let parameter_id = match reused.get(&i) {
                Some(id) => *id,
                None => {
                    let parameter = required.parameter();
                    let id = ids.id_of(&parameter.id);
                    parameters.push(parameter);
                    id
                }
            };
            body.push(util::assign(
                self_field(required.field_id),
                DeclarationReference::new(parameter_id).into(),
            ));
        }
        if parameters.is_empty() && !has_super_args {
            return None;
        }
        Some(ConstructorDeclaration::new(parameters, Block::new(body)))
    }

    /// Required fields of a class and its superclasses, outermost superclass first.
    fn all_required(&mut self, class: &'a ClassDeclaration) -> Vec<Required> {
        let Some(type_id) = class.shape.type_id() else {
            return self.own_required(class);
        };
        if let Some(done) = self.memo.get(&type_id) {
            return done.clone();
        }
        if !self.visiting.insert(type_id) {
            return Vec::new();
        }
        let mut out = self
            .super_class(class)
            .map(|s| self.all_required(s))
            .unwrap_or_default();
        out.extend(self.own_required(class));
        self.visiting.remove(&type_id);
        self.memo.insert(type_id, out.clone());
        out
    }

    fn own_required(&self, class: &ClassDeclaration) -> Vec<Required> {
        let body = &class.shape.body.children;
        let (_, setters) = util::accessor_targets(body);
        let setter_targets: Vec<NodeId> = setters.iter().map(|r| r.target_id).collect();
        body.iter()
            .filter_map(Node::as_field)
            .filter(|f| self.is_required(f, &setter_targets))
            .map(|f| self.required(f))
            .collect()
    }

    fn is_required(&self, field: &Field, setter_targets: &[NodeId]) -> bool {
        if field.initializer.is_some() || field.modifiers.has(ModifierKind::Static) {
            return false;
        }
        let has_setter = field
            .id
            .get()
            .is_some_and(|id| setter_targets.contains(&id));
        has_setter || field.is_immutable()
    }

    fn required(&self, field: &Field) -> Required {
        let resolver = self.root.name_resolver();
        let (parameter_name, type_node) = match &field.property {
            Some(property) => (
                util::member_identifier(resolver, &property.name).value,
                self.root.create_type_node(property.type_id, false),
            ),
            None => (field.identifier.value.clone(), field.type_node.clone()),
        };
        Required {
            field_id: self.root.ids().id_of(&field.id),
            property_name: field.property.as_ref().map(|p| p.name.clone()),
            parameter_name,
            type_node,
        }
    }

    fn super_class(&self, class: &ClassDeclaration) -> Option<&'a ClassDeclaration> {
        let extends = class.shape.extends.as_ref()?.types.children.first()?.type_id()?;
        let target = util::declared_type_of(self.root.model(), extends);
        match util::find_declaration(self.root.children(), target)? {
            Node::ClassDeclaration(c) => Some(&**c),
            _ => None,
        }
    }

    /// Literal for an inherited field whose property the class redeclares as a constant.
    fn pinned_constant(&self, type_id: TypeId, required: &Required) -> Option<Literal> {
        let name = required.property_name.as_deref()?;
        let property = self.own_property(type_id, name)?;
        literal_of(self.root, property)
    }

    fn own_property(&self, type_id: TypeId, name: &str) -> Option<&'a Property> {
        self.root
            .model()
            .properties_of(type_id)
            .iter()
            .find(|p| p.name == name)
    }
}

fn literal_of(root: &CodeRoot, property: &Property) -> Option<Literal> {
    let model = root.model();
    let value = model.constant_value_of(property.type_id)?.clone();
    Some(
        match model.get(model.undecorated(property.type_id)).as_primitive() {
            Some(p) => Literal::typed(value, p.kind),
            None => Literal::new(value),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{AddAccessors, AddFields, AddObjectDeclarations};
    use irongen_ast::node::TokenKind;
    use irongen_model::{ObjectType, PrimitiveKind, PrimitiveType, TypeDef};

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddAccessors)
            .add_pass(AddConstructors)
    }

    fn constructor_of(root: &CodeRoot, type_id: TypeId) -> &ConstructorDeclaration {
        fixtures::members(root, type_id)
            .iter()
            .find_map(|n| match n {
                Node::ConstructorDeclaration(c) => Some(&**c),
                _ => None,
            })
            .expect("constructor")
    }

    fn super_call(constructor: &ConstructorDeclaration) -> &SuperConstructorCall {
        match constructor.body.children.first() {
            Some(Node::Statement(statement)) => match &*statement.child {
                Node::SuperConstructorCall(call) => call,
                other => panic!("expected a super call, found {}", other.kind_name()),
            },
            _ => panic!("expected a statement"),
        }
    }

    // `self.<field> = <parameter>` as (field id, parameter id).
    fn assignment(node: &Node) -> (NodeId, NodeId) {
        let Node::Statement(statement) = node else {
            panic!("expected a statement, found {}", node.kind_name());
        };
        let Node::BinaryExpression(expression) = &*statement.child else {
            panic!("expected an assignment");
        };
        assert_eq!(expression.token, TokenKind::Assign);
        let Node::MemberAccess(access) = &*expression.left else {
            panic!("expected a member access");
        };
        assert!(matches!(&*access.owner, Node::SelfReference(_)));
        let Node::FieldReference(field) = &*access.member else {
            panic!("expected a field reference");
        };
        let Node::DeclarationReference(value) = &*expression.right else {
            panic!("expected a parameter reference");
        };
        (field.target_id, value.target_id)
    }

    #[test]
    fn test_person_takes_both_fields() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let constructor = constructor_of(&root, person);
        let names: Vec<&str> = constructor
            .parameters
            .children
            .iter()
            .map(|p| p.identifier.value.as_str())
            .collect();
        assert_eq!(names, vec!["name", "nickname"]);
        assert_eq!(constructor.body.children.len(), 2);

        let mut assigned = HashSet::new();
        for (statement, parameter) in constructor.body.children.iter().zip(names.iter()) {
            let (field_id, value_id) = assignment(statement);
            let field = root.resolve_field(field_id).expect("assignment targets a field");
            assert_eq!(field.identifier.value, *parameter);
            assert!(assigned.insert(field_id), "field assigned twice");

            let source = constructor
                .parameters
                .children
                .iter()
                .find(|p| root.id_of(*p) == value_id)
                .expect("value is a constructor parameter");
            assert_eq!(source.field_ref.target_id, field_id);
        }
        assert_eq!(assigned.len(), 2);
    }

    #[test]
    fn test_subclass_passes_inherited_fields_to_super() {
        let (model, animal, dog, _) = fixtures::animal_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        assert_eq!(constructor_of(&root, animal).parameters.children.len(), 2);
        let constructor = constructor_of(&root, dog);
        let names: Vec<&str> = constructor
            .parameters
            .children
            .iter()
            .map(|p| p.identifier.value.as_str())
            .collect();
        assert_eq!(names, vec!["kind", "name", "breed"]);
        assert_eq!(super_call(constructor).arguments.children.len(), 2);
        // super call plus the assignment of breed
        assert_eq!(constructor.body.children.len(), 2);
    }

    #[test]
    fn test_pinned_constant_is_passed_as_literal() {
        let (model, _, _, cat) = fixtures::animal_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let constructor = constructor_of(&root, cat);
        assert_eq!(constructor.parameters.children.len(), 1);
        assert_eq!(constructor.parameters.children[0].identifier.value, "name");
        let arguments = &super_call(constructor).arguments.children;
        assert!(matches!(&arguments[0], Node::Literal(l) if l.value.to_string() == "cat"));
        assert!(matches!(&arguments[1], Node::DeclarationReference(_)));
    }

    #[test]
    fn test_hidden_constant_property_pins_super_argument() {
        let (mut model, animal, _, _) = fixtures::animal_model();
        let s = fixtures::string(&mut model);
        let wild = model.primitive(PrimitiveType::constant(PrimitiveKind::String, "wild"));
        let base = model.add_exported(TypeDef::Object(
            ObjectType::new("Base").with_property(Property::new("origin", s).read_only()),
        ));
        let fox = model.add_exported(TypeDef::Object(
            ObjectType::new("Fox")
                .extending(base)
                .with_property(Property::new("origin", wild).hidden()),
        ));
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        // origin is read-only, so Base takes it as a parameter and Fox pins it
        let constructor = constructor_of(&root, fox);
        assert!(constructor.parameters.children.is_empty());
        let arguments = &super_call(constructor).arguments.children;
        assert!(matches!(&arguments[0], Node::Literal(l) if l.value.to_string() == "wild"));
        assert_eq!(constructor_of(&root, animal).parameters.children.len(), 2);
    }

    #[test]
    fn test_class_without_required_fields_gets_no_constructor() {
        let mut model = fixtures::empty_model();
        let one = model.primitive(PrimitiveType::constant(PrimitiveKind::Int, 1_i64));
        let unit = model.add_exported(TypeDef::Object(
            ObjectType::new("Unit").with_property(Property::new("size", one)),
        ));
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        assert!(!fixtures::members(&root, unit)
            .iter()
            .any(|n| matches!(n, Node::ConstructorDeclaration(_))));
    }
}
