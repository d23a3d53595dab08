//! Lowering of unions and multiple inheritance into plain class members.
//!
//! - An exclusive union of enums and constants becomes a value class with one
//!   cached instance per known value, a static `get(value)` factory and an
//!   `isKnown()` check.
//! - Any other union keeps the raw value and exposes one memoized `getAsX`
//!   conversion per distinct member type.
//! - Class-like supertypes that cannot be extended are implemented through a
//!   generated interface, with their fields copied into the class.

use std::collections::{HashMap, HashSet};

use irongen_ast::node::{
    method_name, self_field, BinaryExpression, Block, ClassName, ConstructorDeclaration,
    ConstructorParameter, DeclarationReference, Delegate, DelegateCall, DelegateKind, Field,
    FieldBackedGetter, FieldBackedSetter, FieldReference, GenericRef, Identifier,
    IfElseStatement, IfStatement, ImplementsDeclaration, Literal, MethodCall, MethodDeclaration,
    MethodDeclarationSignature, ModifierKind, ModifierList, NewStatement, Node, Parameter,
    ReturnStatement, SelfReference, StaticMemberReference, Statement, TokenKind, TypeNode,
    VariableDeclaration,
};
use irongen_ast::{CodeRoot, IdSlot, NodeId};
use irongen_model::diff::distinct;
use irongen_model::naming::{to_camel_case, to_pascal_case};
use irongen_model::{
    DictionaryType, EnumMember, InterfaceType, PrimitiveKind, PrimitiveType, TypeDef, TypeId,
    TypeModel, UnknownKind, UnknownType,
};
use tracing::{debug, trace};

use crate::error::{CodegenError, Result};
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::transform::{declarations, fields};
use crate::util;

/// Adds the members that make union and intersection classes usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddCompositionMembers;

impl Transformer for AddCompositionMembers {
    fn name(&self) -> &'static str {
        "AddCompositionMembers"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        let targets = targets(root)?;
        if targets.is_empty() {
            return Ok(());
        }
        debug!(classes = targets.len(), "lowering compositions");

        let prepared: Vec<Prepared> = targets
            .into_iter()
            .map(|(class, lowering)| prepare(root.model_mut(), class, lowering))
            .collect();

        let mut declared: HashSet<TypeId> =
            util::declared_types(root.children()).into_iter().collect();
        let mut lowered: HashMap<TypeId, Lowered> = HashMap::new();
        let mut units = Vec::new();
        for target in &prepared {
            let out = match target {
                Prepared::Identities {
                    class,
                    union,
                    value_type,
                    bool_type,
                    dictionary,
                } => Lowered {
                    members: identity_members(
                        root,
                        *class,
                        union,
                        *value_type,
                        *bool_type,
                        *dictionary,
                        options,
                    ),
                    implements: Vec::new(),
                },
                Prepared::Raw {
                    class: _,
                    members,
                    any,
                } => Lowered {
                    members: raw_members(root, members, *any),
                    implements: Vec::new(),
                },
                Prepared::Additional {
                    class,
                    interfaces,
                    void,
                } => {
                    let mut out = Lowered::default();
                    for &(supertype, interface) in interfaces {
                        if declared.insert(interface) {
                            units.push(interface_unit(root, interface, *void, options)?);
                        }
                        out.implements.push(root.create_type_node(interface, false));
                        out.members.extend(flattened_members(root, *class, supertype, options));
                    }
                    out
                }
            };
            lowered.insert(target.class(), out);
        }

        util::with_children(root, |_, children| {
            util::for_each_declaration_mut(children, &mut |node| {
                let Node::ClassDeclaration(class) = node else {
                    return Ok(());
                };
                let Some(out) = class.shape.type_id().and_then(|t| lowered.remove(&t)) else {
                    return Ok(());
                };
                trace!(
                    class = %class.shape.name.value,
                    members = out.members.len(),
                    "lowered"
                );
                class.shape.body.children.extend(out.members);
                if !out.implements.is_empty() {
                    class
                        .shape
                        .implements
                        .get_or_insert_with(|| ImplementsDeclaration::new(Vec::new()))
                        .types
                        .children
                        .extend(out.implements);
                }
                Ok(())
            })
        })?;
        root.children_mut().extend(units);
        Ok(())
    }
}

/// Known values of an exclusive union made only of enums and constants.
#[derive(Debug, Clone)]
struct IdentityUnion {
    value_kind: PrimitiveKind,
    identities: Vec<EnumMember>,
}

#[derive(Debug)]
enum Lowering {
    Identities(IdentityUnion),
    Raw(Vec<TypeId>),
    Additional(Vec<TypeId>),
}

/// A lowering with the helper types it needs already added to the model.
#[derive(Debug)]
enum Prepared {
    Identities {
        class: TypeId,
        union: IdentityUnion,
        value_type: TypeId,
        bool_type: TypeId,
        dictionary: TypeId,
    },
    Raw {
        class: TypeId,
        members: Vec<TypeId>,
        any: TypeId,
    },
    Additional {
        class: TypeId,
        interfaces: Vec<(TypeId, TypeId)>,
        void: TypeId,
    },
}

impl Prepared {
    const fn class(&self) -> TypeId {
        match self {
            Self::Identities { class, .. }
            | Self::Raw { class, .. }
            | Self::Additional { class, .. } => *class,
        }
    }
}

#[derive(Debug, Default)]
struct Lowered {
    members: Vec<Node>,
    implements: Vec<TypeNode>,
}

fn targets(root: &CodeRoot) -> Result<Vec<(TypeId, Lowering)>> {
    let model = root.model();
    let mut classes = Vec::new();
    util::for_each_declaration(root.children(), &mut |node| {
        if let Node::ClassDeclaration(class) = node {
            classes.push(&**class);
        }
    });

    let mut out = Vec::new();
    for class in classes {
        let Some(type_id) = class.shape.type_id() else {
            continue;
        };
        let has_fields = class.shape.body.children.iter().any(|n| n.as_field().is_some());
        match model.get(type_id) {
            TypeDef::ExclusiveUnion(c) | TypeDef::Union(c) if !has_fields => {
                let exclusive = matches!(model.get(type_id), TypeDef::ExclusiveUnion(_));
                let lowering = match identity_union(model, &c.types) {
                    Some(union) if exclusive => Lowering::Identities(union),
                    _ => Lowering::Raw(distinct(model, &c.types, &[])),
                };
                out.push((type_id, lowering));
            }
            TypeDef::Object(_) | TypeDef::Intersection(_) => {
                let implemented: Vec<TypeId> = class
                    .shape
                    .implements
                    .iter()
                    .flat_map(|i| i.types.children.iter())
                    .filter_map(TypeNode::type_id)
                    .collect();
                let additional: Vec<TypeId> = root
                    .supertype_resolver()
                    .resolve(model, type_id)?
                    .additional
                    .into_iter()
                    .filter(|a| {
                        !find_interface(model, *a).is_some_and(|i| implemented.contains(&i))
                    })
                    .collect();
                if !additional.is_empty() {
                    out.push((type_id, Lowering::Additional(additional)));
                }
            }
            _ => {}
        }
    }
    Ok(out)
}

fn identity_union(model: &TypeModel, types: &[TypeId]) -> Option<IdentityUnion> {
    let mut value_kind = None;
    let mut identities: Vec<EnumMember> = Vec::new();
    for &type_id in types {
        let (kind, members) = match model.get(model.undecorated(type_id)) {
            TypeDef::Enum(e) => (e.item_kind, e.members.clone()),
            TypeDef::Primitive(p) => (p.kind, vec![EnumMember::new(p.constant_value()?.clone())]),
            _ => return None,
        };
        if *value_kind.get_or_insert(kind) != kind {
            return None;
        }
        for member in members {
            if !identities.iter().any(|i| i.value == member.value) {
                identities.push(member);
            }
        }
    }
    Some(IdentityUnion {
        value_kind: value_kind?,
        identities,
    })
}

fn find_interface(model: &TypeModel, of: TypeId) -> Option<TypeId> {
    model.iter().find_map(|(id, def)| match def {
        TypeDef::Interface(i) if i.of == of => Some(id),
        _ => None,
    })
}

fn prepare(model: &mut TypeModel, class: TypeId, lowering: Lowering) -> Prepared {
    match lowering {
        Lowering::Identities(union) => {
            let value_type = model.primitive(PrimitiveType::new(union.value_kind));
            let bool_type = model.primitive(PrimitiveType::new(PrimitiveKind::Bool));
            let dictionary = util::intern(
                model,
                TypeDef::Dictionary(DictionaryType {
                    key: value_type,
                    value: class,
                }),
            );
            Prepared::Identities {
                class,
                union,
                value_type,
                bool_type,
                dictionary,
            }
        }
        Lowering::Raw(members) => Prepared::Raw {
            class,
            members,
            any: util::intern(
                model,
                TypeDef::Unknown(UnknownType {
                    unknown_kind: UnknownKind::Any,
                }),
            ),
        },
        Lowering::Additional(supertypes) => {
            let interfaces = supertypes
                .into_iter()
                .map(|supertype| {
                    let interface = find_interface(model, supertype).unwrap_or_else(|| {
                        let namespace = model.get(supertype).namespace().map(str::to_string);
                        model.add(TypeDef::Interface(InterfaceType {
                            of: supertype,
                            name: None,
                            namespace,
                        }))
                    });
                    (supertype, interface)
                })
                .collect();
            Prepared::Additional {
                class,
                interfaces,
                void: model.primitive(PrimitiveType::new(PrimitiveKind::Void)),
            }
        }
    }
}

fn identity_members(
    root: &CodeRoot,
    class: TypeId,
    union: &IdentityUnion,
    value_type: TypeId,
    bool_type: TypeId,
    dictionary: TypeId,
    options: &CodeOptions,
) -> Vec<Node> {
    let resolver = root.name_resolver();
    let ids = root.ids();
    let class_type = || root.create_type_node(class, false);
    let value_node = || root.create_type_node(value_type, false);

    let value_field = Field::new(value_node(), Identifier::new("_value"))
        .with_modifiers(&[ModifierKind::Private, ModifierKind::Final]);
    let value_id = ids.id_of(&value_field.id);
    let mut value_getter = FieldBackedGetter::new(FieldReference::new(value_id));
    value_getter.getter_name = Some(Identifier::new("value"));

    let values_field = Field::new(
        root.create_type_node(dictionary, false),
        Identifier::new("_values"),
    )
    .with_modifiers(&[
        ModifierKind::Private,
        ModifierKind::Static,
        ModifierKind::Final,
    ])
    .with_initializer(
        NewStatement::new(root.create_type_node(dictionary, true), Vec::new()).into(),
    );
    let values_id = ids.id_of(&values_field.id);

    let mut members: Vec<Node> = vec![value_field.into(), values_field.into()];
    let mut constants = Vec::new();
    for member in &union.identities {
        let identifier = util::enum_item_identifier(resolver, member);
        let check_name = format!(
            "is{}",
            resolver.safe_identifier(&to_pascal_case(identifier.original_or_value()))
        );
        let literal = Literal::typed(member.value.clone(), union.value_kind);
        let mut constant = Field::new(class_type(), identifier)
            .with_modifiers(&[
                ModifierKind::Public,
                ModifierKind::Static,
                ModifierKind::Final,
            ])
            .with_initializer(
                MethodCall::new(
                    Some(ClassName::new(class_type()).into()),
                    method_name("get"),
                    vec![literal.into()],
                )
                .into(),
            );
        if options.include_comments {
            constant.comments = member.description.as_deref().map(util::doc_comment);
        }
        constants.push((check_name, ids.id_of(&constant.id)));
        members.push(constant.into());
    }

    let bool_node = || root.create_type_node(bool_type, false);
    let identity_check = |constant_id: NodeId| -> Node {
        BinaryExpression::new(
            SelfReference::default().into(),
            TokenKind::Equals,
            StaticMemberReference::new(class_type(), FieldReference::new(constant_id).into())
                .into(),
        )
        .into()
    };
    for (check_name, constant_id) in &constants {
        let signature = MethodDeclarationSignature::new(
            method_name(check_name.clone()),
            bool_node(),
            Vec::new(),
        )
        .with_modifiers(&[ModifierKind::Public]);
        let body = Block::new(vec![ReturnStatement::new(identity_check(*constant_id)).into()]);
        members.push(MethodDeclaration::new(signature, body).into());
    }

    let known = constants
        .iter()
        .map(|(_, id)| identity_check(*id))
        .reduce(|acc, next| BinaryExpression::new(acc, TokenKind::Or, next).into())
        .unwrap_or_else(|| Literal::new(false).into());
    let signature = MethodDeclarationSignature::new(method_name("isKnown"), bool_node(), Vec::new())
        .with_modifiers(&[ModifierKind::Public]);
    members.push(
        MethodDeclaration::new(signature, Block::new(vec![ReturnStatement::new(known).into()]))
            .into(),
    );

    members.push(factory(root, class, value_type, values_id).into());

    let parameter = ConstructorParameter::new(
        FieldReference::new(value_id),
        value_node(),
        Identifier::new("value"),
    );
    let parameter_id = ids.id_of(&parameter.id);
    let mut constructor = ConstructorDeclaration::new(
        vec![parameter],
        Block::new(vec![util::assign(
            self_field(value_id),
            DeclarationReference::new(parameter_id).into(),
        )]),
    );
    constructor.modifiers = ModifierList::of(&[ModifierKind::Private]);
    members.push(constructor.into());
    members.push(value_getter.into());
    members
}

/// `static Class get(value)` returning the cached instance for a value.
fn factory(
    root: &CodeRoot,
    class: TypeId,
    value_type: TypeId,
    values_id: NodeId,
) -> MethodDeclaration {
    let ids = root.ids();
    let class_type = || root.create_type_node(class, false);
    let parameter = Parameter::new(
        root.create_type_node(value_type, false),
        Identifier::new("value"),
    );
    let parameter_id = ids.id_of(&parameter.id);
    let value = || -> Node { DeclarationReference::new(parameter_id).into() };
    let values = || -> Node { FieldReference::new(values_id).into() };

    let created = VariableDeclaration::new(
        Identifier::new("created"),
        NewStatement::new(class_type(), vec![value()]).into(),
        Some(class_type()),
    );
    let created_id = ids.id_of(&created.id);
    let lookup = IfElseStatement::new(
        MethodCall::new(Some(values()), method_name("containsKey"), vec![value()]).into(),
        Block::new(vec![ReturnStatement::new(
            MethodCall::new(Some(values()), method_name("get"), vec![value()]).into(),
        )
        .into()]),
        Block::new(vec![
            created.into(),
            Statement::new(
                MethodCall::new(
                    Some(values()),
                    method_name("put"),
                    vec![value(), DeclarationReference::new(created_id).into()],
                )
                .into(),
            )
            .into(),
            ReturnStatement::new(DeclarationReference::new(created_id).into()).into(),
        ]),
    );

    let signature =
        MethodDeclarationSignature::new(method_name("get"), class_type(), vec![parameter])
            .with_modifiers(&[ModifierKind::Public, ModifierKind::Static]);
    MethodDeclaration::new(signature, Block::new(vec![lookup.into()]))
}

fn raw_members(root: &CodeRoot, union_members: &[TypeId], any: TypeId) -> Vec<Node> {
    let model = root.model();
    let resolver = root.name_resolver();
    let ids = root.ids();

    let raw_field = Field::new(root.create_type_node(any, false), Identifier::new("_raw"))
        .with_modifiers(&[ModifierKind::Private, ModifierKind::Final]);
    let raw_id = ids.id_of(&raw_field.id);
    let mut raw_getter = FieldBackedGetter::new(FieldReference::new(raw_id));
    raw_getter.getter_name = Some(Identifier::new("raw"));

    let parameter = ConstructorParameter::new(
        FieldReference::new(raw_id),
        root.create_type_node(any, false),
        Identifier::new("raw"),
    );
    let parameter_id = ids.id_of(&parameter.id);
    let constructor = ConstructorDeclaration::new(
        vec![parameter],
        Block::new(vec![util::assign(
            self_field(raw_id),
            DeclarationReference::new(parameter_id).into(),
        )]),
    );

    let mut members: Vec<Node> = vec![raw_field.into(), constructor.into(), raw_getter.into()];
    for &member in union_members {
        let name = model.virtual_name(member);
        let cache = Field::new(
            root.create_type_node(member, false),
            Identifier::new(format!("_{}", resolver.safe_identifier(&to_camel_case(&name)))),
        );
        let cache_id = ids.id_of(&cache.id);

        let delegate = Delegate {
            id: IdSlot::new(),
            parameter_types: vec![root.create_type_node(any, false)],
            return_type: root.create_type_node(member, false),
            kind: DelegateKind::Converter,
        };
        let delegate_id = ids.id_of(&delegate.id);
        let converter = Parameter::new(
            TypeNode::Delegate(Box::new(delegate)),
            Identifier::new("converter"),
        );
        let converter_id = ids.id_of(&converter.id);

        let cached = IfStatement::new(
            BinaryExpression::new(
                self_field(cache_id),
                TokenKind::NotEquals,
                Literal::null().into(),
            )
            .into(),
            Block::new(vec![ReturnStatement::new(self_field(cache_id)).into()]),
        );
        let convert = ReturnStatement::new(
            BinaryExpression::new(
                self_field(cache_id),
                TokenKind::Assign,
                DelegateCall::new(
                    DeclarationReference::new(converter_id).into(),
                    GenericRef::new(delegate_id).into(),
                    vec![self_field(raw_id)],
                )
                .into(),
            )
            .into(),
        );
        let signature = MethodDeclarationSignature::new(
            method_name(format!("getAs{}", resolver.safe_identifier(&to_pascal_case(&name)))),
            root.create_type_node(member, false),
            vec![converter],
        )
        .with_modifiers(&[ModifierKind::Public]);

        members.push(cache.into());
        members.push(
            MethodDeclaration::new(signature, Block::new(vec![cached.into(), convert.into()]))
                .into(),
        );
    }
    members
}

/// Compilation unit declaring the interface of a supertype.
fn interface_unit(
    root: &CodeRoot,
    interface: TypeId,
    void: TypeId,
    options: &CodeOptions,
) -> Result<Node> {
    let mut declaration = declarations::declare(root, interface)?.ok_or_else(|| {
        CodegenError::generation(
            "AddCompositionMembers",
            format!("{} has no declaration", root.model().describe(interface)),
        )
    })?;
    if let Some(shape) = declaration.shape_mut() {
        shape.body.children = util::interface_members(
            root,
            interface,
            void,
            options.immutable,
            options.include_comments,
        );
    }
    Ok(declarations::unit_for(root, interface, declaration, options))
}

/// Fields and accessors of a supertype copied into a class that implements it.
fn flattened_members(
    root: &CodeRoot,
    class: TypeId,
    supertype: TypeId,
    options: &CodeOptions,
) -> Vec<Node> {
    let model = root.model();
    let own: HashSet<&str> = model
        .properties_of(class)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    let mut fields = Vec::new();
    let mut accessors = Vec::new();
    for property in model.properties_of(supertype) {
        if property.hidden || property.is_abstract || own.contains(property.name.as_str()) {
            continue;
        }
        let field = fields::field(root, property, options);
        let field_id = root.ids().id_of(&field.id);
        let name = util::member_identifier(root.name_resolver(), &property.name);

        let mut getter = FieldBackedGetter::new(FieldReference::new(field_id));
        getter.getter_name = Some(name.clone());
        accessors.push(Node::FieldBackedGetter(getter));
        if !field.is_immutable() {
            let mut setter = FieldBackedSetter::new(FieldReference::new(field_id));
            setter.identifier = Some(name);
            accessors.push(Node::FieldBackedSetter(setter));
        }
        fields.push(Node::from(field));
    }
    fields.extend(accessors);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{AddAccessors, AddConstructors, AddFields, AddObjectDeclarations};
    use irongen_ast::ReferenceTarget;
    use irongen_model::{CompositionType, ObjectType, PrimitiveKind, PrimitiveType, Property};

    fn pipeline() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
            .add_pass(AddAccessors)
            .add_pass(AddConstructors)
            .add_pass(AddCompositionMembers)
    }

    fn method<'a>(members: &'a [Node], name: &str) -> &'a MethodDeclaration {
        members
            .iter()
            .find_map(|n| match n {
                Node::MethodDeclaration(m) if m.signature.identifier.identifier().value == name => {
                    Some(&**m)
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("method {name}"))
    }

    fn count_checks(node: &Node) -> usize {
        match node {
            Node::BinaryExpression(b) if b.token == TokenKind::Or => {
                count_checks(&b.left) + count_checks(&b.right)
            }
            Node::BinaryExpression(b) if b.token == TokenKind::Equals => 1,
            _ => 0,
        }
    }

    #[test]
    fn test_exclusive_union_of_values_gets_identity_members() {
        let (model, status, _) = fixtures::status_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());
        let members = fixtures::members(&root, status);

        let get = method(members, "get");
        assert!(get.signature.modifiers.has(ModifierKind::Static));
        assert_eq!(get.signature.parameters.children.len(), 1);

        let constants: Vec<&Field> = members
            .iter()
            .filter_map(Node::as_field)
            .filter(|f| {
                f.modifiers.has(ModifierKind::Public) && f.modifiers.has(ModifierKind::Static)
            })
            .collect();
        let names: Vec<&str> = constants.iter().map(|f| f.identifier.value.as_str()).collect();
        assert_eq!(names, vec!["ACTIVE", "INACTIVE", "PENDING"]);

        let values = members
            .iter()
            .filter_map(Node::as_field)
            .find(|f| f.identifier.value == "_values")
            .expect("value cache");
        assert!(matches!(values.initializer.as_deref(), Some(Node::NewStatement(_))));

        let is_known = method(members, "isKnown");
        let Some(Node::ReturnStatement(ret)) = is_known.body.children.first() else {
            panic!("expected a return");
        };
        assert_eq!(count_checks(&ret.expression), 3);
        method(members, "isPending");

        let constructor = members
            .iter()
            .find_map(|n| match n {
                Node::ConstructorDeclaration(c) => Some(c),
                _ => None,
            })
            .expect("constructor");
        assert!(constructor.modifiers.has(ModifierKind::Private));
    }

    #[test]
    fn test_union_keeps_raw_value_with_converters() {
        let (model, payload) = fixtures::payload_model();
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());
        let members = fixtures::members(&root, payload);

        let field_names: Vec<&str> = members
            .iter()
            .filter_map(Node::as_field)
            .map(|f| f.identifier.value.as_str())
            .collect();
        assert_eq!(field_names, vec!["_raw", "_person", "_string"]);

        let as_person = method(members, "getAsPerson");
        let parameter = &as_person.signature.parameters.children[0];
        assert!(matches!(parameter.type_node, TypeNode::Delegate(_)));

        let Some(Node::ReturnStatement(ret)) = as_person.body.children.last() else {
            panic!("expected a return");
        };
        let Node::BinaryExpression(assignment) = &*ret.expression else {
            panic!("expected an assignment");
        };
        let Node::DelegateCall(call) = &*assignment.right else {
            panic!("expected a delegate call");
        };
        let Node::GenericRef(delegate_ref) = &*call.delegate_ref else {
            panic!("expected a delegate reference");
        };
        let target = root.resolve(delegate_ref.target_id).expect("delegate resolves");
        assert!(matches!(target, ReferenceTarget::Delegate(_)));
        method(members, "getAsString");
    }

    #[test]
    fn test_union_branches_without_difference_share_one_getter() {
        let mut model = fixtures::empty_model();
        let first = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::Int)));
        let second = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::Int)));
        let s = fixtures::string(&mut model);
        let number = model.add_exported(TypeDef::Union(
            CompositionType::of(vec![first, second, s]).named("Number"),
        ));
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());
        let members = fixtures::members(&root, number);

        let getters: Vec<&str> = members
            .iter()
            .filter_map(|n| match n {
                Node::MethodDeclaration(m) => Some(m.signature.identifier.identifier()),
                _ => None,
            })
            .map(|identifier| identifier.value.as_str())
            .filter(|name| name.starts_with("getAs"))
            .collect();
        assert_eq!(getters, vec!["getAsInt", "getAsString"]);
    }

    #[test]
    fn test_second_class_supertype_is_implemented_through_interface() {
        let (mut model, person) = fixtures::person_model();
        let s = fixtures::string(&mut model);
        let pet = model.add(TypeDef::Object(
            ObjectType::new("Pet")
                .in_namespace("com.zoo")
                .with_property(Property::new("species", s)),
        ));
        let both = model.add_exported(TypeDef::Intersection(
            CompositionType::of(vec![person, pet]).named("PetPerson"),
        ));
        let root = fixtures::run_passes(model, &CodeOptions::default(), pipeline());

        let shape = fixtures::declaration(&root, both).shape().expect("shape");
        let extends = shape.extends.as_ref().expect("extends");
        assert_eq!(extends.types.children[0].type_id(), Some(person));
        let implemented = shape.implements.as_ref().expect("implements");
        let interface = implemented.types.children[0].type_id().expect("interface type");
        assert!(matches!(root.model().get(interface), TypeDef::Interface(i) if i.of == pet));

        let fields: Vec<&str> = shape
            .body
            .children
            .iter()
            .filter_map(Node::as_field)
            .map(|f| f.identifier.value.as_str())
            .collect();
        assert_eq!(fields, vec!["species"]);
        assert_eq!(fixtures::members(&root, interface).len(), 2);
    }

    #[test]
    fn test_running_twice_adds_nothing() {
        let (model, status, _) = fixtures::status_model();
        let once = fixtures::run_passes(model.clone(), &CodeOptions::default(), pipeline());
        let twice = fixtures::run_passes(
            model,
            &CodeOptions::default(),
            pipeline().add_pass(AddCompositionMembers),
        );
        assert_eq!(
            fixtures::members(&once, status).len(),
            fixtures::members(&twice, status).len()
        );
    }
}
