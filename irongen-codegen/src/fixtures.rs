//! Type models shared by the pass tests.

use irongen_ast::node::Node;
use irongen_ast::CodeRoot;
use irongen_model::{
    CompositionType, EnumType, GenericSourceIdentifierType, GenericSourceType,
    GenericTargetIdentifier, GenericTargetType, ObjectType, PrimitiveKind, PrimitiveType,
    Property, TypeDef, TypeId, TypeModel,
};

use crate::options::CodeOptions;
use crate::pipeline::Pipeline;
use crate::util;

pub(crate) fn empty_model() -> TypeModel {
    TypeModel::new("fixtures")
}

pub(crate) fn string(model: &mut TypeModel) -> TypeId {
    model.primitive(PrimitiveType::new(PrimitiveKind::String))
}

pub(crate) fn int(model: &mut TypeModel) -> TypeId {
    model.primitive(PrimitiveType::new(PrimitiveKind::Int))
}

/// `Person { name (read-only), nickname }` in `com.zoo`.
pub(crate) fn person_model() -> (TypeModel, TypeId) {
    let mut model = empty_model();
    let s = string(&mut model);
    let person = model.add_exported(TypeDef::Object(
        ObjectType::new("Person")
            .in_namespace("com.zoo")
            .described("Somebody at the zoo.")
            .with_property(Property::new("name", s).read_only().described("Full name."))
            .with_property(Property::new("nickname", s)),
    ));
    (model, person)
}

/// `Animal { kind, name }`, `Dog extends Animal { breed }` and
/// `Cat extends Animal { kind = "cat" }`.
pub(crate) fn animal_model() -> (TypeModel, TypeId, TypeId, TypeId) {
    let mut model = empty_model();
    let s = string(&mut model);
    let cat_kind = model.primitive(PrimitiveType::constant(PrimitiveKind::String, "cat"));
    let animal = model.add_exported(TypeDef::Object(
        ObjectType::new("Animal")
            .in_namespace("com.zoo")
            .with_property(Property::new("kind", s))
            .with_property(Property::new("name", s)),
    ));
    let dog = model.add_exported(TypeDef::Object(
        ObjectType::new("Dog")
            .in_namespace("com.zoo")
            .extending(animal)
            .with_property(Property::new("breed", s)),
    ));
    let cat = model.add_exported(TypeDef::Object(
        ObjectType::new("Cat")
            .in_namespace("com.zoo")
            .extending(animal)
            .with_property(Property::new("kind", cat_kind)),
    ));
    (model, animal, dog, cat)
}

/// `Status` = exactly one of `Phase { active, inactive }` or the constant `"pending"`.
pub(crate) fn status_model() -> (TypeModel, TypeId, TypeId) {
    let mut model = empty_model();
    let pending = model.primitive(PrimitiveType::constant(PrimitiveKind::String, "pending"));
    let phase = model.add(TypeDef::Enum(EnumType::of_strings(
        "Phase",
        ["active", "inactive"],
    )));
    let status = model.add_exported(TypeDef::ExclusiveUnion(
        CompositionType::of(vec![phase, pending]).named("Status"),
    ));
    (model, status, phase)
}

/// `Payload` = any of `Person` or a string.
pub(crate) fn payload_model() -> (TypeModel, TypeId) {
    let (mut model, person) = person_model();
    let s = string(&mut model);
    let payload = model.add_exported(TypeDef::Union(
        CompositionType::of(vec![person, s]).named("Payload"),
    ));
    (model, payload)
}

/// `Owner` in `com.a` and `Shop` in `com.b`, each pointing at the other twice.
pub(crate) fn cross_namespace_model() -> (TypeModel, TypeId, TypeId) {
    let mut model = empty_model();
    let owner = model.add_exported(TypeDef::Object(ObjectType::new("Owner").in_namespace("com.a")));
    let shop = model.add_exported(TypeDef::Object(
        ObjectType::new("Shop")
            .in_namespace("com.b")
            .with_property(Property::new("owner", owner))
            .with_property(Property::new("previousOwner", owner)),
    ));
    model.replace(
        owner,
        TypeDef::Object(
            ObjectType::new("Owner")
                .in_namespace("com.a")
                .with_property(Property::new("shop", shop))
                .with_property(Property::new("formerShop", shop)),
        ),
    );
    (model, owner, shop)
}

/// `Box<T> { value: T }` used as `Box<String>` by both properties of `Holder`.
pub(crate) fn generic_model() -> (TypeModel, TypeId, TypeId) {
    let mut model = empty_model();
    let s = string(&mut model);
    let t = model.add(TypeDef::GenericSourceIdentifier(GenericSourceIdentifierType {
        placeholder_name: "T".to_string(),
        lower_bound: None,
    }));
    let boxed = model.add(TypeDef::Object(
        ObjectType::new("Box")
            .in_namespace("com.zoo")
            .with_property(Property::new("value", t)),
    ));
    let source = model.add(TypeDef::GenericSource(GenericSourceType {
        of: boxed,
        source_identifiers: vec![t],
    }));
    let boxed_string = model.add(TypeDef::GenericTarget(GenericTargetType {
        source,
        target_identifiers: vec![GenericTargetIdentifier {
            source_identifier: t,
            type_id: s,
        }],
    }));
    let holder = model.add_exported(TypeDef::Object(
        ObjectType::new("Holder")
            .in_namespace("com.zoo")
            .with_property(Property::new("first", boxed_string))
            .with_property(Property::new("second", boxed_string)),
    ));
    (model, boxed, holder)
}

/// Runs a pipeline over a fresh root.
pub(crate) fn run_passes(model: TypeModel, options: &CodeOptions, pipeline: Pipeline) -> CodeRoot {
    let mut root = CodeRoot::new(model);
    pipeline.run(&mut root, options).expect("passes run");
    root
}

/// Runs the standard pipeline over a fresh root.
pub(crate) fn run_standard(model: TypeModel, options: &CodeOptions) -> CodeRoot {
    let mut root = CodeRoot::new(model);
    Pipeline::standard()
        .run(&mut root, options)
        .expect("pipeline runs");
    root
}

/// Declaration of a type, which must exist.
pub(crate) fn declaration(root: &CodeRoot, type_id: TypeId) -> &Node {
    util::find_declaration(root.children(), type_id).expect("type is declared")
}

/// Members of a declaration.
pub(crate) fn members(root: &CodeRoot, type_id: TypeId) -> &[Node] {
    &declaration(root, type_id)
        .shape()
        .expect("object declaration")
        .body
        .children
}
