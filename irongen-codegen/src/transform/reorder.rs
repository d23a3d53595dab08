//! Weighted member ordering.

use std::cmp::Reverse;
use std::collections::HashMap;

use irongen_ast::node::{ModifierKind, ModifierList, Node};
use irongen_ast::{CodeRoot, NodeId};
use tracing::trace;

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

const ENUM_ITEMS: i32 = 400;
const FIELD: i32 = 300;
const CONSTRUCTOR: i32 = 200;
const METHOD: i32 = 100;

/// Sorts members by category: enum items, fields, constructors, methods, then
/// nested declarations. Getters and setters sort with the field they wrap.
/// Ties are broken by name, and the sort is stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReorderMembers;

impl Transformer for ReorderMembers {
    fn name(&self) -> &'static str {
        "ReorderMembers"
    }

    fn transform(&self, root: &mut CodeRoot, _options: &CodeOptions) -> Result<()> {
        util::with_children(root, |root, children| {
            for node in children.iter_mut() {
                if let Node::CompilationUnit(unit) = node {
                    sort_members(root, &mut unit.children);
                }
            }
            util::for_each_declaration_mut(children, &mut |node| {
                if let Some(shape) = node.shape_mut() {
                    trace!(declaration = %shape.name.value, "reordering");
                    sort_members(root, &mut shape.body.children);
                }
                Ok(())
            })
        })
    }
}

fn modifier_weight(modifiers: &ModifierList) -> i32 {
    let mut weight = 0;
    if modifiers.has(ModifierKind::Static) {
        weight += 10;
    }
    if modifiers.has(ModifierKind::Final) {
        weight += 5;
    }
    if modifiers.has(ModifierKind::Private) {
        weight += 3;
    }
    if modifiers.has(ModifierKind::Protected) {
        weight += 1;
    }
    weight
}

fn sort_members(root: &CodeRoot, members: &mut [Node]) {
    if members.len() < 2 {
        return;
    }
    let fields: HashMap<NodeId, (i32, String)> = members
        .iter()
        .filter_map(|node| match node {
            Node::Field(field) => Some((
                root.id_of(&**field),
                (FIELD + modifier_weight(&field.modifiers), field.identifier.value.clone()),
            )),
            _ => None,
        })
        .collect();

    members.sort_by_cached_key(|node| {
        let (weight, name) = weight_of(node, &fields);
        (Reverse(weight), name)
    });
}

/// Sort weight and name of a member.
fn weight_of(node: &Node, fields: &HashMap<NodeId, (i32, String)>) -> (i32, String) {
    match node {
        Node::EnumItemList(_) => (ENUM_ITEMS, String::new()),
        Node::Field(field) => (
            FIELD + modifier_weight(&field.modifiers),
            field.identifier.value.clone(),
        ),
        Node::ConstructorDeclaration(_) => (CONSTRUCTOR, String::new()),
        Node::MethodDeclaration(method) => (
            METHOD - modifier_weight(&method.signature.modifiers),
            method.signature.identifier.identifier().value.clone(),
        ),
        Node::AbstractMethodDeclaration(method) => (
            METHOD - modifier_weight(&method.signature.modifiers),
            method.signature.identifier.identifier().value.clone(),
        ),
        Node::FieldBackedGetter(getter) => {
            let (weight, name) = fields
                .get(&getter.field_ref.target_id)
                .cloned()
                .unwrap_or_default();
            let name = getter.getter_name.as_ref().map_or(name, |n| n.value.clone());
            (weight, name)
        }
        Node::FieldBackedSetter(setter) => {
            let (weight, name) = fields
                .get(&setter.field_ref.target_id)
                .cloned()
                .unwrap_or_default();
            let name = setter.identifier.as_ref().map_or(name, |n| n.value.clone());
            (weight, name)
        }
        other => match other.shape() {
            Some(shape) => (modifier_weight(&shape.modifiers), shape.name.value.clone()),
            None => (0, String::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{
        AddAccessors, AddConstructors, AddFields, AddObjectDeclarations, InnerTypeCompression,
    };
    use irongen_model::{ObjectType, Property, TypeDef};

    fn kinds(members: &[Node]) -> Vec<&'static str> {
        members.iter().map(Node::kind_name).collect()
    }

    #[test]
    fn test_fields_before_constructor_before_methods() {
        let (model, person) = fixtures::person_model();
        let mut root = fixtures::run_passes(
            model,
            &CodeOptions::default(),
            Pipeline::new()
                .add_pass(AddObjectDeclarations)
                .add_pass(AddFields)
                .add_pass(AddAccessors)
                .add_pass(AddConstructors),
        );
        // Scramble the body so the sort has something to do.
        util::for_each_declaration_mut(root.children_mut(), &mut |node| {
            if let Some(shape) = node.shape_mut() {
                shape.body.children.reverse();
            }
            Ok(())
        })
        .expect("scramble");

        ReorderMembers
            .transform(&mut root, &CodeOptions::default())
            .expect("reorder");

        let members = fixtures::members(&root, person);
        let kinds = kinds(members);
        let constructor = kinds
            .iter()
            .position(|k| *k == "constructor")
            .expect("constructor");
        assert!(kinds[..constructor]
            .iter()
            .all(|k| matches!(*k, "field" | "getter" | "setter")));
        let names: Vec<&str> = members
            .iter()
            .filter_map(Node::as_field)
            .map(|f| f.identifier.value.as_str())
            .collect();
        assert_eq!(names, vec!["name", "nickname"]);
    }

    #[test]
    fn test_getters_follow_their_field() {
        let (model, person) = fixtures::person_model();
        let root = fixtures::run_passes(
            model,
            &CodeOptions::default(),
            Pipeline::new()
                .add_pass(AddObjectDeclarations)
                .add_pass(AddFields)
                .add_pass(AddAccessors)
                .add_pass(ReorderMembers),
        );
        let kinds = kinds(fixtures::members(&root, person));
        assert_eq!(kinds[0], "field");
        assert_eq!(kinds[1], "getter");
    }

    #[test]
    fn test_nested_declarations_go_last() {
        let (mut model, _, dog, _) = fixtures::animal_model();
        let kennel = model.add_exported(TypeDef::Object(
            ObjectType::new("Kennel")
                .in_namespace("com.zoo")
                .with_property(Property::new("dog", dog)),
        ));
        let options = CodeOptions::builder()
            .compress_solo_referenced_types(true)
            .build();
        let root = fixtures::run_passes(
            model,
            &options,
            Pipeline::new()
                .add_pass(AddObjectDeclarations)
                .add_pass(AddFields)
                .add_pass(InnerTypeCompression)
                .add_pass(ReorderMembers),
        );
        let members = fixtures::members(&root, kennel);
        assert_eq!(kinds(members), vec!["field", "class declaration"]);
    }

    #[test]
    fn test_modifier_weights() {
        let mut modifiers = ModifierList::of(&[ModifierKind::Private]);
        assert_eq!(modifier_weight(&modifiers), 3);
        modifiers.add(ModifierKind::Static);
        modifiers.add(ModifierKind::Final);
        assert_eq!(modifier_weight(&modifiers), 18);
        assert_eq!(modifier_weight(&ModifierList::of(&[ModifierKind::Protected])), 1);
    }
}
