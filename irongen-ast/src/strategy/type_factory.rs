use irongen_model::{TypeDef, TypeId, TypeModel};

use crate::id::IdSlot;
use crate::node::{ArrayType, DecoratingTypeNode, EdgeType, GenericType, TypeNode, WildcardType};

/// Turns model types into type-reference nodes.
pub trait TypeNodeFactory {
    /// Creates the type node for `type_id`.
    ///
    /// `implementation` asks for a reference that names an instantiable type, as
    /// needed after `new`.
    fn create(&self, model: &TypeModel, type_id: TypeId, implementation: bool) -> TypeNode;
}

/// Factory producing the canonical node shape for each model kind.
///
/// Dictionaries become a generic instantiation of themselves over key and value; negations
/// cannot be named and fall back to a wildcard. Kinds without a dedicated node become a
/// plain [`EdgeType`] reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeNodeFactory;

impl TypeNodeFactory for DefaultTypeNodeFactory {
    fn create(&self, model: &TypeModel, type_id: TypeId, implementation: bool) -> TypeNode {
        match model.get(type_id) {
            TypeDef::Array(array) => TypeNode::Array(Box::new(ArrayType {
                id: IdSlot::new(),
                type_id,
                of: self.create(model, array.of, false),
            })),
            TypeDef::GenericTarget(target) => match model.get(target.source) {
                TypeDef::GenericSource(source) => TypeNode::Generic(Box::new(GenericType {
                    id: IdSlot::new(),
                    type_id,
                    base: EdgeType {
                        implementation,
                        ..EdgeType::new(source.of)
                    },
                    args: target
                        .target_identifiers
                        .iter()
                        .map(|t| self.create(model, t.type_id, false))
                        .collect(),
                    parameters: target
                        .target_identifiers
                        .iter()
                        .map(|t| t.source_identifier)
                        .collect(),
                })),
                _ => TypeNode::Edge(EdgeType {
                    implementation,
                    ..EdgeType::new(type_id)
                }),
            },
            TypeDef::Dictionary(dictionary) => TypeNode::Generic(Box::new(GenericType {
                id: IdSlot::new(),
                type_id,
                base: EdgeType {
                    implementation,
                    ..EdgeType::new(type_id)
                },
                args: vec![
                    self.create(model, dictionary.key, false),
                    self.create(model, dictionary.value, false),
                ],
                parameters: Vec::new(),
            })),
            TypeDef::Unknown(_) | TypeDef::Negation(_) => TypeNode::Wildcard(WildcardType {
                id: IdSlot::new(),
                type_id,
                implementation,
            }),
            TypeDef::Decorating(decorating) => TypeNode::Decorating(Box::new(DecoratingTypeNode {
                id: IdSlot::new(),
                type_id,
                of: self.create(model, decorating.of, implementation),
            })),
            _ => TypeNode::Edge(EdgeType {
                implementation,
                ..EdgeType::new(type_id)
            }),
        }
    }
}
