//! Type-reference nodes.

use irongen_model::TypeId;

use crate::id::IdSlot;
use crate::node::Identifier;

/// Reference to a type of the model, named later by name resolution.
#[derive(Debug, Clone)]
pub struct EdgeType {
    /// Node id.
    pub id: IdSlot,
    /// Referenced type.
    pub type_id: TypeId,
    /// Whether the reference must name an instantiable implementation.
    pub implementation: bool,
    /// Name to print at the use site.
    pub local_name: Option<String>,
    /// Canonical import name, when the use site needs an import.
    pub import_name: Option<String>,
}

impl EdgeType {
    /// Creates an unresolved edge.
    #[must_use]
    pub const fn new(type_id: TypeId) -> Self {
        Self {
            id: IdSlot::new(),
            type_id,
            implementation: false,
            local_name: None,
            import_name: None,
        }
    }

    /// Creates an edge that must name an implementation.
    #[must_use]
    pub const fn implementation(type_id: TypeId) -> Self {
        let mut edge = Self::new(type_id);
        edge.implementation = true;
        edge
    }
}

/// Array of another type.
#[derive(Debug, Clone)]
pub struct ArrayType {
    /// Node id.
    pub id: IdSlot,
    /// The array type in the model.
    pub type_id: TypeId,
    /// Item type.
    pub of: TypeNode,
}

/// Instantiation of a generic type.
///
/// `parameters[i]` is the placeholder that `args[i]` assigns; both lists are kept
/// the same length.
#[derive(Debug, Clone)]
pub struct GenericType {
    /// Node id.
    pub id: IdSlot,
    /// The generic target in the model.
    pub type_id: TypeId,
    /// The generic declaration being instantiated.
    pub base: EdgeType,
    /// Assigned types.
    pub args: Vec<TypeNode>,
    /// Placeholders assigned by `args`.
    pub parameters: Vec<TypeId>,
}

/// Type with bounds, such as a bounded placeholder.
#[derive(Debug, Clone)]
pub struct BoundedType {
    /// Node id.
    pub id: IdSlot,
    /// Bounded type in the model.
    pub type_id: TypeId,
    /// The bounded type.
    pub base: TypeNode,
    /// Lower bound.
    pub lower_bound: Option<TypeNode>,
    /// Upper bound.
    pub upper_bound: Option<TypeNode>,
}

/// Unknown or wildcard type.
#[derive(Debug, Clone)]
pub struct WildcardType {
    /// Node id.
    pub id: IdSlot,
    /// Unknown type in the model.
    pub type_id: TypeId,
    /// Whether the reference must name an instantiable implementation.
    pub implementation: bool,
}

/// Wrapper around another type node carrying the decorating model type.
#[derive(Debug, Clone)]
pub struct DecoratingTypeNode {
    /// Node id.
    pub id: IdSlot,
    /// Decorating type in the model.
    pub type_id: TypeId,
    /// Decorated type node.
    pub of: TypeNode,
}

/// Hint describing what a delegate is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateKind {
    /// Plain callback.
    Normal,
    /// Converts one value into another.
    Converter,
}

/// Callback type, rendered as the target's function type.
#[derive(Debug, Clone)]
pub struct Delegate {
    /// Node id.
    pub id: IdSlot,
    /// Argument types.
    pub parameter_types: Vec<TypeNode>,
    /// Return type.
    pub return_type: TypeNode,
    /// Usage hint.
    pub kind: DelegateKind,
}

/// Any type-reference node.
#[derive(Debug, Clone)]
pub enum TypeNode {
    /// Plain reference.
    Edge(EdgeType),
    /// Array.
    Array(Box<ArrayType>),
    /// Generic instantiation.
    Generic(Box<GenericType>),
    /// Bounded type.
    Bounded(Box<BoundedType>),
    /// Wildcard.
    Wildcard(WildcardType),
    /// Decorated type.
    Decorating(Box<DecoratingTypeNode>),
    /// Callback type.
    Delegate(Box<Delegate>),
}

impl TypeNode {
    /// Model type of the node; delegates have none.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            Self::Edge(n) => Some(n.type_id),
            Self::Array(n) => Some(n.type_id),
            Self::Generic(n) => Some(n.type_id),
            Self::Bounded(n) => Some(n.type_id),
            Self::Wildcard(n) => Some(n.type_id),
            Self::Decorating(n) => Some(n.type_id),
            Self::Delegate(_) => None,
        }
    }

    /// Id slot of the wrapped node.
    #[must_use]
    pub fn id_slot(&self) -> &IdSlot {
        match self {
            Self::Edge(n) => &n.id,
            Self::Array(n) => &n.id,
            Self::Generic(n) => &n.id,
            Self::Bounded(n) => &n.id,
            Self::Wildcard(n) => &n.id,
            Self::Decorating(n) => &n.id,
            Self::Delegate(n) => &n.id,
        }
    }

    /// Returns the edge when this is a plain reference.
    #[must_use]
    pub const fn as_edge(&self) -> Option<&EdgeType> {
        match self {
            Self::Edge(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EdgeType> for TypeNode {
    fn from(value: EdgeType) -> Self {
        Self::Edge(value)
    }
}

/// Ordered list of type nodes.
#[derive(Debug, Clone, Default)]
pub struct TypeList {
    /// Node id.
    pub id: IdSlot,
    /// Types.
    pub children: Vec<TypeNode>,
}

impl TypeList {
    /// Creates a list.
    #[must_use]
    pub fn new(children: Vec<TypeNode>) -> Self {
        Self {
            id: IdSlot::new(),
            children,
        }
    }
}

/// `extends` clause.
#[derive(Debug, Clone)]
pub struct ExtendsDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Extended types.
    pub types: TypeList,
}

impl ExtendsDeclaration {
    /// Creates an extends clause.
    #[must_use]
    pub fn new(types: Vec<TypeNode>) -> Self {
        Self {
            id: IdSlot::new(),
            types: TypeList::new(types),
        }
    }
}

/// `implements` clause.
#[derive(Debug, Clone)]
pub struct ImplementsDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Implemented types.
    pub types: TypeList,
}

impl ImplementsDeclaration {
    /// Creates an implements clause.
    #[must_use]
    pub fn new(types: Vec<TypeNode>) -> Self {
        Self {
            id: IdSlot::new(),
            types: TypeList::new(types),
        }
    }
}

/// Generic parameter of a declaration.
#[derive(Debug, Clone)]
pub struct GenericTypeDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Placeholder in the model.
    pub source_identifier: TypeId,
    /// Placeholder name.
    pub name: Identifier,
    /// Lower bound.
    pub lower_bound: Option<TypeNode>,
    /// Upper bound.
    pub upper_bound: Option<TypeNode>,
}

/// Generic parameters of a declaration.
#[derive(Debug, Clone, Default)]
pub struct GenericTypeDeclarationList {
    /// Node id.
    pub id: IdSlot,
    /// Parameters.
    pub children: Vec<GenericTypeDeclaration>,
}
