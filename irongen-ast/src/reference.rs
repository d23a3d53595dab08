//! Id-based reference resolution.
//!
//! References hold only the id of their target. The [`ReferenceIndex`] maps those
//! ids to snapshots of the target nodes for one tree generation; it is built by a
//! pruned scan that only descends where targets or references can live.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::ops::ControlFlow;

use tracing::warn;

use crate::error::{AstError, Result};
use crate::id::{IdSlot, NodeId};
use crate::node::*;
use crate::visit::{self, Visitor};

/// Snapshot of a node that references can point at.
#[derive(Debug, Clone)]
pub enum ReferenceTarget {
    /// Field.
    Field(Field),
    /// Method parameter.
    Parameter(Parameter),
    /// Constructor parameter.
    ConstructorParameter(ConstructorParameter),
    /// Local variable.
    VariableDeclaration(VariableDeclaration),
    /// Delegate type.
    Delegate(Delegate),
}

impl ReferenceTarget {
    /// Name of the target; delegates have none.
    #[must_use]
    pub const fn identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Field(n) => Some(&n.identifier),
            Self::Parameter(n) => Some(&n.identifier),
            Self::ConstructorParameter(n) => Some(&n.identifier),
            Self::VariableDeclaration(n) => Some(&n.identifier),
            Self::Delegate(_) => None,
        }
    }

    /// Declared type of the target.
    #[must_use]
    pub fn type_node(&self) -> Option<&TypeNode> {
        match self {
            Self::Field(n) => n.type_node(),
            Self::Parameter(n) => n.type_node(),
            Self::ConstructorParameter(n) => n.type_node(),
            Self::VariableDeclaration(n) => n.type_node(),
            Self::Delegate(_) => None,
        }
    }

    /// Borrows the target as a field.
    #[must_use]
    pub const fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }

    /// Borrows the target as a delegate.
    #[must_use]
    pub const fn as_delegate(&self) -> Option<&Delegate> {
        match self {
            Self::Delegate(d) => Some(d),
            _ => None,
        }
    }

    const fn kind_name(&self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Parameter(_) => "parameter",
            Self::ConstructorParameter(_) => "constructor parameter",
            Self::VariableDeclaration(_) => "variable",
            Self::Delegate(_) => "delegate",
        }
    }
}

/// Map from target id to target snapshot for one tree generation.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    targets: HashMap<NodeId, ReferenceTarget>,
}

impl ReferenceIndex {
    /// Scans a forest and keeps every target that some reference points at.
    #[must_use]
    pub fn build(nodes: &[Node]) -> Self {
        let mut indexer = ReferenceIndexer::default();
        let _ = visit::visit_all(&mut indexer, nodes);

        let ReferenceIndexer {
            mut targets,
            referenced,
        } = indexer;
        targets.retain(|id, _| referenced.contains(id));
        Self { targets }
    }

    /// Resolves a target id.
    ///
    /// # Errors
    /// Returns `AstError::ReferenceNodeNotFound` if no indexed node has the id.
    pub fn resolve(&self, id: NodeId) -> Result<&ReferenceTarget> {
        self.targets
            .get(&id)
            .ok_or(AstError::ReferenceNodeNotFound { id })
    }

    /// Resolves a target id that must name a field.
    ///
    /// # Errors
    /// Returns `AstError::ReferenceNodeNotFound` for unknown ids and
    /// `AstError::UnexpectedShape` when the target is not a field.
    pub fn resolve_field(&self, id: NodeId) -> Result<&Field> {
        let target = self.resolve(id)?;
        target
            .as_field()
            .ok_or_else(|| AstError::unexpected("field", target.kind_name()))
    }

    /// Number of indexed targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Returns true if the id is indexed.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.targets.contains_key(&id)
    }
}

#[derive(Default)]
struct ReferenceIndexer {
    targets: HashMap<NodeId, ReferenceTarget>,
    referenced: HashSet<NodeId>,
}

impl ReferenceIndexer {
    // Targets without an id were never handed out, so nothing can point at them.
    fn record(&mut self, slot: &IdSlot, target: impl FnOnce() -> ReferenceTarget) {
        let Some(id) = slot.get() else {
            return;
        };
        let target = target();
        if let Some(previous) = self.targets.insert(id, target) {
            warn!(
                %id,
                kind = previous.kind_name(),
                "node id indexed twice; later node wins"
            );
        }
    }

    fn reference(&mut self, target_id: NodeId) -> ControlFlow<Infallible> {
        self.referenced.insert(target_id);
        ControlFlow::Continue(())
    }
}

impl Visitor for ReferenceIndexer {
    type Break = Infallible;

    fn visit_field(&mut self, node: &Field) -> ControlFlow<Infallible> {
        self.record(&node.id, || ReferenceTarget::Field(node.clone()));
        visit::visit_field(self, node)
    }

    fn visit_parameter(&mut self, node: &Parameter) -> ControlFlow<Infallible> {
        self.record(&node.id, || ReferenceTarget::Parameter(node.clone()));
        visit::visit_parameter(self, node)
    }

    fn visit_constructor_parameter(
        &mut self,
        node: &ConstructorParameter,
    ) -> ControlFlow<Infallible> {
        self.record(&node.id, || ReferenceTarget::ConstructorParameter(node.clone()));
        visit::visit_constructor_parameter(self, node)
    }

    fn visit_variable_declaration(
        &mut self,
        node: &VariableDeclaration,
    ) -> ControlFlow<Infallible> {
        self.record(&node.id, || ReferenceTarget::VariableDeclaration(node.clone()));
        visit::visit_variable_declaration(self, node)
    }

    fn visit_delegate(&mut self, node: &Delegate) -> ControlFlow<Infallible> {
        self.record(&node.id, || ReferenceTarget::Delegate(node.clone()));
        visit::visit_delegate(self, node)
    }

    fn visit_field_reference(&mut self, node: &FieldReference) -> ControlFlow<Infallible> {
        self.reference(node.target_id)
    }

    fn visit_declaration_reference(
        &mut self,
        node: &DeclarationReference,
    ) -> ControlFlow<Infallible> {
        self.reference(node.target_id)
    }

    fn visit_generic_ref(&mut self, node: &GenericRef) -> ControlFlow<Infallible> {
        self.reference(node.target_id)
    }

    fn visit_import_list(&mut self, _: &ImportList) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_extends_declaration(&mut self, _: &ExtendsDeclaration) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_implements_declaration(
        &mut self,
        _: &ImplementsDeclaration,
    ) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_type_list(&mut self, _: &TypeList) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_array_initializer(&mut self, _: &ArrayInitializer) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_edge_type(&mut self, _: &EdgeType) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_generic_type(&mut self, _: &GenericType) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_bounded_type(&mut self, _: &BoundedType) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_wildcard_type(&mut self, _: &WildcardType) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_comment(&mut self, _: &Comment) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }

    fn visit_modifier_list(&mut self, _: &ModifierList) -> ControlFlow<Infallible> {
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use irongen_model::{PrimitiveKind, PrimitiveType, TypeModel};

    fn string_field(model: &mut TypeModel, name: &str) -> Field {
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        Field::new(EdgeType::new(string).into(), Identifier::new(name))
    }

    #[test]
    fn test_resolves_referenced_field() {
        let ids = IdGenerator::new();
        let mut model = TypeModel::new("m");
        let field = string_field(&mut model, "name");
        let field_id = ids.id_of(&field.id);
        let getter = FieldBackedGetter::new(FieldReference::new(field_id));

        let block: Node = Block::new(vec![field.into(), getter.into()]).into();
        let index = ReferenceIndex::build(std::slice::from_ref(&block));

        let resolved = index.resolve_field(field_id).expect("field resolves");
        assert_eq!(resolved.identifier.value, "name");
    }

    #[test]
    fn test_unreferenced_targets_are_dropped() {
        let ids = IdGenerator::new();
        let mut model = TypeModel::new("m");
        let field = string_field(&mut model, "unused");
        let field_id = ids.id_of(&field.id);

        let block: Node = Block::new(vec![field.into()]).into();
        let index = ReferenceIndex::build(std::slice::from_ref(&block));

        assert!(index.is_empty());
        let err = index.resolve(field_id).expect_err("unreferenced target");
        assert!(matches!(err, AstError::ReferenceNodeNotFound { id } if id == field_id));
    }

    #[test]
    fn test_dangling_reference_is_not_found() {
        let ids = IdGenerator::new();
        let dangling = ids.next_id();
        let getter = FieldBackedGetter::new(FieldReference::new(dangling));
        let block: Node = Block::new(vec![getter.into()]).into();
        let index = ReferenceIndex::build(std::slice::from_ref(&block));

        assert!(matches!(
            index.resolve(dangling),
            Err(AstError::ReferenceNodeNotFound { .. })
        ));
    }

    #[test]
    fn test_resolves_field_of_class_nested_in_interface() {
        let ids = IdGenerator::new();
        let mut model = TypeModel::new("m");
        let field = string_field(&mut model, "label");
        let field_id = ids.id_of(&field.id);
        let getter = FieldBackedGetter::new(FieldReference::new(field_id));
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));

        let mut inner =
            DeclarationShape::new(Identifier::new("Inner"), EdgeType::new(string).into());
        inner.body.children = vec![field.into(), getter.into()];
        let class = Node::ClassDeclaration(Box::new(ClassDeclaration {
            id: IdSlot::new(),
            shape: inner,
        }));
        let mut outer =
            DeclarationShape::new(Identifier::new("Outer"), EdgeType::new(string).into());
        outer.body.children = vec![class];
        let interface = Node::InterfaceDeclaration(Box::new(InterfaceDeclaration {
            id: IdSlot::new(),
            shape: outer,
        }));

        let index = ReferenceIndex::build(std::slice::from_ref(&interface));

        let resolved = index.resolve_field(field_id).expect("nested field resolves");
        assert_eq!(resolved.identifier.value, "label");
    }

    #[test]
    fn test_parameter_is_not_a_field() {
        let ids = IdGenerator::new();
        let mut model = TypeModel::new("m");
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        let parameter = Parameter::new(EdgeType::new(string).into(), Identifier::new("value"));
        let parameter_id = ids.id_of(&parameter.id);

        let method = MethodDeclaration::new(
            MethodDeclarationSignature::new(
                method_name("echo"),
                EdgeType::new(string).into(),
                vec![parameter],
            ),
            Block::new(vec![
                ReturnStatement::new(DeclarationReference::new(parameter_id).into()).into(),
            ]),
        );
        let node: Node = method.into();
        let index = ReferenceIndex::build(std::slice::from_ref(&node));

        assert!(index.resolve(parameter_id).is_ok());
        assert!(matches!(
            index.resolve_field(parameter_id),
            Err(AstError::UnexpectedShape { .. })
        ));
    }
}
