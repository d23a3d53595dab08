//! Tree root holding one generation's nodes, type model and strategies.

use std::cell::OnceCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use irongen_model::{TypeId, TypeModel};
use tracing::debug;

use crate::error::Result;
use crate::id::{IdGenerator, NodeId};
use crate::node::{Field, Identified, Node, TypeNode};
use crate::reduce::{self, Reducer};
use crate::reference::{ReferenceIndex, ReferenceTarget};
use crate::strategy::{
    DefaultTypeNodeFactory, DottedNameResolver, NameResolver, SingleInheritanceResolver,
    SupertypeResolver, TypeNodeFactory,
};
use crate::visit::{self, Visitor};

/// Builder for configuring and creating a [`CodeRoot`].
pub struct CodeRootBuilder {
    model: TypeModel,
    children: Vec<Node>,
    ids: Option<Rc<IdGenerator>>,
    type_factory: Box<dyn TypeNodeFactory>,
    name_resolver: Box<dyn NameResolver>,
    supertype_resolver: Box<dyn SupertypeResolver>,
    externals: Vec<Rc<CodeRoot>>,
}

impl CodeRootBuilder {
    /// Creates a builder with the default strategies.
    #[must_use]
    pub fn new(model: TypeModel) -> Self {
        Self {
            model,
            children: Vec::new(),
            ids: None,
            type_factory: Box::new(DefaultTypeNodeFactory),
            name_resolver: Box::new(DottedNameResolver),
            supertype_resolver: Box::new(SingleInheritanceResolver),
            externals: Vec::new(),
        }
    }

    /// Sets the initial top-level nodes.
    #[must_use]
    pub fn children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Shares an id generator, typically with the roots this one links to.
    #[must_use]
    pub fn ids(mut self, ids: Rc<IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Sets the type node factory.
    #[must_use]
    pub fn type_factory(mut self, factory: impl TypeNodeFactory + 'static) -> Self {
        self.type_factory = Box::new(factory);
        self
    }

    /// Sets the name resolver.
    #[must_use]
    pub fn name_resolver(mut self, resolver: impl NameResolver + 'static) -> Self {
        self.name_resolver = Box::new(resolver);
        self
    }

    /// Sets the supertype resolver.
    #[must_use]
    pub fn supertype_resolver(mut self, resolver: impl SupertypeResolver + 'static) -> Self {
        self.supertype_resolver = Box::new(resolver);
        self
    }

    /// Adds a finished root whose declarations can be referenced by name.
    #[must_use]
    pub fn external(mut self, root: Rc<CodeRoot>) -> Self {
        self.externals.push(root);
        self
    }

    /// Builds the root.
    #[must_use]
    pub fn build(self) -> CodeRoot {
        CodeRoot {
            children: self.children,
            model: self.model,
            ids: self.ids.unwrap_or_default(),
            references: OnceCell::new(),
            type_factory: self.type_factory,
            name_resolver: self.name_resolver,
            supertype_resolver: self.supertype_resolver,
            externals: self.externals,
        }
    }
}

/// One generation of the tree.
///
/// The reference index is built on first use and dropped whenever the children
/// may have changed, so it never outlives the nodes it describes.
pub struct CodeRoot {
    children: Vec<Node>,
    model: TypeModel,
    ids: Rc<IdGenerator>,
    references: OnceCell<ReferenceIndex>,
    type_factory: Box<dyn TypeNodeFactory>,
    name_resolver: Box<dyn NameResolver>,
    supertype_resolver: Box<dyn SupertypeResolver>,
    externals: Vec<Rc<CodeRoot>>,
}

impl std::fmt::Debug for CodeRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeRoot")
            .field("model", &self.model.name)
            .field("children", &self.children.len())
            .field("externals", &self.externals.len())
            .finish_non_exhaustive()
    }
}

impl CodeRoot {
    /// Creates a root with default strategies and no children.
    #[must_use]
    pub fn new(model: TypeModel) -> Self {
        CodeRootBuilder::new(model).build()
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder(model: TypeModel) -> CodeRootBuilder {
        CodeRootBuilder::new(model)
    }

    /// Top-level nodes.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable top-level nodes. Drops the reference index.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        self.invalidate_references();
        &mut self.children
    }

    /// Appends a top-level node.
    pub fn push_child(&mut self, node: Node) {
        self.children_mut().push(node);
    }

    /// Type model being lowered.
    #[must_use]
    pub fn model(&self) -> &TypeModel {
        &self.model
    }

    /// Mutable type model.
    pub fn model_mut(&mut self) -> &mut TypeModel {
        &mut self.model
    }

    /// Id generator of this generation.
    #[must_use]
    pub fn ids(&self) -> &Rc<IdGenerator> {
        &self.ids
    }

    /// Id of a node, assigned on first access.
    pub fn id_of(&self, node: &impl Identified) -> NodeId {
        self.ids.id_of(node.id_slot())
    }

    /// Roots whose declarations this one may reference.
    #[must_use]
    pub fn externals(&self) -> &[Rc<CodeRoot>] {
        &self.externals
    }

    /// Name resolution strategy.
    #[must_use]
    pub fn name_resolver(&self) -> &dyn NameResolver {
        self.name_resolver.as_ref()
    }

    /// Supertype strategy.
    #[must_use]
    pub fn supertype_resolver(&self) -> &dyn SupertypeResolver {
        self.supertype_resolver.as_ref()
    }

    /// Creates a type node for a model type.
    #[must_use]
    pub fn create_type_node(&self, type_id: TypeId, implementation: bool) -> TypeNode {
        self.type_factory.create(&self.model, type_id, implementation)
    }

    /// Reference index of the current children.
    pub fn references(&self) -> &ReferenceIndex {
        self.references.get_or_init(|| {
            let index = ReferenceIndex::build(&self.children);
            debug!(targets = index.len(), "built reference index");
            index
        })
    }

    /// Resolves a reference target.
    ///
    /// # Errors
    /// Returns `AstError::ReferenceNodeNotFound` if nothing in this generation
    /// carries the id.
    pub fn resolve(&self, id: NodeId) -> Result<&ReferenceTarget> {
        self.references().resolve(id)
    }

    /// Resolves a reference target that must be a field.
    ///
    /// # Errors
    /// Returns `AstError::ReferenceNodeNotFound` for unknown ids and
    /// `AstError::UnexpectedShape` for targets that are not fields.
    pub fn resolve_field(&self, id: NodeId) -> Result<&Field> {
        self.references().resolve_field(id)
    }

    /// Drops the reference index so the next lookup rebuilds it.
    pub fn invalidate_references(&mut self) {
        self.references.take();
    }

    /// Runs a visitor over the children.
    pub fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visit::visit_all(visitor, &self.children)
    }

    /// Rewrites the children with a reducer.
    ///
    /// # Errors
    /// Returns the first error raised by the reducer; the children are left empty.
    pub fn reduce<R: Reducer>(&mut self, reducer: &mut R) -> Result<()> {
        let children = std::mem::take(self.children_mut());
        let before = children.len();
        self.children = reduce::reduce_all(reducer, children)?;
        debug!(before, after = self.children.len(), "reduced top-level nodes");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AstError;
    use crate::node::{
        Block, EdgeType, FieldBackedGetter, FieldReference, Identifier, Nodes,
    };
    use irongen_model::{PrimitiveKind, PrimitiveType};

    fn root_with_getter() -> (CodeRoot, NodeId) {
        let mut model = TypeModel::new("m");
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        let mut root = CodeRoot::new(model);
        let field = Field::new(EdgeType::new(string).into(), Identifier::new("name"));
        let field_id = root.id_of(&field);
        root.push_child(
            Block::new(vec![
                field.into(),
                FieldBackedGetter::new(FieldReference::new(field_id)).into(),
            ])
            .into(),
        );
        (root, field_id)
    }

    struct DropFields;

    impl Reducer for DropFields {
        fn reduce_node(&mut self, node: Node) -> reduce::Reduced<Node> {
            if matches!(node, Node::Field(_)) {
                return Ok(None);
            }
            reduce::reduce_node(self, node)
        }
    }

    #[test]
    fn test_id_survives_rebuild() {
        let (mut root, field_id) = root_with_getter();
        root.reduce(&mut reduce_identity()).expect("identity reduce");

        let field = root.resolve_field(field_id).expect("field still resolves");
        assert_eq!(field.identifier.value, "name");
    }

    #[test]
    fn test_dropped_target_is_not_found() {
        let (mut root, field_id) = root_with_getter();
        assert!(root.resolve(field_id).is_ok());

        root.reduce(&mut DropFields).expect("drop fields");
        assert!(matches!(
            root.resolve(field_id),
            Err(AstError::ReferenceNodeNotFound { id }) if id == field_id
        ));
    }

    #[test]
    fn test_mutable_access_drops_stale_index() {
        let (mut root, field_id) = root_with_getter();
        assert!(root.resolve(field_id).is_ok());

        root.children_mut().clear();
        assert!(root.references().is_empty());
        assert!(root.resolve(field_id).is_err());
    }

    #[test]
    fn test_builder_shares_id_generator() {
        let ids = Rc::new(IdGenerator::new());
        let first = CodeRoot::builder(TypeModel::new("a"))
            .ids(Rc::clone(&ids))
            .build();
        let second = CodeRoot::builder(TypeModel::new("b"))
            .ids(Rc::clone(&ids))
            .external(Rc::new(first))
            .build();

        let a = second.id_of(&Nodes::default());
        let b = ids.next_id();
        assert!(b > a);
        assert_eq!(second.externals().len(), 1);
    }

    fn reduce_identity() -> impl Reducer {
        struct Identity;
        impl Reducer for Identity {}
        Identity
    }
}
