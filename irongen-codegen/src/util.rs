//! Tree and model helpers shared by the passes.

use irongen_ast::node::{
    AbstractMethodDeclaration, BinaryExpression, Comment, CommentKind, FieldReference,
    FreeTextNode, Identifier, MethodDeclarationSignature, MethodName, ModifierKind, Node,
    Parameter, SetterIdentifier, Statement, TokenKind,
};
use irongen_ast::{CodeRoot, IdSlot, NameResolver};
use irongen_model::naming::{to_camel_case, to_constant_case};
use irongen_model::{EnumMember, EnumType, TypeDef, TypeId, TypeModel};

use crate::error::Result;

/// Calls `f` for every class, interface and enum declaration, outer before nested.
pub(crate) fn for_each_declaration<'a, F>(nodes: &'a [Node], f: &mut F)
where
    F: FnMut(&'a Node),
{
    for node in nodes {
        match node {
            Node::CompilationUnit(unit) => for_each_declaration(&unit.children, f),
            Node::Namespace(namespace) => for_each_declaration(&namespace.block.block.children, f),
            Node::Nodes(group) => for_each_declaration(&group.children, f),
            _ => {
                if let Some(shape) = node.shape() {
                    f(node);
                    for_each_declaration(&shape.body.children, f);
                }
            }
        }
    }
}

/// Mutable variant of [`for_each_declaration`]. Declarations that `f` adds to a
/// body are visited too.
pub(crate) fn for_each_declaration_mut<F>(nodes: &mut [Node], f: &mut F) -> Result<()>
where
    F: FnMut(&mut Node) -> Result<()>,
{
    for node in nodes {
        match node {
            Node::CompilationUnit(unit) => for_each_declaration_mut(&mut unit.children, f)?,
            Node::Namespace(namespace) => {
                for_each_declaration_mut(&mut namespace.block.block.children, f)?;
            }
            Node::Nodes(group) => for_each_declaration_mut(&mut group.children, f)?,
            _ if node.is_object_declaration() => {
                f(node)?;
                if let Some(shape) = node.shape_mut() {
                    for_each_declaration_mut(&mut shape.body.children, f)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Model types that already have a declaration.
pub(crate) fn declared_types(nodes: &[Node]) -> Vec<TypeId> {
    let mut out = Vec::new();
    for_each_declaration(nodes, &mut |node| {
        if let Some(type_id) = node.shape().and_then(|s| s.type_id()) {
            out.push(type_id);
        }
    });
    out
}

/// Finds the declaration of a model type.
pub(crate) fn find_declaration(nodes: &[Node], type_id: TypeId) -> Option<&Node> {
    let mut found = None;
    for_each_declaration(nodes, &mut |node| {
        if found.is_none() && node.shape().and_then(|s| s.type_id()) == Some(type_id) {
            found = Some(node);
        }
    });
    found
}

/// Type whose declaration stands for `type_id`: generic wrappers and decorations
/// are peeled off.
pub(crate) fn declared_type_of(model: &TypeModel, type_id: TypeId) -> TypeId {
    let mut current = type_id;
    for _ in 0..model.len() {
        current = match model.get(current) {
            TypeDef::Decorating(d) => d.of,
            TypeDef::GenericSource(g) => g.of,
            TypeDef::GenericTarget(g) => g.source,
            _ => return current,
        };
    }
    current
}

/// Id of an equal type, adding it when absent.
pub(crate) fn intern(model: &mut TypeModel, type_def: TypeDef) -> TypeId {
    if let Some((id, _)) = model.iter().find(|(_, t)| **t == type_def) {
        return id;
    }
    model.add(type_def)
}

/// Enum whose items a declaration of `type_id` lists: the enum itself, or the enum an
/// object extends.
pub(crate) fn enum_of(model: &TypeModel, type_id: TypeId) -> Option<&EnumType> {
    match model.get(model.undecorated(type_id)) {
        TypeDef::Enum(e) => Some(e),
        TypeDef::Object(o) => o
            .extended_by
            .and_then(|e| model.get(model.undecorated(e)).as_enum()),
        _ => None,
    }
}

/// Identifier of an enum item, derived from its name or value.
pub(crate) fn enum_item_identifier(resolver: &dyn NameResolver, member: &EnumMember) -> Identifier {
    let original = member
        .name
        .clone()
        .unwrap_or_else(|| member.value.to_string());
    Identifier::with_original(resolver.safe_identifier(&to_constant_case(&original)), original)
}

/// Field or parameter identifier for a property name.
pub(crate) fn member_identifier(resolver: &dyn NameResolver, name: &str) -> Identifier {
    Identifier::with_original(resolver.safe_identifier(&to_camel_case(name)), name)
}

/// Documentation comment built from a description.
pub(crate) fn doc_comment(text: &str) -> Comment {
    Comment::new(FreeTextNode::paragraphs(text), CommentKind::Doc)
}

/// Runs `f` with the children moved out of the root.
///
/// The root handed to `f` has no children, so reference lookups must happen
/// before calling this.
pub(crate) fn with_children<T, F>(root: &mut CodeRoot, f: F) -> Result<T>
where
    F: FnOnce(&CodeRoot, &mut Vec<Node>) -> Result<T>,
{
    let mut children = std::mem::take(root.children_mut());
    let result = f(root, &mut children);
    *root.children_mut() = children;
    result
}

/// Abstract getters, and setters unless read-only, for every visible property of
/// the type behind an interface.
pub(crate) fn interface_members(
    root: &CodeRoot,
    interface_id: TypeId,
    void: TypeId,
    immutable: bool,
    include_comments: bool,
) -> Vec<Node> {
    let model = root.model();
    let resolver = root.name_resolver();
    let mut members = Vec::new();
    for property in model.properties_of(interface_id) {
        if property.hidden {
            continue;
        }
        let identifier = member_identifier(resolver, &property.name);
        let mut getter = MethodDeclarationSignature::new(
            MethodName::getter(identifier.clone(), Some(property.type_id)),
            root.create_type_node(property.type_id, false),
            Vec::new(),
        );
        if include_comments {
            getter.comments = property.description.as_deref().map(doc_comment);
        }
        members.push(abstract_method(getter));

        if property.read_only || immutable {
            continue;
        }
        let setter = MethodDeclarationSignature::new(
            MethodName::Setter(SetterIdentifier {
                id: IdSlot::new(),
                identifier: identifier.clone(),
                type_id: Some(property.type_id),
            }),
            root.create_type_node(void, false),
            vec![Parameter::new(
                root.create_type_node(property.type_id, false),
                identifier,
            )],
        );
        members.push(abstract_method(setter));
    }
    members
}

/// Wraps a signature into a bodiless method.
pub(crate) fn abstract_method(signature: MethodDeclarationSignature) -> Node {
    AbstractMethodDeclaration {
        id: IdSlot::new(),
        signature,
    }
    .into()
}

/// `target = value;`
pub(crate) fn assign(target: Node, value: Node) -> Node {
    Statement::new(BinaryExpression::new(target, TokenKind::Assign, value).into()).into()
}

/// Field references held by the getters and setters of a body.
pub(crate) fn accessor_targets(children: &[Node]) -> (Vec<&FieldReference>, Vec<&FieldReference>) {
    let mut getters = Vec::new();
    let mut setters = Vec::new();
    for child in children {
        match child {
            Node::FieldBackedGetter(g) => getters.push(&g.field_ref),
            Node::FieldBackedSetter(s) => setters.push(&s.field_ref),
            _ => {}
        }
    }
    (getters, setters)
}

/// Returns true if the modifier list of a member holds `static`.
pub(crate) fn is_static(node: &Node) -> bool {
    match node {
        Node::Field(f) => f.modifiers.has(ModifierKind::Static),
        Node::MethodDeclaration(m) => m.signature.modifiers.has(ModifierKind::Static),
        _ => node
            .shape()
            .is_some_and(|s| s.modifiers.has(ModifierKind::Static)),
    }
}
