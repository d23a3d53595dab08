//! Bottom-up tree rewriting.
//!
//! [`Reducer`] mirrors [`crate::visit::Visitor`] but takes nodes by value and
//! returns a rebuilt node, or `None` to delete it from its parent. Default methods
//! forward to the free function of the same name, which reduces every child first,
//! drops the children that were deleted, and rebuilds the node from the survivors.
//! Rebuilt nodes keep the id slot of the node they replace, so references stay
//! valid across a rewrite.
//!
//! Collapse rules applied by the defaults:
//! - a node whose required child is deleted is deleted too
//! - a compilation unit without children is deleted
//! - an enum declaration that loses all of its item lists is deleted
//! - empty namespace blocks, node groups, generic parameter lists, extends and
//!   implements clauses, free-text sequences and enum item lists are deleted
//! - a generic instantiation without arguments becomes its base type
//! - a block is never deleted by the defaults; it is kept, possibly empty

use crate::error::{AstError, Result};
use crate::node::*;

/// Outcome of reducing one node.
pub type Reduced<T> = Result<Option<T>>;

macro_rules! required {
    ($e:expr) => {
        match $e? {
            Some(value) => value,
            None => return Ok(None),
        }
    };
}

macro_rules! reduce_methods {
    ($($method:ident: $ty:ty => $out:ty;)*) => {
        $(
            #[doc = concat!("Reduces a `", stringify!($ty), "`.")]
            fn $method(&mut self, node: $ty) -> Reduced<$out> {
                $method(self, node)
            }
        )*
    };
}

/// Rewriting traversal over the AST.
pub trait Reducer: Sized {
    /// Dispatches a heterogeneous node. Override to replace a node with another kind.
    fn reduce_node(&mut self, node: Node) -> Reduced<Node> {
        reduce_node(self, node)
    }

    /// Dispatches a type-reference node.
    fn reduce_type_node(&mut self, node: TypeNode) -> Reduced<TypeNode> {
        reduce_type_node(self, node)
    }

    /// Dispatches a documentation text node.
    fn reduce_free_text(&mut self, node: FreeTextNode) -> Reduced<FreeTextNode> {
        reduce_free_text(self, node)
    }

    /// Dispatches a method name.
    fn reduce_method_name(&mut self, node: MethodName) -> Reduced<MethodName> {
        reduce_method_name(self, node)
    }

    /// Reduces the parts shared by class, interface and enum declarations.
    fn reduce_declaration_shape(&mut self, node: DeclarationShape) -> Reduced<DeclarationShape> {
        reduce_declaration_shape(self, node)
    }

    reduce_methods! {
        reduce_identifier: Identifier => Identifier;
        reduce_getter_identifier: GetterIdentifier => GetterIdentifier;
        reduce_setter_identifier: SetterIdentifier => SetterIdentifier;
        reduce_modifier: Modifier => Modifier;
        reduce_modifier_list: ModifierList => ModifierList;
        reduce_comment: Comment => Comment;
        reduce_package_declaration: PackageDeclaration => PackageDeclaration;
        reduce_import_statement: ImportStatement => ImportStatement;
        reduce_import_list: ImportList => ImportList;
        reduce_compilation_unit: CompilationUnit => CompilationUnit;
        reduce_class_declaration: ClassDeclaration => ClassDeclaration;
        reduce_interface_declaration: InterfaceDeclaration => InterfaceDeclaration;
        reduce_enum_declaration: EnumDeclaration => EnumDeclaration;
        reduce_field: Field => Field;
        reduce_parameter: Parameter => Parameter;
        reduce_parameter_list: ParameterList => ParameterList;
        reduce_constructor_parameter: ConstructorParameter => ConstructorParameter;
        reduce_constructor_parameter_list: ConstructorParameterList => ConstructorParameterList;
        reduce_constructor_declaration: ConstructorDeclaration => ConstructorDeclaration;
        reduce_method_declaration_signature:
            MethodDeclarationSignature => MethodDeclarationSignature;
        reduce_method_declaration: MethodDeclaration => MethodDeclaration;
        reduce_abstract_method_declaration: AbstractMethodDeclaration => AbstractMethodDeclaration;
        reduce_field_backed_getter: FieldBackedGetter => FieldBackedGetter;
        reduce_field_backed_setter: FieldBackedSetter => FieldBackedSetter;
        reduce_enum_item: EnumItem => EnumItem;
        reduce_enum_item_list: EnumItemList => EnumItemList;
        reduce_block: Block => Block;
        reduce_namespace_block: NamespaceBlock => NamespaceBlock;
        reduce_namespace: Namespace => Namespace;
        reduce_variable_declaration: VariableDeclaration => VariableDeclaration;
        reduce_edge_type: EdgeType => TypeNode;
        reduce_array_type: ArrayType => TypeNode;
        reduce_generic_type: GenericType => TypeNode;
        reduce_bounded_type: BoundedType => TypeNode;
        reduce_wildcard_type: WildcardType => TypeNode;
        reduce_decorating_type_node: DecoratingTypeNode => TypeNode;
        reduce_delegate: Delegate => TypeNode;
        reduce_type_list: TypeList => TypeList;
        reduce_extends_declaration: ExtendsDeclaration => ExtendsDeclaration;
        reduce_implements_declaration: ImplementsDeclaration => ImplementsDeclaration;
        reduce_generic_type_declaration: GenericTypeDeclaration => GenericTypeDeclaration;
        reduce_generic_type_declaration_list:
            GenericTypeDeclarationList => GenericTypeDeclarationList;
        reduce_statement: Statement => Statement;
        reduce_return_statement: ReturnStatement => ReturnStatement;
        reduce_throw_statement: ThrowStatement => ThrowStatement;
        reduce_if_statement: IfStatement => IfStatement;
        reduce_if_else_statement: IfElseStatement => IfElseStatement;
        reduce_ternary_expression: TernaryExpression => TernaryExpression;
        reduce_binary_expression: BinaryExpression => BinaryExpression;
        reduce_argument_list: ArgumentList => ArgumentList;
        reduce_method_call: MethodCall => MethodCall;
        reduce_member_access: MemberAccess => MemberAccess;
        reduce_index_access: IndexAccess => IndexAccess;
        reduce_cast: Cast => Cast;
        reduce_new_statement: NewStatement => NewStatement;
        reduce_instance_of: InstanceOf => InstanceOf;
        reduce_super_constructor_call: SuperConstructorCall => SuperConstructorCall;
        reduce_literal: Literal => Literal;
        reduce_self_reference: SelfReference => SelfReference;
        reduce_super_reference: SuperReference => SuperReference;
        reduce_field_reference: FieldReference => FieldReference;
        reduce_declaration_reference: DeclarationReference => DeclarationReference;
        reduce_generic_ref: GenericRef => GenericRef;
        reduce_static_member_reference: StaticMemberReference => StaticMemberReference;
        reduce_class_name: ClassName => ClassName;
        reduce_delegate_call: DelegateCall => DelegateCall;
        reduce_array_initializer: ArrayInitializer => ArrayInitializer;
        reduce_hard_coded: HardCoded => HardCoded;
        reduce_nodes: Nodes => Nodes;
        reduce_format_newline: FormatNewline => FormatNewline;
        reduce_free_texts: FreeTexts => FreeTexts;
        reduce_free_text_leaf: FreeText => FreeText;
        reduce_free_text_line: FreeTextLine => FreeTextLine;
        reduce_free_text_paragraph: FreeTextParagraph => FreeTextParagraph;
        reduce_free_text_section: FreeTextSection => FreeTextSection;
        reduce_free_text_list: FreeTextList => FreeTextList;
        reduce_free_text_code: FreeTextCode => FreeTextCode;
        reduce_free_text_example: FreeTextExample => FreeTextExample;
        reduce_free_text_type_link: FreeTextTypeLink => FreeTextTypeLink;
        reduce_free_text_property_link: FreeTextPropertyLink => FreeTextPropertyLink;
    }
}

/// Reduces every node of a list, dropping deleted ones.
///
/// # Errors
/// Returns the first error raised by the reducer.
pub fn reduce_all<R: Reducer>(r: &mut R, nodes: Vec<Node>) -> Result<Vec<Node>> {
    reduce_each(nodes, |n| r.reduce_node(n))
}

fn reduce_each<T>(items: Vec<T>, mut f: impl FnMut(T) -> Reduced<T>) -> Result<Vec<T>> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(item) = f(item)? {
            out.push(item);
        }
    }
    Ok(out)
}

fn reduce_opt<T>(item: Option<T>, f: impl FnOnce(T) -> Reduced<T>) -> Result<Option<T>> {
    match item {
        Some(item) => f(item),
        None => Ok(None),
    }
}

fn reduce_boxed<R: Reducer>(r: &mut R, node: Box<Node>) -> Reduced<Box<Node>> {
    Ok(r.reduce_node(*node)?.map(Box::new))
}

fn reduce_opt_boxed<R: Reducer>(r: &mut R, node: Option<Box<Node>>) -> Result<Option<Box<Node>>> {
    match node {
        Some(node) => reduce_boxed(r, node),
        None => Ok(None),
    }
}

fn reduce_opt_type<R: Reducer>(r: &mut R, node: Option<TypeNode>) -> Result<Option<TypeNode>> {
    reduce_opt(node, |n| r.reduce_type_node(n))
}

fn reduce_opt_comment<R: Reducer>(r: &mut R, node: Option<Comment>) -> Result<Option<Comment>> {
    reduce_opt(node, |n| r.reduce_comment(n))
}

fn into_node<T: Into<Node>>(reduced: Reduced<T>) -> Reduced<Node> {
    reduced.map(|n| n.map(Into::into))
}

/// Dispatches a heterogeneous node to its kind method.
///
/// # Errors
/// Returns the first error raised by the reducer.
pub fn reduce_node<R: Reducer>(r: &mut R, node: Node) -> Reduced<Node> {
    match node {
        Node::CompilationUnit(n) => into_node(r.reduce_compilation_unit(*n)),
        Node::ClassDeclaration(n) => into_node(r.reduce_class_declaration(*n)),
        Node::InterfaceDeclaration(n) => into_node(r.reduce_interface_declaration(*n)),
        Node::EnumDeclaration(n) => into_node(r.reduce_enum_declaration(*n)),
        Node::Namespace(n) => into_node(r.reduce_namespace(*n)),
        Node::Field(n) => into_node(r.reduce_field(*n)),
        Node::FieldBackedGetter(n) => into_node(r.reduce_field_backed_getter(n)),
        Node::FieldBackedSetter(n) => into_node(r.reduce_field_backed_setter(n)),
        Node::MethodDeclaration(n) => into_node(r.reduce_method_declaration(*n)),
        Node::AbstractMethodDeclaration(n) => into_node(r.reduce_abstract_method_declaration(*n)),
        Node::ConstructorDeclaration(n) => into_node(r.reduce_constructor_declaration(*n)),
        Node::EnumItemList(n) => into_node(r.reduce_enum_item_list(n)),
        Node::Block(n) => into_node(r.reduce_block(n)),
        Node::Statement(n) => into_node(r.reduce_statement(n)),
        Node::ReturnStatement(n) => into_node(r.reduce_return_statement(n)),
        Node::ThrowStatement(n) => into_node(r.reduce_throw_statement(n)),
        Node::IfStatement(n) => into_node(r.reduce_if_statement(n)),
        Node::IfElseStatement(n) => into_node(r.reduce_if_else_statement(n)),
        Node::TernaryExpression(n) => into_node(r.reduce_ternary_expression(n)),
        Node::BinaryExpression(n) => into_node(r.reduce_binary_expression(n)),
        Node::MethodCall(n) => into_node(r.reduce_method_call(n)),
        Node::MemberAccess(n) => into_node(r.reduce_member_access(n)),
        Node::IndexAccess(n) => into_node(r.reduce_index_access(n)),
        Node::Cast(n) => into_node(r.reduce_cast(n)),
        Node::NewStatement(n) => into_node(r.reduce_new_statement(n)),
        Node::InstanceOf(n) => into_node(r.reduce_instance_of(n)),
        Node::SuperConstructorCall(n) => into_node(r.reduce_super_constructor_call(n)),
        Node::Literal(n) => into_node(r.reduce_literal(n)),
        Node::Identifier(n) => into_node(r.reduce_identifier(n)),
        Node::SelfReference(n) => into_node(r.reduce_self_reference(n)),
        Node::SuperReference(n) => into_node(r.reduce_super_reference(n)),
        Node::FieldReference(n) => into_node(r.reduce_field_reference(n)),
        Node::DeclarationReference(n) => into_node(r.reduce_declaration_reference(n)),
        Node::GenericRef(n) => into_node(r.reduce_generic_ref(n)),
        Node::StaticMemberReference(n) => into_node(r.reduce_static_member_reference(n)),
        Node::ClassName(n) => into_node(r.reduce_class_name(n)),
        Node::VariableDeclaration(n) => into_node(r.reduce_variable_declaration(*n)),
        Node::DelegateCall(n) => into_node(r.reduce_delegate_call(n)),
        Node::ArrayInitializer(n) => into_node(r.reduce_array_initializer(n)),
        Node::HardCoded(n) => into_node(r.reduce_hard_coded(n)),
        Node::Nodes(n) => into_node(r.reduce_nodes(n)),
        Node::Comment(n) => into_node(r.reduce_comment(n)),
        Node::FormatNewline(n) => into_node(r.reduce_format_newline(n)),
        Node::Type(n) => into_node(r.reduce_type_node(n)),
    }
}

/// Dispatches a type-reference node to its kind method.
///
/// # Errors
/// Returns the first error raised by the reducer.
pub fn reduce_type_node<R: Reducer>(r: &mut R, node: TypeNode) -> Reduced<TypeNode> {
    match node {
        TypeNode::Edge(n) => r.reduce_edge_type(n),
        TypeNode::Array(n) => r.reduce_array_type(*n),
        TypeNode::Generic(n) => r.reduce_generic_type(*n),
        TypeNode::Bounded(n) => r.reduce_bounded_type(*n),
        TypeNode::Wildcard(n) => r.reduce_wildcard_type(n),
        TypeNode::Decorating(n) => r.reduce_decorating_type_node(*n),
        TypeNode::Delegate(n) => r.reduce_delegate(*n),
    }
}

/// Dispatches a documentation node to its kind method.
///
/// # Errors
/// Returns the first error raised by the reducer.
pub fn reduce_free_text<R: Reducer>(r: &mut R, node: FreeTextNode) -> Reduced<FreeTextNode> {
    Ok(match node {
        FreeTextNode::Texts(n) => r.reduce_free_texts(n)?.map(FreeTextNode::Texts),
        FreeTextNode::Text(n) => r.reduce_free_text_leaf(n)?.map(FreeTextNode::Text),
        FreeTextNode::Line(n) => r.reduce_free_text_line(n)?.map(FreeTextNode::Line),
        FreeTextNode::Paragraph(n) => r.reduce_free_text_paragraph(n)?.map(FreeTextNode::Paragraph),
        FreeTextNode::Section(n) => r.reduce_free_text_section(n)?.map(FreeTextNode::Section),
        FreeTextNode::List(n) => r.reduce_free_text_list(n)?.map(FreeTextNode::List),
        FreeTextNode::Code(n) => r.reduce_free_text_code(n)?.map(FreeTextNode::Code),
        FreeTextNode::Example(n) => r.reduce_free_text_example(n)?.map(FreeTextNode::Example),
        FreeTextNode::TypeLink(n) => r.reduce_free_text_type_link(n)?.map(FreeTextNode::TypeLink),
        FreeTextNode::PropertyLink(n) => r
            .reduce_free_text_property_link(n)?
            .map(FreeTextNode::PropertyLink),
    })
}

/// Dispatches a method name to its kind method.
///
/// # Errors
/// Returns the first error raised by the reducer.
pub fn reduce_method_name<R: Reducer>(r: &mut R, node: MethodName) -> Reduced<MethodName> {
    Ok(match node {
        MethodName::Plain(n) => r.reduce_identifier(n)?.map(MethodName::Plain),
        MethodName::Getter(n) => r.reduce_getter_identifier(n)?.map(MethodName::Getter),
        MethodName::Setter(n) => r.reduce_setter_identifier(n)?.map(MethodName::Setter),
    })
}

pub fn reduce_identifier<R: Reducer>(_r: &mut R, node: Identifier) -> Reduced<Identifier> {
    Ok(Some(node))
}

pub fn reduce_getter_identifier<R: Reducer>(
    r: &mut R,
    node: GetterIdentifier,
) -> Reduced<GetterIdentifier> {
    let identifier = required!(r.reduce_identifier(node.identifier));
    Ok(Some(GetterIdentifier {
        id: node.id,
        identifier,
        type_id: node.type_id,
    }))
}

pub fn reduce_setter_identifier<R: Reducer>(
    r: &mut R,
    node: SetterIdentifier,
) -> Reduced<SetterIdentifier> {
    let identifier = required!(r.reduce_identifier(node.identifier));
    Ok(Some(SetterIdentifier {
        id: node.id,
        identifier,
        type_id: node.type_id,
    }))
}

pub fn reduce_modifier<R: Reducer>(_r: &mut R, node: Modifier) -> Reduced<Modifier> {
    Ok(Some(node))
}

pub fn reduce_modifier_list<R: Reducer>(r: &mut R, node: ModifierList) -> Reduced<ModifierList> {
    Ok(Some(ModifierList {
        id: node.id,
        children: reduce_each(node.children, |m| r.reduce_modifier(m))?,
    }))
}

pub fn reduce_comment<R: Reducer>(r: &mut R, node: Comment) -> Reduced<Comment> {
    let text = required!(r.reduce_free_text(node.text));
    Ok(Some(Comment {
        id: node.id,
        text,
        kind: node.kind,
    }))
}

pub fn reduce_package_declaration<R: Reducer>(
    _r: &mut R,
    node: PackageDeclaration,
) -> Reduced<PackageDeclaration> {
    Ok(Some(node))
}

pub fn reduce_import_statement<R: Reducer>(
    r: &mut R,
    node: ImportStatement,
) -> Reduced<ImportStatement> {
    let type_node = required!(r.reduce_type_node(node.type_node));
    Ok(Some(ImportStatement {
        id: node.id,
        type_node,
    }))
}

pub fn reduce_import_list<R: Reducer>(r: &mut R, node: ImportList) -> Reduced<ImportList> {
    Ok(Some(ImportList {
        id: node.id,
        children: reduce_each(node.children, |i| r.reduce_import_statement(i))?,
    }))
}

pub fn reduce_compilation_unit<R: Reducer>(
    r: &mut R,
    node: CompilationUnit,
) -> Reduced<CompilationUnit> {
    let package = required!(r.reduce_package_declaration(node.package));
    let imports = r.reduce_import_list(node.imports)?.unwrap_or_default();
    let comments = reduce_opt_comment(r, node.comments)?;
    let children = reduce_all(r, node.children)?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(CompilationUnit {
        id: node.id,
        name: node.name,
        package,
        imports,
        comments,
        children,
    }))
}

pub fn reduce_declaration_shape<R: Reducer>(
    r: &mut R,
    node: DeclarationShape,
) -> Reduced<DeclarationShape> {
    let name = required!(r.reduce_identifier(node.name));
    let type_node = required!(r.reduce_type_node(node.type_node));
    let comments = reduce_opt_comment(r, node.comments)?;
    let modifiers = r.reduce_modifier_list(node.modifiers)?.unwrap_or_default();
    let extends = reduce_opt(node.extends, |n| r.reduce_extends_declaration(n))?;
    let implements = reduce_opt(node.implements, |n| r.reduce_implements_declaration(n))?;
    let generic_parameters = reduce_opt(node.generic_parameters, |n| {
        r.reduce_generic_type_declaration_list(n)
    })?;
    let body = required!(r.reduce_block(node.body));
    Ok(Some(DeclarationShape {
        name,
        type_node,
        comments,
        modifiers,
        extends,
        implements,
        generic_parameters,
        body,
    }))
}

pub fn reduce_class_declaration<R: Reducer>(
    r: &mut R,
    node: ClassDeclaration,
) -> Reduced<ClassDeclaration> {
    let shape = required!(r.reduce_declaration_shape(node.shape));
    Ok(Some(ClassDeclaration { id: node.id, shape }))
}

pub fn reduce_interface_declaration<R: Reducer>(
    r: &mut R,
    node: InterfaceDeclaration,
) -> Reduced<InterfaceDeclaration> {
    let shape = required!(r.reduce_declaration_shape(node.shape));
    Ok(Some(InterfaceDeclaration { id: node.id, shape }))
}

pub fn reduce_enum_declaration<R: Reducer>(
    r: &mut R,
    node: EnumDeclaration,
) -> Reduced<EnumDeclaration> {
    let had_items = node
        .shape
        .body
        .children
        .iter()
        .any(|c| matches!(c, Node::EnumItemList(_)));
    let shape = required!(r.reduce_declaration_shape(node.shape));
    let has_items = shape
        .body
        .children
        .iter()
        .any(|c| matches!(c, Node::EnumItemList(_)));
    if had_items && !has_items {
        return Ok(None);
    }
    Ok(Some(EnumDeclaration { id: node.id, shape }))
}

pub fn reduce_field<R: Reducer>(r: &mut R, node: Field) -> Reduced<Field> {
    let identifier = required!(r.reduce_identifier(node.identifier));
    let type_node = required!(r.reduce_type_node(node.type_node));
    let initializer = reduce_opt_boxed(r, node.initializer)?;
    let comments = reduce_opt_comment(r, node.comments)?;
    let modifiers = r.reduce_modifier_list(node.modifiers)?.unwrap_or_default();
    Ok(Some(Field {
        id: node.id,
        identifier,
        type_node,
        initializer,
        comments,
        modifiers,
        property: node.property,
    }))
}

pub fn reduce_parameter<R: Reducer>(r: &mut R, node: Parameter) -> Reduced<Parameter> {
    let type_node = required!(r.reduce_type_node(node.type_node));
    let identifier = required!(r.reduce_identifier(node.identifier));
    Ok(Some(Parameter {
        id: node.id,
        type_node,
        identifier,
    }))
}

pub fn reduce_parameter_list<R: Reducer>(r: &mut R, node: ParameterList) -> Reduced<ParameterList> {
    Ok(Some(ParameterList {
        id: node.id,
        children: reduce_each(node.children, |p| r.reduce_parameter(p))?,
    }))
}

pub fn reduce_constructor_parameter<R: Reducer>(
    r: &mut R,
    node: ConstructorParameter,
) -> Reduced<ConstructorParameter> {
    let field_ref = required!(r.reduce_field_reference(node.field_ref));
    let type_node = required!(r.reduce_type_node(node.type_node));
    let identifier = required!(r.reduce_identifier(node.identifier));
    Ok(Some(ConstructorParameter {
        id: node.id,
        field_ref,
        type_node,
        identifier,
    }))
}

pub fn reduce_constructor_parameter_list<R: Reducer>(
    r: &mut R,
    node: ConstructorParameterList,
) -> Reduced<ConstructorParameterList> {
    Ok(Some(ConstructorParameterList {
        id: node.id,
        children: reduce_each(node.children, |p| r.reduce_constructor_parameter(p))?,
    }))
}

pub fn reduce_constructor_declaration<R: Reducer>(
    r: &mut R,
    node: ConstructorDeclaration,
) -> Reduced<ConstructorDeclaration> {
    let comments = reduce_opt_comment(r, node.comments)?;
    let modifiers = r.reduce_modifier_list(node.modifiers)?.unwrap_or_default();
    let parameters = r
        .reduce_constructor_parameter_list(node.parameters)?
        .unwrap_or_default();
    let body = required!(r.reduce_block(node.body));
    Ok(Some(ConstructorDeclaration {
        id: node.id,
        parameters,
        body,
        comments,
        modifiers,
    }))
}

pub fn reduce_method_declaration_signature<R: Reducer>(
    r: &mut R,
    node: MethodDeclarationSignature,
) -> Reduced<MethodDeclarationSignature> {
    let identifier = required!(r.reduce_method_name(node.identifier));
    let type_node = required!(r.reduce_type_node(node.type_node));
    let comments = reduce_opt_comment(r, node.comments)?;
    let modifiers = r.reduce_modifier_list(node.modifiers)?.unwrap_or_default();
    let parameters = r.reduce_parameter_list(node.parameters)?.unwrap_or_default();
    let generic_parameters = reduce_opt(node.generic_parameters, |n| {
        r.reduce_generic_type_declaration_list(n)
    })?;
    let throws = reduce_opt(node.throws, |n| r.reduce_type_list(n))?;
    Ok(Some(MethodDeclarationSignature {
        id: node.id,
        identifier,
        type_node,
        comments,
        modifiers,
        parameters,
        generic_parameters,
        throws,
    }))
}

pub fn reduce_method_declaration<R: Reducer>(
    r: &mut R,
    node: MethodDeclaration,
) -> Reduced<MethodDeclaration> {
    let signature = required!(r.reduce_method_declaration_signature(node.signature));
    let body = required!(r.reduce_block(node.body));
    Ok(Some(MethodDeclaration {
        id: node.id,
        signature,
        body,
    }))
}

pub fn reduce_abstract_method_declaration<R: Reducer>(
    r: &mut R,
    node: AbstractMethodDeclaration,
) -> Reduced<AbstractMethodDeclaration> {
    let signature = required!(r.reduce_method_declaration_signature(node.signature));
    Ok(Some(AbstractMethodDeclaration {
        id: node.id,
        signature,
    }))
}

pub fn reduce_field_backed_getter<R: Reducer>(
    r: &mut R,
    node: FieldBackedGetter,
) -> Reduced<FieldBackedGetter> {
    let field_ref = required!(r.reduce_field_reference(node.field_ref));
    let comments = reduce_opt_comment(r, node.comments)?;
    let getter_name = reduce_opt(node.getter_name, |n| r.reduce_identifier(n))?;
    Ok(Some(FieldBackedGetter {
        id: node.id,
        field_ref,
        comments,
        getter_name,
    }))
}

pub fn reduce_field_backed_setter<R: Reducer>(
    r: &mut R,
    node: FieldBackedSetter,
) -> Reduced<FieldBackedSetter> {
    let field_ref = required!(r.reduce_field_reference(node.field_ref));
    let comments = reduce_opt_comment(r, node.comments)?;
    let identifier = reduce_opt(node.identifier, |n| r.reduce_identifier(n))?;
    Ok(Some(FieldBackedSetter {
        id: node.id,
        field_ref,
        comments,
        identifier,
    }))
}

pub fn reduce_enum_item<R: Reducer>(r: &mut R, node: EnumItem) -> Reduced<EnumItem> {
    let identifier = required!(r.reduce_identifier(node.identifier));
    let value = required!(r.reduce_literal(node.value));
    let comments = reduce_opt_comment(r, node.comments)?;
    Ok(Some(EnumItem {
        id: node.id,
        identifier,
        value,
        comments,
    }))
}

pub fn reduce_enum_item_list<R: Reducer>(r: &mut R, node: EnumItemList) -> Reduced<EnumItemList> {
    let children = reduce_each(node.children, |i| r.reduce_enum_item(i))?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(EnumItemList {
        id: node.id,
        children,
    }))
}

pub fn reduce_block<R: Reducer>(r: &mut R, node: Block) -> Reduced<Block> {
    Ok(Some(Block {
        id: node.id,
        children: reduce_all(r, node.children)?,
    }))
}

pub fn reduce_namespace_block<R: Reducer>(
    r: &mut R,
    node: NamespaceBlock,
) -> Reduced<NamespaceBlock> {
    let block = required!(r.reduce_block(node.block));
    if block.children.is_empty() {
        return Ok(None);
    }
    Ok(Some(NamespaceBlock { id: node.id, block }))
}

pub fn reduce_namespace<R: Reducer>(r: &mut R, node: Namespace) -> Reduced<Namespace> {
    let name = required!(r.reduce_identifier(node.name));
    let block = required!(r.reduce_namespace_block(node.block));
    Ok(Some(Namespace {
        id: node.id,
        name,
        block,
    }))
}

pub fn reduce_variable_declaration<R: Reducer>(
    r: &mut R,
    node: VariableDeclaration,
) -> Reduced<VariableDeclaration> {
    let identifier = required!(r.reduce_identifier(node.identifier));
    let type_node = reduce_opt_type(r, node.type_node)?;
    let initializer = reduce_opt_boxed(r, node.initializer)?;
    Ok(Some(VariableDeclaration {
        id: node.id,
        identifier,
        initializer,
        type_node,
        constant: node.constant,
    }))
}

pub fn reduce_edge_type<R: Reducer>(_r: &mut R, node: EdgeType) -> Reduced<TypeNode> {
    Ok(Some(TypeNode::Edge(node)))
}

pub fn reduce_array_type<R: Reducer>(r: &mut R, node: ArrayType) -> Reduced<TypeNode> {
    let of = required!(r.reduce_type_node(node.of));
    Ok(Some(TypeNode::Array(Box::new(ArrayType {
        id: node.id,
        type_id: node.type_id,
        of,
    }))))
}

/// Reduces a generic instantiation. Arguments that are deleted take their
/// placeholder with them; with no argument left the base type is returned.
///
/// # Errors
/// Returns `AstError::UnexpectedShape` if the base is rewritten into something
/// other than a plain type reference.
pub fn reduce_generic_type<R: Reducer>(r: &mut R, node: GenericType) -> Reduced<TypeNode> {
    let base = match required!(r.reduce_edge_type(node.base)) {
        TypeNode::Edge(edge) => edge,
        other => {
            return Err(AstError::unexpected(
                "plain type reference as generic base",
                format!("{other:?}"),
            ));
        }
    };

    let mut args = Vec::with_capacity(node.args.len());
    let mut parameters = Vec::with_capacity(node.parameters.len());
    for (index, arg) in node.args.into_iter().enumerate() {
        if let Some(arg) = r.reduce_type_node(arg)? {
            args.push(arg);
            if let Some(parameter) = node.parameters.get(index) {
                parameters.push(*parameter);
            }
        }
    }

    if args.is_empty() {
        return Ok(Some(TypeNode::Edge(base)));
    }
    Ok(Some(TypeNode::Generic(Box::new(GenericType {
        id: node.id,
        type_id: node.type_id,
        base,
        args,
        parameters,
    }))))
}

pub fn reduce_bounded_type<R: Reducer>(r: &mut R, node: BoundedType) -> Reduced<TypeNode> {
    let base = required!(r.reduce_type_node(node.base));
    let lower_bound = reduce_opt_type(r, node.lower_bound)?;
    let upper_bound = reduce_opt_type(r, node.upper_bound)?;
    Ok(Some(TypeNode::Bounded(Box::new(BoundedType {
        id: node.id,
        type_id: node.type_id,
        base,
        lower_bound,
        upper_bound,
    }))))
}

pub fn reduce_wildcard_type<R: Reducer>(_r: &mut R, node: WildcardType) -> Reduced<TypeNode> {
    Ok(Some(TypeNode::Wildcard(node)))
}

pub fn reduce_decorating_type_node<R: Reducer>(
    r: &mut R,
    node: DecoratingTypeNode,
) -> Reduced<TypeNode> {
    let of = required!(r.reduce_type_node(node.of));
    Ok(Some(TypeNode::Decorating(Box::new(DecoratingTypeNode {
        id: node.id,
        type_id: node.type_id,
        of,
    }))))
}

pub fn reduce_delegate<R: Reducer>(r: &mut R, node: Delegate) -> Reduced<TypeNode> {
    let mut parameter_types = Vec::with_capacity(node.parameter_types.len());
    for parameter in node.parameter_types {
        parameter_types.push(required!(r.reduce_type_node(parameter)));
    }
    let return_type = required!(r.reduce_type_node(node.return_type));
    Ok(Some(TypeNode::Delegate(Box::new(Delegate {
        id: node.id,
        parameter_types,
        return_type,
        kind: node.kind,
    }))))
}

pub fn reduce_type_list<R: Reducer>(r: &mut R, node: TypeList) -> Reduced<TypeList> {
    Ok(Some(TypeList {
        id: node.id,
        children: reduce_each(node.children, |t| r.reduce_type_node(t))?,
    }))
}

pub fn reduce_extends_declaration<R: Reducer>(
    r: &mut R,
    node: ExtendsDeclaration,
) -> Reduced<ExtendsDeclaration> {
    let types = required!(r.reduce_type_list(node.types));
    if types.children.is_empty() {
        return Ok(None);
    }
    Ok(Some(ExtendsDeclaration { id: node.id, types }))
}

pub fn reduce_implements_declaration<R: Reducer>(
    r: &mut R,
    node: ImplementsDeclaration,
) -> Reduced<ImplementsDeclaration> {
    let types = required!(r.reduce_type_list(node.types));
    if types.children.is_empty() {
        return Ok(None);
    }
    Ok(Some(ImplementsDeclaration { id: node.id, types }))
}

pub fn reduce_generic_type_declaration<R: Reducer>(
    r: &mut R,
    node: GenericTypeDeclaration,
) -> Reduced<GenericTypeDeclaration> {
    let name = required!(r.reduce_identifier(node.name));
    let lower_bound = reduce_opt_type(r, node.lower_bound)?;
    let upper_bound = reduce_opt_type(r, node.upper_bound)?;
    Ok(Some(GenericTypeDeclaration {
        id: node.id,
        source_identifier: node.source_identifier,
        name,
        lower_bound,
        upper_bound,
    }))
}

pub fn reduce_generic_type_declaration_list<R: Reducer>(
    r: &mut R,
    node: GenericTypeDeclarationList,
) -> Reduced<GenericTypeDeclarationList> {
    let children = reduce_each(node.children, |g| r.reduce_generic_type_declaration(g))?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(GenericTypeDeclarationList {
        id: node.id,
        children,
    }))
}

pub fn reduce_statement<R: Reducer>(r: &mut R, node: Statement) -> Reduced<Statement> {
    let child = required!(reduce_boxed(r, node.child));
    Ok(Some(Statement { id: node.id, child }))
}

pub fn reduce_return_statement<R: Reducer>(
    r: &mut R,
    node: ReturnStatement,
) -> Reduced<ReturnStatement> {
    let expression = required!(reduce_boxed(r, node.expression));
    Ok(Some(ReturnStatement {
        id: node.id,
        expression,
    }))
}

pub fn reduce_throw_statement<R: Reducer>(
    r: &mut R,
    node: ThrowStatement,
) -> Reduced<ThrowStatement> {
    let expression = required!(reduce_boxed(r, node.expression));
    Ok(Some(ThrowStatement {
        id: node.id,
        expression,
    }))
}

pub fn reduce_if_statement<R: Reducer>(r: &mut R, node: IfStatement) -> Reduced<IfStatement> {
    let predicate = required!(reduce_boxed(r, node.predicate));
    let body = required!(r.reduce_block(node.body));
    Ok(Some(IfStatement {
        id: node.id,
        predicate,
        body,
    }))
}

pub fn reduce_if_else_statement<R: Reducer>(
    r: &mut R,
    node: IfElseStatement,
) -> Reduced<IfElseStatement> {
    let predicate = required!(reduce_boxed(r, node.predicate));
    let if_body = required!(r.reduce_block(node.if_body));
    let else_body = required!(r.reduce_block(node.else_body));
    Ok(Some(IfElseStatement {
        id: node.id,
        predicate,
        if_body,
        else_body,
    }))
}

pub fn reduce_ternary_expression<R: Reducer>(
    r: &mut R,
    node: TernaryExpression,
) -> Reduced<TernaryExpression> {
    let predicate = required!(reduce_boxed(r, node.predicate));
    let if_expression = required!(reduce_boxed(r, node.if_expression));
    let else_expression = required!(reduce_boxed(r, node.else_expression));
    Ok(Some(TernaryExpression {
        id: node.id,
        predicate,
        if_expression,
        else_expression,
    }))
}

pub fn reduce_binary_expression<R: Reducer>(
    r: &mut R,
    node: BinaryExpression,
) -> Reduced<BinaryExpression> {
    let left = required!(reduce_boxed(r, node.left));
    let right = required!(reduce_boxed(r, node.right));
    Ok(Some(BinaryExpression {
        id: node.id,
        left,
        token: node.token,
        right,
    }))
}

pub fn reduce_argument_list<R: Reducer>(r: &mut R, node: ArgumentList) -> Reduced<ArgumentList> {
    Ok(Some(ArgumentList {
        id: node.id,
        children: reduce_all(r, node.children)?,
    }))
}

pub fn reduce_method_call<R: Reducer>(r: &mut R, node: MethodCall) -> Reduced<MethodCall> {
    let target = match node.target {
        Some(target) => Some(required!(reduce_boxed(r, target))),
        None => None,
    };
    let method_name = required!(r.reduce_method_name(node.method_name));
    let arguments = r.reduce_argument_list(node.arguments)?.unwrap_or_default();
    Ok(Some(MethodCall {
        id: node.id,
        target,
        method_name,
        arguments,
    }))
}

pub fn reduce_member_access<R: Reducer>(r: &mut R, node: MemberAccess) -> Reduced<MemberAccess> {
    let owner = required!(reduce_boxed(r, node.owner));
    let member = required!(reduce_boxed(r, node.member));
    Ok(Some(MemberAccess {
        id: node.id,
        owner,
        member,
    }))
}

pub fn reduce_index_access<R: Reducer>(r: &mut R, node: IndexAccess) -> Reduced<IndexAccess> {
    let target = required!(reduce_boxed(r, node.target));
    let index = required!(reduce_boxed(r, node.index));
    Ok(Some(IndexAccess {
        id: node.id,
        target,
        index,
    }))
}

pub fn reduce_cast<R: Reducer>(r: &mut R, node: Cast) -> Reduced<Cast> {
    let to_type = required!(r.reduce_type_node(node.to_type));
    let expression = required!(reduce_boxed(r, node.expression));
    Ok(Some(Cast {
        id: node.id,
        to_type,
        expression,
    }))
}

pub fn reduce_new_statement<R: Reducer>(r: &mut R, node: NewStatement) -> Reduced<NewStatement> {
    let type_node = required!(r.reduce_type_node(node.type_node));
    let arguments = r.reduce_argument_list(node.arguments)?.unwrap_or_default();
    Ok(Some(NewStatement {
        id: node.id,
        type_node,
        arguments,
    }))
}

pub fn reduce_instance_of<R: Reducer>(r: &mut R, node: InstanceOf) -> Reduced<InstanceOf> {
    let target = required!(reduce_boxed(r, node.target));
    let type_node = required!(r.reduce_type_node(node.type_node));
    Ok(Some(InstanceOf {
        id: node.id,
        target,
        type_node,
    }))
}

pub fn reduce_super_constructor_call<R: Reducer>(
    r: &mut R,
    node: SuperConstructorCall,
) -> Reduced<SuperConstructorCall> {
    let arguments = r.reduce_argument_list(node.arguments)?.unwrap_or_default();
    Ok(Some(SuperConstructorCall {
        id: node.id,
        arguments,
    }))
}

pub fn reduce_literal<R: Reducer>(_r: &mut R, node: Literal) -> Reduced<Literal> {
    Ok(Some(node))
}

pub fn reduce_self_reference<R: Reducer>(
    _r: &mut R,
    node: SelfReference,
) -> Reduced<SelfReference> {
    Ok(Some(node))
}

pub fn reduce_super_reference<R: Reducer>(
    _r: &mut R,
    node: SuperReference,
) -> Reduced<SuperReference> {
    Ok(Some(node))
}

pub fn reduce_field_reference<R: Reducer>(
    _r: &mut R,
    node: FieldReference,
) -> Reduced<FieldReference> {
    Ok(Some(node))
}

pub fn reduce_declaration_reference<R: Reducer>(
    _r: &mut R,
    node: DeclarationReference,
) -> Reduced<DeclarationReference> {
    Ok(Some(node))
}

pub fn reduce_generic_ref<R: Reducer>(_r: &mut R, node: GenericRef) -> Reduced<GenericRef> {
    Ok(Some(node))
}

pub fn reduce_static_member_reference<R: Reducer>(
    r: &mut R,
    node: StaticMemberReference,
) -> Reduced<StaticMemberReference> {
    let target = required!(r.reduce_type_node(node.target));
    let member = required!(reduce_boxed(r, node.member));
    Ok(Some(StaticMemberReference {
        id: node.id,
        target,
        member,
    }))
}

pub fn reduce_class_name<R: Reducer>(r: &mut R, node: ClassName) -> Reduced<ClassName> {
    let type_node = required!(r.reduce_type_node(node.type_node));
    Ok(Some(ClassName {
        id: node.id,
        type_node,
    }))
}

pub fn reduce_delegate_call<R: Reducer>(r: &mut R, node: DelegateCall) -> Reduced<DelegateCall> {
    let delegate = required!(reduce_boxed(r, node.delegate));
    let delegate_ref = required!(reduce_boxed(r, node.delegate_ref));
    let arguments = r.reduce_argument_list(node.arguments)?.unwrap_or_default();
    Ok(Some(DelegateCall {
        id: node.id,
        delegate,
        delegate_ref,
        arguments,
    }))
}

pub fn reduce_array_initializer<R: Reducer>(
    r: &mut R,
    node: ArrayInitializer,
) -> Reduced<ArrayInitializer> {
    let type_node = reduce_opt_type(r, node.type_node)?;
    let children = reduce_all(r, node.children)?;
    Ok(Some(ArrayInitializer {
        id: node.id,
        type_node,
        children,
    }))
}

pub fn reduce_hard_coded<R: Reducer>(_r: &mut R, node: HardCoded) -> Reduced<HardCoded> {
    Ok(Some(node))
}

pub fn reduce_nodes<R: Reducer>(r: &mut R, node: Nodes) -> Reduced<Nodes> {
    let children = reduce_all(r, node.children)?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(Nodes {
        id: node.id,
        children,
    }))
}

pub fn reduce_format_newline<R: Reducer>(
    _r: &mut R,
    node: FormatNewline,
) -> Reduced<FormatNewline> {
    Ok(Some(node))
}

pub fn reduce_free_texts<R: Reducer>(r: &mut R, node: FreeTexts) -> Reduced<FreeTexts> {
    let children = reduce_each(node.children, |t| r.reduce_free_text(t))?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(FreeTexts {
        id: node.id,
        children,
    }))
}

pub fn reduce_free_text_leaf<R: Reducer>(_r: &mut R, node: FreeText) -> Reduced<FreeText> {
    Ok(Some(node))
}

pub fn reduce_free_text_line<R: Reducer>(r: &mut R, node: FreeTextLine) -> Reduced<FreeTextLine> {
    let child = required!(r.reduce_free_text(*node.child));
    Ok(Some(FreeTextLine {
        id: node.id,
        child: Box::new(child),
    }))
}

pub fn reduce_free_text_paragraph<R: Reducer>(
    r: &mut R,
    node: FreeTextParagraph,
) -> Reduced<FreeTextParagraph> {
    let child = required!(r.reduce_free_text(*node.child));
    Ok(Some(FreeTextParagraph {
        id: node.id,
        child: Box::new(child),
    }))
}

pub fn reduce_free_text_section<R: Reducer>(
    r: &mut R,
    node: FreeTextSection,
) -> Reduced<FreeTextSection> {
    let header = match node.header {
        Some(header) => r.reduce_free_text(*header)?.map(Box::new),
        None => None,
    };
    let content = required!(r.reduce_free_text(*node.content));
    Ok(Some(FreeTextSection {
        id: node.id,
        header,
        content: Box::new(content),
    }))
}

pub fn reduce_free_text_list<R: Reducer>(r: &mut R, node: FreeTextList) -> Reduced<FreeTextList> {
    let children = reduce_each(node.children, |t| r.reduce_free_text(t))?;
    if children.is_empty() {
        return Ok(None);
    }
    Ok(Some(FreeTextList {
        id: node.id,
        children,
    }))
}

pub fn reduce_free_text_code<R: Reducer>(_r: &mut R, node: FreeTextCode) -> Reduced<FreeTextCode> {
    Ok(Some(node))
}

pub fn reduce_free_text_example<R: Reducer>(
    _r: &mut R,
    node: FreeTextExample,
) -> Reduced<FreeTextExample> {
    Ok(Some(node))
}

pub fn reduce_free_text_type_link<R: Reducer>(
    _r: &mut R,
    node: FreeTextTypeLink,
) -> Reduced<FreeTextTypeLink> {
    Ok(Some(node))
}

pub fn reduce_free_text_property_link<R: Reducer>(
    _r: &mut R,
    node: FreeTextPropertyLink,
) -> Reduced<FreeTextPropertyLink> {
    Ok(Some(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use irongen_model::{
        ObjectType, PrimitiveKind, PrimitiveType, TypeDef, TypeModel, UnknownType,
    };

    /// Deletes nodes matching a predicate.
    struct Prune<F>(F);

    impl<F: FnMut(&Node) -> bool> Reducer for Prune<F> {
        fn reduce_node(&mut self, node: Node) -> Reduced<Node> {
            if (self.0)(&node) {
                return Ok(None);
            }
            reduce_node(self, node)
        }
    }

    struct Identity;

    impl Reducer for Identity {}

    fn class_with(model: &mut TypeModel, children: Vec<Node>) -> Node {
        let pet = model.add(TypeDef::Object(ObjectType::new("Pet")));
        let mut shape = DeclarationShape::new(Identifier::new("Pet"), EdgeType::new(pet).into());
        shape.body.children = children;
        Node::ClassDeclaration(Box::new(ClassDeclaration {
            id: crate::id::IdSlot::new(),
            shape,
        }))
    }

    fn unit(child: Node) -> Node {
        CompilationUnit::new("Pet", PackageDeclaration::new("com.zoo"), child).into()
    }

    #[test]
    fn test_unit_without_children_is_deleted() {
        let mut model = TypeModel::new("m");
        let class = class_with(&mut model, Vec::new());
        let mut reducer = Prune(|n: &Node| n.is_object_declaration());

        let reduced = reducer.reduce_node(unit(class)).expect("reduce");
        assert!(reduced.is_none());
    }

    #[test]
    fn test_block_is_kept_when_emptied() {
        let mut model = TypeModel::new("m");
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        let block = Block::new(vec![
            ReturnStatement::new(Literal::new("x").into()).into(),
            Field::new(EdgeType::new(string).into(), Identifier::new("f")).into(),
        ]);
        let mut reducer = Prune(|n: &Node| {
            matches!(n, Node::ReturnStatement(_) | Node::Field(_))
        });

        let reduced = reducer.reduce_node(block.into()).expect("reduce");
        match reduced {
            Some(Node::Block(b)) => assert!(b.children.is_empty()),
            other => panic!("expected empty block, got {other:?}"),
        }
    }

    #[test]
    fn test_required_child_deletion_deletes_parent() {
        let statement = Statement::new(
            BinaryExpression::new(
                HardCoded::new("a").into(),
                TokenKind::Assign,
                Literal::new(1_i64).into(),
            )
            .into(),
        );
        let mut reducer = Prune(|n: &Node| matches!(n, Node::Literal(_)));
        let reduced = reducer.reduce_node(statement.into()).expect("reduce");
        assert!(reduced.is_none());
    }

    #[test]
    fn test_enum_without_items_is_deleted() {
        let mut model = TypeModel::new("m");
        let kind = model.add(TypeDef::Enum(irongen_model::EnumType::of_strings(
            "Kind",
            ["a"],
        )));
        let mut shape = DeclarationShape::new(Identifier::new("Kind"), EdgeType::new(kind).into());
        shape.body.children = vec![Node::EnumItemList(EnumItemList {
            id: crate::id::IdSlot::new(),
            children: vec![EnumItem {
                id: crate::id::IdSlot::new(),
                identifier: Identifier::new("A"),
                value: Literal::new("a"),
                comments: None,
            }],
        })];
        let declaration = Node::EnumDeclaration(Box::new(EnumDeclaration {
            id: crate::id::IdSlot::new(),
            shape,
        }));

        let kept = Identity.reduce_node(declaration.clone()).expect("reduce");
        assert!(kept.is_some());

        let mut reducer = Prune(|n: &Node| matches!(n, Node::EnumItemList(_)));
        let reduced = reducer.reduce_node(declaration).expect("reduce");
        assert!(reduced.is_none());
    }

    #[test]
    fn test_rebuilt_nodes_keep_ids() {
        let ids = IdGenerator::new();
        let mut model = TypeModel::new("m");
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        let field = Field::new(EdgeType::new(string).into(), Identifier::new("f"));
        let field_id = ids.id_of(&field.id);
        let class = class_with(&mut model, vec![field.into(), FormatNewline::new().into()]);
        let class_id = ids.id_of(class.id_slot());

        let mut reducer = Prune(|n: &Node| matches!(n, Node::FormatNewline(_)));
        let reduced = reducer
            .reduce_node(class)
            .expect("reduce")
            .expect("class survives");

        assert_eq!(reduced.id_slot().get(), Some(class_id));
        let shape = reduced.shape().expect("class shape");
        assert_eq!(shape.body.children.len(), 1);
        assert_eq!(shape.body.children[0].id_slot().get(), Some(field_id));
    }

    #[test]
    fn test_generic_without_args_becomes_base() {
        let mut model = TypeModel::new("m");
        let boxed = model.add(TypeDef::Object(ObjectType::new("Box")));
        let unknown = model.add(TypeDef::Unknown(UnknownType::default()));

        struct DropWildcards;
        impl Reducer for DropWildcards {
            fn reduce_wildcard_type(&mut self, _node: WildcardType) -> Reduced<TypeNode> {
                Ok(None)
            }
        }

        let generic = TypeNode::Generic(Box::new(GenericType {
            id: crate::id::IdSlot::new(),
            type_id: boxed,
            base: EdgeType::new(boxed),
            args: vec![TypeNode::Wildcard(WildcardType {
                id: crate::id::IdSlot::new(),
                type_id: unknown,
                implementation: false,
            })],
            parameters: vec![unknown],
        }));

        let reduced = DropWildcards
            .reduce_type_node(generic)
            .expect("reduce")
            .expect("type survives");
        assert!(matches!(reduced, TypeNode::Edge(ref e) if e.type_id == boxed));
    }
}
