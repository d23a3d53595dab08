//! Structural traversal.
//!
//! [`Visitor`] has one method per node kind. Each default method forwards to the
//! free function of the same name, which calls [`Visitor::enter`] for the node and
//! then visits every contained child in declaration order. Override a method to
//! observe a kind; override it with a body that returns `Continue(())` to prune
//! the subtree. Returning `Break` from anywhere stops the whole traversal.
//!
//! Results are accumulated in the visitor's own state:
//!
//! ```
//! use std::ops::ControlFlow;
//! use irongen_ast::node::{Field, Node};
//! use irongen_ast::visit::{self, Visitor};
//!
//! #[derive(Default)]
//! struct FieldNames(Vec<String>);
//!
//! impl Visitor for FieldNames {
//!     type Break = ();
//!
//!     fn visit_field(&mut self, node: &Field) -> ControlFlow<()> {
//!         self.0.push(node.identifier.value.clone());
//!         visit::visit_field(self, node)
//!     }
//! }
//! ```

use std::convert::Infallible;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::id::IdSlot;
use crate::node::*;

macro_rules! visit_methods {
    ($($method:ident: $ty:ty;)*) => {
        $(
            #[doc = concat!("Visits a `", stringify!($ty), "`.")]
            fn $method(&mut self, node: &$ty) -> ControlFlow<Self::Break> {
                $method(self, node)
            }
        )*
    };
}

/// Read-only traversal over the AST.
pub trait Visitor: Sized {
    /// Value carried out of an early exit.
    type Break;

    /// Called once for every node reached, before its children.
    fn enter(&mut self, _id: &IdSlot) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Dispatches a heterogeneous node.
    fn visit_node(&mut self, node: &Node) -> ControlFlow<Self::Break> {
        visit_node(self, node)
    }

    /// Dispatches a type-reference node.
    fn visit_type_node(&mut self, node: &TypeNode) -> ControlFlow<Self::Break> {
        visit_type_node(self, node)
    }

    /// Dispatches a documentation text node.
    fn visit_free_text(&mut self, node: &FreeTextNode) -> ControlFlow<Self::Break> {
        visit_free_text(self, node)
    }

    /// Dispatches a method name.
    fn visit_method_name(&mut self, node: &MethodName) -> ControlFlow<Self::Break> {
        visit_method_name(self, node)
    }

    /// Visits the parts shared by class, interface and enum declarations.
    fn visit_object_declaration(
        &mut self,
        node: ObjectDeclaration<'_>,
    ) -> ControlFlow<Self::Break> {
        visit_object_declaration(self, node)
    }

    /// Visits the member block of a class, interface or enum declaration.
    fn visit_object_declaration_body(
        &mut self,
        _owner: ObjectDeclaration<'_>,
        body: &Block,
    ) -> ControlFlow<Self::Break> {
        self.visit_block(body)
    }

    visit_methods! {
        visit_identifier: Identifier;
        visit_getter_identifier: GetterIdentifier;
        visit_setter_identifier: SetterIdentifier;
        visit_modifier: Modifier;
        visit_modifier_list: ModifierList;
        visit_comment: Comment;
        visit_package_declaration: PackageDeclaration;
        visit_import_statement: ImportStatement;
        visit_import_list: ImportList;
        visit_compilation_unit: CompilationUnit;
        visit_class_declaration: ClassDeclaration;
        visit_interface_declaration: InterfaceDeclaration;
        visit_enum_declaration: EnumDeclaration;
        visit_field: Field;
        visit_parameter: Parameter;
        visit_parameter_list: ParameterList;
        visit_constructor_parameter: ConstructorParameter;
        visit_constructor_parameter_list: ConstructorParameterList;
        visit_constructor_declaration: ConstructorDeclaration;
        visit_method_declaration_signature: MethodDeclarationSignature;
        visit_method_declaration: MethodDeclaration;
        visit_abstract_method_declaration: AbstractMethodDeclaration;
        visit_field_backed_getter: FieldBackedGetter;
        visit_field_backed_setter: FieldBackedSetter;
        visit_enum_item: EnumItem;
        visit_enum_item_list: EnumItemList;
        visit_block: Block;
        visit_namespace_block: NamespaceBlock;
        visit_namespace: Namespace;
        visit_variable_declaration: VariableDeclaration;
        visit_edge_type: EdgeType;
        visit_array_type: ArrayType;
        visit_generic_type: GenericType;
        visit_bounded_type: BoundedType;
        visit_wildcard_type: WildcardType;
        visit_decorating_type_node: DecoratingTypeNode;
        visit_delegate: Delegate;
        visit_type_list: TypeList;
        visit_extends_declaration: ExtendsDeclaration;
        visit_implements_declaration: ImplementsDeclaration;
        visit_generic_type_declaration: GenericTypeDeclaration;
        visit_generic_type_declaration_list: GenericTypeDeclarationList;
        visit_statement: Statement;
        visit_return_statement: ReturnStatement;
        visit_throw_statement: ThrowStatement;
        visit_if_statement: IfStatement;
        visit_if_else_statement: IfElseStatement;
        visit_ternary_expression: TernaryExpression;
        visit_binary_expression: BinaryExpression;
        visit_argument_list: ArgumentList;
        visit_method_call: MethodCall;
        visit_member_access: MemberAccess;
        visit_index_access: IndexAccess;
        visit_cast: Cast;
        visit_new_statement: NewStatement;
        visit_instance_of: InstanceOf;
        visit_super_constructor_call: SuperConstructorCall;
        visit_literal: Literal;
        visit_self_reference: SelfReference;
        visit_super_reference: SuperReference;
        visit_field_reference: FieldReference;
        visit_declaration_reference: DeclarationReference;
        visit_generic_ref: GenericRef;
        visit_static_member_reference: StaticMemberReference;
        visit_class_name: ClassName;
        visit_delegate_call: DelegateCall;
        visit_array_initializer: ArrayInitializer;
        visit_hard_coded: HardCoded;
        visit_nodes: Nodes;
        visit_format_newline: FormatNewline;
        visit_free_texts: FreeTexts;
        visit_free_text_leaf: FreeText;
        visit_free_text_line: FreeTextLine;
        visit_free_text_paragraph: FreeTextParagraph;
        visit_free_text_section: FreeTextSection;
        visit_free_text_list: FreeTextList;
        visit_free_text_code: FreeTextCode;
        visit_free_text_example: FreeTextExample;
        visit_free_text_type_link: FreeTextTypeLink;
        visit_free_text_property_link: FreeTextPropertyLink;
    }
}

/// Visits every node of a slice.
pub fn visit_all<V: Visitor>(v: &mut V, nodes: &[Node]) -> ControlFlow<V::Break> {
    for node in nodes {
        v.visit_node(node)?;
    }
    ControlFlow::Continue(())
}

fn visit_opt_node<V: Visitor>(v: &mut V, node: Option<&Node>) -> ControlFlow<V::Break> {
    match node {
        Some(node) => v.visit_node(node),
        None => ControlFlow::Continue(()),
    }
}

fn visit_opt_type<V: Visitor>(v: &mut V, node: Option<&TypeNode>) -> ControlFlow<V::Break> {
    match node {
        Some(node) => v.visit_type_node(node),
        None => ControlFlow::Continue(()),
    }
}

fn visit_opt_comment<V: Visitor>(v: &mut V, node: Option<&Comment>) -> ControlFlow<V::Break> {
    match node {
        Some(node) => v.visit_comment(node),
        None => ControlFlow::Continue(()),
    }
}

/// Dispatches a heterogeneous node to its kind method.
pub fn visit_node<V: Visitor>(v: &mut V, node: &Node) -> ControlFlow<V::Break> {
    match node {
        Node::CompilationUnit(n) => v.visit_compilation_unit(n),
        Node::ClassDeclaration(n) => v.visit_class_declaration(n),
        Node::InterfaceDeclaration(n) => v.visit_interface_declaration(n),
        Node::EnumDeclaration(n) => v.visit_enum_declaration(n),
        Node::Namespace(n) => v.visit_namespace(n),
        Node::Field(n) => v.visit_field(n),
        Node::FieldBackedGetter(n) => v.visit_field_backed_getter(n),
        Node::FieldBackedSetter(n) => v.visit_field_backed_setter(n),
        Node::MethodDeclaration(n) => v.visit_method_declaration(n),
        Node::AbstractMethodDeclaration(n) => v.visit_abstract_method_declaration(n),
        Node::ConstructorDeclaration(n) => v.visit_constructor_declaration(n),
        Node::EnumItemList(n) => v.visit_enum_item_list(n),
        Node::Block(n) => v.visit_block(n),
        Node::Statement(n) => v.visit_statement(n),
        Node::ReturnStatement(n) => v.visit_return_statement(n),
        Node::ThrowStatement(n) => v.visit_throw_statement(n),
        Node::IfStatement(n) => v.visit_if_statement(n),
        Node::IfElseStatement(n) => v.visit_if_else_statement(n),
        Node::TernaryExpression(n) => v.visit_ternary_expression(n),
        Node::BinaryExpression(n) => v.visit_binary_expression(n),
        Node::MethodCall(n) => v.visit_method_call(n),
        Node::MemberAccess(n) => v.visit_member_access(n),
        Node::IndexAccess(n) => v.visit_index_access(n),
        Node::Cast(n) => v.visit_cast(n),
        Node::NewStatement(n) => v.visit_new_statement(n),
        Node::InstanceOf(n) => v.visit_instance_of(n),
        Node::SuperConstructorCall(n) => v.visit_super_constructor_call(n),
        Node::Literal(n) => v.visit_literal(n),
        Node::Identifier(n) => v.visit_identifier(n),
        Node::SelfReference(n) => v.visit_self_reference(n),
        Node::SuperReference(n) => v.visit_super_reference(n),
        Node::FieldReference(n) => v.visit_field_reference(n),
        Node::DeclarationReference(n) => v.visit_declaration_reference(n),
        Node::GenericRef(n) => v.visit_generic_ref(n),
        Node::StaticMemberReference(n) => v.visit_static_member_reference(n),
        Node::ClassName(n) => v.visit_class_name(n),
        Node::VariableDeclaration(n) => v.visit_variable_declaration(n),
        Node::DelegateCall(n) => v.visit_delegate_call(n),
        Node::ArrayInitializer(n) => v.visit_array_initializer(n),
        Node::HardCoded(n) => v.visit_hard_coded(n),
        Node::Nodes(n) => v.visit_nodes(n),
        Node::Comment(n) => v.visit_comment(n),
        Node::FormatNewline(n) => v.visit_format_newline(n),
        Node::Type(n) => v.visit_type_node(n),
    }
}

/// Dispatches a type-reference node to its kind method.
pub fn visit_type_node<V: Visitor>(v: &mut V, node: &TypeNode) -> ControlFlow<V::Break> {
    match node {
        TypeNode::Edge(n) => v.visit_edge_type(n),
        TypeNode::Array(n) => v.visit_array_type(n),
        TypeNode::Generic(n) => v.visit_generic_type(n),
        TypeNode::Bounded(n) => v.visit_bounded_type(n),
        TypeNode::Wildcard(n) => v.visit_wildcard_type(n),
        TypeNode::Decorating(n) => v.visit_decorating_type_node(n),
        TypeNode::Delegate(n) => v.visit_delegate(n),
    }
}

/// Dispatches a documentation node to its kind method.
pub fn visit_free_text<V: Visitor>(v: &mut V, node: &FreeTextNode) -> ControlFlow<V::Break> {
    match node {
        FreeTextNode::Texts(n) => v.visit_free_texts(n),
        FreeTextNode::Text(n) => v.visit_free_text_leaf(n),
        FreeTextNode::Line(n) => v.visit_free_text_line(n),
        FreeTextNode::Paragraph(n) => v.visit_free_text_paragraph(n),
        FreeTextNode::Section(n) => v.visit_free_text_section(n),
        FreeTextNode::List(n) => v.visit_free_text_list(n),
        FreeTextNode::Code(n) => v.visit_free_text_code(n),
        FreeTextNode::Example(n) => v.visit_free_text_example(n),
        FreeTextNode::TypeLink(n) => v.visit_free_text_type_link(n),
        FreeTextNode::PropertyLink(n) => v.visit_free_text_property_link(n),
    }
}

/// Dispatches a method name to its kind method.
pub fn visit_method_name<V: Visitor>(v: &mut V, node: &MethodName) -> ControlFlow<V::Break> {
    match node {
        MethodName::Plain(n) => v.visit_identifier(n),
        MethodName::Getter(n) => v.visit_getter_identifier(n),
        MethodName::Setter(n) => v.visit_setter_identifier(n),
    }
}

pub fn visit_identifier<V: Visitor>(v: &mut V, node: &Identifier) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_getter_identifier<V: Visitor>(
    v: &mut V,
    node: &GetterIdentifier,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.identifier)
}

pub fn visit_setter_identifier<V: Visitor>(
    v: &mut V,
    node: &SetterIdentifier,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.identifier)
}

pub fn visit_modifier<V: Visitor>(v: &mut V, node: &Modifier) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_modifier_list<V: Visitor>(v: &mut V, node: &ModifierList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for modifier in &node.children {
        v.visit_modifier(modifier)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_comment<V: Visitor>(v: &mut V, node: &Comment) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_free_text(&node.text)
}

pub fn visit_package_declaration<V: Visitor>(
    v: &mut V,
    node: &PackageDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_import_statement<V: Visitor>(
    v: &mut V,
    node: &ImportStatement,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.type_node)
}

pub fn visit_import_list<V: Visitor>(v: &mut V, node: &ImportList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for import in &node.children {
        v.visit_import_statement(import)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_compilation_unit<V: Visitor>(
    v: &mut V,
    node: &CompilationUnit,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_package_declaration(&node.package)?;
    v.visit_import_list(&node.imports)?;
    visit_opt_comment(v, node.comments.as_ref())?;
    visit_all(v, &node.children)
}

pub fn visit_class_declaration<V: Visitor>(
    v: &mut V,
    node: &ClassDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_object_declaration(ObjectDeclaration::Class(node))
}

pub fn visit_interface_declaration<V: Visitor>(
    v: &mut V,
    node: &InterfaceDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_object_declaration(ObjectDeclaration::Interface(node))
}

pub fn visit_enum_declaration<V: Visitor>(
    v: &mut V,
    node: &EnumDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_object_declaration(ObjectDeclaration::Enum(node))
}

/// Visits the shared declaration parts; the owning node was already entered.
pub fn visit_object_declaration<V: Visitor>(
    v: &mut V,
    node: ObjectDeclaration<'_>,
) -> ControlFlow<V::Break> {
    let shape = node.shape();
    v.visit_identifier(&shape.name)?;
    v.visit_type_node(&shape.type_node)?;
    visit_opt_comment(v, shape.comments.as_ref())?;
    v.visit_modifier_list(&shape.modifiers)?;
    if let Some(extends) = &shape.extends {
        v.visit_extends_declaration(extends)?;
    }
    if let Some(implements) = &shape.implements {
        v.visit_implements_declaration(implements)?;
    }
    if let Some(generics) = &shape.generic_parameters {
        v.visit_generic_type_declaration_list(generics)?;
    }
    v.visit_object_declaration_body(node, &shape.body)
}

pub fn visit_field<V: Visitor>(v: &mut V, node: &Field) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.identifier)?;
    v.visit_type_node(&node.type_node)?;
    visit_opt_node(v, node.initializer.as_deref())?;
    visit_opt_comment(v, node.comments.as_ref())?;
    v.visit_modifier_list(&node.modifiers)
}

pub fn visit_parameter<V: Visitor>(v: &mut V, node: &Parameter) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.type_node)?;
    v.visit_identifier(&node.identifier)
}

pub fn visit_parameter_list<V: Visitor>(v: &mut V, node: &ParameterList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for parameter in &node.children {
        v.visit_parameter(parameter)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_constructor_parameter<V: Visitor>(
    v: &mut V,
    node: &ConstructorParameter,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_field_reference(&node.field_ref)?;
    v.visit_type_node(&node.type_node)?;
    v.visit_identifier(&node.identifier)
}

pub fn visit_constructor_parameter_list<V: Visitor>(
    v: &mut V,
    node: &ConstructorParameterList,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for parameter in &node.children {
        v.visit_constructor_parameter(parameter)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_constructor_declaration<V: Visitor>(
    v: &mut V,
    node: &ConstructorDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    visit_opt_comment(v, node.comments.as_ref())?;
    v.visit_modifier_list(&node.modifiers)?;
    v.visit_constructor_parameter_list(&node.parameters)?;
    v.visit_block(&node.body)
}

pub fn visit_method_declaration_signature<V: Visitor>(
    v: &mut V,
    node: &MethodDeclarationSignature,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_method_name(&node.identifier)?;
    v.visit_type_node(&node.type_node)?;
    visit_opt_comment(v, node.comments.as_ref())?;
    v.visit_modifier_list(&node.modifiers)?;
    v.visit_parameter_list(&node.parameters)?;
    if let Some(generics) = &node.generic_parameters {
        v.visit_generic_type_declaration_list(generics)?;
    }
    if let Some(throws) = &node.throws {
        v.visit_type_list(throws)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_method_declaration<V: Visitor>(
    v: &mut V,
    node: &MethodDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_method_declaration_signature(&node.signature)?;
    v.visit_block(&node.body)
}

pub fn visit_abstract_method_declaration<V: Visitor>(
    v: &mut V,
    node: &AbstractMethodDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_method_declaration_signature(&node.signature)
}

pub fn visit_field_backed_getter<V: Visitor>(
    v: &mut V,
    node: &FieldBackedGetter,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_field_reference(&node.field_ref)?;
    visit_opt_comment(v, node.comments.as_ref())?;
    if let Some(name) = &node.getter_name {
        v.visit_identifier(name)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_field_backed_setter<V: Visitor>(
    v: &mut V,
    node: &FieldBackedSetter,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_field_reference(&node.field_ref)?;
    visit_opt_comment(v, node.comments.as_ref())?;
    if let Some(name) = &node.identifier {
        v.visit_identifier(name)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_enum_item<V: Visitor>(v: &mut V, node: &EnumItem) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.identifier)?;
    v.visit_literal(&node.value)?;
    visit_opt_comment(v, node.comments.as_ref())
}

pub fn visit_enum_item_list<V: Visitor>(v: &mut V, node: &EnumItemList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for item in &node.children {
        v.visit_enum_item(item)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_block<V: Visitor>(v: &mut V, node: &Block) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    visit_all(v, &node.children)
}

pub fn visit_namespace_block<V: Visitor>(
    v: &mut V,
    node: &NamespaceBlock,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_block(&node.block)
}

pub fn visit_namespace<V: Visitor>(v: &mut V, node: &Namespace) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.name)?;
    v.visit_namespace_block(&node.block)
}

pub fn visit_variable_declaration<V: Visitor>(
    v: &mut V,
    node: &VariableDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.identifier)?;
    visit_opt_type(v, node.type_node.as_ref())?;
    visit_opt_node(v, node.initializer.as_deref())
}

pub fn visit_edge_type<V: Visitor>(v: &mut V, node: &EdgeType) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_array_type<V: Visitor>(v: &mut V, node: &ArrayType) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.of)
}

pub fn visit_generic_type<V: Visitor>(v: &mut V, node: &GenericType) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_edge_type(&node.base)?;
    for arg in &node.args {
        v.visit_type_node(arg)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_bounded_type<V: Visitor>(v: &mut V, node: &BoundedType) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.base)?;
    visit_opt_type(v, node.lower_bound.as_ref())?;
    visit_opt_type(v, node.upper_bound.as_ref())
}

pub fn visit_wildcard_type<V: Visitor>(v: &mut V, node: &WildcardType) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_decorating_type_node<V: Visitor>(
    v: &mut V,
    node: &DecoratingTypeNode,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.of)
}

pub fn visit_delegate<V: Visitor>(v: &mut V, node: &Delegate) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for parameter in &node.parameter_types {
        v.visit_type_node(parameter)?;
    }
    v.visit_type_node(&node.return_type)
}

pub fn visit_type_list<V: Visitor>(v: &mut V, node: &TypeList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for child in &node.children {
        v.visit_type_node(child)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_extends_declaration<V: Visitor>(
    v: &mut V,
    node: &ExtendsDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_list(&node.types)
}

pub fn visit_implements_declaration<V: Visitor>(
    v: &mut V,
    node: &ImplementsDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_list(&node.types)
}

pub fn visit_generic_type_declaration<V: Visitor>(
    v: &mut V,
    node: &GenericTypeDeclaration,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_identifier(&node.name)?;
    visit_opt_type(v, node.lower_bound.as_ref())?;
    visit_opt_type(v, node.upper_bound.as_ref())
}

pub fn visit_generic_type_declaration_list<V: Visitor>(
    v: &mut V,
    node: &GenericTypeDeclarationList,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for child in &node.children {
        v.visit_generic_type_declaration(child)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_statement<V: Visitor>(v: &mut V, node: &Statement) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.child)
}

pub fn visit_return_statement<V: Visitor>(
    v: &mut V,
    node: &ReturnStatement,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.expression)
}

pub fn visit_throw_statement<V: Visitor>(
    v: &mut V,
    node: &ThrowStatement,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.expression)
}

pub fn visit_if_statement<V: Visitor>(v: &mut V, node: &IfStatement) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.predicate)?;
    v.visit_block(&node.body)
}

pub fn visit_if_else_statement<V: Visitor>(
    v: &mut V,
    node: &IfElseStatement,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.predicate)?;
    v.visit_block(&node.if_body)?;
    v.visit_block(&node.else_body)
}

pub fn visit_ternary_expression<V: Visitor>(
    v: &mut V,
    node: &TernaryExpression,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.predicate)?;
    v.visit_node(&node.if_expression)?;
    v.visit_node(&node.else_expression)
}

pub fn visit_binary_expression<V: Visitor>(
    v: &mut V,
    node: &BinaryExpression,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.left)?;
    v.visit_node(&node.right)
}

pub fn visit_argument_list<V: Visitor>(v: &mut V, node: &ArgumentList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    visit_all(v, &node.children)
}

pub fn visit_method_call<V: Visitor>(v: &mut V, node: &MethodCall) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    visit_opt_node(v, node.target.as_deref())?;
    v.visit_method_name(&node.method_name)?;
    v.visit_argument_list(&node.arguments)
}

pub fn visit_member_access<V: Visitor>(v: &mut V, node: &MemberAccess) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.owner)?;
    v.visit_node(&node.member)
}

pub fn visit_index_access<V: Visitor>(v: &mut V, node: &IndexAccess) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.target)?;
    v.visit_node(&node.index)
}

pub fn visit_cast<V: Visitor>(v: &mut V, node: &Cast) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.to_type)?;
    v.visit_node(&node.expression)
}

pub fn visit_new_statement<V: Visitor>(v: &mut V, node: &NewStatement) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.type_node)?;
    v.visit_argument_list(&node.arguments)
}

pub fn visit_instance_of<V: Visitor>(v: &mut V, node: &InstanceOf) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.target)?;
    v.visit_type_node(&node.type_node)
}

pub fn visit_super_constructor_call<V: Visitor>(
    v: &mut V,
    node: &SuperConstructorCall,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_argument_list(&node.arguments)
}

pub fn visit_literal<V: Visitor>(v: &mut V, node: &Literal) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_self_reference<V: Visitor>(v: &mut V, node: &SelfReference) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_super_reference<V: Visitor>(
    v: &mut V,
    node: &SuperReference,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_field_reference<V: Visitor>(
    v: &mut V,
    node: &FieldReference,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_declaration_reference<V: Visitor>(
    v: &mut V,
    node: &DeclarationReference,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_generic_ref<V: Visitor>(v: &mut V, node: &GenericRef) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_static_member_reference<V: Visitor>(
    v: &mut V,
    node: &StaticMemberReference,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.target)?;
    v.visit_node(&node.member)
}

pub fn visit_class_name<V: Visitor>(v: &mut V, node: &ClassName) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_type_node(&node.type_node)
}

pub fn visit_delegate_call<V: Visitor>(v: &mut V, node: &DelegateCall) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_node(&node.delegate)?;
    v.visit_node(&node.delegate_ref)?;
    v.visit_argument_list(&node.arguments)
}

pub fn visit_array_initializer<V: Visitor>(
    v: &mut V,
    node: &ArrayInitializer,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    visit_opt_type(v, node.type_node.as_ref())?;
    visit_all(v, &node.children)
}

pub fn visit_hard_coded<V: Visitor>(v: &mut V, node: &HardCoded) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_nodes<V: Visitor>(v: &mut V, node: &Nodes) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    visit_all(v, &node.children)
}

pub fn visit_format_newline<V: Visitor>(v: &mut V, node: &FormatNewline) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_free_texts<V: Visitor>(v: &mut V, node: &FreeTexts) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for child in &node.children {
        v.visit_free_text(child)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_free_text_leaf<V: Visitor>(v: &mut V, node: &FreeText) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_free_text_line<V: Visitor>(v: &mut V, node: &FreeTextLine) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_free_text(&node.child)
}

pub fn visit_free_text_paragraph<V: Visitor>(
    v: &mut V,
    node: &FreeTextParagraph,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    v.visit_free_text(&node.child)
}

pub fn visit_free_text_section<V: Visitor>(
    v: &mut V,
    node: &FreeTextSection,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    if let Some(header) = &node.header {
        v.visit_free_text(header)?;
    }
    v.visit_free_text(&node.content)
}

pub fn visit_free_text_list<V: Visitor>(v: &mut V, node: &FreeTextList) -> ControlFlow<V::Break> {
    v.enter(&node.id)?;
    for child in &node.children {
        v.visit_free_text(child)?;
    }
    ControlFlow::Continue(())
}

pub fn visit_free_text_code<V: Visitor>(v: &mut V, node: &FreeTextCode) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_free_text_example<V: Visitor>(
    v: &mut V,
    node: &FreeTextExample,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_free_text_type_link<V: Visitor>(
    v: &mut V,
    node: &FreeTextTypeLink,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

pub fn visit_free_text_property_link<V: Visitor>(
    v: &mut V,
    node: &FreeTextPropertyLink,
) -> ControlFlow<V::Break> {
    v.enter(&node.id)
}

struct FindFirst<T, F> {
    predicate: F,
    _found: PhantomData<fn() -> T>,
}

impl<T, F> Visitor for FindFirst<T, F>
where
    F: FnMut(&Node) -> Option<T>,
{
    type Break = T;

    fn visit_node(&mut self, node: &Node) -> ControlFlow<T> {
        if let Some(found) = (self.predicate)(node) {
            return ControlFlow::Break(found);
        }
        visit_node(self, node)
    }
}

/// Returns the first value `predicate` produces, searching depth first.
pub fn find_first<T>(nodes: &[Node], predicate: impl FnMut(&Node) -> Option<T>) -> Option<T> {
    let mut finder = FindFirst {
        predicate,
        _found: PhantomData,
    };
    match visit_all(&mut finder, nodes) {
        ControlFlow::Break(found) => Some(found),
        ControlFlow::Continue(()) => None,
    }
}

struct Collect<T, F> {
    select: F,
    found: Vec<T>,
}

impl<T, F> Visitor for Collect<T, F>
where
    F: FnMut(&Node) -> Option<T>,
{
    type Break = Infallible;

    fn visit_node(&mut self, node: &Node) -> ControlFlow<Infallible> {
        if let Some(found) = (self.select)(node) {
            self.found.push(found);
        }
        visit_node(self, node)
    }
}

/// Collects every value `select` produces, depth first.
pub fn collect<T>(nodes: &[Node], select: impl FnMut(&Node) -> Option<T>) -> Vec<T> {
    let mut collector = Collect {
        select,
        found: Vec::new(),
    };
    let _ = visit_all(&mut collector, nodes);
    collector.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use irongen_model::{ObjectType, PrimitiveKind, PrimitiveType, TypeDef, TypeModel};

    struct CountIds<'a> {
        ids: &'a IdGenerator,
        seen: Vec<crate::id::NodeId>,
        prune_methods: bool,
    }

    impl Visitor for CountIds<'_> {
        type Break = Infallible;

        fn enter(&mut self, id: &IdSlot) -> ControlFlow<Infallible> {
            self.seen.push(self.ids.id_of(id));
            ControlFlow::Continue(())
        }

        fn visit_method_declaration(
            &mut self,
            node: &MethodDeclaration,
        ) -> ControlFlow<Infallible> {
            if self.prune_methods {
                return ControlFlow::Continue(());
            }
            visit_method_declaration(self, node)
        }
    }

    fn sample_class() -> Node {
        let mut model = TypeModel::new("m");
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        let pet = model.add(TypeDef::Object(ObjectType::new("Pet")));

        let field = Field::new(EdgeType::new(string).into(), Identifier::new("name"));
        let method = MethodDeclaration::new(
            MethodDeclarationSignature::new(
                method_name("describe"),
                EdgeType::new(string).into(),
                Vec::new(),
            ),
            Block::new(vec![Node::ReturnStatement(ReturnStatement::new(
                Literal::new("pet").into(),
            ))]),
        );
        let mut shape = DeclarationShape::new(Identifier::new("Pet"), EdgeType::new(pet).into());
        shape.body.children = vec![field.into(), method.into()];
        Node::ClassDeclaration(Box::new(ClassDeclaration {
            id: IdSlot::new(),
            shape,
        }))
    }

    #[test]
    fn test_every_node_entered_once() {
        let ids = IdGenerator::new();
        let class = sample_class();
        let mut counter = CountIds {
            ids: &ids,
            seen: Vec::new(),
            prune_methods: false,
        };
        let _ = visit_all(&mut counter, std::slice::from_ref(&class));

        let mut unique = counter.seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), counter.seen.len());
        // class, name, type, modifiers + public, body
        // field, identifier, type, modifiers + private
        // method, signature, name, type, modifiers + public, parameters, body, return, literal
        assert_eq!(counter.seen.len(), 21);
    }

    #[test]
    fn test_override_prunes_subtree() {
        let ids = IdGenerator::new();
        let class = sample_class();
        let mut full = CountIds {
            ids: &ids,
            seen: Vec::new(),
            prune_methods: false,
        };
        let _ = visit_all(&mut full, std::slice::from_ref(&class));

        let mut pruned = CountIds {
            ids: &ids,
            seen: Vec::new(),
            prune_methods: true,
        };
        let _ = visit_all(&mut pruned, std::slice::from_ref(&class));

        // method, signature, name, type, modifiers, public, parameters, body, return, literal
        assert_eq!(full.seen.len() - pruned.seen.len(), 10);
        assert!(pruned.seen.iter().all(|id| full.seen.contains(id)));
    }

    #[test]
    fn test_find_first_stops_early() {
        let class = sample_class();
        let mut calls = 0;
        let found = find_first(std::slice::from_ref(&class), |node| {
            calls += 1;
            node.as_field().map(|f| f.identifier.value.clone())
        });
        assert_eq!(found.as_deref(), Some("name"));
        // class, then the field
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_collect_reaches_nested_nodes() {
        let class = sample_class();
        let literals = collect(std::slice::from_ref(&class), |node| match node {
            Node::Literal(l) => Some(l.value.to_string()),
            _ => None,
        });
        assert_eq!(literals, vec!["pet".to_string()]);
    }
}
