//! Statement, expression and reference nodes.

use irongen_model::{PrimitiveKind, PrimitiveValue};

use crate::id::{IdSlot, NodeId};
use crate::node::{Block, Identifier, MethodName, Node, TypeNode};

/// Binary operators and separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `=`
    Assign,
    /// `+`
    Add,
    /// `,`
    Comma,
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `*`
    Multiply,
    /// `-`
    Subtract,
    /// `??`
    CoalesceNull,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `|`
    BitwiseOr,
}

impl TokenKind {
    /// Operator text.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+",
            Self::Comma => ",",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Multiply => "*",
            Self::Subtract => "-",
            Self::CoalesceNull => "??",
            Self::Or => "||",
            Self::And => "&&",
            Self::BitwiseOr => "|",
        }
    }
}

/// Statement wrapping an expression.
#[derive(Debug, Clone)]
pub struct Statement {
    /// Node id.
    pub id: IdSlot,
    /// Wrapped expression.
    pub child: Box<Node>,
}

impl Statement {
    /// Wraps an expression.
    #[must_use]
    pub fn new(child: Node) -> Self {
        Self {
            id: IdSlot::new(),
            child: Box::new(child),
        }
    }
}

/// `return`.
#[derive(Debug, Clone)]
pub struct ReturnStatement {
    /// Node id.
    pub id: IdSlot,
    /// Returned expression.
    pub expression: Box<Node>,
}

impl ReturnStatement {
    /// Creates a return statement.
    #[must_use]
    pub fn new(expression: Node) -> Self {
        Self {
            id: IdSlot::new(),
            expression: Box::new(expression),
        }
    }
}

/// `throw`.
#[derive(Debug, Clone)]
pub struct ThrowStatement {
    /// Node id.
    pub id: IdSlot,
    /// Thrown expression.
    pub expression: Box<Node>,
}

/// `if` without `else`.
#[derive(Debug, Clone)]
pub struct IfStatement {
    /// Node id.
    pub id: IdSlot,
    /// Condition.
    pub predicate: Box<Node>,
    /// Body.
    pub body: Block,
}

impl IfStatement {
    /// Creates an if statement.
    #[must_use]
    pub fn new(predicate: Node, body: Block) -> Self {
        Self {
            id: IdSlot::new(),
            predicate: Box::new(predicate),
            body,
        }
    }
}

/// `if` with `else`.
#[derive(Debug, Clone)]
pub struct IfElseStatement {
    /// Node id.
    pub id: IdSlot,
    /// Condition.
    pub predicate: Box<Node>,
    /// Body when true.
    pub if_body: Block,
    /// Body when false.
    pub else_body: Block,
}

impl IfElseStatement {
    /// Creates an if/else statement.
    #[must_use]
    pub fn new(predicate: Node, if_body: Block, else_body: Block) -> Self {
        Self {
            id: IdSlot::new(),
            predicate: Box::new(predicate),
            if_body,
            else_body,
        }
    }
}

/// `a ? b : c`.
#[derive(Debug, Clone)]
pub struct TernaryExpression {
    /// Node id.
    pub id: IdSlot,
    /// Condition.
    pub predicate: Box<Node>,
    /// Value when true.
    pub if_expression: Box<Node>,
    /// Value when false.
    pub else_expression: Box<Node>,
}

/// `left op right`.
#[derive(Debug, Clone)]
pub struct BinaryExpression {
    /// Node id.
    pub id: IdSlot,
    /// Left operand.
    pub left: Box<Node>,
    /// Operator.
    pub token: TokenKind,
    /// Right operand.
    pub right: Box<Node>,
}

impl BinaryExpression {
    /// Creates a binary expression.
    #[must_use]
    pub fn new(left: Node, token: TokenKind, right: Node) -> Self {
        Self {
            id: IdSlot::new(),
            left: Box::new(left),
            token,
            right: Box::new(right),
        }
    }
}

/// Call arguments.
#[derive(Debug, Clone, Default)]
pub struct ArgumentList {
    /// Node id.
    pub id: IdSlot,
    /// Arguments.
    pub children: Vec<Node>,
}

impl ArgumentList {
    /// Creates an argument list.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            id: IdSlot::new(),
            children,
        }
    }
}

/// `target.method(args)`.
#[derive(Debug, Clone)]
pub struct MethodCall {
    /// Node id.
    pub id: IdSlot,
    /// Receiver; a bare call when absent.
    pub target: Option<Box<Node>>,
    /// Called method.
    pub method_name: MethodName,
    /// Arguments.
    pub arguments: ArgumentList,
}

impl MethodCall {
    /// Creates a call.
    #[must_use]
    pub fn new(target: Option<Node>, method_name: MethodName, arguments: Vec<Node>) -> Self {
        Self {
            id: IdSlot::new(),
            target: target.map(Box::new),
            method_name,
            arguments: ArgumentList::new(arguments),
        }
    }
}

/// `owner.member`.
#[derive(Debug, Clone)]
pub struct MemberAccess {
    /// Node id.
    pub id: IdSlot,
    /// Owner expression.
    pub owner: Box<Node>,
    /// Accessed member.
    pub member: Box<Node>,
}

impl MemberAccess {
    /// Creates a member access.
    #[must_use]
    pub fn new(owner: Node, member: Node) -> Self {
        Self {
            id: IdSlot::new(),
            owner: Box::new(owner),
            member: Box::new(member),
        }
    }
}

/// `target[index]`.
#[derive(Debug, Clone)]
pub struct IndexAccess {
    /// Node id.
    pub id: IdSlot,
    /// Indexed expression.
    pub target: Box<Node>,
    /// Index expression.
    pub index: Box<Node>,
}

impl IndexAccess {
    /// Creates an index access.
    #[must_use]
    pub fn new(target: Node, index: Node) -> Self {
        Self {
            id: IdSlot::new(),
            target: Box::new(target),
            index: Box::new(index),
        }
    }
}

/// `(T) expr`.
#[derive(Debug, Clone)]
pub struct Cast {
    /// Node id.
    pub id: IdSlot,
    /// Target type.
    pub to_type: TypeNode,
    /// Cast expression.
    pub expression: Box<Node>,
}

impl Cast {
    /// Creates a cast.
    #[must_use]
    pub fn new(to_type: TypeNode, expression: Node) -> Self {
        Self {
            id: IdSlot::new(),
            to_type,
            expression: Box::new(expression),
        }
    }
}

/// `new T(args)`.
#[derive(Debug, Clone)]
pub struct NewStatement {
    /// Node id.
    pub id: IdSlot,
    /// Instantiated type.
    pub type_node: TypeNode,
    /// Arguments.
    pub arguments: ArgumentList,
}

impl NewStatement {
    /// Creates an instantiation.
    #[must_use]
    pub fn new(type_node: TypeNode, arguments: Vec<Node>) -> Self {
        Self {
            id: IdSlot::new(),
            type_node,
            arguments: ArgumentList::new(arguments),
        }
    }
}

/// `expr instanceof T`.
#[derive(Debug, Clone)]
pub struct InstanceOf {
    /// Node id.
    pub id: IdSlot,
    /// Tested expression.
    pub target: Box<Node>,
    /// Tested type.
    pub type_node: TypeNode,
}

/// `super(args)`.
#[derive(Debug, Clone, Default)]
pub struct SuperConstructorCall {
    /// Node id.
    pub id: IdSlot,
    /// Arguments.
    pub arguments: ArgumentList,
}

impl SuperConstructorCall {
    /// Creates a super call.
    #[must_use]
    pub fn new(arguments: Vec<Node>) -> Self {
        Self {
            id: IdSlot::new(),
            arguments: ArgumentList::new(arguments),
        }
    }
}

/// Constant value.
#[derive(Debug, Clone)]
pub struct Literal {
    /// Node id.
    pub id: IdSlot,
    /// Value.
    pub value: PrimitiveValue,
    /// Explicit primitive kind, when the value alone is ambiguous.
    pub primitive_kind: Option<PrimitiveKind>,
}

impl Literal {
    /// Creates a literal.
    #[must_use]
    pub fn new(value: impl Into<PrimitiveValue>) -> Self {
        Self {
            id: IdSlot::new(),
            value: value.into(),
            primitive_kind: None,
        }
    }

    /// Creates a literal of an explicit kind.
    #[must_use]
    pub const fn typed(value: PrimitiveValue, primitive_kind: PrimitiveKind) -> Self {
        Self {
            id: IdSlot::new(),
            value,
            primitive_kind: Some(primitive_kind),
        }
    }

    /// The `null` literal.
    #[must_use]
    pub const fn null() -> Self {
        Self {
            id: IdSlot::new(),
            value: PrimitiveValue::Null,
            primitive_kind: None,
        }
    }
}

/// `this`.
#[derive(Debug, Clone, Default)]
pub struct SelfReference {
    /// Node id.
    pub id: IdSlot,
}

/// `super`.
#[derive(Debug, Clone, Default)]
pub struct SuperReference {
    /// Node id.
    pub id: IdSlot,
}

/// Reference to a field by the field's id.
#[derive(Debug, Clone)]
pub struct FieldReference {
    /// Node id.
    pub id: IdSlot,
    /// Id of the referenced field.
    pub target_id: NodeId,
}

impl FieldReference {
    /// Creates a reference.
    #[must_use]
    pub const fn new(target_id: NodeId) -> Self {
        Self {
            id: IdSlot::new(),
            target_id,
        }
    }
}

/// Reference to a parameter, constructor parameter or variable by id.
#[derive(Debug, Clone)]
pub struct DeclarationReference {
    /// Node id.
    pub id: IdSlot,
    /// Id of the referenced declaration.
    pub target_id: NodeId,
}

impl DeclarationReference {
    /// Creates a reference.
    #[must_use]
    pub const fn new(target_id: NodeId) -> Self {
        Self {
            id: IdSlot::new(),
            target_id,
        }
    }
}

/// Reference to a delegate type by id.
#[derive(Debug, Clone)]
pub struct GenericRef {
    /// Node id.
    pub id: IdSlot,
    /// Id of the referenced delegate.
    pub target_id: NodeId,
}

impl GenericRef {
    /// Creates a reference.
    #[must_use]
    pub const fn new(target_id: NodeId) -> Self {
        Self {
            id: IdSlot::new(),
            target_id,
        }
    }
}

/// `Type.member`.
#[derive(Debug, Clone)]
pub struct StaticMemberReference {
    /// Node id.
    pub id: IdSlot,
    /// Owning type.
    pub target: TypeNode,
    /// Member.
    pub member: Box<Node>,
}

impl StaticMemberReference {
    /// Creates a static member reference.
    #[must_use]
    pub fn new(target: TypeNode, member: Node) -> Self {
        Self {
            id: IdSlot::new(),
            target,
            member: Box::new(member),
        }
    }
}

/// Name of a type used as an expression, such as `Foo.class`.
#[derive(Debug, Clone)]
pub struct ClassName {
    /// Node id.
    pub id: IdSlot,
    /// Named type.
    pub type_node: TypeNode,
}

impl ClassName {
    /// Creates a type name expression.
    #[must_use]
    pub const fn new(type_node: TypeNode) -> Self {
        Self {
            id: IdSlot::new(),
            type_node,
        }
    }
}

/// Invocation of a delegate.
#[derive(Debug, Clone)]
pub struct DelegateCall {
    /// Node id.
    pub id: IdSlot,
    /// Callee.
    pub delegate: Box<Node>,
    /// Type of the delegate, usually a [`GenericRef`].
    pub delegate_ref: Box<Node>,
    /// Arguments.
    pub arguments: ArgumentList,
}

impl DelegateCall {
    /// Creates a delegate call.
    #[must_use]
    pub fn new(delegate: Node, delegate_ref: Node, arguments: Vec<Node>) -> Self {
        Self {
            id: IdSlot::new(),
            delegate: Box::new(delegate),
            delegate_ref: Box::new(delegate_ref),
            arguments: ArgumentList::new(arguments),
        }
    }
}

/// `{ a, b }`.
#[derive(Debug, Clone)]
pub struct ArrayInitializer {
    /// Node id.
    pub id: IdSlot,
    /// Element type.
    pub type_node: Option<TypeNode>,
    /// Elements.
    pub children: Vec<Node>,
}

/// Verbatim target code.
#[derive(Debug, Clone)]
pub struct HardCoded {
    /// Node id.
    pub id: IdSlot,
    /// Code.
    pub text: String,
}

impl HardCoded {
    /// Creates hard-coded text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: IdSlot::new(),
            text: text.into(),
        }
    }
}

/// Flat group of nodes spliced into the surrounding block.
#[derive(Debug, Clone, Default)]
pub struct Nodes {
    /// Node id.
    pub id: IdSlot,
    /// Grouped nodes.
    pub children: Vec<Node>,
}

/// Explicit blank line.
#[derive(Debug, Clone, Default)]
pub struct FormatNewline {
    /// Node id.
    pub id: IdSlot,
}

impl FormatNewline {
    /// Creates a blank line.
    #[must_use]
    pub const fn new() -> Self {
        Self { id: IdSlot::new() }
    }
}

/// Convenience for `this.<field>`.
#[must_use]
pub fn self_field(target_id: NodeId) -> Node {
    Node::MemberAccess(MemberAccess::new(
        Node::SelfReference(SelfReference::default()),
        Node::FieldReference(FieldReference::new(target_id)),
    ))
}

/// Convenience for an identifier expression.
#[must_use]
pub fn ident(value: impl Into<String>) -> Node {
    Node::Identifier(Identifier::new(value))
}

/// Convenience for a plain method name.
#[must_use]
pub fn method_name(value: impl Into<String>) -> MethodName {
    MethodName::Plain(Identifier::new(value))
}

