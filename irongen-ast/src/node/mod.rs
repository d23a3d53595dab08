//! AST node hierarchy.
//!
//! Nodes are plain owned structs. Positions that accept several kinds hold a
//! [`Node`]; positions with a fixed kind hold the concrete struct. Every node embeds
//! an [`IdSlot`], and nodes never point at each other except through id-carrying
//! reference nodes such as [`FieldReference`].

mod decl;
mod expr;
mod text;
mod types;

pub use decl::*;
pub use expr::*;
pub use text::*;
pub use types::*;

use crate::error::Result;
use crate::id::IdSlot;

/// A node with an identity slot.
pub trait Identified {
    /// The node's id slot.
    fn id_slot(&self) -> &IdSlot;

    /// Carries the id of `other` onto this node.
    ///
    /// # Errors
    /// Returns `AstError::IdReassigned` if this node already has a different id.
    fn with_id_from(self, other: &impl Identified) -> Result<Self>
    where
        Self: Sized,
    {
        self.id_slot().copy_from(other.id_slot())?;
        Ok(self)
    }
}

/// A node that declares something of a type.
pub trait Typed {
    /// Declared type.
    fn type_node(&self) -> Option<&TypeNode>;
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identified for $ty {
                fn id_slot(&self) -> &IdSlot {
                    &self.id
                }
            }
        )*
    };
}

impl_identified!(
    Identifier,
    GetterIdentifier,
    SetterIdentifier,
    Modifier,
    ModifierList,
    Comment,
    PackageDeclaration,
    ImportStatement,
    ImportList,
    CompilationUnit,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    Field,
    Parameter,
    ParameterList,
    ConstructorParameter,
    ConstructorParameterList,
    ConstructorDeclaration,
    MethodDeclarationSignature,
    MethodDeclaration,
    AbstractMethodDeclaration,
    FieldBackedGetter,
    FieldBackedSetter,
    EnumItem,
    EnumItemList,
    Block,
    NamespaceBlock,
    Namespace,
    VariableDeclaration,
    EdgeType,
    ArrayType,
    GenericType,
    BoundedType,
    WildcardType,
    DecoratingTypeNode,
    Delegate,
    TypeList,
    ExtendsDeclaration,
    ImplementsDeclaration,
    GenericTypeDeclaration,
    GenericTypeDeclarationList,
    Statement,
    ReturnStatement,
    ThrowStatement,
    IfStatement,
    IfElseStatement,
    TernaryExpression,
    BinaryExpression,
    ArgumentList,
    MethodCall,
    MemberAccess,
    IndexAccess,
    Cast,
    NewStatement,
    InstanceOf,
    SuperConstructorCall,
    Literal,
    SelfReference,
    SuperReference,
    FieldReference,
    DeclarationReference,
    GenericRef,
    StaticMemberReference,
    ClassName,
    DelegateCall,
    ArrayInitializer,
    HardCoded,
    Nodes,
    FormatNewline,
    FreeTexts,
    FreeText,
    FreeTextLine,
    FreeTextParagraph,
    FreeTextSection,
    FreeTextList,
    FreeTextCode,
    FreeTextExample,
    FreeTextTypeLink,
    FreeTextPropertyLink,
);

impl Identified for TypeNode {
    fn id_slot(&self) -> &IdSlot {
        Self::id_slot(self)
    }
}

impl Identified for FreeTextNode {
    fn id_slot(&self) -> &IdSlot {
        Self::id_slot(self)
    }
}

impl Identified for Node {
    fn id_slot(&self) -> &IdSlot {
        Self::id_slot(self)
    }
}

impl Typed for Field {
    fn type_node(&self) -> Option<&TypeNode> {
        Some(&self.type_node)
    }
}

impl Typed for Parameter {
    fn type_node(&self) -> Option<&TypeNode> {
        Some(&self.type_node)
    }
}

impl Typed for ConstructorParameter {
    fn type_node(&self) -> Option<&TypeNode> {
        Some(&self.type_node)
    }
}

impl Typed for VariableDeclaration {
    fn type_node(&self) -> Option<&TypeNode> {
        self.type_node.as_ref()
    }
}

impl Typed for MethodDeclarationSignature {
    fn type_node(&self) -> Option<&TypeNode> {
        Some(&self.type_node)
    }
}

impl Typed for DeclarationShape {
    fn type_node(&self) -> Option<&TypeNode> {
        Some(&self.type_node)
    }
}

/// Any node that can sit in a heterogeneous position.
#[derive(Debug, Clone)]
pub enum Node {
    /// Output file.
    CompilationUnit(Box<CompilationUnit>),
    /// Class.
    ClassDeclaration(Box<ClassDeclaration>),
    /// Interface.
    InterfaceDeclaration(Box<InterfaceDeclaration>),
    /// Enum.
    EnumDeclaration(Box<EnumDeclaration>),
    /// Namespace.
    Namespace(Box<Namespace>),
    /// Field.
    Field(Box<Field>),
    /// Getter backed by a field.
    FieldBackedGetter(FieldBackedGetter),
    /// Setter backed by a field.
    FieldBackedSetter(FieldBackedSetter),
    /// Method.
    MethodDeclaration(Box<MethodDeclaration>),
    /// Method without body.
    AbstractMethodDeclaration(Box<AbstractMethodDeclaration>),
    /// Constructor.
    ConstructorDeclaration(Box<ConstructorDeclaration>),
    /// Enum constants.
    EnumItemList(EnumItemList),
    /// Block.
    Block(Block),
    /// Expression statement.
    Statement(Statement),
    /// `return`.
    ReturnStatement(ReturnStatement),
    /// `throw`.
    ThrowStatement(ThrowStatement),
    /// `if`.
    IfStatement(IfStatement),
    /// `if`/`else`.
    IfElseStatement(IfElseStatement),
    /// `?:`.
    TernaryExpression(TernaryExpression),
    /// Binary expression.
    BinaryExpression(BinaryExpression),
    /// Method call.
    MethodCall(MethodCall),
    /// Member access.
    MemberAccess(MemberAccess),
    /// Index access.
    IndexAccess(IndexAccess),
    /// Cast.
    Cast(Cast),
    /// Instantiation.
    NewStatement(NewStatement),
    /// `instanceof`.
    InstanceOf(InstanceOf),
    /// `super(..)`.
    SuperConstructorCall(SuperConstructorCall),
    /// Constant.
    Literal(Literal),
    /// Name.
    Identifier(Identifier),
    /// `this`.
    SelfReference(SelfReference),
    /// `super`.
    SuperReference(SuperReference),
    /// Field reference.
    FieldReference(FieldReference),
    /// Parameter or variable reference.
    DeclarationReference(DeclarationReference),
    /// Delegate type reference.
    GenericRef(GenericRef),
    /// `Type.member`.
    StaticMemberReference(StaticMemberReference),
    /// Type as expression.
    ClassName(ClassName),
    /// Local variable.
    VariableDeclaration(Box<VariableDeclaration>),
    /// Delegate invocation.
    DelegateCall(DelegateCall),
    /// Array literal.
    ArrayInitializer(ArrayInitializer),
    /// Verbatim code.
    HardCoded(HardCoded),
    /// Group spliced into the parent.
    Nodes(Nodes),
    /// Comment.
    Comment(Comment),
    /// Blank line.
    FormatNewline(FormatNewline),
    /// Type reference.
    Type(TypeNode),
}

macro_rules! node_from {
    (boxed: $($b:ident),*; plain: $($p:ident),* $(,)?) => {
        $(
            impl From<$b> for Node {
                fn from(value: $b) -> Self {
                    Self::$b(Box::new(value))
                }
            }
        )*
        $(
            impl From<$p> for Node {
                fn from(value: $p) -> Self {
                    Self::$p(value)
                }
            }
        )*
    };
}

node_from!(
    boxed: CompilationUnit, ClassDeclaration, InterfaceDeclaration, EnumDeclaration, Namespace,
        Field, MethodDeclaration, AbstractMethodDeclaration, ConstructorDeclaration,
        VariableDeclaration;
    plain: FieldBackedGetter, FieldBackedSetter, EnumItemList, Block, Statement,
        ReturnStatement, ThrowStatement, IfStatement, IfElseStatement, TernaryExpression,
        BinaryExpression, MethodCall, MemberAccess, IndexAccess, Cast, NewStatement, InstanceOf,
        SuperConstructorCall, Literal, Identifier, SelfReference, SuperReference, FieldReference,
        DeclarationReference, GenericRef, StaticMemberReference, ClassName, DelegateCall,
        ArrayInitializer, HardCoded, Nodes, Comment, FormatNewline,
);

impl From<TypeNode> for Node {
    fn from(value: TypeNode) -> Self {
        Self::Type(value)
    }
}

impl Node {
    /// Id slot of the wrapped node.
    #[must_use]
    pub fn id_slot(&self) -> &IdSlot {
        match self {
            Self::CompilationUnit(n) => &n.id,
            Self::ClassDeclaration(n) => &n.id,
            Self::InterfaceDeclaration(n) => &n.id,
            Self::EnumDeclaration(n) => &n.id,
            Self::Namespace(n) => &n.id,
            Self::Field(n) => &n.id,
            Self::FieldBackedGetter(n) => &n.id,
            Self::FieldBackedSetter(n) => &n.id,
            Self::MethodDeclaration(n) => &n.id,
            Self::AbstractMethodDeclaration(n) => &n.id,
            Self::ConstructorDeclaration(n) => &n.id,
            Self::EnumItemList(n) => &n.id,
            Self::Block(n) => &n.id,
            Self::Statement(n) => &n.id,
            Self::ReturnStatement(n) => &n.id,
            Self::ThrowStatement(n) => &n.id,
            Self::IfStatement(n) => &n.id,
            Self::IfElseStatement(n) => &n.id,
            Self::TernaryExpression(n) => &n.id,
            Self::BinaryExpression(n) => &n.id,
            Self::MethodCall(n) => &n.id,
            Self::MemberAccess(n) => &n.id,
            Self::IndexAccess(n) => &n.id,
            Self::Cast(n) => &n.id,
            Self::NewStatement(n) => &n.id,
            Self::InstanceOf(n) => &n.id,
            Self::SuperConstructorCall(n) => &n.id,
            Self::Literal(n) => &n.id,
            Self::Identifier(n) => &n.id,
            Self::SelfReference(n) => &n.id,
            Self::SuperReference(n) => &n.id,
            Self::FieldReference(n) => &n.id,
            Self::DeclarationReference(n) => &n.id,
            Self::GenericRef(n) => &n.id,
            Self::StaticMemberReference(n) => &n.id,
            Self::ClassName(n) => &n.id,
            Self::VariableDeclaration(n) => &n.id,
            Self::DelegateCall(n) => &n.id,
            Self::ArrayInitializer(n) => &n.id,
            Self::HardCoded(n) => &n.id,
            Self::Nodes(n) => &n.id,
            Self::Comment(n) => &n.id,
            Self::FormatNewline(n) => &n.id,
            Self::Type(n) => n.id_slot(),
        }
    }

    /// Short kind name for logs and errors.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::CompilationUnit(_) => "compilation unit",
            Self::ClassDeclaration(_) => "class declaration",
            Self::InterfaceDeclaration(_) => "interface declaration",
            Self::EnumDeclaration(_) => "enum declaration",
            Self::Namespace(_) => "namespace",
            Self::Field(_) => "field",
            Self::FieldBackedGetter(_) => "getter",
            Self::FieldBackedSetter(_) => "setter",
            Self::MethodDeclaration(_) => "method",
            Self::AbstractMethodDeclaration(_) => "abstract method",
            Self::ConstructorDeclaration(_) => "constructor",
            Self::EnumItemList(_) => "enum item list",
            Self::Block(_) => "block",
            Self::Statement(_) => "statement",
            Self::ReturnStatement(_) => "return",
            Self::ThrowStatement(_) => "throw",
            Self::IfStatement(_) => "if",
            Self::IfElseStatement(_) => "if/else",
            Self::TernaryExpression(_) => "ternary",
            Self::BinaryExpression(_) => "binary expression",
            Self::MethodCall(_) => "method call",
            Self::MemberAccess(_) => "member access",
            Self::IndexAccess(_) => "index access",
            Self::Cast(_) => "cast",
            Self::NewStatement(_) => "new",
            Self::InstanceOf(_) => "instanceof",
            Self::SuperConstructorCall(_) => "super call",
            Self::Literal(_) => "literal",
            Self::Identifier(_) => "identifier",
            Self::SelfReference(_) => "this",
            Self::SuperReference(_) => "super",
            Self::FieldReference(_) => "field reference",
            Self::DeclarationReference(_) => "declaration reference",
            Self::GenericRef(_) => "delegate reference",
            Self::StaticMemberReference(_) => "static member reference",
            Self::ClassName(_) => "class name",
            Self::VariableDeclaration(_) => "variable",
            Self::DelegateCall(_) => "delegate call",
            Self::ArrayInitializer(_) => "array initializer",
            Self::HardCoded(_) => "hard-coded",
            Self::Nodes(_) => "nodes",
            Self::Comment(_) => "comment",
            Self::FormatNewline(_) => "newline",
            Self::Type(_) => "type",
        }
    }

    /// Borrows the node as an object declaration.
    #[must_use]
    pub fn as_object_declaration(&self) -> Option<ObjectDeclaration<'_>> {
        match self {
            Self::ClassDeclaration(n) => Some(ObjectDeclaration::Class(n)),
            Self::InterfaceDeclaration(n) => Some(ObjectDeclaration::Interface(n)),
            Self::EnumDeclaration(n) => Some(ObjectDeclaration::Enum(n)),
            _ => None,
        }
    }

    /// Declaration parts of an object declaration.
    #[must_use]
    pub fn shape(&self) -> Option<&DeclarationShape> {
        self.as_object_declaration().map(|d| d.shape())
    }

    /// Mutable declaration parts of an object declaration.
    pub fn shape_mut(&mut self) -> Option<&mut DeclarationShape> {
        match self {
            Self::ClassDeclaration(n) => Some(&mut n.shape),
            Self::InterfaceDeclaration(n) => Some(&mut n.shape),
            Self::EnumDeclaration(n) => Some(&mut n.shape),
            _ => None,
        }
    }

    /// Returns true for class, interface and enum declarations.
    #[must_use]
    pub const fn is_object_declaration(&self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration(_) | Self::InterfaceDeclaration(_) | Self::EnumDeclaration(_)
        )
    }

    /// Borrows the node as a field.
    #[must_use]
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(f) => Some(f),
            _ => None,
        }
    }
}
