//! Declaration nodes.

use irongen_model::{Property, TypeId};

use crate::id::IdSlot;
use crate::node::{
    ExtendsDeclaration, FieldReference, FreeTextNode, GenericTypeDeclarationList,
    ImplementsDeclaration, Literal, Node, TypeNode,
};

/// Name of something.
#[derive(Debug, Clone)]
pub struct Identifier {
    /// Node id.
    pub id: IdSlot,
    /// Name to print.
    pub value: String,
    /// Name as written in the schema, when it differs.
    pub original: Option<String>,
}

impl Identifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: IdSlot::new(),
            value: value.into(),
            original: None,
        }
    }

    /// Creates an identifier remembering the schema name.
    #[must_use]
    pub fn with_original(value: impl Into<String>, original: impl Into<String>) -> Self {
        let value = value.into();
        let original = original.into();
        Self {
            id: IdSlot::new(),
            original: (original != value).then_some(original),
            value,
        }
    }

    /// Schema name if known, otherwise the printed name.
    #[must_use]
    pub fn original_or_value(&self) -> &str {
        self.original.as_deref().unwrap_or(&self.value)
    }
}

/// Getter name derived from a field identifier; the renderer decides `get`/`is`.
#[derive(Debug, Clone)]
pub struct GetterIdentifier {
    /// Node id.
    pub id: IdSlot,
    /// Base name.
    pub identifier: Identifier,
    /// Returned type, which can influence the prefix.
    pub type_id: Option<TypeId>,
}

/// Setter name derived from a field identifier.
#[derive(Debug, Clone)]
pub struct SetterIdentifier {
    /// Node id.
    pub id: IdSlot,
    /// Base name.
    pub identifier: Identifier,
    /// Accepted type.
    pub type_id: Option<TypeId>,
}

/// Name of a method.
#[derive(Debug, Clone)]
pub enum MethodName {
    /// Plain name.
    Plain(Identifier),
    /// Getter name.
    Getter(GetterIdentifier),
    /// Setter name.
    Setter(SetterIdentifier),
}

impl MethodName {
    /// Base identifier.
    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        match self {
            Self::Plain(i) => i,
            Self::Getter(g) => &g.identifier,
            Self::Setter(s) => &s.identifier,
        }
    }

    /// Returns true for getter names.
    #[must_use]
    pub const fn is_getter(&self) -> bool {
        matches!(self, Self::Getter(_))
    }

    /// Creates a getter name.
    #[must_use]
    pub const fn getter(identifier: Identifier, type_id: Option<TypeId>) -> Self {
        Self::Getter(GetterIdentifier {
            id: IdSlot::new(),
            identifier,
            type_id,
        })
    }
}

/// Modifier kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    /// `private`.
    Private,
    /// `public`.
    Public,
    /// Package default visibility.
    Default,
    /// `protected`.
    Protected,
    /// `static`.
    Static,
    /// `final`.
    Final,
    /// `abstract`.
    Abstract,
    /// `readonly`.
    Readonly,
    /// Compile-time constant.
    Const,
    /// `override`.
    Override,
}

/// One modifier.
#[derive(Debug, Clone)]
pub struct Modifier {
    /// Node id.
    pub id: IdSlot,
    /// Kind.
    pub kind: ModifierKind,
}

impl Modifier {
    /// Creates a modifier.
    #[must_use]
    pub const fn new(kind: ModifierKind) -> Self {
        Self {
            id: IdSlot::new(),
            kind,
        }
    }
}

/// Modifiers of a declaration.
#[derive(Debug, Clone, Default)]
pub struct ModifierList {
    /// Node id.
    pub id: IdSlot,
    /// Modifiers, in print order.
    pub children: Vec<Modifier>,
}

impl ModifierList {
    /// Creates a list from kinds.
    #[must_use]
    pub fn of(kinds: &[ModifierKind]) -> Self {
        Self {
            id: IdSlot::new(),
            children: kinds.iter().map(|k| Modifier::new(*k)).collect(),
        }
    }

    /// Returns true if the list holds the kind.
    #[must_use]
    pub fn has(&self, kind: ModifierKind) -> bool {
        self.children.iter().any(|m| m.kind == kind)
    }

    /// Adds a kind unless present.
    pub fn add(&mut self, kind: ModifierKind) {
        if !self.has(kind) {
            self.children.push(Modifier::new(kind));
        }
    }

    /// Removes every modifier of the kind.
    pub fn remove(&mut self, kind: ModifierKind) {
        self.children.retain(|m| m.kind != kind);
    }
}

/// Comment styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// One-line comment.
    Single,
    /// Block comment.
    Multi,
    /// Documentation comment.
    Doc,
}

/// Comment attached to a node.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Node id.
    pub id: IdSlot,
    /// Comment text.
    pub text: FreeTextNode,
    /// Style.
    pub kind: CommentKind,
}

impl Comment {
    /// Creates a comment.
    #[must_use]
    pub fn new(text: FreeTextNode, kind: CommentKind) -> Self {
        Self {
            id: IdSlot::new(),
            text,
            kind,
        }
    }
}

/// Namespace of a compilation unit.
#[derive(Debug, Clone)]
pub struct PackageDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Dotted namespace.
    pub namespace: String,
}

impl PackageDeclaration {
    /// Creates a package declaration.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            id: IdSlot::new(),
            namespace: namespace.into(),
        }
    }
}

/// One import.
#[derive(Debug, Clone)]
pub struct ImportStatement {
    /// Node id.
    pub id: IdSlot,
    /// Imported type; its `import_name` is the canonical import string.
    pub type_node: TypeNode,
}

/// Imports of a compilation unit.
#[derive(Debug, Clone, Default)]
pub struct ImportList {
    /// Node id.
    pub id: IdSlot,
    /// Imports.
    pub children: Vec<ImportStatement>,
}

/// One output file.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    /// Node id.
    pub id: IdSlot,
    /// Logical name, usually the main declaration name.
    pub name: Option<String>,
    /// Namespace.
    pub package: PackageDeclaration,
    /// Imports.
    pub imports: ImportList,
    /// File header comment.
    pub comments: Option<Comment>,
    /// Top-level nodes.
    pub children: Vec<Node>,
}

impl CompilationUnit {
    /// Creates a unit with one child.
    #[must_use]
    pub fn new(name: impl Into<String>, package: PackageDeclaration, child: Node) -> Self {
        Self {
            id: IdSlot::new(),
            name: Some(name.into()),
            package,
            imports: ImportList::default(),
            comments: None,
            children: vec![child],
        }
    }
}

/// Parts shared by class, interface and enum declarations.
#[derive(Debug, Clone)]
pub struct DeclarationShape {
    /// Declared name.
    pub name: Identifier,
    /// The declared type.
    pub type_node: TypeNode,
    /// Documentation.
    pub comments: Option<Comment>,
    /// Modifiers.
    pub modifiers: ModifierList,
    /// Extended types.
    pub extends: Option<ExtendsDeclaration>,
    /// Implemented types.
    pub implements: Option<ImplementsDeclaration>,
    /// Generic parameters.
    pub generic_parameters: Option<GenericTypeDeclarationList>,
    /// Members.
    pub body: Block,
}

impl DeclarationShape {
    /// Creates a public declaration shape with an empty body.
    #[must_use]
    pub fn new(name: Identifier, type_node: TypeNode) -> Self {
        Self {
            name,
            type_node,
            comments: None,
            modifiers: ModifierList::of(&[ModifierKind::Public]),
            extends: None,
            implements: None,
            generic_parameters: None,
            body: Block::default(),
        }
    }

    /// Model type of the declaration.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_node.type_id()
    }
}

/// Class declaration.
#[derive(Debug, Clone)]
pub struct ClassDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Declaration parts.
    pub shape: DeclarationShape,
}

/// Interface declaration.
#[derive(Debug, Clone)]
pub struct InterfaceDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Declaration parts.
    pub shape: DeclarationShape,
}

/// Enum declaration.
#[derive(Debug, Clone)]
pub struct EnumDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Declaration parts.
    pub shape: DeclarationShape,
}

/// Class, interface or enum declaration, borrowed.
#[derive(Debug, Clone, Copy)]
pub enum ObjectDeclaration<'a> {
    /// Class.
    Class(&'a ClassDeclaration),
    /// Interface.
    Interface(&'a InterfaceDeclaration),
    /// Enum.
    Enum(&'a EnumDeclaration),
}

impl<'a> ObjectDeclaration<'a> {
    /// Shared declaration parts.
    #[must_use]
    pub const fn shape(&self) -> &'a DeclarationShape {
        match self {
            Self::Class(n) => &n.shape,
            Self::Interface(n) => &n.shape,
            Self::Enum(n) => &n.shape,
        }
    }

    /// Id slot of the declaration.
    #[must_use]
    pub const fn id_slot(&self) -> &'a IdSlot {
        match self {
            Self::Class(n) => &n.id,
            Self::Interface(n) => &n.id,
            Self::Enum(n) => &n.id,
        }
    }
}

/// Member variable.
#[derive(Debug, Clone)]
pub struct Field {
    /// Node id.
    pub id: IdSlot,
    /// Name.
    pub identifier: Identifier,
    /// Type; may differ from the property type after local adjustments.
    pub type_node: TypeNode,
    /// Initial value.
    pub initializer: Option<Box<Node>>,
    /// Documentation.
    pub comments: Option<Comment>,
    /// Modifiers.
    pub modifiers: ModifierList,
    /// Property the field was created from.
    pub property: Option<Property>,
}

impl Field {
    /// Creates a private field.
    #[must_use]
    pub fn new(type_node: TypeNode, identifier: Identifier) -> Self {
        Self {
            id: IdSlot::new(),
            identifier,
            type_node,
            initializer: None,
            comments: None,
            modifiers: ModifierList::of(&[ModifierKind::Private]),
            property: None,
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &[ModifierKind]) -> Self {
        self.modifiers = ModifierList::of(modifiers);
        self
    }

    /// Sets the initializer.
    #[must_use]
    pub fn with_initializer(mut self, initializer: Node) -> Self {
        self.initializer = Some(Box::new(initializer));
        self
    }

    /// Returns true for `final` or `readonly` fields.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        self.modifiers.has(ModifierKind::Final) || self.modifiers.has(ModifierKind::Readonly)
    }
}

/// Method parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Node id.
    pub id: IdSlot,
    /// Type.
    pub type_node: TypeNode,
    /// Name.
    pub identifier: Identifier,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub const fn new(type_node: TypeNode, identifier: Identifier) -> Self {
        Self {
            id: IdSlot::new(),
            type_node,
            identifier,
        }
    }
}

/// Method parameters.
#[derive(Debug, Clone, Default)]
pub struct ParameterList {
    /// Node id.
    pub id: IdSlot,
    /// Parameters.
    pub children: Vec<Parameter>,
}

impl ParameterList {
    /// Creates a list.
    #[must_use]
    pub fn new(children: Vec<Parameter>) -> Self {
        Self {
            id: IdSlot::new(),
            children,
        }
    }
}

/// Constructor parameter tied to the field it initializes.
#[derive(Debug, Clone)]
pub struct ConstructorParameter {
    /// Node id.
    pub id: IdSlot,
    /// Field the parameter is for.
    pub field_ref: FieldReference,
    /// Type.
    pub type_node: TypeNode,
    /// Name.
    pub identifier: Identifier,
}

impl ConstructorParameter {
    /// Creates a constructor parameter.
    #[must_use]
    pub const fn new(
        field_ref: FieldReference,
        type_node: TypeNode,
        identifier: Identifier,
    ) -> Self {
        Self {
            id: IdSlot::new(),
            field_ref,
            type_node,
            identifier,
        }
    }
}

/// Constructor parameters.
#[derive(Debug, Clone, Default)]
pub struct ConstructorParameterList {
    /// Node id.
    pub id: IdSlot,
    /// Parameters.
    pub children: Vec<ConstructorParameter>,
}

/// Constructor.
#[derive(Debug, Clone)]
pub struct ConstructorDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Parameters.
    pub parameters: ConstructorParameterList,
    /// Body.
    pub body: Block,
    /// Documentation.
    pub comments: Option<Comment>,
    /// Modifiers.
    pub modifiers: ModifierList,
}

impl ConstructorDeclaration {
    /// Creates a public constructor.
    #[must_use]
    pub fn new(parameters: Vec<ConstructorParameter>, body: Block) -> Self {
        Self {
            id: IdSlot::new(),
            parameters: ConstructorParameterList {
                id: IdSlot::new(),
                children: parameters,
            },
            body,
            comments: None,
            modifiers: ModifierList::of(&[ModifierKind::Public]),
        }
    }
}

/// Method signature.
#[derive(Debug, Clone)]
pub struct MethodDeclarationSignature {
    /// Node id.
    pub id: IdSlot,
    /// Name.
    pub identifier: MethodName,
    /// Return type.
    pub type_node: TypeNode,
    /// Documentation.
    pub comments: Option<Comment>,
    /// Modifiers.
    pub modifiers: ModifierList,
    /// Parameters.
    pub parameters: ParameterList,
    /// Generic parameters.
    pub generic_parameters: Option<GenericTypeDeclarationList>,
    /// Declared thrown types.
    pub throws: Option<crate::node::TypeList>,
}

impl MethodDeclarationSignature {
    /// Creates a public signature.
    #[must_use]
    pub fn new(identifier: MethodName, type_node: TypeNode, parameters: Vec<Parameter>) -> Self {
        Self {
            id: IdSlot::new(),
            identifier,
            type_node,
            comments: None,
            modifiers: ModifierList::of(&[ModifierKind::Public]),
            parameters: ParameterList::new(parameters),
            generic_parameters: None,
            throws: None,
        }
    }

    /// Replaces the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: &[ModifierKind]) -> Self {
        self.modifiers = ModifierList::of(modifiers);
        self
    }
}

/// Method with a body.
#[derive(Debug, Clone)]
pub struct MethodDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Signature.
    pub signature: MethodDeclarationSignature,
    /// Body.
    pub body: Block,
}

impl MethodDeclaration {
    /// Creates a method.
    #[must_use]
    pub const fn new(signature: MethodDeclarationSignature, body: Block) -> Self {
        Self {
            id: IdSlot::new(),
            signature,
            body,
        }
    }
}

/// Method without a body.
#[derive(Debug, Clone)]
pub struct AbstractMethodDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Signature.
    pub signature: MethodDeclarationSignature,
}

/// Getter returning a field.
#[derive(Debug, Clone)]
pub struct FieldBackedGetter {
    /// Node id.
    pub id: IdSlot,
    /// Returned field.
    pub field_ref: FieldReference,
    /// Documentation.
    pub comments: Option<Comment>,
    /// Explicit getter name.
    pub getter_name: Option<Identifier>,
}

impl FieldBackedGetter {
    /// Creates a getter.
    #[must_use]
    pub const fn new(field_ref: FieldReference) -> Self {
        Self {
            id: IdSlot::new(),
            field_ref,
            comments: None,
            getter_name: None,
        }
    }
}

/// Setter assigning a field.
#[derive(Debug, Clone)]
pub struct FieldBackedSetter {
    /// Node id.
    pub id: IdSlot,
    /// Assigned field.
    pub field_ref: FieldReference,
    /// Documentation.
    pub comments: Option<Comment>,
    /// Explicit setter name.
    pub identifier: Option<Identifier>,
}

impl FieldBackedSetter {
    /// Creates a setter.
    #[must_use]
    pub const fn new(field_ref: FieldReference) -> Self {
        Self {
            id: IdSlot::new(),
            field_ref,
            comments: None,
            identifier: None,
        }
    }
}

/// Enum constant.
#[derive(Debug, Clone)]
pub struct EnumItem {
    /// Node id.
    pub id: IdSlot,
    /// Constant name.
    pub identifier: Identifier,
    /// Constant value.
    pub value: Literal,
    /// Documentation.
    pub comments: Option<Comment>,
}

impl EnumItem {
    /// Creates an undocumented constant.
    #[must_use]
    pub fn new(identifier: Identifier, value: Literal) -> Self {
        Self {
            id: IdSlot::new(),
            identifier,
            value,
            comments: None,
        }
    }
}

/// Enum constants.
#[derive(Debug, Clone, Default)]
pub struct EnumItemList {
    /// Node id.
    pub id: IdSlot,
    /// Constants.
    pub children: Vec<EnumItem>,
}

/// Sequence of statements or members.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Node id.
    pub id: IdSlot,
    /// Children.
    pub children: Vec<Node>,
}

impl Block {
    /// Creates a block.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            id: IdSlot::new(),
            children,
        }
    }
}

/// Block wrapped by a namespace.
#[derive(Debug, Clone)]
pub struct NamespaceBlock {
    /// Node id.
    pub id: IdSlot,
    /// Contents.
    pub block: Block,
}

/// Explicit namespace inside a compilation unit.
#[derive(Debug, Clone)]
pub struct Namespace {
    /// Node id.
    pub id: IdSlot,
    /// Namespace name.
    pub name: Identifier,
    /// Contents.
    pub block: NamespaceBlock,
}

/// Local variable.
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    /// Node id.
    pub id: IdSlot,
    /// Name.
    pub identifier: Identifier,
    /// Initial value.
    pub initializer: Option<Box<Node>>,
    /// Explicit type; inferred when absent.
    pub type_node: Option<TypeNode>,
    /// Whether the variable is a constant.
    pub constant: bool,
}

impl VariableDeclaration {
    /// Creates a variable.
    #[must_use]
    pub fn new(identifier: Identifier, initializer: Node, type_node: Option<TypeNode>) -> Self {
        Self {
            id: IdSlot::new(),
            identifier,
            initializer: Some(Box::new(initializer)),
            type_node,
            constant: false,
        }
    }
}
