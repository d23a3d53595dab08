//! Type model definitions.
//!
//! Every type is a [`TypeDef`] stored in a [`crate::TypeModel`] arena and addressed by
//! a [`TypeId`]. Types reference each other through ids only, so recursive shapes
//! (an object whose property is an array of itself) need no shared ownership.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle of a type inside a [`crate::TypeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Returns the arena index of this type.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type definition variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    /// Object with named properties.
    Object(ObjectType),
    /// Primitive scalar, optionally with a constant or default value.
    Primitive(PrimitiveType),
    /// Enumeration of literal values.
    Enum(EnumType),
    /// Homogeneous array.
    Array(ArrayType),
    /// Key/value dictionary.
    Dictionary(DictionaryType),
    /// Any of the member types.
    Union(CompositionType),
    /// All of the member types at once.
    Intersection(CompositionType),
    /// Exactly one of the member types.
    ExclusiveUnion(CompositionType),
    /// None of the member types.
    Negation(CompositionType),
    /// Interface view of another type.
    Interface(InterfaceType),
    /// Wrapper adding metadata to another type.
    Decorating(DecoratingType),
    /// Generic declaration with placeholders.
    GenericSource(GenericSourceType),
    /// Placeholder of a generic declaration.
    GenericSourceIdentifier(GenericSourceIdentifierType),
    /// Instantiation of a generic declaration.
    GenericTarget(GenericTargetType),
    /// Fully qualified type outside of the model.
    HardcodedReference(HardcodedReference),
    /// Type living in another, separately generated model.
    ExternalReference(ExternalReference),
    /// Type with no known structure.
    Unknown(UnknownType),
}

impl TypeDef {
    /// Returns a short lowercase name of the variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Primitive(_) => "primitive",
            Self::Enum(_) => "enum",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
            Self::Union(_) => "union",
            Self::Intersection(_) => "intersection",
            Self::ExclusiveUnion(_) => "exclusive_union",
            Self::Negation(_) => "negation",
            Self::Interface(_) => "interface",
            Self::Decorating(_) => "decorating",
            Self::GenericSource(_) => "generic_source",
            Self::GenericSourceIdentifier(_) => "generic_source_identifier",
            Self::GenericTarget(_) => "generic_target",
            Self::HardcodedReference(_) => "hardcoded_reference",
            Self::ExternalReference(_) => "external_reference",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Returns true if this is an object type.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true if this is a primitive type.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns true if this is an enum type.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }

    /// Returns true if this is an interface type.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    /// Returns true for union, intersection, exclusive union and negation.
    #[must_use]
    pub const fn is_composition(&self) -> bool {
        matches!(
            self,
            Self::Union(_) | Self::Intersection(_) | Self::ExclusiveUnion(_) | Self::Negation(_)
        )
    }

    /// Returns the composition payload when this is a composition.
    #[must_use]
    pub const fn as_composition(&self) -> Option<&CompositionType> {
        match self {
            Self::Union(c)
            | Self::Intersection(c)
            | Self::ExclusiveUnion(c)
            | Self::Negation(c) => {
                Some(c)
            }
            _ => None,
        }
    }

    /// Returns the primitive payload when this is a primitive.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<&PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Returns the object payload when this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the enum payload when this is an enum.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the declared namespace, if the type carries one.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Object(o) => o.namespace.as_deref(),
            Self::Enum(e) => e.namespace.as_deref(),
            Self::Union(c)
            | Self::Intersection(c)
            | Self::ExclusiveUnion(c)
            | Self::Negation(c) => {
                c.namespace.as_deref()
            }
            Self::Interface(i) => i.namespace.as_deref(),
            _ => None,
        }
    }

    /// Returns the human description, if the type carries one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object(o) => o.description.as_deref(),
            Self::Enum(e) => e.description.as_deref(),
            Self::Union(c)
            | Self::Intersection(c)
            | Self::ExclusiveUnion(c)
            | Self::Negation(c) => {
                c.description.as_deref()
            }
            Self::Decorating(d) => d.description.as_deref(),
            _ => None,
        }
    }
}

/// Object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Type name.
    pub name: String,
    /// Optional namespace override, dotted.
    pub namespace: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Supertype this object extends.
    pub extended_by: Option<TypeId>,
    /// Properties, in declaration order.
    pub properties: Vec<Property>,
    /// Whether the object cannot be instantiated on its own.
    pub is_abstract: bool,
}

impl ObjectType {
    /// Creates an empty object type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            description: None,
            extended_by: None,
            properties: Vec::new(),
            is_abstract: false,
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Sets the supertype.
    #[must_use]
    pub fn extending(mut self, supertype: TypeId) -> Self {
        self.extended_by = Some(supertype);
        self
    }

    /// Sets the namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the object abstract.
    #[must_use]
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

/// Object property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name as written in the schema.
    pub name: String,
    /// Property type.
    pub type_id: TypeId,
    /// Whether a value must be present.
    pub required: bool,
    /// Whether the value may only be read.
    pub read_only: bool,
    /// Whether the property is implied by a supertype and not declared again.
    pub hidden: bool,
    /// Whether a subtype must provide the property.
    pub is_abstract: bool,
    /// Description.
    pub description: Option<String>,
}

impl Property {
    /// Creates a plain optional property.
    #[must_use]
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            required: false,
            read_only: false,
            hidden: false,
            is_abstract: false,
            description: None,
        }
    }

    /// Marks the property required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the property read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Marks the property hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks the property abstract.
    #[must_use]
    pub fn abstract_property(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// Absence of a value.
    Null,
    /// No value at all, only valid as a return type.
    Void,
    /// Boolean.
    Bool,
    /// Single character.
    Char,
    /// Text.
    String,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Arbitrary precision decimal.
    Decimal,
    /// Any number.
    Number,
}

impl PrimitiveKind {
    /// Returns the display name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Void => "Void",
            Self::Bool => "Bool",
            Self::Char => "Char",
            Self::String => "String",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Decimal => "Decimal",
            Self::Number => "Number",
        }
    }
}

/// Value carried by a primitive or an enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimitiveValue {
    /// Null literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal.
    String(String),
}

impl PrimitiveValue {
    /// Returns the primitive kind that naturally holds this value.
    #[must_use]
    pub const fn natural_kind(&self) -> PrimitiveKind {
        match self {
            Self::Null => PrimitiveKind::Null,
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Int(_) => PrimitiveKind::Int,
            Self::Float(_) => PrimitiveKind::Double,
            Self::String(_) => PrimitiveKind::String,
        }
    }
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for PrimitiveValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for PrimitiveValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Primitive type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveType {
    /// Primitive kind.
    pub kind: PrimitiveKind,
    /// Constant (when `literal`) or default value.
    pub value: Option<PrimitiveValue>,
    /// Whether `value` is the only value the type can hold.
    pub literal: bool,
    /// Whether null is accepted.
    pub nullable: bool,
}

impl PrimitiveType {
    /// Creates a non-nullable primitive without a value.
    #[must_use]
    pub const fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            value: None,
            literal: false,
            nullable: false,
        }
    }

    /// Creates a primitive that can only hold `value`.
    #[must_use]
    pub fn constant(kind: PrimitiveKind, value: impl Into<PrimitiveValue>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            literal: true,
            nullable: false,
        }
    }

    /// Marks the primitive nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Returns the constant value when the primitive is a literal.
    #[must_use]
    pub fn constant_value(&self) -> Option<&PrimitiveValue> {
        if self.literal { self.value.as_ref() } else { None }
    }
}

/// Enum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    /// Type name.
    pub name: String,
    /// Optional namespace override, dotted.
    pub namespace: Option<String>,
    /// Primitive kind of the member values.
    pub item_kind: PrimitiveKind,
    /// Members.
    pub members: Vec<EnumMember>,
    /// Supertype, which enums cannot honour.
    pub extended_by: Option<TypeId>,
    /// Description.
    pub description: Option<String>,
}

impl EnumType {
    /// Creates an enum from string values.
    #[must_use]
    pub fn of_strings<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            namespace: None,
            item_kind: PrimitiveKind::String,
            members: values
                .into_iter()
                .map(|v| EnumMember::new(PrimitiveValue::String(v.into())))
                .collect(),
            extended_by: None,
            description: None,
        }
    }
}

/// Enum member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member value.
    pub value: PrimitiveValue,
    /// Explicit member name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl EnumMember {
    /// Creates an unnamed member.
    #[must_use]
    pub const fn new(value: PrimitiveValue) -> Self {
        Self {
            value,
            name: None,
            description: None,
        }
    }
}

/// Array type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    /// Item type.
    pub of: TypeId,
}

/// Dictionary type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryType {
    /// Key type.
    pub key: TypeId,
    /// Value type.
    pub value: TypeId,
}

/// Payload shared by all composition kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionType {
    /// Explicit name.
    pub name: Option<String>,
    /// Optional namespace override, dotted.
    pub namespace: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Member types.
    pub types: Vec<TypeId>,
}

impl CompositionType {
    /// Creates an unnamed composition.
    #[must_use]
    pub fn of(types: impl Into<Vec<TypeId>>) -> Self {
        Self {
            name: None,
            namespace: None,
            description: None,
            types: types.into(),
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Interface type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceType {
    /// Type the interface describes.
    pub of: TypeId,
    /// Explicit name; defaults to `I` followed by the name of `of`.
    pub name: Option<String>,
    /// Optional namespace override, dotted.
    pub namespace: Option<String>,
}

/// Decorating type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratingType {
    /// Decorated type.
    pub of: TypeId,
    /// Description.
    pub description: Option<String>,
}

/// Generic declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericSourceType {
    /// Object made generic.
    pub of: TypeId,
    /// Placeholders, each a [`TypeDef::GenericSourceIdentifier`].
    pub source_identifiers: Vec<TypeId>,
}

/// Generic placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericSourceIdentifierType {
    /// Placeholder name, such as `T`.
    pub placeholder_name: String,
    /// Bound the placeholder must satisfy.
    pub lower_bound: Option<TypeId>,
}

/// Generic instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericTargetType {
    /// Instantiated [`TypeDef::GenericSource`].
    pub source: TypeId,
    /// Assigned placeholders.
    pub target_identifiers: Vec<GenericTargetIdentifier>,
}

/// Assignment of one placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericTargetIdentifier {
    /// Placeholder being assigned.
    pub source_identifier: TypeId,
    /// Assigned type.
    pub type_id: TypeId,
}

/// Fully qualified type outside of the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardcodedReference {
    /// Fully qualified name, dotted.
    pub fqn: String,
}

/// Reference into another model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalReference {
    /// Name of the other model.
    pub model: String,
    /// Type inside the other model.
    pub target: TypeId,
}

/// Type with no known structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnknownType {
    /// Flavour of the unknown value.
    pub unknown_kind: UnknownKind,
}

/// Flavour of an unknown type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKind {
    /// Arbitrary structured value.
    #[default]
    DynamicObject,
    /// Anything at all.
    Any,
    /// Wildcard in a generic position.
    Wildcard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_value_requires_literal() {
        let default_only = PrimitiveType {
            kind: PrimitiveKind::Int,
            value: Some(PrimitiveValue::Int(1)),
            literal: false,
            nullable: false,
        };
        assert!(default_only.constant_value().is_none());

        let constant = PrimitiveType::constant(PrimitiveKind::String, "x");
        assert_eq!(
            constant.constant_value(),
            Some(&PrimitiveValue::String("x".to_string()))
        );
    }

    #[test]
    fn test_type_def_kind_checks() {
        let def = TypeDef::ExclusiveUnion(CompositionType::of(vec![]));
        assert!(def.is_composition());
        assert!(!def.is_object());
        assert_eq!(def.kind_name(), "exclusive_union");
        assert!(def.as_composition().is_some());
    }

    #[test]
    fn test_object_builder() {
        let obj = ObjectType::new("Pet")
            .with_property(Property::new("name", TypeId(0)).required())
            .in_namespace("com.zoo")
            .abstract_type();
        assert_eq!(obj.properties.len(), 1);
        assert!(obj.properties[0].required);
        assert_eq!(obj.namespace.as_deref(), Some("com.zoo"));
        assert!(obj.is_abstract);
    }

    #[test]
    fn test_primitive_value_display() {
        assert_eq!(PrimitiveValue::Int(3).to_string(), "3");
        assert_eq!(PrimitiveValue::Null.to_string(), "null");
        assert_eq!(PrimitiveValue::from("a").to_string(), "a");
    }
}
