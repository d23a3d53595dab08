use std::fmt;

use irongen_model::naming::to_pascal_case;
use irongen_model::{PrimitiveKind, TypeDef, TypeId, TypeModel};

use crate::node::DelegateKind;

/// Namespace and simple name of a declarable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    /// Namespace segments, outermost first.
    pub namespace: Vec<String>,
    /// Simple name.
    pub name: String,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{segment}.")?;
        }
        f.write_str(&self.name)
    }
}

/// Naming rules of a target language.
pub trait NameResolver {
    /// Namespace and name of a type, or `None` when the type is not declarable and
    /// never needs an import.
    fn investigate(
        &self,
        model: &TypeModel,
        type_id: TypeId,
        default_namespace: &str,
    ) -> Option<TypeName>;

    /// Name of the instantiable type behind an abstract one, such as a map
    /// implementation. `None` means the type itself is instantiable.
    fn implementation_of(&self, _model: &TypeModel, _type_id: TypeId) -> Option<TypeName> {
        None
    }

    /// Library type used to spell a delegate.
    fn delegate_name(&self, _kind: DelegateKind) -> Option<TypeName> {
        None
    }

    /// Canonical, fully qualified spelling of a name.
    fn build(&self, name: &TypeName) -> String;

    /// Splits a namespace string into segments.
    fn parse_namespace(&self, namespace: &str) -> Vec<String>;

    /// Returns true if both namespaces are the same for this target.
    fn is_equal_namespace(&self, a: &[String], b: &[String]) -> bool {
        a == b
    }

    /// Returns true if types of this namespace are visible without an import.
    fn is_implicit_namespace(&self, namespace: &[String]) -> bool {
        namespace.is_empty()
    }

    /// Returns true if the word cannot be used as an identifier.
    fn is_reserved_word(&self, word: &str) -> bool;

    /// Makes any string usable as an identifier.
    fn safe_identifier(&self, name: &str) -> String {
        let mut out: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
            .collect();
        if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
            out.insert(0, '_');
        }
        if self.is_reserved_word(&out) {
            out.insert(0, '_');
        }
        out
    }
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

fn library_name(namespace: &str, name: &str) -> TypeName {
    TypeName {
        namespace: namespace.split('.').map(str::to_string).collect(),
        name: name.to_string(),
    }
}

/// Dotted namespaces with Java keywords reserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedNameResolver;

impl NameResolver for DottedNameResolver {
    fn investigate(
        &self,
        model: &TypeModel,
        type_id: TypeId,
        default_namespace: &str,
    ) -> Option<TypeName> {
        let type_def = model.get(type_id);
        match type_def {
            TypeDef::HardcodedReference(reference) => {
                let mut segments = self.parse_namespace(&reference.fqn);
                let name = segments.pop()?;
                Some(TypeName {
                    namespace: segments,
                    name,
                })
            }
            TypeDef::GenericSource(source) => self.investigate(model, source.of, default_namespace),
            TypeDef::GenericTarget(target) => {
                self.investigate(model, target.source, default_namespace)
            }
            TypeDef::Decorating(decorating) => {
                self.investigate(model, decorating.of, default_namespace)
            }
            TypeDef::Dictionary(_) => Some(library_name("java.util", "Map")),
            TypeDef::Primitive(p) if p.kind == PrimitiveKind::Decimal => {
                Some(library_name("java.math", "BigDecimal"))
            }
            TypeDef::Object(_)
            | TypeDef::Enum(_)
            | TypeDef::Interface(_)
            | TypeDef::Union(_)
            | TypeDef::Intersection(_)
            | TypeDef::ExclusiveUnion(_) => {
                let namespace = type_def.namespace().unwrap_or(default_namespace);
                Some(TypeName {
                    namespace: self.parse_namespace(namespace),
                    name: self.safe_identifier(&to_pascal_case(&model.name_of(type_id)?)),
                })
            }
            _ => None,
        }
    }

    fn implementation_of(&self, model: &TypeModel, type_id: TypeId) -> Option<TypeName> {
        match model.get(type_id) {
            TypeDef::Dictionary(_) => Some(library_name("java.util", "HashMap")),
            _ => None,
        }
    }

    fn delegate_name(&self, _kind: DelegateKind) -> Option<TypeName> {
        Some(library_name("java.util.function", "Function"))
    }

    fn build(&self, name: &TypeName) -> String {
        name.to_string()
    }

    fn parse_namespace(&self, namespace: &str) -> Vec<String> {
        namespace
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn is_implicit_namespace(&self, namespace: &[String]) -> bool {
        namespace.is_empty() || namespace == ["java", "lang"]
    }

    fn is_reserved_word(&self, word: &str) -> bool {
        JAVA_KEYWORDS.contains(&word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irongen_model::{DictionaryType, HardcodedReference, ObjectType, PrimitiveType};

    #[test]
    fn test_object_uses_default_namespace() {
        let mut model = TypeModel::new("m");
        let pet = model.add(TypeDef::Object(ObjectType::new("pet_owner")));
        let name = DottedNameResolver
            .investigate(&model, pet, "com.zoo")
            .expect("objects are declarable");
        assert_eq!(name.namespace, vec!["com", "zoo"]);
        assert_eq!(name.name, "PetOwner");
        assert_eq!(DottedNameResolver.build(&name), "com.zoo.PetOwner");
    }

    #[test]
    fn test_hardcoded_reference_is_split() {
        let mut model = TypeModel::new("m");
        let map = model.add(TypeDef::HardcodedReference(HardcodedReference {
            fqn: "java.util.Map".to_string(),
        }));
        let name = DottedNameResolver
            .investigate(&model, map, "com.zoo")
            .expect("hardcoded references are named");
        assert_eq!(name.namespace, vec!["java", "util"]);
        assert_eq!(name.name, "Map");
    }

    #[test]
    fn test_primitives_are_not_declarable() {
        let mut model = TypeModel::new("m");
        let int = model.primitive(PrimitiveType::new(PrimitiveKind::Int));
        assert!(DottedNameResolver.investigate(&model, int, "x").is_none());
    }

    #[test]
    fn test_dictionary_names_map_and_implementation() {
        let mut model = TypeModel::new("m");
        let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        let map = model.add(TypeDef::Dictionary(DictionaryType {
            key: string,
            value: string,
        }));
        let resolver = DottedNameResolver;

        let abstract_name = resolver.investigate(&model, map, "x").expect("map is named");
        assert_eq!(resolver.build(&abstract_name), "java.util.Map");
        let concrete = resolver
            .implementation_of(&model, map)
            .expect("map has an implementation");
        assert_eq!(resolver.build(&concrete), "java.util.HashMap");
        assert!(resolver.implementation_of(&model, string).is_none());
    }

    #[test]
    fn test_safe_identifier() {
        let resolver = DottedNameResolver;
        assert_eq!(resolver.safe_identifier("class"), "_class");
        assert_eq!(resolver.safe_identifier("1st"), "_1st");
        assert_eq!(resolver.safe_identifier("a-b"), "a_b");
        assert_eq!(resolver.safe_identifier("name"), "name");
    }

    #[test]
    fn test_java_lang_is_implicit() {
        let resolver = DottedNameResolver;
        assert!(resolver.is_implicit_namespace(&resolver.parse_namespace("java.lang")));
        assert!(resolver.is_implicit_namespace(&[]));
        assert!(!resolver.is_implicit_namespace(&resolver.parse_namespace("java.util")));
    }
}
