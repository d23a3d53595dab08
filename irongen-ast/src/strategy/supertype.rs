use irongen_model::{TypeDef, TypeId, TypeModel};

use crate::error::{AstError, Result};

/// Supertypes of a type, split by how the target language can express them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Supertypes {
    /// The single extended type, if any.
    pub extends: Option<TypeId>,
    /// Implemented interfaces.
    pub implements: Vec<TypeId>,
    /// Class-like supertypes the language cannot extend; their members must be
    /// merged in some other way.
    pub additional: Vec<TypeId>,
}

impl Supertypes {
    /// Returns true if the type has no supertypes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extends.is_none() && self.implements.is_empty() && self.additional.is_empty()
    }
}

/// Splits the supertypes of a type into extends and implements clauses.
pub trait SupertypeResolver {
    /// Resolves the supertypes of `type_id`.
    ///
    /// # Errors
    /// Returns `AstError::Unsupported` when a supertype cannot be expressed.
    fn resolve(&self, model: &TypeModel, type_id: TypeId) -> Result<Supertypes>;
}

/// Single class inheritance with any number of interfaces.
///
/// The members of an intersection are treated as the supertypes of the
/// intersection itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleInheritanceResolver;

impl SupertypeResolver for SingleInheritanceResolver {
    fn resolve(&self, model: &TypeModel, type_id: TypeId) -> Result<Supertypes> {
        let candidates = match model.get(type_id) {
            TypeDef::Intersection(intersection) => intersection.types.clone(),
            _ => model.supertypes(type_id),
        };
        let mut out = Supertypes::default();
        for supertype in candidates {
            if !model.is_supertype_capable(supertype) {
                return Err(AstError::unsupported(format!(
                    "{} cannot be a supertype of {}",
                    model.describe(supertype),
                    model.describe(type_id)
                )));
            }
            if matches!(model.get(model.undecorated(supertype)), TypeDef::Interface(_)) {
                out.implements.push(supertype);
            } else if out.extends.is_none() {
                out.extends = Some(supertype);
            } else {
                out.additional.push(supertype);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irongen_model::{
        CompositionType, InterfaceType, ObjectType, PrimitiveKind, PrimitiveType,
    };

    #[test]
    fn test_interfaces_go_to_implements() {
        let mut model = TypeModel::new("m");
        let animal = model.add(TypeDef::Object(ObjectType::new("Animal")));
        let named = model.add(TypeDef::Object(ObjectType::new("Named")));
        let named_interface = model.add(TypeDef::Interface(InterfaceType {
            of: named,
            name: None,
            namespace: None,
        }));
        let both = model.add(TypeDef::Intersection(CompositionType::of(vec![
            animal,
            named_interface,
        ])));
        let pet = model.add(TypeDef::Object(ObjectType::new("Pet").extending(both)));

        let supertypes = SingleInheritanceResolver
            .resolve(&model, pet)
            .expect("supertypes resolve");
        assert_eq!(supertypes.extends, Some(animal));
        assert_eq!(supertypes.implements, vec![named_interface]);
        assert!(supertypes.additional.is_empty());
    }

    #[test]
    fn test_second_class_is_additional() {
        let mut model = TypeModel::new("m");
        let a = model.add(TypeDef::Object(ObjectType::new("A")));
        let b = model.add(TypeDef::Object(ObjectType::new("B")));
        let both = model.add(TypeDef::Intersection(CompositionType::of(vec![a, b])));
        let c = model.add(TypeDef::Object(ObjectType::new("C").extending(both)));

        let supertypes = SingleInheritanceResolver
            .resolve(&model, c)
            .expect("supertypes resolve");
        assert_eq!(supertypes.extends, Some(a));
        assert_eq!(supertypes.additional, vec![b]);
    }

    #[test]
    fn test_primitive_supertype_is_unsupported() {
        let mut model = TypeModel::new("m");
        let int = model.primitive(PrimitiveType::new(PrimitiveKind::Int));
        let bad = model.add(TypeDef::Object(ObjectType::new("Bad").extending(int)));

        assert!(matches!(
            SingleInheritanceResolver.resolve(&model, bad),
            Err(AstError::Unsupported { .. })
        ));
        let plain = model.add(TypeDef::Object(ObjectType::new("Plain")));
        assert!(SingleInheritanceResolver
            .resolve(&model, plain)
            .expect("no supertypes")
            .is_empty());
    }
}
