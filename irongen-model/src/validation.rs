//! Model integrity validation.
//!
//! These checks cover the arena itself (dangling ids, name clashes, malformed
//! generics). They do not judge whether the original schema made sense.

use std::collections::HashSet;

use tracing::debug;

use crate::error::ModelError;
use crate::model::TypeModel;
use crate::types::{EnumType, TypeDef, TypeId};

/// Validates the structural integrity of a model.
///
/// # Arguments
/// * `model` - The model to validate
///
/// # Errors
/// Returns `ModelError` describing the first problem found.
pub fn validate_model(model: &TypeModel) -> Result<(), ModelError> {
    validate_ids(model)?;
    validate_names(model)?;
    for (id, type_def) in model.iter() {
        match type_def {
            TypeDef::Enum(enum_type) => validate_enum(enum_type)?,
            TypeDef::GenericTarget(_) => validate_generic_target(model, id)?,
            _ => {}
        }
    }
    debug!(model = %model.name, types = model.len(), "model validated");
    Ok(())
}

fn validate_ids(model: &TypeModel) -> Result<(), ModelError> {
    for (id, _) in model.iter() {
        let children = referenced_ids(model, id);
        if let Some(bad) = children.iter().find(|c| model.try_get(**c).is_none()) {
            return Err(ModelError::dangling(bad.index(), id.to_string()));
        }
    }
    for export in model.exports() {
        if model.try_get(*export).is_none() {
            return Err(ModelError::dangling(export.index(), "exports"));
        }
    }
    Ok(())
}

// `TypeModel::children` indexes the arena, so dangling ids are gathered without it.
fn referenced_ids(model: &TypeModel, id: TypeId) -> Vec<TypeId> {
    match model.get(id) {
        TypeDef::Object(o) => o
            .extended_by
            .into_iter()
            .chain(o.properties.iter().map(|p| p.type_id))
            .collect(),
        TypeDef::Enum(e) => e.extended_by.into_iter().collect(),
        TypeDef::Array(a) => vec![a.of],
        TypeDef::Dictionary(d) => vec![d.key, d.value],
        TypeDef::Interface(i) => vec![i.of],
        TypeDef::Decorating(d) => vec![d.of],
        TypeDef::GenericSource(g) => std::iter::once(g.of)
            .chain(g.source_identifiers.iter().copied())
            .collect(),
        TypeDef::GenericSourceIdentifier(g) => g.lower_bound.into_iter().collect(),
        TypeDef::GenericTarget(g) => std::iter::once(g.source)
            .chain(
                g.target_identifiers
                    .iter()
                    .flat_map(|t| [t.source_identifier, t.type_id]),
            )
            .collect(),
        other => other
            .as_composition()
            .map(|c| c.types.clone())
            .unwrap_or_default(),
    }
}

fn validate_names(model: &TypeModel) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for (_, type_def) in model.iter() {
        let name = match type_def {
            TypeDef::Object(o) => &o.name,
            TypeDef::Enum(e) => &e.name,
            _ => continue,
        };
        let qualified = match type_def.namespace() {
            Some(ns) => format!("{ns}.{name}"),
            None => name.clone(),
        };
        if !seen.insert(qualified.clone()) {
            return Err(ModelError::DuplicateTypeName { name: qualified });
        }
    }
    Ok(())
}

fn validate_enum(enum_type: &EnumType) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for member in &enum_type.members {
        let key = member.value.to_string();
        if !seen.insert(key.clone()) {
            return Err(ModelError::DuplicateEnumMember {
                enum_name: enum_type.name.clone(),
                value: key,
            });
        }
    }
    Ok(())
}

fn validate_generic_target(model: &TypeModel, id: TypeId) -> Result<(), ModelError> {
    let TypeDef::GenericTarget(target) = model.get(id) else {
        return Ok(());
    };
    let TypeDef::GenericSource(source) = model.get(target.source) else {
        return Err(ModelError::InvalidGenericTarget {
            description: model.describe(id),
            message: "source is not a generic source".to_string(),
        });
    };
    for assigned in &target.target_identifiers {
        if !source.source_identifiers.contains(&assigned.source_identifier) {
            return Err(ModelError::InvalidGenericTarget {
                description: model.describe(id),
                message: format!(
                    "{} is not a placeholder of the source",
                    model.describe(assigned.source_identifier)
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ArrayType, EnumMember, GenericSourceIdentifierType, GenericSourceType,
        GenericTargetIdentifier, GenericTargetType, ObjectType, PrimitiveKind, PrimitiveType,
        PrimitiveValue,
    };

    #[test]
    fn test_valid_model() {
        let mut model = TypeModel::new("m");
        let s = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        model.add_exported(TypeDef::Object(
            ObjectType::new("Pet").with_property(crate::types::Property::new("name", s)),
        ));
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn test_dangling_id() {
        let mut model = TypeModel::new("m");
        model.add(TypeDef::Array(ArrayType { of: TypeId(7) }));
        let err = validate_model(&model).expect_err("dangling id should fail");
        assert!(matches!(err, ModelError::DanglingTypeId { id: 7, .. }));
    }

    #[test]
    fn test_duplicate_names_per_namespace() {
        let mut model = TypeModel::new("m");
        model.add(TypeDef::Object(ObjectType::new("Pet")));
        model.add(TypeDef::Object(ObjectType::new("Pet").in_namespace("other")));
        assert!(validate_model(&model).is_ok());

        model.add(TypeDef::Object(ObjectType::new("Pet")));
        assert!(matches!(
            validate_model(&model),
            Err(ModelError::DuplicateTypeName { .. })
        ));
    }

    #[test]
    fn test_duplicate_enum_member() {
        let mut model = TypeModel::new("m");
        let mut kind = crate::types::EnumType::of_strings("Kind", ["a"]);
        kind.members
            .push(EnumMember::new(PrimitiveValue::String("a".to_string())));
        model.add(TypeDef::Enum(kind));
        assert!(matches!(
            validate_model(&model),
            Err(ModelError::DuplicateEnumMember { .. })
        ));
    }

    #[test]
    fn test_generic_target_with_foreign_placeholder() {
        let mut model = TypeModel::new("m");
        let t = model.add(TypeDef::GenericSourceIdentifier(GenericSourceIdentifierType {
            placeholder_name: "T".to_string(),
            lower_bound: None,
        }));
        let u = model.add(TypeDef::GenericSourceIdentifier(GenericSourceIdentifierType {
            placeholder_name: "U".to_string(),
            lower_bound: None,
        }));
        let of = model.add(TypeDef::Object(ObjectType::new("Box")));
        let source = model.add(TypeDef::GenericSource(GenericSourceType {
            of,
            source_identifiers: vec![t],
        }));
        let s = model.primitive(PrimitiveType::new(PrimitiveKind::String));
        model.add(TypeDef::GenericTarget(GenericTargetType {
            source,
            target_identifiers: vec![GenericTargetIdentifier {
                source_identifier: u,
                type_id: s,
            }],
        }));

        assert!(matches!(
            validate_model(&model),
            Err(ModelError::InvalidGenericTarget { .. })
        ));
    }
}
