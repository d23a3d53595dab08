//! Structural differences between types.
//!
//! Two types with no differences are interchangeable. Callers decide which
//! difference kinds they can live with, for example a target without literal types
//! treats `"a"` and `string` as the same type.

use serde::{Deserialize, Serialize};

use crate::model::TypeModel;
use crate::types::{TypeDef, TypeId};

/// Kind of difference between two types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDiffKind {
    /// Different variants or different primitive kinds.
    Kind,
    /// Distinct named types.
    Identity,
    /// Same type, but only one side accepts null.
    Nullability,
    /// One side is a literal, the other the general type.
    ConcreteVsAbstract,
    /// Both sides are literals with different values.
    PolymorphicLiteral,
}

/// Lists the differences between two types, empty when they are equal.
#[must_use]
pub fn diff(model: &TypeModel, a: TypeId, b: TypeId) -> Vec<TypeDiffKind> {
    let mut out = Vec::new();
    collect(model, a, b, &mut out, 0);
    out.sort_by_key(|d| *d as u8);
    out.dedup();
    out
}

/// Returns true if every difference between the types is in `allowed`.
#[must_use]
pub fn is_equivalent(model: &TypeModel, a: TypeId, b: TypeId, allowed: &[TypeDiffKind]) -> bool {
    diff(model, a, b).iter().all(|d| allowed.contains(d))
}

/// Reduces a list of types to one representative per equivalence class, keeping order.
#[must_use]
pub fn distinct(model: &TypeModel, types: &[TypeId], allowed: &[TypeDiffKind]) -> Vec<TypeId> {
    let mut out: Vec<TypeId> = Vec::new();
    for &t in types {
        if !out.iter().any(|&o| is_equivalent(model, o, t, allowed)) {
            out.push(t);
        }
    }
    out
}

fn collect(model: &TypeModel, a: TypeId, b: TypeId, out: &mut Vec<TypeDiffKind>, depth: usize) {
    if a == b {
        return;
    }
    if depth > 32 {
        out.push(TypeDiffKind::Identity);
        return;
    }

    let a = model.undecorated(a);
    let b = model.undecorated(b);
    if a == b {
        return;
    }

    match (model.get(a), model.get(b)) {
        (TypeDef::Primitive(pa), TypeDef::Primitive(pb)) => {
            if pa.kind != pb.kind {
                out.push(TypeDiffKind::Kind);
            }
            if pa.nullable != pb.nullable {
                out.push(TypeDiffKind::Nullability);
            }
            match (pa.constant_value(), pb.constant_value()) {
                (Some(va), Some(vb)) if va != vb => out.push(TypeDiffKind::PolymorphicLiteral),
                (Some(_), None) | (None, Some(_)) => out.push(TypeDiffKind::ConcreteVsAbstract),
                _ => {}
            }
        }
        (TypeDef::Array(aa), TypeDef::Array(ab)) => collect(model, aa.of, ab.of, out, depth + 1),
        (TypeDef::Dictionary(da), TypeDef::Dictionary(db)) => {
            collect(model, da.key, db.key, out, depth + 1);
            collect(model, da.value, db.value, out, depth + 1);
        }
        (TypeDef::GenericTarget(ga), TypeDef::GenericTarget(gb))
            if ga.source == gb.source
                && ga.target_identifiers.len() == gb.target_identifiers.len() =>
        {
            for (ta, tb) in ga.target_identifiers.iter().zip(&gb.target_identifiers) {
                collect(model, ta.type_id, tb.type_id, out, depth + 1);
            }
        }
        (TypeDef::HardcodedReference(ha), TypeDef::HardcodedReference(hb)) => {
            if ha.fqn != hb.fqn {
                out.push(TypeDiffKind::Identity);
            }
        }
        (TypeDef::Unknown(ua), TypeDef::Unknown(ub)) => {
            if ua != ub {
                out.push(TypeDiffKind::Kind);
            }
        }
        (left, right) if left.kind_name() == right.kind_name() => out.push(TypeDiffKind::Identity),
        _ => out.push(TypeDiffKind::Kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArrayType, ObjectType, PrimitiveKind, PrimitiveType};

    #[test]
    fn test_equal_primitives_have_no_diff() {
        let mut model = TypeModel::new("m");
        let a = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::Int)));
        let b = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::Int)));
        assert!(diff(&model, a, b).is_empty());
    }

    #[test]
    fn test_literal_and_nullability_diffs() {
        let mut model = TypeModel::new("m");
        let plain = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::String)));
        let literal = model.add(TypeDef::Primitive(PrimitiveType::constant(
            PrimitiveKind::String,
            "a",
        )));
        let other_literal = model.add(TypeDef::Primitive(PrimitiveType::constant(
            PrimitiveKind::String,
            "b",
        )));
        let nullable = model.add(TypeDef::Primitive(
            PrimitiveType::new(PrimitiveKind::String).nullable(),
        ));

        assert_eq!(
            diff(&model, plain, literal),
            vec![TypeDiffKind::ConcreteVsAbstract]
        );
        assert_eq!(
            diff(&model, literal, other_literal),
            vec![TypeDiffKind::PolymorphicLiteral]
        );
        assert_eq!(diff(&model, plain, nullable), vec![TypeDiffKind::Nullability]);
        assert!(is_equivalent(
            &model,
            plain,
            nullable,
            &[TypeDiffKind::Nullability]
        ));
    }

    #[test]
    fn test_arrays_compare_items() {
        let mut model = TypeModel::new("m");
        let a = model.add(TypeDef::Object(ObjectType::new("A")));
        let b = model.add(TypeDef::Object(ObjectType::new("B")));
        let arr_a = model.add(TypeDef::Array(ArrayType { of: a }));
        let arr_a2 = model.add(TypeDef::Array(ArrayType { of: a }));
        let arr_b = model.add(TypeDef::Array(ArrayType { of: b }));

        assert!(diff(&model, arr_a, arr_a2).is_empty());
        assert_eq!(diff(&model, arr_a, arr_b), vec![TypeDiffKind::Identity]);
    }

    #[test]
    fn test_distinct_keeps_first_of_each_class() {
        let mut model = TypeModel::new("m");
        let int = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::Int)));
        let int2 = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::Int)));
        let text = model.add(TypeDef::Primitive(PrimitiveType::new(PrimitiveKind::String)));

        assert_eq!(distinct(&model, &[int, int2, text], &[]), vec![int, text]);
    }
}
