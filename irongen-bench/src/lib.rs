//! # IronGen Bench
//!
//! Synthetic type models for IronGen performance testing.

use irongen_model::{
    ArrayType, EnumType, ObjectType, PrimitiveKind, PrimitiveType, Property, TypeDef, TypeModel,
};

/// Builds a model of `objects` exported objects spread over a few namespaces.
///
/// Every object carries primitive, enum and array properties and extends the
/// previous object in its namespace, so the passes see inheritance, shared
/// enums and generic collections.
#[must_use]
pub fn synthetic_model(objects: usize) -> TypeModel {
    let mut model = TypeModel::new("bench");
    let string = model.primitive(PrimitiveType::new(PrimitiveKind::String));
    let int = model.primitive(PrimitiveType::new(PrimitiveKind::Int));
    let strings = model.add(TypeDef::Array(ArrayType { of: string }));
    let status = model.add(TypeDef::Enum(EnumType::of_strings(
        "Status",
        ["active", "suspended", "closed"],
    )));

    let mut previous = [None; 4];
    for index in 0..objects {
        let slot = index % previous.len();
        let mut object = ObjectType::new(format!("Entity{index}"))
            .in_namespace(format!("com.bench.ns{slot}"))
            .described(format!("Synthetic entity number {index}."))
            .with_property(Property::new(format!("label{index}"), string).required())
            .with_property(Property::new(format!("count{index}"), int))
            .with_property(Property::new(format!("status{index}"), status))
            .with_property(Property::new(format!("tags{index}"), strings));
        if let Some(parent) = previous[slot] {
            object = object.extending(parent);
        }
        previous[slot] = Some(model.add_exported(TypeDef::Object(object)));
    }
    model
}

/// Installs a quiet subscriber so instrumented code paths are exercised.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_model_exports_every_object() {
        let model = synthetic_model(10);
        assert_eq!(model.exports().len(), 10);
        irongen_model::validate_model(&model).expect("consistent model");
    }
}
