//! One class, interface or enum declaration per exported type.

use std::collections::HashSet;

use irongen_ast::node::{
    ClassDeclaration, CompilationUnit, DeclarationShape, EnumDeclaration, EnumItem, EnumItemList,
    ExtendsDeclaration, GenericTypeDeclaration, GenericTypeDeclarationList, Identifier,
    ImplementsDeclaration, InterfaceDeclaration, Literal, ModifierKind, Node, PackageDeclaration,
};
use irongen_ast::{CodeRoot, IdSlot, TypeName};
use irongen_model::naming::to_pascal_case;
use irongen_model::{EnumType, TypeDef, TypeId};
use tracing::{debug, trace, warn};

use crate::error::{CodegenError, Result};
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Creates one compilation unit per declarable type reachable from the exports.
///
/// Objects, unions and intersections become classes, enums become enums and
/// interfaces become interfaces. Intersections only used as the supertype of an
/// object are not declared; the object extends their members directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddObjectDeclarations;

impl Transformer for AddObjectDeclarations {
    fn name(&self) -> &'static str {
        "AddObjectDeclarations"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        let model = root.model();
        let mut declared: HashSet<TypeId> = util::declared_types(root.children())
            .into_iter()
            .collect();
        let supertype_intersections: HashSet<TypeId> = model
            .iter()
            .filter_map(|(_, def)| def.as_object().and_then(|o| o.extended_by))
            .filter(|id| matches!(model.get(*id), TypeDef::Intersection(_)))
            .collect();

        let mut units = Vec::new();
        for type_id in model.reachable() {
            if supertype_intersections.contains(&type_id) || !declared.insert(type_id) {
                continue;
            }
            let Some(declaration) = declare(root, type_id)? else {
                continue;
            };
            trace!(declaration = %model.describe(type_id), "declared");
            units.push(unit_for(root, type_id, declaration, options));
        }

        debug!(units = units.len(), "declared types");
        root.children_mut().extend(units);
        Ok(())
    }
}

/// Wraps a declaration into its own compilation unit.
pub(crate) fn unit_for(
    root: &CodeRoot,
    type_id: TypeId,
    declaration: Node,
    options: &CodeOptions,
) -> Node {
    let name = type_name(root, type_id, options);
    let namespace = if name.namespace.is_empty() {
        options.package.clone()
    } else {
        name.namespace.join(".")
    };
    CompilationUnit::new(name.name, PackageDeclaration::new(namespace), declaration).into()
}

fn type_name(root: &CodeRoot, type_id: TypeId, options: &CodeOptions) -> TypeName {
    let model = root.model();
    root.name_resolver()
        .investigate(model, type_id, &options.package)
        .unwrap_or_else(|| TypeName {
            namespace: Vec::new(),
            name: root
                .name_resolver()
                .safe_identifier(&model.virtual_name(type_id)),
        })
}

/// Declaration node for a model type, or `None` when the type is not declared.
///
/// # Errors
/// Returns `CodegenError::Unsupported` for generic interfaces, enums with a
/// supertype and objects that add properties to an enum.
pub(crate) fn declare(root: &CodeRoot, type_id: TypeId) -> Result<Option<Node>> {
    let model = root.model();
    match model.get(type_id) {
        TypeDef::Object(object) => {
            if let Some(enum_type) = util::enum_of(model, type_id) {
                if !object.properties.is_empty() {
                    return Err(CodegenError::unsupported(format!(
                        "{} extends an enum and adds properties",
                        model.describe(type_id)
                    )));
                }
                return Ok(Some(enum_declaration(root, type_id, enum_type)?));
            }
            let mut shape = shape(root, type_id)?;
            if object.is_abstract {
                shape.modifiers.add(ModifierKind::Abstract);
            }
            shape.generic_parameters = generic_parameters(root, type_id);
            Ok(Some(class(shape)))
        }
        TypeDef::Enum(enum_type) => {
            if enum_type.extended_by.is_some() {
                return Err(CodegenError::unsupported(format!(
                    "{} cannot extend another type",
                    model.describe(type_id)
                )));
            }
            Ok(Some(enum_declaration(root, type_id, enum_type)?))
        }
        TypeDef::Interface(interface) => {
            if matches!(model.get(interface.of), TypeDef::GenericTarget(_)) {
                return Err(CodegenError::unsupported(format!(
                    "generic interface {}",
                    model.describe(type_id)
                )));
            }
            Ok(Some(
                InterfaceDeclaration {
                    id: IdSlot::new(),
                    shape: shape(root, type_id)?,
                }
                .into(),
            ))
        }
        TypeDef::Union(_) | TypeDef::ExclusiveUnion(_) | TypeDef::Intersection(_) => {
            Ok(Some(class(shape(root, type_id)?)))
        }
        _ => Ok(None),
    }
}

fn class(shape: DeclarationShape) -> Node {
    ClassDeclaration {
        id: IdSlot::new(),
        shape,
    }
    .into()
}

/// Name, type node and supertype clauses of a declaration.
fn shape(root: &CodeRoot, type_id: TypeId) -> Result<DeclarationShape> {
    let model = root.model();
    let resolver = root.name_resolver();
    let name = model
        .name_of(type_id)
        .unwrap_or_else(|| model.virtual_name(type_id));
    let mut shape = DeclarationShape::new(
        Identifier::with_original(resolver.safe_identifier(&to_pascal_case(&name)), name),
        root.create_type_node(type_id, false),
    );

    let supertypes = root.supertype_resolver().resolve(model, type_id)?;
    if let Some(extends) = supertypes.extends {
        shape.extends = Some(ExtendsDeclaration::new(vec![
            root.create_type_node(extends, false),
        ]));
    }
    let mut implements = Vec::new();
    for interface in supertypes.implements {
        if Some(interface) == supertypes.extends {
            warn!(
                declaration = %model.describe(type_id),
                supertype = %model.describe(interface),
                "supertype is both extended and implemented"
            );
            continue;
        }
        implements.push(root.create_type_node(interface, false));
    }
    if !implements.is_empty() {
        shape.implements = Some(ImplementsDeclaration::new(implements));
    }
    Ok(shape)
}

/// Placeholders of the generic source wrapping an object, if any.
fn generic_parameters(root: &CodeRoot, type_id: TypeId) -> Option<GenericTypeDeclarationList> {
    let model = root.model();
    let placeholders = model.iter().find_map(|(_, def)| match def {
        TypeDef::GenericSource(source) if source.of == type_id => {
            Some(source.source_identifiers.clone())
        }
        _ => None,
    })?;

    let children: Vec<GenericTypeDeclaration> = placeholders
        .into_iter()
        .filter_map(|placeholder| match model.get(placeholder) {
            TypeDef::GenericSourceIdentifier(identifier) => Some(GenericTypeDeclaration {
                id: IdSlot::new(),
                source_identifier: placeholder,
                name: Identifier::new(identifier.placeholder_name.clone()),
                lower_bound: identifier
                    .lower_bound
                    .map(|bound| root.create_type_node(bound, false)),
                upper_bound: None,
            }),
            _ => None,
        })
        .collect();
    (!children.is_empty()).then(|| GenericTypeDeclarationList {
        id: IdSlot::new(),
        children,
    })
}

fn enum_declaration(root: &CodeRoot, type_id: TypeId, enum_type: &EnumType) -> Result<Node> {
    let resolver = root.name_resolver();
    let mut shape = shape(root, type_id)?;
    // Enums cannot extend, so an object standing for its enum drops the clause.
    shape.extends = None;
    let items: Vec<EnumItem> = enum_type
        .members
        .iter()
        .map(|member| {
            EnumItem::new(
                util::enum_item_identifier(resolver, member),
                Literal::typed(member.value.clone(), enum_type.item_kind),
            )
        })
        .collect();
    if !items.is_empty() {
        shape.body.children.push(
            EnumItemList {
                id: IdSlot::new(),
                children: items,
            }
            .into(),
        );
    }
    Ok(EnumDeclaration {
        id: IdSlot::new(),
        shape,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use irongen_model::{
        CompositionType, GenericSourceIdentifierType, GenericSourceType, GenericTargetIdentifier,
        GenericTargetType, InterfaceType, ObjectType, Property,
    };

    fn declare_all(model: irongen_model::TypeModel) -> Result<CodeRoot> {
        let mut root = CodeRoot::new(model);
        AddObjectDeclarations.transform(&mut root, &CodeOptions::default())?;
        Ok(root)
    }

    #[test]
    fn test_one_unit_per_type() {
        let (model, animal, dog, cat) = fixtures::animal_model();
        let root = declare_all(model).expect("declarations");

        assert_eq!(root.children().len(), 3);
        for type_id in [animal, dog, cat] {
            assert!(matches!(
                fixtures::declaration(&root, type_id),
                Node::ClassDeclaration(_)
            ));
        }
        let Node::CompilationUnit(unit) = &root.children()[0] else {
            panic!("expected a compilation unit");
        };
        assert_eq!(unit.package.namespace, "com.zoo");
        assert_eq!(unit.name.as_deref(), Some("Animal"));

        let dog_shape = fixtures::declaration(&root, dog).shape().expect("shape");
        let extends = dog_shape.extends.as_ref().expect("dog extends animal");
        assert_eq!(extends.types.children[0].type_id(), Some(animal));
    }

    #[test]
    fn test_running_twice_adds_nothing() {
        let (model, _, _, _) = fixtures::animal_model();
        let mut root = declare_all(model).expect("declarations");
        AddObjectDeclarations
            .transform(&mut root, &CodeOptions::default())
            .expect("second run");
        assert_eq!(root.children().len(), 3);
    }

    #[test]
    fn test_enum_items_are_constant_cased() {
        let (model, status, phase) = fixtures::status_model();
        let root = declare_all(model).expect("declarations");

        let Node::EnumDeclaration(declaration) = fixtures::declaration(&root, phase) else {
            panic!("expected an enum");
        };
        let Some(Node::EnumItemList(items)) = declaration.shape.body.children.first() else {
            panic!("expected enum items");
        };
        let names: Vec<&str> = items
            .children
            .iter()
            .map(|i| i.identifier.value.as_str())
            .collect();
        assert_eq!(names, ["ACTIVE", "INACTIVE"]);
        assert!(matches!(
            fixtures::declaration(&root, status),
            Node::ClassDeclaration(_)
        ));
    }

    #[test]
    fn test_generic_object_declares_parameters() {
        let (model, boxed, _) = fixtures::generic_model();
        let root = declare_all(model).expect("declarations");

        let shape = fixtures::declaration(&root, boxed).shape().expect("shape");
        let parameters = shape.generic_parameters.as_ref().expect("generic parameters");
        assert_eq!(parameters.children.len(), 1);
        assert_eq!(parameters.children[0].name.value, "T");
    }

    #[test]
    fn test_object_extending_enum_becomes_enum() {
        let (mut model, _, phase) = fixtures::status_model();
        let alias = model.add_exported(TypeDef::Object(ObjectType::new("State").extending(phase)));
        let root = declare_all(model).expect("declarations");
        assert!(matches!(
            fixtures::declaration(&root, alias),
            Node::EnumDeclaration(_)
        ));

        let (mut model, _, phase) = fixtures::status_model();
        let s = fixtures::string(&mut model);
        model.add_exported(TypeDef::Object(
            ObjectType::new("Broken")
                .extending(phase)
                .with_property(Property::new("extra", s)),
        ));
        assert!(matches!(
            declare_all(model),
            Err(CodegenError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_enum_with_supertype_is_unsupported() {
        let (mut model, _, phase) = fixtures::status_model();
        let base = model.add(TypeDef::Object(ObjectType::new("Base")));
        let mut extended = model.get(phase).as_enum().expect("enum").clone();
        extended.extended_by = Some(base);
        model.replace(phase, TypeDef::Enum(extended));

        assert!(matches!(
            declare_all(model),
            Err(CodegenError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_generic_interface_is_unsupported() {
        let mut model = fixtures::empty_model();
        let s = fixtures::string(&mut model);
        let t = model.add(TypeDef::GenericSourceIdentifier(GenericSourceIdentifierType {
            placeholder_name: "T".to_string(),
            lower_bound: None,
        }));
        let boxed = model.add(TypeDef::Object(ObjectType::new("Box")));
        let source = model.add(TypeDef::GenericSource(GenericSourceType {
            of: boxed,
            source_identifiers: vec![t],
        }));
        let target = model.add(TypeDef::GenericTarget(GenericTargetType {
            source,
            target_identifiers: vec![GenericTargetIdentifier {
                source_identifier: t,
                type_id: s,
            }],
        }));
        model.add_exported(TypeDef::Interface(InterfaceType {
            of: target,
            name: Some("IBox".to_string()),
            namespace: None,
        }));

        assert!(matches!(
            declare_all(model),
            Err(CodegenError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_supertype_intersection_is_not_declared() {
        let mut model = fixtures::empty_model();
        let a = model.add(TypeDef::Object(ObjectType::new("A")));
        let named = model.add(TypeDef::Object(ObjectType::new("Named")));
        let named_interface = model.add(TypeDef::Interface(InterfaceType {
            of: named,
            name: None,
            namespace: None,
        }));
        let both = model.add(TypeDef::Intersection(CompositionType::of(vec![
            a,
            named_interface,
        ])));
        let c = model.add_exported(TypeDef::Object(ObjectType::new("C").extending(both)));
        let root = declare_all(model).expect("declarations");

        assert!(util::find_declaration(root.children(), both).is_none());
        let shape = fixtures::declaration(&root, c).shape().expect("shape");
        assert!(shape.extends.is_some());
        assert_eq!(
            shape.implements.as_ref().expect("implements").types.children[0].type_id(),
            Some(named_interface)
        );
    }
}
