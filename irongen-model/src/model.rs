//! The type model arena.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{
    CompositionType, PrimitiveKind, PrimitiveType, PrimitiveValue, Property, TypeDef, TypeId,
};

/// Arena of type definitions plus the list of types a generation run should export.
///
/// The arena is append-only once generation starts: synthetic types may be added,
/// existing entries are never changed. [`TypeModel::replace`] exists for building
/// cyclic shapes before the model is handed over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeModel {
    /// Model name, used to key types referenced from other models.
    pub name: String,
    types: Vec<TypeDef>,
    exports: Vec<TypeId>,
    /// Qualified-name lookup (rebuilt on deserialization).
    #[serde(skip)]
    type_map: HashMap<String, TypeId>,
}

impl TypeModel {
    /// Creates a new empty model.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a type definition and returns its id.
    pub fn add(&mut self, type_def: TypeDef) -> TypeId {
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.index_name(id, &type_def);
        self.types.push(type_def);
        id
    }

    /// Adds a type definition and marks it exported.
    pub fn add_exported(&mut self, type_def: TypeDef) -> TypeId {
        let id = self.add(type_def);
        self.exports.push(id);
        id
    }

    /// Marks an existing type exported.
    pub fn export(&mut self, id: TypeId) {
        if !self.exports.contains(&id) {
            self.exports.push(id);
        }
    }

    /// Replaces a definition in place, for tying recursive knots while building.
    pub fn replace(&mut self, id: TypeId, type_def: TypeDef) {
        self.index_name(id, &type_def);
        if let Some(slot) = self.types.get_mut(id.index()) {
            *slot = type_def;
        }
    }

    fn index_name(&mut self, id: TypeId, type_def: &TypeDef) {
        if let Some(name) = Self::declared_name(type_def) {
            let key = match type_def.namespace() {
                Some(ns) => format!("{ns}.{name}"),
                None => name.to_string(),
            };
            self.type_map.insert(key, id);
        }
    }

    fn declared_name(type_def: &TypeDef) -> Option<&str> {
        match type_def {
            TypeDef::Object(o) => Some(&o.name),
            TypeDef::Enum(e) => Some(&e.name),
            TypeDef::Interface(i) => i.name.as_deref(),
            other => other.as_composition().and_then(|c| c.name.as_deref()),
        }
    }

    /// Rebuilds the qualified-name lookup map from the arena.
    pub fn build_type_map(&mut self) {
        self.type_map.clear();
        let named: Vec<(TypeId, TypeDef)> = self.iter().map(|(id, t)| (id, t.clone())).collect();
        for (id, type_def) in named {
            self.index_name(id, &type_def);
        }
    }

    /// Returns the definition behind an id.
    ///
    /// # Panics
    /// Panics if the id was not produced by this model.
    #[must_use]
    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    /// Returns the definition behind an id, if it exists.
    #[must_use]
    pub fn try_get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    /// Looks up a named type by (optionally namespace-qualified) name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<TypeId> {
        self.type_map.get(name).copied()
    }

    /// Number of types in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the arena holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates all types with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (TypeId(u32::try_from(i).unwrap_or(u32::MAX)), t))
    }

    /// Exported types.
    #[must_use]
    pub fn exports(&self) -> &[TypeId] {
        &self.exports
    }

    /// Types directly referenced by a type.
    #[must_use]
    pub fn children(&self, id: TypeId) -> Vec<TypeId> {
        match self.get(id) {
            TypeDef::Object(o) => o
                .extended_by
                .into_iter()
                .chain(o.properties.iter().map(|p| p.type_id))
                .collect(),
            TypeDef::Enum(e) => e.extended_by.into_iter().collect(),
            TypeDef::Array(a) => vec![a.of],
            TypeDef::Dictionary(d) => vec![d.key, d.value],
            TypeDef::Union(c)
            | TypeDef::Intersection(c)
            | TypeDef::ExclusiveUnion(c)
            | TypeDef::Negation(c) => c.types.clone(),
            TypeDef::Interface(i) => vec![i.of],
            TypeDef::Decorating(d) => vec![d.of],
            TypeDef::GenericSource(g) => {
                let mut out = vec![g.of];
                out.extend(g.source_identifiers.iter().copied());
                out
            }
            TypeDef::GenericSourceIdentifier(g) => g.lower_bound.into_iter().collect(),
            TypeDef::GenericTarget(g) => {
                let mut out = vec![g.source];
                for target in &g.target_identifiers {
                    out.push(target.source_identifier);
                    out.push(target.type_id);
                }
                out
            }
            TypeDef::Primitive(_)
            | TypeDef::HardcodedReference(_)
            | TypeDef::ExternalReference(_)
            | TypeDef::Unknown(_) => Vec::new(),
        }
    }

    /// Every type reachable from the exports, depth first, each type once.
    ///
    /// With no exports, every type in the arena is a root.
    #[must_use]
    pub fn reachable(&self) -> Vec<TypeId> {
        let roots: Vec<TypeId> = if self.exports.is_empty() {
            self.iter().map(|(id, _)| id).collect()
        } else {
            self.exports.clone()
        };

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for root in roots {
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                if self.try_get(id).is_none() || !seen.insert(id) {
                    continue;
                }
                order.push(id);
                let mut children = self.children(id);
                children.reverse();
                stack.extend(children);
            }
        }
        order
    }

    /// Follows decorating wrappers down to the decorated type.
    #[must_use]
    pub fn undecorated(&self, mut id: TypeId) -> TypeId {
        let mut guard = 0;
        while let TypeDef::Decorating(d) = self.get(id) {
            id = d.of;
            guard += 1;
            if guard > self.types.len() {
                break;
            }
        }
        id
    }

    /// Properties of an object-like type.
    #[must_use]
    pub fn properties_of(&self, id: TypeId) -> &[Property] {
        match self.get(id) {
            TypeDef::Object(o) => &o.properties,
            TypeDef::GenericSource(g) => self.properties_of(g.of),
            TypeDef::Interface(i) => self.properties_of(i.of),
            TypeDef::Decorating(d) => self.properties_of(d.of),
            _ => &[],
        }
    }

    /// Direct supertypes of a type, with intersections flattened.
    #[must_use]
    pub fn supertypes(&self, id: TypeId) -> Vec<TypeId> {
        let extended_by = match self.get(id) {
            TypeDef::Object(o) => o.extended_by,
            TypeDef::Enum(e) => e.extended_by,
            TypeDef::GenericSource(g) => return self.supertypes(g.of),
            TypeDef::Decorating(d) => return self.supertypes(d.of),
            _ => None,
        };

        let Some(extended_by) = extended_by else {
            return Vec::new();
        };

        match self.get(extended_by) {
            TypeDef::Intersection(c) => c.types.clone(),
            _ => vec![extended_by],
        }
    }

    /// Chain of class-like supertypes, nearest first.
    #[must_use]
    pub fn hierarchy(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = id;
        loop {
            let next = self
                .supertypes(current)
                .into_iter()
                .find(|s| !self.get(*s).is_interface());
            match next {
                Some(next) if !chain.contains(&next) && next != id => {
                    chain.push(next);
                    current = next;
                }
                _ => break,
            }
        }
        chain
    }

    /// Returns true if the type can sit in an extends or implements clause.
    #[must_use]
    pub fn is_supertype_capable(&self, id: TypeId) -> bool {
        match self.get(id) {
            TypeDef::Object(_)
            | TypeDef::Interface(_)
            | TypeDef::Enum(_)
            | TypeDef::GenericSource(_)
            | TypeDef::GenericTarget(_)
            | TypeDef::HardcodedReference(_)
            | TypeDef::ExternalReference(_) => true,
            TypeDef::Decorating(d) => self.is_supertype_capable(d.of),
            TypeDef::Intersection(c) => c.types.iter().all(|t| self.is_supertype_capable(*t)),
            _ => false,
        }
    }

    /// Constant value of a type, when it can only ever hold one value.
    #[must_use]
    pub fn constant_value_of(&self, id: TypeId) -> Option<&PrimitiveValue> {
        match self.get(id) {
            TypeDef::Primitive(p) => p.constant_value(),
            TypeDef::Decorating(d) => self.constant_value_of(d.of),
            _ => None,
        }
    }

    /// Returns true if the type is the null primitive.
    #[must_use]
    pub fn is_null(&self, id: TypeId) -> bool {
        matches!(self.get(id), TypeDef::Primitive(p) if p.kind == PrimitiveKind::Null)
    }

    /// Returns the id of an equal primitive, adding it when absent.
    pub fn primitive(&mut self, primitive: PrimitiveType) -> TypeId {
        let wanted = TypeDef::Primitive(primitive);
        if let Some((id, _)) = self.iter().find(|(_, t)| **t == wanted) {
            return id;
        }
        self.add(wanted)
    }

    /// Returns a non-literal, non-nullable primitive of the same kind, or the type itself
    /// when it is not a primitive.
    pub fn generalized(&mut self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeDef::Primitive(p) if p.literal || p.nullable => {
                let kind = p.kind;
                self.primitive(PrimitiveType::new(kind))
            }
            _ => id,
        }
    }

    /// Name of a declarable type.
    #[must_use]
    pub fn name_of(&self, id: TypeId) -> Option<String> {
        match self.get(id) {
            TypeDef::Object(o) => Some(o.name.clone()),
            TypeDef::Enum(e) => Some(e.name.clone()),
            TypeDef::Interface(i) => i
                .name
                .clone()
                .or_else(|| self.name_of(i.of).map(|n| format!("I{n}"))),
            TypeDef::Union(c) | TypeDef::ExclusiveUnion(c) => {
                Some(self.composition_name(c, "Or"))
            }
            TypeDef::Intersection(c) => Some(self.composition_name(c, "And")),
            TypeDef::Negation(c) => Some(
                c.name
                    .clone()
                    .unwrap_or_else(|| format!("Not{}", self.composition_name(c, "Or"))),
            ),
            TypeDef::GenericSource(g) => self.name_of(g.of),
            TypeDef::GenericTarget(g) => self.name_of(g.source),
            TypeDef::Decorating(d) => self.name_of(d.of),
            TypeDef::HardcodedReference(h) => h.fqn.rsplit('.').next().map(str::to_string),
            _ => None,
        }
    }

    fn composition_name(&self, composition: &CompositionType, joiner: &str) -> String {
        composition.name.clone().unwrap_or_else(|| {
            composition
                .types
                .iter()
                .map(|t| self.virtual_name(*t))
                .collect::<Vec<_>>()
                .join(joiner)
        })
    }

    /// Name usable for any type, falling back to a name derived from its structure.
    #[must_use]
    pub fn virtual_name(&self, id: TypeId) -> String {
        if let Some(name) = self.name_of(id) {
            return crate::naming::to_pascal_case(&name);
        }
        match self.get(id) {
            TypeDef::Primitive(p) => match p.constant_value() {
                Some(value) => crate::naming::to_pascal_case(&value.to_string()),
                None => p.kind.name().to_string(),
            },
            TypeDef::Array(a) => format!("{}Array", self.virtual_name(a.of)),
            TypeDef::Dictionary(d) => format!(
                "{}To{}Map",
                self.virtual_name(d.key),
                self.virtual_name(d.value)
            ),
            TypeDef::GenericSourceIdentifier(g) => g.placeholder_name.clone(),
            TypeDef::ExternalReference(e) => format!("{}{}", e.model, e.target.index()),
            _ => "Object".to_string(),
        }
    }

    /// Short human description for logs and errors.
    #[must_use]
    pub fn describe(&self, id: TypeId) -> String {
        match self.try_get(id) {
            Some(def) => format!("{} {} ({id})", def.kind_name(), self.virtual_name(id)),
            None => format!("missing type {id}"),
        }
    }
}
