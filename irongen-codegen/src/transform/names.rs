//! Local names and imports for every type reference.
//!
//! References to a declaration of the same compilation unit use the shortest
//! dotted path from the nearest common enclosing declaration. References to
//! another unit of the same namespace use the full declaration path. Anything
//! else is imported once per unit, keyed by its canonical name.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::ControlFlow;

use irongen_ast::node::{
    CompilationUnit, DeclarationShape, Delegate, DelegateKind, EdgeType, FreeTextTypeLink,
    ImportStatement, Node, TypeNode,
};
use irongen_ast::reduce::{self, Reduced, Reducer};
use irongen_ast::visit::{self, Visitor};
use irongen_ast::{AstError, CodeRoot, IdSlot, NodeId, TypeName};
use irongen_model::{HardcodedReference, TypeDef, TypeId};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::util;

/// Fills in local names and imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveNames;

impl Transformer for ResolveNames {
    fn name(&self) -> &'static str {
        "ResolveNames"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        let delegates = intern_delegates(root);
        util::with_children(root, |root, children| {
            let locations = Locations::build(root, children, options)?;
            let mut names = UnitNames::new(root, &locations, options, delegates);
            *children = reduce::reduce_all(&mut names, std::mem::take(children))?;
            debug!(
                declarations = locations.local.len(),
                imports = names.imported,
                "resolved names"
            );
            Ok(())
        })
    }
}

/// Model types standing for the library types delegates are spelled with.
fn intern_delegates(root: &mut CodeRoot) -> HashMap<String, TypeId> {
    let mut kinds = DelegateKinds::default();
    let _ = root.visit(&mut kinds);

    let mut out = HashMap::new();
    for kind in kinds.found {
        let Some(name) = root.name_resolver().delegate_name(kind) else {
            continue;
        };
        let fqn = root.name_resolver().build(&name);
        if out.contains_key(&fqn) {
            continue;
        }
        let type_id = util::intern(
            root.model_mut(),
            TypeDef::HardcodedReference(HardcodedReference { fqn: fqn.clone() }),
        );
        out.insert(fqn, type_id);
    }
    out
}

#[derive(Default)]
struct DelegateKinds {
    found: Vec<DelegateKind>,
}

impl Visitor for DelegateKinds {
    type Break = std::convert::Infallible;

    fn visit_delegate(&mut self, node: &Delegate) -> ControlFlow<Self::Break> {
        if !self.found.contains(&node.kind) {
            self.found.push(node.kind);
        }
        visit::visit_delegate(self, node)
    }
}

#[derive(Debug, Clone)]
struct Location {
    namespace: Vec<String>,
    path: Vec<String>,
    unit: Option<NodeId>,
}

#[derive(Default)]
struct Locations {
    local: HashMap<TypeId, Location>,
    external: HashMap<(String, TypeId), Location>,
}

impl Locations {
    fn build(root: &CodeRoot, children: &[Node], options: &CodeOptions) -> Result<Self> {
        let package = root.name_resolver().parse_namespace(&options.package);
        let mut locations = Self::default();
        collect(root, children, &package, None, &mut Vec::new(), &mut locations.local)?;

        for external in root.externals() {
            let mut found = HashMap::new();
            collect(external, external.children(), &package, None, &mut Vec::new(), &mut found)?;
            let model = &external.model().name;
            for (type_id, mut location) in found {
                location.unit = None;
                locations.external.insert((model.clone(), type_id), location);
            }
        }
        Ok(locations)
    }
}

fn collect(
    root: &CodeRoot,
    nodes: &[Node],
    namespace: &[String],
    unit: Option<NodeId>,
    path: &mut Vec<String>,
    out: &mut HashMap<TypeId, Location>,
) -> Result<()> {
    for node in nodes {
        match node {
            Node::CompilationUnit(compilation_unit) => {
                let namespace = root
                    .name_resolver()
                    .parse_namespace(&compilation_unit.package.namespace);
                let unit = Some(root.ids().id_of(&compilation_unit.id));
                collect(root, &compilation_unit.children, &namespace, unit, path, out)?;
            }
            Node::Namespace(inner) => {
                let mut namespace = namespace.to_vec();
                namespace.extend(root.name_resolver().parse_namespace(&inner.name.value));
                collect(root, &inner.block.block.children, &namespace, unit, path, out)?;
            }
            Node::Nodes(group) => collect(root, &group.children, namespace, unit, path, out)?,
            _ => {
                let Some(shape) = node.shape() else {
                    continue;
                };
                path.push(shape.name.value.clone());
                if let Some(type_id) = shape.type_id() {
                    let location = Location {
                        namespace: namespace.to_vec(),
                        path: path.clone(),
                        unit,
                    };
                    if out.insert(type_id, location).is_some() {
                        return Err(AstError::DuplicateDeclaration {
                            type_name: root.model().describe(type_id),
                        }
                        .into());
                    }
                }
                collect(root, &shape.body.children, namespace, unit, path, out)?;
                path.pop();
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct Import {
    simple: String,
    name: String,
    type_id: TypeId,
    implementation: bool,
}

/// Name resolution state for the unit being reduced.
struct UnitNames<'a> {
    root: &'a CodeRoot,
    locations: &'a Locations,
    options: &'a CodeOptions,
    delegates: HashMap<String, TypeId>,
    package: Vec<String>,
    namespace: Vec<String>,
    unit: Option<NodeId>,
    unit_names: HashSet<String>,
    scope: Vec<String>,
    imports: BTreeMap<String, Import>,
    imported: usize,
}

impl<'a> UnitNames<'a> {
    fn new(
        root: &'a CodeRoot,
        locations: &'a Locations,
        options: &'a CodeOptions,
        delegates: HashMap<String, TypeId>,
    ) -> Self {
        let package = root.name_resolver().parse_namespace(&options.package);
        Self {
            root,
            locations,
            options,
            delegates,
            namespace: package.clone(),
            package,
            unit: None,
            unit_names: HashSet::new(),
            scope: Vec::new(),
            imports: BTreeMap::new(),
            imported: 0,
        }
    }

    /// Local spelling of a type and the import it needed, if any.
    fn resolve(
        &mut self,
        type_id: TypeId,
        implementation: bool,
    ) -> Option<(String, Option<String>)> {
        let root = self.root;
        let locations = self.locations;
        let model = root.model();
        let resolver = root.name_resolver();

        if implementation {
            if let Some(name) = resolver.implementation_of(model, type_id) {
                return Some(self.library(&name, type_id, true));
            }
        }

        if let TypeDef::ExternalReference(reference) = model.get(type_id) {
            let key = (reference.model.clone(), reference.target);
            return match locations.external.get(&key) {
                Some(location) => Some(self.foreign(location, type_id)),
                None => {
                    warn!(model = %reference.model, "external type is not declared");
                    None
                }
            };
        }

        let declared = util::declared_type_of(model, type_id);
        if let Some(location) = locations.local.get(&declared) {
            if location.unit.is_some() && location.unit == self.unit {
                return Some((self.nested(&location.path), None));
            }
            let nested = self.options.shorten_nested_type_names && location.path.len() > 1;
            if !nested && resolver.is_equal_namespace(&location.namespace, &self.namespace) {
                return Some((location.path.join("."), None));
            }
            return Some(self.foreign(location, declared));
        }

        let name = resolver.investigate(model, type_id, &self.options.package)?;
        Some(self.library(&name, type_id, false))
    }

    fn nested(&self, path: &[String]) -> String {
        let last = path.last().cloned().unwrap_or_default();
        if self.options.shorten_nested_type_names {
            return last;
        }
        let common = self
            .scope
            .iter()
            .zip(path)
            .take_while(|(a, b)| a == b)
            .count();
        if common >= path.len() {
            last
        } else {
            path[common..].join(".")
        }
    }

    fn foreign(&mut self, location: &Location, type_id: TypeId) -> (String, Option<String>) {
        let resolver = self.root.name_resolver();
        let qualified = resolver.build(&TypeName {
            namespace: location.namespace.clone(),
            name: location.path.join("."),
        });
        if resolver.is_implicit_namespace(&location.namespace) {
            return (location.path.join("."), None);
        }

        let (imported, local) = match location.path.split_last() {
            Some((last, outer)) if self.options.shorten_nested_type_names && !outer.is_empty() => {
                let mut namespace = location.namespace.clone();
                namespace.extend(outer.iter().cloned());
                let name = TypeName {
                    namespace,
                    name: last.clone(),
                };
                (name, last.clone())
            }
            _ => {
                let top = location.path.first().cloned().unwrap_or_default();
                let name = TypeName {
                    namespace: location.namespace.clone(),
                    name: top,
                };
                (name, location.path.join("."))
            }
        };
        let import = resolver.build(&imported);
        if self.add_import(&imported.name, &import, type_id, false) {
            (local, Some(import))
        } else {
            (qualified, None)
        }
    }

    fn library(
        &mut self,
        name: &TypeName,
        type_id: TypeId,
        implementation: bool,
    ) -> (String, Option<String>) {
        let resolver = self.root.name_resolver();
        if resolver.is_implicit_namespace(&name.namespace)
            || resolver.is_equal_namespace(&name.namespace, &self.namespace)
        {
            return (name.name.clone(), None);
        }
        let import = resolver.build(name);
        if self.add_import(&name.name, &import, type_id, implementation) {
            (name.name.clone(), Some(import))
        } else {
            (import, None)
        }
    }

    /// Records an import. Returns false when the simple name is already taken by
    /// something else, in which case the caller spells the name out in full.
    fn add_import(
        &mut self,
        simple: &str,
        name: &str,
        type_id: TypeId,
        implementation: bool,
    ) -> bool {
        if let Some(existing) = self.imports.get(simple) {
            if existing.name == name {
                return true;
            }
            warn!(name, taken_by = %existing.name, "import clash; using qualified name");
            return false;
        }
        if self.unit_names.contains(simple) {
            warn!(name, "import clashes with a declaration; using qualified name");
            return false;
        }
        trace!(name, "import");
        self.imports.insert(
            simple.to_string(),
            Import {
                simple: simple.to_string(),
                name: name.to_string(),
                type_id,
                implementation,
            },
        );
        true
    }
}

impl Reducer for UnitNames<'_> {
    fn reduce_compilation_unit(&mut self, node: CompilationUnit) -> Reduced<CompilationUnit> {
        self.namespace = self
            .root
            .name_resolver()
            .parse_namespace(&node.package.namespace);
        self.unit = Some(self.root.ids().id_of(&node.id));
        self.unit_names = node
            .children
            .iter()
            .filter_map(|n| n.shape().map(|s| s.name.value.clone()))
            .collect();
        self.imports.clear();

        let reduced = reduce::reduce_compilation_unit(self, node);

        self.namespace = self.package.clone();
        self.unit = None;
        self.unit_names.clear();
        let imports = std::mem::take(&mut self.imports);
        let Some(mut unit) = reduced? else {
            return Ok(None);
        };

        let mut existing: HashSet<String> = unit
            .imports
            .children
            .iter()
            .filter_map(|i| i.type_node.as_edge().and_then(|e| e.import_name.clone()))
            .collect();
        for import in imports.into_values() {
            if !existing.insert(import.name.clone()) {
                continue;
            }
            self.imported += 1;
            unit.imports.children.push(ImportStatement {
                id: IdSlot::new(),
                type_node: TypeNode::Edge(EdgeType {
                    id: IdSlot::new(),
                    type_id: import.type_id,
                    implementation: import.implementation,
                    local_name: Some(import.simple),
                    import_name: Some(import.name),
                }),
            });
        }
        unit.imports.children.sort_by(|a, b| {
            let name =
                |i: &ImportStatement| i.type_node.as_edge().and_then(|e| e.import_name.clone());
            name(a).cmp(&name(b))
        });
        Ok(Some(unit))
    }

    fn reduce_declaration_shape(&mut self, node: DeclarationShape) -> Reduced<DeclarationShape> {
        self.scope.push(node.name.value.clone());
        let reduced = reduce::reduce_declaration_shape(self, node);
        self.scope.pop();
        reduced
    }

    fn reduce_edge_type(&mut self, mut node: EdgeType) -> Reduced<TypeNode> {
        if let Some((local, import)) = self.resolve(node.type_id, node.implementation) {
            node.local_name = Some(local);
            node.import_name = import;
        }
        Ok(Some(TypeNode::Edge(node)))
    }

    fn reduce_delegate(&mut self, node: Delegate) -> Reduced<TypeNode> {
        if let Some(name) = self.root.name_resolver().delegate_name(node.kind) {
            let fqn = self.root.name_resolver().build(&name);
            if let Some(type_id) = self.delegates.get(&fqn).copied() {
                self.library(&name, type_id, false);
            }
        }
        reduce::reduce_delegate(self, node)
    }

    fn reduce_free_text_type_link(
        &mut self,
        mut node: FreeTextTypeLink,
    ) -> Reduced<FreeTextTypeLink> {
        if let Some((local, _)) = self.resolve(node.type_id, false) {
            node.local_name = Some(local);
        }
        Ok(Some(node))
    }
}
