//! Nesting of declarations that only one other declaration uses.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::ops::ControlFlow;

use irongen_ast::node::{
    EdgeType, ExtendsDeclaration, ImplementsDeclaration, ModifierKind, Node,
};
use irongen_ast::visit::{self, Visitor};
use irongen_ast::CodeRoot;
use irongen_model::{TypeDef, TypeId, TypeModel};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;
use crate::transform::declarations;
use crate::util;

/// Moves a declaration used by exactly one other declaration into that one as a
/// static nested declaration.
///
/// Interfaces and types that appear in an extends or implements clause stay top
/// level. A type whose only user is itself being moved stays too.
#[derive(Debug, Clone, Copy, Default)]
pub struct InnerTypeCompression;

impl Transformer for InnerTypeCompression {
    fn name(&self) -> &'static str {
        "InnerTypeCompression"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        if !options.compress_solo_referenced_types {
            return Ok(());
        }
        let moves = plan(root);
        if moves.is_empty() {
            return Ok(());
        }
        debug!(moves = moves.len(), "compressing solo referenced types");

        util::with_children(root, |root, children| {
            let mut nested: HashMap<TypeId, Vec<Node>> = HashMap::new();
            let mut kept = Vec::with_capacity(children.len());
            for node in std::mem::take(children) {
                match node {
                    Node::CompilationUnit(mut unit) if unit.children.len() == 1 => {
                        let user = unit.children[0]
                            .shape()
                            .and_then(|s| s.type_id())
                            .and_then(|t| moves.get(&t).copied());
                        match user {
                            Some(user) => {
                                let mut declaration = unit.children.remove(0);
                                if let Some(shape) = declaration.shape_mut() {
                                    trace!(
                                        declaration = %shape.name.value,
                                        user = %root.model().describe(user),
                                        "nesting"
                                    );
                                    shape.modifiers.add(ModifierKind::Static);
                                }
                                nested.entry(user).or_default().push(declaration);
                            }
                            None => kept.push(Node::CompilationUnit(unit)),
                        }
                    }
                    other => kept.push(other),
                }
            }

            util::for_each_declaration_mut(&mut kept, &mut |node| {
                let Some(shape) = node.shape_mut() else {
                    return Ok(());
                };
                if let Some(moved) = shape.type_id().and_then(|t| nested.remove(&t)) {
                    shape.body.children.extend(moved);
                }
                Ok(())
            })?;

            for (user, declarations) in nested {
                warn!(
                    user = %root.model().describe(user),
                    count = declarations.len(),
                    "compression target not found; keeping declarations top level"
                );
                for mut declaration in declarations {
                    let Some(type_id) = declaration.shape_mut().and_then(|shape| {
                        shape.modifiers.remove(ModifierKind::Static);
                        shape.type_id()
                    }) else {
                        continue;
                    };
                    kept.push(declarations::unit_for(root, type_id, declaration, options));
                }
            }
            *children = kept;
            Ok(())
        })
    }
}

/// Maps each movable type to the declaration that will hold it.
fn plan(root: &CodeRoot) -> HashMap<TypeId, TypeId> {
    let model = root.model();
    let top_level: Vec<(TypeId, &Node)> = root
        .children()
        .iter()
        .filter_map(|node| match node {
            Node::CompilationUnit(unit) if unit.children.len() == 1 => {
                let declaration = &unit.children[0];
                declaration
                    .shape()
                    .and_then(|s| s.type_id())
                    .map(|t| (t, declaration))
            }
            _ => None,
        })
        .collect();

    let mut users: HashMap<TypeId, HashSet<TypeId>> = HashMap::new();
    let mut supertypes = HashSet::new();
    for (owner, declaration) in &top_level {
        let mut uses = TypeUses::new(model);
        let _ = uses.visit_node(declaration);
        for used in uses.found {
            if used != *owner {
                users.entry(used).or_default().insert(*owner);
            }
        }
        supertypes.extend(uses.supertypes);
    }

    let candidates: HashMap<TypeId, TypeId> = top_level
        .iter()
        .filter(|(type_id, declaration)| {
            !matches!(declaration, Node::InterfaceDeclaration(_))
                && !matches!(model.get(*type_id), TypeDef::Interface(_))
                && !supertypes.contains(type_id)
        })
        .filter_map(|(type_id, _)| match users.get(type_id) {
            Some(users) if users.len() == 1 => users.iter().next().map(|user| (*type_id, *user)),
            _ => None,
        })
        .collect();

    candidates
        .iter()
        .filter(|(_, user)| !candidates.contains_key(*user))
        .map(|(t, u)| (*t, *u))
        .collect()
}

/// Declared types mentioned by a subtree, split out for supertype clauses.
struct TypeUses<'a> {
    model: &'a TypeModel,
    in_supertype: bool,
    found: HashSet<TypeId>,
    supertypes: HashSet<TypeId>,
}

impl<'a> TypeUses<'a> {
    fn new(model: &'a TypeModel) -> Self {
        Self {
            model,
            in_supertype: false,
            found: HashSet::new(),
            supertypes: HashSet::new(),
        }
    }
}

impl Visitor for TypeUses<'_> {
    type Break = Infallible;

    fn visit_edge_type(&mut self, node: &EdgeType) -> ControlFlow<Infallible> {
        let declared = util::declared_type_of(self.model, node.type_id);
        self.found.insert(declared);
        if self.in_supertype {
            self.supertypes.insert(declared);
        }
        visit::visit_edge_type(self, node)
    }

    fn visit_extends_declaration(&mut self, node: &ExtendsDeclaration) -> ControlFlow<Infallible> {
        self.in_supertype = true;
        let flow = visit::visit_extends_declaration(self, node);
        self.in_supertype = false;
        flow
    }

    fn visit_implements_declaration(
        &mut self,
        node: &ImplementsDeclaration,
    ) -> ControlFlow<Infallible> {
        self.in_supertype = true;
        let flow = visit::visit_implements_declaration(self, node);
        self.in_supertype = false;
        flow
    }
}
