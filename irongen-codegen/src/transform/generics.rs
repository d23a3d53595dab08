//! Inlining of generic parameters that always resolve to one type.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::ops::ControlFlow;

use irongen_ast::node::{EdgeType, GenericType, GenericTypeDeclaration, TypeNode};
use irongen_ast::reduce::{self, Reduced, Reducer};
use irongen_ast::visit::{self, Visitor};
use irongen_ast::CodeRoot;
use irongen_model::diff::{distinct, TypeDiffKind};
use irongen_model::{TypeDef, TypeId, TypeModel};
use tracing::{debug, trace};

use crate::error::Result;
use crate::options::CodeOptions;
use crate::pipeline::Transformer;

/// Inlines generic parameters that only ever receive one type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyGenerics;

impl Transformer for SimplifyGenerics {
    fn name(&self) -> &'static str {
        "SimplifyGenerics"
    }

    fn transform(&self, root: &mut CodeRoot, options: &CodeOptions) -> Result<()> {
        if options.simplify_generics {
            simplify(root, options)?;
        }
        Ok(())
    }
}

/// Replaces every declared placeholder whose instantiations all agree on one type,
/// up to the differences the options allow. Returns the number of rewritten nodes;
/// a second run over the result returns zero.
///
/// # Errors
/// Returns an error if the tree cannot be rebuilt.
pub fn simplify(root: &mut CodeRoot, options: &CodeOptions) -> Result<usize> {
    let mut uses = PlaceholderUses::new(root.model());
    let _ = root.visit(&mut uses);

    let mut allowed = vec![TypeDiffKind::ConcreteVsAbstract, TypeDiffKind::PolymorphicLiteral];
    if !options.allow_primitive_generics {
        allowed.push(TypeDiffKind::Nullability);
    }

    let mut inlined = Vec::new();
    for placeholder in &uses.declared {
        if uses.blocked.contains(placeholder) {
            continue;
        }
        let Some(args) = uses.args.get(placeholder) else {
            continue;
        };
        if let [only] = distinct(root.model(), args, &allowed)[..] {
            inlined.push((*placeholder, only));
        }
    }
    if inlined.is_empty() {
        return Ok(0);
    }

    let mut replacements = HashMap::new();
    for (placeholder, arg) in inlined {
        let general = root.model_mut().generalized(arg);
        trace!(
            placeholder = %root.model().describe(placeholder),
            with = %root.model().describe(general),
            "inlining generic parameter"
        );
        replacements.insert(placeholder, root.create_type_node(general, false));
    }

    let mut simplifier = Simplifier {
        replacements,
        changes: 0,
    };
    root.reduce(&mut simplifier)?;
    debug!(changes = simplifier.changes, "simplified generics");
    Ok(simplifier.changes)
}

/// Arguments each placeholder receives across the tree.
struct PlaceholderUses<'a> {
    model: &'a TypeModel,
    declared: Vec<TypeId>,
    args: HashMap<TypeId, Vec<TypeId>>,
    blocked: HashSet<TypeId>,
}

impl<'a> PlaceholderUses<'a> {
    fn new(model: &'a TypeModel) -> Self {
        Self {
            model,
            declared: Vec::new(),
            args: HashMap::new(),
            blocked: HashSet::new(),
        }
    }

    fn is_placeholder(&self, type_id: TypeId) -> bool {
        matches!(self.model.get(type_id), TypeDef::GenericSourceIdentifier(_))
    }
}

impl Visitor for PlaceholderUses<'_> {
    type Break = Infallible;

    fn visit_generic_type(&mut self, node: &GenericType) -> ControlFlow<Infallible> {
        for (parameter, arg) in node.parameters.iter().zip(&node.args) {
            match arg.type_id() {
                Some(arg) if !self.is_placeholder(arg) => {
                    self.args.entry(*parameter).or_default().push(arg);
                }
                _ => {
                    self.blocked.insert(*parameter);
                }
            }
        }
        visit::visit_generic_type(self, node)
    }

    fn visit_generic_type_declaration(
        &mut self,
        node: &GenericTypeDeclaration,
    ) -> ControlFlow<Infallible> {
        if !self.declared.contains(&node.source_identifier) {
            self.declared.push(node.source_identifier);
        }
        visit::visit_generic_type_declaration(self, node)
    }
}

struct Simplifier {
    replacements: HashMap<TypeId, TypeNode>,
    changes: usize,
}

impl Reducer for Simplifier {
    fn reduce_generic_type_declaration(
        &mut self,
        node: GenericTypeDeclaration,
    ) -> Reduced<GenericTypeDeclaration> {
        if self.replacements.contains_key(&node.source_identifier) {
            self.changes += 1;
            return Ok(None);
        }
        reduce::reduce_generic_type_declaration(self, node)
    }

    fn reduce_generic_type(&mut self, mut node: GenericType) -> Reduced<TypeNode> {
        if node.parameters.iter().any(|p| self.replacements.contains_key(p)) {
            let mut args = Vec::with_capacity(node.args.len());
            let mut parameters = Vec::with_capacity(node.parameters.len());
            for (parameter, arg) in node.parameters.into_iter().zip(node.args) {
                if self.replacements.contains_key(&parameter) {
                    self.changes += 1;
                } else {
                    parameters.push(parameter);
                    args.push(arg);
                }
            }
            node.args = args;
            node.parameters = parameters;
        }
        reduce::reduce_generic_type(self, node)
    }

    fn reduce_edge_type(&mut self, node: EdgeType) -> Reduced<TypeNode> {
        match self.replacements.get(&node.type_id) {
            Some(replacement) => {
                self.changes += 1;
                Ok(Some(replacement.clone()))
            }
            None => reduce::reduce_edge_type(self, node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::pipeline::Pipeline;
    use crate::transform::{AddFields, AddObjectDeclarations};
    use irongen_ast::node::Node;
    use irongen_model::{GenericTargetIdentifier, GenericTargetType, ObjectType, Property};

    fn declare() -> Pipeline {
        Pipeline::new()
            .add_pass(AddObjectDeclarations)
            .add_pass(AddFields)
    }

    fn field_types(root: &CodeRoot, type_id: TypeId) -> Vec<&TypeNode> {
        fixtures::members(root, type_id)
            .iter()
            .filter_map(Node::as_field)
            .map(|f| &f.type_node)
            .collect()
    }

    #[test]
    fn test_single_argument_is_inlined() {
        let (mut model, boxed, holder) = fixtures::generic_model();
        let string = fixtures::string(&mut model);
        let mut root = fixtures::run_passes(model, &CodeOptions::default(), declare());

        let changes = simplify(&mut root, &CodeOptions::default()).expect("simplify");
        assert!(changes > 0);

        let shape = fixtures::declaration(&root, boxed).shape().expect("shape");
        assert!(shape.generic_parameters.is_none());
        let value = field_types(&root, boxed)[0];
        assert!(value.as_edge().is_some());
        assert_eq!(value.type_id(), Some(string));

        for first in field_types(&root, holder) {
            let edge = first.as_edge().expect("plain reference");
            assert_eq!(edge.type_id, boxed);
        }
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let (model, _, _) = fixtures::generic_model();
        let mut root = fixtures::run_passes(model, &CodeOptions::default(), declare());
        simplify(&mut root, &CodeOptions::default()).expect("first run");
        assert_eq!(
            simplify(&mut root, &CodeOptions::default()).expect("second run"),
            0
        );
    }

    #[test]
    fn test_different_arguments_keep_parameter() {
        let (mut model, boxed, _) = fixtures::generic_model();
        let int = fixtures::int(&mut model);
        let (source, placeholder) = model
            .iter()
            .find_map(|(id, def)| match def {
                TypeDef::GenericSource(s) if s.of == boxed => Some((id, s.source_identifiers[0])),
                _ => None,
            })
            .expect("generic source");
        let boxed_int = model.add(TypeDef::GenericTarget(GenericTargetType {
            source,
            target_identifiers: vec![GenericTargetIdentifier {
                source_identifier: placeholder,
                type_id: int,
            }],
        }));
        model.add_exported(TypeDef::Object(
            ObjectType::new("Counter")
                .in_namespace("com.zoo")
                .with_property(Property::new("count", boxed_int)),
        ));
        let mut root = fixtures::run_passes(model, &CodeOptions::default(), declare());

        assert_eq!(
            simplify(&mut root, &CodeOptions::default()).expect("simplify"),
            0
        );
        let shape = fixtures::declaration(&root, boxed).shape().expect("shape");
        assert!(shape.generic_parameters.is_some());
    }

    #[test]
    fn test_disabled_option_keeps_generics() {
        let (model, boxed, _) = fixtures::generic_model();
        let options = CodeOptions::builder().simplify_generics(false).build();
        let root = fixtures::run_passes(model, &options, declare().add_pass(SimplifyGenerics));
        let shape = fixtures::declaration(&root, boxed).shape().expect("shape");
        assert!(shape.generic_parameters.is_some());
    }
}
