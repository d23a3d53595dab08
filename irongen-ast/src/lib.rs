//! # IronGen AST
//!
//! Language-neutral code tree that the IronGen passes build and rewrite.
//!
//! This crate provides:
//! - Owned node types with lazily assigned, stable node ids
//! - A read-only [`Visitor`] with early exit and subtree pruning
//! - A bottom-up [`Reducer`] that rebuilds nodes and collapses emptied parents
//! - Id-based reference resolution through a per-generation [`ReferenceIndex`]
//! - The [`CodeRoot`] holding nodes, type model and target-language strategies

pub mod error;
pub mod id;
pub mod node;
pub mod reduce;
pub mod reference;
pub mod root;
pub mod strategy;
pub mod visit;

pub use error::{AstError, Result};
pub use id::{IdGenerator, IdSlot, NodeId};
pub use node::{Identified, Node, ObjectDeclaration, TypeNode, Typed};
pub use reduce::{Reduced, Reducer};
pub use reference::{ReferenceIndex, ReferenceTarget};
pub use root::{CodeRoot, CodeRootBuilder};
pub use strategy::{
    DefaultTypeNodeFactory, DottedNameResolver, NameResolver, SingleInheritanceResolver,
    SupertypeResolver, Supertypes, TypeName, TypeNodeFactory,
};
pub use visit::Visitor;
