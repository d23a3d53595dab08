//! Target-specific strategies injected into the tree root.
//!
//! One core serves many target languages; what differs between them is how a
//! model type becomes a type node, how names and namespaces are spelled, and
//! which supertypes a declaration may extend.

mod naming;
mod supertype;
mod type_factory;

pub use naming::{DottedNameResolver, NameResolver, TypeName};
pub use supertype::{SingleInheritanceResolver, SupertypeResolver, Supertypes};
pub use type_factory::{DefaultTypeNodeFactory, TypeNodeFactory};
