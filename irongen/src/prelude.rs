//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use irongen::prelude::*;
//! ```

// Model types
pub use irongen_model::{
    ArrayType, CompositionType, EnumMember, EnumType, InterfaceType, ObjectType, PrimitiveKind,
    PrimitiveType, PrimitiveValue, Property, TypeDef, TypeId, TypeModel,
};

// Tree types
pub use irongen_ast::{
    AstError, CodeRoot, CodeRootBuilder, NameResolver, Node, NodeId, Reducer, SupertypeResolver,
    TypeNode, TypeNodeFactory, Visitor,
};

// Generation
pub use irongen_codegen::{
    CodeOptions, CodeOptionsBuilder, CodegenError, JavaLikeRenderer, Pipeline, RenderedFile,
    Renderer, Transformer,
};
