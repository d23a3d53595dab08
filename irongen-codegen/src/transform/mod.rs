//! The passes of the standard pipeline.

pub mod abstract_accessors;
pub mod accessors;
pub mod clean;
pub mod comments;
pub mod composition;
pub mod compression;
pub mod constructors;
pub mod declarations;
pub mod fields;
pub mod generated_comment;
pub mod generics;
pub mod names;
pub mod pretty;
pub mod reorder;

pub use abstract_accessors::AddAbstractAccessors;
pub use accessors::AddAccessors;
pub use clean::SimplifyAndClean;
pub use comments::AddComments;
pub use composition::AddCompositionMembers;
pub use compression::InnerTypeCompression;
pub use constructors::AddConstructors;
pub use declarations::AddObjectDeclarations;
pub use fields::AddFields;
pub use generated_comment::AddGeneratedComment;
pub use generics::SimplifyGenerics;
pub use names::ResolveNames;
pub use pretty::PrettyCode;
pub use reorder::ReorderMembers;
