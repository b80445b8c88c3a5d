//! Storage for declared types and their members.
pub mod registry;
pub mod summary;
pub mod types;

pub use registry::Registry;
pub use summary::{MemberSummary, TypeSummary};
pub use types::{
    Body, CallContext, Callable, Markers, Member, MemberKind, Signature, TypeDecl, TypeId,
};
