//! Declarative interfaces for a modelled class hierarchy.
//!
//! Types are declared into a [`Registry`]. An interface is a type whose members
//! are marked required (see [`markers`]); a candidate type is then checked
//! against it with [`Registry::implement`], which verifies every required member
//! is concretely implemented and that nothing marked final along the ancestor
//! chain is redefined. [`Registry::strict`] runs only the final check.

pub mod analysis;
pub mod contract;
pub mod markers;
pub mod store;

// Re-export key types for convenient access
pub use contract::{
    CheckerConfig, ContractChecker, ErrorKind, InterfaceDescriptor, InterfaceError, InterfaceFinals,
};
pub use markers::{final_method, require, require_classmethod};
pub use store::{
    Body, CallContext, Markers, Member, MemberKind, Registry, Signature, TypeDecl, TypeId,
    TypeSummary,
};
