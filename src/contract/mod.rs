//! The contract-checking engine.
//!
//! `InterfaceDescriptor` records what an interface requires, and the
//! `ContractChecker` verifies candidate types against it: every required member
//! must be concretely implemented, and no member marked final by an ancestor may
//! be redefined further down the chain.

pub use self::checker::ContractChecker;
pub use self::config::{CheckerConfig, InterfaceFinals};
pub use self::definer::InterfaceDescriptor;
pub use self::error::{ErrorKind, InterfaceError};

// --- MODULE DECLARATIONS ---
mod checker;
mod config;
mod definer;
mod error;
mod rules {
    pub mod final_check;
    pub mod required;
}
