//! Defines the error types for the contract module.
use crate::store::TypeId;
use thiserror::Error;

/// The category of an `InterfaceError`, for programmatic inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The candidate broke an interface contract or a final marker.
    Contract,
    /// The object passed as an interface was never defined as one.
    Configuration,
    /// The type declarations themselves are malformed.
    Declaration,
    /// A member could not be invoked.
    Invocation,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    #[error(
        "An interface class must be defined before use: '{0}' has no required-member bookkeeping."
    )]
    InvalidInterface(String),
    /// Carries the documentation of the required placeholder.
    #[error("{0}")]
    MissingRequiredAttribute(String),
    #[error("{0}")]
    MissingRequiredClassMethod(String),
    #[error("Method {method} is final -- cannot override in {owner}")]
    CannotOverrideFinal { method: String, owner: String },
    #[error("Method {method} must accept {expected}, found {found}")]
    InvalidMethodSignature { method: String, expected: String, found: String },

    #[error("Unknown type id {0}")]
    UnknownType(TypeId),
    #[error("A type named '{0}' is already declared")]
    DuplicateType(String),
    #[error("Duplicate base class {base} in '{name}'")]
    DuplicateBase { name: String, base: String },
    #[error("Member '{member}' is declared twice on '{name}'")]
    DuplicateMember { name: String, member: String },
    #[error("Cannot create a consistent method resolution order for '{0}'")]
    InconsistentHierarchy(String),

    #[error("'{type_name}' has no member '{member}'")]
    UnknownMember { type_name: String, member: String },
    #[error("'{type_name}.{member}' is not callable")]
    NotCallable { type_name: String, member: String },

    #[error("Invalid checker configuration: {0}")]
    Config(String),
}

impl InterfaceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterfaceError::MissingRequiredAttribute(_)
            | InterfaceError::MissingRequiredClassMethod(_)
            | InterfaceError::CannotOverrideFinal { .. }
            | InterfaceError::InvalidMethodSignature { .. } => ErrorKind::Contract,
            InterfaceError::InvalidInterface(_) | InterfaceError::Config(_) => {
                ErrorKind::Configuration
            }
            InterfaceError::UnknownType(_)
            | InterfaceError::DuplicateType(_)
            | InterfaceError::DuplicateBase { .. }
            | InterfaceError::DuplicateMember { .. }
            | InterfaceError::InconsistentHierarchy(_) => ErrorKind::Declaration,
            InterfaceError::UnknownMember { .. } | InterfaceError::NotCallable { .. } => {
                ErrorKind::Invocation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_documentation() {
        let err = InterfaceError::MissingRequiredAttribute("Run must be implemented.".into());
        assert_eq!(err.to_string(), "Run must be implemented.");
        assert_eq!(err.kind(), ErrorKind::Contract);
    }

    #[test]
    fn test_final_message() {
        let err = InterfaceError::CannotOverrideFinal {
            method: "test".into(),
            owner: "Belligerent".into(),
        };
        assert_eq!(err.to_string(), "Method test is final -- cannot override in Belligerent");
    }

    #[test]
    fn test_unknown_type_message() {
        assert_eq!(InterfaceError::UnknownType(TypeId(7)).to_string(), "Unknown type id 7");
        assert_eq!(InterfaceError::UnknownType(TypeId(7)).kind(), ErrorKind::Declaration);
    }
}
