//! Checker configuration.
use super::error::InterfaceError;
use serde::{Deserialize, Serialize};

/// How final markers on an interface apply to types that do not inherit from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceFinals {
    /// The interface is treated as the oldest ancestor of the candidate, so its
    /// final members may not be redefined even by structural implementers.
    #[default]
    Enforce,
    /// Only final members reachable through the candidate's own bases count.
    InheritedOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub interface_finals: InterfaceFinals,
    /// Compare parameter shapes when both the placeholder and the implementation declare one.
    pub check_signatures: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            interface_finals: InterfaceFinals::Enforce,
            check_signatures: true,
        }
    }
}

impl CheckerConfig {
    pub fn from_json(raw: &str) -> Result<Self, InterfaceError> {
        serde_json::from_str(raw).map_err(|e| InterfaceError::Config(e.to_string()))
    }
}
