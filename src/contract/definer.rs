//! Interface definition: collects the required members visible on a type.
use crate::store::{Registry, TypeId};
use serde::{Deserialize, Serialize};

/// The required-member bookkeeping attached to an interface.
///
/// Every name in `required_classmethods` also appears in `required_attrs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    pub required_attrs: Vec<String>,
    pub required_classmethods: Vec<String>,
}

impl InterfaceDescriptor {
    /// Scans every name resolvable on `cls`, inherited ones included, in sorted order.
    pub(crate) fn collect(registry: &Registry, cls: TypeId) -> Self {
        let mut descriptor = Self::default();
        for name in registry.dir(cls) {
            let Some((_, member)) = registry.resolve(cls, name) else { continue };
            if member.markers.required_classmethod {
                descriptor.required_classmethods.push(name.to_string());
            }
            if member.markers.required || member.markers.required_classmethod {
                descriptor.required_attrs.push(name.to_string());
            }
        }
        descriptor
    }

    pub fn is_required_classmethod(&self, name: &str) -> bool {
        self.required_classmethods.iter().any(|n| n == name)
    }
}
