//! Rule for verifying that every required member is concretely implemented.
use crate::contract::config::CheckerConfig;
use crate::contract::error::InterfaceError;
use crate::store::{Member, MemberKind, Registry, TypeId};
use tracing::debug;

/// Checks the required members of `interface` against `cls`, in the
/// interface's required order, stopping at the first failure.
pub(crate) fn check_required(
    registry: &Registry,
    interface: TypeId,
    cls: TypeId,
    config: &CheckerConfig,
) -> Result<(), InterfaceError> {
    registry.ensure_known(interface)?;
    registry.ensure_known(cls)?;
    let descriptor = registry.interface(interface).ok_or_else(|| {
        InterfaceError::InvalidInterface(registry.type_name(interface).to_string())
    })?;

    for name in &descriptor.required_attrs {
        let placeholder = registry.resolve(interface, name).map(|(_, m)| m);
        let message = placeholder
            .map(Member::missing_message)
            .unwrap_or_else(|| format!("'{}' must be implemented.", name));

        // A falsy attribute counts as absent; the interface's placeholder stands in.
        let candidate = registry
            .resolve(cls, name)
            .map(|(_, m)| m)
            .filter(|m| !m.is_falsy_attribute());

        let implemented = if descriptor.is_required_classmethod(name) {
            match candidate {
                Some(m) if m.kind == MemberKind::ClassMethod && !m.is_sentinel() => m,
                _ => {
                    debug!(
                        member = %name,
                        class = %registry.type_name(cls),
                        "missing required classmethod"
                    );
                    return Err(InterfaceError::MissingRequiredClassMethod(message));
                }
            }
        } else {
            match candidate {
                Some(m) if !m.markers.required && !m.is_sentinel() => m,
                _ => {
                    debug!(
                        member = %name,
                        class = %registry.type_name(cls),
                        "missing required attribute"
                    );
                    return Err(InterfaceError::MissingRequiredAttribute(message));
                }
            }
        };

        if config.check_signatures {
            check_signature(name, placeholder, implemented)?;
        }
    }
    Ok(())
}

fn check_signature(
    name: &str,
    placeholder: Option<&Member>,
    implemented: &Member,
) -> Result<(), InterfaceError> {
    let (Some(expected), Some(found)) = (
        placeholder.and_then(|p| p.signature.as_ref()),
        implemented.signature.as_ref(),
    ) else {
        return Ok(());
    };
    if expected == found {
        return Ok(());
    }
    debug!(member = name, %expected, %found, "signature mismatch");
    Err(InterfaceError::InvalidMethodSignature {
        method: name.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    })
}
