//! Rule for detecting redefinitions of members marked final.
use crate::analysis::linearize::ancestor_chain;
use crate::contract::config::{CheckerConfig, InterfaceFinals};
use crate::contract::error::InterfaceError;
use crate::store::{Registry, TypeId};
use tracing::{debug, trace};

/// Walks the ancestor chain of `cls`, oldest first, and fails if a callable
/// marked final on one ancestor is declared again on any later one.
///
/// Only members declared directly on each ancestor are inspected: ordinary
/// lookup would report just the most derived definition and hide the override.
/// When `interface` is given but not inherited by `cls`, it is placed in front of
/// the chain (unless the config says otherwise).
pub(crate) fn check_final(
    registry: &Registry,
    interface: Option<TypeId>,
    cls: TypeId,
    config: &CheckerConfig,
) -> Result<(), InterfaceError> {
    registry.ensure_known(cls)?;
    let mut chain = ancestor_chain(registry, cls);
    if let Some(iface) = interface {
        registry.ensure_known(iface)?;
        let enforce = config.interface_finals == InterfaceFinals::Enforce;
        if enforce && !registry.is_subclass(cls, iface) {
            chain.insert(0, iface);
        }
    }

    for name in registry.dir(cls) {
        match registry.resolve(cls, name) {
            Some((_, visible)) if visible.is_callable() => {}
            _ => continue,
        }

        let mut finaled_by: Option<TypeId> = None;
        for &base in &chain {
            let Some(member) = registry.own_member(base, name) else { continue };
            if member.is_falsy_attribute() {
                continue;
            }
            match finaled_by {
                None => {
                    if member.markers.final_ {
                        trace!(
                            member = name,
                            owner = %registry.type_name(base),
                            "final from here on"
                        );
                        finaled_by = Some(base);
                    }
                }
                Some(origin) => {
                    debug!(
                        member = name,
                        finaled_in = %registry.type_name(origin),
                        overridden_in = %registry.type_name(base),
                        "final member redefined"
                    );
                    return Err(InterfaceError::CannotOverrideFinal {
                        method: name.to_string(),
                        owner: registry.type_name(base).to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
