//! The central checker that runs the contract rules in the correct order.
use super::config::CheckerConfig;
use super::error::InterfaceError;
use super::rules::{final_check, required};
use crate::store::{Registry, TypeId};
use tracing::debug;

/// Validates candidate types against interfaces and final markers.
///
/// Checks are fail-fast: the first violation is returned and nothing is
/// recorded. The checker only reads the registry.
pub struct ContractChecker<'a> {
    registry: &'a Registry,
    config: &'a CheckerConfig,
}

impl<'a> ContractChecker<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry, config: registry.config() }
    }

    /// Overrides the registry's configuration for this checker only.
    pub fn with_config(registry: &'a Registry, config: &'a CheckerConfig) -> Self {
        Self { registry, config }
    }

    /// Runs the required and final checks for every interface, in order.
    pub fn check_implementation(
        &self,
        interfaces: &[TypeId],
        cls: TypeId,
    ) -> Result<(), InterfaceError> {
        self.registry.ensure_known(cls)?;
        for &interface in interfaces {
            self.registry.ensure_known(interface)?;
            if !self.registry.is_interface(interface) {
                return Err(InterfaceError::InvalidInterface(
                    self.registry.type_name(interface).to_string(),
                ));
            }
            self.check_required(interface, cls)?;
            self.check_final(Some(interface), cls)?;
        }
        debug!(
            class = %self.registry.type_name(cls),
            interfaces = interfaces.len(),
            "class conforms"
        );
        Ok(())
    }

    /// Final-override protection without any interface.
    pub fn check_strict(&self, cls: TypeId) -> Result<(), InterfaceError> {
        self.registry.ensure_known(cls)?;
        self.check_final(None, cls)?;
        debug!(class = %self.registry.type_name(cls), "strict check passed");
        Ok(())
    }

    /// Fails with `UnknownType` if either id was never declared.
    pub fn check_required(&self, interface: TypeId, cls: TypeId) -> Result<(), InterfaceError> {
        required::check_required(self.registry, interface, cls, self.config)
    }

    pub fn check_final(
        &self,
        interface: Option<TypeId>,
        cls: TypeId,
    ) -> Result<(), InterfaceError> {
        final_check::check_final(self.registry, interface, cls, self.config)
    }
}
