//! Traits through which containers expose their fluid storage.

use serde::Deserialize;

use crate::result::FluidResult;
use crate::stack::FluidStack;

/// Whether a transfer is a dry run or is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidAction {
    Simulate,
    Execute,
}

impl FluidAction {
    pub fn simulate(self) -> bool {
        self == FluidAction::Simulate
    }

    pub fn execute(self) -> bool {
        self == FluidAction::Execute
    }
}

/// Where the storage lives: a block in the world or an item in an inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerType {
    #[default]
    Block,
    Item,
}

/// A single tank.
pub trait Tank {
    /// The held fluid, [`FluidStack::EMPTY`] when nothing is stored.
    fn fluid(&self) -> &FluidStack;

    fn fluid_amount(&self) -> u32 {
        self.fluid().amount()
    }

    fn capacity(&self) -> u32;

    /// Whether the tank could ever hold `stack`'s fluid, regardless of
    /// what it currently contains.
    fn is_fluid_valid(&self, stack: &FluidStack) -> bool;
}

/// Indexed access to one or more tanks, plus fill/drain.
///
/// Fill and drain never fail: invalid or impossible requests transfer
/// nothing, so callers check the returned amount.
pub trait FluidHandler {
    fn handler_type(&self) -> HandlerType;

    fn tanks(&self) -> usize;

    /// Contents of tank `tank`; [`FluidStack::EMPTY`] for out-of-range indices.
    fn fluid_in_tank(&self, tank: usize) -> &FluidStack;

    fn tank_capacity(&self, tank: usize) -> u32;

    fn is_fluid_valid_in(&self, tank: usize, stack: &FluidStack) -> bool;

    /// Returns how much of `resource` was (or would be) accepted.
    fn fill_block(&mut self, resource: &FluidStack, action: FluidAction) -> u32;

    fn fill_item(&mut self, resource: &FluidStack, action: FluidAction) -> FluidResult;

    /// Drain up to `resource.amount()` of `resource`'s fluid. Returns what
    /// was (or would be) removed.
    fn drain_block(&mut self, resource: &FluidStack, action: FluidAction) -> FluidStack;

    fn drain_item(&mut self, resource: &FluidStack, action: FluidAction) -> FluidResult;

    /// Drain up to `max_drain` of whatever fluid is stored.
    fn drain_block_amount(&mut self, max_drain: u32, action: FluidAction) -> FluidStack;

    fn drain_item_amount(&mut self, max_drain: u32, action: FluidAction) -> FluidResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_predicates() {
        assert!(FluidAction::Simulate.simulate());
        assert!(!FluidAction::Simulate.execute());
        assert!(FluidAction::Execute.execute());
    }

    #[test]
    fn handler_type_default_is_block() {
        assert_eq!(HandlerType::default(), HandlerType::Block);
    }
}
