//! Outcome of an item-container transfer.

use crate::fluid::Fluid;
use crate::item::ItemStack;
use crate::stack::FluidStack;

/// The fluid moved by an item-oriented fill or drain, plus the item the
/// container turned into (empty if it did not change).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FluidResult {
    fluid_stack: FluidStack,
    item_stack: ItemStack,
}

impl FluidResult {
    pub fn new(fluid_stack: FluidStack, item_stack: ItemStack) -> Self {
        Self {
            fluid_stack,
            item_stack,
        }
    }

    pub fn of_fluid(fluid_stack: FluidStack) -> Self {
        Self::new(fluid_stack, ItemStack::empty())
    }

    pub fn of_item(item_stack: ItemStack) -> Self {
        Self::new(FluidStack::EMPTY, item_stack)
    }

    pub fn fluid_stack(&self) -> &FluidStack {
        &self.fluid_stack
    }

    pub fn item_stack(&self) -> &ItemStack {
        &self.item_stack
    }

    pub fn has_item_stack(&self) -> bool {
        !self.item_stack.is_empty()
    }

    /// Kind of fluid moved; [`Fluid::EMPTY`] when nothing moved.
    pub fn fluid(&self) -> &Fluid {
        self.fluid_stack.fluid()
    }

    pub fn fluid_amount(&self) -> u32 {
        self.fluid_stack.amount()
    }

    pub fn is_fluid_equal(&self, other: &FluidStack) -> bool {
        self.fluid_stack.is_fluid_equal(other)
    }

    /// No fluid moved and no item produced.
    pub fn is_empty(&self) -> bool {
        self.fluid_stack.is_empty() && self.item_stack.is_empty()
    }

    pub fn set_fluid_stack(&mut self, stack: FluidStack) {
        self.fluid_stack = stack;
    }

    pub fn set_item_stack(&mut self, stack: ItemStack) {
        self.item_stack = stack;
    }

    pub fn set_fluid_amount(&mut self, amount: u32) {
        self.fluid_stack.set_amount(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let r = FluidResult::of_fluid(FluidStack::new(Fluid::WATER, 250));
        assert_eq!(r.fluid_amount(), 250);
        assert!(!r.has_item_stack());
        assert!(!r.is_empty());

        let r = FluidResult::of_item(ItemStack::new("minecraft:glass_bottle", 1));
        assert!(r.has_item_stack());
        assert!(r.fluid_stack().is_empty());

        assert!(FluidResult::default().is_empty());
        assert_eq!(FluidResult::default().fluid(), &Fluid::EMPTY);
    }

    #[test]
    fn setters() {
        let mut r = FluidResult::of_fluid(FluidStack::new(Fluid::LAVA, 1000));
        r.set_fluid_amount(400);
        assert_eq!(r.fluid_amount(), 400);
        assert!(r.is_fluid_equal(&FluidStack::new(Fluid::LAVA, 1)));
        assert_eq!(r.fluid(), &Fluid::LAVA);

        r.set_fluid_amount(0);
        assert!(r.fluid_stack().is_empty());

        r.set_item_stack(ItemStack::new("minecraft:bucket", 1));
        assert_eq!(r.item_stack().id, "minecraft:bucket");
    }
}
