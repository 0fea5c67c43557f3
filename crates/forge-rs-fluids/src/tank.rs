//! Bounded single-fluid tank.
//!
//! A tank is either empty or holds one kind of fluid, never more than its
//! capacity. Fills of a different kind are refused; fills and drains are
//! clamped to the room or contents available. Every transfer can be run
//! as a dry run (`FluidAction::Simulate`) first.

use std::fmt;

use forge_rs_nbt::{read_nbt_le, write_nbt_le, NbtCompound, NbtRoot};
use tracing::{debug, trace, warn};

use crate::error::FluidError;
use crate::fluid::FluidRegistry;
use crate::handler::{FluidAction, FluidHandler, HandlerType, Tank};
use crate::item::ItemStack;
use crate::result::FluidResult;
use crate::stack::{FluidStack, MAX_AMOUNT};

/// Decides which fluids a tank may ever hold.
pub type Validator = Box<dyn Fn(&FluidStack) -> bool + Send + Sync>;

/// Turns an item-container transfer into the resulting item.
pub type StackFn = Box<dyn Fn(&FluidResult) -> ItemStack + Send + Sync>;

/// Receives a call whenever an executed fill or drain changes the stored
/// amount. Owners use it to mark themselves dirty.
pub trait TankListener {
    fn on_contents_changed(&mut self) {}
}

impl TankListener for () {}

static EMPTY: FluidStack = FluidStack::EMPTY;

pub struct FluidTank<L: TankListener = ()> {
    fluid: FluidStack,
    capacity: u32,
    validator: Validator,
    stack_fn: StackFn,
    handler_type: HandlerType,
    listener: L,
}

impl FluidTank {
    /// A block tank accepting any fluid.
    pub fn new(capacity: u32) -> Self {
        Self::with_type(capacity, HandlerType::Block)
    }

    /// Capacities above [`MAX_AMOUNT`] are clamped to it.
    pub fn with_type(capacity: u32, handler_type: HandlerType) -> Self {
        Self {
            fluid: FluidStack::EMPTY,
            capacity: capacity.min(MAX_AMOUNT),
            validator: Box::new(|_: &FluidStack| true),
            stack_fn: Box::new(|result: &FluidResult| result.item_stack().clone()),
            handler_type,
            listener: (),
        }
    }

    pub fn with_validator(
        capacity: u32,
        validator: impl Fn(&FluidStack) -> bool + Send + Sync + 'static,
        handler_type: HandlerType,
    ) -> Self {
        let mut tank = Self::with_type(capacity, handler_type);
        tank.validator = Box::new(validator);
        tank
    }

    /// An item tank whose transfers are converted with `stack_fn`.
    pub fn for_item(
        capacity: u32,
        stack_fn: impl Fn(&FluidResult) -> ItemStack + Send + Sync + 'static,
    ) -> Self {
        let mut tank = Self::with_type(capacity, HandlerType::Item);
        tank.stack_fn = Box::new(stack_fn);
        tank
    }
}

impl<L: TankListener> FluidTank<L> {
    /// Replace the change listener, keeping contents and settings.
    pub fn with_listener<M: TankListener>(self, listener: M) -> FluidTank<M> {
        FluidTank {
            fluid: self.fluid,
            capacity: self.capacity,
            validator: self.validator,
            stack_fn: self.stack_fn,
            handler_type: self.handler_type,
            listener,
        }
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Change the capacity, clamped to [`MAX_AMOUNT`]. Contents above the
    /// new capacity are discarded.
    pub fn set_capacity(&mut self, capacity: u32) -> &mut Self {
        let capacity = capacity.min(MAX_AMOUNT);
        self.capacity = capacity;
        if self.fluid.amount() > capacity {
            warn!(
                "Tank shrunk to {capacity} mB, discarding {} mB of {}",
                self.fluid.amount() - capacity,
                self.fluid.fluid()
            );
            self.fluid.set_amount(capacity);
        }
        self
    }

    pub fn set_validator(
        &mut self,
        validator: impl Fn(&FluidStack) -> bool + Send + Sync + 'static,
    ) -> &mut Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn set_stack_fn(
        &mut self,
        stack_fn: impl Fn(&FluidResult) -> ItemStack + Send + Sync + 'static,
    ) -> &mut Self {
        self.stack_fn = Box::new(stack_fn);
        self
    }

    /// Replace the contents directly. Bypasses the validator and does not
    /// notify the listener; the amount is clamped to the capacity.
    pub fn set_fluid(&mut self, stack: FluidStack) {
        if stack.amount() > self.capacity {
            warn!(
                "{stack} does not fit a {} mB tank, truncating",
                self.capacity
            );
            self.fluid = stack.with_amount(self.capacity);
        } else {
            self.fluid = stack;
        }
    }

    /// Free room in millibuckets.
    pub fn space(&self) -> u32 {
        self.capacity.saturating_sub(self.fluid.amount())
    }

    pub fn is_empty(&self) -> bool {
        self.fluid.is_empty()
    }

    /// Amount of `resource` a fill would accept right now. Never mutates.
    pub fn fill_preview(&self, resource: &FluidStack) -> u32 {
        if resource.is_empty() || !self.is_fluid_valid(resource) {
            return 0;
        }
        if self.fluid.is_empty() {
            self.capacity.min(resource.amount())
        } else if !self.fluid.is_fluid_equal(resource) {
            0
        } else {
            self.space().min(resource.amount())
        }
    }

    /// What a drain of up to `max_drain` would remove right now. Never mutates.
    pub fn drain_preview(&self, max_drain: u32) -> FluidStack {
        self.fluid.with_amount(max_drain.min(self.fluid.amount()))
    }

    fn convert(&self, mut result: FluidResult) -> FluidResult {
        let item = (self.stack_fn)(&result);
        result.set_item_stack(item);
        result
    }

    /// Write the held fluid into `nbt`.
    pub fn write_to_nbt(&self, nbt: &mut NbtCompound) {
        self.fluid.write_to_nbt(nbt);
    }

    /// Restore the held fluid from `nbt`.
    pub fn read_from_nbt(
        &mut self,
        nbt: &NbtCompound,
        registry: &FluidRegistry,
    ) -> Result<(), FluidError> {
        let stack = FluidStack::load_from_nbt(nbt, registry)?;
        debug!("Loaded tank contents: {stack}");
        self.set_fluid(stack);
        Ok(())
    }

    /// Serialize the contents to LE NBT bytes.
    pub fn to_le_nbt(&self) -> Vec<u8> {
        let mut compound = NbtCompound::new();
        self.write_to_nbt(&mut compound);
        let mut buf = Vec::new();
        write_nbt_le(&mut buf, &NbtRoot::new("", compound));
        buf
    }

    /// Restore the contents from LE NBT bytes produced by [`Self::to_le_nbt`].
    pub fn load_le_nbt(&mut self, data: &[u8], registry: &FluidRegistry) -> Result<(), FluidError> {
        let root = read_nbt_le(&mut &data[..])?;
        self.read_from_nbt(&root.compound, registry)
    }
}

impl<L: TankListener> Tank for FluidTank<L> {
    fn fluid(&self) -> &FluidStack {
        &self.fluid
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn is_fluid_valid(&self, stack: &FluidStack) -> bool {
        (self.validator)(stack)
    }
}

impl<L: TankListener> FluidHandler for FluidTank<L> {
    fn handler_type(&self) -> HandlerType {
        self.handler_type
    }

    fn tanks(&self) -> usize {
        1
    }

    fn fluid_in_tank(&self, tank: usize) -> &FluidStack {
        if tank == 0 {
            &self.fluid
        } else {
            &EMPTY
        }
    }

    fn tank_capacity(&self, tank: usize) -> u32 {
        if tank == 0 {
            self.capacity
        } else {
            0
        }
    }

    fn is_fluid_valid_in(&self, tank: usize, stack: &FluidStack) -> bool {
        tank == 0 && self.is_fluid_valid(stack)
    }

    fn fill_block(&mut self, resource: &FluidStack, action: FluidAction) -> u32 {
        let filled = self.fill_preview(resource);
        if action.simulate() {
            return filled;
        }
        if filled > 0 {
            if self.fluid.is_empty() {
                self.fluid = resource.with_amount(filled);
            } else {
                self.fluid.grow(filled);
            }
            trace!("Filled {filled} mB, tank now {}", self.fluid);
            self.listener.on_contents_changed();
        }
        filled
    }

    fn fill_item(&mut self, resource: &FluidStack, action: FluidAction) -> FluidResult {
        let filled = self.fill_block(resource, action);
        self.convert(FluidResult::of_fluid(resource.with_amount(filled)))
    }

    fn drain_block(&mut self, resource: &FluidStack, action: FluidAction) -> FluidStack {
        if resource.is_empty() || !resource.is_fluid_equal(&self.fluid) {
            return FluidStack::EMPTY;
        }
        self.drain_block_amount(resource.amount(), action)
    }

    fn drain_item(&mut self, resource: &FluidStack, action: FluidAction) -> FluidResult {
        let drained = self.drain_block(resource, action);
        self.convert(FluidResult::of_fluid(drained))
    }

    fn drain_block_amount(&mut self, max_drain: u32, action: FluidAction) -> FluidStack {
        let stack = self.drain_preview(max_drain);
        if action.execute() && !stack.is_empty() {
            self.fluid.shrink(stack.amount());
            trace!("Drained {stack}, tank now {}", self.fluid);
            self.listener.on_contents_changed();
        }
        stack
    }

    fn drain_item_amount(&mut self, max_drain: u32, action: FluidAction) -> FluidResult {
        let drained = self.drain_block_amount(max_drain, action);
        self.convert(FluidResult::of_fluid(drained))
    }
}

impl<L: TankListener + fmt::Debug> fmt::Debug for FluidTank<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluidTank")
            .field("fluid", &self.fluid)
            .field("capacity", &self.capacity)
            .field("handler_type", &self.handler_type)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}
