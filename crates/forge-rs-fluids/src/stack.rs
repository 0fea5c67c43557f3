//! Fluid stacks: a fluid kind plus an amount in millibuckets.

use std::fmt;

use forge_rs_nbt::{NbtCompound, NbtTag};

use crate::error::FluidError;
use crate::fluid::{Fluid, FluidRegistry};

/// One bucket, in millibuckets.
pub const BUCKET_VOLUME: u32 = 1000;

/// Largest amount that survives persistence (`Amount` is an NBT int).
/// Tank capacities are clamped to it.
pub const MAX_AMOUNT: u32 = i32::MAX as u32;

const FLUID_NAME: &str = "FluidName";
const AMOUNT: &str = "Amount";

/// A quantity of a single fluid.
///
/// A stack is empty when its fluid is [`Fluid::EMPTY`] or its amount is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluidStack {
    fluid: Fluid,
    amount: u32,
}

impl Default for FluidStack {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FluidStack {
    pub const EMPTY: FluidStack = FluidStack {
        fluid: Fluid::EMPTY,
        amount: 0,
    };

    /// Create a stack; empty inputs collapse to [`FluidStack::EMPTY`].
    pub fn new(fluid: Fluid, amount: u32) -> Self {
        if fluid.is_empty() || amount == 0 {
            Self::EMPTY
        } else {
            Self { fluid, amount }
        }
    }

    /// Same fluid, different amount.
    pub fn with_amount(&self, amount: u32) -> Self {
        Self::new(self.fluid.clone(), amount)
    }

    pub fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0 || self.fluid.is_empty()
    }

    /// Whether both stacks hold the same kind of fluid. Amounts are ignored.
    pub fn is_fluid_equal(&self, other: &FluidStack) -> bool {
        self.fluid == other.fluid
    }

    pub fn set_amount(&mut self, amount: u32) {
        *self = self.with_amount(amount);
    }

    pub fn grow(&mut self, amount: u32) {
        self.set_amount(self.amount.saturating_add(amount));
    }

    pub fn shrink(&mut self, amount: u32) {
        self.set_amount(self.amount.saturating_sub(amount));
    }

    /// Write `FluidName` and `Amount` into `nbt`. Amounts above
    /// [`MAX_AMOUNT`] are saturated.
    pub fn write_to_nbt(&self, nbt: &mut NbtCompound) {
        nbt.insert(
            FLUID_NAME.to_string(),
            NbtTag::String(self.fluid.name().to_string()),
        );
        let amount = self.amount.min(MAX_AMOUNT) as i32;
        nbt.insert(AMOUNT.to_string(), NbtTag::Int(amount));
    }

    /// Read a stack written by [`FluidStack::write_to_nbt`].
    ///
    /// A compound without `FluidName` is an empty stack. Names are resolved
    /// through `registry`.
    pub fn load_from_nbt(nbt: &NbtCompound, registry: &FluidRegistry) -> Result<Self, FluidError> {
        let Some(name) = nbt.get(FLUID_NAME) else {
            return Ok(Self::EMPTY);
        };
        let name = name.as_string().ok_or(FluidError::MalformedTag {
            key: FLUID_NAME,
            expected: "string",
        })?;
        let fluid = registry
            .get(name)
            .cloned()
            .ok_or_else(|| FluidError::UnknownFluid(name.to_string()))?;

        let amount = match nbt.get(AMOUNT) {
            None => 0,
            Some(tag) => tag.as_int().ok_or(FluidError::MalformedTag {
                key: AMOUNT,
                expected: "int",
            })?,
        };
        let amount = u32::try_from(amount).map_err(|_| FluidError::InvalidAmount(amount))?;
        Ok(Self::new(fluid, amount))
    }
}

impl fmt::Display for FluidStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("empty")
        } else {
            write!(f, "{} mB {}", self.amount, self.fluid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_normalization() {
        assert_eq!(FluidStack::new(Fluid::WATER, 0), FluidStack::EMPTY);
        assert_eq!(FluidStack::new(Fluid::EMPTY, 500), FluidStack::EMPTY);
        assert!(FluidStack::default().is_empty());
        assert!(!FluidStack::new(Fluid::LAVA, 1).is_empty());
    }

    #[test]
    fn fluid_equality_ignores_amount() {
        let a = FluidStack::new(Fluid::WATER, 100);
        let b = FluidStack::new(Fluid::WATER, 900);
        let c = FluidStack::new(Fluid::LAVA, 100);
        assert!(a.is_fluid_equal(&b));
        assert!(!a.is_fluid_equal(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn grow_and_shrink() {
        let mut s = FluidStack::new(Fluid::WATER, 100);
        s.grow(50);
        assert_eq!(s.amount(), 150);
        s.shrink(200);
        assert_eq!(s, FluidStack::EMPTY);
    }

    #[test]
    fn nbt_layout() {
        let mut nbt = NbtCompound::new();
        FluidStack::new(Fluid::LAVA, 250).write_to_nbt(&mut nbt);
        assert_eq!(
            nbt.get("FluidName").and_then(|t| t.as_string()),
            Some("minecraft:lava")
        );
        assert_eq!(nbt.get("Amount").and_then(|t| t.as_int()), Some(250));

        let mut empty = NbtCompound::new();
        FluidStack::EMPTY.write_to_nbt(&mut empty);
        assert_eq!(
            empty.get("FluidName").and_then(|t| t.as_string()),
            Some("minecraft:empty")
        );
        assert_eq!(empty.get("Amount").and_then(|t| t.as_int()), Some(0));
    }

    #[test]
    fn load_reads_back_written_stack() {
        let reg = FluidRegistry::new();
        let stack = FluidStack::new(Fluid::WATER, 700);
        let mut nbt = NbtCompound::new();
        stack.write_to_nbt(&mut nbt);
        assert_eq!(FluidStack::load_from_nbt(&nbt, &reg).unwrap(), stack);

        let mut nbt = NbtCompound::new();
        FluidStack::EMPTY.write_to_nbt(&mut nbt);
        assert!(FluidStack::load_from_nbt(&nbt, &reg).unwrap().is_empty());
    }

    #[test]
    fn load_missing_name_is_empty() {
        let reg = FluidRegistry::new();
        let mut nbt = NbtCompound::new();
        nbt.insert("Amount".into(), NbtTag::Int(500));
        assert_eq!(
            FluidStack::load_from_nbt(&nbt, &reg).unwrap(),
            FluidStack::EMPTY
        );
    }

    #[test]
    fn load_errors() {
        let reg = FluidRegistry::new();

        let mut unknown = NbtCompound::new();
        unknown.insert("FluidName".into(), NbtTag::String("mymod:oil".into()));
        unknown.insert("Amount".into(), NbtTag::Int(10));
        assert!(matches!(
            FluidStack::load_from_nbt(&unknown, &reg),
            Err(FluidError::UnknownFluid(name)) if name == "mymod:oil"
        ));

        let mut negative = NbtCompound::new();
        negative.insert("FluidName".into(), NbtTag::String("minecraft:water".into()));
        negative.insert("Amount".into(), NbtTag::Int(-5));
        assert!(matches!(
            FluidStack::load_from_nbt(&negative, &reg),
            Err(FluidError::InvalidAmount(-5))
        ));

        let mut wrong_type = NbtCompound::new();
        wrong_type.insert("FluidName".into(), NbtTag::Int(1));
        assert!(matches!(
            FluidStack::load_from_nbt(&wrong_type, &reg),
            Err(FluidError::MalformedTag { key: "FluidName", .. })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(
            FluidStack::new(Fluid::WATER, 1000).to_string(),
            "1000 mB minecraft:water"
        );
        assert_eq!(FluidStack::EMPTY.to_string(), "empty");
    }
}
