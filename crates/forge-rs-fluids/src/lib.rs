//! Fluid storage for block and item containers: fluid kinds, stacks, a
//! bounded single-fluid tank with simulate/execute transfers, and NBT
//! persistence of tank contents.

pub mod config;
pub mod error;
pub mod fluid;
pub mod handler;
pub mod item;
pub mod result;
pub mod stack;
pub mod tank;

pub use config::{FluidsConfig, TankPreset};
pub use error::FluidError;
pub use fluid::{Fluid, FluidRegistry};
pub use handler::{FluidAction, FluidHandler, HandlerType, Tank};
pub use item::ItemStack;
pub use result::FluidResult;
pub use stack::{FluidStack, BUCKET_VOLUME, MAX_AMOUNT};
pub use tank::{FluidTank, TankListener};
