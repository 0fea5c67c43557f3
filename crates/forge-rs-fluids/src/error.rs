//! Fluid error types.

use forge_rs_nbt::NbtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FluidError {
    #[error("invalid fluid name {0:?} (expected namespace:path, lowercase)")]
    InvalidName(String),

    #[error("unknown fluid: {0}")]
    UnknownFluid(String),

    #[error("invalid fluid amount: {0}")]
    InvalidAmount(i32),

    #[error("malformed tag {key}: expected {expected}")]
    MalformedTag {
        key: &'static str,
        expected: &'static str,
    },

    #[error("NBT error: {0}")]
    Nbt(#[from] NbtError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
