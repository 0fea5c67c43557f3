//! NBT (Named Binary Tag) model and the little-endian disk codec used to
//! persist block and item containers.

mod codec;
pub mod error;
pub mod tag;

pub use codec::{read_nbt_le, write_nbt_le, MAX_DEPTH};
pub use error::NbtError;
pub use tag::{NbtCompound, NbtRoot, NbtTag, TagType};
