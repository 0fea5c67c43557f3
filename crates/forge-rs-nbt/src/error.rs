//! Errors raised while decoding NBT.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NbtError {
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("root tag must be a compound, got type {got}")]
    ExpectedCompound { got: u8 },

    #[error("unknown tag type: {0}")]
    UnknownTagType(u8),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("compound nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("negative length prefix: {0}")]
    NegativeLength(i32),
}
