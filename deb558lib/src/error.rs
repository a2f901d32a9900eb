//! Single error type of the public API.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Deb558Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Normalized input does not split into whole blocks; `block` is the
    /// index of the incomplete trailing block.
    #[error("malformed input: block {block} is incomplete, {length} characters is not a multiple of the {block_size}-character block size")]
    MalformedInput {
        block: usize,
        length: usize,
        block_size: usize,
    },

    #[error("block {block}: unknown record kind {found:?}")]
    UnknownRecordKind { block: usize, found: char },

    #[error("block {block}: unknown detail record type {found:?}")]
    UnknownDetailType { block: usize, found: char },

    /// Only raised when strict integer parsing is enabled.
    #[error("block {block}: field {field} is not an integer: {value:?}")]
    InvalidInteger {
        block: usize,
        field: &'static str,
        value: String,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record type asked for a field its layout does not provide.
    #[error("layout mismatch for field {field}")]
    FieldMismatch { field: &'static str },
}

pub type Result<T> = std::result::Result<T, Deb558Error>;
