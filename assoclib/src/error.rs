use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a `CacheConfig` can't be turned into a cache. No partial model is ever built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo { field: &'static str, value: u64 },

    #[error("block size ({block_size} bytes) is larger than the cache ({cache_size} bytes)")]
    BlockLargerThanCache { cache_size: u64, block_size: u64 },

    #[error("block size x associativity ({block_size} x {associativity}) exceeds the cache size ({cache_size} bytes)")]
    AssociativityTooLarge { cache_size: u64, block_size: u64, associativity: u64 },

    #[error("the configuration yields zero sets")]
    ZeroSets,

    #[error("offset and index need {required} address bits but only {available} are available")]
    AddressWidthTooSmall { required: u32, available: u32 },

    #[error("address width must be between 1 and 64 bits, got {0}")]
    UnsupportedAddressWidth(u32),

    #[error("word size must be a non-zero power of two, got {0}")]
    InvalidWordSize(u64),
}

/// An address which doesn't fit in the configured address width. The model is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("address {address:#x} does not fit in {address_bits} bits")]
pub struct AddressOutOfRange {
    pub address: u64,
    pub address_bits: u32,
}

/// A token in an address list which isn't a valid number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid address '{token}' at position {position}")]
pub struct ParseError {
    pub token: String,
    /// Zero-based position of the token in the list
    pub position: usize,
}

/// Failure to read an address list from a file
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("couldn't read the trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("the trace is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
