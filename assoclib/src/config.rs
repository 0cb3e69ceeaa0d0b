use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Width of the simulated address bus unless the configuration says otherwise
pub const DEFAULT_ADDRESS_BITS: u32 = 32;

/// Word size used to derive the word address of an access
pub const DEFAULT_WORD_SIZE: u64 = 4;

/// A configuration for a single set-associative cache
///
/// Usually parsed from JSON, e.g.
///
/// ```json
/// { "cache_size": 1024, "block_size": 64, "associativity": 2, "policy": "LRU" }
/// ```
///
/// Nothing is validated here; `Geometry::derive` (and therefore `CacheModel::new`) rejects
/// configurations which don't describe a real cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(alias = "cache_size", alias = "size")]
    pub cache_size_bytes: u64,
    #[serde(alias = "block_size", alias = "line_size")]
    pub block_size_bytes: u64,
    #[serde(alias = "ways")]
    pub associativity: u64,
    #[serde(default, alias = "replacement_policy")]
    pub policy: ReplacementPolicyConfig,
    #[serde(default = "default_address_bits")]
    pub address_bits: u32,
    #[serde(default = "default_word_size", alias = "word_size")]
    pub word_size_bytes: u64,
    /// Seed for the random replacement policy. Ignored by the other policies
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_address_bits() -> u32 {
    DEFAULT_ADDRESS_BITS
}

fn default_word_size() -> u64 {
    DEFAULT_WORD_SIZE
}

impl CacheConfig {
    pub fn new(cache_size_bytes: u64, block_size_bytes: u64, associativity: u64, policy: ReplacementPolicyConfig) -> Self {
        Self {
            cache_size_bytes,
            block_size_bytes,
            associativity,
            policy,
            address_bits: DEFAULT_ADDRESS_BITS,
            word_size_bytes: DEFAULT_WORD_SIZE,
            seed: None,
        }
    }

    pub fn with_address_bits(mut self, address_bits: u32) -> Self {
        self.address_bits = address_bits;
        self
    }

    pub fn with_word_size(mut self, word_size_bytes: u64) -> Self {
        self.word_size_bytes = word_size_bytes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The replacement policy - lru, fifo, or random. Defaults to LRU.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplacementPolicyConfig {
    #[serde(rename = "LRU", alias = "lru", alias = "LeastRecentlyUsed")]
    LeastRecentlyUsed,
    #[serde(rename = "FIFO", alias = "fifo", alias = "FirstInFirstOut")]
    FirstInFirstOut,
    #[serde(rename = "Random", alias = "random", alias = "RANDOM")]
    Random,
}

impl Default for ReplacementPolicyConfig {
    fn default() -> Self {
        ReplacementPolicyConfig::LeastRecentlyUsed
    }
}

impl fmt::Display for ReplacementPolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacementPolicyConfig::LeastRecentlyUsed => "LRU",
            ReplacementPolicyConfig::FirstInFirstOut => "FIFO",
            ReplacementPolicyConfig::Random => "Random",
        };
        f.write_str(name)
    }
}

impl FromStr for ReplacementPolicyConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" | "leastrecentlyused" => Ok(ReplacementPolicyConfig::LeastRecentlyUsed),
            "fifo" | "firstinfirstout" => Ok(ReplacementPolicyConfig::FirstInFirstOut),
            "random" | "rand" => Ok(ReplacementPolicyConfig::Random),
            _ => Err(format!("Unknown replacement policy '{s}', expected one of LRU, FIFO, Random")),
        }
    }
}
