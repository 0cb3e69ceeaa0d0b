//! # AssocLib
//!
//! Assoclib is a library for simulating a single set-associative cache
//!
//! Given a cache geometry and a replacement policy (LRU, FIFO or random), a `CacheModel` splits
//! each address into tag, index and offset, decides hit or miss against the simulated contents,
//! updates the set the address maps to, and keeps hit and miss counts
//!
//! The model is pure state: it does no I/O and doesn't render anything. Trace records,
//! snapshots and statistics are plain data which callers display however they like
//!
//! ```
//! use assoclib::config::{CacheConfig, ReplacementPolicyConfig};
//! use assoclib::model::{CacheModel, Outcome};
//! let config = CacheConfig::new(1024, 64, 2, ReplacementPolicyConfig::LeastRecentlyUsed);
//! let mut model = CacheModel::new(config).unwrap();
//! assert_eq!(model.access(0x40).unwrap().outcome, Outcome::Miss);
//! assert_eq!(model.access(0x40).unwrap().outcome, Outcome::Hit);
//! ```

/// Contains the per-policy caches, and a utility enum dispatching over them
pub mod cache;

/// Contains the cache configuration, which can be parsed from JSON
pub mod config;

/// Contains the error types
pub mod error;

/// Contains the derivation of sets and bit widths from a configuration, and address decoding
pub mod geometry;

/// Contains helpers for reading address lists
pub mod io;

/// Contains the cache model and the records it produces
pub mod model;

/// Contains the sources of randomness for random replacement
pub mod random;

/// Contains the provided replacement policies, with a trait for implementing custom replacement
/// policies
pub mod replacement_policies;

/// Contains the bounded storage for the tags of one set
pub mod set;

#[cfg(test)]
mod test;
