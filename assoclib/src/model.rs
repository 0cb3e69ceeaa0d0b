use std::fmt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use crate::cache::{BoxedRandomSource, Cache, CacheTrait, GenericCache, Lookup};
use crate::config::{CacheConfig, ReplacementPolicyConfig};
use crate::error::{AddressOutOfRange, ConfigError};
use crate::geometry::Geometry;
use crate::random::{time_seed, XorShiftSource};
use crate::replacement_policies::{FirstInFirstOut, LeastRecentlyUsed, RandomReplacement};

/// Whether an access found its block resident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "HIT")]
    Hit,
    #[serde(rename = "MISS")]
    Miss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => f.write_str("HIT"),
            Outcome::Miss => f.write_str("MISS"),
        }
    }
}

/// The trace record for one access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    pub address: u64,
    /// `address / word_size`, display only
    pub word_address: u64,
    pub binary_address: String,
    pub tag: u64,
    pub tag_binary: String,
    pub index: u64,
    pub offset: u64,
    pub outcome: Outcome,
    /// The tag displaced from the set, when a miss hit a full set
    pub evicted: Option<u64>,
}

/// The contents of one set, front (next eviction candidate) to back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSnapshot {
    pub index: u64,
    pub tags: Vec<u64>,
    pub tags_binary: Vec<String>,
}

/// Aggregate statistics. Can be serialised for callers which want JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub policy: ReplacementPolicyConfig,
    pub cache_size_bytes: u64,
    pub block_size_bytes: u64,
    pub associativity: u64,
    pub num_sets: u64,
    pub hits: u64,
    pub misses: u64,
    /// Addresses skipped because they didn't fit in the address width
    pub rejected: u64,
    /// `hits / (hits + misses)`, or None before the first access
    pub hit_rate: Option<f64>,
}

impl CacheStats {
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate_percent(&self) -> Option<f64> {
        self.hit_rate.map(|rate| rate * 100.0)
    }
}

/// The result of a batch simulation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    /// One record per accepted address, in input order
    pub records: Vec<AccessRecord>,
    /// Addresses which were skipped, in input order
    pub rejected: Vec<AddressOutOfRange>,
}

/// A set-associative cache being simulated
///
/// A pure state machine: addresses go in one at a time (or in bulk), trace records come out,
/// and statistics and the cache contents can be read at any point. Each access depends on every
/// access before it, so a model must be fed in order from a single owner. Independent models
/// share nothing and can be run on separate threads.
pub struct CacheModel {
    config: CacheConfig,
    geometry: Geometry,
    cache: GenericCache,
    hits: u64,
    misses: u64,
    rejected: u64,
}

impl CacheModel {
    /// Creates a new model for a given configuration
    ///
    /// The random policy draws from an xorshift generator seeded with `config.seed`, or from the
    /// clock when no seed is configured
    ///
    /// # Arguments
    ///
    /// * `config`: A cache configuration, usually resulting from parsing JSON
    ///
    /// returns: Result<CacheModel, ConfigError>
    pub fn new(config: CacheConfig) -> Result<Self, ConfigError> {
        let seed = match config.seed {
            Some(seed) => seed,
            None => {
                let seed = time_seed();
                if config.policy == ReplacementPolicyConfig::Random {
                    info!(seed, "no seed configured for random replacement, using the clock");
                }
                seed
            }
        };
        Self::with_random_source(config, XorShiftSource::new(seed))
    }

    /// Creates a new model which uses `source` for random replacement. The source is ignored by
    /// the other policies.
    pub fn with_random_source<S>(config: CacheConfig, source: S) -> Result<Self, ConfigError>
    where
        S: crate::random::RandomSource + Send + 'static,
    {
        let geometry = Geometry::derive(&config)?;
        let num_sets = geometry.num_sets() as usize;
        let ways = config.associativity as usize;
        let cache = match config.policy {
            ReplacementPolicyConfig::LeastRecentlyUsed => {
                GenericCache::from(Cache::new(num_sets, ways, LeastRecentlyUsed))
            }
            ReplacementPolicyConfig::FirstInFirstOut => {
                GenericCache::from(Cache::new(num_sets, ways, FirstInFirstOut))
            }
            ReplacementPolicyConfig::Random => {
                let source: BoxedRandomSource = Box::new(source);
                GenericCache::from(Cache::new(num_sets, ways, RandomReplacement::new(source)))
            }
        };
        info!(
            policy = %config.policy,
            sets = geometry.num_sets(),
            ways,
            offset_bits = geometry.offset_bits(),
            index_bits = geometry.index_bits(),
            tag_bits = geometry.tag_bits(),
            "created cache model"
        );
        Ok(Self {
            config,
            geometry,
            cache,
            hits: 0,
            misses: 0,
            rejected: 0,
        })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Simulates one access
    ///
    /// An address which doesn't fit in the address width is rejected without touching the sets
    /// or the hit and miss counters
    ///
    /// # Arguments
    ///
    /// * `address`: The byte address of the access
    ///
    /// returns: Result<AccessRecord, AddressOutOfRange>
    pub fn access(&mut self, address: u64) -> Result<AccessRecord, AddressOutOfRange> {
        let decoded = self.geometry.decode(address)?;
        let lookup = self.cache.lookup_and_update(decoded.index as usize, decoded.tag);
        let outcome = if lookup.is_hit() {
            self.hits += 1;
            Outcome::Hit
        } else {
            self.misses += 1;
            Outcome::Miss
        };
        let evicted = match lookup {
            Lookup::Evict(evicted) => {
                debug!(
                    set = decoded.index,
                    evicted = %self.geometry.format_tag(evicted),
                    inserted = %decoded.tag_binary,
                    "evicted tag"
                );
                Some(evicted)
            }
            _ => None,
        };
        trace!(address, set = decoded.index, %outcome, "access");
        Ok(AccessRecord {
            address,
            word_address: address / self.config.word_size_bytes,
            binary_address: decoded.binary_address,
            tag: decoded.tag,
            tag_binary: decoded.tag_binary,
            index: decoded.index,
            offset: decoded.offset,
            outcome,
            evicted,
        })
    }

    /// Simulates a sequence of accesses in order
    ///
    /// Addresses which don't fit in the address width are skipped and reported in
    /// `Simulation::rejected`; the rest of the run carries on
    pub fn simulate<I>(&mut self, addresses: I) -> Simulation
    where
        I: IntoIterator<Item = u64>,
    {
        let mut simulation = Simulation::default();
        for address in addresses {
            match self.access(address) {
                Ok(record) => simulation.records.push(record),
                Err(e) => {
                    warn!("skipping access: {e}");
                    self.rejected += 1;
                    simulation.rejected.push(e);
                }
            }
        }
        simulation
    }

    /// Simulates a sequence of accesses in order, stopping at the first address which doesn't
    /// fit in the address width. Accesses before it remain applied to the model.
    pub fn simulate_strict<I>(&mut self, addresses: I) -> Result<Vec<AccessRecord>, AddressOutOfRange>
    where
        I: IntoIterator<Item = u64>,
    {
        addresses.into_iter().map(|address| self.access(address)).collect()
    }

    /// The resident tags of every set, front to back
    pub fn snapshot(&self) -> Vec<SetSnapshot> {
        self.cache
            .sets()
            .iter()
            .enumerate()
            .map(|(index, set)| SetSnapshot {
                index: index as u64,
                tags: set.iter().collect(),
                tags_binary: set.iter().map(|tag| self.geometry.format_tag(tag)).collect(),
            })
            .collect()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// `hits / (hits + misses)`, None when nothing has been accessed yet
    pub fn hit_rate(&self) -> Option<f64> {
        let accesses = self.hits + self.misses;
        if accesses == 0 {
            None
        } else {
            Some(self.hits as f64 / accesses as f64)
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            policy: self.config.policy,
            cache_size_bytes: self.config.cache_size_bytes,
            block_size_bytes: self.config.block_size_bytes,
            associativity: self.config.associativity,
            num_sets: self.geometry.num_sets(),
            hits: self.hits,
            misses: self.misses,
            rejected: self.rejected,
            hit_rate: self.hit_rate(),
        }
    }

    /// Gets the number of ways which have never been filled
    pub fn get_uninitialised_line_count(&self) -> usize {
        self.cache.get_uninitialised_line_count()
    }

    /// Empties the cache and zeroes the counters, ready for an independent run with the same
    /// configuration
    pub fn reset(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
        self.rejected = 0;
    }
}

impl fmt::Debug for CacheModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheModel")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .field("rejected", &self.rejected)
            .finish_non_exhaustive()
    }
}
