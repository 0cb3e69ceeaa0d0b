use serde::{Deserialize, Serialize};
use crate::config::CacheConfig;
use crate::error::{AddressOutOfRange, ConfigError};

/// The shape of a cache, derived once from a `CacheConfig`, along with the bit masks used to
/// split addresses into tag, index and offset
///
/// All of the sizes are powers of two, so the fields of an address are found by masking and
/// shifting rather than dividing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    address_bits: u32,
    offset_bits: u32,
    index_bits: u32,
    num_blocks: u64,
    num_sets: u64,
    offset_bit_mask: u64,
    set_selection_bit_mask: u64,
}

/// An address split into its cache fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedAddress {
    pub tag: u64,
    pub index: u64,
    pub offset: u64,
    /// The whole address, MSB first, zero padded to the address width
    pub binary_address: String,
    /// The tag field of `binary_address`. Empty when the tag has no bits
    pub tag_binary: String,
}

fn require_power_of_two(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigError::NotPowerOfTwo { field, value })
    }
}

impl Geometry {
    /// Validates a configuration and derives the cache geometry from it
    ///
    /// # Arguments
    ///
    /// * `config`: The cache configuration
    ///
    /// returns: Result<Geometry, ConfigError>
    pub fn derive(config: &CacheConfig) -> Result<Self, ConfigError> {
        if config.address_bits == 0 || config.address_bits > u64::BITS {
            return Err(ConfigError::UnsupportedAddressWidth(config.address_bits));
        }
        if !config.word_size_bytes.is_power_of_two() {
            return Err(ConfigError::InvalidWordSize(config.word_size_bytes));
        }
        require_power_of_two("cache size", config.cache_size_bytes)?;
        require_power_of_two("block size", config.block_size_bytes)?;
        require_power_of_two("associativity", config.associativity)?;
        if config.block_size_bytes > config.cache_size_bytes {
            return Err(ConfigError::BlockLargerThanCache {
                cache_size: config.cache_size_bytes,
                block_size: config.block_size_bytes,
            });
        }
        let fits = config.block_size_bytes
            .checked_mul(config.associativity)
            .map_or(false, |bytes_per_set| bytes_per_set <= config.cache_size_bytes);
        if !fits {
            return Err(ConfigError::AssociativityTooLarge {
                cache_size: config.cache_size_bytes,
                block_size: config.block_size_bytes,
                associativity: config.associativity,
            });
        }

        // Everything is a power of two from here, so these divisions are exact
        let num_blocks = config.cache_size_bytes / config.block_size_bytes;
        let num_sets = num_blocks / config.associativity;
        if num_sets == 0 {
            return Err(ConfigError::ZeroSets);
        }

        let offset_bits = config.block_size_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > config.address_bits {
            return Err(ConfigError::AddressWidthTooSmall {
                required: offset_bits + index_bits,
                available: config.address_bits,
            });
        }

        Ok(Self {
            address_bits: config.address_bits,
            offset_bits,
            index_bits,
            num_blocks,
            num_sets,
            offset_bit_mask: config.block_size_bytes - 1,
            set_selection_bit_mask: (num_sets - 1) << offset_bits,
        })
    }

    pub fn address_bits(&self) -> u32 {
        self.address_bits
    }

    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    pub fn tag_bits(&self) -> u32 {
        self.address_bits - self.offset_bits - self.index_bits
    }

    pub fn num_blocks(&self) -> u64 {
        self.num_blocks
    }

    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Whether an address can be represented in the address width
    pub fn contains(&self, address: u64) -> bool {
        address.checked_shr(self.address_bits).unwrap_or(0) == 0
    }

    /// Converts an address into a set index and a tag without rendering anything. Used on the
    /// lookup path; the address must already be known to fit.
    pub fn address_to_set_and_tag(&self, address: u64) -> (u64, u64) {
        let set = (address & self.set_selection_bit_mask) >> self.offset_bits;
        let tag = address.checked_shr(self.offset_bits + self.index_bits).unwrap_or(0);
        (set, tag)
    }

    /// Splits an address into tag, index and offset, and renders it in binary
    ///
    /// # Arguments
    ///
    /// * `address`: A byte address
    ///
    /// returns: Result<DecodedAddress, AddressOutOfRange>
    ///
    /// # Examples
    ///
    /// ```
    /// use assoclib::config::{CacheConfig, ReplacementPolicyConfig};
    /// use assoclib::geometry::Geometry;
    /// // 64 byte blocks, 4 sets
    /// let config = CacheConfig::new(256, 64, 1, ReplacementPolicyConfig::LeastRecentlyUsed);
    /// let geometry = Geometry::derive(&config).unwrap();
    /// let decoded = geometry.decode(0x142).unwrap();
    /// assert_eq!((decoded.tag, decoded.index, decoded.offset), (1, 1, 2));
    /// ```
    pub fn decode(&self, address: u64) -> Result<DecodedAddress, AddressOutOfRange> {
        if !self.contains(address) {
            return Err(AddressOutOfRange { address, address_bits: self.address_bits });
        }
        let (index, tag) = self.address_to_set_and_tag(address);
        let binary_address = format!("{:0width$b}", address, width = self.address_bits as usize);
        let tag_binary = binary_address[..self.tag_bits() as usize].to_string();
        Ok(DecodedAddress {
            tag,
            index,
            offset: address & self.offset_bit_mask,
            binary_address,
            tag_binary,
        })
    }

    /// Renders a tag the same way it appears in `DecodedAddress::tag_binary`
    pub fn format_tag(&self, tag: u64) -> String {
        if self.tag_bits() == 0 {
            String::new()
        } else {
            format!("{:0width$b}", tag, width = self.tag_bits() as usize)
        }
    }
}
