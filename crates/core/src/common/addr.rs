//! Cache Geometry and Address Decoding.
//!
//! This module splits a 32-bit address into the three fields a cache uses to
//! locate a line. It provides the following:
//! 1. **Geometry:** `CacheGeometry` validates size, associativity, and line size
//!    and derives the set count and field widths.
//! 2. **Field Extraction:** Pure `index`, `tag`, and `line_address` functions.
//! 3. **Shadow Geometry:** The fully-associative view of the same capacity, where
//!    the index field vanishes and the tag spans every bit above the offset.

use super::constants::ADDRESS_BITS;
use super::error::ConfigError;

/// Shifts right, yielding zero when the shift covers the whole word.
#[inline(always)]
const fn shr(value: u32, amount: u32) -> u32 {
    if amount >= ADDRESS_BITS {
        0
    } else {
        value >> amount
    }
}

/// Mask of the `bits` lowest bits.
#[inline(always)]
const fn low_mask(bits: u32) -> u32 {
    if bits >= ADDRESS_BITS {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Extracts the set index: `index_bits` bits directly above the offset field.
///
/// The result is always `< 2^index_bits`; with `index_bits == 0` it is zero.
#[inline(always)]
pub const fn index(address: u32, offset_bits: u32, index_bits: u32) -> u32 {
    shr(address, offset_bits) & low_mask(index_bits)
}

/// Extracts the tag: `tag_bits` bits above the index field.
///
/// With `index_bits == 0` this is every bit above the offset, which is the tag
/// used by the fully-associative shadow cache.
#[inline(always)]
pub const fn tag(address: u32, offset_bits: u32, index_bits: u32, tag_bits: u32) -> u32 {
    shr(address, offset_bits + index_bits) & low_mask(tag_bits)
}

/// Line-aligned address (`address >> offset_bits`), the unit of first-touch tracking.
#[inline(always)]
pub const fn line_address(address: u32, offset_bits: u32) -> u32 {
    shr(address, offset_bits)
}

/// An address split into its cache fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Tag stored alongside the line.
    pub tag: u32,
    /// Set the line maps to.
    pub index: u32,
    /// Byte offset within the line.
    pub offset: u32,
}

/// Validated cache geometry with its derived bit widths.
///
/// Construct with [`CacheGeometry::new`]; the invariants below hold for every
/// instance:
/// - `line_bytes`, `ways`, and `sets` are powers of two.
/// - `sets * ways * line_bytes == size_bytes`.
/// - `offset_bits + index_bits + tag_bits == 32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    size_bytes: usize,
    ways: usize,
    line_bytes: usize,
    sets: usize,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

impl CacheGeometry {
    /// Validates a cache shape and derives sets and field widths.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total data capacity in bytes.
    /// * `ways` - Associativity (lines per set).
    /// * `line_bytes` - Line (block) size in bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter is zero or not a power of two,
    /// if one set does not fit in `size_bytes`, or if the offset and index fields
    /// need more than 32 address bits.
    pub fn new(size_bytes: usize, ways: usize, line_bytes: usize) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("size_bytes", size_bytes),
            ("ways", ways),
            ("line_bytes", line_bytes),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { field, value });
            }
        }

        let set_bytes = line_bytes
            .checked_mul(ways)
            .filter(|&bytes| bytes <= size_bytes)
            .ok_or(ConfigError::TooFewSets {
                size_bytes,
                line_bytes,
                ways,
            })?;
        let sets = size_bytes / set_bytes;

        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = sets.trailing_zeros();
        if offset_bits + index_bits > ADDRESS_BITS {
            return Err(ConfigError::AddressBitsExceeded {
                offset_bits,
                index_bits,
            });
        }

        Ok(Self {
            size_bytes,
            ways,
            line_bytes,
            sets,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_BITS - offset_bits - index_bits,
        })
    }

    /// The same capacity and line size arranged as one fully-associative set.
    ///
    /// Used by the shadow cache: `ways` becomes the total line count, there are
    /// no index bits, and the tag spans every bit above the offset.
    pub const fn fully_associative(&self) -> Self {
        Self {
            size_bytes: self.size_bytes,
            ways: self.sets * self.ways,
            line_bytes: self.line_bytes,
            sets: 1,
            offset_bits: self.offset_bits,
            index_bits: 0,
            tag_bits: ADDRESS_BITS - self.offset_bits,
        }
    }

    /// Total capacity in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Associativity (lines per set).
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Total number of line slots (`sets * ways`).
    pub const fn total_lines(&self) -> usize {
        self.sets * self.ways
    }

    /// Width of the byte-offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set-index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Set index of `address` under this geometry.
    #[inline]
    pub const fn index_of(&self, address: u32) -> usize {
        index(address, self.offset_bits, self.index_bits) as usize
    }

    /// Tag of `address` under this geometry.
    #[inline]
    pub const fn tag_of(&self, address: u32) -> u32 {
        tag(address, self.offset_bits, self.index_bits, self.tag_bits)
    }

    /// Line-aligned address of `address`.
    #[inline]
    pub const fn line_of(&self, address: u32) -> u32 {
        line_address(address, self.offset_bits)
    }

    /// Splits `address` into tag, index, and offset.
    pub const fn decode(&self, address: u32) -> DecodedAddress {
        DecodedAddress {
            tag: self.tag_of(address),
            index: index(address, self.offset_bits, self.index_bits),
            offset: address & low_mask(self.offset_bits),
        }
    }
}
