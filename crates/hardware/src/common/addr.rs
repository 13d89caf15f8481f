//! Address decomposition.
//!
//! This module splits a 64-bit memory address into the three fields a
//! set-associative cache indexes by. It provides the following:
//! 1. **Layout:** `AddressLayout` records the set-index and block-offset widths.
//! 2. **Decomposition:** Pure extraction of `(tag, set_index, block_offset)`.
//! 3. **Masks:** Width-safe bit masks that tolerate fields up to the full address width.

use super::constants::ADDRESS_BITS;

/// Returns a mask with the low `bits` bits set.
///
/// Widths of `ADDRESS_BITS` or more yield an all-ones mask instead of
/// overflowing the shift.
#[inline(always)]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Bit-field widths used to split an address.
///
/// The block offset occupies the lowest `block_bits` bits, the set index the
/// next `set_bits` bits, and the tag everything above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    /// Number of set-index bits (`s`).
    pub set_bits: u32,
    /// Number of block-offset bits (`b`).
    pub block_bits: u32,
}

/// An address split into its cache fields.
///
/// Derived per access and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecomposedAddress {
    /// High-order bits identifying a line within its set.
    pub tag: u64,
    /// Index of the set the address maps to, in `0..2^set_bits`.
    pub set_index: usize,
    /// Byte offset within the cache block.
    pub block_offset: u64,
}

impl AddressLayout {
    /// Creates a layout from the set-index and block-offset widths.
    #[inline(always)]
    pub const fn new(set_bits: u32, block_bits: u32) -> Self {
        Self {
            set_bits,
            block_bits,
        }
    }

    /// Splits `addr` into tag, set index, and block offset.
    ///
    /// * `block_offset = addr & ((1 << b) - 1)`
    /// * `set_index = (addr >> b) & ((1 << s) - 1)`
    /// * `tag = addr >> (b + s)`
    ///
    /// Shifts past bit 63 produce zero rather than panicking.
    #[inline]
    pub fn decompose(&self, addr: u64) -> DecomposedAddress {
        let block_offset = addr & low_mask(self.block_bits);
        let set_index = addr.checked_shr(self.block_bits).unwrap_or(0) & low_mask(self.set_bits);
        let tag = addr
            .checked_shr(self.block_bits.saturating_add(self.set_bits))
            .unwrap_or(0);

        DecomposedAddress {
            tag,
            set_index: set_index as usize,
            block_offset,
        }
    }
}
