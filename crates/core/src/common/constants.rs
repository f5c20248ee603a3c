//! Global Simulator Constants.
//!
//! Address width and unit constants shared by geometry validation, address
//! decoding, and the command-line front end.

/// Width of a simulated address in bits.
///
/// Traces carry 32-bit addresses; `offset + index + tag` always sums to this.
pub const ADDRESS_BITS: u32 = 32;

/// Bytes per KiB. The command line takes the cache size in KiB.
pub const KIB: usize = 1024;

/// Prefix marking a hexadecimal address in a trace line.
pub const HEX_PREFIX: &str = "0x";
