//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache model and the
//! simulation driver. It includes:
//! 1. **Address Decoding:** Cache geometry and tag/index/offset extraction.
//! 2. **Constants:** Address width and unit constants.
//! 3. **Error Handling:** Configuration, trace, and top-level simulation errors.

/// Cache geometry and address field extraction.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, trace parsing, and simulation runs.
pub mod error;

pub use addr::{CacheGeometry, DecodedAddress};
pub use constants::ADDRESS_BITS;
pub use error::{ConfigError, SimError, TraceError, TraceErrorKind};
