//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays a memory-access trace against a single-level cache and
//! labels every access. It is organized as follows:
//! 1. **Common:** Address decoding into tag/index/offset fields, constants, and error types.
//! 2. **Config:** Cache geometry and replacement policy, deserializable from JSON.
//! 3. **Cache:** Set-associative engine (FIFO/LRU), the fully-associative shadow
//!    used for miss classification, and the first-touch tracker.
//! 4. **Simulation:** Trace parsing, the per-access state machine, and the file runner.
//! 5. **Statistics:** Hit/miss/write-back counters and the final report.

/// Common types and constants (address decoding, errors).
pub mod common;
/// Simulator configuration (defaults, replacement policy, geometry validation).
pub mod config;
/// Cache model (set-associative engine, policies, shadow cache, compulsory tracker).
pub mod cache;
/// Trace parsing, the per-access simulator, and the end-to-end runner.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Validated cache geometry with derived bit widths.
pub use crate::common::addr::CacheGeometry;
/// Per-access simulator; feed it `AccessRecord`s in trace order.
pub use crate::sim::simulator::{CacheSimulator, Classification};
/// Aggregate counters produced by a run.
pub use crate::stats::SimStats;
