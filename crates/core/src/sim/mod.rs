//! Simulation driver.
//!
//! Turns a trace into labelled accesses. It provides:
//! 1. **Trace parsing:** A lazy reader yielding one access per non-blank line.
//! 2. **Simulator:** The per-access state machine over the cache components.
//! 3. **Runner:** Wires a reader, a simulator, and an output sink together.

/// End-to-end runs over readers/writers or trace files.
pub mod runner;
/// Per-access classification state machine.
pub mod simulator;
/// Trace line format and the lazy trace reader.
pub mod trace;

pub use runner::{RunSummary, simulate, simulate_file};
pub use simulator::{AccessOutcome, CacheSimulator, Classification};
pub use trace::{AccessRecord, Operation, TraceEntry, TraceReader};
