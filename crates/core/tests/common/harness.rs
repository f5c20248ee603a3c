use std::io::Cursor;

use cachesim_core::common::addr::CacheGeometry;
use cachesim_core::common::error::SimError;
use cachesim_core::config::{Config, ReplacementPolicy};
use cachesim_core::sim::runner::{self, RunSummary};
use cachesim_core::sim::{AccessRecord, CacheSimulator, Classification};

/// Routes `tracing` output through the test harness capture.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("cachesim_core=trace")
        .try_init();
}

/// Builds a geometry that is known to be valid.
pub fn geometry(size_bytes: usize, ways: usize, line_bytes: usize) -> CacheGeometry {
    CacheGeometry::new(size_bytes, ways, line_bytes).unwrap()
}

/// Builds a simulator for a known-valid shape.
pub fn simulator(
    size_bytes: usize,
    ways: usize,
    line_bytes: usize,
    policy: ReplacementPolicy,
) -> CacheSimulator {
    CacheSimulator::new(geometry(size_bytes, ways, line_bytes), policy)
}

/// Feeds `trace` in order and collects the labels.
pub fn classify(sim: &mut CacheSimulator, trace: &[AccessRecord]) -> Vec<Classification> {
    trace
        .iter()
        .map(|&record| sim.access(record).classification)
        .collect()
}

/// Loads from each address in order.
pub fn loads(addresses: &[u32]) -> Vec<AccessRecord> {
    addresses.iter().copied().map(AccessRecord::load).collect()
}

/// Config for a cache of the given shape with default trace handling.
pub fn config(
    size_bytes: usize,
    ways: usize,
    line_bytes: usize,
    policy: ReplacementPolicy,
) -> Config {
    let mut config = Config::default();
    config.cache.size_bytes = size_bytes;
    config.cache.ways = ways;
    config.cache.line_bytes = line_bytes;
    config.cache.policy = policy;
    config
}

/// Runs `trace` through the in-memory runner, returning the annotated output.
pub fn run_text(config: &Config, trace: &str) -> Result<(String, RunSummary), SimError> {
    let mut output = Vec::new();
    let summary = runner::simulate(config, Cursor::new(trace), &mut output)?;
    Ok((String::from_utf8(output).unwrap(), summary))
}
