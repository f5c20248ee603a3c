//! End-to-end simulation runs.
//!
//! Connects a trace source, a [`CacheSimulator`], and an output sink. Each
//! access is echoed to the sink as its original line followed by a space and
//! its label (`hit`, `compulsory`, `capacity`, or `conflict`).

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::simulator::CacheSimulator;
use super::trace::TraceReader;
use crate::common::addr::CacheGeometry;
use crate::common::error::{SimError, TraceError};
use crate::config::{Config, MalformedLinePolicy, ReplacementPolicy};
use crate::stats::SimStats;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Geometry that was simulated.
    pub geometry: CacheGeometry,
    /// Replacement policy that was simulated.
    pub policy: ReplacementPolicy,
    /// Final counters.
    pub stats: SimStats,
    /// Annotated output file, when the run wrote one.
    pub output_path: Option<PathBuf>,
}

/// Default output path: the trace path with `suffix` appended.
pub fn default_output_path(trace_path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(trace_path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Simulates every access read from `input`, writing annotated lines to `output`.
///
/// # Errors
///
/// - [`SimError::Config`] if the cache shape is invalid (nothing is read).
/// - [`SimError::Trace`] on a read failure, or on a malformed line under
///   [`MalformedLinePolicy::Abort`].
/// - [`SimError::Output`] if writing to `output` fails.
pub fn simulate<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    output: W,
) -> Result<RunSummary, SimError> {
    let simulator = CacheSimulator::from_config(&config.cache)?;
    run(simulator, config.trace.on_malformed, input, output)
}

/// Simulates the trace at `trace_path`.
///
/// The annotated output goes to `output_path`, or to the trace path with the
/// configured suffix (`.simulated` by default) appended.
///
/// # Errors
///
/// As [`simulate`], plus [`SimError::Io`] when the trace cannot be opened or
/// the output cannot be created or written. The geometry is validated before
/// any file is touched.
pub fn simulate_file(
    config: &Config,
    trace_path: &Path,
    output_path: Option<&Path>,
) -> Result<RunSummary, SimError> {
    let simulator = CacheSimulator::from_config(&config.cache)?;

    let output_path = output_path.map_or_else(
        || default_output_path(trace_path, &config.trace.output_suffix),
        Path::to_path_buf,
    );
    let input = File::open(trace_path).map_err(|e| SimError::io(trace_path, e))?;
    let output = File::create(&output_path).map_err(|e| SimError::io(&output_path, e))?;

    let mut summary = run(
        simulator,
        config.trace.on_malformed,
        BufReader::new(input),
        BufWriter::new(output),
    )
    .map_err(|e| match e {
        SimError::Output(source) => SimError::io(&output_path, source),
        SimError::Trace(TraceError::Io(source)) => SimError::io(trace_path, source),
        other => other,
    })?;
    summary.output_path = Some(output_path);
    Ok(summary)
}

/// The fold over the trace shared by [`simulate`] and [`simulate_file`].
fn run<R: BufRead, W: Write>(
    mut simulator: CacheSimulator,
    on_malformed: MalformedLinePolicy,
    input: R,
    mut output: W,
) -> Result<RunSummary, SimError> {
    for entry in TraceReader::new(input) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(TraceError::Malformed {
                line_number,
                line,
                kind,
            }) if on_malformed == MalformedLinePolicy::Skip => {
                warn!(line_number, line = %line, "skipping malformed trace line: {kind}");
                simulator.stats_mut().skipped_lines += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = simulator.access(entry.record);
        writeln!(output, "{} {}", entry.line, outcome.classification).map_err(SimError::Output)?;
    }
    output.flush().map_err(SimError::Output)?;

    debug!(
        accesses = simulator.stats().accesses(),
        distinct_lines = simulator.distinct_lines(),
        shadow_occupancy = simulator.shadow().occupancy(),
        "trace complete"
    );

    Ok(RunSummary {
        geometry: *simulator.geometry(),
        policy: simulator.policy(),
        stats: simulator.into_stats(),
        output_path: None,
    })
}
