//! Set-associative cache simulator CLI.
//!
//! This binary replays a memory trace against one cache configuration. It performs:
//! 1. **Configuration:** Built-in defaults, optionally a JSON file, then command-line overrides.
//! 2. **Simulation:** Labels every access `hit`, `compulsory`, `capacity`, or `conflict`
//!    and writes the annotated trace next to the input (`<trace>.simulated`).
//! 3. **Report:** Prints geometry, miss rate, miss count, and write-back count.

use std::path::PathBuf;
use std::{fs, process};

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::constants::KIB;
use cachesim_core::common::error::{ConfigError, SimError};
use cachesim_core::config::{Config, MalformedLinePolicy, ReplacementPolicy};
use cachesim_core::sim::runner;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a load/store trace against a set-associative cache and classify every access as a hit or a compulsory, capacity, or conflict miss.\n\nTrace lines are `<l|s> <address>` with a decimal or 0x-prefixed hexadecimal address.\n\nExamples:\n  cachesim -t traces/gcc.trace\n  cachesim -s 8 -w 4 -l 64 --lru -t traces/gcc.trace\n  cachesim --config cache.json -t traces/gcc.trace -o out.txt"
)]
struct Cli {
    /// Total cache size in KiB.
    #[arg(short = 's', long = "size", value_name = "KIB")]
    size_kib: Option<usize>,

    /// Number of ways in each set.
    #[arg(short, long)]
    ways: Option<usize>,

    /// Cache line size in bytes.
    #[arg(short = 'l', long = "line", value_name = "BYTES")]
    line_bytes: Option<usize>,

    /// Memory trace to simulate.
    #[arg(short, long)]
    trace: PathBuf,

    /// Use LRU replacement instead of FIFO.
    ///
    /// Always spelled `--lru`: a single-dash `-lru` is read as `-l ru` and rejected.
    #[arg(long)]
    lru: bool,

    /// JSON configuration file; command-line options override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Annotated output path (defaults to the trace path plus `.simulated`).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Warn about and skip malformed trace lines instead of aborting.
    #[arg(long)]
    skip_malformed: bool,

    /// Increase log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber.
///
/// Without `-v` the filter comes from `RUST_LOG`, defaulting to `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolves the configuration, runs the simulation, and prints the report.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = resolve_config(cli)?;
    let summary = runner::simulate_file(&config, &cli.trace, cli.output.as_deref())?;

    if let Some(path) = &summary.output_path {
        tracing::debug!(output = %path.display(), "annotated trace written");
    }
    summary.stats.print(&summary.geometry, summary.policy);
    Ok(())
}

/// Defaults, then the `--config` file, then individual flags.
fn resolve_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };

    if let Some(size_kib) = cli.size_kib {
        config.cache.size_bytes = size_kib
            .checked_mul(KIB)
            .ok_or(ConfigError::SizeOverflow { size_kib })?;
    }
    if let Some(ways) = cli.ways {
        config.cache.ways = ways;
    }
    if let Some(line_bytes) = cli.line_bytes {
        config.cache.line_bytes = line_bytes;
    }
    if cli.lru {
        config.cache.policy = ReplacementPolicy::Lru;
    }
    if cli.skip_malformed {
        config.trace.on_malformed = MalformedLinePolicy::Skip;
    }
    Ok(config)
}
