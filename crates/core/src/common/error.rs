//! Error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Invalid cache geometry or an unparsable config file.
//! 2. **Trace Errors:** A malformed trace line, or a read failure on the trace source.
//! 3. **Simulation Errors:** The top-level error returned by the runner, which also
//!    carries the path of any file that could not be opened or written.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache configuration. Fatal: the simulation does not start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A geometry parameter was zero.
    #[error("{field} must be non-zero")]
    Zero {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// A geometry parameter was not a power of two.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// `line_bytes * ways` exceeds the total size, leaving no complete set.
    #[error(
        "cache of {size_bytes} bytes cannot hold one set of {ways} x {line_bytes}-byte lines"
    )]
    TooFewSets {
        /// Total capacity in bytes.
        size_bytes: usize,
        /// Line size in bytes.
        line_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// Offset and index fields together need more than 32 address bits.
    #[error("offset ({offset_bits} bits) and index ({index_bits} bits) exceed a 32-bit address")]
    AddressBitsExceeded {
        /// Width of the offset field.
        offset_bits: u32,
        /// Width of the index field.
        index_bits: u32,
    },

    /// A size given in KiB does not fit in a byte count.
    #[error("cache size of {size_kib} KiB overflows")]
    SizeOverflow {
        /// The requested size in KiB.
        size_kib: usize,
    },

    /// A JSON configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single trace line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TraceErrorKind {
    /// The operation token is not `l` or `s`.
    #[error("unknown operation `{0}` (expected `l` or `s`)")]
    UnknownOperation(String),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidEncoding,

    /// The line has an operation but no address.
    #[error("missing address")]
    MissingAddress,

    /// The address token is not a decimal or `0x`-prefixed hexadecimal number.
    #[error("invalid address `{0}`")]
    InvalidAddress(String),

    /// The address parsed but does not fit in 32 bits.
    #[error("address `{0}` does not fit in 32 bits")]
    AddressOutOfRange(String),

    /// Extra tokens follow the address.
    #[error("unexpected trailing token `{0}`")]
    TrailingTokens(String),
}

/// Failure while reading or parsing the trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A line that does not parse as `<op> <address>`.
    #[error("trace line {line_number}: {kind} in {line:?}")]
    Malformed {
        /// 1-based line number in the trace source.
        line_number: usize,
        /// The offending line, without its terminator.
        line: String,
        /// What was wrong with it.
        kind: TraceErrorKind,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
}

/// Top-level error of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed or unreadable trace.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// A file could not be opened, read, or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Writing an annotated line to the output sink failed.
    #[error("failed to write simulation output: {0}")]
    Output(#[source] io::Error),
}

impl SimError {
    /// Attaches a file path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
