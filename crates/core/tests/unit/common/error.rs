//! Error Type Tests.
//!
//! Verifies the messages and source chains of configuration, trace, and
//! top-level simulation errors.

use std::error::Error as _;
use std::io;

use cachesim_core::common::error::{ConfigError, SimError, TraceError, TraceErrorKind};
use cachesim_core::config::Config;

// ══════════════════════════════════════════════════════════
// 1. Configuration errors
// ══════════════════════════════════════════════════════════

#[test]
fn zero_parameter_message_names_field() {
    let err = ConfigError::Zero { field: "ways" };
    assert_eq!(err.to_string(), "ways must be non-zero");
}

#[test]
fn non_power_of_two_message_includes_value() {
    let err = ConfigError::NotPowerOfTwo {
        field: "line_bytes",
        value: 24,
    };
    assert_eq!(err.to_string(), "line_bytes must be a power of two, got 24");
}

#[test]
fn too_few_sets_message_describes_shape() {
    let err = ConfigError::TooFewSets {
        size_bytes: 64,
        line_bytes: 32,
        ways: 4,
    };
    assert_eq!(
        err.to_string(),
        "cache of 64 bytes cannot hold one set of 4 x 32-byte lines"
    );
}

/// A JSON failure keeps serde's error as its source.
#[test]
fn json_error_keeps_source() {
    let err = Config::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("invalid configuration: "));
    assert!(err.source().is_some());
}

// ══════════════════════════════════════════════════════════
// 2. Trace errors
// ══════════════════════════════════════════════════════════

/// The malformed-line message carries the line number, the reason, and the text.
#[test]
fn malformed_line_message_locates_the_line() {
    let err = TraceError::Malformed {
        line_number: 7,
        line: "x 0x10".to_string(),
        kind: TraceErrorKind::UnknownOperation("x".to_string()),
    };
    assert_eq!(
        err.to_string(),
        "trace line 7: unknown operation `x` (expected `l` or `s`) in \"x 0x10\""
    );
}

#[test]
fn trace_error_kind_messages() {
    assert_eq!(TraceErrorKind::MissingAddress.to_string(), "missing address");
    assert_eq!(
        TraceErrorKind::InvalidEncoding.to_string(),
        "line is not valid UTF-8"
    );
    assert_eq!(
        TraceErrorKind::InvalidAddress("0xZZ".to_string()).to_string(),
        "invalid address `0xZZ`"
    );
    assert_eq!(
        TraceErrorKind::AddressOutOfRange("0x100000000".to_string()).to_string(),
        "address `0x100000000` does not fit in 32 bits"
    );
    assert_eq!(
        TraceErrorKind::TrailingTokens("junk".to_string()).to_string(),
        "unexpected trailing token `junk`"
    );
}

// ══════════════════════════════════════════════════════════
// 3. Simulation errors
// ══════════════════════════════════════════════════════════

/// Configuration and trace errors pass through unchanged.
#[test]
fn wrapped_errors_are_transparent() {
    let config = SimError::from(ConfigError::Zero { field: "size_bytes" });
    assert_eq!(config.to_string(), "size_bytes must be non-zero");

    let trace = SimError::from(TraceError::Malformed {
        line_number: 1,
        line: "l".to_string(),
        kind: TraceErrorKind::MissingAddress,
    });
    assert_eq!(trace.to_string(), "trace line 1: missing address in \"l\"");
}

/// I/O failures are reported with the file that caused them.
#[test]
fn io_error_names_the_path() {
    let err = SimError::io(
        "traces/missing.trace",
        io::Error::new(io::ErrorKind::NotFound, "no such file"),
    );
    assert_eq!(err.to_string(), "traces/missing.trace: no such file");
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "no such file");
}
