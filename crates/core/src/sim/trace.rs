//! Trace Format and Reader.
//!
//! A trace is plain text with one access per line:
//!
//! ```text
//! l 0x1fffff40
//! s 4096
//! ```
//!
//! The first token is the operation (`l` load, `s` store, either case), the
//! second the address, hexadecimal with a `0x` prefix or decimal otherwise.
//! Tokens are split on whitespace. Blank lines are ignored; anything else that
//! does not match the format is rejected with the offending line attached.

use std::fmt;
use std::io::BufRead;

use crate::common::constants::HEX_PREFIX;
use crate::common::error::{TraceError, TraceErrorKind};

/// Memory operation of a trace access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read access.
    Load,
    /// Write access; marks the line dirty.
    Store,
}

impl Operation {
    /// Parses an operation token (`l`, `L`, `s`, or `S`).
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "l" | "L" => Some(Self::Load),
            "s" | "S" => Some(Self::Store),
            _ => None,
        }
    }

    /// Whether this operation writes.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "l"),
            Self::Store => write!(f, "s"),
        }
    }
}

/// One memory access: what was done, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    /// Load or store.
    pub operation: Operation,
    /// Byte address.
    pub address: u32,
}

impl AccessRecord {
    /// A load from `address`.
    pub const fn load(address: u32) -> Self {
        Self {
            operation: Operation::Load,
            address,
        }
    }

    /// A store to `address`.
    pub const fn store(address: u32) -> Self {
        Self {
            operation: Operation::Store,
            address,
        }
    }

    /// Parses one trace line.
    ///
    /// Returns `Ok(None)` for a blank line.
    ///
    /// # Errors
    ///
    /// Returns the [`TraceErrorKind`] describing why a non-blank line does not
    /// match `<op> <address>`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, TraceErrorKind> {
        let mut tokens = line.split_whitespace();
        let Some(op_token) = tokens.next() else {
            return Ok(None);
        };
        let operation = Operation::parse(op_token)
            .ok_or_else(|| TraceErrorKind::UnknownOperation(op_token.to_string()))?;
        let address = parse_address(tokens.next().ok_or(TraceErrorKind::MissingAddress)?)?;
        if let Some(extra) = tokens.next() {
            return Err(TraceErrorKind::TrailingTokens(extra.to_string()));
        }
        Ok(Some(Self { operation, address }))
    }
}

impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.operation, self.address)
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal 32-bit address.
fn parse_address(token: &str) -> Result<u32, TraceErrorKind> {
    let (digits, radix) = match token.get(..HEX_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(HEX_PREFIX) => {
            (&token[HEX_PREFIX.len()..], 16)
        }
        _ => (token, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(TraceErrorKind::InvalidAddress(token.to_string()));
    }
    u32::from_str_radix(digits, radix)
        .map_err(|_| TraceErrorKind::AddressOutOfRange(token.to_string()))
}

/// A parsed access together with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// 1-based line number in the source.
    pub line_number: usize,
    /// The source line without its terminator, echoed to the output.
    pub line: String,
    /// The parsed access.
    pub record: AccessRecord,
}

/// Lazy iterator over the accesses of a trace.
///
/// Reads one line at a time and yields entries in source order, skipping blank
/// lines. A malformed line, including one that is not valid UTF-8, yields
/// [`TraceError::Malformed`] and iteration may continue past it; a read
/// failure yields [`TraceError::Io`].
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line_number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: Vec::new(),
        }
    }

    /// Number of source lines consumed so far, blank ones included.
    pub const fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEntry, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
            self.line_number += 1;

            let raw = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf[..]);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let Ok(line) = std::str::from_utf8(raw) else {
                return Some(Err(TraceError::Malformed {
                    line_number: self.line_number,
                    line: String::from_utf8_lossy(raw).into_owned(),
                    kind: TraceErrorKind::InvalidEncoding,
                }));
            };
            match AccessRecord::parse_line(line) {
                Ok(None) => {}
                Ok(Some(record)) => {
                    return Some(Ok(TraceEntry {
                        line_number: self.line_number,
                        line: line.to_string(),
                        record,
                    }));
                }
                Err(kind) => {
                    return Some(Err(TraceError::Malformed {
                        line_number: self.line_number,
                        line: line.to_string(),
                        kind,
                    }));
                }
            }
        }
    }
}
