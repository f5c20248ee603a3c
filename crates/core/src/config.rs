//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a run. It provides:
//! 1. **Defaults:** The baseline cache shape (32 KiB, direct-mapped, 32-byte lines, FIFO).
//! 2. **Structures:** Cache shape and trace-handling settings.
//! 3. **Enums:** Replacement policy and malformed-line policy.
//!
//! Configuration is supplied as JSON (`--config`) or built from command-line
//! flags on top of `Config::default()`.

use serde::Deserialize;

use crate::common::addr::CacheGeometry;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 32;

    /// Default cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Suffix appended to the trace path to name the annotated output file.
    pub const OUTPUT_SUFFIX: &str = ".simulated";
}

/// Cache replacement policy algorithms.
///
/// Selects which line in a full set is evicted to make room for a new one.
/// The same policy drives both the real cache and its fully-associative shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// First In First Out replacement policy.
    ///
    /// Evicts the oldest line in the set (round-robin), ignoring hits.
    #[default]
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
}

impl ReplacementPolicy {
    /// Short display name used in reports and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Lru => "LRU",
        }
    }
}

/// What the runner does with a trace line that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MalformedLinePolicy {
    /// Stop the run and report the offending line.
    #[default]
    Abort,
    /// Log a warning, count the line as skipped, and continue.
    Skip,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::{Config, ReplacementPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 32 * 1024);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Fifo);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{Config, MalformedLinePolicy, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": {
///         "size_bytes": 1024,
///         "ways": 2,
///         "line_bytes": 32,
///         "policy": "Lru"
///     },
///     "trace": {
///         "on_malformed": "Skip"
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.ways, 2);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Lru);
/// assert_eq!(config.trace.on_malformed, MalformedLinePolicy::Skip);
/// assert_eq!(config.trace.output_suffix, ".simulated");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Cache shape and replacement policy.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Trace parsing and output settings.
    #[serde(default)]
    pub trace: TraceConfig,
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// Missing sections and fields take their defaults. The cache geometry is
    /// not validated here; call [`CacheConfig::geometry`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is not valid JSON or a
    /// field has the wrong type or an unknown variant.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration for the simulated cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Total cache size in bytes.
    #[serde(default = "CacheConfig::default_size_bytes")]
    pub size_bytes: usize,
    /// Associativity (number of ways per set).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,
    /// Line size in bytes.
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: usize,
    /// Replacement policy for full sets.
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size_bytes() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default line size in bytes.
    fn default_line_bytes() -> usize {
        defaults::CACHE_LINE
    }

    /// Validates the shape and derives the cache geometry.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a parameter is zero or not a power of two,
    /// or when the shape leaves no complete set.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(self.size_bytes, self.ways, self.line_bytes)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            ways: defaults::CACHE_WAYS,
            line_bytes: defaults::CACHE_LINE,
            policy: ReplacementPolicy::default(),
        }
    }
}

/// Trace handling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    /// Policy for lines that do not parse as `<op> <address>`.
    #[serde(default)]
    pub on_malformed: MalformedLinePolicy,
    /// Suffix appended to the trace path to form the output path.
    #[serde(default = "TraceConfig::default_output_suffix")]
    pub output_suffix: String,
}

impl TraceConfig {
    /// Returns the default output suffix.
    fn default_output_suffix() -> String {
        defaults::OUTPUT_SUFFIX.to_string()
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            on_malformed: MalformedLinePolicy::default(),
            output_suffix: Self::default_output_suffix(),
        }
    }
}
