//! Per-access cache simulator.
//!
//! Each access gets exactly one label:
//! 1. **Compulsory:** the line was never touched before. It is installed.
//! 2. **Hit:** the line is resident. A store marks it dirty.
//! 3. **Conflict:** a repeat miss whose line the fully-associative shadow
//!    still holds; limited associativity lost it.
//! 4. **Capacity:** a repeat miss the shadow also misses.
//!
//! After classification the shadow is updated and the line recorded in the
//! history, whatever the outcome. Accesses must arrive in trace order: every
//! component state depends on everything before it.

use std::fmt;

use tracing::{debug, trace};

use super::trace::AccessRecord;
use crate::cache::{CompulsoryTracker, SetAssocCache, ShadowCache};
use crate::common::addr::CacheGeometry;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType};
use crate::stats::SimStats;

/// Outcome label of one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Line resident in the cache.
    Hit,
    /// First access ever to the line.
    Compulsory,
    /// Would have missed even with full associativity.
    Capacity,
    /// Missed only because of limited associativity.
    Conflict,
}

impl Classification {
    /// Label written after the trace line in the output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Compulsory => "compulsory",
            Self::Capacity => "capacity",
            Self::Conflict => "conflict",
        }
    }

    /// Whether this access missed.
    pub const fn is_miss(self) -> bool {
        !matches!(self, Self::Hit)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the simulator decided about one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// The label.
    pub classification: Classification,
    /// Set the address maps to.
    pub set: usize,
    /// Way that now holds the line.
    pub way: usize,
    /// Whether a dirty victim was written back to make room.
    pub wrote_back: bool,
}

/// Trace-driven simulator of one set-associative cache.
#[derive(Debug)]
pub struct CacheSimulator {
    cache: SetAssocCache,
    shadow: ShadowCache,
    history: CompulsoryTracker,
    stats: SimStats,
}

impl CacheSimulator {
    /// Creates a simulator with an empty cache, shadow, and history.
    pub fn new(geometry: CacheGeometry, policy: PolicyType) -> Self {
        debug!(
            size_bytes = geometry.size_bytes(),
            ways = geometry.ways(),
            sets = geometry.sets(),
            line_bytes = geometry.line_bytes(),
            tag_bits = geometry.tag_bits(),
            index_bits = geometry.index_bits(),
            offset_bits = geometry.offset_bits(),
            policy = policy.name(),
            "cache geometry"
        );
        Self {
            cache: SetAssocCache::new(geometry, policy),
            shadow: ShadowCache::new(&geometry, policy),
            history: CompulsoryTracker::new(geometry.offset_bits()),
            stats: SimStats::default(),
        }
    }

    /// Validates `config` and creates a simulator for it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the cache shape is invalid.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.geometry()?, config.policy))
    }

    /// Simulates one access and returns its classification.
    pub fn access(&mut self, record: AccessRecord) -> AccessOutcome {
        let address = record.address;
        let is_store = record.operation.is_store();
        let geometry = *self.cache.geometry();
        let set = geometry.index_of(address);
        let tag = geometry.tag_of(address);

        let (classification, way, wrote_back) = if self.history.is_first_access(address) {
            let installed = self.cache.insert(set, tag, is_store);
            (Classification::Compulsory, installed.way, installed.wrote_back())
        } else if let Some(way) = self.cache.lookup(set, tag) {
            if is_store {
                self.cache.mark_dirty(set, way);
            }
            (Classification::Hit, way, false)
        } else {
            let installed = self.cache.insert(set, tag, is_store);
            let classification = if self.shadow.contains(address) {
                Classification::Conflict
            } else {
                Classification::Capacity
            };
            (classification, installed.way, installed.wrote_back())
        };

        let _ = self.shadow.access(address);
        self.history.record(address);
        self.stats.record(record.operation, classification, wrote_back);

        trace!(
            address = format_args!("{address:#010x}"),
            op = %record.operation,
            set,
            way,
            wrote_back,
            "{classification}"
        );

        AccessOutcome {
            classification,
            set,
            way,
            wrote_back,
        }
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Mutable statistics, for counters kept by the driver (skipped lines).
    pub const fn stats_mut(&mut self) -> &mut SimStats {
        &mut self.stats
    }

    /// Consumes the simulator and returns its statistics.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }

    /// Geometry of the simulated cache.
    pub const fn geometry(&self) -> &CacheGeometry {
        self.cache.geometry()
    }

    /// Replacement policy in use.
    pub const fn policy(&self) -> PolicyType {
        self.cache.policy()
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &SetAssocCache {
        &self.cache
    }

    /// The fully-associative shadow.
    pub const fn shadow(&self) -> &ShadowCache {
        &self.shadow
    }

    /// Number of distinct lines touched so far.
    pub fn distinct_lines(&self) -> usize {
        self.history.len()
    }
}
