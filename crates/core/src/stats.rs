//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome counters of a run. It provides:
//! 1. **Totals:** Hits, misses, and write-back transactions.
//! 2. **Miss breakdown:** Compulsory, capacity, and conflict counts.
//! 3. **Access mix:** Loads, stores, and trace lines skipped as malformed.
//! 4. **Report:** Geometry summary, miss rate, and transaction counts.

use std::fmt;

use crate::common::addr::CacheGeometry;
use crate::config::ReplacementPolicy;
use crate::sim::simulator::Classification;
use crate::sim::trace::Operation;

/// Simulation statistics structure.
///
/// Every counter only grows; each simulated access updates it exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that missed, of any kind.
    pub misses: u64,
    /// First-touch misses.
    pub compulsory_misses: u64,
    /// Misses a fully-associative cache of equal size would also take.
    pub capacity_misses: u64,
    /// Misses caused only by limited associativity.
    pub conflict_misses: u64,
    /// Dirty lines evicted (one write-back transaction each).
    pub write_backs: u64,
    /// Load accesses simulated.
    pub loads: u64,
    /// Store accesses simulated.
    pub stores: u64,
    /// Malformed trace lines skipped (not counted as accesses).
    pub skipped_lines: u64,
}

impl SimStats {
    /// Counts one classified access.
    pub const fn record(
        &mut self,
        operation: Operation,
        classification: Classification,
        wrote_back: bool,
    ) {
        match operation {
            Operation::Load => self.loads += 1,
            Operation::Store => self.stores += 1,
        }
        match classification {
            Classification::Hit => self.hits += 1,
            Classification::Compulsory => self.compulsory_misses += 1,
            Classification::Capacity => self.capacity_misses += 1,
            Classification::Conflict => self.conflict_misses += 1,
        }
        if classification.is_miss() {
            self.misses += 1;
        }
        if wrote_back {
            self.write_backs += 1;
        }
    }

    /// Total simulated accesses (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Misses as a percentage of accesses; zero for an empty run.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64 * 100.0
        }
    }

    /// Hits as a percentage of accesses; zero for an empty run.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    /// Report of these counters for a cache of shape `geometry`.
    pub const fn report<'a>(
        &'a self,
        geometry: &'a CacheGeometry,
        policy: ReplacementPolicy,
    ) -> StatsReport<'a> {
        StatsReport {
            stats: self,
            geometry,
            policy,
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self, geometry: &CacheGeometry, policy: ReplacementPolicy) {
        print!("{}", self.report(geometry, policy));
    }
}

/// Printable end-of-run report; see [`SimStats::report`].
#[derive(Debug, Clone, Copy)]
pub struct StatsReport<'a> {
    stats: &'a SimStats,
    geometry: &'a CacheGeometry,
    policy: ReplacementPolicy,
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let g = self.geometry;
        writeln!(
            f,
            "Ways: {}; Sets: {}; Line Size: {}B",
            g.ways(),
            g.sets(),
            g.line_bytes()
        )?;
        writeln!(
            f,
            "Tag: {} bits; Index: {} bits; Offset: {} bits",
            g.tag_bits(),
            g.index_bits(),
            g.offset_bits()
        )?;
        writeln!(f, "Miss Rate: {:8.6}%", s.miss_rate())?;
        writeln!(f, "Total Misses: {}", s.misses)?;
        writeln!(f, "Write-back Transactions: {}", s.write_backs)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "policy                   {}", self.policy.name())?;
        writeln!(
            f,
            "accesses                 {} (loads: {}, stores: {})",
            s.accesses(),
            s.loads,
            s.stores
        )?;
        writeln!(f, "hits                     {} ({:.2}%)", s.hits, s.hit_rate())?;
        writeln!(f, "misses.compulsory        {}", s.compulsory_misses)?;
        writeln!(f, "misses.capacity          {}", s.capacity_misses)?;
        writeln!(f, "misses.conflict          {}", s.conflict_misses)?;
        if s.skipped_lines > 0 {
            writeln!(f, "skipped_lines            {}", s.skipped_lines)?;
        }
        Ok(())
    }
}
