//! Set-Associative Cache Model.
//!
//! This module implements the cache that a trace is replayed against. It provides:
//! 1. **Replacement Engine:** `SetAssocCache`, a `sets x ways` array of lines with
//!    lookup, install, and dirty tracking under a FIFO or LRU policy.
//! 2. **Shadow Cache:** A fully-associative cache of equal capacity used to tell
//!    conflict misses from capacity misses.
//! 3. **Compulsory Tracking:** The history of every line ever touched.

/// Line-granular history used to detect first-touch misses.
pub mod compulsory;

/// Cache replacement policy implementations (FIFO, LRU).
pub mod policies;

/// Fully-associative shadow cache for conflict/capacity disambiguation.
pub mod shadow;

use self::policies::ReplacementPolicy;
use crate::common::addr::CacheGeometry;
use crate::config::ReplacementPolicy as PolicyType;

pub use self::compulsory::CompulsoryTracker;
pub use self::shadow::ShadowCache;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the resident line; meaningless while `valid` is false.
    pub tag: u32,
    /// Whether the slot holds a line.
    pub valid: bool,
    /// Whether the line was written since it was installed.
    pub dirty: bool,
}

/// Result of installing a line with [`SetAssocCache::insert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertOutcome {
    /// Way the new line was installed in.
    pub way: usize,
    /// The line that was replaced, if the set was full.
    pub evicted: Option<CacheLine>,
}

impl InsertOutcome {
    /// Whether installing the line forced a dirty victim to be written back.
    pub fn wrote_back(&self) -> bool {
        self.evicted.is_some_and(|line| line.dirty)
    }
}

/// Set-associative cache with a pluggable replacement policy.
///
/// Lines are stored set-major: way `w` of set `s` lives at `s * ways + w`.
/// Within a set at most one valid line carries a given tag.
#[derive(Debug)]
pub struct SetAssocCache {
    geometry: CacheGeometry,
    policy_kind: PolicyType,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
}

impl SetAssocCache {
    /// Creates an empty cache (all lines invalid) with the given shape and policy.
    pub fn new(geometry: CacheGeometry, policy_kind: PolicyType) -> Self {
        Self {
            geometry,
            policy_kind,
            lines: vec![CacheLine::default(); geometry.total_lines()],
            policy: policies::build(policy_kind, geometry.sets(), geometry.ways()),
        }
    }

    /// Geometry this cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Replacement policy in use.
    pub const fn policy(&self) -> PolicyType {
        self.policy_kind
    }

    /// The lines of `set`, indexed by way.
    pub fn set_lines(&self, set: usize) -> &[CacheLine] {
        let base = set * self.geometry.ways();
        &self.lines[base..base + self.geometry.ways()]
    }

    /// Line at `way` of `set`, or `None` if either index is out of range.
    pub fn line(&self, set: usize, way: usize) -> Option<&CacheLine> {
        if set >= self.geometry.sets() || way >= self.geometry.ways() {
            return None;
        }
        self.lines.get(set * self.geometry.ways() + way)
    }

    /// Finds the way holding `tag` in `set` without touching policy state.
    pub fn probe(&self, set: usize, tag: u32) -> Option<usize> {
        self.set_lines(set)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Looks up `tag` in `set`, recording a hit with the policy on a match.
    ///
    /// Under LRU the matching line becomes the most recently used; under FIFO
    /// the lookup changes nothing.
    pub fn lookup(&mut self, set: usize, tag: u32) -> Option<usize> {
        let way = self.probe(set, tag)?;
        self.policy.touch(set, way);
        Some(way)
    }

    /// Installs `tag` into `set`.
    ///
    /// The first invalid way is filled if there is one; otherwise the policy
    /// picks a victim, which is returned in the outcome so the caller can count
    /// a write-back when it was dirty. The new line starts dirty iff `dirty`.
    ///
    /// The caller must have established that `tag` is not already resident.
    pub fn insert(&mut self, set: usize, tag: u32, dirty: bool) -> InsertOutcome {
        debug_assert!(self.probe(set, tag).is_none(), "tag {tag:#x} already resident");

        let free_way = self.set_lines(set).iter().position(|line| !line.valid);
        let (way, evicted) = match free_way {
            Some(way) => (way, None),
            None => {
                let way = self.policy.victim(set);
                (way, Some(self.lines[set * self.geometry.ways() + way]))
            }
        };

        self.lines[set * self.geometry.ways() + way] = CacheLine {
            tag,
            valid: true,
            dirty,
        };
        self.policy.fill(set, way);

        InsertOutcome { way, evicted }
    }

    /// Marks the line at `way` of `set` as modified.
    pub fn mark_dirty(&mut self, set: usize, way: usize) {
        self.lines[set * self.geometry.ways() + way].dirty = true;
    }

    /// Whether the line containing `address` is resident.
    pub fn contains(&self, address: u32) -> bool {
        self.probe(self.geometry.index_of(address), self.geometry.tag_of(address))
            .is_some()
    }

    /// Number of valid lines across all sets.
    pub fn valid_lines(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }
}
