//! Fully-Associative Shadow Cache.
//!
//! A miss that is not compulsory is either a capacity miss or a conflict miss.
//! This cache answers the question by replaying the same trace against an
//! idealized cache with the same capacity and line size but a single set: if
//! the line is still resident there, only the limited associativity of the
//! real cache lost it (conflict); otherwise even full associativity would have
//! missed (capacity).
//!
//! The shadow runs its own instance of the configured policy, so its recency
//! clock and FIFO cursor are independent of the real cache.

use super::SetAssocCache;
use crate::common::addr::CacheGeometry;
use crate::config::ReplacementPolicy as PolicyType;

/// Fully-associative cache of `sets * ways` lines shadowing a real cache.
#[derive(Debug)]
pub struct ShadowCache {
    inner: SetAssocCache,
}

impl ShadowCache {
    /// Creates an empty shadow for a cache of shape `geometry`.
    pub fn new(geometry: &CacheGeometry, policy: PolicyType) -> Self {
        Self {
            inner: SetAssocCache::new(geometry.fully_associative(), policy),
        }
    }

    /// Geometry of the shadow (one set, no index bits).
    pub const fn geometry(&self) -> &CacheGeometry {
        self.inner.geometry()
    }

    /// Fully-associative tag of `address`: every bit above the line offset.
    pub const fn tag_of(&self, address: u32) -> u32 {
        self.inner.geometry().tag_of(address)
    }

    /// Whether the line containing `address` is resident. Does not touch
    /// replacement state, so it can be asked before this access's update.
    pub fn contains(&self, address: u32) -> bool {
        self.inner.probe(0, self.tag_of(address)).is_some()
    }

    /// Applies one access: a resident line is touched, a missing one installed
    /// (evicting under the policy when full). Returns whether it was resident.
    pub fn access(&mut self, address: u32) -> bool {
        let tag = self.tag_of(address);
        if self.inner.lookup(0, tag).is_some() {
            return true;
        }
        let _ = self.inner.insert(0, tag, false);
        false
    }

    /// Number of resident lines.
    pub fn occupancy(&self) -> usize {
        self.inner.valid_lines()
    }

    /// Number of line slots (`sets * ways` of the real cache).
    pub const fn capacity(&self) -> usize {
        self.inner.geometry().ways()
    }
}
