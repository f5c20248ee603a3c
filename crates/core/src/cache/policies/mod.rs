//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in a full set.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out (per-set round-robin cursor).
//! - `Lru`: Least Recently Used (per-set monotonic recency clock).

use std::fmt;

use crate::config::ReplacementPolicy as PolicyType;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// The cache itself owns validity and tags and always fills invalid ways first;
/// a policy only orders the valid lines of a set and picks the victim once the
/// set is full.
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Records a hit on `way` of `set`.
    fn touch(&mut self, set: usize, way: usize);

    /// Records that a new line was installed in `way` of `set`.
    fn fill(&mut self, set: usize, way: usize);

    /// Selects the way to evict from a full `set`.
    ///
    /// Called exactly once per eviction; policies with a cursor advance it here.
    fn victim(&mut self, set: usize) -> usize;
}

/// Builds the policy object for `kind` sized for `sets` x `ways`.
pub fn build(kind: PolicyType, sets: usize, ways: usize) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Fifo => Box::new(FifoPolicy::new(sets, ways)),
        PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
    }
}
