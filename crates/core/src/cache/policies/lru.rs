//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the line that has not been accessed for the longest time.
//! Every line carries a recency stamp. Each set has its own clock; a hit or a
//! fill stamps the line with `current_max_priority(set) + 1`, so stamps within a
//! set are unique and strictly increasing. The victim is the line with the
//! smallest stamp, ties going to the lowest way.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `fill()`: O(1)
//!   - `victim()`: O(W) where W is the number of ways (associativity)
//! - **Space Complexity:** O(S × W) where S is the number of sets

use super::ReplacementPolicy;

/// LRU Policy state.
#[derive(Debug, Clone)]
pub struct LruPolicy {
    /// Recency stamp per line, `sets * ways` entries in set-major order.
    /// Zero means the line was never stamped.
    stamps: Vec<u64>,
    /// Last stamp issued in each set.
    clocks: Vec<u64>,
    /// Number of ways in the cache.
    ways: usize,
}

impl LruPolicy {
    /// Creates a new LRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            stamps: vec![0; sets * ways],
            clocks: vec![0; sets],
            ways,
        }
    }

    /// Largest recency stamp in `set`.
    ///
    /// Every stamp exceeds all earlier ones in its set, so the maximum is
    /// always the most recently issued stamp.
    pub fn current_max_priority(&self, set: usize) -> u64 {
        self.clocks[set]
    }

    /// Recency stamp of `way` in `set`.
    pub fn recency(&self, set: usize, way: usize) -> u64 {
        self.stamps[set * self.ways + way]
    }

    /// Stamps `way` as the most recently used line of `set`.
    fn promote(&mut self, set: usize, way: usize) {
        let next = self.current_max_priority(set) + 1;
        self.clocks[set] = next;
        self.stamps[set * self.ways + way] = next;
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves the accessed way to the MRU position.
    fn touch(&mut self, set: usize, way: usize) {
        self.promote(set, way);
    }

    /// A freshly installed line becomes MRU.
    fn fill(&mut self, set: usize, way: usize) {
        self.promote(set, way);
    }

    /// Returns the way with the smallest stamp; the first one wins a tie.
    fn victim(&mut self, set: usize) -> usize {
        let base = set * self.ways;
        let stamps = &self.stamps[base..base + self.ways];
        let mut victim = 0;
        for (way, &stamp) in stamps.iter().enumerate().skip(1) {
            if stamp < stamps[victim] {
                victim = way;
            }
        }
        victim
    }
}
