//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest line in a set, regardless of how recently it
//! was accessed. Lines enter a set in way order (the cache fills the first
//! invalid way), so once the set is full the oldest line sits under a
//! round-robin cursor that starts at way 0 and advances after every eviction.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `fill()`: O(1), no state change
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(S) where S is the number of sets

use super::ReplacementPolicy;

/// FIFO Policy state.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    /// Next way to be evicted for each set.
    next_way: Vec<usize>,
    /// Number of ways in the cache.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            next_way: vec![0; sets],
            ways,
        }
    }

    /// Way that the next eviction in `set` will replace.
    pub fn cursor(&self, set: usize) -> usize {
        self.next_way[set]
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not affect insertion order.
    fn touch(&mut self, _set: usize, _way: usize) {}

    /// Fills land in way order, which already matches the cursor sequence.
    fn fill(&mut self, _set: usize, _way: usize) {}

    /// Returns the cursor for `set` and advances it to `(cursor + 1) % ways`.
    fn victim(&mut self, set: usize) -> usize {
        let way = self.next_way[set];
        self.next_way[set] = (way + 1) % self.ways;
        way
    }
}
