//! First-touch (compulsory miss) detection.
//!
//! Keeps every line-aligned address the trace has touched. The history only
//! grows and lives as long as the simulator that owns it.

use std::collections::HashSet;

use crate::common::addr::line_address;

/// History of line-aligned addresses seen so far.
#[derive(Debug, Clone, Default)]
pub struct CompulsoryTracker {
    seen: HashSet<u32>,
    offset_bits: u32,
}

impl CompulsoryTracker {
    /// Creates an empty history for lines of `2^offset_bits` bytes.
    pub fn new(offset_bits: u32) -> Self {
        Self {
            seen: HashSet::new(),
            offset_bits,
        }
    }

    /// True iff no recorded access touched the line containing `address`.
    pub fn is_first_access(&self, address: u32) -> bool {
        !self
            .seen
            .contains(&line_address(address, self.offset_bits))
    }

    /// Adds the line containing `address` to the history.
    pub fn record(&mut self, address: u32) {
        let _ = self.seen.insert(line_address(address, self.offset_bits));
    }

    /// Number of distinct lines seen.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
