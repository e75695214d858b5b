//! Core state structure for the elementary automaton.

use crate::automaton::rule::RuleTable;

/// The internal state of a 1D elementary cellular automaton
pub struct State {
    pub width: i16,
    pub cells: Vec<u8>, // 0 = dead, 1 = alive
    pub generation: u64,
    pub rule: RuleTable,
}

impl State {
    /// Index of the single seed cell placed on reset.
    #[inline]
    pub fn seed_index(&self) -> usize {
        self.width as usize / 2
    }

    /// Number of alive cells in the current row.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
}
