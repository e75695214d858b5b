//! Elementary automaton rule tables.

use crate::error::SimError;

/// Lookup table for a Wolfram rule number.
///
/// Entry `i` is the next state of a center cell whose neighborhood encodes
/// to `left*4 + center*2 + right == i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleTable {
    number: u8,
    bits: [bool; 8],
}

impl RuleTable {
    /// Decode `bits[i] = (rule >> i) & 1`.
    pub fn new(number: u8) -> Self {
        let bits = std::array::from_fn(|i| (number >> i) & 1 == 1);
        RuleTable { number, bits }
    }

    /// Decode a wide rule number, rejecting anything above 255.
    pub fn from_number(number: u32) -> Result<Self, SimError> {
        u8::try_from(number)
            .map(RuleTable::new)
            .map_err(|_| SimError::RuleOutOfRange(number))
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn bits(&self) -> [bool; 8] {
        self.bits
    }

    /// Next state for a (left, center, right) neighborhood.
    #[inline]
    pub fn apply(&self, left: u8, center: u8, right: u8) -> u8 {
        let pattern = ((left & 1) << 2) | ((center & 1) << 1) | (right & 1);
        self.bits[pattern as usize] as u8
    }

    /// The table for the following rule number, wrapping 255 to 0.
    pub fn next(&self) -> Self {
        RuleTable::new(self.number.wrapping_add(1))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable::new(90)
    }
}
