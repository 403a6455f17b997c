use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over dense cell indices
///
/// Indices come from `GridIndex::index_of`. Used as the visited set during
/// connectivity search, so it is cleared and reused rather than reallocated.
#[derive(Clone, Debug)]
pub struct CellBitset {
    bits: BitVec,
}

impl CellBitset {
    /// Create a bitset with no cells present
    pub fn new(cell_count: usize) -> Self {
        Self {
            bits: bitvec![0; cell_count],
        }
    }

    /// Capacity in cells
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a cell index
    ///
    /// Returns `true` if the index was newly set. Indices past the capacity
    /// are ignored and report `false`.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.bits.len() || self.contains(index) {
            return false;
        }
        self.bits.set(index, true);
        true
    }

    /// Test cell membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Remove every cell, resizing to a new capacity
    pub fn reset(&mut self, cell_count: usize) {
        self.bits.clear();
        self.bits.resize(cell_count, false);
    }

    /// Test if no cells are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count cells in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all cell indices in increasing order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for CellBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellBitset({} cells: {:?})", self.count(), self.to_vec())
    }
}
