//! Two-tier hash accumulation of one output row
//!
//! Every `(column, value)` contribution of row `i` goes into the group's
//! small fast table first and into the row's overflow table when the fast
//! table has no room for a new column. Draining then packs both tables into
//! the row's span of the output arrays.

pub mod materialize;
pub mod row;

use crate::hash::probe::ProbeSequence;
use crate::hash::table::{HashTable, Inserted};
use crate::scalar::Scalar;

pub use materialize::drain_row;
pub use row::accumulate_row;

/// The fast table and overflow table a row accumulates into
///
/// Slots are addressed as one sequence: fast slots first, then overflow slots.
#[derive(Clone, Copy)]
pub struct RowTables<'a, T> {
    /// The lane group's fast table, combined slots `0..fast.capacity()`
    pub fast: HashTable<'a, T>,
    /// The row's overflow region, combined slots after the fast table
    pub overflow: HashTable<'a, T>,
}

impl<'a, T: Scalar> RowTables<'a, T> {
    /// Pairs a fast table with an overflow region
    pub fn new(fast: HashTable<'a, T>, overflow: HashTable<'a, T>) -> Self {
        Self { fast, overflow }
    }

    /// Combined number of slots
    pub fn capacity(&self) -> usize {
        self.fast.capacity() + self.overflow.capacity()
    }

    /// Inserts into the fast table, falling back to the overflow table
    ///
    /// # Panics
    ///
    /// Panics when the overflow table is full as well. The overflow table is
    /// sized from the row's nonzero bound, so this only happens when that
    /// bound was too small.
    #[inline]
    pub fn insert<P: ProbeSequence>(&self, row: usize, col: usize, val: T) -> Inserted {
        if let Some(ins) = self.fast.insert_or_accumulate::<P>(col, val) {
            return ins;
        }
        match self.overflow.insert_or_accumulate::<P>(col, val) {
            Some(ins) => Inserted {
                slot: self.fast.capacity() + ins.slot,
                claimed: ins.claimed,
            },
            None => panic!(
                "hash tables full for row {}: column {} does not fit (fast capacity {}, overflow capacity {}); \
                 the row nonzero bound is too small",
                row,
                col,
                self.fast.capacity(),
                self.overflow.capacity()
            ),
        }
    }

    /// Empties the slots owned by `lane` in both tables
    pub fn reset_strided(&self, lane: usize, stride: usize) {
        self.fast.reset_strided(lane, stride);
        self.overflow.reset_strided(lane, stride);
    }

    /// Entry in combined slot `slot`, if occupied
    #[inline]
    pub fn entry(&self, slot: usize) -> Option<(usize, T)> {
        let fast_cap = self.fast.capacity();
        if slot < fast_cap {
            self.fast.key_at(slot).map(|k| (k, self.fast.value_at(slot)))
        } else {
            let s = slot - fast_cap;
            self.overflow.key_at(s).map(|k| (k, self.overflow.value_at(s)))
        }
    }

    /// Occupied slots among combined slots `range`
    pub fn occupied_in(&self, range: std::ops::Range<usize>) -> usize {
        let fast_cap = self.fast.capacity();
        let fast_part = range.start.min(fast_cap)..range.end.min(fast_cap);
        let over_part = range.start.max(fast_cap) - fast_cap..range.end.max(fast_cap) - fast_cap;
        self.fast.occupied_in(fast_part) + self.overflow.occupied_in(over_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::probe::LinearProbe;
    use crate::hash::table::FastTable;

    #[test]
    fn test_spills_into_overflow() {
        let fast = FastTable::new(2);
        let over = FastTable::new(4);
        let tables = RowTables::new(fast.table::<f64>(), over.table::<f64>());
        tables.reset_strided(0, 1);

        for col in [10, 11, 12, 13] {
            tables.insert::<LinearProbe>(0, col, 1.0);
        }
        let again = tables.insert::<LinearProbe>(0, 12, 1.0);
        assert!(!again.claimed);
        assert!(again.slot >= 2, "column 12 should live in the overflow table");
        assert_eq!(tables.entry(again.slot), Some((12, 2.0)));

        assert_eq!(tables.capacity(), 6);
        assert_eq!(tables.occupied_in(0..6), 4);
        assert_eq!(tables.occupied_in(0..2), 2);
        assert_eq!(tables.occupied_in(1..4), 3);
    }

    #[test]
    #[should_panic(expected = "hash tables full for row 3")]
    fn test_full_overflow_is_fatal() {
        let fast = FastTable::new(1);
        let over = FastTable::new(1);
        let tables = RowTables::new(fast.table::<f64>(), over.table::<f64>());
        tables.insert::<LinearProbe>(3, 0, 1.0);
        tables.insert::<LinearProbe>(3, 1, 1.0);
        tables.insert::<LinearProbe>(3, 2, 1.0);
    }
}
