//! Global (overflow) hash table allocation
//!
//! Each row gets an overflow capacity of `next_pow2(max(0, rownnz - fast))`,
//! so the fast table plus the overflow region together always have room for
//! every distinct column the row can produce. Regions are laid out
//! contiguously in one key buffer and one value buffer.

use std::sync::atomic::{AtomicU64, AtomicUsize};

use crate::constants::EMPTY_KEY;
use crate::error::{Result, SpgemmError};
use crate::hash::table::HashTable;
use crate::matrix::config::OverflowLayout;
use crate::scalar::Scalar;
use crate::utils::{try_alloc_with, try_exclusive_scan};

/// Overflow capacity needed by a row with `rownnz` entries
///
/// Zero when the fast table alone can hold the row; `None` when the next
/// power of two does not fit in `usize`.
pub fn overflow_capacity(rownnz: usize, fast_capacity: usize) -> Option<usize> {
    match rownnz.saturating_sub(fast_capacity) {
        0 => Some(0),
        n => n.checked_next_power_of_two(),
    }
}

fn checked_overflow_capacity(rownnz: usize, fast_capacity: usize) -> Result<usize> {
    overflow_capacity(rownnz, fast_capacity).ok_or(SpgemmError::Allocation {
        what: "overflow hash keys",
        len: rownnz,
    })
}

/// Overflow tables for every row (or every lane group) of one run
pub struct GlobalHashTable {
    /// Region start offsets, `regions + 1` entries
    offsets: Vec<usize>,
    keys: Vec<AtomicUsize>,
    vals: Vec<AtomicU64>,
    layout: OverflowLayout,
    n_groups: usize,
}

impl GlobalHashTable {
    /// Sizes and allocates the overflow regions
    ///
    /// # Arguments
    ///
    /// * `row_count` - Exact or upper-bound nonzeros of each output row
    /// * `fast_capacity` - Capacity of the fast table
    /// * `layout` - One region per row, or one per active lane group
    /// * `n_groups` - Number of active lane groups (rows go round-robin)
    pub fn create(
        row_count: &[usize],
        fast_capacity: usize,
        layout: OverflowLayout,
        n_groups: usize,
    ) -> Result<Self> {
        let capacities: Vec<usize> = match layout {
            OverflowLayout::PerRow => row_count
                .iter()
                .map(|&rc| checked_overflow_capacity(rc, fast_capacity))
                .collect::<Result<_>>()?,
            OverflowLayout::PerGroup => {
                let mut caps = vec![0; n_groups];
                for (i, &rc) in row_count.iter().enumerate() {
                    let g = i % n_groups;
                    caps[g] = caps[g].max(checked_overflow_capacity(rc, fast_capacity)?);
                }
                caps
            }
        };

        let offsets = try_exclusive_scan(&capacities, "overflow hash keys")?;
        let total = offsets[capacities.len()];

        let keys = try_alloc_with(total, "overflow hash keys", || AtomicUsize::new(EMPTY_KEY))?;
        let vals = try_alloc_with(total, "overflow hash values", || AtomicU64::new(0))?;

        log::debug!(
            "overflow tables: {:?} layout, {} regions, {} slots",
            layout,
            capacities.len(),
            total
        );

        Ok(Self {
            offsets,
            keys,
            vals,
            layout,
            n_groups,
        })
    }

    /// Total number of overflow slots
    pub fn total_capacity(&self) -> usize {
        self.keys.len()
    }

    /// Number of regions
    pub fn n_regions(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Capacity of the region row `row` accumulates into
    pub fn capacity_for_row(&self, row: usize) -> usize {
        let r = self.region_index(row);
        self.offsets[r + 1] - self.offsets[r]
    }

    fn region_index(&self, row: usize) -> usize {
        match self.layout {
            OverflowLayout::PerRow => row,
            OverflowLayout::PerGroup => row % self.n_groups,
        }
    }

    /// Overflow table used while processing `row`
    pub fn region_for_row<T: Scalar>(&self, row: usize) -> HashTable<'_, T> {
        let r = self.region_index(row);
        let range = self.offsets[r]..self.offsets[r + 1];
        HashTable::new(&self.keys[range.clone()], &self.vals[range])
    }
}
