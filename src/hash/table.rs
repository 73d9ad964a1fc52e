//! Open-addressing accumulation table over atomic slots
//!
//! The same [`HashTable`] view serves both tiers: the small per-group fast
//! table and each row's overflow region inside the global buffers.

use aligned_vec::AVec;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::constants::{CACHE_LINE_ALIGN, EMPTY_KEY};
use crate::hash::probe::ProbeSequence;
use crate::scalar::Scalar;

/// Outcome of a successful [`HashTable::insert_or_accumulate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    /// Slot now holding the key
    pub slot: usize,
    /// The slot was empty and this call claimed it
    pub claimed: bool,
}

/// Borrowed view of one hash table: parallel key and value slot arrays
///
/// Keys hold [`EMPTY_KEY`] when free; values hold the bit pattern of `T`.
/// Any number of threads may insert concurrently.
pub struct HashTable<'a, T> {
    keys: &'a [AtomicUsize],
    vals: &'a [AtomicU64],
    _marker: PhantomData<T>,
}

impl<'a, T> Clone for HashTable<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for HashTable<'a, T> {}

impl<'a, T: Scalar> HashTable<'a, T> {
    /// Wraps key and value slots of equal, power-of-two (or zero) length
    pub fn new(keys: &'a [AtomicUsize], vals: &'a [AtomicU64]) -> Self {
        assert_eq!(keys.len(), vals.len(), "key and value slots must match");
        assert!(
            keys.is_empty() || keys.len().is_power_of_two(),
            "hash table capacity {} is not a power of two",
            keys.len()
        );
        Self {
            keys,
            vals,
            _marker: PhantomData,
        }
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Empties the slots `lane, lane + stride, ...`
    ///
    /// Lanes of a group call this with their own id so that together they
    /// cover the whole table.
    pub fn reset_strided(&self, lane: usize, stride: usize) {
        for k in (lane..self.capacity()).step_by(stride) {
            self.keys[k].store(EMPTY_KEY, Ordering::Relaxed);
            self.vals[k].store(T::zero().to_bits(), Ordering::Relaxed);
        }
    }

    /// Empties every slot
    pub fn reset(&self) {
        self.reset_strided(0, 1);
    }

    /// Finds or claims the slot for `key` and adds `val` to it
    ///
    /// Returns `None` once all `capacity` probes have been tried without
    /// finding `key` or a free slot; the caller then retries in a larger table.
    #[inline]
    pub fn insert_or_accumulate<P: ProbeSequence>(&self, key: usize, val: T) -> Option<Inserted> {
        debug_assert_ne!(key, EMPTY_KEY, "key collides with the empty sentinel");

        let capacity = self.capacity();
        if capacity == 0 {
            return None;
        }
        let mask = capacity - 1;

        let mut slot = P::home(mask, key);
        for probe in 0..capacity {
            if probe > 0 {
                slot = P::next(mask, key, probe, slot);
            }

            let old = match self.keys[slot].compare_exchange(
                EMPTY_KEY,
                key,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(prev) | Err(prev) => prev,
            };

            if old == EMPTY_KEY || old == key {
                T::atomic_add(&self.vals[slot], val);
                return Some(Inserted {
                    slot,
                    claimed: old == EMPTY_KEY,
                });
            }
        }

        None
    }

    /// Key stored in `slot`, if any
    #[inline]
    pub fn key_at(&self, slot: usize) -> Option<usize> {
        match self.keys[slot].load(Ordering::Acquire) {
            EMPTY_KEY => None,
            key => Some(key),
        }
    }

    /// Accumulated value in `slot`
    #[inline]
    pub fn value_at(&self, slot: usize) -> T {
        T::atomic_load(&self.vals[slot])
    }

    /// Number of occupied slots in `range`
    pub fn occupied_in(&self, range: std::ops::Range<usize>) -> usize {
        self.keys[range]
            .iter()
            .filter(|k| k.load(Ordering::Acquire) != EMPTY_KEY)
            .count()
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.occupied_in(0..self.capacity())
    }
}

/// Fixed-capacity table owned by one lane group and reused row to row
pub struct FastTable {
    keys: AVec<AtomicUsize>,
    vals: AVec<AtomicU64>,
}

impl FastTable {
    /// Allocates an empty table with `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: AVec::from_iter(CACHE_LINE_ALIGN, (0..capacity).map(|_| AtomicUsize::new(EMPTY_KEY))),
            vals: AVec::from_iter(CACHE_LINE_ALIGN, (0..capacity).map(|_| AtomicU64::new(0))),
        }
    }

    /// Typed view for accumulation
    pub fn table<T: Scalar>(&self) -> HashTable<'_, T> {
        HashTable::new(&self.keys, &self.vals)
    }
}
