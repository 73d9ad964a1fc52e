//! Probing disciplines for the open-addressing tables
//!
//! Every discipline starts at `key & (capacity - 1)` and, for a power-of-two
//! capacity, visits each slot exactly once within `capacity` probes. That
//! property is what lets a table sized to at least the number of distinct keys
//! guarantee an insert never fails.

/// Strategy for the re-probe step after a collision
pub trait ProbeSequence: Send + Sync + 'static {
    /// Single-character tag of this discipline
    const TAG: char;

    /// Next slot to try
    ///
    /// # Arguments
    ///
    /// * `mask` - `capacity - 1`, capacity being a power of two
    /// * `key` - The key being inserted
    /// * `probe` - Probe number, starting at 1 for the first re-probe
    /// * `prev` - Slot tried by the previous probe
    fn next(mask: usize, key: usize, probe: usize, prev: usize) -> usize;

    /// Initial slot for `key`
    #[inline]
    fn home(mask: usize, key: usize) -> usize {
        key & mask
    }
}

/// `slot = slot + 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearProbe;

/// `slot = slot + probe`, i.e. offsets follow the triangular numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticProbe;

/// `slot = slot + secondary_hash(key)` with an odd secondary hash
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleHashProbe;

impl ProbeSequence for LinearProbe {
    const TAG: char = 'L';

    #[inline]
    fn next(mask: usize, _key: usize, _probe: usize, prev: usize) -> usize {
        prev.wrapping_add(1) & mask
    }
}

impl ProbeSequence for QuadraticProbe {
    const TAG: char = 'Q';

    #[inline]
    fn next(mask: usize, _key: usize, probe: usize, prev: usize) -> usize {
        prev.wrapping_add(probe) & mask
    }
}

impl DoubleHashProbe {
    /// Odd step, co-prime with any power-of-two capacity
    #[inline]
    pub fn secondary_hash(key: usize) -> usize {
        key | 1
    }
}

impl ProbeSequence for DoubleHashProbe {
    const TAG: char = 'D';

    #[inline]
    fn next(mask: usize, key: usize, _probe: usize, prev: usize) -> usize {
        prev.wrapping_add(Self::secondary_hash(key)) & mask
    }
}
