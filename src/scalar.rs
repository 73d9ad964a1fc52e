//! Value types that can be accumulated into hash table slots atomically

use num_traits::Num;
use std::fmt::Debug;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicU64, Ordering};

/// A numeric value that can live in an `AtomicU64` slot
///
/// Slots store the value's bit pattern. Accumulation is a compare-and-swap
/// loop, so concurrent additions to the same slot are never lost, but the
/// order in which they are summed is unspecified.
pub trait Scalar: Copy + Num + AddAssign + Debug + Send + Sync + 'static {
    /// Bit pattern stored in an atomic slot
    fn to_bits(self) -> u64;

    /// Inverse of [`Scalar::to_bits`]
    fn from_bits(bits: u64) -> Self;

    /// Atomically add `val` to the value held in `slot`
    #[inline]
    fn atomic_add(slot: &AtomicU64, val: Self) {
        let mut current = slot.load(Ordering::Relaxed);
        loop {
            let mut sum = Self::from_bits(current);
            sum += val;
            match slot.compare_exchange_weak(
                current,
                sum.to_bits(),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// Read the value held in `slot`
    #[inline]
    fn atomic_load(slot: &AtomicU64) -> Self {
        Self::from_bits(slot.load(Ordering::Acquire))
    }
}

impl Scalar for f64 {
    #[inline]
    fn to_bits(self) -> u64 {
        f64::to_bits(self)
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

impl Scalar for f32 {
    #[inline]
    fn to_bits(self) -> u64 {
        u64::from(f32::to_bits(self))
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        // Upper half is always zero for slots written by `to_bits`
        f32::from_bits(bits as u32)
    }
}
