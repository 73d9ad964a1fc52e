//! Utility functions and helpers

pub mod formats;
pub mod timing;

pub use formats::{from_sprs_csr, to_sprs_csr};
pub use timing::Timed;

use crate::error::{Result, SpgemmError};

/// Computes an exclusive prefix sum (scan) for a vector
///
/// The result has one more entry than the input; the last entry is the total.
pub fn exclusive_scan(input: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0;

    result.push(0); // First element is always 0

    for &val in input {
        sum += val;
        result.push(sum);
    }

    result
}

/// Exclusive prefix sum of buffer sizes
///
/// Like [`exclusive_scan`], but a total that does not fit in `usize` is
/// reported as an allocation failure for `what`.
pub fn try_exclusive_scan(input: &[usize], what: &'static str) -> Result<Vec<usize>> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0usize;

    result.push(0);
    for &val in input {
        sum = sum
            .checked_add(val)
            .ok_or(SpgemmError::Allocation { what, len: usize::MAX })?;
        result.push(sum);
    }

    Ok(result)
}

/// Allocates `len` elements produced by `init`, reporting failure instead of aborting
pub fn try_alloc_with<T>(len: usize, what: &'static str, init: impl FnMut() -> T) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| SpgemmError::Allocation { what, len })?;
    buf.resize_with(len, init);
    Ok(buf)
}

/// Splits `data` into consecutive disjoint pieces `offsets[i]..offsets[i + 1]`
///
/// `offsets` must be non-decreasing and start at 0; the tail of `data` past
/// the last offset is dropped.
pub fn split_by_offsets_mut<'a, X>(offsets: &[usize], mut data: &'a mut [X]) -> Vec<&'a mut [X]> {
    let mut pieces = Vec::with_capacity(offsets.len().saturating_sub(1));
    for w in offsets.windows(2) {
        let (head, tail) = std::mem::take(&mut data).split_at_mut(w[1] - w[0]);
        pieces.push(head);
        data = tail;
    }
    pieces
}
