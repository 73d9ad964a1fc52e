//! Compaction of upper-bound output into a tightly sized matrix
//!
//! After an upper-bound run, row `i` holds its `row_count[i]` real entries at
//! the front of an allocated span that may be longer. If any span is too
//! long, a new set of buffers is sized from the real counts and every row's
//! entries are copied over in parallel.

use rayon::prelude::*;

use crate::alloc::{create_csr_buffers, CsrBuffers};
use crate::error::Result;
use crate::scalar::Scalar;
use crate::utils::Timed;

/// Re-packs `buffers` so that row `i` spans exactly `true_count[i]` entries
///
/// Returns the buffers to use from now on and whether a copy was made. When
/// the counts already sum to the allocated size the input is returned as is.
pub fn compact<T: Scalar>(buffers: CsrBuffers<T>, true_count: &[usize]) -> Result<(CsrBuffers<T>, bool)> {
    assert_eq!(
        true_count.len(),
        buffers.n_rows(),
        "one true row count per allocated row"
    );
    let allocated = buffers.nnz();
    let nnz: usize = true_count.par_iter().sum();

    assert!(
        nnz <= allocated,
        "true row counts sum to {} but only {} entries were allocated",
        nnz,
        allocated
    );

    if nnz == allocated {
        log::debug!("compaction skipped: {} entries already tight", nnz);
        return Ok((buffers, false));
    }

    let _t = Timed::debug("compaction");
    log::debug!("compacting {} allocated entries down to {}", allocated, nnz);

    let mut tight = create_csr_buffers::<T>(true_count)?;
    debug_assert_eq!(tight.nnz(), nnz);

    let (cols, vals) = tight.row_spans_mut();
    cols.into_par_iter()
        .zip(vals)
        .enumerate()
        .for_each(|(i, (cols, vals))| {
            let start = buffers.row_ptr[i];
            debug_assert!(cols.len() <= buffers.row_ptr[i + 1] - start);
            cols.copy_from_slice(&buffers.col_idx[start..start + cols.len()]);
            vals.copy_from_slice(&buffers.values[start..start + vals.len()]);
        });

    Ok((tight, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oversized() -> CsrBuffers<f64> {
        // Allocated spans 3, 1, 2; real counts 2, 0, 2
        CsrBuffers {
            row_ptr: vec![0, 3, 4, 6],
            col_idx: vec![4, 1, 0, 0, 2, 3],
            values: vec![4.0, 1.0, 0.0, 0.0, 2.0, 3.0],
        }
    }

    #[test]
    fn test_compact_shrinks_rows() {
        let (tight, copied) = compact(oversized(), &[2, 0, 2]).unwrap();
        assert!(copied);
        assert_eq!(tight.row_ptr, vec![0, 2, 2, 4]);
        assert_eq!(tight.col_idx, vec![4, 1, 2, 3]);
        assert_eq!(tight.values, vec![4.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_compact_skips_tight_buffers() {
        let (same, copied) = compact(oversized(), &[3, 1, 2]).unwrap();
        assert!(!copied);
        assert_eq!(same.row_ptr, vec![0, 3, 4, 6]);
    }

    #[test]
    #[should_panic(expected = "one true row count per allocated row")]
    fn test_compact_needs_every_row() {
        let _ = compact(oversized(), &[2, 0]);
    }

    #[test]
    #[should_panic(expected = "true row counts sum to 7")]
    fn test_compact_rejects_growth() {
        let _ = compact(oversized(), &[3, 2, 2]);
    }
}
