//! Output buffer allocation from per-row counts

use crate::error::Result;
use crate::scalar::Scalar;
use crate::utils::{split_by_offsets_mut, try_alloc_with, try_exclusive_scan};

/// Freshly sized CSR arrays, not yet validated as a matrix
///
/// In upper-bound runs rows may be only partly filled, which is why the
/// numeric kernel works on raw buffers and builds the matrix at the end.
#[derive(Debug, Clone)]
pub struct CsrBuffers<T> {
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<usize>,
    pub values: Vec<T>,
}

impl<T> CsrBuffers<T> {
    /// Allocated entries
    pub fn nnz(&self) -> usize {
        self.col_idx.len()
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.row_ptr.len() - 1
    }

    /// Disjoint mutable spans of every row, for column indices and values
    pub fn row_spans_mut(&mut self) -> (Vec<&mut [usize]>, Vec<&mut [T]>) {
        let cols = split_by_offsets_mut(&self.row_ptr, &mut self.col_idx);
        let vals = split_by_offsets_mut(&self.row_ptr, &mut self.values);
        (cols, vals)
    }
}

/// Allocates CSR arrays with room for `row_count[i]` entries in row `i`
///
/// Row pointers are the exclusive scan of the counts; column indices and
/// values are zero-filled.
pub fn create_csr_buffers<T: Scalar>(row_count: &[usize]) -> Result<CsrBuffers<T>> {
    let row_ptr = try_exclusive_scan(row_count, "row pointers")?;
    let nnz = row_ptr[row_count.len()];

    let col_idx = try_alloc_with(nnz, "column indices", || 0usize)?;
    let values = try_alloc_with(nnz, "values", T::zero)?;

    Ok(CsrBuffers {
        row_ptr,
        col_idx,
        values,
    })
}
