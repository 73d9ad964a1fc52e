//! Utilities for converting between our CSR format and sprs

use crate::matrix::SparseMatrixCSR;
use num_traits::Num;
use sprs::CsMat;

/// Converts our CSR matrix format to sprs CsMat format
///
/// sprs requires sorted column indices, so rows are sorted on the way out;
/// `matrix` itself is left untouched.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default + Send + Sync,
{
    let sorted = matrix.sorted();
    CsMat::new(
        (sorted.n_rows, sorted.n_cols),
        sorted.row_ptr,
        sorted.col_idx,
        sorted.values,
    )
}

/// Converts sprs CsMat in CSR format to our SparseMatrixCSR format
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let shape = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(shape.0, shape.1, indptr, indices, data)
}
