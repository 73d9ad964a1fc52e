//! Row size bounds and the one-call product
//!
//! The numeric kernel needs a nonzero count (or bound) per output row. A
//! full symbolic pass is outside this crate; the bound here is the cheap one:
//! the number of products contributing to the row, capped by the number of
//! output columns.

use rayon::prelude::*;

use crate::dispatch::spgemm_numeric_with_rownnz;
use crate::error::{Result, SpgemmError};
use crate::matrix::config::{RowNnzMode, SpgemmConfig};
use crate::matrix::SparseMatrixCSR;
use crate::scalar::Scalar;

/// Upper bound on the nonzeros of each row of `A * B`
///
/// Row `i` is bounded by `min(sum_k nnz(B[k, :]), n_cols(B))` over the
/// nonzeros `A[i, k]`.
pub fn row_nnz_upper_bound<T>(a: &SparseMatrixCSR<T>, b: &SparseMatrixCSR<T>) -> Result<Vec<usize>>
where
    T: Scalar,
{
    if a.n_cols != b.n_rows {
        return Err(SpgemmError::DimensionMismatch {
            left_cols: a.n_cols,
            right_rows: b.n_rows,
        });
    }

    Ok((0..a.n_rows)
        .into_par_iter()
        .map(|i| {
            let products: usize = a.col_idx[a.row_ptr[i]..a.row_ptr[i + 1]]
                .iter()
                .map(|&k| b.row_nnz(k))
                .sum();
            products.min(b.n_cols)
        })
        .collect())
}

/// Computes `A * B` using [`row_nnz_upper_bound`] and an upper-bound run
///
/// # Examples
///
/// ```
/// use hashspgemm::{spgemm, SparseMatrixCSR, SpgemmConfig};
///
/// let a = SparseMatrixCSR::<f64>::identity(2);
/// let b = SparseMatrixCSR::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1.0, 2.0, 3.0]);
///
/// let c = spgemm(&a, &b, &SpgemmConfig::default()).unwrap();
/// assert_eq!(c.to_dense(), b.to_dense());
/// ```
pub fn spgemm<T: Scalar>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    config: &SpgemmConfig,
) -> Result<SparseMatrixCSR<T>> {
    let mut row_count = row_nnz_upper_bound(a, b)?;
    let out = spgemm_numeric_with_rownnz(a, b, &mut row_count, RowNnzMode::UpperBound, config)?;
    Ok(out.matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_bound_counts_products() {
        // A = [1 1; 0 1], B = [1 1 0; 0 1 1]
        let a = SparseMatrixCSR::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1.0, 1.0, 1.0]);
        let b = SparseMatrixCSR::new(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0; 4]);

        // Row 0 has 4 products but only 3 columns exist
        assert_eq!(row_nnz_upper_bound(&a, &b).unwrap(), vec![3, 2]);
    }

    #[test]
    fn test_upper_bound_dimension_check() {
        let a = SparseMatrixCSR::<f64>::identity(2);
        let b = SparseMatrixCSR::<f64>::identity(3);
        assert!(row_nnz_upper_bound(&a, &b).is_err());
    }

    #[test]
    fn test_spgemm_overlapping_rows() {
        let a = SparseMatrixCSR::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1.0, 2.0, 3.0]);
        let b = SparseMatrixCSR::new(2, 3, vec![0, 2, 4], vec![0, 1, 1, 2], vec![1.0, 1.0, 1.0, 1.0]);

        let c = spgemm(&a, &b, &SpgemmConfig::default()).unwrap();

        // [1 2; 0 3] * [1 1 0; 0 1 1] = [1 3 2; 0 3 3]
        assert_eq!(c.nnz(), 5);
        assert_eq!(c.row_ptr, vec![0, 3, 5]);
        let dense = c.to_dense();
        assert_eq!(dense[[0, 1]], 3.0);
        assert_eq!(dense[[1, 2]], 3.0);
        assert_eq!(dense[[1, 0]], 0.0);
    }
}
