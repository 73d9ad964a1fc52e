//! Conversion functions between matrix formats

use ndarray::Array2;
use num_traits::Num;

use crate::matrix::SparseMatrixCSR;

impl<T: Copy + Num> SparseMatrixCSR<T> {
    /// Expands this matrix into a dense array
    ///
    /// Duplicate entries within a row are summed.
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::zeros((self.n_rows, self.n_cols));

        for i in 0..self.n_rows {
            for (col, &val) in self.row_iter(i) {
                dense[[i, col]] = dense[[i, col]] + val;
            }
        }

        dense
    }

    /// Builds a CSR matrix from the non-zero entries of a dense array
    pub fn from_dense(dense: &Array2<T>) -> Self {
        let (n_rows, n_cols) = dense.dim();
        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::new();
        let mut values = Vec::new();

        row_ptr.push(0);
        for row in dense.rows() {
            for (j, &val) in row.iter().enumerate() {
                if val != T::zero() {
                    col_idx.push(j);
                    values.push(val);
                }
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrixCSR::new(n_rows, n_cols, row_ptr, col_idx, values)
    }
}
