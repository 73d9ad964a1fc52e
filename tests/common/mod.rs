//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use hashspgemm::{HashType, SparseMatrixCSR};

pub const ALL_HASH_TYPES: [HashType; 3] = [HashType::Linear, HashType::Quadratic, HashType::Double];

/// Create a diagonal matrix
pub fn create_diagonal_matrix(n: usize, value: f64) -> SparseMatrixCSR<f64> {
    let row_ptr: Vec<usize> = (0..=n).collect();
    let col_idx: Vec<usize> = (0..n).collect();
    let values = vec![value; n];

    SparseMatrixCSR::new(n, n, row_ptr, col_idx, values)
}

/// Create a tridiagonal matrix
pub fn create_tridiagonal_matrix(n: usize) -> SparseMatrixCSR<f64> {
    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(0);

    for i in 0..n {
        if i > 0 {
            col_idx.push(i - 1);
            values.push(-1.0);
        }

        col_idx.push(i);
        values.push(2.0);

        if i < n - 1 {
            col_idx.push(i + 1);
            values.push(-1.0);
        }

        row_ptr.push(col_idx.len());
    }

    SparseMatrixCSR::new(n, n, row_ptr, col_idx, values)
}

/// Deterministic pseudo-random sparse matrix with `per_row` entries per row
/// (duplicates within a row collapse, so rows may be shorter)
pub fn create_scattered_matrix(n_rows: usize, n_cols: usize, per_row: usize, seed: u64) -> SparseMatrixCSR<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut row_ptr = vec![0];
    let mut col_idx = Vec::new();
    let mut values = Vec::new();
    for _ in 0..n_rows {
        let cols: BTreeSet<usize> = (0..per_row).map(|_| (next() % n_cols as u64) as usize).collect();
        for col in cols {
            col_idx.push(col);
            values.push(1.0 + (next() % 7) as f64);
        }
        row_ptr.push(col_idx.len());
    }

    SparseMatrixCSR::new(n_rows, n_cols, row_ptr, col_idx, values)
}

/// Columns of each row of `A * B` that receive at least one product
pub fn structural_columns(a: &SparseMatrixCSR<f64>, b: &SparseMatrixCSR<f64>) -> Vec<BTreeSet<usize>> {
    (0..a.n_rows)
        .map(|i| {
            a.row_iter(i)
                .flat_map(|(k, _)| b.row_iter(k).map(|(j, _)| j))
                .collect()
        })
        .collect()
}

/// Exact row counts of `A * B`
pub fn exact_row_counts(a: &SparseMatrixCSR<f64>, b: &SparseMatrixCSR<f64>) -> Vec<usize> {
    structural_columns(a, b).iter().map(|s| s.len()).collect()
}

/// Rows as column-sorted maps
pub fn canonical_rows(m: &SparseMatrixCSR<f64>) -> Vec<BTreeMap<usize, f64>> {
    (0..m.n_rows)
        .map(|i| {
            let mut row = BTreeMap::new();
            for (col, &val) in m.row_iter(i) {
                assert!(row.insert(col, val).is_none(), "row {} stores column {} twice", i, col);
            }
            row
        })
        .collect()
}

/// Column sets per row
pub fn column_sets(m: &SparseMatrixCSR<f64>) -> Vec<BTreeSet<usize>> {
    canonical_rows(m)
        .into_iter()
        .map(|row| row.keys().copied().collect())
        .collect()
}

/// Same shape, same column sets, values equal up to `epsilon`
pub fn assert_same_product(lhs: &SparseMatrixCSR<f64>, rhs: &SparseMatrixCSR<f64>, epsilon: f64) {
    assert_eq!((lhs.n_rows, lhs.n_cols), (rhs.n_rows, rhs.n_cols), "shapes differ");
    let l = canonical_rows(lhs);
    let r = canonical_rows(rhs);
    for (i, (lrow, rrow)) in l.iter().zip(&r).enumerate() {
        assert_eq!(
            lrow.keys().collect::<Vec<_>>(),
            rrow.keys().collect::<Vec<_>>(),
            "row {} columns differ",
            i
        );
        for ((col, lv), rv) in lrow.iter().zip(rrow.values()) {
            assert!(
                (lv - rv).abs() <= epsilon * (1.0 + lv.abs()),
                "row {} col {}: {} vs {}",
                i,
                col,
                lv,
                rv
            );
        }
    }
}

/// Dense product computed with ndarray
pub fn dense_product(a: &SparseMatrixCSR<f64>, b: &SparseMatrixCSR<f64>) -> ndarray::Array2<f64> {
    a.to_dense().dot(&b.to_dense())
}
