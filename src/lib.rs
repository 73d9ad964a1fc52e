//! # hashspgemm: hash-table based sparse matrix-matrix multiplication
//!
//! Numeric SpGEMM kernel for forming Galerkin products in algebraic
//! multigrid setup, where the sparsity of `C = A * B` is only known as a
//! per-row count (exact or an upper bound).
//!
//! ## Overview
//!
//! Each output row is accumulated by a lane group into two open-addressing
//! hash tables:
//!
//! - a small **fast table** of fixed capacity, owned by the lane group and
//!   reused row after row,
//! - a per-row **overflow table**, sized before launch from the row's count,
//!   used only when the fast table has no room for a new column.
//!
//! Both tables are then drained into the row's span of the output. With
//! upper-bound counts the true row sizes are discovered along the way and the
//! output is compacted to fit.
//!
//! ## Algorithm Components
//!
//! 1. **Hash probing**: linear, quadratic or double hashing ([`hash::probe`])
//! 2. **Row accumulation**: two-tier insert with atomic claim-then-add ([`accumulator`])
//! 3. **Overflow allocation**: power-of-two regions per row ([`hash::global`])
//! 4. **Materialization**: lane-parallel scan and pack ([`accumulator::materialize`])
//! 5. **Compaction**: re-packing upper-bound output ([`compaction`])
//! 6. **Dispatch**: discipline selection and lane group launch ([`dispatch`])
//!
//! ## Usage
//!
//! ```
//! use hashspgemm::{spgemm_numeric_with_rownnz, RowNnzMode, SparseMatrixCSR, SpgemmConfig, HashType};
//!
//! let a = SparseMatrixCSR::<f64>::identity(2);
//! let b = SparseMatrixCSR::new(2, 2, vec![0, 2, 3], vec![0, 1, 0], vec![1.0, 2.0, 3.0]);
//!
//! // Loose bounds: 2 entries allowed in each row
//! let mut row_count = vec![2, 2];
//! let config = SpgemmConfig::with_hash_type(HashType::Double);
//! let out = spgemm_numeric_with_rownnz(&a, &b, &mut row_count, RowNnzMode::UpperBound, &config).unwrap();
//!
//! assert_eq!(row_count, vec![2, 1]);
//! assert!(out.compacted);
//! assert_eq!(out.matrix.to_dense(), b.to_dense());
//! ```

pub mod accumulator;
pub mod alloc;
pub mod compaction;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod hash;
pub mod lanes;
pub mod matrix;
pub mod scalar;
pub mod symbolic;
pub mod utils;

// Re-export primary components
pub use dispatch::{spgemm_numeric_with_rownnz, LaunchConfig, NumericOutput};
pub use error::{Result, SpgemmError};
pub use lanes::LaneShape;
pub use matrix::config::{HashType, OverflowLayout, RowNnzMode, SpgemmConfig};
pub use matrix::SparseMatrixCSR;
pub use scalar::Scalar;
pub use symbolic::{row_nnz_upper_bound, spgemm};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the hashspgemm library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
