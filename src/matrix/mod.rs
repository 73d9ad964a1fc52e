// Matrix data structures and configuration

pub mod config;
pub mod conversion;
pub mod csr;

pub use config::{HashType, OverflowLayout, RowNnzMode, SpgemmConfig};
pub use csr::SparseMatrixCSR;
