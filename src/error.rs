//! Error types for hashspgemm
//!
//! Only recoverable conditions live here. A failed overflow-table insert is an
//! internal invariant violation and panics instead of returning an error.

use thiserror::Error;

/// Result type alias using hashspgemm's Error
pub type Result<T> = std::result::Result<T, SpgemmError>;

/// Errors that can occur before or while launching the numeric kernel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpgemmError {
    /// Probing discipline tag is not one of `L`, `Q` or `D`
    #[error("Unrecognized hash type '{0}' ... [L(inear), Q(uadratic), D(ouble)]")]
    UnrecognizedHashType(char),

    /// Left operand columns do not match right operand rows
    #[error("Dimension mismatch: left operand has {left_cols} columns, right operand has {right_rows} rows")]
    DimensionMismatch {
        /// Columns of the left operand
        left_cols: usize,
        /// Rows of the right operand
        right_rows: usize,
    },

    /// Row-count array does not have one entry per output row
    #[error("Row count array has {got} entries, expected {expected}")]
    RowCountLength {
        /// Number of output rows
        expected: usize,
        /// Length of the supplied array
        got: usize,
    },

    /// Fast table capacity must be a non-zero power of two
    #[error("Fast table capacity {0} is not a non-zero power of two")]
    InvalidFastCapacity(usize),

    /// Lane group dimensions must be non-zero
    #[error("Invalid lane shape {x}x{y}: both dimensions must be non-zero")]
    InvalidLaneShape {
        /// Lanes cooperating on one right-operand row
        x: usize,
        /// Sub-groups taking successive left-operand nonzeros
        y: usize,
    },

    /// Maximum number of lane groups must be non-zero
    #[error("Maximum number of lane groups must be non-zero")]
    NoLaneGroups,

    /// Buffer allocation failed
    #[error("Out of memory: failed to allocate {len} elements for {what}")]
    Allocation {
        /// Which buffer was being allocated
        what: &'static str,
        /// Requested number of elements
        len: usize,
    },
}
