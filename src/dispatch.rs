//! # Numeric SpGEMM with known row sizes
//!
//! Entry point of the numeric kernel. Given a row-count array that is either
//! exact or an upper bound, this module
//!
//! 1. validates the configuration and picks the probing discipline,
//! 2. sizes the overflow hash tables and the output buffers,
//! 3. launches the active lane groups, each taking rows round-robin,
//! 4. and, for upper-bound counts, compacts the output.
//!
//! Within one lane group a row goes through four phases: reset tables,
//! accumulate, count, drain. Rows never share tables or output spans.

use rayon::prelude::*;

use crate::accumulator::{accumulate_row, drain_row, RowTables};
use crate::alloc::{create_csr_buffers, CsrBuffers};
use crate::compaction::compact;
use crate::error::{Result, SpgemmError};
use crate::hash::global::GlobalHashTable;
use crate::hash::probe::{DoubleHashProbe, LinearProbe, ProbeSequence, QuadraticProbe};
use crate::hash::table::FastTable;
use crate::lanes::LaneGroup;
use crate::matrix::config::{HashType, RowNnzMode, SpgemmConfig};
use crate::matrix::SparseMatrixCSR;
use crate::scalar::Scalar;
use crate::utils::Timed;

/// Result of a numeric run
#[derive(Debug, Clone)]
pub struct NumericOutput<T> {
    /// The product matrix
    pub matrix: SparseMatrixCSR<T>,
    /// Final number of stored entries
    pub nnz: usize,
    /// Whether the compaction pass re-packed the output
    pub compacted: bool,
}

/// How many lane groups run and which rows each one gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Active lane groups
    pub n_groups: usize,
}

impl LaunchConfig {
    /// At most `max_groups` groups, and never more than there are rows
    pub fn new(n_rows: usize, max_groups: usize) -> Self {
        Self {
            n_groups: n_rows.min(max_groups).max(1),
        }
    }

    /// Group that processes `row`
    pub fn group_of(&self, row: usize) -> usize {
        row % self.n_groups
    }

    /// Deals `items` out to the groups round-robin: item `i` goes to group
    /// `i % n_groups`, keeping its relative order
    pub fn assign<X>(&self, items: Vec<X>) -> Vec<Vec<X>> {
        let per_group = items.len() / self.n_groups + 1;
        let mut buckets: Vec<Vec<X>> = (0..self.n_groups)
            .map(|_| Vec::with_capacity(per_group))
            .collect();
        for (i, item) in items.into_iter().enumerate() {
            buckets[self.group_of(i)].push(item);
        }
        buckets
    }
}

/// Everything one row needs from the shared buffers
struct RowTask<'a, T> {
    row: usize,
    cols: &'a mut [usize],
    vals: &'a mut [T],
    count: &'a mut usize,
}

/// Computes `C = A * B` given per-row nonzero counts of `C`
///
/// With [`RowNnzMode::Exact`] the counts must be the true row sizes and the
/// output is allocated once. With [`RowNnzMode::UpperBound`] the counts only
/// need to be at least the true sizes; they are overwritten with the true
/// sizes and the output is compacted if any bound was loose.
///
/// Columns within a row come out in hash-slot order unless
/// [`SpgemmConfig::sort_columns`] is set.
///
/// # Errors
///
/// Configuration and shape errors are reported before any work starts;
/// allocation failures are propagated.
///
/// # Panics
///
/// Panics if a row has more distinct columns than its count allows.
///
/// # Examples
///
/// ```
/// use hashspgemm::{spgemm_numeric_with_rownnz, RowNnzMode, SparseMatrixCSR, SpgemmConfig};
///
/// let a = SparseMatrixCSR::new(1, 1, vec![0, 1], vec![0], vec![2.0]);
/// let b = SparseMatrixCSR::new(1, 1, vec![0, 1], vec![0], vec![3.0]);
/// let mut row_count = vec![1];
///
/// let out = spgemm_numeric_with_rownnz(&a, &b, &mut row_count, RowNnzMode::Exact, &SpgemmConfig::default())
///     .unwrap();
/// assert_eq!(out.matrix.values, vec![6.0]);
/// assert_eq!(out.nnz, 1);
/// ```
pub fn spgemm_numeric_with_rownnz<T: Scalar>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    row_count: &mut [usize],
    mode: RowNnzMode,
    config: &SpgemmConfig,
) -> Result<NumericOutput<T>> {
    config.validate()?;
    if a.n_cols != b.n_rows {
        return Err(SpgemmError::DimensionMismatch {
            left_cols: a.n_cols,
            right_rows: b.n_rows,
        });
    }
    if row_count.len() != a.n_rows {
        return Err(SpgemmError::RowCountLength {
            expected: a.n_rows,
            got: row_count.len(),
        });
    }

    let mut out = match config.hash_type {
        HashType::Linear => numerical_with_rownnz::<T, LinearProbe>(a, b, row_count, mode, config)?,
        HashType::Quadratic => numerical_with_rownnz::<T, QuadraticProbe>(a, b, row_count, mode, config)?,
        HashType::Double => numerical_with_rownnz::<T, DoubleHashProbe>(a, b, row_count, mode, config)?,
    };

    if config.sort_columns {
        out.matrix.sort_indices();
    }

    Ok(out)
}

fn numerical_with_rownnz<T, P>(
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    row_count: &mut [usize],
    mode: RowNnzMode,
    config: &SpgemmConfig,
) -> Result<NumericOutput<T>>
where
    T: Scalar,
    P: ProbeSequence,
{
    let _t = Timed::info("spgemm numeric");

    let n_rows = a.n_rows;
    let launch = LaunchConfig::new(n_rows, config.max_groups);
    let shape = config.lane_shape;

    log::debug!(
        "numeric spgemm: {}x{} * {}x{}, hash {}, {:?} row counts, {} groups of {}x{} lanes",
        a.n_rows,
        a.n_cols,
        b.n_rows,
        b.n_cols,
        P::TAG,
        mode,
        launch.n_groups,
        shape.x,
        shape.y
    );

    // All buffers exist before any lane group starts
    let ghash = GlobalHashTable::create(row_count, config.fast_capacity, config.overflow_layout, launch.n_groups)?;
    let mut buffers: CsrBuffers<T> = create_csr_buffers(row_count)?;
    let fast_tables: Vec<FastTable> = (0..launch.n_groups)
        .map(|_| FastTable::new(config.fast_capacity))
        .collect();

    {
        let (cols, vals) = buffers.row_spans_mut();
        let tasks: Vec<RowTask<'_, T>> = cols
            .into_iter()
            .zip(vals)
            .zip(row_count.iter_mut())
            .enumerate()
            .map(|(row, ((cols, vals), count))| RowTask { row, cols, vals, count })
            .collect();

        launch
            .assign(tasks)
            .into_par_iter()
            .zip(fast_tables.par_iter())
            .for_each(|(tasks, fast)| {
                let group = LaneGroup::new(shape);
                for task in tasks {
                    let tables = RowTables::new(fast.table::<T>(), ghash.region_for_row::<T>(task.row));
                    compute_row::<T, P>(&group, &tables, a, b, mode, task);
                }
            });
    }

    let (buffers, compacted) = if mode.is_exact() {
        (buffers, false)
    } else {
        compact(buffers, row_count)?
    };

    let nnz = buffers.nnz();
    let matrix = SparseMatrixCSR::new(n_rows, b.n_cols, buffers.row_ptr, buffers.col_idx, buffers.values);

    Ok(NumericOutput {
        matrix,
        nnz,
        compacted,
    })
}

/// Runs one row through the lane group
fn compute_row<T, P>(
    group: &LaneGroup,
    tables: &RowTables<'_, T>,
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    mode: RowNnzMode,
    task: RowTask<'_, T>,
) where
    T: Scalar,
    P: ProbeSequence,
{
    let RowTask { row, cols, vals, count } = task;
    let shape = group.shape();
    let width = group.width();

    group.phase(|lane| tables.reset_strided(lane.id, width));

    let jsum = group.reduce_sum(|lane| accumulate_row::<T, P>(row, lane, shape, a, b, tables));

    let written = drain_row(row, group, tables, cols, vals);
    debug_assert_eq!(written, jsum);

    match mode {
        RowNnzMode::Exact => assert_eq!(
            written, *count,
            "row {} has {} entries but its exact count is {}",
            row, written, *count
        ),
        RowNnzMode::UpperBound => *count = jsum,
    }

    log::trace!("row {}: {} entries", row, written);
}
