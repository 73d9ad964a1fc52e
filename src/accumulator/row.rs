//! Per-lane accumulation of row contributions

use crate::accumulator::RowTables;
use crate::hash::probe::ProbeSequence;
use crate::lanes::{Lane, LaneShape};
use crate::matrix::SparseMatrixCSR;
use crate::scalar::Scalar;

/// Accumulates this lane's share of the contributions `A[row, k] * B[k, :]`
///
/// Sub-group `lane.y` takes left-operand nonzeros `y, y + shape.y, ...` of the
/// row; within a sub-group, lane `lane.x` takes right-operand entries
/// `x, x + shape.x, ...` of row `k`. All lanes of the group together cover
/// every product exactly once.
///
/// Returns how many slots this lane claimed, i.e. its share of the row's
/// distinct columns.
pub fn accumulate_row<T, P>(
    row: usize,
    lane: Lane,
    shape: LaneShape,
    a: &SparseMatrixCSR<T>,
    b: &SparseMatrixCSR<T>,
    tables: &RowTables<'_, T>,
) -> usize
where
    T: Scalar,
    P: ProbeSequence,
{
    let a_start = a.row_ptr[row];
    let a_end = a.row_ptr[row + 1];

    let mut num_new_insert = 0;

    for a_idx in (a_start + lane.y..a_end).step_by(shape.y) {
        let b_row = a.col_idx[a_idx];
        let mult = a.values[a_idx];

        let b_start = b.row_ptr[b_row];
        let b_end = b.row_ptr[b_row + 1];

        for b_idx in (b_start + lane.x..b_end).step_by(shape.x) {
            let ins = tables.insert::<P>(row, b.col_idx[b_idx], b.values[b_idx] * mult);
            if ins.claimed {
                num_new_insert += 1;
            }
        }
    }

    num_new_insert
}
