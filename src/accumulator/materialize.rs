//! Packing a row's hash tables into the output arrays

use crate::accumulator::RowTables;
use crate::lanes::LaneGroup;
use crate::scalar::Scalar;
use crate::utils::split_by_offsets_mut;

/// Writes the occupied slots of `tables` contiguously into the row's span
///
/// The combined slot range (fast table, then overflow table) is cut into one
/// block per lane. Each lane counts its occupied slots, an exclusive scan over
/// the counts gives each lane its output offset, and lanes then copy their
/// entries in slot order. Output order is therefore slot-scan order, not
/// column order.
///
/// Returns the number of entries written. Any part of the span past that
/// count is left untouched.
///
/// # Panics
///
/// Panics if the row holds more entries than its span can take.
pub fn drain_row<T: Scalar>(
    row: usize,
    group: &LaneGroup,
    tables: &RowTables<'_, T>,
    cols_out: &mut [usize],
    vals_out: &mut [T],
) -> usize {
    let capacity = tables.capacity();

    let offsets = group.exclusive_scan(|lane| tables.occupied_in(group.block_of(lane, capacity)));
    let written = offsets[group.width()];

    assert!(
        written <= cols_out.len(),
        "row {} produced {} entries but only {} were allocated; the row nonzero bound is too small",
        row,
        written,
        cols_out.len()
    );

    let cols = split_by_offsets_mut(&offsets, &mut cols_out[..written]);
    let vals = split_by_offsets_mut(&offsets, &mut vals_out[..written]);
    let per_lane: Vec<_> = cols.into_iter().zip(vals).collect();

    group.phase_with(per_lane, |lane, (cols, vals)| {
        let mut j = 0;
        for slot in group.block_of(lane, capacity) {
            if let Some((col, val)) = tables.entry(slot) {
                cols[j] = col;
                vals[j] = val;
                j += 1;
            }
        }
        debug_assert_eq!(j, cols.len());
    });

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::probe::LinearProbe;
    use crate::hash::table::FastTable;
    use crate::lanes::LaneShape;

    #[test]
    fn test_drain_in_slot_order() {
        let fast = FastTable::new(4);
        let over = FastTable::new(4);
        let tables = RowTables::new(fast.table::<f64>(), over.table::<f64>());
        // 1 -> slot 1, 3 -> slot 3, 5 collides with 1 and lands in slot 2
        tables.insert::<LinearProbe>(0, 1, 1.0);
        tables.insert::<LinearProbe>(0, 3, 3.0);
        tables.insert::<LinearProbe>(0, 5, 5.0);

        let group = LaneGroup::new(LaneShape { x: 3, y: 1 });
        let mut cols = vec![usize::MAX; 5];
        let mut vals = vec![-1.0; 5];
        let written = drain_row(0, &group, &tables, &mut cols, &mut vals);

        assert_eq!(written, 3);
        assert_eq!(&cols[..3], &[1, 5, 3]);
        assert_eq!(&vals[..3], &[1.0, 5.0, 3.0]);
        // Tail untouched
        assert_eq!(cols[3..], [usize::MAX, usize::MAX]);
        assert_eq!(vals[3..], [-1.0, -1.0]);
    }

    #[test]
    fn test_drain_reads_overflow_after_fast() {
        let fast = FastTable::new(1);
        let over = FastTable::new(2);
        let tables = RowTables::new(fast.table::<f64>(), over.table::<f64>());
        tables.insert::<LinearProbe>(0, 7, 1.0);
        tables.insert::<LinearProbe>(0, 4, 2.0);
        tables.insert::<LinearProbe>(0, 9, 3.0);

        let group = LaneGroup::new(LaneShape { x: 2, y: 1 });
        let mut cols = vec![0; 3];
        let mut vals = vec![0.0; 3];
        assert_eq!(drain_row(0, &group, &tables, &mut cols, &mut vals), 3);
        assert_eq!(cols, vec![7, 4, 9]);
        assert_eq!(vals, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "row 2 produced 1 entries but only 0 were allocated")]
    fn test_drain_past_span_is_fatal() {
        let fast = FastTable::new(4);
        let over = FastTable::new(0);
        let tables = RowTables::new(fast.table::<f64>(), over.table::<f64>());
        tables.insert::<LinearProbe>(2, 0, 1.0);

        let group = LaneGroup::new(LaneShape::default());
        drain_row(2, &group, &tables, &mut [], &mut []);
    }
}
