//! # Lane groups
//!
//! A lane group is a fixed set of workers that process one output row at a
//! time together. Work inside a row is split into phases; every lane runs the
//! phase body in parallel and the phase returns only once all lanes are done,
//! so the end of each phase is a group-wide barrier. State written by any lane
//! in one phase is visible to every lane in the next.
//!
//! Lanes are laid out as a `x × y` grid. The `y` sub-groups take successive
//! nonzeros of the left-operand row; the `x` lanes of a sub-group split the
//! matching right-operand row between them.

use rayon::prelude::*;

use crate::constants::{DEFAULT_LANES_X, DEFAULT_LANES_Y};
use crate::utils::exclusive_scan;

/// Dimensions of a lane group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneShape {
    /// Lanes cooperating on one right-operand row
    pub x: usize,
    /// Sub-groups taking successive left-operand nonzeros
    pub y: usize,
}

impl Default for LaneShape {
    fn default() -> Self {
        Self {
            x: DEFAULT_LANES_X,
            y: DEFAULT_LANES_Y,
        }
    }
}

impl LaneShape {
    /// Total lanes in the group
    pub fn width(&self) -> usize {
        self.x * self.y
    }
}

/// Position of one lane within its group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    /// Linear id, `0..width`
    pub id: usize,
    /// Column in the lane grid
    pub x: usize,
    /// Row in the lane grid
    pub y: usize,
}

/// Runs lock-stepped phases across the lanes of one group
#[derive(Debug, Clone, Copy)]
pub struct LaneGroup {
    shape: LaneShape,
}

impl LaneGroup {
    /// Group with `shape.x * shape.y` lanes
    pub fn new(shape: LaneShape) -> Self {
        debug_assert!(shape.width() > 0, "lane group must have at least one lane");
        Self { shape }
    }

    /// Lane grid dimensions
    pub fn shape(&self) -> LaneShape {
        self.shape
    }

    /// Number of lanes
    pub fn width(&self) -> usize {
        self.shape.width()
    }

    fn lane(&self, id: usize) -> Lane {
        Lane {
            id,
            x: id % self.shape.x,
            y: id / self.shape.x,
        }
    }

    /// Runs `f` on every lane and waits for all of them
    pub fn phase<F>(&self, f: F)
    where
        F: Fn(Lane) + Sync + Send,
    {
        if self.width() == 1 {
            f(self.lane(0));
            return;
        }
        (0..self.width())
            .into_par_iter()
            .for_each(|id| f(self.lane(id)));
    }

    /// Runs `f` on every lane and returns the per-lane results in lane order
    pub fn phase_map<R, F>(&self, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(Lane) -> R + Sync + Send,
    {
        if self.width() == 1 {
            return vec![f(self.lane(0))];
        }
        (0..self.width())
            .into_par_iter()
            .map(|id| f(self.lane(id)))
            .collect()
    }

    /// Runs `f` on every lane, handing lane `i` ownership of `per_lane[i]`
    pub fn phase_with<S, F>(&self, per_lane: Vec<S>, f: F)
    where
        S: Send,
        F: Fn(Lane, S) + Sync + Send,
    {
        assert_eq!(per_lane.len(), self.width(), "one state per lane");
        if self.width() == 1 {
            for state in per_lane {
                f(self.lane(0), state);
            }
            return;
        }
        per_lane
            .into_par_iter()
            .enumerate()
            .for_each(|(id, state)| f(self.lane(id), state));
    }

    /// Group-wide sum of one value per lane
    pub fn reduce_sum<F>(&self, f: F) -> usize
    where
        F: Fn(Lane) -> usize + Sync + Send,
    {
        self.phase_map(f).into_iter().sum()
    }

    /// Group-wide exclusive prefix sum of one value per lane
    ///
    /// Returns `width + 1` offsets; the last is the total.
    pub fn exclusive_scan<F>(&self, f: F) -> Vec<usize>
    where
        F: Fn(Lane) -> usize + Sync + Send,
    {
        exclusive_scan(&self.phase_map(f))
    }

    /// Contiguous share of `0..len` owned by `lane` when the range is split
    /// into `width` nearly equal blocks, in lane order
    pub fn block_of(&self, lane: Lane, len: usize) -> std::ops::Range<usize> {
        let w = self.width();
        (lane.id * len / w)..((lane.id + 1) * len / w)
    }
}
