//! Configuration for the numeric SpGEMM kernel

use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_FAST_HASH_SIZE, GROUPS_PER_CORE};
use crate::error::{Result, SpgemmError};
use crate::lanes::LaneShape;

/// Probing discipline used by both hash table tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// Linear probing, tag `L`
    Linear,
    /// Quadratic (triangular) probing, tag `Q`
    Quadratic,
    /// Double hashing, tag `D`
    Double,
}

impl HashType {
    /// Single-character tag of this discipline
    pub fn as_char(&self) -> char {
        match self {
            HashType::Linear => 'L',
            HashType::Quadratic => 'Q',
            HashType::Double => 'D',
        }
    }
}

impl TryFrom<char> for HashType {
    type Error = SpgemmError;

    fn try_from(tag: char) -> Result<Self> {
        match tag {
            'L' => Ok(HashType::Linear),
            'Q' => Ok(HashType::Quadratic),
            'D' => Ok(HashType::Double),
            other => Err(SpgemmError::UnrecognizedHashType(other)),
        }
    }
}

impl FromStr for HashType {
    type Err = SpgemmError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(tag), None) => HashType::try_from(tag),
            (Some(tag), Some(_)) => Err(SpgemmError::UnrecognizedHashType(tag)),
            (None, _) => Err(SpgemmError::UnrecognizedHashType(' ')),
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Meaning of the row-count array for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowNnzMode {
    /// Counts are the final row sizes; output is allocated once
    Exact,
    /// Counts may overestimate; exact counts are discovered and the output compacted
    UpperBound,
}

impl RowNnzMode {
    /// Whether the counts are exact
    pub fn is_exact(&self) -> bool {
        matches!(self, RowNnzMode::Exact)
    }
}

/// How overflow tables are carved out of the global buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowLayout {
    /// One region per output row
    PerRow,
    /// One region per active lane group, sized for the largest of its rows
    /// and reset before each row
    PerGroup,
}

/// Configuration for the numeric kernel
#[derive(Debug, Clone)]
pub struct SpgemmConfig {
    /// Probing discipline
    pub hash_type: HashType,

    /// Slots in each lane group's fast table (power of two)
    pub fast_capacity: usize,

    /// Lanes per group
    pub lane_shape: LaneShape,

    /// Upper limit on concurrently active lane groups
    pub max_groups: usize,

    /// Overflow table layout
    pub overflow_layout: OverflowLayout,

    /// Sort each output row by column after the numeric pass
    pub sort_columns: bool,
}

impl Default for SpgemmConfig {
    fn default() -> Self {
        Self {
            hash_type: HashType::Linear,
            fast_capacity: DEFAULT_FAST_HASH_SIZE,
            lane_shape: LaneShape::default(),
            max_groups: num_cpus::get() * GROUPS_PER_CORE,
            overflow_layout: OverflowLayout::PerRow,
            sort_columns: false,
        }
    }
}

impl SpgemmConfig {
    /// Default configuration with the given probing discipline
    pub fn with_hash_type(hash_type: HashType) -> Self {
        Self {
            hash_type,
            ..Self::default()
        }
    }

    /// Checks the parameters that would otherwise fail inside the kernel
    pub fn validate(&self) -> Result<()> {
        if !self.fast_capacity.is_power_of_two() {
            return Err(SpgemmError::InvalidFastCapacity(self.fast_capacity));
        }
        if self.lane_shape.x == 0 || self.lane_shape.y == 0 {
            return Err(SpgemmError::InvalidLaneShape {
                x: self.lane_shape.x,
                y: self.lane_shape.y,
            });
        }
        if self.max_groups == 0 {
            return Err(SpgemmError::NoLaneGroups);
        }
        Ok(())
    }
}
