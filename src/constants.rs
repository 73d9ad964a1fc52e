//! Centralized constants for the hashspgemm library
//!
//! Tunables used as configuration defaults, plus the sentinels the hash
//! tables rely on. New constants should be added here rather than scattered
//! throughout the code.

// ============================================================================
// HASH TABLE CONSTANTS
// ============================================================================

/// Key value marking a free hash table slot
pub const EMPTY_KEY: usize = usize::MAX;

/// Default number of slots in each lane group's fast table
pub const DEFAULT_FAST_HASH_SIZE: usize = 256;

// ============================================================================
// LANE GROUP CONSTANTS
// ============================================================================

/// Default lanes cooperating on one right-operand row
pub const DEFAULT_LANES_X: usize = 2;

/// Default sub-groups taking successive left-operand nonzeros
pub const DEFAULT_LANES_Y: usize = 2;

/// Active lane groups per available core
pub const GROUPS_PER_CORE: usize = 4;

// ============================================================================
// MEMORY CONSTANTS
// ============================================================================

/// Alignment of fast table storage
pub const CACHE_LINE_ALIGN: usize = 64;

// ============================================================================
// DISPLAY AND TEST CONSTANTS
// ============================================================================

/// Maximum rows printed by the matrix `Debug` impl
pub const MAX_DISPLAY_ROWS: usize = 5;

/// Maximum elements per row printed by the matrix `Debug` impl
pub const MAX_DISPLAY_ELEMENTS_PER_ROW: usize = 5;

/// Tolerance for floating point comparison in tests
pub const FLOAT_COMPARISON_EPSILON: f64 = 1e-10;
