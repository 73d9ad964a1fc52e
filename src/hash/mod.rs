//! Open-addressing hash tables used as row accumulators
//!
//! One table type serves both tiers. [`table::FastTable`] is the small
//! fixed-capacity table each lane group reuses for every row it processes;
//! [`global::GlobalHashTable`] holds the larger overflow regions sized per
//! row before the kernel starts.

pub mod global;
pub mod probe;
pub mod table;

pub use global::{overflow_capacity, GlobalHashTable};
pub use probe::{DoubleHashProbe, LinearProbe, ProbeSequence, QuadraticProbe};
pub use table::{FastTable, HashTable, Inserted};
