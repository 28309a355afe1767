//! Shared normalization primitives.
//!
//! Every adapter converges on the canonical contract through the same four
//! steps: column resolution, timestamp normalization, unit conversion, and
//! explicit per-row filtering.

pub mod columns;
pub mod rows;
pub mod timestamp;
pub mod units;

pub use columns::AliasList;
pub use rows::{RowParser, RowRules, TimestampColumns};
pub use timestamp::{TimestampParse, TimestampRule, MIXED_FALLBACK_FORMATS};
pub use units::Unit;
