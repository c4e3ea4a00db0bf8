//! Check pipeline: one unit at a time, or many in parallel.

pub mod parallel;
pub mod pipeline;

pub use parallel::{check_units_parallel, ParallelReport};
pub use pipeline::{check_unit, check_unit_diagnostics, CheckReport, CheckStats, UnitChecker};
