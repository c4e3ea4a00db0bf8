//! Tag registry — every marker occurrence seen in a run, and its export table.

pub mod export;
pub mod tag_registry;

pub use export::{ExportSummary, LOCATION_WIDTH};
pub use tag_registry::TagRegistry;
