//! # affinity-core
//!
//! Foundation crate for the thread-affinity checker.
//! Defines the thread tag types, the host declaration model, errors, config,
//! and tracing setup. The analysis crate depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::AffinityConfig;
pub use errors::error_code::AffinityErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::declaration::{CallEdge, Declaration, DeclarationKind, FieldAccessEdge, OverrideEdge};
pub use types::identifiers::DeclarationId;
pub use types::tag::{is_exportable_location, LocatedTag, TagAttribute, ThreadTag};
