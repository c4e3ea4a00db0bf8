//! Edge checkers: overrides, call sites, field accesses, and the shared
//! synchronization requirement.

pub mod call_site_checker;
pub mod field_access_checker;
pub mod filter;
pub mod override_checker;
pub mod synchronization;

pub use call_site_checker::CallSiteChecker;
pub use field_access_checker::FieldAccessChecker;
pub use filter::{ScopeFilter, SkipReason};
pub use override_checker::OverrideChecker;
pub use synchronization::SynchronizationTracker;
