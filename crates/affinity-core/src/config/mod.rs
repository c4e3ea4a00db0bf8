//! Checker configuration, loaded from TOML.

pub mod affinity_config;
pub mod check_config;
pub mod export_config;
pub mod library_config;

pub use affinity_config::AffinityConfig;
pub use check_config::CheckConfig;
pub use export_config::ExportConfig;
pub use library_config::{LibraryScope, LibraryTagConfig};
