//! Operational errors. Check findings are diagnostics, not errors; these
//! enums cover malformed host input, config loading, and registry export.

pub mod config_error;
pub mod error_code;
pub mod export_error;
pub mod model_error;
pub mod tag_error;

pub use config_error::ConfigError;
pub use error_code::AffinityErrorCode;
pub use export_error::ExportError;
pub use model_error::ModelError;
pub use tag_error::UnknownTagError;
