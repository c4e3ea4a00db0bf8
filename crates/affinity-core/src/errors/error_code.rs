//! Stable error codes handed to the host alongside error messages.

pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXPORT_IO_ERROR: &str = "EXPORT_IO_ERROR";
pub const EXPORT_LOCKED: &str = "EXPORT_LOCKED";
pub const EXPORT_MALFORMED: &str = "EXPORT_MALFORMED";
pub const UNKNOWN_TAG: &str = "UNKNOWN_TAG";

/// Every error type in the workspace maps to a stable, machine-readable code.
pub trait AffinityErrorCode {
    fn error_code(&self) -> &'static str;
}
