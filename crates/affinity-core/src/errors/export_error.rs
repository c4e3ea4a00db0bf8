//! Registry export errors. These are operational failures, separate from
//! check diagnostics.

use super::error_code::{self, AffinityErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export locked: {path} is being written by another process")]
    Locked { path: String },

    #[error("Prior tag table is not valid UTF-8")]
    NotUtf8,

    #[error("Malformed prior tag table at line {line}: {reason}")]
    MalformedTable { line: usize, reason: String },
}

impl AffinityErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => error_code::EXPORT_IO_ERROR,
            Self::Locked { .. } => error_code::EXPORT_LOCKED,
            Self::NotUtf8 | Self::MalformedTable { .. } => error_code::EXPORT_MALFORMED,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
