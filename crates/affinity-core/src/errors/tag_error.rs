use super::error_code::{self, AffinityErrorCode};

/// A tag name that does not match any `ThreadTag` variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown thread tag: {0}")]
pub struct UnknownTagError(pub String);

impl AffinityErrorCode for UnknownTagError {
    fn error_code(&self) -> &'static str {
        error_code::UNKNOWN_TAG
    }
}
