//! Errors raised while validating the host semantic model.

use crate::types::identifiers::DeclarationId;

use super::error_code::{self, AffinityErrorCode};

/// Malformed host input. Raised while building a compilation unit, never
/// during a check pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("duplicate declaration id {0}")]
    DuplicateDeclaration(DeclarationId),

    #[error("declaration {referrer} references unknown declaration {missing}")]
    UnknownDeclaration {
        referrer: String,
        missing: DeclarationId,
    },

    #[error("declaration {0} has an empty location descriptor")]
    EmptyLocation(DeclarationId),

    #[error("declaration {id} location {location:?} has trailing whitespace or control characters")]
    UnexportableLocation { id: DeclarationId, location: String },

    #[error("declaration {id} cannot be enclosed by a {enclosing_kind}")]
    InvalidEnclosing {
        id: DeclarationId,
        enclosing_kind: &'static str,
    },

    #[error("declaration {0} is not inside any module")]
    MissingModule(DeclarationId),

    #[error("enclosing chain of declaration {0} contains a cycle")]
    EnclosingCycle(DeclarationId),

    #[error("supertype {supertype} of {id} is not a type")]
    NotAType {
        id: DeclarationId,
        supertype: DeclarationId,
    },

    #[error("{edge} edge endpoint {id} is a {kind}, expected {expected}")]
    WrongEndpointKind {
        edge: &'static str,
        id: DeclarationId,
        kind: &'static str,
        expected: &'static str,
    },
}

impl AffinityErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_ERROR
    }
}
