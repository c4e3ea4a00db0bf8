//! Shared value types: tags, identifiers, host declarations.

pub mod collections;
pub mod declaration;
pub mod identifiers;
pub mod tag;
