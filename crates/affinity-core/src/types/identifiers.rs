//! Identifiers handed out by the host semantic model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of one host declaration (module, type, method, field).
///
/// The host owns the numbering; the checker only requires uniqueness within
/// one compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(pub u32);

impl DeclarationId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for DeclarationId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
