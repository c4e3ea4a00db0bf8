//! Tags for declarations the host cannot annotate, e.g. third-party code.

use serde::{Deserialize, Serialize};

use crate::types::tag::{TagAttribute, ThreadTag};

/// Which declaration level a library rule attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryScope {
    Module,
    Type,
    Method,
}

/// One `[[library]]` entry.
///
/// ```toml
/// [[library]]
/// scope = "type"
/// path = "java.lang.Thread"
/// tag = "Worker"
/// applies_to_subclasses = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryTagConfig {
    pub scope: LibraryScope,
    /// Qualified name of the module, type, or method.
    pub path: String,
    pub tag: ThreadTag,
    #[serde(default)]
    pub ignore_parent: bool,
    #[serde(default)]
    pub require_synchronized: bool,
    #[serde(default)]
    pub applies_to_subclasses: bool,
}

impl LibraryTagConfig {
    pub fn new(scope: LibraryScope, path: impl Into<String>, tag: ThreadTag) -> Self {
        Self {
            scope,
            path: path.into(),
            tag,
            ignore_parent: false,
            require_synchronized: false,
            applies_to_subclasses: false,
        }
    }

    pub fn attribute(&self) -> TagAttribute {
        TagAttribute {
            tag: self.tag,
            ignore_parent: self.ignore_parent,
            require_synchronized: self.require_synchronized,
            applies_to_all_subclass_methods: self.applies_to_subclasses,
        }
    }

    /// Registry location for tags coming from this rule.
    pub fn location(&self) -> String {
        format!("<library: {}>", self.path)
    }
}
