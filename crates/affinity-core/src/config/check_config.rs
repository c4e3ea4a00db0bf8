//! Check pass configuration.

use serde::{Deserialize, Serialize};

/// Suppression token recognised when none is configured.
pub const DEFAULT_SUPPRESSION_TOKEN: &str = "threadchecker";

/// Configuration for the override, call-site and field-access checkers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Module name prefixes whose declarations are never checked as the
    /// acting side (override child, caller, accessor).
    pub ignore_modules: Vec<String>,
    /// Declarations carrying a suppression containing this token are skipped.
    /// Default: "threadchecker".
    pub suppression_token: Option<String>,
    /// Apply subclass-wide library tags to same-signature methods that have
    /// no explicit override edge. Default: true.
    pub subclass_propagation: Option<bool>,
    /// Let an untagged override call with its parent's tag. Default: false.
    pub inherit_from_overridden: Option<bool>,
    /// Check field access edges. Default: true.
    pub check_field_access: Option<bool>,
    /// Glob patterns over the qualified name of a parent method's type.
    /// Overrides of methods declared there are not compatibility-checked.
    pub exempt_parent_types: Vec<String>,
}

impl CheckConfig {
    pub fn effective_suppression_token(&self) -> &str {
        self.suppression_token
            .as_deref()
            .unwrap_or(DEFAULT_SUPPRESSION_TOKEN)
    }

    pub fn effective_subclass_propagation(&self) -> bool {
        self.subclass_propagation.unwrap_or(true)
    }

    pub fn effective_inherit_from_overridden(&self) -> bool {
        self.inherit_from_overridden.unwrap_or(false)
    }

    pub fn effective_check_field_access(&self) -> bool {
        self.check_field_access.unwrap_or(true)
    }

    /// Whether a module's qualified name falls under an ignored prefix.
    pub fn is_module_ignored(&self, module_name: &str) -> bool {
        self.ignore_modules
            .iter()
            .any(|prefix| module_name.starts_with(prefix.as_str()))
    }
}
