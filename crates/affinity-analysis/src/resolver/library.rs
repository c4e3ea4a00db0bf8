//! LibraryTags — configured tags for declarations the host cannot annotate.

use affinity_core::config::{LibraryScope, LibraryTagConfig};
use affinity_core::{Declaration, DeclarationKind, FxHashMap, LocatedTag};

/// Library rules indexed by scope and qualified name.
#[derive(Debug, Clone, Default)]
pub struct LibraryTags {
    modules: FxHashMap<String, LocatedTag>,
    types: FxHashMap<String, LocatedTag>,
    methods: FxHashMap<String, LocatedTag>,
}

impl LibraryTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later rules for the same scope and path replace earlier ones.
    pub fn from_config(rules: &[LibraryTagConfig]) -> Self {
        let mut tags = Self::new();
        for rule in rules {
            let located = rule.attribute().located(rule.location());
            let previous = tags.table_mut(rule.scope).insert(rule.path.clone(), located);
            if previous.is_some() {
                tracing::debug!(path = %rule.path, "library rule replaces an earlier rule");
            }
        }
        tags
    }

    fn table_mut(&mut self, scope: LibraryScope) -> &mut FxHashMap<String, LocatedTag> {
        match scope {
            LibraryScope::Module => &mut self.modules,
            LibraryScope::Type => &mut self.types,
            LibraryScope::Method => &mut self.methods,
        }
    }

    /// Rule matching a declaration at its own level, if any. Fields never
    /// have library rules.
    pub fn lookup(&self, decl: &Declaration) -> Option<&LocatedTag> {
        let table = match decl.kind {
            DeclarationKind::Module => &self.modules,
            DeclarationKind::Type => &self.types,
            DeclarationKind::Method | DeclarationKind::Constructor | DeclarationKind::Initializer => {
                &self.methods
            }
            DeclarationKind::Field => return None,
        };
        table.get(&decl.qualified_name)
    }

    pub fn len(&self) -> usize {
        self.modules.len() + self.types.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
