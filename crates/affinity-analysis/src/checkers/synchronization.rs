//! SynchronizationTracker — `require_synchronized` checks, at most one
//! finding per declaration (and per field for field accesses).

use affinity_core::{Declaration, DeclarationId, DeclarationKind, FxHashSet, LocatedTag};

use crate::diagnostics::sink::DiagnosticSink;
use crate::diagnostics::types::Diagnostic;
use crate::model::semantic_model::SemanticModel;
use crate::resolver::attribute_resolver::AttributeResolver;

use super::filter::ScopeFilter;

#[derive(Debug, Default)]
pub struct SynchronizationTracker {
    /// Callables whose own requirement was already decided by an override edge.
    evaluated: FxHashSet<DeclarationId>,
    /// `(declaration, field location)`; `None` for a declaration-level requirement.
    reported: FxHashSet<(DeclarationId, Option<String>)>,
}

impl SynchronizationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_evaluated(&mut self, id: DeclarationId) {
        self.evaluated.insert(id);
    }

    pub fn is_evaluated(&self, id: DeclarationId) -> bool {
        self.evaluated.contains(&id)
    }

    /// The declaration itself must hold its lock.
    pub fn require(&mut self, decl: &Declaration, required_by: LocatedTag, sink: &mut dyn DiagnosticSink) {
        if decl.lock_guarded || !self.reported.insert((decl.id, None)) {
            return;
        }
        sink.report(Diagnostic::MissingSynchronization {
            declaration: decl.location.clone(),
            required_by,
        });
    }

    /// A field access must happen under the object's lock.
    pub fn require_at_access(
        &mut self,
        accessor: &Declaration,
        lock_held: bool,
        required_by: LocatedTag,
        sink: &mut dyn DiagnosticSink,
    ) {
        if lock_held || accessor.lock_guarded {
            return;
        }
        if !self.reported.insert((accessor.id, Some(required_by.location.clone()))) {
            return;
        }
        sink.report(Diagnostic::MissingSynchronization {
            declaration: accessor.location.clone(),
            required_by,
        });
    }

    /// Requirement for callables no override edge covered. Constructors and
    /// initializers cannot hold the object's lock and are exempt.
    pub fn check_declarations(
        &mut self,
        model: &SemanticModel,
        resolver: &mut AttributeResolver<'_>,
        filter: &ScopeFilter<'_>,
        sink: &mut dyn DiagnosticSink,
    ) {
        for decl in model.declarations() {
            if decl.kind != DeclarationKind::Method || self.is_evaluated(decl.id) {
                continue;
            }
            if filter.skip_reason(model, decl).is_some() {
                continue;
            }
            if let Some(tag) = resolver.resolve(decl.id).filter(|t| t.require_synchronized) {
                self.require(decl, tag, sink);
            }
        }
    }
}
