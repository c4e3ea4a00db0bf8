//! FieldAccessChecker — field reads and writes against the call rule and
//! the field's synchronization requirement.

use affinity_core::config::CheckConfig;

use crate::diagnostics::sink::DiagnosticSink;
use crate::diagnostics::types::Diagnostic;
use crate::engine::pipeline::CheckStats;
use crate::lattice;
use crate::model::unit::CompilationUnit;
use crate::resolver::attribute_resolver::AttributeResolver;

use super::filter::ScopeFilter;
use super::synchronization::SynchronizationTracker;

pub struct FieldAccessChecker<'c> {
    filter: ScopeFilter<'c>,
}

impl<'c> FieldAccessChecker<'c> {
    pub fn new(config: &'c CheckConfig) -> Self {
        Self {
            filter: ScopeFilter::new(config),
        }
    }

    pub fn check(
        &self,
        unit: &CompilationUnit,
        resolver: &mut AttributeResolver<'_>,
        sync: &mut SynchronizationTracker,
        sink: &mut dyn DiagnosticSink,
        stats: &mut CheckStats,
    ) {
        let model = unit.model();
        for edge in unit.field_accesses() {
            let (Some(accessor), Some(field)) = (model.get(edge.accessor), model.get(edge.field)) else {
                continue;
            };
            // The object is not yet shared while it is being constructed.
            if accessor.kind.is_construction() {
                stats.skipped_edges += 1;
                continue;
            }
            if let Some(reason) = self.filter.skip_reason(model, accessor) {
                tracing::debug!(accessor = %accessor.location, reason = reason.name(), "field access skipped");
                stats.skipped_edges += 1;
                continue;
            }
            stats.field_accesses_checked += 1;

            let accessor_tag = resolver.resolve(accessor.id);
            let field_tag = resolver.resolve(field.id);

            let allowed = lattice::call_allowed(
                accessor_tag.as_ref().map(|t| t.tag),
                field_tag.as_ref().map(|t| t.tag),
                true,
            );
            if !allowed {
                sink.report(Diagnostic::FieldAccessViolation {
                    accessor: accessor.location.clone(),
                    field: field.location.clone(),
                    accessor_tag,
                    field_tag: field_tag.clone(),
                });
            }

            if let Some(required_by) = field_tag.filter(|t| t.require_synchronized) {
                sync.require_at_access(accessor, edge.lock_held, required_by, sink);
            }
        }
    }
}
