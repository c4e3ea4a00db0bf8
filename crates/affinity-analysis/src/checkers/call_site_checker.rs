//! CallSiteChecker — every call edge against the call rule.

use affinity_core::config::CheckConfig;
use affinity_core::{DeclarationId, FxHashMap, LocatedTag, ThreadTag};
use smallvec::SmallVec;

use crate::diagnostics::sink::DiagnosticSink;
use crate::diagnostics::types::Diagnostic;
use crate::engine::pipeline::CheckStats;
use crate::lattice;
use crate::model::unit::CompilationUnit;
use crate::resolver::attribute_resolver::AttributeResolver;

use super::filter::ScopeFilter;

pub struct CallSiteChecker<'c> {
    config: &'c CheckConfig,
    filter: ScopeFilter<'c>,
}

impl<'c> CallSiteChecker<'c> {
    pub fn new(config: &'c CheckConfig) -> Self {
        Self {
            config,
            filter: ScopeFilter::new(config),
        }
    }

    /// Each edge is judged on resolved tags alone, so order does not matter.
    pub fn check(
        &self,
        unit: &CompilationUnit,
        resolver: &mut AttributeResolver<'_>,
        sink: &mut dyn DiagnosticSink,
        stats: &mut CheckStats,
    ) {
        let model = unit.model();
        let parents_of = if self.config.effective_inherit_from_overridden() {
            index_parents(unit)
        } else {
            FxHashMap::default()
        };

        for edge in unit.call_edges() {
            let Some(caller) = model.get(edge.caller) else {
                continue;
            };
            if let Some(reason) = self.filter.skip_reason(model, caller) {
                tracing::debug!(caller = %caller.location, reason = reason.name(), "call edge skipped");
                stats.skipped_edges += 1;
                continue;
            }
            stats.call_edges_checked += 1;

            let caller_tag = resolver
                .resolve(edge.caller)
                .or_else(|| inherited_tag(&parents_of, edge.caller, resolver));
            let callee_tag = resolver.resolve(edge.callee);

            let allowed = lattice::call_allowed(
                caller_tag.as_ref().map(|t| t.tag),
                callee_tag.as_ref().map(|t| t.tag),
                edge.same_instance,
            );
            if !allowed {
                sink.report(Diagnostic::CallSiteViolation {
                    caller: caller.location.clone(),
                    callee: model
                        .get(edge.callee)
                        .map(|d| d.location.clone())
                        .unwrap_or_else(|| edge.callee.to_string()),
                    caller_tag,
                    callee_tag,
                    same_instance: edge.same_instance,
                });
            }
        }
    }
}

fn index_parents(unit: &CompilationUnit) -> FxHashMap<DeclarationId, SmallVec<[DeclarationId; 2]>> {
    let mut parents: FxHashMap<DeclarationId, SmallVec<[DeclarationId; 2]>> = FxHashMap::default();
    for edge in unit.override_edges() {
        parents.entry(edge.child).or_default().push(edge.parent);
    }
    parents
}

/// The tag an untagged override takes from its parents, when they agree.
fn inherited_tag(
    parents_of: &FxHashMap<DeclarationId, SmallVec<[DeclarationId; 2]>>,
    id: DeclarationId,
    resolver: &mut AttributeResolver<'_>,
) -> Option<LocatedTag> {
    let parents = parents_of.get(&id)?;
    let mut found: Option<LocatedTag> = None;
    let mut distinct: SmallVec<[ThreadTag; 2]> = SmallVec::new();
    for &parent in parents {
        if let Some(tag) = resolver.resolve(parent) {
            if !distinct.contains(&tag.tag) {
                distinct.push(tag.tag);
            }
            found.get_or_insert(tag);
        }
    }
    if distinct.len() == 1 {
        found
    } else {
        None
    }
}
