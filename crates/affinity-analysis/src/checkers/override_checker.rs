//! OverrideChecker — validates override edges, subclass-wide library tags,
//! and methods inheriting from parents with differing tags.

use std::collections::BTreeMap;

use affinity_core::config::CheckConfig;
use affinity_core::{Declaration, DeclarationId, DeclarationKind, FxHashSet, LocatedTag};

use crate::diagnostics::sink::DiagnosticSink;
use crate::diagnostics::types::{Diagnostic, ParentTag};
use crate::engine::pipeline::CheckStats;
use crate::lattice;
use crate::model::semantic_model::SemanticModel;
use crate::model::unit::CompilationUnit;
use crate::resolver::attribute_resolver::AttributeResolver;

use super::filter::ScopeFilter;
use super::synchronization::SynchronizationTracker;

pub struct OverrideChecker<'c> {
    config: &'c CheckConfig,
    filter: ScopeFilter<'c>,
    exempt_parents: Vec<glob::Pattern>,
}

impl<'c> OverrideChecker<'c> {
    pub fn new(config: &'c CheckConfig) -> Self {
        let exempt_parents = config
            .exempt_parent_types
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e.msg, "ignoring invalid exempt parent pattern");
                    None
                }
            })
            .collect();
        Self {
            config,
            filter: ScopeFilter::new(config),
            exempt_parents,
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
        let mut explicit: FxHashSet<(DeclarationId, DeclarationId)> = FxHashSet::default();
        let mut parents_of: BTreeMap<DeclarationId, Vec<DeclarationId>> = BTreeMap::new();

        for edge in unit.override_edges() {
            explicit.insert((edge.child, edge.parent));
            let Some(child) = model.get(edge.child) else {
                continue;
            };
            if let Some(reason) = self.filter.skip_reason(model, child) {
                tracing::debug!(child = %child.location, reason = reason.name(), "override edge skipped");
                stats.skipped_edges += 1;
                continue;
            }
            let parents = parents_of.entry(edge.child).or_default();
            if !parents.contains(&edge.parent) {
                parents.push(edge.parent);
            }
            self.check_edge(model, child, edge.parent, false, resolver, sync, sink);
            stats.override_edges_checked += 1;
        }

        if self.config.effective_subclass_propagation() {
            self.check_implicit(model, &explicit, resolver, sync, sink, stats);
        }

        self.check_inheritance_conflicts(model, &parents_of, resolver, sink);
    }

    /// Same-signature methods in subclasses of a type whose method carries a
    /// subclass-wide tag, checked as if an override edge existed.
    fn check_implicit(
        &self,
        model: &SemanticModel,
        explicit: &FxHashSet<(DeclarationId, DeclarationId)>,
        resolver: &mut AttributeResolver<'_>,
        sync: &mut SynchronizationTracker,
        sink: &mut dyn DiagnosticSink,
        stats: &mut CheckStats,
    ) {
        for parent in model.declarations() {
            if parent.kind != DeclarationKind::Method {
                continue;
            }
            let Some(signature) = parent.signature.as_deref() else {
                continue;
            };
            let propagates = resolver
                .resolve(parent.id)
                .is_some_and(|t| t.applies_to_all_subclass_methods);
            if !propagates {
                continue;
            }
            let Some(owner) = model.enclosing_type(parent.id) else {
                continue;
            };

            for sub in model.hierarchy().transitive_subtypes(owner.id) {
                for &member_id in model.members_of(sub) {
                    let Some(member) = model.get(member_id) else {
                        continue;
                    };
                    if member.kind != DeclarationKind::Method
                        || member.signature.as_deref() != Some(signature)
                        || explicit.contains(&(member.id, parent.id))
                    {
                        continue;
                    }
                    if let Some(reason) = self.filter.skip_reason(model, member) {
                        tracing::debug!(child = %member.location, reason = reason.name(), "implicit override skipped");
                        stats.skipped_edges += 1;
                        continue;
                    }
                    self.check_edge(model, member, parent.id, true, resolver, sync, sink);
                    stats.implicit_overrides_checked += 1;
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_edge(
        &self,
        model: &SemanticModel,
        child: &Declaration,
        parent_id: DeclarationId,
        implicit: bool,
        resolver: &mut AttributeResolver<'_>,
        sync: &mut SynchronizationTracker,
        sink: &mut dyn DiagnosticSink,
    ) {
        let child_tag = resolver.resolve(child.id);
        let parent_tag = resolver.resolve(parent_id);

        // An untagged child inherits from its parent and always fits.
        if let Some(ct) = &child_tag {
            if !ct.ignore_parent
                && !self.is_exempt_parent(model, parent_id)
                && !lattice::can_override(ct.tag, parent_tag.as_ref().map(|t| t.tag))
            {
                sink.report(Diagnostic::OverrideConflict {
                    child: child.location.clone(),
                    parent: location_of(model, parent_id),
                    child_tag: child_tag.clone(),
                    parent_tag: parent_tag.clone(),
                    implicit,
                });
            }
        }

        let requirement = match child_tag {
            Some(ct) => ct.require_synchronized.then_some(ct),
            None => parent_tag.filter(|t| t.require_synchronized),
        };
        sync.mark_evaluated(child.id);
        if let Some(required_by) = requirement {
            sync.require(child, required_by, sink);
        }
    }

    fn check_inheritance_conflicts(
        &self,
        model: &SemanticModel,
        parents_of: &BTreeMap<DeclarationId, Vec<DeclarationId>>,
        resolver: &mut AttributeResolver<'_>,
        sink: &mut dyn DiagnosticSink,
    ) {
        for (&child_id, parents) in parents_of {
            if parents.len() < 2 || resolver.resolve(child_id).is_some() {
                continue;
            }
            let tagged: Vec<ParentTag> = parents
                .iter()
                .filter(|&&p| !self.is_exempt_parent(model, p))
                .filter_map(|&p| {
                    resolver.resolve(p).map(|tag| ParentTag {
                        parent: location_of(model, p),
                        tag,
                    })
                })
                .collect();

            let first: Option<&LocatedTag> = tagged.first().map(|p| &p.tag);
            let differing = tagged.iter().any(|p| Some(&p.tag) != first);
            if differing {
                sink.report(Diagnostic::InheritanceConflict {
                    method: location_of(model, child_id),
                    method_tag: None,
                    parents: tagged,
                });
            }
        }
    }

    fn is_exempt_parent(&self, model: &SemanticModel, parent_id: DeclarationId) -> bool {
        if self.exempt_parents.is_empty() {
            return false;
        }
        model
            .enclosing_type(parent_id)
            .is_some_and(|ty| self.exempt_parents.iter().any(|p| p.matches(&ty.qualified_name)))
    }
}

fn location_of(model: &SemanticModel, id: DeclarationId) -> String {
    model
        .get(id)
        .map(|d| d.location.clone())
        .unwrap_or_else(|| id.to_string())
}
