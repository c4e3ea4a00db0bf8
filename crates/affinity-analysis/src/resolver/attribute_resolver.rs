//! AttributeResolver — effective tag via declaration → enclosing type →
//! enclosing module, memoised for one pass.

use affinity_core::{Declaration, DeclarationId, DeclarationKind, FxHashMap, LocatedTag, TagAttribute, ThreadTag};
use smallvec::SmallVec;

use crate::diagnostics::types::Diagnostic;
use crate::model::semantic_model::SemanticModel;
use crate::registry::tag_registry::TagRegistry;

use super::library::LibraryTags;

/// What a single declaration says about itself, ignoring its ancestors.
#[derive(Debug, Clone)]
enum OwnMarker {
    Absent,
    Tagged(LocatedTag),
    /// Distinct tags written on one declaration; reported once.
    Conflicted,
}

/// Resolves and memoises effective tags, recording each into the registry.
///
/// The first resolution of a declaration is final for the pass.
pub struct AttributeResolver<'a> {
    model: &'a SemanticModel,
    library: &'a LibraryTags,
    registry: &'a mut TagRegistry,
    own: FxHashMap<DeclarationId, OwnMarker>,
    effective: FxHashMap<DeclarationId, Option<LocatedTag>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(model: &'a SemanticModel, library: &'a LibraryTags, registry: &'a mut TagRegistry) -> Self {
        Self {
            model,
            library,
            registry,
            own: FxHashMap::default(),
            effective: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Effective tag of a declaration, or `None` when nothing in its chain is
    /// tagged. Unknown ids resolve to `None`.
    pub fn resolve(&mut self, id: DeclarationId) -> Option<LocatedTag> {
        if let Some(cached) = self.effective.get(&id) {
            return cached.clone();
        }
        let model = self.model;
        let decl = model.get(id)?;

        let resolved = match self.own_marker(decl) {
            OwnMarker::Tagged(tag) => Some(tag),
            OwnMarker::Conflicted => None,
            OwnMarker::Absent => self.inherited(decl),
        };

        if let Some(tag) = &resolved {
            self.registry.record(tag.clone());
        }
        self.effective.insert(id, resolved.clone());
        resolved
    }

    /// Candidates above the declaration itself, nearest first.
    fn inherited(&mut self, decl: &Declaration) -> Option<LocatedTag> {
        let model = self.model;
        let mut candidates: SmallVec<[&Declaration; 2]> = SmallVec::new();
        match decl.kind {
            DeclarationKind::Module => {}
            DeclarationKind::Type => {
                candidates.extend(model.module_of(decl.id));
            }
            DeclarationKind::Field if decl.thread_safe => {
                return Some(
                    TagAttribute::new(ThreadTag::Any)
                        .located(format!("<thread-safe field: {}>", decl.qualified_name)),
                );
            }
            DeclarationKind::Method
            | DeclarationKind::Constructor
            | DeclarationKind::Initializer
            | DeclarationKind::Field => {
                candidates.extend(model.enclosing_type(decl.id));
                candidates.extend(model.module_of(decl.id));
            }
        }

        candidates
            .into_iter()
            .find_map(|candidate| match self.own_marker(candidate) {
                OwnMarker::Tagged(tag) => Some(tag),
                OwnMarker::Absent | OwnMarker::Conflicted => None,
            })
    }

    /// Host markers first, then a matching library rule.
    fn own_marker(&mut self, decl: &Declaration) -> OwnMarker {
        if let Some(cached) = self.own.get(&decl.id) {
            return cached.clone();
        }

        let mut distinct: SmallVec<[ThreadTag; 2]> = SmallVec::new();
        for marker in &decl.markers {
            if !distinct.contains(&marker.tag) {
                distinct.push(marker.tag);
            }
        }

        let own = match (distinct.len(), decl.markers.first()) {
            (0, _) | (_, None) => match self.library.lookup(decl) {
                Some(tag) => OwnMarker::Tagged(tag.clone()),
                None => OwnMarker::Absent,
            },
            (1, Some(&first)) => {
                // Repeated markers naming one tag contribute all their flags.
                let merged = decl.markers[1..].iter().fold(first, |acc, m| acc.union(*m));
                OwnMarker::Tagged(merged.located(decl.location.clone()))
            }
            _ => {
                tracing::debug!(declaration = %decl.location, "conflicting thread tags");
                self.diagnostics.push(Diagnostic::UnresolvableAttribute {
                    declaration: decl.location.clone(),
                    tags: distinct.into_vec(),
                });
                OwnMarker::Conflicted
            }
        };
        self.own.insert(decl.id, own.clone());
        own
    }

    /// Number of declarations resolved so far.
    pub fn resolved_count(&self) -> usize {
        self.effective.len()
    }

    /// Drain the `UnresolvableAttribute` findings collected so far.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affinity_core::config::{LibraryScope, LibraryTagConfig};

    fn model(decls: Vec<Declaration>) -> SemanticModel {
        SemanticModel::build(decls).unwrap()
    }

    #[test]
    fn method_inherits_module_tag_through_untagged_type() {
        let m = model(vec![
            Declaration::module(1, "app", "app").with_marker(ThreadTag::Worker),
            Declaration::ty(2, 1, "app.C", "app.C"),
            Declaration::method(3, 2, "app.C.m", "app.C.m"),
        ]);
        let lib = LibraryTags::new();
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        let tag = r.resolve(DeclarationId(3)).unwrap();
        assert_eq!(tag.tag, ThreadTag::Worker);
        assert_eq!(tag.location, "app");
        drop(r);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn conflict_reports_once_and_falls_back_to_none() {
        let m = model(vec![
            Declaration::module(1, "app", "app"),
            Declaration::ty(2, 1, "app.C", "app.C").with_marker(ThreadTag::Worker),
            Declaration::method(3, 2, "app.C.m", "app.C.m")
                .with_marker(ThreadTag::UiEventThread)
                .with_marker(ThreadTag::SimulationThread),
        ]);
        let lib = LibraryTags::new();
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        assert!(r.resolve(DeclarationId(3)).is_none());
        assert!(r.resolve(DeclarationId(3)).is_none());
        let diags = r.take_diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(matches!(
            &diags[0],
            Diagnostic::UnresolvableAttribute { tags, .. }
                if tags == &vec![ThreadTag::UiEventThread, ThreadTag::SimulationThread]
        ));
    }

    #[test]
    fn conflicted_type_is_skipped_by_its_members() {
        let m = model(vec![
            Declaration::module(1, "app", "app").with_marker(ThreadTag::SimulationThread),
            Declaration::ty(2, 1, "app.C", "app.C")
                .with_marker(ThreadTag::Worker)
                .with_marker(ThreadTag::Any),
            Declaration::method(3, 2, "app.C.m", "app.C.m"),
        ]);
        let lib = LibraryTags::new();
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        assert_eq!(r.resolve(DeclarationId(3)).unwrap().tag, ThreadTag::SimulationThread);
        assert!(r.resolve(DeclarationId(2)).is_none());
        assert_eq!(r.take_diagnostics().len(), 1);
    }

    #[test]
    fn repeated_identical_markers_are_not_a_conflict() {
        let m = model(vec![
            Declaration::module(1, "app", "app"),
            Declaration::ty(2, 1, "app.C", "app.C"),
            Declaration::method(3, 2, "app.C.m", "app.C.m")
                .with_marker(ThreadTag::Worker)
                .with_marker(TagAttribute::new(ThreadTag::Worker).with_ignore_parent()),
        ]);
        let lib = LibraryTags::new();
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        let tag = r.resolve(DeclarationId(3)).unwrap();
        assert_eq!(tag.tag, ThreadTag::Worker);
        assert!(tag.ignore_parent);
        assert!(!tag.require_synchronized);
        assert!(r.take_diagnostics().is_empty());
    }

    #[test]
    fn host_marker_beats_library_rule_at_same_level() {
        let m = model(vec![
            Declaration::module(1, "lib", "lib"),
            Declaration::ty(2, 1, "lib.T", "lib.T").with_marker(ThreadTag::SimulationThread),
            Declaration::method(3, 2, "lib.T.run", "lib.T.run"),
        ]);
        let lib = LibraryTags::from_config(&[
            LibraryTagConfig::new(LibraryScope::Type, "lib.T", ThreadTag::Worker),
            LibraryTagConfig::new(LibraryScope::Module, "lib", ThreadTag::Any),
        ]);
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        assert_eq!(r.resolve(DeclarationId(3)).unwrap().tag, ThreadTag::SimulationThread);
        assert_eq!(r.resolve(DeclarationId(1)).unwrap().location, "<library: lib>");
    }

    #[test]
    fn thread_safe_field_resolves_to_any() {
        let m = model(vec![
            Declaration::module(1, "app", "app"),
            Declaration::ty(2, 1, "app.C", "app.C").with_marker(ThreadTag::UiEventThread),
            Declaration::field(3, 2, "app.C.count", "app.C.count").thread_safe(),
            Declaration::field(4, 2, "app.C.items", "app.C.items"),
        ]);
        let lib = LibraryTags::new();
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        let safe = r.resolve(DeclarationId(3)).unwrap();
        assert_eq!(safe.tag, ThreadTag::Any);
        assert_eq!(safe.location, "<thread-safe field: app.C.count>");
        assert_eq!(r.resolve(DeclarationId(4)).unwrap().tag, ThreadTag::UiEventThread);
    }

    #[test]
    fn unknown_id_is_untagged() {
        let m = model(vec![Declaration::module(1, "app", "app")]);
        let lib = LibraryTags::new();
        let mut reg = TagRegistry::new();
        let mut r = AttributeResolver::new(&m, &lib, &mut reg);
        assert!(r.resolve(DeclarationId(77)).is_none());
        assert_eq!(r.resolved_count(), 0);
    }
}
