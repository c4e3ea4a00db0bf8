//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use affinity_analysis::{check_unit, CheckReport, CompilationUnit, Diagnostic, DiagnosticKind, TagRegistry};
use affinity_core::{AffinityConfig, Declaration, DeclarationId, TagAttribute, ThreadTag};

/// Module `app` (id 1) holding type `app.Base` (id 2) and `app.Sub` (id 3)
/// extending it.
pub fn base_and_sub() -> Vec<Declaration> {
    vec![
        Declaration::module(1, "app", "app"),
        Declaration::ty(2, 1, "app.Base", "app/Base.java"),
        Declaration::ty(3, 1, "app.Sub", "app/Sub.java").with_supertypes([DeclarationId(2)]),
    ]
}

pub fn tagged(tag: ThreadTag) -> TagAttribute {
    TagAttribute::new(tag)
}

pub fn run(unit: &CompilationUnit) -> (CheckReport, TagRegistry) {
    run_with(unit, &AffinityConfig::default())
}

pub fn run_with(unit: &CompilationUnit, config: &AffinityConfig) -> (CheckReport, TagRegistry) {
    let mut registry = TagRegistry::new();
    let report = check_unit(unit, &mut registry, config);
    (report, registry)
}

pub fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
    diagnostics.iter().map(Diagnostic::kind).collect()
}
