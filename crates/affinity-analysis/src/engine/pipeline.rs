//! Per-unit check pass.
//!
//! Resolve every declaration (recording into the registry), then run the
//! override, call-site and field-access checkers, then the standalone
//! synchronization requirement. Findings come back in that order.

use std::time::{Duration, Instant};

use affinity_core::AffinityConfig;
use serde::Serialize;

use crate::checkers::{
    CallSiteChecker, FieldAccessChecker, OverrideChecker, ScopeFilter, SynchronizationTracker,
};
use crate::diagnostics::sink::DiagnosticSink;
use crate::diagnostics::types::Diagnostic;
use crate::model::unit::CompilationUnit;
use crate::registry::tag_registry::TagRegistry;
use crate::resolver::attribute_resolver::AttributeResolver;
use crate::resolver::library::LibraryTags;

/// Counters for one pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckStats {
    pub declarations: usize,
    pub tagged_declarations: usize,
    pub override_edges_checked: usize,
    pub implicit_overrides_checked: usize,
    pub call_edges_checked: usize,
    pub field_accesses_checked: usize,
    /// Edges whose acting side was suppressed, in an ignored module, or a
    /// constructor touching its own fields.
    pub skipped_edges: usize,
    pub diagnostics: usize,
    #[serde(skip)]
    pub duration: Duration,
}

/// Result of checking one unit.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub unit: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: CheckStats,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Checker state shared by every unit of a run: config and library table.
pub struct UnitChecker<'c> {
    config: &'c AffinityConfig,
    library: LibraryTags,
}

impl<'c> UnitChecker<'c> {
    pub fn new(config: &'c AffinityConfig) -> Self {
        Self {
            config,
            library: LibraryTags::from_config(&config.library),
        }
    }

    pub fn library(&self) -> &LibraryTags {
        &self.library
    }

    /// Check one unit, collecting findings into the report.
    pub fn check(&self, unit: &CompilationUnit, registry: &mut TagRegistry) -> CheckReport {
        let mut diagnostics = Vec::new();
        let stats = self.check_into(unit, registry, &mut diagnostics);
        CheckReport {
            unit: unit.name().to_string(),
            diagnostics,
            stats,
        }
    }

    /// Check one unit, streaming findings into `sink`.
    pub fn check_into(
        &self,
        unit: &CompilationUnit,
        registry: &mut TagRegistry,
        sink: &mut dyn DiagnosticSink,
    ) -> CheckStats {
        let start = Instant::now();
        let check = &self.config.check;
        let model = unit.model();
        let mut stats = CheckStats::default();
        let mut counter = CountingSink { inner: sink, count: 0 };

        let mut resolver = AttributeResolver::new(model, &self.library, registry);
        for decl in model.declarations() {
            stats.declarations += 1;
            if resolver.resolve(decl.id).is_some() {
                stats.tagged_declarations += 1;
            }
        }
        for diagnostic in resolver.take_diagnostics() {
            counter.report(diagnostic);
        }

        let mut sync = SynchronizationTracker::new();
        OverrideChecker::new(check).check(unit, &mut resolver, &mut sync, &mut counter, &mut stats);
        CallSiteChecker::new(check).check(unit, &mut resolver, &mut counter, &mut stats);
        if check.effective_check_field_access() {
            FieldAccessChecker::new(check).check(unit, &mut resolver, &mut sync, &mut counter, &mut stats);
        }
        sync.check_declarations(model, &mut resolver, &ScopeFilter::new(check), &mut counter);

        stats.diagnostics = counter.count;
        stats.duration = start.elapsed();
        tracing::info!(
            unit = unit.name(),
            declarations = stats.declarations,
            tagged = stats.tagged_declarations,
            overrides = stats.override_edges_checked,
            implicit_overrides = stats.implicit_overrides_checked,
            calls = stats.call_edges_checked,
            field_accesses = stats.field_accesses_checked,
            skipped = stats.skipped_edges,
            diagnostics = stats.diagnostics,
            duration_us = stats.duration.as_micros() as u64,
            "unit checked"
        );
        stats
    }
}

struct CountingSink<'s> {
    inner: &'s mut dyn DiagnosticSink,
    count: usize,
}

impl DiagnosticSink for CountingSink<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        self.inner.report(diagnostic);
    }
}

/// Check one unit against `config`, recording resolved tags into `registry`.
pub fn check_unit(unit: &CompilationUnit, registry: &mut TagRegistry, config: &AffinityConfig) -> CheckReport {
    UnitChecker::new(config).check(unit, registry)
}

/// Just the findings of [`check_unit`].
pub fn check_unit_diagnostics(
    unit: &CompilationUnit,
    registry: &mut TagRegistry,
    config: &AffinityConfig,
) -> Vec<Diagnostic> {
    check_unit(unit, registry, config).diagnostics
}
