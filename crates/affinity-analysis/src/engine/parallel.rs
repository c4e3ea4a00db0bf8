//! Parallel checking of many units via rayon.
//!
//! Each unit gets its own registry; they are merged in unit order once all
//! passes finish, so output matches a sequential run.

use affinity_core::AffinityConfig;
use rayon::prelude::*;

use crate::model::unit::CompilationUnit;
use crate::registry::tag_registry::TagRegistry;

use super::pipeline::{CheckReport, UnitChecker};

/// Reports in unit order plus the merged registry.
#[derive(Debug)]
pub struct ParallelReport {
    pub reports: Vec<CheckReport>,
    pub registry: TagRegistry,
}

impl ParallelReport {
    pub fn diagnostic_count(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics.len()).sum()
    }
}

pub fn check_units_parallel(units: &[CompilationUnit], config: &AffinityConfig) -> ParallelReport {
    let checker = UnitChecker::new(config);

    let per_unit: Vec<(CheckReport, TagRegistry)> = units
        .par_iter()
        .map(|unit| {
            let mut registry = TagRegistry::new();
            let report = checker.check(unit, &mut registry);
            (report, registry)
        })
        .collect();

    let mut merged = TagRegistry::new();
    let mut reports = Vec::with_capacity(per_unit.len());
    for (report, registry) in per_unit {
        merged.merge(registry);
        reports.push(report);
    }

    tracing::info!(
        units = reports.len(),
        tags = merged.len(),
        "parallel check complete"
    );
    ParallelReport {
        reports,
        registry: merged,
    }
}
