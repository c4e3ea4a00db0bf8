//! # affinity-analysis
//!
//! Analysis engine for the thread-affinity checker.
//! Contains the tag lattice, semantic model indices, attribute resolution,
//! the tag registry, the override/call-site/field-access checkers,
//! diagnostics, and the per-unit pipeline.

#![allow(clippy::module_inception)]

pub mod checkers;
pub mod diagnostics;
pub mod engine;
pub mod lattice;
pub mod model;
pub mod registry;
pub mod resolver;

pub use diagnostics::sarif::generate_sarif;
pub use diagnostics::sink::DiagnosticSink;
pub use diagnostics::types::{Diagnostic, DiagnosticKind};
pub use engine::parallel::{check_units_parallel, ParallelReport};
pub use engine::pipeline::{check_unit, check_unit_diagnostics, CheckReport, CheckStats, UnitChecker};
pub use model::unit::{CompilationUnit, UnitBuilder};
pub use registry::tag_registry::TagRegistry;
