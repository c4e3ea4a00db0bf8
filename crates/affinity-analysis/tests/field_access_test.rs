//! Field access checking: tag compatibility, thread-safe fields,
//! construction exemption, and lock requirements.

mod common;

use affinity_analysis::{CompilationUnit, Diagnostic, DiagnosticKind};
use affinity_core::{AffinityConfig, Declaration, TagAttribute, ThreadTag};

use common::{kinds, run, run_with};

fn window() -> Vec<Declaration> {
    vec![
        Declaration::module(1, "app", "app"),
        Declaration::ty(2, 1, "app.Window", "Window").with_marker(ThreadTag::UiEventThread),
        Declaration::field(3, 2, "app.Window.title", "Window.title"),
        Declaration::field(4, 2, "app.Window.closed", "Window.closed").thread_safe(),
        Declaration::method(5, 2, "app.Window.load", "Window.load").with_marker(ThreadTag::Worker),
        Declaration::constructor(6, 2, "app.Window.<init>", "Window()").with_marker(ThreadTag::Worker),
        Declaration::method(7, 2, "app.Window.show", "Window.show"),
    ]
}

#[test]
fn worker_touching_ui_field_is_reported() {
    let unit = CompilationUnit::builder("Window.java")
        .declarations(window())
        .field_access(5, 3, false)
        .field_access(7, 3, false)
        .build()
        .unwrap();
    let (report, _) = run(&unit);
    match report.diagnostics.as_slice() {
        [Diagnostic::FieldAccessViolation { accessor, field, .. }] => {
            assert_eq!(accessor, "Window.load");
            assert_eq!(field, "Window.title");
        }
        other => panic!("expected one field access violation, got {other:?}"),
    }
    assert_eq!(report.stats.field_accesses_checked, 2);
}

#[test]
fn thread_safe_field_is_open_to_everyone() {
    let unit = CompilationUnit::builder("Window.java")
        .declarations(window())
        .field_access(5, 4, false)
        .build()
        .unwrap();
    assert!(run(&unit).0.is_clean());
}

#[test]
fn constructors_may_initialise_fields() {
    let unit = CompilationUnit::builder("Window.java")
        .declarations(window())
        .field_access(6, 3, false)
        .build()
        .unwrap();
    let (report, _) = run(&unit);
    assert!(report.is_clean());
    assert_eq!(report.stats.skipped_edges, 1);
}

#[test]
fn field_checking_can_be_disabled() {
    let mut config = AffinityConfig::default();
    config.check.check_field_access = Some(false);
    let unit = CompilationUnit::builder("Window.java")
        .declarations(window())
        .field_access(5, 3, false)
        .build()
        .unwrap();
    let (report, _) = run_with(&unit, &config);
    assert!(report.is_clean());
    assert_eq!(report.stats.field_accesses_checked, 0);
}

fn counter_unit(lock_held: bool, guarded: bool) -> CompilationUnit {
    let mut bump = Declaration::method(4, 2, "app.Counter.bump", "Counter.bump");
    if guarded {
        bump = bump.lock_guarded();
    }
    CompilationUnit::builder("Counter.java")
        .declaration(Declaration::module(1, "app", "app"))
        .declaration(Declaration::ty(2, 1, "app.Counter", "Counter"))
        .declaration(
            Declaration::field(3, 2, "app.Counter.value", "Counter.value")
                .with_marker(TagAttribute::new(ThreadTag::Any).with_require_synchronized()),
        )
        .declaration(bump)
        .field_access(4, 3, lock_held)
        .field_access(4, 3, lock_held)
        .build()
        .unwrap()
}

#[test]
fn synchronized_field_needs_lock_once_per_accessor() {
    let (report, _) = run(&counter_unit(false, false));
    assert_eq!(kinds(&report.diagnostics), vec![DiagnosticKind::MissingSynchronization]);
    match &report.diagnostics[0] {
        Diagnostic::MissingSynchronization {
            declaration,
            required_by,
        } => {
            assert_eq!(declaration, "Counter.bump");
            assert_eq!(required_by.location, "Counter.value");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn lock_held_block_or_guarded_method_satisfies_field_lock() {
    assert!(run(&counter_unit(true, false)).0.is_clean());
    assert!(run(&counter_unit(false, true)).0.is_clean());
}
