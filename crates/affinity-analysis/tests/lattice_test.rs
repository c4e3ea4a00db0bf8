//! Lattice identities and asymmetries, checked over every tag.

use affinity_analysis::lattice::{call_matrix, can_call, can_override, override_matrix};
use affinity_core::ThreadTag::{self, *};

// ═══════════════════════════════════════════════════════════════════════════
// can_override
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn any_child_overrides_everything() {
    assert!(can_override(Any, None));
    for parent in ThreadTag::ALL {
        assert!(can_override(Any, Some(parent)), "Any must override {parent}");
    }
}

#[test]
fn untagged_parent_accepts_only_any() {
    for child in ThreadTag::ALL {
        assert_eq!(can_override(child, None), child == Any, "child {child}");
    }
}

#[test]
fn override_narrowing_is_one_way() {
    assert!(can_override(UiLoaderOrEventThread, Some(UiEventThread)));
    assert!(!can_override(UiEventThread, Some(UiLoaderOrEventThread)));
}

#[test]
fn override_matrix_covers_every_pair() {
    let rows = override_matrix();
    assert_eq!(rows.len(), ThreadTag::ALL.len() * (ThreadTag::ALL.len() + 1));
    for (child, parent, ok) in rows {
        assert_eq!(ok, can_override(child, parent));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// can_call
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn untagged_or_any_callee_is_always_callable() {
    for caller in ThreadTag::ALL {
        for same_instance in [false, true] {
            assert!(can_call(caller, None, same_instance));
            assert!(can_call(caller, Some(Any), same_instance));
        }
    }
}

#[test]
fn call_widening_points_the_other_way() {
    assert!(can_call(UiEventThread, Some(UiLoaderOrEventThread), false));
    assert!(!can_call(UiLoaderOrEventThread, Some(UiEventThread), false));
}

#[test]
fn not_vm_event_handler_excludes_only_the_handler() {
    for caller in ThreadTag::ALL {
        assert_eq!(
            can_call(caller, Some(NotVmEventHandler), false),
            caller != VmEventHandler,
            "caller {caller}"
        );
    }
}

#[test]
fn same_instance_never_changes_a_verdict() {
    for (caller, callee, ok) in call_matrix() {
        assert_eq!(can_call(caller, callee, true), ok, "{caller} -> {callee:?}");
    }
}

#[test]
fn distinct_plain_tags_cannot_call_each_other() {
    assert!(!can_call(Worker, Some(UiEventThread), false));
    assert!(!can_call(SimulationThread, Some(Worker), false));
    assert!(!can_call(SecondaryUiThread, Some(UiEventThread), false));
    assert!(can_call(Worker, Some(Worker), false));
}
