//! Tag lattice: the two compatibility predicates over thread tags.
//!
//! The two rules lean in opposite directions around the UI pair. An override
//! may narrow `UiEventThread` to `UiLoaderOrEventThread`, while a call from
//! `UiEventThread` may reach into `UiLoaderOrEventThread`. Neither direction
//! holds the other way round.

use affinity_core::ThreadTag;

/// May a method tagged `child` override one tagged `parent`?
pub fn can_override(child: ThreadTag, parent: Option<ThreadTag>) -> bool {
    use ThreadTag::*;
    match (child, parent) {
        (Any, _) => true,
        (_, None) => false,
        (UiLoaderOrEventThread, Some(UiEventThread)) => true,
        (c, Some(p)) => c == p,
    }
}

/// May code running as `caller` invoke something tagged `callee`?
///
/// `same_instance` says whether the call targets the caller's own receiver.
/// No current rule depends on it.
pub fn can_call(caller: ThreadTag, callee: Option<ThreadTag>, same_instance: bool) -> bool {
    use ThreadTag::*;
    let _ = same_instance;
    match (caller, callee) {
        (_, None) | (_, Some(Any)) => true,
        (UiEventThread, Some(UiLoaderOrEventThread)) => true,
        (c, Some(NotVmEventHandler)) => c != VmEventHandler,
        (c, Some(t)) => c == t,
    }
}

/// Call rule with an optional caller. Untagged code may run anywhere, so it
/// may only reach untagged or `Any` callees.
pub fn call_allowed(caller: Option<ThreadTag>, callee: Option<ThreadTag>, same_instance: bool) -> bool {
    match caller {
        None => matches!(callee, None | Some(ThreadTag::Any)),
        Some(c) => can_call(c, callee, same_instance),
    }
}

/// Every `(child, parent)` pair with its `can_override` verdict, including
/// the untagged parent.
pub fn override_matrix() -> Vec<(ThreadTag, Option<ThreadTag>, bool)> {
    let mut rows = Vec::with_capacity(ThreadTag::ALL.len() * (ThreadTag::ALL.len() + 1));
    for child in ThreadTag::ALL {
        for parent in std::iter::once(None).chain(ThreadTag::ALL.into_iter().map(Some)) {
            rows.push((child, parent, can_override(child, parent)));
        }
    }
    rows
}

/// Every `(caller, callee)` pair with its `can_call` verdict, including the
/// untagged callee.
pub fn call_matrix() -> Vec<(ThreadTag, Option<ThreadTag>, bool)> {
    let mut rows = Vec::with_capacity(ThreadTag::ALL.len() * (ThreadTag::ALL.len() + 1));
    for caller in ThreadTag::ALL {
        for callee in std::iter::once(None).chain(ThreadTag::ALL.into_iter().map(Some)) {
            rows.push((caller, callee, can_call(caller, callee, false)));
        }
    }
    rows
}
