//! Implements wrappers around various global statics for the reactivity system tracking.

use std::cell::{Cell, RefCell};

use smallvec::SmallVec;

use super::state::HookKey;
use crate::error_handling::{log_or_panic, log_or_panic_assert};

/// The dependents a written signal handed over to be re-run
pub(crate) type HookDepListIter = indexmap::set::IntoIter<HookKey>;
/// Every dependency list collected while a handler ran
pub(crate) type DirtyList = SmallVec<[HookDepListIter; 4]>;

thread_local! {
    /// The current hook the signal is being accessed in.
    static CURRENT_HOOK: Cell<Option<HookKey>> = const {Cell::new(None)};
    /// List for signals to push deps lists into
    static DIRTY_HOOKS: RefCell<Option<DirtyList>> = const {RefCell::new(None)};
}

/// Return the current hook if any
#[inline]
pub(crate) fn current_hook() -> Option<HookKey> {
    CURRENT_HOOK.get()
}

/// Run the given function with the given hook as the current hook
/// and restore the previous hook on completion.
#[inline]
pub(crate) fn with_hook<R>(new_hook: HookKey, func: impl FnOnce() -> R) -> R {
    let previous_hook = CURRENT_HOOK.replace(Some(new_hook));
    let result = func();
    CURRENT_HOOK.set(previous_hook);
    result
}

/// Run the given function with no current hook, so reads are not tracked.
#[inline]
pub(crate) fn untracked<R>(func: impl FnOnce() -> R) -> R {
    let previous_hook = CURRENT_HOOK.replace(None);
    let result = func();
    CURRENT_HOOK.set(previous_hook);
    result
}

/// Push a iterator to the dirty hooks list
///
/// `calc` is only called if dirty tracking is active, writes outside of a handler keep their
/// dependents.
#[inline]
pub(crate) fn reg_dirty_list(calc: impl FnOnce() -> HookDepListIter) {
    DIRTY_HOOKS.with(|dirty_hooks| {
        let Ok(mut dirty_hooks) = dirty_hooks.try_borrow_mut() else {
            log_or_panic!("`DIRTY_HOOKS` overlapping borrow");
            return;
        };

        if let Some(dirty_hooks) = &mut *dirty_hooks {
            dirty_hooks.push(calc());
        }
    });
}

/// Run `func` while collecting the dependents of every signal it writes to.
#[inline]
pub(crate) fn with_dirty_tracking<R>(func: impl FnOnce() -> R) -> (DirtyList, R) {
    DIRTY_HOOKS.with(|dirty_hooks| {
        let Ok(mut dirty_hooks) = dirty_hooks.try_borrow_mut() else {
            log_or_panic!("`DIRTY_HOOKS` overlapping borrow");
            return;
        };

        log_or_panic_assert!(
            dirty_hooks.is_none(),
            "`with_dirty_tracking` called recursively, event handlers can not dispatch events"
        );
        *dirty_hooks = Some(SmallVec::new());
    });

    let result = untracked(func);

    let dirty_list = DIRTY_HOOKS.with(|dirty_hooks| {
        let Ok(mut dirty_hooks) = dirty_hooks.try_borrow_mut() else {
            log_or_panic!("`DIRTY_HOOKS` overlapping borrow");
            return SmallVec::new();
        };

        let Some(dirty_hooks) = dirty_hooks.take() else {
            log_or_panic!("`DIRTY_HOOKS` gone after being set");
            return SmallVec::new();
        };

        dirty_hooks
    });

    (dirty_list, result)
}

/// Clear the statics
#[cfg(any(test, feature = "test_utils"))]
pub(crate) fn clear() {
    DIRTY_HOOKS.set(None);
    CURRENT_HOOK.set(None);
}
