//! Signals for tracking reactive dependencies and modifications.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use indexmap::IndexSet;

use crate::error_handling::log_or_panic;
use crate::reactivity::state::HookKey;
use crate::reactivity::statics;

/// A signal tracks reads and writes to a value, as well as dependencies.
///
/// Reading the value inside a reactive closure registers that closure as a dependent. Mutably
/// accessing it inside a event handler marks every dependent dirty, and they are re-run once
/// the handler returns.
pub struct Signal<T> {
    /// The data to be tracked.
    data: T,
    /// A collection of the dependencies.
    deps: RefCell<IndexSet<HookKey>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.data.fmt(f)
    }
}

impl<T> Signal<T> {
    /// Create a new signal with the specified data
    pub fn new(data: T) -> Self {
        Self {
            data,
            deps: RefCell::new(IndexSet::new()),
        }
    }

    /// Read the value without registering a dependency.
    pub fn peek(&self) -> &T {
        &self.data
    }

    /// Replace the value, marking dependents dirty, and return the old one.
    pub fn replace(&mut self, value: T) -> T {
        std::mem::replace(&mut **self, value)
    }

    /// Number of hooks currently depending on this signal.
    #[cfg(test)]
    pub(crate) fn dependents(&self) -> usize {
        self.deps.borrow().len()
    }
}

impl<T> Deref for Signal<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        if let Some(hook) = statics::current_hook() {
            if let Ok(mut deps) = self.deps.try_borrow_mut() {
                deps.insert(hook);
            } else {
                log_or_panic!("Signal deps list already borrowed");
            }
        }

        &self.data
    }
}

impl<T> DerefMut for Signal<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        let deps = self.deps.get_mut();
        if let Some(hook) = statics::current_hook() {
            deps.insert(hook);
        } else if !deps.is_empty() {
            statics::reg_dirty_list(|| std::mem::take(deps).into_iter());
        }

        &mut self.data
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Signal<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn reads_inside_hook_register_dependency() {
        statics::clear();
        let mut keys: SlotMap<HookKey, ()> = SlotMap::with_key();
        let hook = keys.insert(());
        let signal = Signal::new(5);

        let value = statics::with_hook(hook, || *signal);

        assert_eq!(value, 5);
        assert_eq!(signal.dependents(), 1);
    }

    #[test]
    fn reads_outside_hooks_are_untracked() {
        statics::clear();
        let signal = Signal::new("hello");

        assert_eq!(*signal, "hello");
        assert_eq!(*signal.peek(), "hello");
        assert_eq!(signal.dependents(), 0);
    }

    #[test]
    fn writes_hand_over_dependents() {
        statics::clear();
        let mut keys: SlotMap<HookKey, ()> = SlotMap::with_key();
        let first = keys.insert(());
        let second = keys.insert(());
        let mut signal = Signal::new(0_u8);
        statics::with_hook(first, || *signal);
        statics::with_hook(second, || *signal);
        statics::with_hook(first, || *signal);

        let (dirty, old) = statics::with_dirty_tracking(|| signal.replace(1));

        assert_eq!(old, 0);
        assert_eq!(*signal.peek(), 1);
        assert_eq!(signal.dependents(), 0);
        let dirty: Vec<HookKey> = dirty.into_iter().flatten().collect();
        assert_eq!(dirty, [first, second]);
    }

    #[test]
    fn writes_outside_tracking_keep_dependents() {
        statics::clear();
        let mut keys: SlotMap<HookKey, ()> = SlotMap::with_key();
        let hook = keys.insert(());
        let mut signal = Signal::new(0);
        statics::with_hook(hook, || *signal);

        *signal += 1;

        assert_eq!(signal.dependents(), 1);
    }
}
