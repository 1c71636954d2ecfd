//! Component state, its context and the hook store.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::{Rc, Weak};

use slotmap::{SecondaryMap, SlotMap, new_key_type};

use crate::error_handling::log_or_panic;
use crate::reactivity::render_callbacks::{DummyHook, ReactiveHook};
use crate::reactivity::statics::DirtyList;

new_key_type! { pub(crate) struct HookKey; }

/// Marker for types that can be used as component state.
///
/// Reactive fields should be wrapped in [`Signal`](crate::Signal), plain fields can be read in
/// handlers but never trigger re-renders.
pub trait State: 'static {}

impl State for () {}

/// A manager for storing hooks
pub(crate) struct HookStore<T: State> {
    /// The hooks themself
    hooks: SlotMap<HookKey, Box<dyn ReactiveHook<T>>>,
    /// The insertion order
    insertion_order: SecondaryMap<HookKey, u64>,
    /// The next key in the insertion order
    next_insertion_order: u64,
}

impl<T: State> HookStore<T> {
    /// Create a new hook store
    fn new() -> Self {
        Self {
            hooks: SlotMap::default(),
            insertion_order: SecondaryMap::default(),
            next_insertion_order: 0,
        }
    }

    /// Insert a hook
    fn insert_hook(&mut self, hook: Box<dyn ReactiveHook<T>>) -> HookKey {
        let key = self.hooks.insert(hook);
        self.insertion_order.insert(key, self.next_insertion_order);

        self.next_insertion_order = if let Some(value) = self.next_insertion_order.checked_add(1) {
            value
        } else {
            log_or_panic!("Insertion order overflow");
            0
        };
        key
    }
}

/// The core component state, stores the component data and all framework data.
///
/// Event handlers get `&mut Ctx<C>` and reactive closures `&Ctx<C>`, both deref to `C`.
pub struct Ctx<C: State> {
    /// The component data
    pub(crate) data: C,
    /// A weak reference to ourself, so that event handlers can easily get a weak reference
    /// without having to pass it around in every api
    pub(crate) this: Weak<RefCell<Self>>,
    /// Reactive hooks
    hooks: HookStore<C>,
}

impl<C: State> Deref for Ctx<C> {
    type Target = C;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<C: State> DerefMut for Ctx<C> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<C: State> Ctx<C> {
    /// Create a new instance of the state, returning a `Rc` to it
    pub(crate) fn new(data: C) -> Rc<RefCell<Self>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                data,
                this: this.clone(),
                hooks: HookStore::new(),
            })
        })
    }

    /// Number of live hooks
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.hooks.len()
    }

    /// Insert a hook and return its key
    pub(crate) fn insert_hook(&mut self, hook: Box<dyn ReactiveHook<C>>) -> HookKey {
        self.hooks.insert_hook(hook)
    }

    /// Update the value for a hook
    pub(crate) fn set_hook(&mut self, key: HookKey, hook: Box<dyn ReactiveHook<C>>) {
        if let Some(slot) = self.hooks.hooks.get_mut(key) {
            *slot = hook;
        } else {
            log_or_panic!("Attempted to set a hook that does not exist");
        }
    }

    /// Drop the hook and all its children
    pub(crate) fn drop_hook(&mut self, hook: HookKey) {
        if let Some(hook) = self.hooks.hooks.remove(hook) {
            for child in hook.drop_us() {
                self.drop_hook(child);
            }
        }
        self.hooks.insertion_order.remove(hook);
    }

    /// Remove the hook from the slotmap, runs the function on it, then puts it back.
    ///
    /// This is to allow mut access to both the hook and self, which is required by most hooks.
    fn run_with_hook_and_self<F, R>(&mut self, hook: HookKey, func: F) -> Option<R>
    where
        F: FnOnce(&mut Self, &mut Box<dyn ReactiveHook<C>>) -> R,
    {
        let slot_ref = self.hooks.hooks.get_mut(hook)?;
        let mut temp_hook: Box<dyn ReactiveHook<C>> = Box::new(DummyHook);
        std::mem::swap(slot_ref, &mut temp_hook);

        let res = func(self, &mut temp_hook);

        let slot_ref = self.hooks.hooks.get_mut(hook)?;
        *slot_ref = temp_hook;

        Some(res)
    }

    /// Re-run every dirty hook once, in the order they were created.
    ///
    /// Parents are always created before their children, so a child dropped by its parent's
    /// re-render is skipped instead of being updated.
    pub(crate) fn update(&mut self, dirty: DirtyList) {
        let mut queue: Vec<(u64, HookKey)> = dirty
            .into_iter()
            .flatten()
            .filter_map(|hook| Some((*self.hooks.insertion_order.get(hook)?, hook)))
            .collect();
        queue.sort_unstable();
        queue.dedup();

        if !queue.is_empty() {
            log::trace!(
                "Updating {} hooks in `{}`",
                queue.len(),
                std::any::type_name::<C>()
            );
        }

        for (_, hook) in queue {
            self.run_with_hook_and_self(hook, |ctx, hook_value| hook_value.update(ctx, hook));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactivity::statics;

    struct Recorder {
        calls: Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        children: Vec<HookKey>,
    }

    impl<C: State> ReactiveHook<C> for Recorder {
        fn update(&mut self, _ctx: &mut Ctx<C>, _you: HookKey) {
            self.calls.borrow_mut().push(self.name);
        }
        fn drop_us(self: Box<Self>) -> Vec<HookKey> {
            self.children
        }
    }

    fn recorder(calls: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Box<Recorder> {
        Box::new(Recorder {
            calls: Rc::clone(calls),
            name,
            children: Vec::new(),
        })
    }

    #[test]
    fn update_runs_in_insertion_order_once() {
        statics::clear();
        let ctx = Ctx::new(());
        let mut ctx = ctx.borrow_mut();
        let calls = Rc::default();
        let first = ctx.insert_hook(recorder(&calls, "first"));
        let second = ctx.insert_hook(recorder(&calls, "second"));

        let mut set = indexmap::IndexSet::new();
        set.insert(second);
        set.insert(first);
        let mut again = indexmap::IndexSet::new();
        again.insert(second);
        ctx.update(smallvec::smallvec![set.into_iter(), again.into_iter()]);

        assert_eq!(*calls.borrow(), ["first", "second"]);
    }

    #[test]
    fn dropping_a_hook_drops_its_children() {
        statics::clear();
        let ctx = Ctx::new(());
        let mut ctx = ctx.borrow_mut();
        let calls = Rc::default();
        let child = ctx.insert_hook(recorder(&calls, "child"));
        let mut parent = recorder(&calls, "parent");
        parent.children.push(child);
        let parent = ctx.insert_hook(parent);

        ctx.drop_hook(parent);

        assert_eq!(ctx.hook_count(), 0);
        let mut set = indexmap::IndexSet::new();
        set.insert(child);
        ctx.update(smallvec::smallvec![set.into_iter()]);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn weak_self_reference_is_populated() {
        let ctx = Ctx::new(());
        let this = ctx.borrow().this.upgrade();
        assert!(this.is_some_and(|this| Rc::ptr_eq(&this, &ctx)));
    }
}
