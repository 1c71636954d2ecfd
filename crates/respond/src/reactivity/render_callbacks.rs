//! Implements the reactive hooks for updating the document in response to signal changes.

use std::borrow::Cow;

use crate::dom::NodeId;
use crate::dom::element::MaybeStaticElement;
use crate::reactivity::KeepAlive;
use crate::reactivity::state::{Ctx, HookKey, State};
use crate::reactivity::statics;
use crate::with_document;

/// State passed to rendering callbacks
pub(crate) struct RenderingState<'s> {
    /// Push objects to this array to keep them alive as long as the parent context is valid.
    pub(crate) keep_alive: &'s mut Vec<KeepAlive>,
    /// The hooks that are a child of this
    pub(crate) hooks: &'s mut Vec<HookKey>,
}

/// All reactive hooks will implement this trait to allow them to be stored as `dyn` objects.
pub(crate) trait ReactiveHook<C: State> {
    /// Recalculate the hook and apply its update.
    ///
    /// Signals hand their dependents over when written, so hooks have to read their signals
    /// with `you` as the current hook again to stay subscribed.
    fn update(&mut self, ctx: &mut Ctx<C>, you: HookKey);
    /// Return the list of hooks that should be dropped
    fn drop_us(self: Box<Self>) -> Vec<HookKey>;
}

/// A noop hook used to fill the slot while the initial render pass runs so that that
/// a real hook can be swapped in once initialized
pub(crate) struct DummyHook;
impl<C: State> ReactiveHook<C> for DummyHook {
    fn update(&mut self, _ctx: &mut Ctx<C>, _you: HookKey) {}
    fn drop_us(self: Box<Self>) -> Vec<HookKey> {
        Vec::new()
    }
}

/// The callback of a reactive node
pub(crate) type NodeCallback<C> = Box<dyn Fn(&Ctx<C>) -> MaybeStaticElement<C>>;

/// Reactive hook for swapping out a entire node.
pub(crate) struct ReactiveNode<C: State> {
    /// The callback to produce nodes
    callback: NodeCallback<C>,
    /// The current rendered node to replace
    target_node: Option<NodeId>,
    /// Vector of various objects to be kept alive for the duration of the rendered content
    keep_alive: Vec<KeepAlive>,
    /// Hooks that are a child of this
    hooks: Vec<HookKey>,
}

impl<C: State> ReactiveNode<C> {
    /// Render this hook and simply return the node
    fn render(&mut self, ctx: &mut Ctx<C>, you: HookKey) -> NodeId {
        let element = statics::with_hook(you, || (self.callback)(&*ctx));

        let mut state = RenderingState {
            keep_alive: &mut self.keep_alive,
            hooks: &mut self.hooks,
        };
        element.build(ctx, &mut state)
    }

    /// Create a new `ReactiveNode` registering the initial dependencies and returning both the
    /// `HookKey` for it and the initial node (Which should be inserted in the document)
    pub(crate) fn create_initial(callback: NodeCallback<C>, ctx: &mut Ctx<C>) -> (HookKey, NodeId) {
        let me = ctx.insert_hook(Box::new(DummyHook));

        let mut this = Self {
            callback,
            target_node: None,
            keep_alive: Vec::new(),
            hooks: Vec::new(),
        };
        let node = this.render(ctx, me);
        this.target_node = Some(node);
        ctx.set_hook(me, Box::new(this));

        (me, node)
    }
}

impl<C: State> ReactiveHook<C> for ReactiveNode<C> {
    fn update(&mut self, ctx: &mut Ctx<C>, you: HookKey) {
        for hook in std::mem::take(&mut self.hooks) {
            ctx.drop_hook(hook);
        }
        let old_keep_alive = std::mem::take(&mut self.keep_alive);

        let new_node = self.render(ctx, you);
        if let Some(old_node) = self.target_node.replace(new_node) {
            with_document(|document| document.replace(old_node, new_node));
        }
        drop(old_keep_alive);
    }

    fn drop_us(self: Box<Self>) -> Vec<HookKey> {
        self.hooks
    }
}

/// The callback of a reactive attribute
pub(crate) type AttributeCallback<C> = Box<dyn Fn(&Ctx<C>) -> Option<Cow<'static, str>>>;

/// Reactive hook keeping a single attribute in sync.
pub(crate) struct ReactiveAttribute<C: State> {
    /// The attribute name
    name: &'static str,
    /// The element the attribute lives on
    node: NodeId,
    /// Calculate the value, `None` removes the attribute
    callback: AttributeCallback<C>,
}

impl<C: State> ReactiveAttribute<C> {
    /// Create the hook and apply its initial value
    pub(crate) fn create_initial(
        name: &'static str,
        node: NodeId,
        callback: AttributeCallback<C>,
        ctx: &mut Ctx<C>,
    ) -> HookKey {
        let me = ctx.insert_hook(Box::new(DummyHook));
        let mut this = Self {
            name,
            node,
            callback,
        };
        this.update(ctx, me);
        ctx.set_hook(me, Box::new(this));
        me
    }
}

impl<C: State> ReactiveHook<C> for ReactiveAttribute<C> {
    fn update(&mut self, ctx: &mut Ctx<C>, you: HookKey) {
        let value = statics::with_hook(you, || (self.callback)(&*ctx));
        with_document(|document| match value {
            Some(value) => document.set_attribute(self.node, self.name, value),
            None => document.remove_attribute(self.node, self.name),
        });
    }

    fn drop_us(self: Box<Self>) -> Vec<HookKey> {
        Vec::new()
    }
}
