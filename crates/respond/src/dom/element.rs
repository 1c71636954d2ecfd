//! Implementation of the `Element` trait for various abstract types.

use std::borrow::Cow;

use super::HtmlElement;
use crate::dom::NodeId;
use crate::reactivity::render_callbacks::{ReactiveNode, RenderingState};
use crate::reactivity::state::{Ctx, State};
use crate::{type_macros, with_document};

/// A result of the rendering process.
pub enum ElementRenderResult {
    /// A node that already exists in the document.
    Node(NodeId),
    /// A text node.
    Text(Cow<'static, str>),
    /// A empty placeholder.
    Empty,
}

impl ElementRenderResult {
    /// Convert to a node in the document.
    pub(crate) fn into_node(self) -> NodeId {
        match self {
            ElementRenderResult::Node(node) => node,
            ElementRenderResult::Text(text) => with_document(|document| document.create_text(text)),
            ElementRenderResult::Empty => with_document(super::Document::create_comment),
        }
    }
}

/// The result of a `.render` call.
pub enum MaybeStaticElement<C: State> {
    /// A already statically rendered element.
    Static(ElementRenderResult),
    /// A html element
    Html(HtmlElement<C>),
    /// A element that needs access to state to be rendered.
    Dynamic(Box<dyn DynElement<C>>),
}

impl<C: State> MaybeStaticElement<C> {
    /// Create the node for this element, registering hooks and listeners in `ctx`.
    pub(crate) fn build(self, ctx: &mut Ctx<C>, render_state: &mut RenderingState) -> NodeId {
        match self {
            MaybeStaticElement::Static(element) => element.into_node(),
            MaybeStaticElement::Html(html) => html.build(ctx, render_state),
            MaybeStaticElement::Dynamic(element) => element.render(ctx, render_state),
        }
    }
}

/// A element is anything that can be rendered in the document.
/// This is ofc `HtmlElement`, but also strings, numerics, and even closures.
pub trait Element<C: State>: 'static {
    /// Convert the element into a `MaybeStaticElement`.
    fn render(self) -> MaybeStaticElement<C>;
}

/// A dynamic element
pub(crate) trait DynElement<C: State> {
    /// Render the element.
    fn render(self: Box<Self>, ctx: &mut Ctx<C>, render_state: &mut RenderingState) -> NodeId;
}

impl<C: State, T: Element<C>> Element<C> for Option<T> {
    #[inline]
    fn render(self) -> MaybeStaticElement<C> {
        match self {
            Some(element) => element.render(),
            None => MaybeStaticElement::Static(ElementRenderResult::Empty),
        }
    }
}

impl<C: State, T: Element<C>, E: Element<C>> Element<C> for Result<T, E> {
    #[inline]
    fn render(self) -> MaybeStaticElement<C> {
        match self {
            Ok(element) => element.render(),
            Err(element) => element.render(),
        }
    }
}

/// Generate a Element implementation for a type that can be converted to `&str`
macro_rules! string_element {
    ($t:ty, $cow:expr) => {
        impl<C: State> Element<C> for $t {
            #[inline]
            fn render(self) -> MaybeStaticElement<C> {
                MaybeStaticElement::Static(ElementRenderResult::Text(($cow)(self)))
            }
        }
    };
}
type_macros::strings_cow!(string_element);

/// Generate a implementation of `Element` for a specific numeric type.
macro_rules! numeric_element {
    ($T:ident, $fmt:ident) => {
        impl<C: State> Element<C> for $T {
            #[inline]
            fn render(self) -> MaybeStaticElement<C> {
                let mut buffer = $fmt::Buffer::new();
                let result = buffer.format(self);

                MaybeStaticElement::Static(ElementRenderResult::Text(Cow::Owned(result.to_owned())))
            }
        }
    };
}
type_macros::numerics!(numeric_element);

impl<C: State> Element<C> for MaybeStaticElement<C> {
    #[inline]
    fn render(self) -> MaybeStaticElement<C> {
        self
    }
}

impl<F, C, R> DynElement<C> for F
where
    F: Fn(&Ctx<C>) -> R + 'static,
    R: Element<C> + 'static,
    C: State,
{
    fn render(self: Box<Self>, ctx: &mut Ctx<C>, render_state: &mut RenderingState) -> NodeId {
        let this = *self;
        let (me, node) = ReactiveNode::create_initial(Box::new(move |ctx| this(ctx).render()), ctx);
        render_state.hooks.push(me);
        node
    }
}

impl<F, C, R> Element<C> for F
where
    F: Fn(&Ctx<C>) -> R + 'static,
    R: Element<C> + 'static,
    C: State,
{
    #[inline]
    fn render(self) -> MaybeStaticElement<C> {
        MaybeStaticElement::Dynamic(Box::new(self))
    }
}
