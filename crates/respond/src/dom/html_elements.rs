//! Implementation of html elements, as well as helper constructors.
//!
//! This module is generally used via its alias in the prelude, `e`.
//! Most commonly you will just use the element functions directly, but you can construct a
//! `HtmlElement` instance if needed.
//!
//! # Example
//! ```
//! # use respond::prelude::*;
//! # let _: e::HtmlElement<()> =
//! e::div()
//!     .child(e::button().text("Click me"))
//!     .child(e::h1().text("Wow!"))
//! # ;
//! ```

use std::borrow::Cow;
#[cfg(debug_assertions)]
use std::collections::HashSet;
use std::rc::Rc;

use smallvec::SmallVec;

use super::attributes::AttributeResult;
use crate::dom::element::{Element, MaybeStaticElement};
use crate::dom::events::{DomEvent, Event};
use crate::dom::{ListenerFn, NodeId, ToAttribute, ToClass};
use crate::error_handling::log_or_panic;
use crate::reactivity::render_callbacks::{ReactiveAttribute, RenderingState};
use crate::reactivity::state::{Ctx, State};
use crate::reactivity::statics;
use crate::with_document;

/// A event handler as stored on a element before it is rendered
pub(crate) type HandlerFunc<C> = Box<dyn Fn(&mut Ctx<C>, &mut DomEvent)>;

/// A Generic html node with a given name.
#[must_use = "Web elements are useless if not rendered"]
pub struct HtmlElement<C: State> {
    /// The tag name
    tag: &'static str,
    /// Attributes in the order they were set
    attributes: SmallVec<[(&'static str, AttributeResult<C>); 2]>,
    /// Classes in the order they were added
    classes: SmallVec<[Cow<'static, str>; 2]>,
    /// Child elements
    children: Vec<MaybeStaticElement<C>>,
    /// Event handlers
    handlers: SmallVec<[(&'static str, HandlerFunc<C>); 1]>,
    /// List of attributes that are already set.
    #[cfg(debug_assertions)]
    seen_attributes: HashSet<&'static str>,
}

impl<C: State> HtmlElement<C> {
    /// Create a new html element with the specific tag
    ///
    /// Common html elements have a helper function in this module
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: SmallVec::new(),
            classes: SmallVec::new(),
            children: Vec::new(),
            handlers: SmallVec::new(),
            #[cfg(debug_assertions)]
            seen_attributes: HashSet::new(),
        }
    }

    /// The tag this element will render as
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Register a event handler for this element.
    ///
    /// The handler gets mutable access to the component state and the event object, writes to
    /// signals re-render the parts of the component that read them once the handler returns.
    /// ```rust
    /// # use respond::prelude::*;
    /// # struct MyComponent {
    /// #     some_value: Signal<i32>,
    /// # }
    /// # impl State for MyComponent {}
    /// # impl Component for MyComponent {
    /// # fn render() -> impl Element<Self> {
    /// e::button().on::<events::Click>(|ctx: &mut Ctx<Self>, _event| {
    ///     *ctx.some_value += 1;
    /// })
    /// # }}
    /// ```
    #[inline]
    pub fn on<E: Event>(mut self, function: impl Fn(&mut Ctx<C>, &mut DomEvent) + 'static) -> Self {
        self.handlers.push((E::EVENT_NAME, Box::new(function)));
        self
    }

    /// Push a child to this element.
    /// This accepts any valid element including closures.
    /// ```rust
    /// # use respond::prelude::*;
    /// # struct MyComponent {
    /// #     toggle: Signal<bool>,
    /// # }
    /// # impl State for MyComponent {}
    /// # impl Component for MyComponent {
    /// # fn render() -> impl Element<Self> {
    /// e::div()
    ///     .child(e::h1().text("Wow!"))
    ///     .child(|ctx: &Ctx<Self>| {
    ///         if *ctx.toggle {
    ///             "Hello"
    ///         } else {
    ///             "World"
    ///         }
    ///     })
    /// # }}
    /// ```
    #[inline]
    pub fn child<E: Element<C> + 'static>(mut self, child: E) -> Self {
        self.children.push(child.render());
        self
    }

    /// This is a simple alias for `child`
    #[inline]
    pub fn text<E: Element<C> + 'static>(self, text: E) -> Self {
        self.child(text)
    }

    /// Add multiple children
    #[inline]
    pub fn children<E: Element<C>>(mut self, elements: impl IntoIterator<Item = E>) -> Self {
        for element in elements {
            self = self.child(element);
        }
        self
    }

    /// Set a attribute on the node.
    #[inline]
    pub fn attr(mut self, key: &'static str, value: impl ToAttribute<C>) -> Self {
        #[cfg(debug_assertions)]
        {
            if !self.seen_attributes.insert(key) {
                log::warn!(
                    "Duplicate `{key}` attribute set on `<{}>` in `{}`",
                    self.tag,
                    std::any::type_name::<C>()
                );
            }
        }

        if key == "class" {
            log_or_panic!("Use `.class` instead of setting the `class` attribute");
            return self;
        }

        self.attributes.push((key, value.calc_attribute()));
        self
    }

    /// Set the `id` attribute.
    #[inline]
    pub fn id(self, id: impl ToAttribute<C>) -> Self {
        self.attr("id", id)
    }

    /// Add a class to the element.
    #[inline]
    pub fn class(mut self, class: impl ToClass<C> + 'static) -> Self {
        if let Some(class) = class.calc_class() {
            for part in class.split_ascii_whitespace() {
                self.classes.push(Cow::Owned(part.to_owned()));
            }
        }
        self
    }

    /// Add multiple classes
    #[inline]
    pub fn classes<Cls: ToClass<C> + 'static>(
        mut self,
        class_list: impl IntoIterator<Item = Cls>,
    ) -> Self {
        for class in class_list {
            self = self.class(class);
        }
        self
    }

    /// Create the element in the document, rendering children and attaching handlers.
    pub(crate) fn build(self, ctx: &mut Ctx<C>, render_state: &mut RenderingState) -> NodeId {
        let HtmlElement {
            tag,
            attributes,
            classes,
            children,
            handlers,
            ..
        } = self;

        let node = with_document(|document| {
            let node = document.create_element(tag);
            for class in classes {
                document.add_class(node, class);
            }
            node
        });

        for (key, value) in attributes {
            match value {
                AttributeResult::SetIt(Some(value)) => {
                    with_document(|document| document.set_attribute(node, key, value));
                }
                AttributeResult::SetIt(None) => {}
                AttributeResult::IsDynamic(callback) => {
                    let hook = ReactiveAttribute::create_initial(key, node, callback, ctx);
                    render_state.hooks.push(hook);
                }
            }
        }

        for child in children {
            let child = child.build(ctx, render_state);
            with_document(|document| document.append_child(node, child));
        }

        for (event, handler) in handlers {
            let listener = create_listener(ctx, handler);
            with_document(|document| document.add_listener(node, event, listener));
        }

        node
    }
}

/// Wrap a component event handler into a document listener.
///
/// The listener only holds a weak reference to the component, and runs the component update
/// cycle after the handler returns.
fn create_listener<C: State>(ctx: &Ctx<C>, handler: HandlerFunc<C>) -> ListenerFn {
    let ctx_weak = ctx.this.clone();

    Rc::new(move |event: &mut DomEvent| {
        let Some(ctx) = ctx_weak.upgrade() else {
            log_or_panic!("Component dropped without event handlers being cleaned up");
            return;
        };
        let Ok(mut ctx) = ctx.try_borrow_mut() else {
            log_or_panic!("Component already mutably borrowed in event handler");
            return;
        };

        log::trace!(
            "Running `{}` handler of `{}`",
            event.name(),
            std::any::type_name::<C>()
        );
        let (dirty, ()) = statics::with_dirty_tracking(|| handler(&mut *ctx, event));
        ctx.update(dirty);
    })
}

impl<C: State> Element<C> for HtmlElement<C> {
    #[inline]
    fn render(self) -> MaybeStaticElement<C> {
        MaybeStaticElement::Html(self)
    }
}

/// Implement a factory function that returns a `HtmlElement` with a tag name equal to the
/// function.
macro_rules! elements {
    ($($name:ident),*) => {
        $(
            pastey::paste! {
                #[doc = "<https://developer.mozilla.org/docs/Web/HTML/Reference/Elements/" $name ">"]
                #[inline]
                pub fn $name<C: State>() -> HtmlElement<C> {
                    HtmlElement::new(stringify!($name))
                }
            }
        )*
    };
}

/// Generate `attr` helpers for common attributes
macro_rules! attr_helpers {
    ($($attr:ident => $attr_name:literal),*) => {
        impl<C: State> HtmlElement<C> {
            pastey::paste! {
                $(
                    #[doc = "Set the `" $attr_name "` attribute"]
                    #[inline]
                    pub fn $attr(self, value: impl ToAttribute<C>) -> Self {
                        self.attr($attr_name, value)
                    }
                )*
            }
        }
    };
}

// https://developer.mozilla.org/en-US/docs/Web/HTML/Element
elements! {
h1, h2, h3, h4, h5, h6,
article, aside, footer, header, main, nav, section,
div, hr, li, ol, p, pre, ul,
a, b, br, code, em, i, small, span, strong,
img,
button, fieldset, form, input, label, legend, option, select, textarea
}

attr_helpers! {
    alt => "alt",
    disabled => "disabled",
    href => "href",
    name => "name",
    placeholder => "placeholder",
    src => "src",
    title => "title",
    r#type => "type",
    value => "value"
}
