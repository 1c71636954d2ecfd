//! Components, sub components and mounting.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::element::{DynElement, Element, MaybeStaticElement};
use crate::dom::NodeId;
use crate::error_handling::log_or_panic;
use crate::reactivity::KeepAlive;
use crate::reactivity::render_callbacks::RenderingState;
use crate::reactivity::state::{Ctx, State};
use crate::{MOUNT_POINT, with_document};

/// A stateful piece of ui.
///
/// ```rust
/// # use respond::prelude::*;
/// #[derive(Default)]
/// struct HelloWorld {
///     greeting: Signal<&'static str>,
/// }
/// impl State for HelloWorld {}
///
/// impl Component for HelloWorld {
///     fn render() -> impl Element<Self> {
///         e::h1().text(|ctx: &Ctx<Self>| *ctx.greeting)
///     }
/// }
/// ```
///
/// `render` has no access to state, read state in narrowly scoped closures in the element tree
/// instead, only those closures re-run when the state they read changes.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a component.",
    label = "Expected Component"
)]
pub trait Component: State + Sized {
    /// Return the root element of the component.
    fn render() -> impl Element<Self>;
}

/// Embed a stateful component inside another component.
///
/// Every time the `SubComponent` is rendered a fresh instance of the child state is created, so a
/// sub component inside a reactive closure is reset whenever that closure re-runs.
pub struct SubComponent<T: Component> {
    /// The initial state of the child
    data: T,
}

impl<T: Component> SubComponent<T> {
    /// Wrap the initial state of a child component
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<P: State, T: Component> Element<P> for SubComponent<T> {
    #[inline]
    fn render(self) -> MaybeStaticElement<P> {
        MaybeStaticElement::Dynamic(Box::new(self))
    }
}

impl<P: State, T: Component> DynElement<P> for SubComponent<T> {
    fn render(self: Box<Self>, _ctx: &mut Ctx<P>, render_state: &mut RenderingState) -> NodeId {
        let (data, keep_alive, node) = render_tree(self.data);
        render_state.keep_alive.push(Box::new(data));
        render_state.keep_alive.push(Box::new(keep_alive));
        node
    }
}

/// Create the context for a component and build its tree, returning the context, the objects
/// that must live as long as it and its root node.
fn render_tree<C: Component>(component: C) -> (Rc<RefCell<Ctx<C>>>, Vec<KeepAlive>, NodeId) {
    log::debug!("Rendering component `{}`", std::any::type_name::<C>());
    let data = Ctx::new(component);
    let mut keep_alive = Vec::new();
    let mut hooks = Vec::new();

    let node = if let Ok(mut borrow_data) = data.try_borrow_mut() {
        let mut state = RenderingState {
            keep_alive: &mut keep_alive,
            hooks: &mut hooks,
        };
        C::render().render().build(&mut borrow_data, &mut state)
    } else {
        log_or_panic!("Freshly created component already borrowed");
        with_document(crate::dom::Document::create_comment)
    };

    (data, keep_alive, node)
}

/// The result of rendering a component
///
/// This should be kept in memory for as long as the component is in the document.
#[must_use = "Dropping this before the component is unmounted will cause panics"]
pub struct RenderResult<C: State> {
    /// The component data
    data: Rc<RefCell<Ctx<C>>>,
    /// The various things that need to be kept alive
    keep_alive: Vec<KeepAlive>,
    /// The root node of the component
    root: NodeId,
}

impl<C: State> RenderResult<C> {
    /// The node the component rendered as
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Run `func` with read access to the component state.
    ///
    /// Returns `None` if the component is currently borrowed by a running handler.
    pub fn with_state<R>(&self, func: impl FnOnce(&C) -> R) -> Option<R> {
        let ctx = self.data.try_borrow().ok()?;
        Some(func(&ctx))
    }

    /// Number of objects kept alive alongside the component (for example sub components)
    #[must_use]
    pub fn keep_alive_count(&self) -> usize {
        self.keep_alive.len()
    }
}

/// Mount the component at the default mount point, creating `<div id="app">` under `<body>` if
/// it does not exist yet.
///
/// This method implicitly leaks the memory of the root component
pub fn mount<C: Component>(component: C) {
    let _ = mount_point();

    if let Err(err) = mount_at(component, MOUNT_POINT) {
        log_or_panic!("Failed to mount: {err}");
    }
}

/// The `<div id="app">` element, appended to `<body>` if it does not exist yet.
pub fn mount_point() -> NodeId {
    with_document(|document| {
        if let Some(node) = document.get_element_by_id(MOUNT_POINT) {
            return node;
        }
        let node = document.create_element("div");
        document.set_attribute(node, "id", std::borrow::Cow::Borrowed(MOUNT_POINT));
        let body = document.body();
        document.append_child(body, node);
        node
    })
}

/// Mounts the component at the target id
/// Replacing the element with the component
///
/// This method implicitly leaks the memory of the root component
///
/// # Errors
/// If target mount point is not found.
pub fn mount_at<C: Component>(component: C, target_id: &str) -> Result<(), &'static str> {
    let result = render_component(component, target_id)?;

    std::mem::forget(result);
    Ok(())
}

/// Mounts the component at the target id
/// Replacing the element with the component
/// # Errors
/// If target mount point is not found.
pub fn render_component<C: Component>(
    component: C,
    target_id: &str,
) -> Result<RenderResult<C>, &'static str> {
    log::info!(
        "Mounting root component {} at #{target_id}",
        std::any::type_name::<C>()
    );
    let target = with_document(|document| document.get_element_by_id(target_id))
        .ok_or("Failed to get mount point")?;

    let (data, keep_alive, root) = render_tree(component);
    with_document(|document| document.replace(target, root));

    Ok(RenderResult {
        data,
        keep_alive,
        root,
    })
}
