//! A headless component runtime.
//!
//! Components render into an in-memory [`dom::Document`], state lives in [`Signal`]s and every
//! write re-renders exactly the hooks that read it. Events are dispatched the way a browser does
//! it: the target first, then every ancestor, until a handler halts propagation.
//!
//! ```
//! use respond::prelude::*;
//!
//! #[derive(Default)]
//! struct Counter {
//!     value: Signal<u32>,
//! }
//! impl State for Counter {}
//!
//! impl Component for Counter {
//!     fn render() -> impl Element<Self> {
//!         e::button()
//!             .id("counter")
//!             .text(|ctx: &Ctx<Self>| *ctx.value)
//!             .on::<events::Click>(|ctx: &mut Ctx<Self>, _event| *ctx.value += 1)
//!     }
//! }
//!
//! respond::mount(Counter::default());
//!
//! let Some(button) = respond::with_document(|document| document.get_element_by_id("counter")) else {
//!     unreachable!("the counter is mounted");
//! };
//! let _ = respond::dom::events::click(button);
//! let html = respond::with_document(|document| document.outer_html(button));
//! assert_eq!(html, r#"<button id="counter">1</button>"#);
//! ```
#![forbid(unsafe_code)]

pub mod dom;
mod error_handling;
pub mod reactivity;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
mod type_macros;
pub mod window;

use std::cell::RefCell;

use dom::Document;

/// Id of the element `mount` creates and replaces with the root component.
pub const MOUNT_POINT: &str = "app";

thread_local! {
    /// The document every component of this thread renders into.
    static DOCUMENT: RefCell<Document> = RefCell::new(Document::new());
}

/// Run `func` with mutable access to the thread's document.
///
/// The borrow only lasts for the call, so `func` must not dispatch events or run component
/// handlers.
///
/// # Panics
/// If called re-entrantly from inside another `with_document` call.
pub fn with_document<R>(func: impl FnOnce(&mut Document) -> R) -> R {
    DOCUMENT.with(|document| func(&mut document.borrow_mut()))
}

/// Replace the thread's document with a fresh one.
///
/// The old document is dropped outside of the borrow, so components it kept alive can not
/// observe a half torn down tree.
pub fn reset_document() {
    let old = DOCUMENT.with(|document| document.replace(Document::new()));
    drop(old);
}

/// Commonly used types and traits.
pub mod prelude {
    pub use super::dom::events::{self, DomEvent};
    pub use super::dom::{Element, EventHandler, html_elements as e};
    pub use super::reactivity::component::{Component, SubComponent};
    pub use super::reactivity::signal::Signal;
    pub use super::reactivity::state::{Ctx, State};
    pub use super::window;
}

pub use dom::{Element, NodeId};
pub use reactivity::component::{
    Component,
    RenderResult,
    SubComponent,
    mount,
    mount_at,
    mount_point,
    render_component,
};
pub use reactivity::signal::Signal;
pub use reactivity::state::{Ctx, State};
