//! Event types, the event object and the bubbling dispatcher.
//!
//! Dispatch follows the browser model without a capture phase: listeners on the target run
//! first, then listeners on each ancestor up to `<body>`. After every node the dispatcher checks
//! whether a listener halted propagation.

use crate::dom::NodeId;
use crate::reactivity::state::{Ctx, State};
use crate::{window, with_document};

/// Static information about a kind of event.
pub trait Event: 'static {
    /// The name listeners are registered under
    const EVENT_NAME: &str;
    /// Does the event travel up to ancestors of the target
    const BUBBLES: bool = true;
    /// Can listeners suppress the default action
    const CANCELABLE: bool = true;
}

/// Utility trait for use in stateless components
///
/// When defining a stateless component it is much easier to use `impl EventHandler<C, E>` than
/// writing out the whole function trait yourself.
///
/// ```
/// # use respond::prelude::*;
/// fn my_button<C: State>(click: impl EventHandler<C, events::Click>) -> impl Element<C> {
///     e::button().on::<events::Click>(click.func())
/// }
/// ```
pub trait EventHandler<C: State, E: Event> {
    /// Return self, but constrained to the expected type
    fn func(self) -> impl Fn(&mut Ctx<C>, &mut DomEvent) + 'static;
}
impl<C: State, E: Event, F: Fn(&mut Ctx<C>, &mut DomEvent) + 'static> EventHandler<C, E> for F {
    fn func(self) -> impl Fn(&mut Ctx<C>, &mut DomEvent) + 'static {
        self
    }
}

/// Implement and define a `Event`
macro_rules! impl_event {
    ($ty:ident => $name:literal) => {
        impl_event!($ty => $name, bubbles: true, cancelable: true);
    };
    ($ty:ident => $name:literal, bubbles: $bubbles:literal, cancelable: $cancelable:literal) => {
        #[doc = $name]
        pub struct $ty;

        impl Event for $ty {
            const EVENT_NAME: &str = $name;
            const BUBBLES: bool = $bubbles;
            const CANCELABLE: bool = $cancelable;
        }
    };
}

impl_event!(Blur => "blur", bubbles: false, cancelable: false);
impl_event!(Change => "change", bubbles: true, cancelable: false);
impl_event!(Click => "click");
impl_event!(ContextMenu => "contextmenu");
impl_event!(DoubleClick => "dblclick");
impl_event!(Focus => "focus", bubbles: false, cancelable: false);
impl_event!(FocusIn => "focusin", bubbles: true, cancelable: false);
impl_event!(FocusOut => "focusout", bubbles: true, cancelable: false);
impl_event!(Input => "input", bubbles: true, cancelable: false);
impl_event!(KeyDown => "keydown");
impl_event!(KeyUp => "keyup");
impl_event!(MouseDown => "mousedown");
impl_event!(MouseEnter => "mouseenter", bubbles: false, cancelable: false);
impl_event!(MouseLeave => "mouseleave", bubbles: false, cancelable: false);
impl_event!(MouseUp => "mouseup");
impl_event!(Reset => "reset");
impl_event!(Submit => "submit");

/// The event object handed to every listener of a single dispatch.
#[derive(Debug, Clone)]
pub struct DomEvent {
    /// Name of the event
    name: &'static str,
    /// Node the event was dispatched at
    target: NodeId,
    /// Node whose listeners are currently running
    current_target: NodeId,
    /// Does the event bubble
    bubbles: bool,
    /// Can the default action be suppressed
    cancelable: bool,
    /// Set by `stop_propagation`
    propagation_stopped: bool,
    /// Set by `stop_immediate_propagation`
    immediate_propagation_stopped: bool,
    /// Set by `prevent_default` on cancelable events
    default_prevented: bool,
}

impl DomEvent {
    /// Create a event of kind `E` targeting `target`
    #[must_use]
    pub fn new<E: Event>(target: NodeId) -> Self {
        Self {
            name: E::EVENT_NAME,
            target,
            current_target: target,
            bubbles: E::BUBBLES,
            cancelable: E::CANCELABLE,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// Name of the event, for example `"click"`
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The node the event originated at
    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listener is running
    #[must_use]
    pub fn current_target(&self) -> NodeId {
        self.current_target
    }

    /// Does the event bubble to ancestors
    #[must_use]
    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    /// Can the default action be prevented
    #[must_use]
    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    /// Do not run listeners of any further ancestor.
    ///
    /// Remaining listeners on the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Do not run any further listener, not even on the current node.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    /// Suppress the default action of the event.
    ///
    /// Has no effect on events that are not cancelable.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        } else {
            log::debug!("`prevent_default` called on non-cancelable `{}`", self.name);
        }
    }

    /// Has propagation been halted
    #[must_use]
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Has the default action been suppressed
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Dispatch a event of kind `E` at `target` and return the finished event object.
///
/// Listeners run on the target and then on every ancestor, stopping after the first node at
/// which propagation was halted. Non bubbling events only visit the target.
pub fn dispatch<E: Event>(target: NodeId) -> DomEvent {
    dispatch_event(DomEvent::new::<E>(target))
}

/// Dispatch a pre built event object.
pub fn dispatch_event(mut event: DomEvent) -> DomEvent {
    let path = with_document(|document| document.propagation_path(event.target));
    log::trace!(
        "Dispatching `{}` at {:?} (path length {})",
        event.name,
        event.target,
        path.len()
    );

    for node in path {
        event.current_target = node;
        let listeners = with_document(|document| document.listeners(node, event.name));
        for listener in listeners {
            listener(&mut event);
            if event.immediate_propagation_stopped {
                break;
            }
        }

        if event.propagation_stopped {
            log::trace!("Propagation of `{}` halted at {node:?}", event.name);
            break;
        }
        if !event.bubbles {
            break;
        }
    }

    event.current_target = event.target;
    event
}

/// What a single activation (`click` or `submit`) ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Activation {
    /// The event ran and nothing else happened
    Handled,
    /// A listener suppressed the default action
    DefaultPrevented,
    /// The default action submitted the given form
    Submitted(NodeId),
    /// The default action navigated away from the page
    Navigated,
    /// `submit` was called on something that is not a `<form>`, nothing was dispatched
    NotAForm,
}

/// Click a element the way a user would.
///
/// Dispatches `click`, and if no listener prevented the default, runs the activation behavior of
/// the element: a `<button>` with no `type` or `type="submit"` submits its form.
pub fn click(target: NodeId) -> Activation {
    let event = dispatch::<Click>(target);
    if event.default_prevented() {
        return Activation::DefaultPrevented;
    }

    let form = with_document(|document| {
        let button = document.closest(target, "button")?;
        let kind = document.attribute(button, "type").unwrap_or("submit");
        if kind.eq_ignore_ascii_case("submit") {
            document.closest(button, "form")
        } else {
            None
        }
    });

    match form {
        Some(form) => {
            log::trace!("Click on submit button activates form {form:?}");
            match submit(form) {
                Activation::Navigated => Activation::Navigated,
                _ => Activation::Submitted(form),
            }
        }
        None => Activation::Handled,
    }
}

/// Submit a form, dispatching `submit` and running the default navigation unless prevented.
///
/// Only `<form>` elements can be submitted, anything else returns [`Activation::NotAForm`].
pub fn submit(form: NodeId) -> Activation {
    if with_document(|document| document.tag(form)) != Some("form") {
        log::debug!("Refusing to submit {form:?}, it is not a form");
        return Activation::NotAForm;
    }

    let event = dispatch::<Submit>(form);
    if event.default_prevented() {
        return Activation::DefaultPrevented;
    }

    let action = with_document(|document| {
        document
            .attribute(form, "action")
            .map_or_else(|| String::from("#"), ToOwned::to_owned)
    });
    log::warn!("Form {form:?} submitted without `prevent_default`, page reloads");
    window::navigate(action);
    Activation::Navigated
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::document::ListenerFn;
    use crate::test_utils;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn listen(node: NodeId, event: &'static str, log: &Log, entry: &'static str) {
        let log = Rc::clone(log);
        let listener: ListenerFn = Rc::new(move |_| log.borrow_mut().push(entry));
        with_document(|document| document.add_listener(node, event, listener));
    }

    fn listen_with(node: NodeId, event: &'static str, func: impl Fn(&mut DomEvent) + 'static) {
        with_document(|document| document.add_listener(node, event, Rc::new(func)));
    }

    /// body > outer > inner > leaf
    fn tree() -> (NodeId, NodeId, NodeId) {
        test_utils::setup();
        with_document(|document| {
            let outer = document.create_element("div");
            let inner = document.create_element("div");
            let leaf = document.create_element("span");
            document.append_child(document.body(), outer);
            document.append_child(outer, inner);
            document.append_child(inner, leaf);
            (outer, inner, leaf)
        })
    }

    #[test]
    fn bubbles_from_target_to_ancestors() {
        let (outer, inner, leaf) = tree();
        let log = Log::default();
        listen(outer, "click", &log, "outer");
        listen(inner, "click", &log, "inner");
        listen(leaf, "click", &log, "leaf");

        let event = dispatch::<Click>(leaf);

        assert_eq!(*log.borrow(), ["leaf", "inner", "outer"]);
        assert!(!event.propagation_stopped());
        assert_eq!(event.target(), leaf);
    }

    #[test]
    fn stop_propagation_skips_ancestors_but_not_siblings() {
        let (outer, inner, leaf) = tree();
        let log = Log::default();
        listen(outer, "click", &log, "outer");
        listen_with(inner, "click", DomEvent::stop_propagation);
        listen(inner, "click", &log, "inner second");
        listen(leaf, "click", &log, "leaf");

        let event = dispatch::<Click>(leaf);

        assert_eq!(*log.borrow(), ["leaf", "inner second"]);
        assert!(event.propagation_stopped());
    }

    #[test]
    fn stop_immediate_propagation_skips_remaining_listeners() {
        let (outer, inner, _) = tree();
        let log = Log::default();
        listen(outer, "click", &log, "outer");
        listen_with(inner, "click", DomEvent::stop_immediate_propagation);
        listen(inner, "click", &log, "inner second");

        let _ = dispatch::<Click>(inner);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn current_target_follows_the_path() {
        let (outer, _, leaf) = tree();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for node in [leaf, outer] {
            let seen = Rc::clone(&seen);
            listen_with(node, "click", move |event| {
                seen.borrow_mut().push((event.target(), event.current_target()));
            });
        }

        let _ = dispatch::<Click>(leaf);

        assert_eq!(*seen.borrow(), [(leaf, leaf), (leaf, outer)]);
    }

    #[test]
    fn non_bubbling_events_stay_on_target() {
        let (outer, inner, _) = tree();
        let log = Log::default();
        listen(outer, "focus", &log, "outer");
        listen(inner, "focus", &log, "inner");

        let _ = dispatch::<Focus>(inner);

        assert_eq!(*log.borrow(), ["inner"]);
    }

    #[test]
    fn prevent_default_ignored_when_not_cancelable() {
        let (_, inner, _) = tree();
        listen_with(inner, "input", DomEvent::prevent_default);
        listen_with(inner, "click", DomEvent::prevent_default);

        assert!(!dispatch::<Input>(inner).default_prevented());
        assert!(dispatch::<Click>(inner).default_prevented());
    }

    fn form_with_button(kind: Option<&'static str>) -> (NodeId, NodeId) {
        test_utils::setup();
        with_document(|document| {
            let form = document.create_element("form");
            let button = document.create_element("button");
            let label = document.create_text(Cow::Borrowed("Send"));
            if let Some(kind) = kind {
                document.set_attribute(button, "type", Cow::Borrowed(kind));
            }
            document.append_child(button, label);
            document.append_child(form, button);
            document.append_child(document.body(), form);
            (form, label)
        })
    }

    #[test]
    fn submit_without_prevention_navigates() {
        let (form, label) = form_with_button(None);

        assert_eq!(click(label), Activation::Navigated);
        assert_eq!(test_utils::navigations(), ["#"]);
        assert_eq!(submit(form), Activation::Navigated);
        assert_eq!(test_utils::navigations(), ["#"]);
    }

    #[test]
    fn prevented_submit_does_not_navigate() {
        let (form, label) = form_with_button(Some("submit"));
        listen_with(form, "submit", DomEvent::prevent_default);

        assert_eq!(click(label), Activation::Submitted(form));
        assert_eq!(submit(form), Activation::DefaultPrevented);
        assert!(test_utils::navigations().is_empty());
    }

    #[test]
    fn only_forms_can_be_submitted() {
        let (form, label) = form_with_button(None);
        let button = with_document(|document| document.parent(label)).unwrap_or(form);
        let log = Log::default();
        listen(button, "submit", &log, "button");
        listen(form, "submit", &log, "form");

        assert_eq!(submit(button), Activation::NotAForm);
        assert_eq!(submit(label), Activation::NotAForm);
        assert!(log.borrow().is_empty());
        assert!(test_utils::navigations().is_empty());
    }

    #[test]
    fn plain_buttons_do_not_submit() {
        let (form, label) = form_with_button(Some("button"));
        let log = Log::default();
        listen(form, "submit", &log, "submitted");

        assert_eq!(click(label), Activation::Handled);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn prevented_click_skips_activation() {
        let (form, label) = form_with_button(None);
        let log = Log::default();
        listen(form, "submit", &log, "submitted");
        let button = with_document(|document| document.parent(label)).unwrap_or(form);
        listen_with(button, "click", DomEvent::prevent_default);

        assert_eq!(click(label), Activation::DefaultPrevented);
        assert!(log.borrow().is_empty());
    }
}
