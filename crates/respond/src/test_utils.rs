//! utilities for writing tests against the thread's document
#![expect(clippy::expect_used, clippy::panic, reason = "tests only")]

use std::cell::{Cell, RefCell};

use crate::dom::events::{self, Activation};
use crate::dom::{Document, NodeId};
use crate::reactivity::component::{Component, render_component};
use crate::reactivity::{KeepAlive, statics};
use crate::window::{self, RecordedAlerts};
use crate::{reset_document, with_document};

/// The parent of the testing env
const MOUNT_PARENT: &str = "__TESTING_PARENT";
/// The id you should mount your component at
/// This is auto created and cleaned up by `setup`
pub const MOUNT_POINT: &str = "__TESTING_MOUNT_POINT";

thread_local! {
    static CURRENT_COMP: Cell<KeepAlive> = Cell::new(Box::new(()));
    static ALERTS: RefCell<RecordedAlerts> = RefCell::new(RecordedAlerts::new());
}

/// Has a logger be initlized?
static LOGGER_ACTIVE: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// A `log` logger that prints every level to stderr, where the test harness captures it.
struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn flush(&self) {}
    fn log(&self, record: &log::Record) {
        eprintln!(
            "{}({}): {}",
            record.level(),
            record.module_path().unwrap_or_default(),
            record.args()
        );
    }
}

/// Install the test logger once per process
fn init_logger() {
    let was_logger_active = LOGGER_ACTIVE.fetch_or(true, std::sync::atomic::Ordering::Relaxed);
    if !was_logger_active {
        // Another logger may already be installed by the test binary
        if log::set_logger(&SimpleLogger).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    }
}

/// Reset the document and the window, then create `MOUNT_POINT` as a valid mount location.
///
/// The previously mounted test component is dropped.
pub fn setup() {
    init_logger();
    statics::clear();

    let old = CURRENT_COMP.with(|cell| cell.replace(Box::new(())));
    reset_document();
    drop(old);

    with_document(|document| {
        let parent = document.create_element("div");
        document.set_attribute(parent, "id", MOUNT_PARENT.into());
        let mount = document.create_element("div");
        document.set_attribute(mount, "id", MOUNT_POINT.into());

        document.append_child(parent, mount);
        let body = document.body();
        document.append_child(body, parent);
    });

    let alerts = RecordedAlerts::new();
    drop(window::set_alert_surface(alerts.clone()));
    ALERTS.with(|cell| *cell.borrow_mut() = alerts);
    let _ = window::take_navigations();

    log::trace!("Setup test target");
}

/// Mount a component at the test location (creating/resetting it if needed)
/// # Panics
/// If the mount point is missing
pub fn mount_test<C: Component>(component: C) {
    setup();

    log::debug!("Mounting test component {}", std::any::type_name::<C>());
    let result = render_component(component, MOUNT_POINT).expect("Failed to mount");
    CURRENT_COMP.with(|cell| cell.set(Box::new(result)));
}

/// Get a node based on id
///
/// # Panics
/// If the element isnt found
#[must_use]
pub fn get(id: &str) -> NodeId {
    with_document(|document| document.get_element_by_id(id))
        .unwrap_or_else(|| panic!("Id {id} not found"))
}

/// Click the element with the given id, running its activation behavior.
pub fn click(id: &str) {
    let activation = click_outcome(id);
    log::trace!("Click on #{id}: {activation:?}");
}

/// Click the element with the given id and report what the click did.
pub fn click_outcome(id: &str) -> Activation {
    events::click(get(id))
}

/// Submit the form with the given id and report what happened.
pub fn submit(id: &str) -> Activation {
    events::submit(get(id))
}

/// The text content of the element
#[must_use]
pub fn text(id: &str) -> String {
    let node = get(id);
    with_document(|document| document.text_content(node))
}

/// A attribute of the element, `None` if it is not set
#[must_use]
pub fn attr(id: &str, name: &str) -> Option<String> {
    let node = get(id);
    with_document(|document| document.attribute(node, name).map(ToOwned::to_owned))
}

/// Does the element carry the class
#[must_use]
pub fn has_class(id: &str, class: &str) -> bool {
    let node = get(id);
    with_document(|document| document.has_class(node, class))
}

/// The serialized html of the element, including itself
#[must_use]
pub fn html(id: &str) -> String {
    let node = get(id);
    with_document(|document| document.outer_html(node))
}

/// Remove and return the alerts shown since the last call or `setup`
#[must_use]
pub fn take_alerts() -> Vec<String> {
    ALERTS.with(|cell| cell.borrow().take())
}

/// Remove and return the navigations requested since the last call or `setup`
#[must_use]
pub fn navigations() -> Vec<String> {
    window::take_navigations()
}

/// Number of nodes in the document, attached or not
#[must_use]
pub fn node_count() -> usize {
    with_document(|document: &mut Document| document.len())
}
