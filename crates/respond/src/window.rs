//! The parts of the browser window components can reach: blocking alerts and page navigation.
//!
//! There is no real window, so alerts go to a replaceable [`AlertSurface`] and navigations are
//! recorded for the embedder to act on.

use std::cell::RefCell;
use std::rc::Rc;

/// Something that can show a alert to the user.
pub trait AlertSurface {
    /// Show `message`, returning once the user has dismissed it.
    fn show(&self, message: &str);
}

/// The surface used until another one is installed, it logs every alert.
struct LogSurface;

impl AlertSurface for LogSurface {
    fn show(&self, message: &str) {
        log::info!("alert: {message}");
    }
}

/// Collects alerts in memory, clones share the same list.
#[derive(Clone, Default)]
pub struct RecordedAlerts {
    /// Messages in the order they were shown
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordedAlerts {
    /// Create a empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every alert shown so far
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }
}

impl AlertSurface for RecordedAlerts {
    fn show(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

thread_local! {
    /// Where `alert` sends its messages
    static ALERT_SURFACE: RefCell<Rc<dyn AlertSurface>> = RefCell::new(Rc::new(LogSurface));
    /// Navigations requested since the last `take_navigations`
    static NAVIGATIONS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Show a alert, like `window.alert` does.
pub fn alert(message: &str) {
    log::debug!("Showing alert {message:?}");
    // Cloned out so a surface may itself call `set_alert_surface`
    let surface = ALERT_SURFACE.with(|surface| Rc::clone(&surface.borrow()));
    surface.show(message);
}

/// Install a new alert surface for this thread, returning the previous one.
pub fn set_alert_surface(surface: impl AlertSurface + 'static) -> Rc<dyn AlertSurface> {
    ALERT_SURFACE.with(|current| current.replace(Rc::new(surface)))
}

/// Request that the page navigates to `url`, reloading it.
pub fn navigate(url: impl Into<String>) {
    let url = url.into();
    log::info!("Navigating to {url:?}");
    NAVIGATIONS.with(|navigations| navigations.borrow_mut().push(url));
}

/// Remove and return the navigations requested so far, oldest first.
#[must_use]
pub fn take_navigations() -> Vec<String> {
    NAVIGATIONS.with(|navigations| std::mem::take(&mut *navigations.borrow_mut()))
}
