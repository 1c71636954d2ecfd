//! The "Responding to Events" lesson page.
//!
//! Every component demonstrates one part of event handling: handler props, bubbling,
//! `stop_propagation`, `prevent_default`, and state changes re-rendering the page.
//!
//! ```
//! respond::mount(respond_lesson::App);
//! let html = respond::with_document(|document| document.inner_html(document.body()));
//! assert!(html.contains("Clicked 0 times"));
//! ```
#![forbid(unsafe_code)]

pub mod components;
pub mod session;

pub use components::app::App;

/// Ids of the elements a user can interact with.
pub mod ids {
    /// The toolbar container
    pub const TOOLBAR: &str = "toolbar";
    /// The toolbar "Play" button
    pub const TOOLBAR_PLAY: &str = "toolbar-play";
    /// The toolbar "Upload" button
    pub const TOOLBAR_UPLOAD: &str = "toolbar-upload";
    /// The tip paragraph inside the toolbar, outside the buttons
    pub const TOOLBAR_TIP: &str = "toolbar-tip";
    /// The gallery card
    pub const GALLERY: &str = "gallery";
    /// The gallery image
    pub const GALLERY_IMAGE: &str = "gallery-image";
    /// The "Previous" gallery button
    pub const GALLERY_PREVIOUS: &str = "gallery-prev";
    /// The "Next" gallery button
    pub const GALLERY_NEXT: &str = "gallery-next";
    /// The button showing a message from props
    pub const ALERT_BUTTON: &str = "alert-button";
    /// The click counter
    pub const COUNTER: &str = "counter";
    /// The signup form
    pub const SIGNUP: &str = "signup";
    /// The name field of the signup form
    pub const SIGNUP_NAME: &str = "signup-name";
    /// The submit button of the signup form
    pub const SIGNUP_SEND: &str = "signup-send";

    /// Every interactive id, in page order
    pub const ALL: [&str; 13] = [
        TOOLBAR,
        TOOLBAR_PLAY,
        TOOLBAR_UPLOAD,
        TOOLBAR_TIP,
        GALLERY,
        GALLERY_IMAGE,
        GALLERY_PREVIOUS,
        GALLERY_NEXT,
        ALERT_BUTTON,
        COUNTER,
        SIGNUP,
        SIGNUP_NAME,
        SIGNUP_SEND,
    ];
}
