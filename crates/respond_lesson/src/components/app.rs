//! The whole lesson page.

use respond::prelude::*;

use super::alert_button::alert_button;
use super::counter::Counter;
use super::image_gallery::ImageGallery;
use super::signup::signup;
use super::toolbar::toolbar;
use crate::ids;

/// The message the alert button gets from its props
pub const PROP_MESSAGE: &str = "Custom message from props";

/// Static composition of every lesson component.
pub struct App;

impl State for App {}

impl Component for App {
    fn render() -> impl Element<Self> {
        e::div()
            .class("container")
            .child(
                e::header()
                    .child(e::h1().text("⚛️ React Lesson 10 — Responding to Events"))
                    .child(e::p().class("muted").text(
                        "Explore state, event handlers, bubbling, stopPropagation, \
                         preventDefault, and parent-to-child callbacks.",
                    )),
            )
            .child(toolbar())
            .child(SubComponent::new(ImageGallery::default()))
            .child(
                e::section()
                    .class("grid two")
                    .child(
                        e::div()
                            .class("card")
                            .child(e::h3().text("🔔 Alert Button (props in handlers)"))
                            .child(alert_button(PROP_MESSAGE).id(ids::ALERT_BUTTON)),
                    )
                    .child(
                        e::div()
                            .class("card")
                            .child(e::h3().text("🔢 Counter (state + side effects)"))
                            .child(SubComponent::new(Counter::default())),
                    ),
            )
            .child(signup())
            .child(
                e::footer().class("muted small").child(
                    e::p()
                        .text("Want to experiment? Open ")
                        .child(e::code().text("src/components"))
                        .text(", edit components or handlers, and run ")
                        .child(e::code().text("respond-lesson run"))
                        .text(" to try them out."),
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use respond::test_utils;

    use super::*;

    #[test]
    fn every_interactive_id_is_rendered_once() {
        test_utils::mount_test(App);

        let html = test_utils::html(ids::TOOLBAR);
        assert!(html.contains("🎛 Toolbar"));
        for id in ids::ALL {
            let _ = test_utils::get(id);
            let needle = format!("id=\"{id}\"");
            let page = respond::with_document(|document| document.inner_html(document.body()));
            assert_eq!(page.matches(&needle).count(), 1, "{id}");
        }
    }

    #[test]
    fn sections_are_in_page_order() {
        test_utils::mount_test(App);

        let page = respond::with_document(|document| document.inner_html(document.body()));
        let position = |needle: &str| page.find(needle).unwrap_or(usize::MAX);

        assert!(position("React Lesson 10") < position("🎛 Toolbar"));
        assert!(position("🎛 Toolbar") < position("🖼 Image Gallery"));
        assert!(position("🖼 Image Gallery") < position("Show: Custom message from props"));
        assert!(position("Show: Custom message from props") < position("Clicked 0 times"));
        assert!(position("Clicked 0 times") < position("📮 Signup"));
        assert!(position("📮 Signup") < position("<footer"));
    }

    #[test]
    fn components_keep_independent_state() {
        test_utils::mount_test(App);

        test_utils::click(ids::COUNTER);
        test_utils::click(ids::GALLERY_NEXT);
        test_utils::click(ids::ALERT_BUTTON);

        assert_eq!(test_utils::text(ids::COUNTER), "Clicked 1 time");
        assert_eq!(
            test_utils::attr(ids::GALLERY_IMAGE, "src").as_deref(),
            Some(crate::components::image_gallery::IMAGES[1])
        );
        assert_eq!(test_utils::take_alerts(), [PROP_MESSAGE]);
    }
}
