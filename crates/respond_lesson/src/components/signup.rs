//! A form that replaces its page reload with a alert.

use respond::prelude::*;

use crate::ids;

/// Shown instead of reloading the page
pub const SUBMITTED: &str = "Form submitted! (preventDefault in action)";

/// Suppress the reload, then confirm the submission
fn handle_submit<C: State>(_ctx: &mut Ctx<C>, event: &mut DomEvent) {
    event.prevent_default();
    window::alert(SUBMITTED);
}

/// A signup form with a name field and a submit button.
///
/// Submitting never navigates away, the entered name is not validated or stored.
pub fn signup<C: State>() -> impl Element<C> {
    e::form()
        .class("card")
        .id(ids::SIGNUP)
        .child(e::h3().text("📮 Signup"))
        .child(
            e::div()
                .class("row gap")
                .child(
                    e::input()
                        .class("input")
                        .id(ids::SIGNUP_NAME)
                        .placeholder("Enter your name"),
                )
                .child(
                    e::button()
                        .class("btn primary")
                        .id(ids::SIGNUP_SEND)
                        .r#type("submit")
                        .text("Send"),
                ),
        )
        .child(
            e::p()
                .class("muted")
                .text("Submitting the form shows an alert instead of reloading the page."),
        )
        .on::<events::Submit>(handle_submit)
}
