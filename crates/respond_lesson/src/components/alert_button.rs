//! A button that reads its props inside the handler.

use std::borrow::Cow;

use respond::prelude::*;

/// `<button class="btn">Show: {message}</button>`, alerting `message` when clicked.
pub fn alert_button<C: State>(message: impl Into<Cow<'static, str>>) -> e::HtmlElement<C> {
    let message = message.into();

    e::button()
        .class("btn")
        .text("Show: ")
        .text(message.clone())
        .on::<events::Click>(move |_ctx, _event| window::alert(&message))
}
