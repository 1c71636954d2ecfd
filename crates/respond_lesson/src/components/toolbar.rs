//! Handlers passed down as props, and a container that hears clicks its children let through.

use respond::prelude::*;

use super::button::button;
use crate::ids;

/// Shown by the container when a click bubbles up to it
pub const TOOLBAR_CLICKED: &str = "Toolbar clicked! (bubbling example)";
/// Shown by the "Play" button
pub const PLAYING: &str = "🎵 Playing!";
/// Shown by the "Upload" button
pub const UPLOADING: &str = "⬆️ Uploading!";

/// Handler for the "Play" button
fn handle_play_click<C: State>(_ctx: &mut Ctx<C>, _event: &mut DomEvent) {
    window::alert(PLAYING);
}

/// Handler for the "Upload" button
fn handle_upload_click<C: State>(_ctx: &mut Ctx<C>, _event: &mut DomEvent) {
    window::alert(UPLOADING);
}

/// A card with two buttons, the card itself alerts on every click that reaches it.
pub fn toolbar<C: State>() -> impl Element<C> {
    e::div()
        .class("toolbar card")
        .id(ids::TOOLBAR)
        .child(e::h3().text("🎛 Toolbar"))
        .child(
            e::div()
                .class("row gap")
                .child(button(Some(handle_play_click::<C>), "Play").id(ids::TOOLBAR_PLAY))
                .child(button(Some(handle_upload_click::<C>), "Upload").id(ids::TOOLBAR_UPLOAD)),
        )
        .child(
            e::p()
                .class("muted")
                .id(ids::TOOLBAR_TIP)
                .text(
                    "Tip: clicking the area outside the buttons will trigger the \"Toolbar \
                     clicked\" alert due to bubbling. The buttons themselves call \
                     stopPropagation.",
                ),
        )
        .on::<events::Click>(|_ctx, _event| window::alert(TOOLBAR_CLICKED))
}
