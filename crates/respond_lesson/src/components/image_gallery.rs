//! A gallery cycling through a fixed list of images.

use respond::prelude::*;

use crate::ids;

/// The images shown by the gallery, in order
pub const IMAGES: [&str; 3] = [
    "https://picsum.photos/id/237/600/375",
    "https://picsum.photos/id/238/600/375",
    "https://picsum.photos/id/239/600/375",
];

/// The index after `index` in a list of `len` items, wrapping to the start.
///
/// A empty list has no valid index, `0` is returned.
#[must_use]
pub fn next_index(index: usize, len: usize) -> usize {
    index
        .checked_rem(len)
        .and_then(|index| index.checked_add(1))
        .and_then(|next| next.checked_rem(len))
        .unwrap_or(0)
}

/// The index before `index` in a list of `len` items, wrapping to the end.
///
/// A empty list has no valid index, `0` is returned.
#[must_use]
pub fn previous_index(index: usize, len: usize) -> usize {
    index
        .checked_rem(len)
        .map(|index| index.checked_sub(1).unwrap_or(len.saturating_sub(1)))
        .unwrap_or(0)
}

/// Url of the image at `index`
fn image_at(index: usize) -> &'static str {
    IMAGES.get(index).copied().unwrap_or_default()
}

/// Shows one image at a time with Previous and Next controls.
#[derive(Default)]
pub struct ImageGallery {
    /// Index into `IMAGES` of the image on screen
    pub current_image_index: Signal<usize>,
}

impl State for ImageGallery {}

impl ImageGallery {
    /// Advance to the next image
    fn handle_next_click(ctx: &mut Ctx<Self>, _event: &mut DomEvent) {
        let next = next_index(*ctx.current_image_index, IMAGES.len());
        *ctx.current_image_index = next;
    }

    /// Go back to the previous image
    fn handle_prev_click(ctx: &mut Ctx<Self>, _event: &mut DomEvent) {
        let previous = previous_index(*ctx.current_image_index, IMAGES.len());
        *ctx.current_image_index = previous;
    }
}

impl Component for ImageGallery {
    fn render() -> impl Element<Self> {
        e::div()
            .class("card")
            .id(ids::GALLERY)
            .child(e::h3().text("🖼 Image Gallery"))
            .child(
                e::img()
                    .class("image")
                    .id(ids::GALLERY_IMAGE)
                    .src(|ctx: &Ctx<Self>| image_at(*ctx.current_image_index))
                    .alt("Gallery"),
            )
            .child(
                e::div()
                    .class("row gap center")
                    .child(
                        e::button()
                            .class("btn")
                            .id(ids::GALLERY_PREVIOUS)
                            .text("◀️ Previous")
                            .on::<events::Click>(Self::handle_prev_click),
                    )
                    .child(
                        e::button()
                            .class("btn")
                            .id(ids::GALLERY_NEXT)
                            .text("Next ▶️")
                            .on::<events::Click>(Self::handle_next_click),
                    ),
            )
    }
}
