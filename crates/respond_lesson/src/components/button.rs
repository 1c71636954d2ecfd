//! A button that keeps its clicks to itself.

use respond::prelude::*;

/// `<button class="btn primary">`, halting propagation of every click before running
/// `on_click`.
///
/// Ancestors never see clicks that start inside the button, whether or not a callback is
/// given.
pub fn button<C, H>(on_click: Option<H>, children: impl Element<C>) -> e::HtmlElement<C>
where
    C: State,
    H: EventHandler<C, events::Click>,
{
    let on_click = on_click.map(<H as EventHandler<C, events::Click>>::func);

    e::button()
        .class("btn primary")
        .child(children)
        .on::<events::Click>(move |ctx: &mut Ctx<C>, event| {
            event.stop_propagation();
            if let Some(on_click) = &on_click {
                on_click(ctx, event);
            }
        })
}

#[cfg(test)]
mod tests {
    use respond::test_utils;

    use super::*;

    #[derive(Default)]
    struct Host {
        outer_clicks: Signal<u8>,
    }
    impl State for Host {}
    impl Component for Host {
        fn render() -> impl Element<Self> {
            e::div()
                .id("outer")
                .child(
                    button(
                        Some(|_ctx: &mut Ctx<Self>, event: &mut DomEvent| {
                            window::alert(if event.propagation_stopped() {
                                "stopped first"
                            } else {
                                "still bubbling"
                            });
                        }),
                        "Play",
                    )
                    .id("with-callback"),
                )
                .child(
                    button(None::<fn(&mut Ctx<Self>, &mut DomEvent)>, "Idle")
                        .id("without-callback"),
                )
                .child(e::span().id("outer-count").text(|ctx: &Ctx<Self>| *ctx.outer_clicks))
                .on::<events::Click>(|ctx: &mut Ctx<Self>, _| *ctx.outer_clicks += 1)
        }
    }

    #[test]
    fn callback_runs_after_propagation_is_stopped() {
        test_utils::mount_test(Host::default());

        test_utils::click("with-callback");

        assert_eq!(test_utils::take_alerts(), ["stopped first"]);
        assert_eq!(test_utils::text("outer-count"), "0");
    }

    #[test]
    fn missing_callback_still_stops_propagation() {
        test_utils::mount_test(Host::default());

        test_utils::click("without-callback");

        assert!(test_utils::take_alerts().is_empty());
        assert_eq!(test_utils::text("outer-count"), "0");
    }

    #[test]
    fn clicks_outside_reach_the_container() {
        test_utils::mount_test(Host::default());

        test_utils::click("outer-count");

        assert_eq!(test_utils::text("outer-count"), "1");
    }

    #[test]
    fn renders_children() {
        test_utils::mount_test(Host::default());

        insta::assert_snapshot!(
            test_utils::html("without-callback"),
            @r#"<button class="btn primary" id="without-callback">Idle</button>"#
        );
    }
}
