use respond::prelude::*;
use respond::test_utils;

#[derive(Default)]
struct Profile {
    name: Signal<&'static str>,
    admin: Signal<bool>,
    renders: Signal<u8>,
}
impl State for Profile {}

impl Component for Profile {
    fn render() -> impl Element<Self> {
        e::div()
            .id("profile")
            .attr("data-admin", |ctx: &Ctx<Self>| *ctx.admin)
            .child(e::span().id("name").text(|ctx: &Ctx<Self>| *ctx.name))
            .child(|ctx: &Ctx<Self>| {
                (*ctx.admin).then(|| e::strong().id("badge").text("admin"))
            })
            .child(
                e::button()
                    .id("promote")
                    .on::<events::Click>(|ctx: &mut Ctx<Self>, _| *ctx.admin = true),
            )
            .child(
                e::button()
                    .id("rename")
                    .on::<events::Click>(|ctx: &mut Ctx<Self>, _| *ctx.name = "Ferris"),
            )
    }
}

#[test]
fn text_updates_in_place() {
    test_utils::mount_test(Profile {
        name: Signal::new("Crab"),
        ..Default::default()
    });
    assert_eq!(test_utils::text("name"), "Crab");

    test_utils::click("rename");

    assert_eq!(test_utils::text("name"), "Ferris");
}

#[test]
fn attributes_and_optional_nodes_follow_state() {
    test_utils::mount_test(Profile::default());
    assert_eq!(test_utils::attr("profile", "data-admin"), None);
    assert!(respond::with_document(|document| document.get_element_by_id("badge")).is_none());

    test_utils::click("promote");

    assert_eq!(test_utils::attr("profile", "data-admin").as_deref(), Some(""));
    assert_eq!(test_utils::text("badge"), "admin");
}

#[test]
fn unrelated_writes_leave_other_hooks_alone() {
    test_utils::mount_test(Profile::default());
    let name = respond::with_document(|document| {
        let span = document.get_element_by_id("name");
        span.and_then(|span| document.children(span).first().copied())
    });

    test_utils::click("promote");

    let after = respond::with_document(|document| {
        let span = document.get_element_by_id("name");
        span.and_then(|span| document.children(span).first().copied())
    });
    assert_eq!(name, after);
}

#[test]
fn handlers_see_the_event() {
    #[derive(Default)]
    struct Probe {
        seen: Signal<Option<&'static str>>,
    }
    impl State for Probe {}
    impl Component for Probe {
        fn render() -> impl Element<Self> {
            e::div()
                .id("probe")
                .text(|ctx: &Ctx<Self>| *ctx.seen)
                .on::<events::DoubleClick>(|ctx: &mut Ctx<Self>, event| {
                    *ctx.seen = Some(event.name());
                })
        }
    }

    test_utils::mount_test(Probe::default());
    assert_eq!(test_utils::text("probe"), "");

    let _ = events::dispatch::<events::DoubleClick>(test_utils::get("probe"));

    assert_eq!(test_utils::text("probe"), "dblclick");
}
