//! A click counter.

use respond::prelude::*;

/// The counter label, `time` is singular only for exactly one click.
#[must_use]
pub fn label(count: u32) -> String {
    let unit = if count == 1 { "time" } else { "times" };
    format!("Clicked {count} {unit}")
}

/// A button counting how often it was clicked.
#[derive(Default)]
pub struct Counter {
    /// Clicks since the component was created, saturating at `u32::MAX`
    pub count: Signal<u32>,
}

impl State for Counter {}

impl Component for Counter {
    fn render() -> impl Element<Self> {
        e::button()
            .class("btn")
            .id(crate::ids::COUNTER)
            .text(|ctx: &Ctx<Self>| label(*ctx.count))
            .on::<events::Click>(|ctx: &mut Ctx<Self>, _| {
                let count = ctx.count.saturating_add(1);
                *ctx.count = count;
            })
    }
}

#[cfg(test)]
mod tests {
    use respond::test_utils;

    use super::*;
    use crate::ids;

    #[test]
    fn pluralizes() {
        assert_eq!(label(0), "Clicked 0 times");
        assert_eq!(label(1), "Clicked 1 time");
        assert_eq!(label(2), "Clicked 2 times");
    }

    #[test]
    fn counts_clicks() {
        test_utils::mount_test(Counter::default());
        assert_eq!(test_utils::text(ids::COUNTER), "Clicked 0 times");

        test_utils::click(ids::COUNTER);
        assert_eq!(test_utils::text(ids::COUNTER), "Clicked 1 time");

        test_utils::click(ids::COUNTER);
        assert_eq!(test_utils::text(ids::COUNTER), "Clicked 2 times");
    }

    #[test]
    fn saturates_at_the_maximum() {
        test_utils::mount_test(Counter {
            count: Signal::new(u32::MAX),
        });

        test_utils::click(ids::COUNTER);

        assert_eq!(
            test_utils::text(ids::COUNTER),
            format!("Clicked {} times", u32::MAX)
        );
    }

    #[test]
    fn the_button_element_is_kept() {
        test_utils::mount_test(Counter::default());
        let button = test_utils::get(ids::COUNTER);
        let nodes = test_utils::node_count();

        for _ in 0..5 {
            test_utils::click(ids::COUNTER);
        }

        assert_eq!(test_utils::get(ids::COUNTER), button);
        assert_eq!(test_utils::node_count(), nodes);
    }
}
