use proptest::prelude::*;
use respond::test_utils;
use respond_lesson::components::counter::{Counter, label};
use respond_lesson::components::image_gallery::{IMAGES, ImageGallery, next_index, previous_index};
use respond_lesson::ids;

fn current_image() -> Option<String> {
    test_utils::attr(ids::GALLERY_IMAGE, "src")
}

proptest! {
    #[test]
    fn next_then_previous_is_identity(index in 0..64_usize, len in 1..64_usize) {
        let index = index % len;
        prop_assert_eq!(previous_index(next_index(index, len), len), index);
        prop_assert_eq!(next_index(previous_index(index, len), len), index);
    }

    #[test]
    fn steps_stay_in_range(index in any::<usize>(), len in 1..64_usize) {
        prop_assert!(next_index(index, len) < len);
        prop_assert!(previous_index(index, len) < len);
    }

    #[test]
    fn n_nexts_land_on_n_mod_3(presses in 0..12_usize) {
        test_utils::mount_test(ImageGallery::default());

        for _ in 0..presses {
            test_utils::click(ids::GALLERY_NEXT);
        }

        let image = current_image();
        prop_assert_eq!(image.as_deref(), IMAGES.get(presses % 3).copied());
    }

    #[test]
    fn n_previouses_land_on_3_minus_n_mod_3(presses in 0..12_usize) {
        test_utils::mount_test(ImageGallery::default());

        for _ in 0..presses {
            test_utils::click(ids::GALLERY_PREVIOUS);
        }

        let expected = (3 - presses % 3) % 3;
        let image = current_image();
        prop_assert_eq!(image.as_deref(), IMAGES.get(expected).copied());
    }

    #[test]
    fn counter_text_matches_clicks(presses in 0..20_u32) {
        test_utils::mount_test(Counter::default());

        for _ in 0..presses {
            test_utils::click(ids::COUNTER);
        }

        prop_assert_eq!(test_utils::text(ids::COUNTER), label(presses));
    }
}
