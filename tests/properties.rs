//! Property tests for the greeting and counter.
//!
//! Run with: cargo test --test properties

use proptest::prelude::*;

use spark_hello::components::{counter_label, greeting, greeting_text, Counter, GreetingProps};
use spark_hello::engine::reset_registry;
use spark_hello::pipeline::render_to_string;

proptest! {
    #[test]
    fn greeting_contains_name(name in any::<String>()) {
        let text = greeting_text(&GreetingProps::new(name.clone()));
        let expected = format!("Hello, {}!", name);
        prop_assert!(text.contains(&expected));
    }

    #[test]
    fn greeting_is_deterministic(name in "\\PC{0,24}") {
        let props = GreetingProps::new(name);
        prop_assert_eq!(greeting_text(&props), greeting_text(&props));

        reset_registry();
        let first = render_to_string(|| greeting(props.clone()), 120, 4);
        let second = render_to_string(|| greeting(props.clone()), 120, 4);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn greeting_renders_printable_names(name in "[a-zA-Z][a-zA-Z ]{0,20}[a-zA-Z]") {
        reset_registry();
        let out = render_to_string(|| greeting(GreetingProps::new(name.clone())), 80, 3);
        prop_assert_eq!(out, format!("Hello, {}!", name));
    }

    #[test]
    fn greeting_frame_keeps_every_printable_char(name in "\\PC{0,20}") {
        reset_registry();
        let out = render_to_string(|| greeting(GreetingProps::new(name.clone())), 120, 4);
        prop_assert!(out.contains(&format!("Hello, {}!", name)));
    }

    #[test]
    fn accented_names_render_intact(name in "[a-z]{1,8}[\\u{300}-\\u{36f}]{1,2}[a-z]{0,8}") {
        reset_registry();
        let out = render_to_string(|| greeting(GreetingProps::new(name.clone())), 80, 3);
        prop_assert_eq!(out, format!("Hello, {}!", name));
    }

    #[test]
    fn n_increments_show_n(n in 0u64..200) {
        let counter = Counter::new();
        for _ in 0..n {
            counter.increment();
        }
        prop_assert_eq!(counter.count(), n);
        prop_assert_eq!(counter.label(), counter_label(n));

        reset_registry();
        let out = render_to_string(|| counter.render(), 40, 3);
        prop_assert!(out.contains(&format!("Count: {}", n)));
    }
}
