//! Interaction Arrays
//!
//! Which components take focus, and which one the pointer is over or
//! pressing. The mouse module writes the pointer flags; styles read them
//! through getters so a hover or press repaints only that component.

slot_arrays! {
    FOCUSABLE: bool = false => get_focusable, set_focusable;
    HOVERED: bool = false => get_hovered, set_hovered;
    PRESSED: bool = false => get_pressed, set_pressed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_signals::derived;

    #[test]
    fn test_defaults() {
        reset();
        ensure_capacity(4);

        assert!(!get_focusable(4));
        assert!(!get_hovered(4));
        assert!(!get_pressed(4));
    }

    #[test]
    fn test_pressed_flag_is_tracked() {
        reset();
        ensure_capacity(0);

        let pressed = derived(|| get_pressed(0));
        assert!(!pressed.get());

        set_pressed(0, true);
        assert!(pressed.get());

        clear_at_index(0);
        assert!(!pressed.get());
    }
}
