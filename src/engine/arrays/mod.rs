//! Parallel Arrays
//!
//! All component state lives in these arrays. Each index corresponds to one
//! component. Primitives write with `set_*` (static value) or `set_*_getter`
//! (signal or closure); deriveds read with `get_*`, which tracks that index
//! only.
//!
//! # Array Groups
//!
//! - **core**: Component type and parent
//! - **layout**: Direction and spacing (read by the taffy bridge)
//! - **visual**: Foreground color
//! - **text**: Text content and attributes
//! - **interaction**: Focus, hover and press flags

/// Declares one group of slot arrays and its per-group housekeeping.
///
/// Each entry reads `NAME: Type = default => get_fn, set_fn[, set_getter_fn];`
/// and expands to a `TrackedSlotArray` plus accessors. Every group also gets
/// `ensure_capacity`, `clear_at_index` and `reset`.
macro_rules! slot_arrays {
    ($(
        $(#[$meta:meta])*
        $array:ident: $ty:ty = $default:expr => $get:ident, $set:ident $(, $set_getter:ident)?;
    )*) => {
        thread_local! {
            $(
                $(#[$meta])*
                static $array: spark_signals::TrackedSlotArray<$ty> =
                    spark_signals::TrackedSlotArray::new(Some($default));
            )*
        }

        /// Grow every array in this group so `index` is addressable.
        pub fn ensure_capacity(index: usize) {
            $( $array.with(|arr| { let _ = arr.peek(index); }); )*
        }

        /// Put every slot at `index` back to its default.
        pub fn clear_at_index(index: usize) {
            $( $array.with(|arr| arr.clear(index)); )*
        }

        pub fn reset() {
            $( $array.with(|arr| arr.clear_all()); )*
        }

        $(
            pub fn $get(index: usize) -> $ty {
                $array.with(|arr| arr.get(index))
            }

            pub fn $set(index: usize, value: $ty) {
                $array.with(|arr| arr.set_value(index, value));
            }

            $(
                pub fn $set_getter<F>(index: usize, getter: F)
                where
                    F: Fn() -> $ty + 'static,
                {
                    $array.with(|arr| arr.set_getter(index, getter));
                }
            )?
        )*
    };
}

pub mod core;
pub mod layout;
pub mod visual;
pub mod text;
pub mod interaction;

/// Ensure all arrays have capacity for the given index.
///
/// Called by the registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core::ensure_capacity(index);
    layout::ensure_capacity(index);
    visual::ensure_capacity(index);
    text::ensure_capacity(index);
    interaction::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by the registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core::clear_at_index(index);
    layout::clear_at_index(index);
    visual::clear_at_index(index);
    text::clear_at_index(index);
    interaction::clear_at_index(index);
}

/// Reset every array. Runs when the last component is released.
pub fn reset_all_arrays() {
    core::reset();
    layout::reset();
    visual::reset();
    text::reset();
    interaction::reset();
}
