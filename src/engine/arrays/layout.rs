//! Layout Arrays
//!
//! Flexbox properties read by the taffy bridge. Padding applies to all four
//! sides.

use crate::types::FlexDirection;

slot_arrays! {
    FLEX_DIRECTION: FlexDirection = FlexDirection::Column
        => get_flex_direction, set_flex_direction, set_flex_direction_getter;
    /// Cells between adjacent children along the main axis.
    GAP: u16 = 0 => get_gap, set_gap, set_gap_getter;
    PADDING: u16 = 0 => get_padding, set_padding, set_padding_getter;
}
