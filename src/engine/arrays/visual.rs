//! Visual Arrays
//!
//! Foreground color. `TERMINAL_DEFAULT` means "inherit from the parent".

use crate::types::Rgba;

slot_arrays! {
    FG_COLOR: Rgba = Rgba::TERMINAL_DEFAULT => get_fg_color, set_fg_color, set_fg_color_getter;
}
