//! Text Arrays
//!
//! Content and attributes of text components. Content getters are how the
//! counter's label stays live.

use crate::types::Attr;

slot_arrays! {
    TEXT_CONTENT: String = String::new() => get_text_content, set_text_content, set_text_content_getter;
    TEXT_ATTRS: Attr = Attr::NONE => get_text_attrs, set_text_attrs, set_text_attrs_getter;
}
