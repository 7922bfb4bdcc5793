//! Text Measurement
//!
//! Display width of text in terminal cells, via `unicode-width`:
//! ASCII is 1 cell, CJK and most emoji 2, combining marks 0.

use unicode_width::UnicodeWidthChar;

/// Width of one character in cells. Control characters count as 0.
#[inline]
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    s.chars().fold(0u16, |acc, c| acc.saturating_add(char_width(c)))
}

/// Number of lines `text` occupies when wrapped at `available_width`.
///
/// 0 for empty text, otherwise at least 1. Explicit newlines always break.
pub fn measure_text_height(text: &str, available_width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    if available_width == 0 {
        return 1;
    }

    let mut lines = 1u16;
    let mut line_width = 0u16;

    for c in text.chars() {
        if c == '\n' {
            lines = lines.saturating_add(1);
            line_width = 0;
            continue;
        }

        let w = char_width(c);
        if line_width > 0 && line_width.saturating_add(w) > available_width {
            lines = lines.saturating_add(1);
            line_width = w;
        } else {
            line_width = line_width.saturating_add(w);
        }
    }

    lines
}

/// Break text into lines no wider than `width` cells.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0u16;

    for c in text.chars() {
        if c == '\n' {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
            continue;
        }

        let w = char_width(c);
        if !current.is_empty() && current_width.saturating_add(w) > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width = current_width.saturating_add(w);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
