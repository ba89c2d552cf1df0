//! Column output for listings.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of one column unit; multiplied per listing for wider layouts.
const COLUMN_SPACING: usize = 10;

/// Prints items as one row. Every cell but the last is padded to the
/// column width; cells too wide are truncated with an ellipsis.
pub fn columns(items: &[String], spacing_multiplier: usize) {
    let spacing = COLUMN_SPACING * spacing_multiplier.max(1);
    let mut row = String::new();

    for (i, item) in items.iter().enumerate() {
        if i + 1 == items.len() {
            row.push_str(item);
            break;
        }

        let cell = if item.width() > spacing {
            truncate_to_width(item, spacing.saturating_sub(5))
        } else {
            item.clone()
        };

        row.push_str(&cell);
        for _ in 0..spacing.saturating_sub(cell.width()) {
            row.push(' ');
        }
    }

    println!("{}", row);
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }

    out.push_str("...  ");
    out
}
