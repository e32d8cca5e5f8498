//! Metric constants and pure width math for tab cells.
//!
//! Every function in this module is a pure calculation.  The default style
//! and the layout engine share these so that measurement and placement
//! agree on the same numbers.

use unicode_width::UnicodeWidthStr;

// ── Constants ────────────────────────────────────────────────────────

/// Height of a horizontal strip and of a vertical row.
pub const BAR_HEIGHT: f64 = 22.0;

/// Internal cell border along the main axis.
pub const MARGIN_X: f64 = 6.0;

/// Internal cell border along the cross axis.
pub const MARGIN_Y: f64 = 3.5;

/// Padding between objects inside a cell.
pub const CELL_PADDING: f64 = 4.0;

/// A title is never squeezed below this width when measuring.
pub const MIN_TITLE_WIDTH: f64 = 30.0;

/// Busy-spinner indicator width.
pub const INDICATOR_WIDTH: f64 = 16.0;

/// Icon slot width.
pub const ICON_WIDTH: f64 = 16.0;

/// Close button square size.
pub const CLOSE_BUTTON_SIZE: f64 = 12.0;

/// Advance of one terminal column of title text.
pub const CHAR_ADVANCE: f64 = 7.0;

/// Add-tab button square size.
pub const ADD_BUTTON_SIZE: f64 = 22.0;

/// Overflow popup button width.
pub const OVERFLOW_BUTTON_WIDTH: f64 = 16.0;

/// Gap between the last cell and the trailing buttons.
pub const BUTTON_GAP: f64 = 2.0;

/// Leading/trailing inset of the strip.
pub const STRIP_INSET: f64 = 0.0;

/// Thickness of the vertical-strip resize handle at the trailing edge.
pub const RESIZE_HANDLE_WIDTH: f64 = 4.0;

// ── Measurement ──────────────────────────────────────────────────────

/// Display width of `text` in pixels.
pub fn text_width(text: &str) -> f64 {
    UnicodeWidthStr::width(text) as f64 * CHAR_ADVANCE
}

/// Width of the object-count badge; 0 when `count` is 0.
pub fn count_badge_width(count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let digits = count.min(999).to_string();
    text_width(&digits) + CELL_PADDING * 2.0
}

/// Inputs that drive a cell's content width.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMetrics<'a> {
    pub title: &'a str,
    pub has_icon: bool,
    pub has_indicator: bool,
    pub has_close_button: bool,
    pub object_count: u32,
}

/// Preferred width of a cell given its content.
pub fn desired_cell_width(m: &CellMetrics<'_>) -> f64 {
    let mut width = MARGIN_X * 2.0;
    if m.has_close_button {
        width += CLOSE_BUTTON_SIZE + CELL_PADDING;
    }
    if m.has_icon {
        width += ICON_WIDTH + CELL_PADDING;
    }
    width += text_width(m.title).max(MIN_TITLE_WIDTH);
    if m.has_indicator {
        width += INDICATOR_WIDTH + CELL_PADDING;
    }
    let badge = count_badge_width(m.object_count);
    if badge > 0.0 {
        width += badge + CELL_PADDING;
    }
    width.ceil()
}

/// Truncates `title` with an ellipsis so that it fits in `max_width`.
pub fn truncate_title(title: &str, max_width: f64) -> String {
    if text_width(title) <= max_width {
        return title.to_string();
    }
    let columns = (max_width / CHAR_ADVANCE).floor() as usize;
    if columns == 0 {
        return String::new();
    }
    let budget = columns - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in title.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
