//! Layout engine: fits a run of variable-width cells into the strip.
//!
//! [`compute_layout`] is a pure function of the natural cell lengths, the
//! strip bounds and a sanitized [`StripConfig`].  It shrinks cells
//! proportionally toward the minimum when they do not fit, grows them
//! toward the maximum when `size_cells_to_fit` is on and there is slack,
//! and demotes the trailing cells (sequence order) to the overflow set when
//! even the minimum width is too wide for the strip.

pub mod tab_math;

use crate::config::StripConfig;
use crate::core::{Orientation, Rect};

use self::tab_math::{ADD_BUTTON_SIZE, BUTTON_GAP, OVERFLOW_BUTTON_WIDTH, STRIP_INSET};

/// Guards against `0.9999…` style float results before flooring to pixels.
const PIXEL_EPSILON: f64 = 1e-6;

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StripLayout {
    /// One entry per cell; `None` for overflowed cells.
    pub frames: Vec<Option<Rect>>,
    /// Number of leading cells that received a frame.
    pub visible: usize,
    pub add_button: Option<Rect>,
    pub overflow_button: Option<Rect>,
}

impl StripLayout {
    pub fn overflowed(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.is_none().then_some(i))
    }

    pub fn has_overflow(&self) -> bool {
        self.visible < self.frames.len()
    }

    /// Sum of the main-axis lengths of all visible cells.
    pub fn used_length(&self, orientation: Orientation) -> f64 {
        self.frames
            .iter()
            .flatten()
            .map(|f| f.main_len(orientation))
            .sum()
    }
}

/// Main-axis limits that apply to every cell of the pass.
#[derive(Debug, Clone, Copy)]
struct Limits {
    min: f64,
    max: f64,
}

/// Lays out `natural.len()` cells inside `bounds`.
///
/// `natural` holds each cell's content-derived preferred length; it is
/// clamped here, so callers may pass raw measurements.
pub fn compute_layout(natural: &[f64], bounds: Rect, config: &StripConfig) -> StripLayout {
    let config = config.sanitized();
    let orientation = config.orientation;
    let limits = match orientation {
        Orientation::Horizontal => Limits {
            min: config.cell_min_width as f64,
            max: config.cell_max_width as f64,
        },
        Orientation::Vertical => Limits {
            min: config.cell_height as f64,
            max: config.cell_height as f64,
        },
    };

    let natural: Vec<f64> = natural
        .iter()
        .map(|&w| match orientation {
            Orientation::Vertical => limits.min,
            Orientation::Horizontal if config.size_cells_to_fit => {
                if w.is_finite() { w.clamp(limits.min, limits.max) } else { limits.min }
            }
            Orientation::Horizontal => config.cell_optimum_width as f64,
        })
        .collect();

    let add_len = if config.show_add_tab_button {
        ADD_BUTTON_SIZE + BUTTON_GAP
    } else {
        0.0
    };
    let strip_len = (bounds.main_len(orientation) - STRIP_INSET * 2.0).max(0.0);
    let available = (strip_len - add_len).max(0.0).floor();
    let grow = config.size_cells_to_fit && orientation == Orientation::Horizontal;

    let (lengths, visible) = if limits.min * natural.len() as f64 <= available {
        (fit(&natural, limits, available, grow), natural.len())
    } else {
        let reserve = if config.use_overflow_menu {
            OVERFLOW_BUTTON_WIDTH + BUTTON_GAP
        } else {
            0.0
        };
        let room = (available - reserve).max(0.0).floor();
        let k = ((room + PIXEL_EPSILON) / limits.min).floor() as usize;
        let k = k.min(natural.len());
        (fit(&natural[..k], limits, room, grow), k)
    };

    let main_origin = bounds.main_start(orientation) + STRIP_INSET;
    let cross_origin = match orientation {
        Orientation::Horizontal => bounds.y,
        Orientation::Vertical => bounds.x,
    };
    let cross_len = bounds.cross_len(orientation);

    let mut frames = Vec::with_capacity(natural.len());
    let mut cursor = main_origin;
    for len in &lengths {
        frames.push(Some(orientation.rect(cursor, *len, cross_origin, cross_len)));
        cursor += len;
    }
    frames.resize(natural.len(), None);

    let button_rect = |start: f64, len: f64| {
        let side = len.min(cross_len);
        orientation.rect(start, len, cross_origin + (cross_len - side) / 2.0, side)
    };
    let overflow_button = (visible < natural.len() && config.use_overflow_menu).then(|| {
        let r = button_rect(cursor + BUTTON_GAP, OVERFLOW_BUTTON_WIDTH);
        cursor += BUTTON_GAP + OVERFLOW_BUTTON_WIDTH;
        r
    });
    let add_button = config
        .show_add_tab_button
        .then(|| button_rect(cursor + BUTTON_GAP, ADD_BUTTON_SIZE));

    log::trace!(
        "layout: {} cells, {} visible, available {available}",
        natural.len(),
        visible
    );

    StripLayout {
        frames,
        visible,
        add_button,
        overflow_button,
    }
}

/// Distributes `available` among cells whose minimums are known to fit.
///
/// Shrinks proportionally to each cell's slack above the minimum, or grows
/// proportionally to each cell's headroom below the maximum when `grow`.
/// Results are floored to whole pixels so their sum never exceeds
/// `available`.
fn fit(natural: &[f64], limits: Limits, available: f64, grow: bool) -> Vec<f64> {
    let sum: f64 = natural.iter().sum();
    let exact: Vec<f64> = if sum > available {
        let reduction = sum - available;
        let slack: f64 = natural.iter().map(|w| w - limits.min).sum();
        let ratio = if slack > 0.0 { (reduction / slack).min(1.0) } else { 1.0 };
        natural
            .iter()
            .map(|w| w - (w - limits.min) * ratio)
            .collect()
    } else if grow {
        let extra = available - sum;
        let headroom: f64 = natural.iter().map(|w| limits.max - w).sum();
        let ratio = if headroom > 0.0 { (extra / headroom).min(1.0) } else { 0.0 };
        natural
            .iter()
            .map(|w| w + (limits.max - w) * ratio)
            .collect()
    } else {
        natural.to_vec()
    };
    exact
        .into_iter()
        .map(|w| (w + PIXEL_EPSILON).floor().clamp(limits.min, limits.max))
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/strip_layout.rs"]
mod tests;
