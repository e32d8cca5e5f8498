//! Pointer handling local to one strip: hover, close button, buttons,
//! double clicks and resizing.  Presses on a cell body are reported back
//! so that the drag coordinator can take over.

use std::time::{Duration, Instant};

use crate::core::{ItemId, Orientation, Point, Rect};

use super::delegate::ContextMenu;
use super::layout::hit_test::{StripHit, hit_test_strip};
use super::{StripRequest, TabBarControl};

/// Maximum gap between two presses on the same target to count as a
/// double click.
const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// What a press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Not for this strip (outside, hidden, or animating).
    Ignored,
    /// Consumed by a button, the close button, a double click or a resize.
    Handled,
    /// Press on the body of the cell at this index; a drag may follow.
    Cell(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeDrag {
    start: Point,
    start_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    Cell(usize),
    Bar,
}

#[derive(Debug, Default)]
pub(super) struct PointerState {
    hovered: Option<usize>,
    close_pressed: Option<usize>,
    resizing: Option<ResizeDrag>,
    last_click: Option<(Instant, ClickTarget)>,
}

impl PointerState {
    /// Drops indices that no longer exist.
    pub(super) fn clamp(&mut self, len: usize) {
        if self.hovered.is_some_and(|i| i >= len) {
            self.hovered = None;
        }
        if self.close_pressed.is_some_and(|i| i >= len) {
            self.close_pressed = None;
        }
        if let Some((_, ClickTarget::Cell(i))) = self.last_click
            && i >= len
        {
            self.last_click = None;
        }
    }
}

impl TabBarControl {
    /// Close-button rects of every cell whose button responds to the
    /// pointer.
    fn close_hit_rects(&self) -> Vec<Option<Rect>> {
        (0..self.cells.len())
            .map(|i| {
                if !self.close_button_active(i) {
                    return None;
                }
                self.cell_view(i)
                    .map(|view| self.style.close_button_rect(&view))
            })
            .collect()
    }

    pub fn hit_test(&self, p: Point) -> StripHit {
        let resizable =
            self.config.allows_resizing && self.config.orientation == Orientation::Vertical;
        hit_test_strip(
            p,
            self.bounds(),
            &self.layout,
            &self.close_hit_rects(),
            resizable,
        )
    }

    /// Whether the strip takes pointer input at all right now.
    pub fn accepts_input(&self) -> bool {
        !self.animator.is_animating() && !self.animator.is_hidden()
    }

    fn is_double_click(&mut self, target: ClickTarget) -> bool {
        let now = self.clock.now();
        let double = self.pointer.last_click.is_some_and(|(at, last)| {
            last == target && now.saturating_duration_since(at) <= DOUBLE_CLICK_INTERVAL
        });
        self.pointer.last_click = if double { None } else { Some((now, target)) };
        double
    }

    pub fn mouse_down(&mut self, p: Point) -> PressOutcome {
        if !self.accepts_input() {
            return PressOutcome::Ignored;
        }
        self.layout_if_needed();
        match self.hit_test(p) {
            StripHit::Outside => PressOutcome::Ignored,
            StripHit::ResizeHandle => {
                self.pointer.resizing = Some(ResizeDrag {
                    start: p,
                    start_width: self.frame.w,
                });
                PressOutcome::Handled
            }
            StripHit::AddButton => {
                self.requests.push(StripRequest::AddTabClicked);
                PressOutcome::Handled
            }
            StripHit::OverflowButton => {
                if let Some(anchor) = self.layout.overflow_button {
                    self.requests
                        .push(StripRequest::OverflowMenuRequested { anchor });
                }
                PressOutcome::Handled
            }
            StripHit::CloseButton(i) => {
                self.pointer.close_pressed = Some(i);
                self.cells[i].state.close_pressed = true;
                self.cells[i].state.close_hovered = true;
                PressOutcome::Handled
            }
            StripHit::Cell(i) => {
                if self.is_double_click(ClickTarget::Cell(i)) {
                    let item = self.cells[i].item().clone();
                    self.delegate.double_click_item(&item);
                    return PressOutcome::Handled;
                }
                if self.config.selects_tabs_on_mouse_down {
                    let id = self.cells[i].item_id();
                    self.select_item(id);
                }
                PressOutcome::Cell(i)
            }
            StripHit::Empty => {
                if self.is_double_click(ClickTarget::Bar) {
                    self.delegate.double_click_tab_bar();
                }
                PressOutcome::Handled
            }
        }
    }

    /// A press on the cell of `id` ended without becoming a drag.
    pub(crate) fn click_item(&mut self, id: ItemId) {
        if !self.config.selects_tabs_on_mouse_down {
            self.select_item(id);
        }
    }

    /// Tracks hover, a pressed close button, or a strip resize.
    pub fn mouse_moved(&mut self, p: Point) {
        if let Some(drag) = self.pointer.resizing {
            let limits = (
                self.config.cell_min_width as f64,
                self.config.cell_max_width as f64,
            );
            let width = (drag.start_width + p.x - drag.start.x)
                .round()
                .clamp(limits.0, limits.1);
            if width != self.frame.w {
                self.frame.w = width;
                self.relayout();
                self.requests.push(StripRequest::Resized { width });
            }
            return;
        }
        if !self.accepts_input() {
            return;
        }

        let hit = self.hit_test(p);
        if let Some(i) = self.pointer.close_pressed {
            // Only the pressed button reacts until release.
            let inside = hit == StripHit::CloseButton(i);
            self.cells[i].state.close_pressed = inside;
            self.cells[i].state.close_hovered = inside;
            return;
        }

        let hovered = match hit {
            StripHit::Cell(i) | StripHit::CloseButton(i) => Some(i),
            _ => None,
        };
        if hovered != self.pointer.hovered {
            if let Some(old) = self.pointer.hovered.and_then(|i| self.cells.get_mut(i)) {
                old.state.clear_interaction();
            }
            self.pointer.hovered = hovered;
        }
        if let Some(i) = hovered {
            self.cells[i].state.hovered = true;
            self.cells[i].state.close_hovered = hit == StripHit::CloseButton(i);
        }
    }

    /// Finishes a close-button press or a resize.  Returns whether the
    /// release was consumed.
    pub fn mouse_up(&mut self, p: Point) -> bool {
        if self.pointer.resizing.take().is_some() {
            return true;
        }
        let Some(i) = self.pointer.close_pressed.take() else {
            return false;
        };
        let Some(cell) = self.cells.get_mut(i) else {
            return true;
        };
        cell.state.close_pressed = false;
        let id = cell.item_id();
        if self.hit_test(p) == StripHit::CloseButton(i) {
            self.request_close(id);
        }
        true
    }

    pub fn mouse_exited(&mut self) {
        if let Some(cell) = self.pointer.hovered.take().and_then(|i| self.cells.get_mut(i)) {
            cell.state.clear_interaction();
        }
    }

    /// Secondary click: asks the delegate for the item's contextual menu and
    /// forwards it to the host.
    pub fn secondary_click(&mut self, p: Point) -> Option<ContextMenu> {
        if !self.accepts_input() {
            return None;
        }
        let (StripHit::Cell(i) | StripHit::CloseButton(i)) = self.hit_test(p) else {
            return None;
        };
        let item = self.cells[i].item().clone();
        let menu = self.delegate.menu_for_item(&item)?;
        self.requests.push(StripRequest::ContextMenuRequested {
            item: item.id(),
            menu: menu.clone(),
            at: p,
        });
        Some(menu)
    }

    /// Tooltip for whatever is under `p`.
    pub fn tooltip_at(&self, p: Point) -> Option<String> {
        match self.hit_test(p) {
            StripHit::Cell(i) | StripHit::CloseButton(i) => self.tooltip_for(self.cells[i].item_id()),
            _ => None,
        }
    }
}
