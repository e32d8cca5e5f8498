//! Registry of every strip in the process.
//!
//! [`TabStrips`] owns the strips and the shared drag coordinator, routes
//! pointer input to the strip under the pointer, and adopts strips created
//! by tear-off.  Points are in one coordinate space shared by all strips.

use std::time::Instant;

use crate::core::{ItemId, Point};
use crate::drag::{self, DragCoordinator, DragEnd, DragPayload, Release};
use crate::strip::layout::hit_test::{StripHit, insertion_index};
use crate::strip::style::DragImage;
use crate::strip::{PressOutcome, StripId, StripRequest, TabBarControl};

#[derive(Default)]
pub struct TabStrips {
    strips: Vec<TabBarControl>,
    drag: DragCoordinator,
    next_id: u32,
}

impl TabStrips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `strip` and returns its new id.
    pub fn add(&mut self, mut strip: TabBarControl) -> StripId {
        let id = StripId(self.next_id);
        self.next_id += 1;
        strip.set_id(id);
        log::debug!("registered {id}");
        self.strips.push(strip);
        id
    }

    /// Unregisters a strip, cancelling any drag first.
    pub fn remove(&mut self, id: StripId) -> Option<TabBarControl> {
        if self.drag.is_active() {
            self.drag.cancel(&mut self.strips);
        }
        let index = self.strips.iter().position(|s| s.id() == id)?;
        let mut strip = self.strips.remove(index);
        strip.stop_animations();
        Some(strip)
    }

    pub fn get(&self, id: StripId) -> Option<&TabBarControl> {
        self.strips.iter().find(|s| s.id() == id)
    }

    pub fn get_mut(&mut self, id: StripId) -> Option<&mut TabBarControl> {
        self.strips.iter_mut().find(|s| s.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabBarControl> {
        self.strips.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TabBarControl> {
        self.strips.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn drag(&self) -> &DragCoordinator {
        &self.drag
    }

    pub fn strip_at(&self, p: Point) -> Option<StripId> {
        drag::strip_at(&self.strips, p)
    }

    // ── Pointer routing ──────────────────────────────────────────────

    /// Primary button pressed.  Returns whether a strip consumed it.
    pub fn mouse_down(&mut self, p: Point) -> bool {
        let Some(id) = self.strip_at(p) else {
            return false;
        };
        let Some(strip) = self.get_mut(id) else {
            return false;
        };
        match strip.mouse_down(p) {
            PressOutcome::Ignored => false,
            PressOutcome::Handled => true,
            PressOutcome::Cell(index) => {
                self.drag.press(&mut self.strips, id, index, p);
                true
            }
        }
    }

    /// Pointer moved.  Returns whether a drag session consumed it.
    pub fn mouse_moved(&mut self, p: Point) -> bool {
        if self.drag.is_active() {
            return self.drag.pointer_moved(&mut self.strips, p);
        }
        for strip in &mut self.strips {
            strip.mouse_moved(p);
        }
        false
    }

    /// Primary button released.
    pub fn mouse_up(&mut self, p: Point) -> Option<DragEnd> {
        if self.drag.is_active() {
            let end = match self.drag.release(&mut self.strips, p)? {
                Release::End(end) => end,
                Release::TornOff(strip) => DragEnd::TornOff(self.add(*strip)),
            };
            if let DragEnd::Click { strip, item } = end
                && let Some(s) = self.get_mut(strip)
            {
                s.click_item(item);
            }
            return Some(end);
        }
        for strip in &mut self.strips {
            strip.mouse_up(p);
        }
        None
    }

    /// Escape or any other abort of the current drag.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        self.drag.cancel(&mut self.strips);
        true
    }

    pub fn mouse_exited(&mut self) {
        for strip in &mut self.strips {
            strip.mouse_exited();
        }
    }

    pub fn secondary_click(&mut self, p: Point) -> bool {
        let Some(id) = self.strip_at(p) else {
            return false;
        };
        self.get_mut(id)
            .is_some_and(|s| s.secondary_click(p).is_some())
    }

    /// Dragged cell image and where to draw it.
    pub fn drag_overlay(&self) -> Option<(Point, &DragImage)> {
        if !self.drag.phase().is_dragging() {
            return None;
        }
        let session = self.drag.session()?;
        let image = session.image()?;
        let (p, grab) = (session.pointer(), session.grab_offset());
        Some((Point::new(p.x - grab.x, p.y - grab.y), image))
    }

    // ── Foreign drags ────────────────────────────────────────────────

    fn accepts_foreign(strip: &TabBarControl, payload: &DragPayload) -> bool {
        matches!(payload, DragPayload::Foreign { .. })
            && strip
                .delegate()
                .allowed_drag_types()
                .iter()
                .any(|t| t == payload.type_name())
    }

    /// A foreign drag hovers at `p`.  Hovering an allowlisted payload over a
    /// tab selects it (spring-loading).  Returns whether the drop would be
    /// accepted.
    pub fn external_drag_moved(&mut self, payload: &DragPayload, p: Point) -> bool {
        let Some(strip) = self.strip_at(p).and_then(|id| self.get_mut(id)) else {
            return false;
        };
        if !Self::accepts_foreign(strip, payload) {
            return false;
        }
        if let StripHit::Cell(i) | StripHit::CloseButton(i) = strip.hit_test(p)
            && let Some(id) = strip.cell(i).map(|c| c.item_id())
            && strip.selected_item() != Some(id)
        {
            strip.select_item(id);
        }
        true
    }

    /// A foreign payload was dropped at `p`.  Returns whether it was
    /// consumed.
    pub fn external_drop(&mut self, payload: &DragPayload, p: Point) -> bool {
        let Some(strip) = self.strip_at(p).and_then(|id| self.get_mut(id)) else {
            return false;
        };
        if !Self::accepts_foreign(strip, payload) {
            log::debug!("dropped {} ignored", payload.type_name());
            return false;
        }
        match strip.hit_test(p) {
            StripHit::Cell(i) | StripHit::CloseButton(i) => {
                let Some(item) = strip.cell(i).map(|c| c.item().clone()) else {
                    return false;
                };
                strip.delegate().accepted_dragging_info(&item, payload)
            }
            StripHit::Empty | StripHit::AddButton | StripHit::OverflowButton => {
                let Some(item) = strip.delegate().unknown_object_dropped(payload) else {
                    return false;
                };
                let index = insertion_index(p, strip.layout(), strip.orientation());
                strip.insert_dropped_item(item, index)
            }
            StripHit::ResizeHandle | StripHit::Outside => false,
        }
    }

    // ── Timing and requests ──────────────────────────────────────────

    /// Advances every strip's animations.  Returns whether any needs a
    /// redraw.
    pub fn tick(&mut self) -> bool {
        let mut redraw = false;
        for strip in &mut self.strips {
            redraw |= strip.tick();
        }
        redraw
    }

    pub fn animation_schedule(&self) -> Option<Instant> {
        self.strips
            .iter()
            .filter_map(|s| s.animation_schedule())
            .min()
    }

    pub fn take_requests(&mut self) -> Vec<(StripId, StripRequest)> {
        let mut out = Vec::new();
        for strip in &mut self.strips {
            let id = strip.id();
            out.extend(strip.take_requests().into_iter().map(|r| (id, r)));
        }
        out
    }

    /// Strip and index currently showing `item`.
    pub fn locate(&self, item: ItemId) -> Option<(StripId, usize)> {
        self.strips
            .iter()
            .find_map(|s| s.index_of(item).map(|i| (s.id(), i)))
    }
}

#[cfg(test)]
#[path = "../tests/unit/drag_cross_strip.rs"]
mod tests;
