//! Cell-sequence operations used by the drag coordinator.
//!
//! Nothing here touches the container until one of the `commit_*`
//! methods runs; before that, every change is visual and can be rolled
//! back with [`TabBarControl::restore_order`].

use crate::core::{ItemId, ItemRef, Point};

use super::TabBarControl;
use super::animation::SlideAnimation;
use super::cell::TabCell;
use super::container::TabContainer;
use super::layout::hit_test::insertion_index;

impl TabBarControl {
    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    /// Freezes the sequence against external changes; they are queued.
    pub(crate) fn begin_session(&mut self) {
        self.session_active = true;
    }

    /// Unfreezes the sequence and replays queued changes in order.  When
    /// the replay does not land on the container's order, the cells are
    /// rebuilt from the container.
    pub(crate) fn end_session(&mut self) {
        self.session_active = false;
        self.cells.retain(|c| !c.is_placeholder());
        for cell in &mut self.cells {
            cell.state.dragging = false;
        }
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            log::debug!("{}: replaying {} queued changes", self.id, pending.len());
        }
        for change in pending {
            self.apply_change(change);
        }
        let container_ids =
            self.with_container(|c| c.items().iter().map(|i| i.id()).collect::<Vec<_>>());
        if let Some(ids) = container_ids
            && ids != self.order()
        {
            log::debug!("{}: cells out of step with the container, reloading", self.id);
            self.reload_from_container();
        }
        self.relayout();
    }

    /// Item ids in current display order.
    pub fn order(&self) -> Vec<ItemId> {
        self.cells.iter().map(|c| c.item_id()).collect()
    }

    pub(crate) fn set_dragging(&mut self, id: ItemId, dragging: bool) {
        if let Some(i) = self.index_of(id) {
            self.cells[i].state.dragging = dragging;
        }
    }

    /// Swaps `id` with its neighbours while the pointer is strictly past a
    /// neighbour's midpoint, relaying out after every swap.  Returns the
    /// cell's final index.
    pub(crate) fn live_reorder(&mut self, id: ItemId, p: Point) -> Option<usize> {
        let mut index = self.index_of(id)?;
        let orientation = self.config.orientation;
        let along = p.along(orientation);
        for _ in 0..self.cells.len() {
            let visible = self.layout.visible;
            let next = self
                .cells
                .get(index + 1)
                .filter(|_| index + 1 < visible)
                .and_then(|c| c.frame);
            if let Some(frame) = next
                && along > frame.main_mid(orientation)
            {
                self.swap_cells(index, index + 1);
                index += 1;
                continue;
            }
            let prev = index
                .checked_sub(1)
                .filter(|&i| i < visible)
                .and_then(|i| self.cells[i].frame);
            if let Some(frame) = prev
                && along < frame.main_mid(orientation)
            {
                self.swap_cells(index, index - 1);
                index -= 1;
                continue;
            }
            break;
        }
        Some(index)
    }

    fn swap_cells(&mut self, a: usize, b: usize) {
        let orientation = self.config.orientation;
        let before: Vec<Option<f64>> = [a, b]
            .iter()
            .map(|&i| self.cells[i].frame.map(|f| f.main_start(orientation)))
            .collect();
        self.cells.swap(a, b);
        self.relayout();
        log::trace!("{}: swapped cells {a} and {b}", self.id);

        if !self.config.automatically_animates {
            return;
        }
        let now = self.clock.now();
        let slide = self.slide.get_or_insert_with(|| SlideAnimation::new(now));
        // The non-dragged cell slides from its old slot into the new one.
        for (old_start, new_index) in [(before[0], b), (before[1], a)] {
            let cell = &self.cells[new_index];
            if cell.state.dragging {
                continue;
            }
            if let (Some(old), Some(frame)) = (old_start, cell.frame) {
                slide.push(cell.item_id(), old - frame.main_start(orientation), now);
            }
        }
    }

    /// Removes the cell of `id` from the visual sequence only.
    pub(crate) fn detach_cell(&mut self, id: ItemId) -> Option<TabCell> {
        let index = self.index_of(id)?;
        let cell = self.cells.remove(index);
        cell.item().unobserve(&self.needs_layout);
        self.relayout();
        Some(cell)
    }

    /// Puts a detached cell back at the pointer's projected index.
    pub(crate) fn reattach_cell(&mut self, cell: TabCell, p: Point) -> usize {
        let index = insertion_index(p, &self.layout, self.config.orientation).min(self.cells.len());
        cell.item().observe(&self.needs_layout);
        self.cells.insert(index, cell);
        self.relayout();
        index
    }

    /// Shows a drop target for a foreign item at the pointer's projected
    /// index.
    pub(crate) fn insert_placeholder(&mut self, item: ItemRef, p: Point) -> usize {
        let index = insertion_index(p, &self.layout, self.config.orientation).min(self.cells.len());
        let mut cell = TabCell::placeholder(item);
        cell.state.dragging = true;
        self.cells.insert(index, cell);
        self.relayout();
        index
    }

    pub(crate) fn remove_placeholder(&mut self, id: ItemId) {
        let before = self.cells.len();
        self.cells.retain(|c| !(c.is_placeholder() && c.item_id() == id));
        if self.cells.len() != before {
            self.relayout();
        }
    }

    /// Rolls the visual sequence back to `snapshot`, re-inserting `detached`
    /// when the dragged cell had left the strip.
    pub(crate) fn restore_order(&mut self, snapshot: &[ItemId], detached: Option<TabCell>) {
        self.cells.retain(|c| !c.is_placeholder());
        if let Some(cell) = detached {
            cell.item().observe(&self.needs_layout);
            self.cells.push(cell);
        }
        let mut remaining = std::mem::take(&mut self.cells);
        for id in snapshot {
            if let Some(i) = remaining.iter().position(|c| c.item_id() == *id) {
                self.cells.push(remaining.remove(i));
            }
        }
        self.cells.append(&mut remaining);
        for cell in &mut self.cells {
            cell.state.dragging = false;
        }
        self.slide = None;
        self.relayout();
    }

    /// Whether the container still holds `id`.
    pub(crate) fn container_holds(&self, id: ItemId) -> bool {
        self.with_container(|c| c.index_of(id).is_some()) == Some(true)
    }

    /// Container index at which `id` keeps the neighbours it has in the
    /// cell sequence.  The cells may lag behind the container while
    /// changes are queued, so neighbours the container no longer holds
    /// are skipped.
    fn container_target(&self, id: ItemId, container: &dyn TabContainer) -> Option<usize> {
        let at = self.index_of(id)?;
        let order: Vec<ItemId> = container
            .items()
            .iter()
            .map(|item| item.id())
            .filter(|other| *other != id)
            .collect();
        let position = |cell: &TabCell| order.iter().position(|o| *o == cell.item_id());
        let after = self.cells[..at]
            .iter()
            .rev()
            .filter(|c| !c.is_placeholder())
            .find_map(position);
        if let Some(p) = after {
            return Some(p + 1);
        }
        let before = self.cells[at + 1..]
            .iter()
            .filter(|c| !c.is_placeholder())
            .find_map(position);
        Some(before.unwrap_or(if at == 0 { 0 } else { order.len() }))
    }

    /// Commits an in-strip reorder of `id` and returns its container index.
    pub(crate) fn commit_reorder(&mut self, id: ItemId) -> Option<usize> {
        self.with_container(|c| {
            let from = c.index_of(id)?;
            let to = self.container_target(id, c)?;
            (from == to || c.move_item(from, to)).then_some(to)
        })
        .flatten()
    }

    /// Turns the placeholder of `id` into a real cell, inserts the item
    /// into the container next to the same neighbours and returns its
    /// container index.
    pub(crate) fn commit_placeholder(&mut self, id: ItemId) -> Option<usize> {
        let index = self
            .cells
            .iter()
            .position(|c| c.is_placeholder() && c.item_id() == id)?;
        let item = self.cells[index].item().clone();
        let target = self
            .with_container(|c| {
                let target = self.container_target(id, c)?;
                c.insert_item(item.clone(), target);
                c.select_item(id);
                Some(target)
            })
            .flatten()?;
        item.observe(&self.needs_layout);
        let cell = &mut self.cells[index];
        cell.placeholder = false;
        cell.state.dragging = false;
        self.selected = Some(id);
        self.relayout();
        Some(target)
    }

    /// Removes a detached item from the container after it was dropped
    /// elsewhere, mirroring the container's new selection.
    pub(crate) fn commit_removal(&mut self, item: &ItemRef) -> bool {
        let id = item.id();
        let Some(Some(_)) = self.with_container(|c| c.remove_item(id)) else {
            return false;
        };
        if let Some(i) = self.index_of(id) {
            self.cells.remove(i);
        }
        self.selected = self
            .with_container(|c| c.selected())
            .flatten()
            .filter(|s| self.index_of(*s).is_some());
        self.after_item_left(item);
        self.relayout();
        self.update_auto_hide();
        true
    }

    /// Appends `item` to this strip's container and selects it.
    pub(crate) fn adopt_item(&mut self, item: ItemRef) -> bool {
        let index = self.cells.len();
        self.insert_dropped_item(item, index)
    }
}
