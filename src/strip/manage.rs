//! Structural changes: mirroring the container, closing, moving and
//! selecting tabs.

use crate::core::{ItemId, ItemRef};

use super::cell::TabCell;
use super::container::{TabContainer, normalized_selection_after_remove};
use super::{StripRequest, TabBarControl};

/// A structural notification received while a drag session was active,
/// replayed in order when the session ends.
#[derive(Debug, Clone)]
pub enum PendingChange {
    Insert { item: ItemRef, index: Option<usize> },
    Remove(ItemId),
    Select(ItemId),
    Reload,
}

impl TabBarControl {
    // ── Container notifications ──────────────────────────────────────

    /// The container is about to append `item`.
    pub fn will_add_item(&mut self, item: ItemRef) {
        self.apply_or_queue(PendingChange::Insert { item, index: None });
    }

    /// The container is about to insert `item` at `index`.
    pub fn will_insert_item(&mut self, item: ItemRef, index: usize) {
        self.apply_or_queue(PendingChange::Insert {
            item,
            index: Some(index),
        });
    }

    /// The container is about to remove `id`.
    pub fn will_remove_item(&mut self, id: ItemId) {
        self.apply_or_queue(PendingChange::Remove(id));
    }

    pub fn did_select_item(&mut self, id: ItemId) {
        self.apply_or_queue(PendingChange::Select(id));
    }

    /// The container changed in ways not covered by the finer
    /// notifications; the cells are rebuilt from its item list.
    pub fn items_did_change(&mut self) {
        self.apply_or_queue(PendingChange::Reload);
    }

    /// Changes a no longer valid slot's identity: the cell at `index` is
    /// rebound to `item` and the container slot replaced.  Refused while a
    /// drag session holds the sequence.
    pub fn change_identifier(&mut self, index: usize, item: ItemRef) -> bool {
        if self.session_active {
            return false;
        }
        if index >= self.cells.len() {
            log::warn!("{}: change_identifier index {index} out of range", self.id);
            return false;
        }
        let replaced = self.with_container(|c| c.replace_item(index, item.clone()));
        if !matches!(replaced, Some(Some(_))) {
            return false;
        }
        self.rebind(index, item);
        self.relayout();
        true
    }

    pub fn pending_changes(&self) -> &[PendingChange] {
        &self.pending
    }

    fn apply_or_queue(&mut self, change: PendingChange) {
        if self.session_active {
            log::debug!("{}: drag in progress, queued {change:?}", self.id);
            self.pending.push(change);
        } else {
            self.apply_change(change);
        }
    }

    pub(crate) fn apply_change(&mut self, change: PendingChange) {
        match change {
            PendingChange::Insert { item, index } => {
                if self.index_of(item.id()).is_some() {
                    log::warn!("{}: item {} is already shown", self.id, item.id());
                    return;
                }
                let index = index.unwrap_or(self.cells.len()).min(self.cells.len());
                item.observe(&self.needs_layout);
                self.cells.insert(index, TabCell::new(item.clone()));
                if self.selected.is_none() {
                    self.selected = Some(item.id());
                }
            }
            PendingChange::Remove(id) => {
                let Some(index) = self.index_of(id) else {
                    log::warn!("{}: remove of unknown item {id}", self.id);
                    return;
                };
                self.remove_cell(index);
            }
            PendingChange::Select(id) => {
                if self.index_of(id).is_some() {
                    self.selected = Some(id);
                }
            }
            PendingChange::Reload => self.reload_from_container(),
        }
        self.relayout();
        self.update_auto_hide();
    }

    /// Rebuilds the cell sequence from the container, keeping the cells of
    /// items that are still present.
    pub(crate) fn reload_from_container(&mut self) {
        let Some((items, selected)) = self.with_container(|c| (c.items(), c.selected())) else {
            return;
        };
        let mut old = std::mem::take(&mut self.cells);
        for item in &items {
            let cell = match old.iter().position(|c| c.item_id() == item.id()) {
                Some(i) => old.swap_remove(i),
                None => {
                    item.observe(&self.needs_layout);
                    TabCell::new(item.clone())
                }
            };
            self.cells.push(cell);
        }
        for cell in old {
            cell.item().unobserve(&self.needs_layout);
        }
        self.selected = selected.filter(|id| self.index_of(*id).is_some());
        self.relayout();
        self.update_auto_hide();
    }

    fn rebind(&mut self, index: usize, item: ItemRef) {
        let old_id = self.cells[index].item_id();
        self.cells[index].item().unobserve(&self.needs_layout);
        item.observe(&self.needs_layout);
        if self.selected == Some(old_id) {
            self.selected = Some(item.id());
        }
        self.cells[index].rebind(item);
    }

    /// Removes the cell at `index`, moving the selection to a neighbour
    /// when the removed cell was selected.
    fn remove_cell(&mut self, index: usize) {
        let len_before = self.cells.len();
        let selected_index = self.selected.and_then(|id| self.index_of(id));
        let cell = self.cells.remove(index);
        cell.item().unobserve(&self.needs_layout);
        self.selected = selected_index
            .and_then(|sel| normalized_selection_after_remove(sel, len_before, index))
            .map(|i| self.cells[i].item_id());
    }

    // ── Container access ─────────────────────────────────────────────

    pub fn container_alive(&self) -> bool {
        self.container.strong_count() > 0
    }

    /// Runs `f` on the container; `None` when it is gone or borrowed.
    pub(crate) fn with_container<R>(&self, f: impl FnOnce(&mut dyn TabContainer) -> R) -> Option<R> {
        let Some(container) = self.container.upgrade() else {
            log::warn!("{}: container is gone", self.id);
            return None;
        };
        let Ok(mut guard) = container.try_borrow_mut() else {
            log::warn!("{}: container is already borrowed", self.id);
            return None;
        };
        Some(f(&mut *guard))
    }

    // ── Control-driven changes ───────────────────────────────────────

    /// Selects `id` in the container and the strip.
    pub fn select_item(&mut self, id: ItemId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        if self.with_container(|c| c.select_item(id)) != Some(true) {
            return false;
        }
        self.selected = Some(id);
        self.relayout();
        true
    }

    /// Selecting an overflow entry is a click-select on its tab.  Entries
    /// the delegate disabled cannot be chosen.
    pub fn select_overflow_entry(&mut self, id: ItemId) -> bool {
        if !self.overflow.entry(id).is_some_and(|e| e.enabled) {
            return false;
        }
        self.select_item(id)
    }

    /// Moves the tab at `from` to `to`, in the container and the strip.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        if self.session_active || from >= self.cells.len() || to >= self.cells.len() {
            return false;
        }
        if from == to {
            return true;
        }
        if self.with_container(|c| c.move_item(from, to)) != Some(true) {
            return false;
        }
        let cell = self.cells.remove(from);
        self.cells.insert(to, cell);
        self.relayout();
        true
    }

    /// Closes `id` unless the delegate vetoes.  A vetoed close leaves the
    /// strip untouched.
    pub fn request_close(&mut self, id: ItemId) -> bool {
        if self.session_active {
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let item = self.cells[index].item().clone();
        if !self.delegate.should_close_item(&item) {
            log::debug!("{}: close of {id} vetoed", self.id);
            return false;
        }
        let Some(Some(_)) = self.with_container(|c| c.remove_item(id)) else {
            return false;
        };
        self.remove_cell(index);
        if let Some(selected) = self.with_container(|c| c.selected()) {
            self.selected = selected.filter(|s| self.index_of(*s).is_some());
        }
        self.delegate.did_close_item(&item);
        log::debug!("{}: closed {id}", self.id);
        self.after_item_left(&item);
        self.relayout();
        self.update_auto_hide();
        true
    }

    /// Inserts an item that arrived by drop into the container at `index`
    /// and selects it.
    pub fn insert_dropped_item(&mut self, item: ItemRef, index: usize) -> bool {
        if self.session_active || self.index_of(item.id()).is_some() {
            return false;
        }
        let id = item.id();
        let index = index.min(self.cells.len());
        let inserted = self.with_container(|c| {
            c.insert_item(item.clone(), index);
            c.select_item(id)
        });
        if inserted.is_none() {
            return false;
        }
        item.observe(&self.needs_layout);
        self.cells.insert(index, TabCell::new(item));
        self.selected = Some(id);
        self.relayout();
        self.update_auto_hide();
        true
    }

    /// Applies the last-item window policy after an item left the strip.
    pub(crate) fn after_item_left(&mut self, item: &ItemRef) {
        if self.cells.is_empty() && self.delegate.close_window_for_last_item(item) {
            self.requests.push(StripRequest::CloseWindow);
        }
    }
}
