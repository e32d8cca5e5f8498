//! The external ordered collection of tab items.
//!
//! The strip never owns items; it mirrors a [`TabContainer`] and asks it to
//! perform structural changes (close, reorder, cross-strip moves).

use crate::core::{ItemId, ItemRef};

/// Ordered, selectable collection of items owned by the host.
///
/// Every mutating method must be atomic: when it returns, `items()` already
/// reflects the whole change.
pub trait TabContainer {
    fn items(&self) -> Vec<ItemRef>;

    fn selected(&self) -> Option<ItemId>;

    /// Returns false when `id` is not in the container.
    fn select_item(&mut self, id: ItemId) -> bool;

    /// Inserts at `index`, clamped to the end.
    fn insert_item(&mut self, item: ItemRef, index: usize);

    /// Removes `id`, moving the selection to a neighbour when it was selected.
    fn remove_item(&mut self, id: ItemId) -> Option<ItemRef>;

    /// Moves the item at `from` so that it ends up at `to`.
    fn move_item(&mut self, from: usize, to: usize) -> bool;

    /// Replaces the item at `index`, returning the previous one.
    fn replace_item(&mut self, index: usize, item: ItemRef) -> Option<ItemRef>;

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items().iter().position(|item| item.id() == id)
    }

    fn len(&self) -> usize {
        self.items().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index of the selection after removing `removed_index` from a sequence of
/// `len_before` items.  `None` when nothing remains or the index is invalid.
pub(crate) fn normalized_selection_after_remove(
    selected: usize,
    len_before: usize,
    removed_index: usize,
) -> Option<usize> {
    if len_before == 0 || removed_index >= len_before {
        return None;
    }

    let len_after = len_before - 1;
    if len_after == 0 {
        return None;
    }

    let next = if selected > removed_index {
        selected.saturating_sub(1)
    } else {
        selected
    };

    Some(next.min(len_after - 1))
}

/// `Vec`-backed container for hosts without their own collection type.
#[derive(Debug, Default)]
pub struct VecContainer {
    items: Vec<ItemRef>,
    selected: Option<ItemId>,
}

impl VecContainer {
    /// Creates a container selecting the first item.
    pub fn new(items: Vec<ItemRef>) -> Self {
        let selected = items.first().map(|item| item.id());
        Self { items, selected }
    }

    pub fn push(&mut self, item: ItemRef) {
        if self.selected.is_none() {
            self.selected = Some(item.id());
        }
        self.items.push(item);
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id()).collect()
    }
}

impl TabContainer for VecContainer {
    fn items(&self) -> Vec<ItemRef> {
        self.items.clone()
    }

    fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    fn select_item(&mut self, id: ItemId) -> bool {
        if self.items.iter().any(|item| item.id() == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    fn insert_item(&mut self, item: ItemRef, index: usize) {
        let index = index.min(self.items.len());
        if self.selected.is_none() {
            self.selected = Some(item.id());
        }
        self.items.insert(index, item);
    }

    fn remove_item(&mut self, id: ItemId) -> Option<ItemRef> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let selected_index = self
            .selected
            .and_then(|sel| self.items.iter().position(|item| item.id() == sel));
        let len_before = self.items.len();
        let removed = self.items.remove(index);
        self.selected = selected_index
            .and_then(|sel| normalized_selection_after_remove(sel, len_before, index))
            .map(|i| self.items[i].id());
        Some(removed)
    }

    fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    fn replace_item(&mut self, index: usize, item: ItemRef) -> Option<ItemRef> {
        let slot = self.items.get_mut(index)?;
        let previous = std::mem::replace(slot, item);
        if self.selected == Some(previous.id()) {
            self.selected = Some(slot.id());
        }
        Some(previous)
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_container.rs"]
mod tests;
