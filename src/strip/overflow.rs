//! Model of the popup listing overflowed cells.

use crate::core::ItemId;

use super::cell::TabCell;
use super::delegate::TabBarDelegate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowEntry {
    pub item: ItemId,
    pub title: String,
    pub enabled: bool,
    pub selected: bool,
}

/// Entries mirror, in sequence order, the cells the last layout pass
/// marked overflowed.
#[derive(Debug, Default)]
pub struct OverflowMenu {
    entries: Vec<OverflowEntry>,
    /// Bumped on every rebuild.
    revision: u64,
}

impl OverflowMenu {
    pub fn entries(&self) -> &[OverflowEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.entries.iter().any(|e| e.item == id)
    }

    pub fn entry(&self, id: ItemId) -> Option<&OverflowEntry> {
        self.entries.iter().find(|e| e.item == id)
    }

    /// Rebuilds when the overflow set changed; otherwise only refreshes
    /// titles and flags in place.  A disabled menu stays empty.  Returns
    /// whether a rebuild happened.
    pub(crate) fn sync(
        &mut self,
        cells: &[TabCell],
        selected: Option<ItemId>,
        delegate: &dyn TabBarDelegate,
        enabled: bool,
    ) -> bool {
        let overflowed: Vec<&TabCell> = cells
            .iter()
            .filter(|c| enabled && c.is_overflowed() && !c.is_placeholder())
            .collect();
        let entry_for = |cell: &TabCell| OverflowEntry {
            item: cell.item_id(),
            title: cell.item().label(),
            enabled: delegate.validate_overflow_menu_item(cell.item()),
            selected: selected == Some(cell.item_id()),
        };

        let unchanged = overflowed.len() == self.entries.len()
            && overflowed
                .iter()
                .zip(&self.entries)
                .all(|(cell, entry)| cell.item_id() == entry.item);
        if unchanged {
            for (cell, entry) in overflowed.iter().zip(self.entries.iter_mut()) {
                *entry = entry_for(cell);
            }
            return false;
        }

        self.entries = overflowed.into_iter().map(entry_for).collect();
        self.revision += 1;
        log::debug!(
            "overflow menu rebuilt: {} entries (revision {})",
            self.entries.len(),
            self.revision
        );
        true
    }
}
