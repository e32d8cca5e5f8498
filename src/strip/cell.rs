use std::cell::Cell;

use crate::core::{ItemId, ItemRef, Rect, TabItem};

/// Where a visible cell sits in the run of visible cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionRole {
    Left,
    Middle,
    Right,
    Single,
}

/// Display state of a cell.
///
/// The structural part (`selected`, neighbour flags, `position`,
/// `overflowed`) is recomputed from the cell sequence on every layout pass
/// and is never treated as independent truth.  The interaction part
/// (`hovered`, close-button and drag flags) is transient pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    pub selected: bool,
    pub left_is_selected: bool,
    pub right_is_selected: bool,
    /// `None` while the cell is overflowed.
    pub position: Option<PositionRole>,
    pub overflowed: bool,

    pub hovered: bool,
    pub close_hovered: bool,
    pub close_pressed: bool,
    pub dragging: bool,
}

impl CellState {
    pub(crate) fn clear_structural(&mut self) {
        self.selected = false;
        self.left_is_selected = false;
        self.right_is_selected = false;
        self.position = None;
        self.overflowed = false;
    }

    pub(crate) fn clear_interaction(&mut self) {
        self.hovered = false;
        self.close_hovered = false;
        self.close_pressed = false;
        self.dragging = false;
    }
}

/// Per-tab visual/geometric unit mirroring one [`TabItem`].
#[derive(Debug)]
pub struct TabCell {
    item: ItemRef,
    pub(crate) frame: Option<Rect>,
    pub(crate) state: CellState,
    /// Set while the cell only exists as a cross-strip drop target.
    pub(crate) placeholder: bool,
    pub(crate) shortcut: Option<String>,
    /// `(item revision, width)` of the last preferred-width measurement.
    width_cache: Cell<Option<(u64, f64)>>,
}

impl TabCell {
    pub(crate) fn new(item: ItemRef) -> Self {
        Self {
            item,
            frame: None,
            state: CellState::default(),
            placeholder: false,
            shortcut: None,
            width_cache: Cell::new(None),
        }
    }

    pub(crate) fn placeholder(item: ItemRef) -> Self {
        Self {
            placeholder: true,
            ..Self::new(item)
        }
    }

    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    pub fn item_id(&self) -> ItemId {
        self.item.id()
    }

    /// Frame assigned by the last layout pass; `None` when overflowed.
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    pub fn is_overflowed(&self) -> bool {
        self.state.overflowed
    }

    /// Keyboard shortcut label such as `⌘3`, for the first nine cells.
    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }

    /// Rebinds the cell to a different item, keeping its slot.
    pub(crate) fn rebind(&mut self, item: ItemRef) {
        self.item = item;
        self.invalidate_width();
    }

    pub(crate) fn invalidate_width(&self) {
        self.width_cache.set(None);
    }

    /// Returns the cached preferred width, measuring through `measure` when
    /// the item changed since the last measurement.
    pub(crate) fn preferred_width(&self, measure: impl FnOnce(&TabItem) -> f64) -> f64 {
        let revision = self.item.revision();
        if let Some((cached_rev, width)) = self.width_cache.get()
            && cached_rev == revision
        {
            return width;
        }
        let width = measure(&self.item);
        self.width_cache.set(Some((revision, width)));
        width
    }
}

/// Recomputes the structural flags of every cell from the sequence.
///
/// `visible` is the number of leading cells that received a frame.
pub(crate) fn assign_roles(cells: &mut [TabCell], selected: Option<ItemId>, visible: usize) {
    let selected_index = selected.and_then(|id| cells.iter().position(|c| c.item_id() == id));
    for (i, cell) in cells.iter_mut().enumerate() {
        cell.state.clear_structural();
        cell.state.selected = selected_index == Some(i);
        if i >= visible {
            cell.state.overflowed = true;
            continue;
        }
        cell.state.position = Some(match (visible, i) {
            (1, _) => PositionRole::Single,
            (_, 0) => PositionRole::Left,
            (n, i) if i + 1 == n => PositionRole::Right,
            _ => PositionRole::Middle,
        });
        if let Some(sel) = selected_index.filter(|&s| s < visible) {
            cell.state.left_is_selected = i > 0 && sel == i - 1;
            cell.state.right_is_selected = sel == i + 1;
        }
    }
}
