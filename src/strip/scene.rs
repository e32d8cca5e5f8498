use crate::core::{Color, ItemId, Orientation, Point, Rect};

use super::TabBarControl;
use super::style::{DragImage, DrawCmd};

impl TabBarControl {
    /// Draw commands for the whole strip at its current bounds.
    ///
    /// Cells being dragged are left out; the drag coordinator exposes their
    /// image separately.
    pub fn scene(&mut self) -> Vec<DrawCmd> {
        self.layout_if_needed();
        let bounds = self.bounds();
        if bounds.is_empty() {
            return Vec::new();
        }
        let orientation = self.config.orientation;
        let mut cmds = self.style.draw_background(bounds);

        for i in 0..self.cells.len() {
            let cell = &self.cells[i];
            if cell.state.dragging || cell.frame.is_none() {
                continue;
            }
            let Some(mut view) = self.cell_view(i) else {
                continue;
            };
            let (dx, dy) = orientation.main_offset(self.slide_offset(cell.item_id()));
            view.frame = view.frame.offset(dx, dy);
            cmds.extend(self.style.draw_cell(&view));
        }

        if let Some(rect) = self.layout.overflow_button {
            let highlighted = self
                .selected
                .is_some_and(|id| self.overflow.contains(id));
            cmds.push(DrawCmd::OverflowButton { rect, highlighted });
        }
        if let Some(rect) = self.layout.add_button {
            cmds.push(DrawCmd::AddButton { rect });
        }
        if self.config.allows_resizing && orientation == Orientation::Vertical {
            let edge = bounds.max_x() - 0.5;
            cmds.push(DrawCmd::Line {
                from: Point::new(edge, bounds.y),
                to: Point::new(edge, bounds.max_y()),
                color: Color::BORDER,
            });
        }
        cmds
    }

    /// Image of the cell showing `id`, for drag feedback.
    pub fn drag_image(&self, id: ItemId) -> Option<DragImage> {
        let index = self.index_of(id)?;
        let view = self.cell_view(index)?;
        if view.frame == Rect::ZERO {
            return None;
        }
        Some(self.style.drag_image(&view))
    }
}
