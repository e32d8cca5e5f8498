//! Pluggable drawing capability.
//!
//! A [`TabStyle`] turns a cell's geometry and state into draw commands and
//! reports preferred sizing.  It never calls back into the strip; it only
//! reads the [`CellView`] it is handed.  Hosts paint the returned
//! [`DrawCmd`]s with whatever backend they use.

use crate::config::TabLocation;
use crate::core::{Color, Orientation, Point, Rect, TabItem};

use super::cell::{CellState, PositionRole};
use super::layout::tab_math::{
    self, CELL_PADDING, CLOSE_BUTTON_SIZE, CellMetrics, ICON_WIDTH, INDICATOR_WIDTH, MARGIN_X,
    MARGIN_Y,
};

/// Read-only view of one cell handed to the style.
#[derive(Debug, Clone, Copy)]
pub struct CellView<'a> {
    pub item: &'a TabItem,
    pub frame: Rect,
    pub state: CellState,
    /// Whether the close button is active for this cell.
    pub close_button: bool,
    pub shortcut: Option<&'a str>,
    pub orientation: Orientation,
    pub location: TabLocation,
}

/// Edge of a cell that merges into the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenEdge {
    Top,
    Bottom,
    Right,
}

/// Filled region of a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellShape {
    pub rect: Rect,
    pub radius: f64,
    pub open_edge: OpenEdge,
    pub fill: Color,
    pub stroke: Color,
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill { rect: Rect, color: Color },
    Shape(CellShape),
    Line { from: Point, to: Point, color: Color },
    Text { origin: Point, text: String, color: Color },
    Icon { rect: Rect, name: String },
    Spinner { rect: Rect },
    Badge { rect: Rect, text: String, color: Color },
    CloseButton { rect: Rect, hovered: bool, pressed: bool },
    AddButton { rect: Rect },
    OverflowButton { rect: Rect, highlighted: bool },
}

/// Snapshot of a dragged cell, drawn under the pointer while dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct DragImage {
    pub size: (f64, f64),
    pub commands: Vec<DrawCmd>,
}

pub trait TabStyle {
    fn name(&self) -> &str;

    /// Content-derived preferred main-axis length of a cell.
    fn desired_width(&self, cell: &CellView<'_>) -> f64;

    fn close_button_rect(&self, cell: &CellView<'_>) -> Rect;

    fn cell_shape(&self, cell: &CellView<'_>) -> CellShape;

    fn draw_cell(&self, cell: &CellView<'_>) -> Vec<DrawCmd>;

    fn draw_background(&self, bounds: Rect) -> Vec<DrawCmd> {
        vec![DrawCmd::Fill {
            rect: bounds,
            color: Color::STRIP_BG,
        }]
    }

    fn accessory_text_color(&self) -> Color {
        Color::TEXT_DIM
    }

    /// Image of `cell` re-based at the origin.
    fn drag_image(&self, cell: &CellView<'_>) -> DragImage {
        let frame = cell.frame;
        let rebased = CellView {
            frame: Rect::new(0.0, 0.0, frame.w, frame.h),
            ..*cell
        };
        DragImage {
            size: (frame.w, frame.h),
            commands: self.draw_cell(&rebased),
        }
    }
}

/// Flat, rounded-tab look used when the host installs no style.
#[derive(Debug, Default, Clone)]
pub struct DefaultStyle;

impl DefaultStyle {
    fn fill_for(cell: &CellView<'_>) -> Color {
        let base = if cell.state.selected {
            Color::SELECTED_BG
        } else if cell.state.hovered {
            Color::HOVER_BG
        } else {
            Color::STRIP_BG
        };
        match cell.item.color() {
            Some(tint) => base.mix(tint, if cell.state.selected { 0.45 } else { 0.25 }),
            None => base,
        }
    }
}

impl TabStyle for DefaultStyle {
    fn name(&self) -> &str {
        "Default"
    }

    fn desired_width(&self, cell: &CellView<'_>) -> f64 {
        let props = cell.item.props();
        tab_math::desired_cell_width(&CellMetrics {
            title: &props.label,
            has_icon: props.icon.is_some(),
            has_indicator: props.processing,
            has_close_button: cell.close_button,
            object_count: props.object_count,
        })
    }

    fn close_button_rect(&self, cell: &CellView<'_>) -> Rect {
        let f = cell.frame;
        Rect::new(
            f.x + MARGIN_X,
            f.y + (f.h - CLOSE_BUTTON_SIZE) / 2.0,
            CLOSE_BUTTON_SIZE,
            CLOSE_BUTTON_SIZE,
        )
    }

    fn cell_shape(&self, cell: &CellView<'_>) -> CellShape {
        let open_edge = match cell.location {
            TabLocation::Top => OpenEdge::Bottom,
            TabLocation::Bottom => OpenEdge::Top,
            TabLocation::Left => OpenEdge::Right,
        };
        let radius = match cell.state.position {
            Some(PositionRole::Single) | Some(PositionRole::Left) | Some(PositionRole::Right) => 4.0,
            _ => 3.0,
        };
        CellShape {
            rect: cell.frame.inset(0.5, 0.5),
            radius,
            open_edge,
            fill: Self::fill_for(cell),
            stroke: Color::BORDER,
        }
    }

    fn draw_cell(&self, cell: &CellView<'_>) -> Vec<DrawCmd> {
        let f = cell.frame;
        let props = cell.item.props();
        let mut cmds = vec![DrawCmd::Shape(self.cell_shape(cell))];

        let mut lead = f.x + MARGIN_X;
        let mut trail = f.max_x() - MARGIN_X;
        let center_y = |h: f64| f.y + (f.h - h) / 2.0;

        if cell.close_button {
            let rect = self.close_button_rect(cell);
            cmds.push(DrawCmd::CloseButton {
                rect,
                hovered: cell.state.close_hovered,
                pressed: cell.state.close_pressed,
            });
            lead = rect.max_x() + CELL_PADDING;
        }
        if let Some(name) = props.icon.clone() {
            cmds.push(DrawCmd::Icon {
                rect: Rect::new(lead, center_y(ICON_WIDTH), ICON_WIDTH, ICON_WIDTH),
                name,
            });
            lead += ICON_WIDTH + CELL_PADDING;
        }
        if props.processing {
            trail -= INDICATOR_WIDTH;
            cmds.push(DrawCmd::Spinner {
                rect: Rect::new(trail, center_y(INDICATOR_WIDTH), INDICATOR_WIDTH, INDICATOR_WIDTH),
            });
            trail -= CELL_PADDING;
        }
        if props.object_count > 0 {
            let w = tab_math::count_badge_width(props.object_count);
            trail -= w;
            cmds.push(DrawCmd::Badge {
                rect: Rect::new(trail, f.y + MARGIN_Y, w, f.h - MARGIN_Y * 2.0),
                text: props.object_count.min(999).to_string(),
                color: Color::BADGE,
            });
            trail -= CELL_PADDING;
        } else if let Some(shortcut) = cell.shortcut {
            let w = tab_math::text_width(shortcut);
            if trail - w - CELL_PADDING > lead + tab_math::MIN_TITLE_WIDTH {
                trail -= w;
                cmds.push(DrawCmd::Text {
                    origin: Point::new(trail, f.y + MARGIN_Y),
                    text: shortcut.to_string(),
                    color: self.accessory_text_color(),
                });
                trail -= CELL_PADDING;
            }
        }

        let title = tab_math::truncate_title(&props.label, (trail - lead).max(0.0));
        if !title.is_empty() {
            let color = if cell.state.selected {
                Color::TEXT
            } else {
                Color::TEXT_DIM
            };
            cmds.push(DrawCmd::Text {
                origin: Point::new(lead, f.y + MARGIN_Y),
                text: title,
                color,
            });
        }
        cmds
    }
}
