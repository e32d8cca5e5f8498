use serde::{Deserialize, Serialize};

/// A point in strip (or screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Coordinate along the main axis of `orientation`.
    pub fn along(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }
}

/// A rectangle defined by origin + size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, w: 0.0, h: 0.0 };

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` when `p` falls inside this rectangle (exclusive end).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.max_x() && p.y >= self.y && p.y < self.max_y()
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Start coordinate along the main axis.
    pub fn main_start(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    /// Length along the main axis.
    pub fn main_len(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.w,
            Orientation::Vertical => self.h,
        }
    }

    /// Length along the cross axis.
    pub fn cross_len(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.h,
            Orientation::Vertical => self.w,
        }
    }

    /// Midpoint along the main axis.
    pub fn main_mid(&self, orientation: Orientation) -> f64 {
        self.main_start(orientation) + self.main_len(orientation) / 2.0
    }

    /// Returns a copy translated by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Returns a copy shrunk by `dx` on the left/right and `dy` on top/bottom.
    pub fn inset(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            w: (self.w - dx * 2.0).max(0.0),
            h: (self.h - dy * 2.0).max(0.0),
        }
    }
}

/// Direction in which cells are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Builds a rect from main-axis and cross-axis extents.
    pub fn rect(self, main_start: f64, main_len: f64, cross_start: f64, cross_len: f64) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(main_start, cross_start, main_len, cross_len),
            Orientation::Vertical => Rect::new(cross_start, main_start, cross_len, main_len),
        }
    }

    /// `(dx, dy)` that moves a rect by `amount` along the main axis.
    pub fn main_offset(self, amount: f64) -> (f64, f64) {
        match self {
            Orientation::Horizontal => (amount, 0.0),
            Orientation::Vertical => (0.0, amount),
        }
    }
}
