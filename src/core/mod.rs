mod color;
mod geometry;
mod item;

pub use color::Color;
pub use geometry::{Orientation, Point, Rect};
pub use item::{ItemId, ItemProps, ItemRef, TabItem};
