//! Conversion of `winit` window events into strip input.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, ModifiersState, NamedKey};

use crate::TabStrips;
use crate::core::Point;

/// Discrete pointer/keyboard input understood by [`TabStrips`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StripInput {
    PrimaryDown(Point),
    PrimaryUp(Point),
    SecondaryDown(Point),
    Moved(Point),
    /// The pointer left the window.
    Left,
    /// Abort the current drag (Escape).
    Cancel,
}

/// Converts a physical cursor position into the logical space strips use.
pub fn logical_point(position: PhysicalPosition<f64>, scale_factor: f64) -> Point {
    let logical = position.to_logical::<f64>(scale_factor);
    Point::new(logical.x, logical.y)
}

pub fn mouse_input(state: ElementState, button: MouseButton, at: Point) -> Option<StripInput> {
    match (button, state) {
        (MouseButton::Left, ElementState::Pressed) => Some(StripInput::PrimaryDown(at)),
        (MouseButton::Left, ElementState::Released) => Some(StripInput::PrimaryUp(at)),
        (MouseButton::Right, ElementState::Pressed) => Some(StripInput::SecondaryDown(at)),
        _ => None,
    }
}

pub fn key_input(key: &Key, state: ElementState) -> Option<StripInput> {
    match (key, state) {
        (Key::Named(NamedKey::Escape), ElementState::Pressed) => Some(StripInput::Cancel),
        _ => None,
    }
}

impl TabStrips {
    /// Feeds one input event.  Returns whether a strip consumed it.
    pub fn handle_input(&mut self, input: StripInput) -> bool {
        match input {
            StripInput::PrimaryDown(p) => self.mouse_down(p),
            StripInput::PrimaryUp(p) => self.mouse_up(p).is_some(),
            StripInput::SecondaryDown(p) => self.secondary_click(p),
            StripInput::Moved(p) => self.mouse_moved(p),
            StripInput::Left => {
                self.mouse_exited();
                false
            }
            StripInput::Cancel => self.cancel_drag(),
        }
    }

    /// Applies the tab-switch modifier to every strip.
    pub fn set_modifier(&mut self, modifier: ModifiersState) {
        for strip in self.iter_mut() {
            strip.set_modifier(modifier);
        }
    }
}
