use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const STRIP_BG: Color = Color::rgb(30, 30, 46); // #1E1E2E
    pub const SELECTED_BG: Color = Color::rgb(49, 50, 68); // #313244
    pub const HOVER_BG: Color = Color::rgb(69, 71, 90); // #45475A
    pub const BORDER: Color = Color::rgb(88, 91, 112); // #585B70
    pub const TEXT: Color = Color::rgb(205, 214, 244); // #CDD6F4
    pub const TEXT_DIM: Color = Color::rgb(147, 153, 178); // #9399B2
    pub const CLOSE_HOVER: Color = Color::rgb(243, 139, 168); // #F38BA8
    pub const BADGE: Color = Color::rgb(137, 180, 250); // #89B4FA

    /// Packs the color as `0x00RRGGBB`.
    pub fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Linear blend: `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| -> u8 { (a as f32 + (b as f32 - a as f32) * t).round() as u8 };
        Color {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
        }
    }
}
