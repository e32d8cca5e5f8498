use serde::{Deserialize, Serialize};

use crate::core::Orientation;

use super::ConfigError;

/// Per-strip configuration.
///
/// Immutable during a layout pass; the layout engine and the drag
/// coordinator only ever read a [`StripConfig::sanitized`] copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    pub orientation: Orientation,
    pub tab_location: TabLocation,
    pub close_button: CloseButtonPolicy,
    pub disable_tab_close: bool,
    pub cell_min_width: u32,
    pub cell_optimum_width: u32,
    pub cell_max_width: u32,
    /// Row height of a cell in vertical orientation.
    pub cell_height: u32,
    /// Cross-axis thickness of a horizontal strip.
    pub bar_height: u32,
    pub size_cells_to_fit: bool,
    pub use_overflow_menu: bool,
    pub allows_background_tab_closing: bool,
    pub allows_resizing: bool,
    pub selects_tabs_on_mouse_down: bool,
    pub automatically_animates: bool,
    pub hide_for_single_tab: bool,
    pub show_add_tab_button: bool,
    /// Pointer travel (logical pixels) before a press becomes a drag.
    pub drag_threshold: f64,
    pub hide_animation: HideAnimationConfig,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            tab_location: TabLocation::Top,
            close_button: CloseButtonPolicy::Always,
            disable_tab_close: false,
            cell_min_width: 100,
            cell_optimum_width: 130,
            cell_max_width: 280,
            cell_height: 22,
            bar_height: 22,
            size_cells_to_fit: false,
            use_overflow_menu: true,
            allows_background_tab_closing: true,
            allows_resizing: false,
            selects_tabs_on_mouse_down: false,
            automatically_animates: false,
            hide_for_single_tab: false,
            show_add_tab_button: false,
            drag_threshold: 5.0,
            hide_animation: HideAnimationConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HideAnimationConfig {
    /// Number of discrete steps between fully shown and fully hidden.
    pub steps: u32,
    pub step_interval_ms: u64,
}

impl Default for HideAnimationConfig {
    fn default() -> Self {
        Self {
            steps: 2,
            step_interval_ms: 33,
        }
    }
}

/// Edge of the content area the strip is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TabLocation {
    #[default]
    Top,
    Bottom,
    Left,
}

/// When a cell shows its close button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CloseButtonPolicy {
    #[default]
    Always,
    OnHover,
    Never,
}

impl StripConfig {
    /// Parses a RON document; missing fields take their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: StripConfig = ron::from_str(source).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that cannot be clamped into something meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::Invalid {
                field: "drag_threshold",
                reason: format!("must be a non-negative number, got {}", self.drag_threshold),
            });
        }
        if self.hide_animation.steps == 0 {
            return Err(ConfigError::Invalid {
                field: "hide_animation.steps",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Returns a copy with width settings clamped so that
    /// `1 <= min <= optimum <= max`.  The minimum wins over the maximum.
    pub fn sanitized(&self) -> StripConfig {
        let mut c = self.clone();
        c.cell_min_width = c.cell_min_width.max(1);
        c.cell_max_width = c.cell_max_width.max(c.cell_min_width);
        c.cell_optimum_width = c
            .cell_optimum_width
            .clamp(c.cell_min_width, c.cell_max_width);
        c.cell_height = c.cell_height.max(1);
        c.bar_height = c.bar_height.max(1);
        c.hide_animation.steps = c.hide_animation.steps.max(1);
        if !c.drag_threshold.is_finite() || c.drag_threshold < 0.0 {
            c.drag_threshold = StripConfig::default().drag_threshold;
        }
        if c.tab_location == TabLocation::Left {
            c.orientation = Orientation::Vertical;
        }
        c
    }

    /// Cross-axis size of the fully shown strip.
    pub fn thickness(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.bar_height as f64,
            Orientation::Vertical => self.cell_optimum_width as f64,
        }
    }

    pub fn close_buttons_enabled(&self) -> bool {
        !self.disable_tab_close && self.close_button != CloseButtonPolicy::Never
    }
}
