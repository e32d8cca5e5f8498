//! Browser-style tab strip control.
//!
//! A [`TabBarControl`] mirrors a host-owned [`TabContainer`] as a row (or
//! column) of tab cells: it lays them out, spills what does not fit into an
//! overflow menu, handles close buttons and hover, and animates hiding and
//! showing.  Strips are registered with a [`TabStrips`] registry whose drag
//! coordinator reorders tabs within a strip, moves them between strips, and
//! tears them off into new ones.
//!
//! Rendering is left to the host: strips emit [`DrawCmd`] lists through a
//! pluggable [`TabStyle`].

pub mod config;
pub mod core;
pub mod drag;
pub mod input;
#[cfg(feature = "native-menu")]
pub mod menus;
pub mod strip;

mod strips;

pub use crate::config::{CloseButtonPolicy, StripConfig, TabLocation};
pub use crate::core::{Color, ItemId, ItemRef, Orientation, Point, Rect, TabItem};
pub use crate::drag::{DragEnd, DragPayload, DragPhase};
pub use crate::strip::container::{TabContainer, VecContainer};
pub use crate::strip::delegate::{DefaultDelegate, TabBarDelegate};
pub use crate::strip::style::{DefaultStyle, DrawCmd, TabStyle};
pub use crate::strip::{StripId, StripRequest, TabBarControl};
pub use crate::strips::TabStrips;
