//! Policy hooks queried by the strip.
//!
//! Every method has a default that allows the operation or does nothing,
//! so a host implements only what it cares about.  Vetoes are plain
//! booleans: a vetoed close, drag or drop silently reverts.
//!
//! Delegate methods are called while the strip is being mutated; an
//! implementation must not call back into the same strip synchronously.

use crate::core::{ItemRef, Point, TabItem};
use crate::drag::DragPayload;

use super::style::DragImage;
use super::{StripId, TabBarControl};

/// One entry of a contextual menu supplied by the delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub enabled: bool,
    pub checked: Option<bool>,
}

impl MenuEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            enabled: true,
            checked: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenu {
    pub entries: Vec<MenuEntry>,
}

/// Image shown for a tab being torn off, with the pointer offset into it
/// and an opaque window-style mask for the host.
#[derive(Debug, Clone, PartialEq)]
pub struct TearOffImage {
    pub image: DragImage,
    pub offset: Point,
    pub style_mask: u32,
}

pub trait TabBarDelegate {
    fn should_close_item(&self, _item: &TabItem) -> bool {
        true
    }

    fn did_close_item(&self, _item: &TabItem) {}

    fn should_drag_item(&self, _item: &TabItem, _strip: StripId) -> bool {
        true
    }

    /// Whether `destination` accepts `item` as a cross-strip drop.
    fn should_drop_item(&self, _item: &TabItem, _destination: StripId) -> bool {
        true
    }

    fn will_drop_item(&self, _item: &TabItem, _destination: StripId) {}

    fn did_drop_item(&self, _item: &TabItem, _destination: StripId) {}

    fn drag_did_begin(&self, _item: &TabItem) {}

    fn drag_did_end(&self, _item: &TabItem) {}

    /// Foreign payload types accepted for spring-loaded drops.
    fn allowed_drag_types(&self) -> Vec<String> {
        Vec::new()
    }

    /// A foreign payload was dropped onto `item`.  Returns whether it was
    /// consumed.
    fn accepted_dragging_info(&self, _item: &TabItem, _payload: &DragPayload) -> bool {
        false
    }

    /// A foreign payload was dropped onto empty strip space.  Returning an
    /// item inserts it at the drop position.
    fn unknown_object_dropped(&self, _payload: &DragPayload) -> Option<ItemRef> {
        None
    }

    fn menu_for_item(&self, _item: &TabItem) -> Option<ContextMenu> {
        None
    }

    fn tear_off_image(&self, _item: &TabItem) -> Option<TearOffImage> {
        None
    }

    /// Creates a strip (and its container) for a torn-off item dropped at
    /// `at`.  The item is moved into the returned strip's container.
    fn new_strip_for_dragged_item(&self, _item: &ItemRef, _at: Point) -> Option<TabBarControl> {
        None
    }

    /// The last item left the strip.  Returning true asks the host to close
    /// the window.
    fn close_window_for_last_item(&self, _item: &TabItem) -> bool {
        false
    }

    fn validate_overflow_menu_item(&self, _item: &TabItem) -> bool {
        true
    }

    fn tab_bar_did_hide(&self) {}

    fn tab_bar_did_unhide(&self) {}

    fn tooltip_for_item(&self, _item: &TabItem) -> Option<String> {
        None
    }

    fn accessibility_string(&self, _object_count: u32) -> Option<String> {
        None
    }

    fn double_click_item(&self, _item: &TabItem) {}

    fn double_click_tab_bar(&self) {}
}

/// Delegate used while the host has installed none.
#[derive(Debug, Default)]
pub struct DefaultDelegate;

impl TabBarDelegate for DefaultDelegate {}
