//! Externally owned tab items and their observable display properties.
//!
//! A [`TabItem`] is shared between the host's container and every strip
//! that shows it.  Strips never copy display state out of an item: cells
//! read it through the shared handle, and setters raise the "needs layout"
//! flag of every strip bound to the item so that a change propagates
//! without polling.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use super::Color;

/// Shared handle to an externally owned tab item.
pub type ItemRef = Rc<TabItem>;

/// Stable identifier of a tab item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display attributes of a tab item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemProps {
    pub label: String,
    pub tooltip: Option<String>,
    /// Icon name resolved by the style; `None` means no icon slot.
    pub icon: Option<String>,
    pub processing: bool,
    pub object_count: u32,
    pub color: Option<Color>,
}

#[derive(Debug)]
pub struct TabItem {
    id: ItemId,
    props: RefCell<ItemProps>,
    revision: Cell<u64>,
    observers: RefCell<Vec<Weak<Cell<bool>>>>,
}

impl TabItem {
    pub fn new(id: ItemId, label: impl Into<String>) -> ItemRef {
        Self::with_props(
            id,
            ItemProps {
                label: label.into(),
                ..ItemProps::default()
            },
        )
    }

    pub fn with_props(id: ItemId, props: ItemProps) -> ItemRef {
        Rc::new(TabItem {
            id,
            props: RefCell::new(props),
            revision: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Monotonic counter bumped on every effective property change.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Snapshot of all display properties.
    pub fn props(&self) -> ItemProps {
        self.props.borrow().clone()
    }

    pub fn label(&self) -> String {
        self.props.borrow().label.clone()
    }

    pub fn tooltip(&self) -> Option<String> {
        self.props.borrow().tooltip.clone()
    }

    pub fn icon(&self) -> Option<String> {
        self.props.borrow().icon.clone()
    }

    pub fn is_processing(&self) -> bool {
        self.props.borrow().processing
    }

    pub fn object_count(&self) -> u32 {
        self.props.borrow().object_count
    }

    pub fn color(&self) -> Option<Color> {
        self.props.borrow().color
    }

    pub fn set_label(&self, label: impl Into<String>) {
        let label = label.into();
        self.update(|p| p.label = label);
    }

    pub fn set_tooltip(&self, tooltip: Option<String>) {
        self.update(|p| p.tooltip = tooltip);
    }

    pub fn set_icon(&self, icon: Option<String>) {
        self.update(|p| p.icon = icon);
    }

    pub fn set_processing(&self, processing: bool) {
        self.update(|p| p.processing = processing);
    }

    pub fn set_object_count(&self, count: u32) {
        self.update(|p| p.object_count = count);
    }

    pub fn set_color(&self, color: Option<Color>) {
        self.update(|p| p.color = color);
    }

    fn update(&self, f: impl FnOnce(&mut ItemProps)) {
        let changed = {
            let mut props = self.props.borrow_mut();
            let before = props.clone();
            f(&mut props);
            *props != before
        };
        if changed {
            self.revision.set(self.revision.get() + 1);
            self.notify();
        }
    }

    /// Registers a strip's "needs layout" flag.  Registering twice is a no-op.
    pub(crate) fn observe(&self, flag: &Rc<Cell<bool>>) {
        let mut observers = self.observers.borrow_mut();
        observers.retain(|w| w.strong_count() > 0);
        if !observers
            .iter()
            .any(|w| w.upgrade().is_some_and(|f| Rc::ptr_eq(&f, flag)))
        {
            observers.push(Rc::downgrade(flag));
        }
    }

    pub(crate) fn unobserve(&self, flag: &Rc<Cell<bool>>) {
        self.observers
            .borrow_mut()
            .retain(|w| w.upgrade().is_some_and(|f| !Rc::ptr_eq(&f, flag)));
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    fn notify(&self) {
        let mut observers = self.observers.borrow_mut();
        observers.retain(|w| match w.upgrade() {
            Some(flag) => {
                flag.set(true);
                true
            }
            None => false,
        });
    }
}
