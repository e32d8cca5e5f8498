//! The tab bar control.
//!
//! [`TabBarControl`] mirrors an external [`TabContainer`] as an ordered
//! run of [`TabCell`]s, lays them out, tracks hover and close-button
//! interaction, and animates hiding and showing.  Drags that may cross
//! strips are driven from outside by the [`DragCoordinator`] owned by
//! [`TabStrips`].
//!
//! [`DragCoordinator`]: crate::drag::DragCoordinator
//! [`TabStrips`]: crate::TabStrips

pub mod animation;
pub mod cell;
pub mod container;
pub mod delegate;
pub mod layout;
pub mod overflow;
pub mod style;

mod manage;
mod mouse;
mod reorder;
mod scene;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use winit::keyboard::ModifiersState;

use crate::config::{CloseButtonPolicy, StripConfig, TabLocation};
use crate::core::{Color, ItemId, ItemRef, Orientation, Point, Rect};

use self::animation::{AnimatorEvent, Clock, HideShowAnimator, SlideAnimation, SystemClock};
use self::cell::{TabCell, assign_roles};
use self::container::TabContainer;
use self::delegate::{ContextMenu, DefaultDelegate, TabBarDelegate};
use self::layout::{StripLayout, compute_layout};
use self::overflow::OverflowMenu;
use self::style::{CellView, DefaultStyle, TabStyle};

pub use self::manage::PendingChange;
pub use self::mouse::PressOutcome;

/// Frame interval requested while a slide animation runs.
const SLIDE_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Identifier of a strip within a [`TabStrips`](crate::TabStrips) registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct StripId(pub u32);

impl std::fmt::Display for StripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "strip {}", self.0)
    }
}

/// Actions the strip cannot perform itself, drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum StripRequest {
    AddTabClicked,
    /// Show the overflow popup anchored at the overflow button.
    OverflowMenuRequested { anchor: Rect },
    ContextMenuRequested {
        item: ItemId,
        menu: ContextMenu,
        at: Point,
    },
    /// The last item left and the delegate asked for the window to close.
    CloseWindow,
    /// The user resized a vertical strip to `width`.
    Resized { width: f64 },
}

pub struct TabBarControl {
    id: StripId,
    config: StripConfig,
    /// Full frame of the shown strip.
    frame: Rect,
    cells: Vec<TabCell>,
    selected: Option<ItemId>,
    layout: StripLayout,
    /// Raised by bound items when a display property changes.
    needs_layout: Rc<Cell<bool>>,
    container: Weak<RefCell<dyn TabContainer>>,
    style: Rc<dyn TabStyle>,
    delegate: Rc<dyn TabBarDelegate>,
    overflow: OverflowMenu,
    animator: HideShowAnimator,
    clock: Rc<dyn Clock>,
    slide: Option<SlideAnimation>,
    modifier: ModifiersState,
    pointer: mouse::PointerState,
    session_active: bool,
    pending: Vec<PendingChange>,
    requests: Vec<StripRequest>,
}

impl TabBarControl {
    pub fn new(config: StripConfig, container: Rc<RefCell<dyn TabContainer>>) -> Self {
        Self::with_clock(config, container, Rc::new(SystemClock))
    }

    pub fn with_clock(
        config: StripConfig,
        container: Rc<RefCell<dyn TabContainer>>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let config = config.sanitized();
        let frame = Rect::new(0.0, 0.0, 0.0, config.thickness());
        let mut strip = Self {
            id: StripId::default(),
            animator: HideShowAnimator::new(&config.hide_animation),
            config,
            frame,
            cells: Vec::new(),
            selected: None,
            layout: StripLayout::default(),
            needs_layout: Rc::new(Cell::new(true)),
            container: Rc::downgrade(&container),
            style: Rc::new(DefaultStyle),
            delegate: Rc::new(DefaultDelegate),
            overflow: OverflowMenu::default(),
            clock,
            slide: None,
            modifier: ModifiersState::empty(),
            pointer: mouse::PointerState::default(),
            session_active: false,
            pending: Vec::new(),
            requests: Vec::new(),
        };
        strip.reload_from_container();
        strip
    }

    pub fn id(&self) -> StripId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: StripId) {
        self.id = id;
    }

    // ── Configuration ────────────────────────────────────────────────

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: StripConfig) {
        self.config = config.sanitized();
        self.animator.reconfigure(&self.config.hide_animation);
        for cell in &self.cells {
            cell.invalidate_width();
        }
        self.relayout();
        self.update_auto_hide();
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        if self.frame != frame {
            self.frame = frame;
            self.relayout();
        }
    }

    /// Current bounds, collapsed along the cross axis while hidden or
    /// animating.
    pub fn bounds(&self) -> Rect {
        let f = self.frame;
        let fraction = self.animator.visible_fraction();
        match self.config.orientation {
            Orientation::Horizontal => {
                let h = (f.h * fraction).floor();
                let y = match self.config.tab_location {
                    TabLocation::Bottom => f.max_y() - h,
                    _ => f.y,
                };
                Rect::new(f.x, y, f.w, h)
            }
            Orientation::Vertical => Rect::new(f.x, f.y, (f.w * fraction).floor(), f.h),
        }
    }

    /// Cross-axis size for layout-dependent siblings; `None` while a
    /// hide/show transition is running.
    pub fn stable_size(&self) -> Option<f64> {
        if self.animator.is_animating() {
            return None;
        }
        Some(self.bounds().cross_len(self.config.orientation))
    }

    // ── Style and delegate ───────────────────────────────────────────

    pub fn style(&self) -> &Rc<dyn TabStyle> {
        &self.style
    }

    /// Installs a style; every cached width is dropped and the strip is
    /// laid out again.
    pub fn set_style(&mut self, style: Rc<dyn TabStyle>) {
        log::debug!("{}: style set to {}", self.id, style.name());
        self.style = style;
        for cell in &self.cells {
            cell.invalidate_width();
        }
        self.relayout();
    }

    pub fn delegate(&self) -> &Rc<dyn TabBarDelegate> {
        &self.delegate
    }

    /// Installs a delegate, or restores the allow-everything default.
    pub fn set_delegate(&mut self, delegate: Option<Rc<dyn TabBarDelegate>>) {
        self.delegate = delegate.unwrap_or_else(|| Rc::new(DefaultDelegate));
    }

    pub fn accessory_text_color(&self) -> Color {
        self.style.accessory_text_color()
    }

    // ── Cells ────────────────────────────────────────────────────────

    pub fn cells(&self) -> &[TabCell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&TabCell> {
        self.cells.get(index)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.cells.iter().position(|c| c.item_id() == id)
    }

    /// Items in display order, excluding cross-strip placeholders.
    pub fn represented_items(&self) -> Vec<ItemRef> {
        self.cells
            .iter()
            .filter(|c| !c.is_placeholder())
            .map(|c| c.item().clone())
            .collect()
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn number_of_visible_tabs(&self) -> usize {
        self.layout.visible
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    pub fn overflow_menu(&self) -> &OverflowMenu {
        &self.overflow
    }

    pub fn add_tab_button(&self) -> Option<Rect> {
        self.layout.add_button
    }

    pub fn overflow_button(&self) -> Option<Rect> {
        self.layout.overflow_button
    }

    pub fn tab_color(&self, id: ItemId) -> Option<Color> {
        let index = self.index_of(id)?;
        self.cells[index].item().color()
    }

    /// Sets the custom color of `id`; the bound item notifies every strip
    /// showing it.
    pub fn set_tab_color(&mut self, id: ItemId, color: Option<Color>) {
        if let Some(index) = self.index_of(id) {
            self.cells[index].item().set_color(color);
        }
    }

    // ── Modifier shortcuts ───────────────────────────────────────────

    pub fn modifier(&self) -> ModifiersState {
        self.modifier
    }

    /// Sets the modifier that, with a digit, switches tabs.  The first nine
    /// cells show the combination.
    pub fn set_modifier(&mut self, modifier: ModifiersState) {
        if self.modifier != modifier {
            self.modifier = modifier;
            self.assign_shortcuts();
        }
    }

    pub fn modifier_string(&self) -> String {
        let mut out = String::new();
        if self.modifier.control_key() {
            out.push('⌃');
        }
        if self.modifier.alt_key() {
            out.push('⌥');
        }
        if self.modifier.shift_key() {
            out.push('⇧');
        }
        if self.modifier.super_key() {
            out.push('⌘');
        }
        out
    }

    fn assign_shortcuts(&mut self) {
        let prefix = self.modifier_string();
        for (i, cell) in self.cells.iter_mut().enumerate() {
            cell.shortcut = (!prefix.is_empty() && i < 9 && !cell.state.overflowed)
                .then(|| format!("{prefix}{}", i + 1));
        }
    }

    // ── Requests ─────────────────────────────────────────────────────

    pub fn take_requests(&mut self) -> Vec<StripRequest> {
        std::mem::take(&mut self.requests)
    }

    // ── Layout ───────────────────────────────────────────────────────

    pub fn needs_layout(&self) -> bool {
        self.needs_layout.get()
    }

    pub fn layout_if_needed(&mut self) {
        if self.needs_layout.get() {
            self.relayout();
        }
    }

    pub(crate) fn cell_view(&self, index: usize) -> Option<CellView<'_>> {
        let cell = self.cells.get(index)?;
        Some(CellView {
            item: cell.item(),
            frame: cell.frame.unwrap_or(Rect::ZERO),
            state: cell.state,
            close_button: self.close_button_visible(index),
            shortcut: cell.shortcut(),
            orientation: self.config.orientation,
            location: self.config.tab_location,
        })
    }

    /// Runs one layout pass and recomputes every structural cell flag.
    pub(crate) fn relayout(&mut self) {
        let config = &self.config;
        let close = config.close_buttons_enabled();
        let natural: Vec<f64> = if config.size_cells_to_fit {
            self.cells
                .iter()
                .map(|cell| {
                    cell.preferred_width(|item| {
                        self.style.desired_width(&CellView {
                            item,
                            frame: Rect::ZERO,
                            state: cell.state,
                            close_button: close,
                            shortcut: cell.shortcut(),
                            orientation: config.orientation,
                            location: config.tab_location,
                        })
                    })
                })
                .collect()
        } else {
            vec![0.0; self.cells.len()]
        };

        self.layout = compute_layout(&natural, self.bounds(), &self.config);
        for (cell, frame) in self.cells.iter_mut().zip(&self.layout.frames) {
            cell.frame = *frame;
        }
        assign_roles(&mut self.cells, self.selected, self.layout.visible);
        self.assign_shortcuts();
        self.overflow.sync(
            &self.cells,
            self.selected,
            self.delegate.as_ref(),
            self.config.use_overflow_menu,
        );
        self.pointer.clamp(self.cells.len());
        self.needs_layout.set(false);
    }

    fn close_button_visible(&self, index: usize) -> bool {
        let Some(cell) = self.cells.get(index) else {
            return false;
        };
        if !self.close_button_active(index) {
            return false;
        }
        match self.config.close_button {
            CloseButtonPolicy::Always => true,
            CloseButtonPolicy::OnHover => cell.state.hovered,
            CloseButtonPolicy::Never => false,
        }
    }

    /// Whether the close button of `index` responds to the pointer,
    /// regardless of hover.
    fn close_button_active(&self, index: usize) -> bool {
        let Some(cell) = self.cells.get(index) else {
            return false;
        };
        self.config.close_buttons_enabled()
            && !cell.is_placeholder()
            && cell.frame.is_some()
            && (cell.state.selected || self.config.allows_background_tab_closing)
    }

    // ── Hide / show ──────────────────────────────────────────────────

    /// Hides or shows the strip.  Returns false when the request was a
    /// no-op.
    pub fn hide_tab_bar(&mut self, hide: bool, animate: bool) -> bool {
        let now = self.clock.now();
        match self.animator.request(hide, animate, now) {
            Some(event) => {
                self.pointer = mouse::PointerState::default();
                self.handle_animator_event(event);
                true
            }
            None => false,
        }
    }

    pub fn is_tab_bar_hidden(&self) -> bool {
        self.animator.is_hidden()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn animator(&self) -> &HideShowAnimator {
        &self.animator
    }

    /// Stops running animations where they are.  The strip stays at its
    /// settled visibility.
    pub fn stop_animations(&mut self) {
        if self.animator.is_animating() {
            log::debug!("{}: hide/show stopped", self.id);
        }
        self.animator.cancel();
        self.slide = None;
        self.relayout();
    }

    fn handle_animator_event(&mut self, event: AnimatorEvent) {
        if let AnimatorEvent::Settled { hidden } = event {
            if hidden {
                self.delegate.tab_bar_did_hide();
            } else {
                self.delegate.tab_bar_did_unhide();
            }
        }
        self.relayout();
    }

    /// Hides the strip when it holds at most one tab, if so configured.
    fn update_auto_hide(&mut self) {
        if !self.config.hide_for_single_tab {
            return;
        }
        let hide = self.cells.len() <= 1;
        if self.animator.target_hidden() != hide {
            self.hide_tab_bar(hide, self.config.automatically_animates);
        }
    }

    // ── Timing ───────────────────────────────────────────────────────

    /// Advances running animations.  Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut redraw = false;
        if let Some(event) = self.animator.tick(now) {
            self.handle_animator_event(event);
            redraw = true;
        }
        if let Some(slide) = &self.slide {
            redraw = true;
            if slide.is_finished(now) {
                self.slide = None;
            }
        }
        if self.needs_layout.get() {
            self.relayout();
            redraw = true;
        }
        redraw
    }

    /// Next instant at which [`tick`](Self::tick) has work to do.
    pub fn animation_schedule(&self) -> Option<Instant> {
        let now = self.clock.now();
        let slide = self
            .slide
            .as_ref()
            .filter(|s| !s.is_finished(now))
            .map(|_| now + SLIDE_FRAME_INTERVAL);
        match (self.animator.schedule(), slide) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Main-axis offset of `id` from its laid-out slot due to a running
    /// slide.
    pub fn slide_offset(&self, id: ItemId) -> f64 {
        let now = self.clock.now();
        self.slide
            .as_ref()
            .map_or(0.0, |slide| slide.offset_at(id, now))
    }

    // ── Tooltips and accessibility ───────────────────────────────────

    pub fn tooltip_for(&self, id: ItemId) -> Option<String> {
        let index = self.index_of(id)?;
        let cell = &self.cells[index];
        if let Some(text) = self.delegate.tooltip_for_item(cell.item()) {
            return Some(text);
        }
        if let Some(text) = cell.item().tooltip() {
            return Some(text);
        }
        // Fall back to the full title when it is drawn truncated.
        let view = self.cell_view(index)?;
        let frame = cell.frame?;
        let truncated = self.style.desired_width(&view) > frame.main_len(self.config.orientation);
        truncated.then(|| cell.item().label())
    }

    pub fn accessibility_label(&self, id: ItemId) -> Option<String> {
        let index = self.index_of(id)?;
        let item = self.cells[index].item();
        let count = item.object_count();
        if let Some(text) = self.delegate.accessibility_string(count) {
            return Some(format!("{}, {text}", item.label()));
        }
        let mut label = item.label();
        if count > 0 {
            label.push_str(&format!(", {count} items"));
        }
        if self.selected == Some(id) {
            label.push_str(", selected");
        }
        Some(label)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/strip_control.rs"]
mod tests;
