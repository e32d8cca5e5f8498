//! Drag coordinator: the press / drag / release state machine.
//!
//! One coordinator serves every strip of a [`TabStrips`](crate::TabStrips)
//! registry.  It is driven by discrete pointer events and touches strips
//! only through the sequence operations they expose; the containers are
//! mutated exclusively on a successful drop.

mod payload;

pub use payload::{DragPayload, TAB_ITEM_TYPE};

use crate::core::{ItemId, ItemRef, Point};
use crate::strip::cell::TabCell;
use crate::strip::delegate::TearOffImage;
use crate::strip::style::DragImage;
use crate::strip::{StripId, TabBarControl};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Dropped,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Button down on a cell, threshold not yet exceeded.
    Pressed,
    DraggingInStrip,
    /// Outside the origin strip, over `destination` when it accepts the
    /// item.
    DraggingCrossStrip {
        destination: Option<StripId>,
    },
    TearingOff,
    Terminated(DragOutcome),
}

impl DragPhase {
    pub fn is_dragging(self) -> bool {
        matches!(
            self,
            DragPhase::DraggingInStrip | DragPhase::DraggingCrossStrip { .. }
        )
    }
}

/// Result of a release, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// The press never became a drag.
    Click { strip: StripId, item: ItemId },
    Dropped { strip: StripId, index: usize },
    /// The item moved into a newly created strip.
    TornOff(StripId),
    Cancelled,
}

/// Release result before the registry has adopted a torn-off strip.
pub(crate) enum Release {
    End(DragEnd),
    TornOff(Box<TabBarControl>),
}

/// Transient state of one press-drag-release sequence.
pub struct DragSession {
    item: ItemRef,
    origin: StripId,
    origin_index: usize,
    /// Display order of the origin strip at press time.
    origin_order: Vec<ItemId>,
    /// The dragged cell while it is out of the origin's sequence.
    detached: Option<TabCell>,
    press: Point,
    pointer: Point,
    /// Pointer position relative to the cell's origin at press time.
    grab_offset: Point,
    image: Option<DragImage>,
    tear_off: Option<TearOffImage>,
    /// `should_drag_item` said no; the press degrades to a click.
    vetoed: bool,
    began: bool,
}

impl DragSession {
    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    pub fn origin(&self) -> StripId {
        self.origin
    }

    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    pub fn image(&self) -> Option<&DragImage> {
        self.image.as_ref()
    }

    pub fn tear_off_image(&self) -> Option<&TearOffImage> {
        self.tear_off.as_ref()
    }

    /// Pasteboard payload describing the dragged tab.
    pub fn payload(&self) -> DragPayload {
        DragPayload::TabItem {
            strip: self.origin,
            item: self.item.id(),
        }
    }
}

#[derive(Default)]
pub struct DragCoordinator {
    phase: DragPhase,
    session: Option<DragSession>,
    threshold: f64,
}

fn find(strips: &mut [TabBarControl], id: StripId) -> Option<&mut TabBarControl> {
    strips.iter_mut().find(|s| s.id() == id)
}

/// Strip under `p` that currently takes pointer input.
pub(crate) fn strip_at(strips: &[TabBarControl], p: Point) -> Option<StripId> {
    strips
        .iter()
        .find(|s| s.accepts_input() && s.bounds().contains(p))
        .map(|s| s.id())
}

impl DragCoordinator {
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether a session holds the strips (pressed or dragging).
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    fn set_phase(&mut self, phase: DragPhase) {
        if self.phase != phase {
            log::debug!("drag: {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Button down on the body of cell `index` of `strip`.
    pub(crate) fn press(
        &mut self,
        strips: &mut [TabBarControl],
        strip: StripId,
        index: usize,
        p: Point,
    ) {
        if self.is_active() {
            return;
        }
        let Some(origin) = find(strips, strip) else {
            return;
        };
        let Some(cell) = origin.cell(index) else {
            return;
        };
        let item = cell.item().clone();
        let grab_offset = cell
            .frame()
            .map_or(Point::new(0.0, 0.0), |f| Point::new(p.x - f.x, p.y - f.y));
        self.threshold = origin.config().drag_threshold;
        self.session = Some(DragSession {
            item,
            origin: strip,
            origin_index: index,
            origin_order: origin.order(),
            detached: None,
            press: p,
            pointer: p,
            grab_offset,
            image: None,
            tear_off: None,
            vetoed: false,
            began: false,
        });
        for s in strips.iter_mut() {
            s.begin_session();
        }
        self.set_phase(DragPhase::Pressed);
    }

    /// Pointer moved with the button held.  Returns whether the event was
    /// consumed by the session.
    pub(crate) fn pointer_moved(&mut self, strips: &mut [TabBarControl], p: Point) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.pointer = p;
        let (item, origin_id) = (session.item.clone(), session.origin);

        let origin_alive = strips
            .iter()
            .any(|s| s.id() == origin_id && s.container_alive());
        if !origin_alive {
            log::warn!("drag: origin container lost, cancelling");
            self.cancel(strips);
            return true;
        }

        match self.phase {
            DragPhase::Pressed => {
                if session.vetoed || session.press.distance_to(p) <= self.threshold {
                    return true;
                }
                let Some(origin) = find(strips, origin_id) else {
                    return true;
                };
                if !origin.delegate().should_drag_item(&item, origin_id) {
                    log::debug!("drag: {} vetoed by delegate", item.id());
                    session.vetoed = true;
                    return true;
                }
                session.image = origin.drag_image(item.id());
                session.tear_off = origin.delegate().tear_off_image(&item);
                session.began = true;
                origin.set_dragging(item.id(), true);
                origin.delegate().drag_did_begin(&item);
                self.set_phase(DragPhase::DraggingInStrip);
                self.track(strips, p);
                true
            }
            DragPhase::DraggingInStrip | DragPhase::DraggingCrossStrip { .. } => {
                self.track(strips, p);
                true
            }
            _ => false,
        }
    }

    fn accepts(strips: &[TabBarControl], id: StripId, item: &ItemRef) -> bool {
        strips.iter().find(|s| s.id() == id).is_some_and(|s| {
            s.container_alive()
                && s.index_of(item.id()).is_none()
                && s.delegate().should_drop_item(item, id)
        })
    }

    fn track(&mut self, strips: &mut [TabBarControl], p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let item = session.item.clone();
        let id = item.id();
        let origin_id = session.origin;
        let over = strip_at(strips, p);

        match self.phase {
            DragPhase::DraggingInStrip => {
                if over == Some(origin_id) {
                    if let Some(origin) = find(strips, origin_id) {
                        origin.live_reorder(id, p);
                    }
                    return;
                }
                session.detached = find(strips, origin_id).and_then(|o| o.detach_cell(id));
                let destination = over.filter(|d| Self::accepts(strips, *d, &item));
                if let Some(dest) = destination.and_then(|d| find(strips, d)) {
                    dest.insert_placeholder(item.clone(), p);
                }
                self.set_phase(DragPhase::DraggingCrossStrip { destination });
            }
            DragPhase::DraggingCrossStrip { destination } => {
                if over == Some(origin_id) {
                    if let Some(dest) = destination.and_then(|d| find(strips, d)) {
                        dest.remove_placeholder(id);
                    }
                    let detached = session.detached.take();
                    if let (Some(cell), Some(origin)) = (detached, find(strips, origin_id)) {
                        origin.reattach_cell(cell, p);
                        origin.set_dragging(id, true);
                    }
                    self.set_phase(DragPhase::DraggingInStrip);
                    return;
                }
                let target = over.filter(|d| Self::accepts(strips, *d, &item));
                if target == destination {
                    if let Some(dest) = target.and_then(|d| find(strips, d)) {
                        dest.live_reorder(id, p);
                    }
                    return;
                }
                if let Some(dest) = destination.and_then(|d| find(strips, d)) {
                    dest.remove_placeholder(id);
                }
                if let Some(dest) = target.and_then(|d| find(strips, d)) {
                    dest.insert_placeholder(item.clone(), p);
                }
                self.set_phase(DragPhase::DraggingCrossStrip {
                    destination: target,
                });
            }
            _ => {}
        }
    }

    /// Button released.
    pub(crate) fn release(&mut self, strips: &mut [TabBarControl], p: Point) -> Option<Release> {
        let session = self.session.as_mut()?;
        session.pointer = p;
        let item = session.item.clone();
        let origin_id = session.origin;

        match self.phase {
            DragPhase::Pressed => {
                self.session = None;
                for s in strips.iter_mut() {
                    s.end_session();
                }
                self.set_phase(DragPhase::Idle);
                Some(Release::End(DragEnd::Click {
                    strip: origin_id,
                    item: item.id(),
                }))
            }
            DragPhase::DraggingInStrip => {
                let Some(origin) = find(strips, origin_id) else {
                    return Some(self.cancel(strips));
                };
                if !origin.container_holds(item.id()) {
                    log::warn!("drag: {} left its container, cancelling", item.id());
                    return Some(self.cancel(strips));
                }
                origin.delegate().will_drop_item(&item, origin_id);
                let Some(index) = origin.commit_reorder(item.id()) else {
                    return Some(self.cancel(strips));
                };
                origin.delegate().did_drop_item(&item, origin_id);
                self.terminate(strips, DragOutcome::Dropped);
                Some(Release::End(DragEnd::Dropped {
                    strip: origin_id,
                    index,
                }))
            }
            DragPhase::DraggingCrossStrip {
                destination: Some(dest_id),
            } => {
                let origin_ready = strips
                    .iter()
                    .any(|s| s.id() == origin_id && s.container_holds(item.id()));
                let dest_ready = strips
                    .iter()
                    .any(|s| s.id() == dest_id && s.container_alive());
                if !(origin_ready && dest_ready) {
                    log::warn!("drag: container lost before drop, cancelling");
                    return Some(self.cancel(strips));
                }
                if let Some(dest) = find(strips, dest_id) {
                    dest.delegate().will_drop_item(&item, dest_id);
                }
                let removed = find(strips, origin_id).is_some_and(|o| o.commit_removal(&item));
                if !removed {
                    return Some(self.cancel(strips));
                }
                let index = find(strips, dest_id).and_then(|d| d.commit_placeholder(item.id()));
                let Some(index) = index else {
                    log::warn!("drag: {} could not be placed in {dest_id}", item.id());
                    return Some(self.cancel(strips));
                };
                if let Some(dest) = find(strips, dest_id) {
                    dest.delegate().did_drop_item(&item, dest_id);
                }
                self.terminate(strips, DragOutcome::Dropped);
                Some(Release::End(DragEnd::Dropped {
                    strip: dest_id,
                    index,
                }))
            }
            DragPhase::DraggingCrossStrip { destination: None } => {
                if strip_at(strips, p).is_some() {
                    log::debug!("drag: {} released over a refusing strip", item.id());
                    return Some(self.cancel(strips));
                }
                if !strips
                    .iter()
                    .any(|s| s.id() == origin_id && s.container_holds(item.id()))
                {
                    log::warn!("drag: {} left its container, cancelling", item.id());
                    return Some(self.cancel(strips));
                }
                self.set_phase(DragPhase::TearingOff);
                let new_strip = find(strips, origin_id)
                    .and_then(|o| o.delegate().new_strip_for_dragged_item(&item, p));
                let Some(mut new_strip) = new_strip else {
                    log::debug!("drag: no strip for torn-off {}, cancelling", item.id());
                    return Some(self.cancel(strips));
                };
                let removed = find(strips, origin_id).is_some_and(|o| o.commit_removal(&item));
                if !removed {
                    return Some(self.cancel(strips));
                }
                new_strip.adopt_item(item.clone());
                self.terminate(strips, DragOutcome::Dropped);
                Some(Release::TornOff(Box::new(new_strip)))
            }
            _ => None,
        }
    }

    /// Aborts the session, rolling every strip back to its pre-press
    /// sequence.  The containers are never touched.
    pub(crate) fn cancel(&mut self, strips: &mut [TabBarControl]) -> Release {
        if let Some(session) = self.session.as_mut() {
            let id = session.item.id();
            if let DragPhase::DraggingCrossStrip {
                destination: Some(dest),
            } = self.phase
                && let Some(dest) = find(strips, dest)
            {
                dest.remove_placeholder(id);
            }
            let detached = session.detached.take();
            let order = std::mem::take(&mut session.origin_order);
            if let Some(origin) = find(strips, session.origin) {
                origin.restore_order(&order, detached);
            }
        }
        self.terminate(strips, DragOutcome::Cancelled);
        Release::End(DragEnd::Cancelled)
    }

    fn terminate(&mut self, strips: &mut [TabBarControl], outcome: DragOutcome) {
        if let Some(session) = self.session.take()
            && session.began
            && let Some(origin) = find(strips, session.origin)
        {
            origin.delegate().drag_did_end(&session.item);
        }
        for s in strips.iter_mut() {
            s.end_session();
        }
        self.set_phase(DragPhase::Terminated(outcome));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drag_coordinator.rs"]
mod tests;
