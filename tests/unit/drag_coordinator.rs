use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::TabStrips;
use crate::config::StripConfig;
use crate::core::{Rect, TabItem};
use crate::input::StripInput;
use crate::strip::container::{TabContainer, VecContainer};
use crate::strip::delegate::TabBarDelegate;

#[derive(Default)]
struct Recorder {
    refuse_drag: bool,
    log: RefCell<Vec<String>>,
}

impl Recorder {
    fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl TabBarDelegate for Recorder {
    fn should_drag_item(&self, _item: &TabItem, _strip: StripId) -> bool {
        !self.refuse_drag
    }

    fn drag_did_begin(&self, item: &TabItem) {
        self.log.borrow_mut().push(format!("begin {}", item.id()));
    }

    fn will_drop_item(&self, item: &TabItem, destination: StripId) {
        self.log
            .borrow_mut()
            .push(format!("will drop {} on {destination}", item.id()));
    }

    fn did_drop_item(&self, item: &TabItem, destination: StripId) {
        self.log
            .borrow_mut()
            .push(format!("did drop {} on {destination}", item.id()));
    }

    fn drag_did_end(&self, item: &TabItem) {
        self.log.borrow_mut().push(format!("end {}", item.id()));
    }
}

fn config() -> StripConfig {
    StripConfig {
        cell_min_width: 50,
        cell_optimum_width: 100,
        cell_max_width: 200,
        ..StripConfig::default()
    }
}

struct Fixture {
    strips: TabStrips,
    id: StripId,
    container: Rc<RefCell<VecContainer>>,
}

/// One strip of three 100px cells at x = 0, 100 and 200.
fn fixture() -> Fixture {
    let items = (0..3)
        .map(|i| TabItem::new(ItemId(i), format!("tab {i}")))
        .collect();
    let container = Rc::new(RefCell::new(VecContainer::new(items)));
    let mut strip = TabBarControl::new(config(), container.clone());
    strip.set_frame(Rect::new(0.0, 0.0, 600.0, 22.0));
    let mut strips = TabStrips::new();
    let id = strips.add(strip);
    Fixture {
        strips,
        id,
        container,
    }
}

impl Fixture {
    fn strip(&self) -> &TabBarControl {
        self.strips.get(self.id).expect("strip")
    }

    fn strip_mut(&mut self) -> &mut TabBarControl {
        self.strips.get_mut(self.id).expect("strip")
    }

    fn order(&self) -> Vec<u64> {
        self.strip().order().iter().map(|id| id.0).collect()
    }

    fn container_order(&self) -> Vec<u64> {
        self.container.borrow().ids().iter().map(|id| id.0).collect()
    }

    fn install(&mut self, recorder: Recorder) -> Rc<Recorder> {
        let recorder = Rc::new(recorder);
        self.strip_mut()
            .set_delegate(Some(recorder.clone() as Rc<dyn TabBarDelegate>));
        recorder
    }

    fn phase(&self) -> DragPhase {
        self.strips.drag().phase()
    }
}

fn pt(x: f64) -> Point {
    Point::new(x, 10.0)
}

#[test]
fn press_and_small_moves_stay_pressed() {
    let mut f = fixture();
    assert!(f.strips.mouse_down(pt(50.0)));
    assert_eq!(f.phase(), DragPhase::Pressed);
    assert!(f.strip().is_session_active());

    f.strips.mouse_moved(pt(53.0));
    assert_eq!(f.phase(), DragPhase::Pressed);
    assert_eq!(f.strips.drag_overlay().map(|(p, _)| p), None);
}

#[test]
fn dragging_past_neighbour_midpoints_reorders_then_commits() {
    let mut f = fixture();
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    assert_eq!(f.phase(), DragPhase::DraggingInStrip);
    assert_eq!(f.order(), vec![0, 1, 2]);

    // Exactly on the midpoint is not past it.
    f.strips.mouse_moved(pt(150.0));
    assert_eq!(f.order(), vec![0, 1, 2]);
    f.strips.mouse_moved(pt(151.0));
    assert_eq!(f.order(), vec![1, 0, 2]);

    f.strips.mouse_moved(pt(260.0));
    assert_eq!(f.order(), vec![1, 2, 0]);
    assert_eq!(f.container_order(), vec![0, 1, 2]);
    assert!(f.strip().cells()[2].state().dragging);

    assert_eq!(
        f.strips.mouse_up(pt(260.0)),
        Some(DragEnd::Dropped {
            strip: f.id,
            index: 2
        })
    );
    assert_eq!(f.container_order(), vec![1, 2, 0]);
    assert_eq!(f.order(), vec![1, 2, 0]);
    assert_eq!(f.phase(), DragPhase::Terminated(DragOutcome::Dropped));
    assert!(!f.strips.drag().is_active());
    assert!(f.strip().cells().iter().all(|c| !c.state().dragging));
}

#[test]
fn one_large_move_swaps_repeatedly() {
    let mut f = fixture();
    f.strips.mouse_down(pt(250.0));
    f.strips.mouse_moved(pt(240.0));
    f.strips.mouse_moved(pt(20.0));
    assert_eq!(f.order(), vec![2, 0, 1]);
    assert_eq!(
        f.strips.mouse_up(pt(20.0)),
        Some(DragEnd::Dropped {
            strip: f.id,
            index: 0
        })
    );
    assert_eq!(f.container_order(), vec![2, 0, 1]);
}

#[test]
fn escape_restores_the_pre_press_sequence_exactly() {
    let mut f = fixture();
    let layout_before = f.strip().layout().clone();
    let states_before: Vec<_> = f.strip().cells().iter().map(|c| c.state()).collect();

    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.mouse_moved(pt(260.0));
    assert_eq!(f.order(), vec![1, 2, 0]);

    assert!(f.strips.handle_input(StripInput::Cancel));
    assert_eq!(f.order(), vec![0, 1, 2]);
    assert_eq!(f.container_order(), vec![0, 1, 2]);
    assert_eq!(f.strip().layout(), &layout_before);
    let states_after: Vec<_> = f.strip().cells().iter().map(|c| c.state()).collect();
    assert_eq!(states_after, states_before);
    assert_eq!(f.phase(), DragPhase::Terminated(DragOutcome::Cancelled));

    // The release that follows finds no session.
    assert_eq!(f.strips.mouse_up(pt(260.0)), None);
    assert!(!f.strips.handle_input(StripInput::Cancel));
}

#[test]
fn release_below_threshold_is_a_click_that_selects() {
    let mut f = fixture();
    f.strips.mouse_down(pt(250.0));
    f.strips.mouse_moved(pt(252.0));
    assert_eq!(
        f.strips.mouse_up(pt(252.0)),
        Some(DragEnd::Click {
            strip: f.id,
            item: ItemId(2)
        })
    );
    assert_eq!(f.strip().selected_item(), Some(ItemId(2)));
    assert_eq!(f.container.borrow().selected(), Some(ItemId(2)));
    assert_eq!(f.phase(), DragPhase::Idle);
}

#[test]
fn vetoed_drag_degrades_to_a_click() {
    let mut f = fixture();
    let recorder = f.install(Recorder {
        refuse_drag: true,
        ..Recorder::default()
    });
    f.strips.mouse_down(pt(250.0));
    f.strips.mouse_moved(pt(20.0));
    assert_eq!(f.phase(), DragPhase::Pressed);
    assert_eq!(f.order(), vec![0, 1, 2]);

    assert!(matches!(
        f.strips.mouse_up(pt(20.0)),
        Some(DragEnd::Click { item: ItemId(2), .. })
    ));
    assert_eq!(f.strip().selected_item(), Some(ItemId(2)));
    assert!(recorder.entries().is_empty());
}

#[test]
fn delegate_sees_begin_drop_and_end() {
    let mut f = fixture();
    let recorder = f.install(Recorder::default());
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.mouse_moved(pt(260.0));
    f.strips.mouse_up(pt(260.0));
    assert_eq!(
        recorder.entries(),
        vec![
            "begin #0".to_string(),
            "will drop #0 on strip 0".to_string(),
            "did drop #0 on strip 0".to_string(),
            "end #0".to_string(),
        ]
    );
}

#[test]
fn cancelled_drag_still_reports_its_end() {
    let mut f = fixture();
    let recorder = f.install(Recorder::default());
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.cancel_drag();
    assert_eq!(
        recorder.entries(),
        vec!["begin #0".to_string(), "end #0".to_string()]
    );
}

#[test]
fn losing_the_container_mid_drag_cancels() {
    let Fixture {
        mut strips,
        id,
        container,
    } = fixture();
    strips.mouse_down(pt(50.0));
    strips.mouse_moved(pt(60.0));
    strips.mouse_moved(pt(260.0));
    drop(container);

    assert!(strips.mouse_moved(pt(270.0)));
    assert_eq!(
        strips.drag().phase(),
        DragPhase::Terminated(DragOutcome::Cancelled)
    );
    let order: Vec<u64> = strips
        .get(id)
        .expect("strip")
        .order()
        .iter()
        .map(|i| i.0)
        .collect();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn changes_arriving_mid_drag_are_replayed_after_the_drop() {
    let mut f = fixture();
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.mouse_moved(pt(260.0));

    let late = TabItem::new(ItemId(9), "late");
    f.container.borrow_mut().push(late.clone());
    f.strip_mut().will_add_item(late);
    assert_eq!(f.order(), vec![1, 2, 0]);
    assert_eq!(f.strip().pending_changes().len(), 1);

    f.strips.mouse_up(pt(260.0));
    assert_eq!(f.container_order(), vec![1, 2, 0, 9]);
    assert_eq!(f.order(), vec![1, 2, 0, 9]);
}

#[test]
fn insert_ahead_of_the_dragged_tab_keeps_the_drop_in_place() {
    let mut f = fixture();
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.mouse_moved(pt(260.0));
    assert_eq!(f.order(), vec![1, 2, 0]);

    let late = TabItem::new(ItemId(9), "late");
    f.container.borrow_mut().insert_item(late.clone(), 0);
    f.strip_mut().will_insert_item(late, 0);

    assert_eq!(
        f.strips.mouse_up(pt(260.0)),
        Some(DragEnd::Dropped {
            strip: f.id,
            index: 3
        })
    );
    assert_eq!(f.container_order(), vec![9, 1, 2, 0]);
    assert_eq!(f.order(), f.container_order());
}

#[test]
fn removal_ahead_of_the_dragged_tab_keeps_the_drop_in_place() {
    let mut f = fixture();
    f.strips.mouse_down(pt(250.0));
    f.strips.mouse_moved(pt(240.0));
    f.strips.mouse_moved(pt(20.0));
    assert_eq!(f.order(), vec![2, 0, 1]);

    f.container.borrow_mut().remove_item(ItemId(0));
    f.strip_mut().will_remove_item(ItemId(0));

    assert_eq!(
        f.strips.mouse_up(pt(20.0)),
        Some(DragEnd::Dropped {
            strip: f.id,
            index: 0
        })
    );
    assert_eq!(f.container_order(), vec![2, 1]);
    assert_eq!(f.order(), f.container_order());
}

#[test]
fn click_selects_the_pressed_tab_after_an_insert_ahead_of_it() {
    let mut f = fixture();
    f.strips.mouse_down(pt(150.0));

    let late = TabItem::new(ItemId(9), "late");
    f.container.borrow_mut().insert_item(late.clone(), 0);
    f.strip_mut().will_insert_item(late, 0);

    assert_eq!(
        f.strips.mouse_up(pt(150.0)),
        Some(DragEnd::Click {
            strip: f.id,
            item: ItemId(1)
        })
    );
    assert_eq!(f.strip().selected_item(), Some(ItemId(1)));
    assert_eq!(f.container.borrow().selected(), Some(ItemId(1)));
    assert_eq!(f.order(), vec![9, 0, 1, 2]);
    assert_eq!(f.order(), f.container_order());
}

#[test]
fn click_selects_the_pressed_tab_after_a_removal_ahead_of_it() {
    let mut f = fixture();
    f.strips.mouse_down(pt(250.0));

    f.container.borrow_mut().remove_item(ItemId(0));
    f.strip_mut().will_remove_item(ItemId(0));

    assert_eq!(
        f.strips.mouse_up(pt(250.0)),
        Some(DragEnd::Click {
            strip: f.id,
            item: ItemId(2)
        })
    );
    assert_eq!(f.strip().selected_item(), Some(ItemId(2)));
    assert_eq!(f.container.borrow().selected(), Some(ItemId(2)));
    assert_eq!(f.order(), vec![1, 2]);
}

#[test]
fn dragged_tab_removed_by_the_host_cancels_without_drop_callbacks() {
    let mut f = fixture();
    let recorder = f.install(Recorder::default());
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.mouse_moved(pt(260.0));

    f.container.borrow_mut().remove_item(ItemId(0));
    f.strip_mut().will_remove_item(ItemId(0));

    assert_eq!(f.strips.mouse_up(pt(260.0)), Some(DragEnd::Cancelled));
    assert_eq!(f.phase(), DragPhase::Terminated(DragOutcome::Cancelled));
    assert_eq!(
        recorder.entries(),
        vec!["begin #0".to_string(), "end #0".to_string()]
    );
    assert_eq!(f.container_order(), vec![1, 2]);
    assert_eq!(f.order(), f.container_order());
}

#[test]
fn session_exposes_payload_and_overlay() {
    let mut f = fixture();
    f.strips.mouse_down(pt(50.0));
    f.strips.mouse_moved(pt(60.0));
    f.strips.mouse_moved(pt(260.0));

    let session = f.strips.drag().session().expect("session");
    assert_eq!(session.origin(), f.id);
    assert_eq!(session.origin_index(), 0);
    assert_eq!(
        session.payload(),
        DragPayload::TabItem {
            strip: f.id,
            item: ItemId(0)
        }
    );

    let (origin, image) = f.strips.drag_overlay().expect("overlay");
    assert_eq!(origin, Point::new(210.0, 0.0));
    assert_eq!(image.size, (100.0, 22.0));
}

#[test]
fn press_outside_any_strip_starts_nothing() {
    let mut f = fixture();
    assert!(!f.strips.mouse_down(Point::new(50.0, 200.0)));
    assert!(!f.strips.drag().is_active());
    assert_eq!(f.phase(), DragPhase::Idle);
}
