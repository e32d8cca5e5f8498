use super::*;
use crate::core::TabItem;

fn container(n: u64) -> VecContainer {
    VecContainer::new(
        (0..n)
            .map(|i| TabItem::new(ItemId(i), format!("tab {i}")))
            .collect(),
    )
}

#[test]
fn remove_only_item_returns_none() {
    assert_eq!(normalized_selection_after_remove(0, 1, 0), None);
}

#[test]
fn remove_item_before_selection_shifts_left() {
    assert_eq!(normalized_selection_after_remove(3, 5, 1), Some(2));
}

#[test]
fn remove_selected_item_clamps_to_existing_index() {
    assert_eq!(normalized_selection_after_remove(4, 5, 4), Some(3));
    assert_eq!(normalized_selection_after_remove(1, 5, 1), Some(1));
}

#[test]
fn invalid_removed_index_returns_none() {
    assert_eq!(normalized_selection_after_remove(0, 0, 0), None);
    assert_eq!(normalized_selection_after_remove(0, 3, 3), None);
}

#[test]
fn new_container_selects_first_item() {
    let c = container(3);
    assert_eq!(c.selected(), Some(ItemId(0)));
    assert!(VecContainer::default().selected().is_none());
}

#[test]
fn removing_selected_item_selects_neighbour() {
    let mut c = container(3);
    c.select_item(ItemId(2));
    c.remove_item(ItemId(2));
    assert_eq!(c.selected(), Some(ItemId(1)));
    c.remove_item(ItemId(0));
    assert_eq!(c.selected(), Some(ItemId(1)));
    c.remove_item(ItemId(1));
    assert_eq!(c.selected(), None);
    assert!(c.is_empty());
}

#[test]
fn move_item_keeps_relative_order_of_others() {
    let mut c = container(4);
    assert!(c.move_item(0, 2));
    assert_eq!(c.ids(), vec![ItemId(1), ItemId(2), ItemId(0), ItemId(3)]);
    assert!(!c.move_item(0, 9));
}

#[test]
fn replace_item_carries_selection() {
    let mut c = container(2);
    let previous = c.replace_item(0, TabItem::new(ItemId(7), "seven"));
    assert_eq!(previous.map(|p| p.id()), Some(ItemId(0)));
    assert_eq!(c.selected(), Some(ItemId(7)));
    assert!(c.replace_item(5, TabItem::new(ItemId(8), "eight")).is_none());
}

#[test]
fn insert_clamps_index() {
    let mut c = container(1);
    c.insert_item(TabItem::new(ItemId(9), "nine"), 42);
    assert_eq!(c.index_of(ItemId(9)), Some(1));
}
