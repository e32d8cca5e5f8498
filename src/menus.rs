//! Native popup menus for the overflow list and per-tab context menus.

use muda::{CheckMenuItem, Menu, MenuId, MenuItem};

use crate::core::ItemId;
use crate::strip::delegate::ContextMenu;
use crate::strip::overflow::OverflowMenu;

/// Builds the overflow popup.  The selected tab is shown checked.
pub fn build_overflow_menu(overflow: &OverflowMenu) -> (Menu, Vec<(MenuId, ItemId)>) {
    let menu = Menu::new();
    let mut action_map = Vec::new();

    for entry in overflow.entries() {
        if entry.selected {
            let item = CheckMenuItem::new(&entry.title, entry.enabled, true, None);
            action_map.push((item.id().clone(), entry.item));
            let _ = menu.append(&item);
        } else {
            let item = MenuItem::new(&entry.title, entry.enabled, None);
            action_map.push((item.id().clone(), entry.item));
            let _ = menu.append(&item);
        }
    }

    (menu, action_map)
}

/// Builds a tab's context menu from the entries its delegate supplied.
pub fn build_context_menu(context: &ContextMenu) -> (Menu, Vec<(MenuId, String)>) {
    let menu = Menu::new();
    let mut action_map = Vec::new();

    for entry in &context.entries {
        let id = MenuId::new(&entry.id);
        match entry.checked {
            Some(checked) => {
                let item =
                    CheckMenuItem::with_id(id.clone(), &entry.title, entry.enabled, checked, None);
                let _ = menu.append(&item);
            }
            None => {
                let item = MenuItem::with_id(id.clone(), &entry.title, entry.enabled, None);
                let _ = menu.append(&item);
            }
        }
        action_map.push((id, entry.id.clone()));
    }

    (menu, action_map)
}

/// Resolves a menu event id against a map built above.
pub fn lookup<T: Clone>(action_map: &[(MenuId, T)], id: &MenuId) -> Option<T> {
    action_map
        .iter()
        .find(|(menu_id, _)| menu_id == id)
        .map(|(_, action)| action.clone())
}
