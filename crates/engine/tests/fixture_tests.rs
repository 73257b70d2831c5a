use std::sync::Arc;

use navtree_engine::{ControllerOptions, ListValue, NavigationController, find_menu_node, visible_rows};
use navtree_types::{LoadPhase, MENU_NAME_PLACEHOLDER, MenuTreeNode, RawObject};
use navtree_util::{JsonFileStore, MenuStateStore};
use tempfile::tempdir;

fn load_fixture(json: &str) -> Vec<RawObject> {
    serde_json::from_str(json).expect("parse fixture")
}

fn menus() -> ListValue<RawObject> {
    ListValue::Available(load_fixture(include_str!("data/menus.json")))
}

fn resources() -> ListValue<RawObject> {
    ListValue::Available(load_fixture(include_str!("data/resources.json")))
}

fn ids(nodes: &[MenuTreeNode]) -> Vec<&str> {
    nodes.iter().map(MenuTreeNode::menu_id).collect()
}

fn file_store(path: &std::path::Path) -> MenuStateStore {
    MenuStateStore::new(Arc::new(JsonFileStore::new(Some(path.to_path_buf())).expect("open store")))
}

fn ready_controller(store: MenuStateStore) -> NavigationController {
    let mut controller = NavigationController::new(store, ControllerOptions::default());
    controller.on_data_source(&menus(), &resources());
    assert_eq!(controller.phase(), &LoadPhase::Ready);
    controller
}

#[test]
fn builds_expected_tree_from_fixture() {
    let dir = tempdir().unwrap();
    let controller = ready_controller(file_store(&dir.path().join("storage.json")));
    let tree = controller.menu_tree();

    assert_eq!(ids(tree), ["M100", "M210", "M400"], "home, hidden and disabled menus are dropped");
    assert_eq!(ids(&tree[0].children), ["M120", "M110"]);
    assert_eq!(ids(&tree[0].children[1].children), ["M111"]);
    assert_eq!(tree[2].record.menu_name, MENU_NAME_PLACEHOLDER);
}

#[test]
fn resource_attributes_are_joined() {
    let dir = tempdir().unwrap();
    let controller = ready_controller(file_store(&dir.path().join("storage.json")));
    let tree = controller.menu_tree();

    let orders = find_menu_node(tree, "M110").expect("orders present");
    assert_eq!(orders.record.page_url.as_deref(), Some("Sales.Orders_Overview"));
    assert_eq!(orders.record.icon_class.as_deref(), Some("glyphicon-list"));

    let users = find_menu_node(tree, "M210").expect("users present");
    assert_eq!(users.record.resource_type.as_deref(), Some("PAGE"));

    let sales = find_menu_node(tree, "M100").expect("sales present");
    assert!(sales.record.page_url.is_none());
}

#[test]
fn state_survives_reload_through_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut session = ready_controller(file_store(&path));
    session.on_toggle_expand("M100");
    session.on_toggle_expand("M110");
    session.on_menu_click("M111");
    drop(session);

    let reloaded = ready_controller(file_store(&path));
    assert_eq!(reloaded.active_menu_id(), Some("M111"));

    let rows = visible_rows(reloaded.menu_tree(), reloaded.active_menu_id(), 3);
    let drawn: Vec<&str> = rows.iter().map(|row| row.node.menu_id()).collect();
    assert_eq!(drawn, ["M100", "M120", "M110", "M111", "M210", "M400"]);
    assert!(rows[3].is_active);
}

#[test]
fn corrupt_storage_file_starts_clean() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{ definitely not json").unwrap();

    let controller = ready_controller(file_store(&path));
    assert!(controller.active_menu_id().is_none());
    assert!(controller.menu_tree().iter().all(|node| !node.is_expanded));
}
