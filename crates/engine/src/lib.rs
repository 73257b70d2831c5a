//! # Navtree Engine
//!
//! Turns the flat menu records exposed by a host data source into an ordered
//! menu tree and keeps the navigation UI state (expanded nodes, active menu) in
//! step with user events and durable storage.
//!
//! ## Usage
//!
//! ```rust
//! use navtree_engine::{build_menu_tree, collect_expanded_ids, toggle_menu_expand};
//! use navtree_types::MenuRecord;
//!
//! let records = vec![
//!     MenuRecord::new("orders", "Orders").with_sort_no(1.0),
//!     MenuRecord::new("open", "Open orders").with_parent("orders", 1),
//!     MenuRecord::new("stray", "Stray").with_parent("missing", 1).with_sort_no(2.0),
//! ];
//!
//! let tree = build_menu_tree(&records);
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree[0].children[0].menu_id(), "open");
//!
//! let tree = toggle_menu_expand(&tree, "orders");
//! assert!(collect_expanded_ids(&tree).contains("orders"));
//! ```
//!
//! ## Architecture
//!
//! - **`normalize`**: raw host objects to [`MenuRecord`](navtree_types::MenuRecord)
//! - **`tree`**: record list to ordered tree
//! - **`expansion`**: pure expand/collapse transforms and lookups
//! - **`controller`**: lifecycle and event handling over a persistence store
//! - **`render`**: the rows a sidebar draws, honoring the depth limit
//! - **`navigation`**: locator classification and dispatch to the host

pub mod controller;
pub mod expansion;
pub mod navigation;
pub mod normalize;
pub mod render;
pub mod tree;

pub use controller::{ControllerOptions, ListValue, NavigationController};
pub use expansion::{
    apply_expanded_set, collect_expanded_ids, count_nodes, expand_path, find_menu_node, find_menu_path, flatten_tree,
    set_all_expanded, toggle_menu_expand,
};
pub use navigation::{HOME_PAGE, NavigationSink, NavigationTarget, dispatch, navigate_home, navigate_to_locator};
pub use normalize::{index_resources, normalize_menu_record, normalize_menu_records};
pub use render::{VisibleRow, can_expand, visible_rows};
pub use tree::{TreeBuildOptions, build_menu_tree, build_menu_tree_with};
