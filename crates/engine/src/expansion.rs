//! Pure expansion-state transforms over menu trees.
//!
//! Every transform returns a new tree and leaves its input untouched. Unknown ids
//! and empty trees are not errors; the result is simply equal to the input.

use indexmap::IndexSet;
use navtree_types::MenuTreeNode;

/// Flips `is_expanded` on the node(s) whose id is `menu_id`.
pub fn toggle_menu_expand(tree: &[MenuTreeNode], menu_id: &str) -> Vec<MenuTreeNode> {
    rebuild(tree, &mut |node| {
        if node.menu_id() == menu_id {
            !node.is_expanded
        } else {
            node.is_expanded
        }
    })
}

/// Sets `is_expanded` to `expand` on every node, collapsed branches included.
pub fn set_all_expanded(tree: &[MenuTreeNode], expand: bool) -> Vec<MenuTreeNode> {
    rebuild(tree, &mut |_| expand)
}

/// Expands exactly the nodes listed in `expanded_ids` and collapses the rest.
pub fn apply_expanded_set(tree: &[MenuTreeNode], expanded_ids: &IndexSet<String>) -> Vec<MenuTreeNode> {
    rebuild(tree, &mut |node| expanded_ids.contains(node.menu_id()))
}

/// Expands every node on `path` without collapsing anything.
pub fn expand_path(tree: &[MenuTreeNode], path: &[String]) -> Vec<MenuTreeNode> {
    rebuild(tree, &mut |node| node.is_expanded || path.iter().any(|id| id == node.menu_id()))
}

/// Ids of expanded nodes in depth-first pre-order.
pub fn collect_expanded_ids(tree: &[MenuTreeNode]) -> IndexSet<String> {
    flatten_tree(tree)
        .into_iter()
        .filter(|node| node.is_expanded)
        .map(|node| node.menu_id().to_string())
        .collect()
}

/// Root-to-node id chain for `menu_id`, first depth-first match wins.
pub fn find_menu_path(tree: &[MenuTreeNode], menu_id: &str) -> Option<Vec<String>> {
    let mut path = Vec::new();
    search_path(tree, menu_id, &mut path).then_some(path)
}

/// Depth-first lookup of the node with `menu_id`.
pub fn find_menu_node<'a>(tree: &'a [MenuTreeNode], menu_id: &str) -> Option<&'a MenuTreeNode> {
    tree.iter().find_map(|node| {
        if node.menu_id() == menu_id {
            Some(node)
        } else {
            find_menu_node(&node.children, menu_id)
        }
    })
}

/// Every node in depth-first pre-order.
pub fn flatten_tree(tree: &[MenuTreeNode]) -> Vec<&MenuTreeNode> {
    let mut nodes = Vec::new();
    collect_nodes(tree, &mut nodes);
    nodes
}

pub fn count_nodes(tree: &[MenuTreeNode]) -> usize {
    tree.iter().map(|node| 1 + count_nodes(&node.children)).sum()
}

fn rebuild(tree: &[MenuTreeNode], expanded: &mut impl FnMut(&MenuTreeNode) -> bool) -> Vec<MenuTreeNode> {
    tree.iter()
        .map(|node| MenuTreeNode {
            record: node.record.clone(),
            children: rebuild(&node.children, expanded),
            is_expanded: expanded(node),
            level: node.level,
            has_children: node.has_children,
            is_visible: node.is_visible,
        })
        .collect()
}

fn search_path(nodes: &[MenuTreeNode], menu_id: &str, path: &mut Vec<String>) -> bool {
    for node in nodes {
        path.push(node.menu_id().to_string());
        if node.menu_id() == menu_id || search_path(&node.children, menu_id, path) {
            return true;
        }
        path.pop();
    }
    false
}

fn collect_nodes<'a>(nodes: &'a [MenuTreeNode], out: &mut Vec<&'a MenuTreeNode>) {
    for node in nodes {
        out.push(node);
        collect_nodes(&node.children, out);
    }
}
