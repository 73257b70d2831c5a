//! Read-only projection of the tree into the rows a sidebar draws.
//!
//! `max_depth` only decides whether a node offers an expand arrow and whether
//! its children are drawn; nodes past the limit stay in the tree and still take
//! part in expand-all, collapse-all and persistence.

use navtree_types::MenuTreeNode;

/// One drawn row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow<'a> {
    pub node: &'a MenuTreeNode,
    /// Nesting depth at which the row is drawn, starting at 0 for roots.
    pub depth: u32,
    pub can_expand: bool,
    pub is_active: bool,
}

/// A node offers an expand arrow when it has children and sits above `max_depth`.
pub fn can_expand(node: &MenuTreeNode, depth: u32, max_depth: u32) -> bool {
    !node.children.is_empty() && depth < max_depth
}

/// Rows in draw order: children follow their parent only when the parent is
/// expanded and allowed to expand.
pub fn visible_rows<'a>(tree: &'a [MenuTreeNode], active_menu_id: Option<&str>, max_depth: u32) -> Vec<VisibleRow<'a>> {
    let mut rows = Vec::new();
    push_rows(tree, 0, active_menu_id, max_depth, &mut rows);
    rows
}

fn push_rows<'a>(nodes: &'a [MenuTreeNode], depth: u32, active_menu_id: Option<&str>, max_depth: u32, rows: &mut Vec<VisibleRow<'a>>) {
    for node in nodes {
        let expandable = can_expand(node, depth, max_depth);
        rows.push(VisibleRow {
            node,
            depth,
            can_expand: expandable,
            is_active: active_menu_id == Some(node.menu_id()),
        });
        if expandable && node.is_expanded {
            push_rows(&node.children, depth + 1, active_menu_id, max_depth, rows);
        }
    }
}
