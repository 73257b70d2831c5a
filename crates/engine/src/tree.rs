//! Flat record list to ordered menu tree.

use std::collections::HashMap;

use navtree_types::config::DEFAULT_HOME_LABEL;
use navtree_types::{MenuRecord, MenuTreeNode, WidgetConfig};
use tracing::warn;

/// Options controlling which records take part in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBuildOptions {
    /// Records carrying exactly this name are left out; the dedicated home
    /// button covers them.
    pub home_label: String,
}

impl Default for TreeBuildOptions {
    fn default() -> Self {
        Self {
            home_label: DEFAULT_HOME_LABEL.to_string(),
        }
    }
}

impl From<&WidgetConfig> for TreeBuildOptions {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            home_label: config.home_label.clone(),
        }
    }
}

/// Builds the menu tree with the default options.
pub fn build_menu_tree(records: &[MenuRecord]) -> Vec<MenuTreeNode> {
    build_menu_tree_with(records, &TreeBuildOptions::default())
}

/// Builds the menu tree.
///
/// Records that are disabled, hidden, or named after the home label are dropped.
/// The rest are stably sorted by `sort_no` and attached to their parent; records
/// at depth 0, without a parent reference, or whose parent is missing become
/// roots. Every remaining record appears exactly once. Sibling lists are sorted
/// again once the tree is assembled.
pub fn build_menu_tree_with(records: &[MenuRecord], options: &TreeBuildOptions) -> Vec<MenuTreeNode> {
    let mut sorted: Vec<&MenuRecord> = records
        .iter()
        .filter(|record| record.is_displayable() && record.menu_name != options.home_label)
        .collect();
    sorted.sort_by(|a, b| a.sort_no.total_cmp(&b.sort_no));

    // Later duplicates overwrite earlier ones, so parent lookups resolve to the last record.
    let index_by_id: HashMap<&str, usize> = sorted
        .iter()
        .enumerate()
        .map(|(index, record)| (record.menu_id.as_str(), index))
        .collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut parent_of: Vec<Option<usize>> = vec![None; sorted.len()];
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); sorted.len()];

    for (index, record) in sorted.iter().enumerate() {
        if record.is_root_eligible() {
            roots.push(index);
            continue;
        }
        let parent_id = record.parent_menu_id.as_deref().unwrap_or_default();
        match index_by_id.get(parent_id) {
            Some(&parent) => {
                parent_of[index] = Some(parent);
                children_of[parent].push(index);
            }
            None => {
                warn!(
                    menu_id = %record.menu_id,
                    parent_menu_id = parent_id,
                    "Parent not found for menu; promoting to root"
                );
                roots.push(index);
            }
        }
    }

    promote_unreachable(&sorted, &mut roots, &mut parent_of, &mut children_of);

    let mut slots: Vec<Option<MenuTreeNode>> = sorted
        .iter()
        .map(|record| Some(MenuTreeNode::from_record((*record).clone())))
        .collect();
    let mut tree: Vec<MenuTreeNode> = roots
        .iter()
        .filter_map(|&root| assemble(root, &mut slots, &children_of))
        .collect();

    sort_siblings(&mut tree);
    tree
}

/// Breaks parent cycles: any record not reachable from a root is promoted to
/// root and detached from its parent, which makes the rest of its cycle
/// reachable through it.
fn promote_unreachable(
    sorted: &[&MenuRecord],
    roots: &mut Vec<usize>,
    parent_of: &mut [Option<usize>],
    children_of: &mut [Vec<usize>],
) {
    let mut reached = vec![false; sorted.len()];
    for &root in roots.iter() {
        mark_reached(root, children_of, &mut reached);
    }

    for index in 0..sorted.len() {
        if reached[index] {
            continue;
        }
        if let Some(parent) = parent_of[index].take() {
            children_of[parent].retain(|&child| child != index);
        }
        warn!(
            menu_id = %sorted[index].menu_id,
            parent_menu_id = sorted[index].parent_menu_id.as_deref().unwrap_or_default(),
            "Menu parent chain forms a cycle; promoting to root"
        );
        roots.push(index);
        mark_reached(index, children_of, &mut reached);
    }
}

fn mark_reached(start: usize, children_of: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(index) = stack.pop() {
        if reached[index] {
            continue;
        }
        reached[index] = true;
        stack.extend(children_of[index].iter().copied());
    }
}

fn assemble(index: usize, slots: &mut [Option<MenuTreeNode>], children_of: &[Vec<usize>]) -> Option<MenuTreeNode> {
    let mut node = slots[index].take()?;
    node.children = children_of[index]
        .iter()
        .filter_map(|&child| assemble(child, slots, children_of))
        .collect();
    node.has_children = !node.children.is_empty();
    Some(node)
}

fn sort_siblings(nodes: &mut [MenuTreeNode]) {
    nodes.sort_by(|a, b| a.sort_no().total_cmp(&b.sort_no()));
    for node in nodes.iter_mut() {
        sort_siblings(&mut node.children);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, parent: Option<&str>, depth: u32, sort_no: f64) -> MenuRecord {
        let record = MenuRecord::new(id, format!("Menu {id}")).with_sort_no(sort_no);
        match parent {
            Some(parent) => record.with_parent(parent, depth),
            None => record,
        }
    }

    fn ids(nodes: &[MenuTreeNode]) -> Vec<&str> {
        nodes.iter().map(MenuTreeNode::menu_id).collect()
    }

    #[test]
    fn empty_input_builds_empty_tree() {
        assert!(build_menu_tree(&[]).is_empty());
    }

    #[test]
    fn orphan_is_promoted_to_root() {
        let records = [
            record("A", None, 0, 1.0),
            record("B", Some("A"), 1, 1.0),
            record("C", Some("Z"), 1, 2.0),
        ];
        let tree = build_menu_tree(&records);

        assert_eq!(ids(&tree), ["A", "C"]);
        assert_eq!(ids(&tree[0].children), ["B"]);
        assert!(tree[0].has_children);
        assert!(!tree[1].has_children);
    }

    #[test]
    fn depth_zero_is_root_even_with_parent() {
        let records = [record("A", None, 0, 1.0), record("B", Some("A"), 0, 2.0)];
        let tree = build_menu_tree(&records);
        assert_eq!(ids(&tree), ["A", "B"]);
        assert!(tree[0].children.is_empty());
        assert!(!tree[0].has_children);
    }

    #[test]
    fn children_attach_regardless_of_input_order() {
        let records = [
            record("C", Some("B"), 2, 1.0),
            record("B", Some("A"), 1, 1.0),
            record("A", None, 0, 1.0),
        ];
        let tree = build_menu_tree(&records);

        assert_eq!(ids(&tree), ["A"]);
        assert_eq!(ids(&tree[0].children), ["B"]);
        assert_eq!(ids(&tree[0].children[0].children), ["C"]);
        assert_eq!(tree[0].children[0].level, 1);
    }

    #[test]
    fn siblings_sorted_stably_at_every_level() {
        let records = [
            record("R2", None, 0, 2.0),
            record("R1", None, 0, 1.0),
            record("x", Some("R1"), 1, 5.0),
            record("y", Some("R1"), 1, 1.5),
            record("z", Some("R1"), 1, 5.0),
            record("w", Some("R1"), 1, 1.5),
        ];
        let tree = build_menu_tree(&records);

        assert_eq!(ids(&tree), ["R1", "R2"]);
        assert_eq!(ids(&tree[0].children), ["y", "w", "x", "z"]);
    }

    #[test]
    fn hidden_disabled_and_home_records_are_filtered() {
        let mut hidden = record("H", None, 0, 1.0);
        hidden.display_yn = Some("N".into());
        let mut disabled = record("D", None, 0, 2.0);
        disabled.enabled_tf = false;
        let mut home = record("HOME", None, 0, 0.0);
        home.menu_name = DEFAULT_HOME_LABEL.into();
        home.display_yn = Some("Y".into());
        let mut shown = record("S", None, 0, 3.0);
        shown.display_yn = Some("Y".into());

        let tree = build_menu_tree(&[hidden, disabled, home, shown]);
        assert_eq!(ids(&tree), ["S"]);
    }

    #[test]
    fn child_of_filtered_parent_is_promoted() {
        let mut parent = record("P", None, 0, 1.0);
        parent.enabled_tf = false;
        let child = record("C", Some("P"), 1, 1.0);

        let tree = build_menu_tree(&[parent, child]);
        assert_eq!(ids(&tree), ["C"]);
    }

    #[test]
    fn default_home_label_is_filtered() {
        let records = [MenuRecord::new("H", "홈"), MenuRecord::new("A", "Alpha")];
        let tree = build_menu_tree(&records);
        assert_eq!(ids(&tree), ["A"]);
    }

    #[test]
    fn custom_home_label_is_filtered() {
        let records = [MenuRecord::new("H", "Start"), MenuRecord::new("A", "Home")];
        let options = TreeBuildOptions {
            home_label: "Start".into(),
        };
        let tree = build_menu_tree_with(&records, &options);
        assert_eq!(ids(&tree), ["A"]);
    }

    #[test]
    fn parent_cycles_do_not_lose_records() {
        let records = [
            record("A", Some("B"), 1, 1.0),
            record("B", Some("A"), 1, 2.0),
            record("S", Some("S"), 1, 3.0),
        ];
        let tree = build_menu_tree(&records);

        assert_eq!(ids(&tree), ["A", "S"]);
        assert_eq!(ids(&tree[0].children), ["B"]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn records_without_id_become_roots() {
        let records = [
            MenuRecord::new("", "Unnamed").with_sort_no(2.0),
            MenuRecord::new("A", "A").with_sort_no(1.0),
            MenuRecord::new("B", "B").with_parent("", 1).with_sort_no(3.0),
        ];
        let tree = build_menu_tree(&records);
        assert_eq!(ids(&tree), ["A", "", "B"]);
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn new_nodes_start_collapsed_and_visible() {
        let tree = build_menu_tree(&[record("A", None, 0, 1.0)]);
        assert!(!tree[0].is_expanded);
        assert!(tree[0].is_visible);
    }
}
