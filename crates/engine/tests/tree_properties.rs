//! Invariants of the tree builder and expansion transforms over generated record lists.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use navtree_engine::{
    apply_expanded_set, build_menu_tree, collect_expanded_ids, count_nodes, flatten_tree, set_all_expanded, toggle_menu_expand,
};
use navtree_types::config::DEFAULT_HOME_LABEL;
use navtree_types::{MenuRecord, MenuTreeNode};
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
enum ParentChoice {
    Root,
    Missing,
    Existing(Index),
}

fn parent_choice() -> impl Strategy<Value = ParentChoice> {
    prop_oneof![
        1 => Just(ParentChoice::Root),
        1 => Just(ParentChoice::Missing),
        3 => any::<Index>().prop_map(ParentChoice::Existing),
    ]
}

/// Half-step sort numbers over a small range so ties are common.
fn sort_no() -> impl Strategy<Value = f64> {
    (0u8..8).prop_map(|step| f64::from(step) / 2.0)
}

/// Record lists with unique ids, dangling and self/cyclic parents, sort ties and
/// the occasional hidden or disabled record.
fn menu_records() -> impl Strategy<Value = Vec<MenuRecord>> {
    let entry = (sort_no(), parent_choice(), 0u32..4, prop::bool::weighted(0.9), prop::bool::weighted(0.9));
    prop::collection::vec(entry, 1..40).prop_map(|entries| {
        let count = entries.len();
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (sort_no, parent, depth, enabled, displayed))| {
                let record = MenuRecord::new(format!("m{index}"), format!("Menu {index}")).with_sort_no(sort_no);
                let mut record = match parent {
                    ParentChoice::Root => record,
                    ParentChoice::Missing => record.with_parent(format!("missing{index}"), depth),
                    ParentChoice::Existing(parent) => record.with_parent(format!("m{}", parent.index(count)), depth),
                };
                record.enabled_tf = enabled;
                if !displayed {
                    record.display_yn = Some("N".into());
                }
                record
            })
            .collect()
    })
}

fn kept_ids(records: &[MenuRecord]) -> HashSet<&str> {
    records
        .iter()
        .filter(|record| record.is_displayable())
        .map(|record| record.menu_id.as_str())
        .collect()
}

fn siblings_ordered(nodes: &[MenuTreeNode], position: &HashMap<&str, usize>) -> bool {
    let ordered = nodes.windows(2).all(|pair| {
        let (left, right) = (&pair[0], &pair[1]);
        left.sort_no() < right.sort_no()
            || (left.sort_no() == right.sort_no() && position[left.menu_id()] < position[right.menu_id()])
    });
    ordered && nodes.iter().all(|node| siblings_ordered(&node.children, position))
}

proptest! {
    #[test]
    fn every_kept_record_appears_exactly_once(records in menu_records()) {
        let tree = build_menu_tree(&records);
        let placed: Vec<&str> = flatten_tree(&tree).into_iter().map(MenuTreeNode::menu_id).collect();
        let kept = kept_ids(&records);

        prop_assert_eq!(placed.len(), kept.len());
        prop_assert_eq!(placed.into_iter().collect::<HashSet<_>>(), kept);
    }

    #[test]
    fn nesting_follows_parent_presence(records in menu_records()) {
        let tree = build_menu_tree(&records);
        let kept = kept_ids(&records);
        let roots: HashSet<&str> = tree.iter().map(MenuTreeNode::menu_id).collect();

        for record in records.iter().filter(|record| record.is_displayable()) {
            let parent_kept = record.parent_menu_id.as_deref().is_some_and(|parent| kept.contains(parent));
            if record.depth == 0 || !parent_kept {
                prop_assert!(roots.contains(record.menu_id.as_str()), "{} should be a root", record.menu_id);
            }
        }

        for node in flatten_tree(&tree) {
            for child in &node.children {
                prop_assert_eq!(child.record.parent_menu_id.as_deref(), Some(node.menu_id()));
                prop_assert_ne!(child.record.depth, 0);
            }
            prop_assert_eq!(node.has_children, !node.children.is_empty());
        }
    }

    #[test]
    fn siblings_are_sorted_and_stable(records in menu_records()) {
        let tree = build_menu_tree(&records);
        let position: HashMap<&str, usize> = records
            .iter()
            .enumerate()
            .map(|(index, record)| (record.menu_id.as_str(), index))
            .collect();
        prop_assert!(siblings_ordered(&tree, &position));
    }

    #[test]
    fn toggle_twice_restores_every_flag(
        records in menu_records(),
        expanded in prop::collection::vec(any::<Index>(), 0..8),
        target in any::<Index>(),
    ) {
        let expanded: IndexSet<String> = expanded
            .iter()
            .map(|index| records[index.index(records.len())].menu_id.clone())
            .collect();
        let tree = apply_expanded_set(&build_menu_tree(&records), &expanded);
        let target = &records[target.index(records.len())].menu_id;

        let twice = toggle_menu_expand(&toggle_menu_expand(&tree, target), target);
        prop_assert_eq!(twice, tree);
    }

    #[test]
    fn collected_ids_replay_onto_rebuilt_tree(
        records in menu_records(),
        toggles in prop::collection::vec(any::<Index>(), 0..12),
    ) {
        let mut session = build_menu_tree(&records);
        for toggle in &toggles {
            session = toggle_menu_expand(&session, &records[toggle.index(records.len())].menu_id);
        }

        let expanded = collect_expanded_ids(&session);
        let replayed = apply_expanded_set(&build_menu_tree(&records), &expanded);
        prop_assert_eq!(collect_expanded_ids(&replayed), expanded);
    }

    #[test]
    fn set_all_covers_every_node(records in menu_records()) {
        let tree = build_menu_tree(&records);
        let all: IndexSet<String> = flatten_tree(&tree).into_iter().map(|node| node.menu_id().to_string()).collect();

        let expanded = set_all_expanded(&tree, true);
        prop_assert_eq!(collect_expanded_ids(&expanded).len(), count_nodes(&tree));
        prop_assert_eq!(collect_expanded_ids(&expanded), all);
        prop_assert!(collect_expanded_ids(&set_all_expanded(&expanded, false)).is_empty());
    }
}

#[test]
fn dangling_parent_is_promoted_beside_root() {
    let records = [
        MenuRecord::new("A", "A").with_sort_no(1.0),
        MenuRecord::new("B", "B").with_parent("A", 1).with_sort_no(1.0),
        MenuRecord::new("C", "C").with_parent("Z", 1).with_sort_no(2.0),
    ];
    let tree = build_menu_tree(&records);

    let roots: Vec<&str> = tree.iter().map(MenuTreeNode::menu_id).collect();
    assert_eq!(roots, ["A", "C"]);
    assert_eq!(tree[0].children.len(), 1);
    assert_eq!(tree[0].children[0].menu_id(), "B");
}

#[test]
fn home_label_excluded_even_when_visible() {
    let mut home = MenuRecord::new("H", DEFAULT_HOME_LABEL);
    home.display_yn = Some("Y".into());
    let records = [home, MenuRecord::new("A", "Alpha")];

    let tree = build_menu_tree(&records);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].menu_id(), "A");
}
