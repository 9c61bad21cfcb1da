//! Property tests for tri-state selection.

use std::collections::BTreeSet;

use proptest::prelude::*;
use proptest::sample::Index;

use chronos::tree::{expansion, selection};
use chronos::{build, selected_paths, ChangeRecord, FileTree};

use crate::common::{all_ids, check_tree_aggregation, paths, recomputed_selection};

fn toggles() -> impl Strategy<Value = Vec<(Index, bool)>> {
    proptest::collection::vec((any::<Index>(), any::<bool>()), 0..=32)
}

fn tree_of(paths: &[String]) -> FileTree {
    build(paths.iter().map(ChangeRecord::unchanged))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any toggle sequence keeps every folder equal to the
    /// aggregate of its children, and the reported selection matches the tree.
    #[test]
    fn property_toggle_sequences_keep_aggregation(paths in paths(), ops in toggles()) {
        let mut tree = tree_of(&paths);
        let ids = all_ids(&tree);

        for (index, selected) in ops {
            if ids.is_empty() {
                break;
            }
            let id = index.get::<String>(&ids);
            let outcome = selection::toggle(&tree, id, selected);
            check_tree_aggregation(&outcome.tree)?;
            prop_assert_eq!(&outcome.selected_paths, &recomputed_selection(&outcome.tree));
            tree = outcome.tree;
        }
    }

    /// PROPERTY: toggling a node puts its whole subtree in that state.
    #[test]
    fn property_toggle_forces_subtree(paths in paths(), index in any::<Index>(), selected in any::<bool>()) {
        let tree = tree_of(&paths);
        let ids = all_ids(&tree);
        prop_assume!(!ids.is_empty());
        let id = index.get::<String>(&ids);

        let outcome = selection::toggle(&tree, id, selected);
        let prefix = format!("{}/", id);
        for node in outcome.tree.iter().filter(|n| n.id() == id || n.id().starts_with(&prefix)) {
            prop_assert_eq!(node.selection(), chronos::SelectionState::from_bool(selected));
        }
    }

    /// PROPERTY: re-initializing from the selected paths reproduces the tree.
    #[test]
    fn property_initialize_reproduces_selection(paths in paths(), ops in toggles()) {
        let mut tree = tree_of(&paths);
        let ids = all_ids(&tree);
        for (index, selected) in ops {
            if ids.is_empty() {
                break;
            }
            tree = selection::toggle(&tree, index.get::<String>(&ids), selected).tree;
        }

        let selected = selected_paths(&tree);
        let rebuilt = selection::initialize_from_paths(&tree_of(&paths), &selected);
        prop_assert_eq!(rebuilt, tree);
    }

    /// PROPERTY: inverting twice restores the selection.
    #[test]
    fn property_invert_is_an_involution(paths in paths(), ops in toggles()) {
        let mut tree = tree_of(&paths);
        let ids = all_ids(&tree);
        for (index, selected) in ops {
            if ids.is_empty() {
                break;
            }
            tree = selection::toggle(&tree, index.get::<String>(&ids), selected).tree;
        }

        let once = selection::invert(&tree);
        check_tree_aggregation(&once.tree)?;
        let all: BTreeSet<String> = tree.file_paths().into_iter().collect();
        let before = selected_paths(&tree);
        let expected: BTreeSet<String> = all.difference(&before).cloned().collect();
        prop_assert_eq!(&once.selected_paths, &expected);

        let twice = selection::invert(&once.tree);
        prop_assert_eq!(twice.selected_paths, before);
    }

    /// PROPERTY: expansion changes never touch selection.
    #[test]
    fn property_expansion_keeps_selection(paths in paths(), ops in toggles()) {
        let mut tree = selection::select_all(&tree_of(&paths)).tree;
        let ids = all_ids(&tree);
        let before = selected_paths(&tree);
        for (index, _) in ops {
            if ids.is_empty() {
                break;
            }
            tree = expansion::toggle(&tree, index.get::<String>(&ids));
        }
        prop_assert_eq!(selected_paths(&tree), before);
        check_tree_aggregation(&tree)?;
    }
}
