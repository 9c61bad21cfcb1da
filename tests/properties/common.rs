//! Shared generators and invariant checks.

use std::collections::BTreeSet;

use proptest::prelude::*;

use chronos::{FileTree, SelectionState, TreeNode};

/// A slash-delimited path over a tiny alphabet so folders are shared and
/// case-only and accent-only differences show up often.
pub fn path() -> impl Strategy<Value = String> {
    proptest::collection::vec("[abAEeéÉ数]{1,2}", 1..=5).prop_map(|segments| segments.join("/"))
}

pub fn paths() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(path(), 0..=24)
}

/// Paths that end up as files: those that are not a folder of another path.
pub fn expected_files(paths: &[String]) -> BTreeSet<String> {
    paths
        .iter()
        .filter(|p| {
            let prefix = format!("{}/", p);
            !paths.iter().any(|other| other.starts_with(&prefix))
        })
        .cloned()
        .collect()
}

pub fn all_ids(tree: &FileTree) -> Vec<String> {
    tree.iter().map(|n| n.id().to_string()).collect()
}

/// Every folder's state equals the aggregate of its children.
pub fn check_aggregation(node: &TreeNode) -> Result<(), TestCaseError> {
    if node.is_folder() {
        let states: Vec<SelectionState> = node.children().iter().map(|c| c.selection()).collect();
        prop_assert_eq!(
            node.selection(),
            SelectionState::aggregate(states.iter()),
            "folder {} does not match its children",
            node.id()
        );
        for child in node.children() {
            check_aggregation(child)?;
        }
    }
    Ok(())
}

pub fn check_tree_aggregation(tree: &FileTree) -> Result<(), TestCaseError> {
    for root in tree.roots() {
        check_aggregation(root)?;
    }
    Ok(())
}

/// Selected file paths recomputed from scratch.
pub fn recomputed_selection(tree: &FileTree) -> BTreeSet<String> {
    tree.iter()
        .filter(|n| n.is_file() && n.selection() == SelectionState::Selected)
        .map(|n| n.path().to_string())
        .collect()
}
