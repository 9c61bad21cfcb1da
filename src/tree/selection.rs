//! Tri-state selection over a change tree.
//!
//! Toggling a node forces its whole subtree to a definite state, then every
//! ancestor is re-aggregated from its immediate children. The selected path
//! set is always re-derived from the resulting snapshot, never tracked on the
//! side, so it cannot drift from what the tree shows.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use super::node::{rewrite, FileTree, NodeKind, SelectionState, TreeNode};

/// Result of a selection change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub tree: FileTree,
    pub selected_paths: BTreeSet<String>,
}

impl SelectionOutcome {
    fn from_tree(tree: FileTree) -> Self {
        let selected_paths = selected_paths(&tree);
        Self {
            tree,
            selected_paths,
        }
    }
}

/// Select or deselect the node with `id` and everything beneath it.
///
/// An unknown id leaves the tree untouched; the returned selection is then
/// the current one.
pub fn toggle(tree: &FileTree, id: &str, selected: bool) -> SelectionOutcome {
    let state = SelectionState::from_bool(selected);
    let edited = rewrite(tree.roots(), id, &mut |node| {
        Some(TreeNode::forced(node, state))
    });
    match edited {
        Some(roots) => SelectionOutcome::from_tree(FileTree::new(roots)),
        None => {
            debug!(id, "selection target not found");
            SelectionOutcome::from_tree(tree.clone())
        }
    }
}

/// Mark exactly the files whose path is in `paths` as selected and
/// re-aggregate every folder.
pub fn initialize_from_paths<S>(tree: &FileTree, paths: &BTreeSet<S>) -> FileTree
where
    S: Borrow<str> + Ord,
{
    let roots = tree
        .roots()
        .iter()
        .map(|node| mark(node, &|path: &str| paths.contains(path)))
        .collect();
    FileTree::new(roots)
}

/// Select every file.
pub fn select_all(tree: &FileTree) -> SelectionOutcome {
    force_all(tree, SelectionState::Selected)
}

/// Deselect every file.
pub fn select_none(tree: &FileTree) -> SelectionOutcome {
    force_all(tree, SelectionState::Unselected)
}

/// Flip every file's selection; folders follow their children.
pub fn invert(tree: &FileTree) -> SelectionOutcome {
    let roots = tree.roots().iter().map(inverted).collect();
    SelectionOutcome::from_tree(FileTree::new(roots))
}

/// Paths of every selected file, skipping subtrees that are fully
/// unselected.
pub fn selected_paths(tree: &FileTree) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    collect_selected(tree.roots(), &mut out);
    out
}

fn collect_selected(nodes: &[Arc<TreeNode>], out: &mut BTreeSet<String>) {
    for node in nodes {
        match (node.kind(), node.selection()) {
            (_, SelectionState::Unselected) => {}
            (NodeKind::File, SelectionState::Selected) => {
                out.insert(node.path().to_string());
            }
            (NodeKind::File, SelectionState::Indeterminate) => {}
            (NodeKind::Folder, _) => collect_selected(node.children(), out),
        }
    }
}

fn force_all(tree: &FileTree, state: SelectionState) -> SelectionOutcome {
    let roots = tree
        .roots()
        .iter()
        .map(|node| TreeNode::forced(node, state))
        .collect();
    SelectionOutcome::from_tree(FileTree::new(roots))
}

fn mark<F>(node: &Arc<TreeNode>, is_selected: &F) -> Arc<TreeNode>
where
    F: Fn(&str) -> bool,
{
    if node.is_file() {
        let state = SelectionState::from_bool(is_selected(node.path()));
        if state == node.selection() {
            return Arc::clone(node);
        }
        return Arc::new(node.with_file_selection(state));
    }
    rebuild_folder(node, |child| mark(child, is_selected))
}

fn inverted(node: &Arc<TreeNode>) -> Arc<TreeNode> {
    if node.is_file() {
        let state = match node.selection() {
            SelectionState::Selected => SelectionState::Unselected,
            SelectionState::Unselected | SelectionState::Indeterminate => SelectionState::Selected,
        };
        return Arc::new(node.with_file_selection(state));
    }
    rebuild_folder(node, inverted)
}

/// Map a folder's children and re-aggregate, sharing the folder when
/// nothing changed.
fn rebuild_folder(
    node: &Arc<TreeNode>,
    map: impl Fn(&Arc<TreeNode>) -> Arc<TreeNode>,
) -> Arc<TreeNode> {
    let children: Vec<_> = node.children().iter().map(map).collect();
    let rebuilt = node.with_children(children);
    let unchanged = rebuilt.selection() == node.selection()
        && rebuilt
            .children()
            .iter()
            .zip(node.children())
            .all(|(new, old)| Arc::ptr_eq(new, old));
    if unchanged {
        Arc::clone(node)
    } else {
        Arc::new(rebuilt)
    }
}
