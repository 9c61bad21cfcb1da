//! Expand/collapse state of folder nodes.
//!
//! The flag only exists on folders; operations aimed at files or unknown ids
//! hand back the input snapshot unchanged.

use std::sync::Arc;

use tracing::trace;

use super::node::{rewrite, FileTree, TreeNode};

/// Flip the expansion flag of the folder with `id`.
pub fn toggle(tree: &FileTree, id: &str) -> FileTree {
    edit_folder(tree, id, |node| Some(!node.is_expanded()))
}

/// Expand or collapse one folder.
pub fn set_expanded(tree: &FileTree, id: &str, expanded: bool) -> FileTree {
    edit_folder(tree, id, |node| (node.is_expanded() != expanded).then_some(expanded))
}

/// Expand every folder.
pub fn expand_all(tree: &FileTree) -> FileTree {
    set_all(tree, true)
}

/// Collapse every folder.
pub fn collapse_all(tree: &FileTree) -> FileTree {
    set_all(tree, false)
}

/// Set every folder's expansion flag to `expanded` in one pass.
pub fn set_all(tree: &FileTree, expanded: bool) -> FileTree {
    FileTree::new(
        tree.roots()
            .iter()
            .map(|node| set_subtree(node, expanded))
            .collect(),
    )
}

fn set_subtree(node: &Arc<TreeNode>, expanded: bool) -> Arc<TreeNode> {
    if node.is_file() {
        return Arc::clone(node);
    }
    let children: Vec<_> = node
        .children()
        .iter()
        .map(|c| set_subtree(c, expanded))
        .collect();
    let untouched = node.is_expanded() == expanded
        && children
            .iter()
            .zip(node.children())
            .all(|(new, old)| Arc::ptr_eq(new, old));
    if untouched {
        return Arc::clone(node);
    }
    Arc::new(node.with_children(children).with_expanded(expanded))
}

fn edit_folder(
    tree: &FileTree,
    id: &str,
    mut next: impl FnMut(&TreeNode) -> Option<bool>,
) -> FileTree {
    let edited = rewrite(tree.roots(), id, &mut |node| {
        if !node.is_folder() {
            return None;
        }
        let expanded = next(node)?;
        Some(Arc::new(node.with_expanded(expanded)))
    });
    match edited {
        Some(roots) => FileTree::new(roots),
        None => {
            trace!(id, "expansion unchanged");
            tree.clone()
        }
    }
}

/// A node visible under the current expansion flags
#[derive(Debug, Clone)]
pub struct VisibleRow {
    /// Depth level (0 = root)
    pub depth: usize,
    pub node: Arc<TreeNode>,
}

/// Flatten the nodes a renderer should show, depth first.
///
/// A folder's children are visible only while the folder is expanded.
pub fn visible_rows(tree: &FileTree) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    push_rows(tree.roots(), 0, &mut rows);
    rows
}

fn push_rows(nodes: &[Arc<TreeNode>], depth: usize, rows: &mut Vec<VisibleRow>) {
    for node in nodes {
        rows.push(VisibleRow {
            depth,
            node: Arc::clone(node),
        });
        if node.is_folder() && node.is_expanded() {
            push_rows(node.children(), depth + 1, rows);
        }
    }
}
