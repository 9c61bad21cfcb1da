//! Depth-limited presentation of a change tree.
//!
//! Files nested deeper than the display depth are folded into ellipsis nodes
//! placed directly under the deepest visible folder. Each ellipsis node keeps
//! the id, path, change kind and selection of the file it stands for and
//! carries the hidden remainder of the path as its tail.

use std::sync::Arc;

use super::builder::{build, ChangeRecord};
use super::node::{sibling_key, FileTree, TreeNode};

/// Default maximum display depth
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Fold every file deeper than `max_depth` (roots are depth 0).
///
/// Subtrees that need no folding are shared with the input snapshot.
pub fn limit_depth(tree: &FileTree, max_depth: usize) -> FileTree {
    match limit_level(tree.roots(), 0, max_depth) {
        Some(roots) => FileTree::new(roots),
        None => tree.clone(),
    }
}

/// Build a tree and fold it to `max_depth` in one step.
pub fn build_limited<I>(records: I, max_depth: usize) -> FileTree
where
    I: IntoIterator,
    I::Item: Into<ChangeRecord>,
{
    limit_depth(&build(records), max_depth)
}

/// Returns `None` when nothing at or below this level had to change.
fn limit_level(
    nodes: &[Arc<TreeNode>],
    depth: usize,
    max_depth: usize,
) -> Option<Vec<Arc<TreeNode>>> {
    let mut changed = false;
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        if node.is_file() {
            out.push(Arc::clone(node));
        } else if depth < max_depth {
            match limit_level(node.children(), depth + 1, max_depth) {
                Some(children) => {
                    changed = true;
                    out.push(Arc::new(node.with_children(children)));
                }
                None => out.push(Arc::clone(node)),
            }
        } else {
            changed = true;
            fold_into(node, max_depth, &mut out);
        }
    }

    if !changed {
        return None;
    }
    out.sort_by_cached_key(|node| sibling_key(node));
    Some(out)
}

/// Replace a too-deep folder by one ellipsis node per file beneath it.
fn fold_into(folder: &TreeNode, max_depth: usize, out: &mut Vec<Arc<TreeNode>>) {
    for child in folder.children() {
        if child.is_folder() {
            fold_into(child, max_depth, out);
            continue;
        }
        let tail = child
            .path()
            .splitn(max_depth + 1, '/')
            .nth(max_depth)
            .unwrap_or_else(|| child.path());
        out.push(Arc::new(TreeNode::ellipsis(child, tail)));
    }
}
