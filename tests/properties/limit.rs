//! Property tests for depth-limited trees.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use chronos::{build, limit_depth, ChangeRecord, TreeNode};

use crate::common::paths;

fn max_depth_of(nodes: &[Arc<TreeNode>], depth: usize) -> usize {
    nodes
        .iter()
        .map(|n| max_depth_of(n.children(), depth + 1).max(depth))
        .max()
        .unwrap_or(0)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: no node sits deeper than the limit and no file is lost.
    #[test]
    fn property_limit_bounds_depth_and_keeps_files(paths in paths(), max in 0usize..5) {
        let tree = build(paths.iter().map(ChangeRecord::unchanged));
        let limited = limit_depth(&tree, max);

        prop_assert!(max_depth_of(limited.roots(), 0) <= max);

        let before: BTreeSet<String> = tree.file_paths().into_iter().collect();
        let after: BTreeSet<String> = limited.file_paths().into_iter().collect();
        prop_assert_eq!(before, after);
    }

    /// PROPERTY: folded nodes carry the path below the fold as their tail.
    #[test]
    fn property_limit_tail_is_hidden_suffix(paths in paths(), max in 0usize..5) {
        let limited = limit_depth(&build(paths.iter().map(ChangeRecord::unchanged)), max);
        for node in limited.iter().filter(|n| n.is_ellipsis()) {
            let tail = node.tail().unwrap_or_default();
            let hidden: Vec<&str> = node.path().split('/').skip(max).collect();
            prop_assert_eq!(tail, hidden.join("/"));
        }
    }
}
