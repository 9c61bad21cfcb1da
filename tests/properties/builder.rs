//! Property tests for tree construction.

use std::sync::Arc;

use proptest::prelude::*;

use chronos::{build, fold_name, ChangeRecord, NodeKind, TreeNode};

use crate::common::{expected_files, paths};

fn check_order_and_ids(siblings: &[Arc<TreeNode>], parent: Option<&str>) -> Result<(), TestCaseError> {
    for pair in siblings.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(
            a.kind() <= b.kind(),
            "{} ({:?}) sorted before {} ({:?})",
            a.id(),
            a.kind(),
            b.id(),
            b.kind()
        );
        if a.kind() == b.kind() {
            prop_assert!(
                fold_name(a.name()) <= fold_name(b.name()),
                "{} sorted before {}",
                a.name(),
                b.name()
            );
        }
        prop_assert_ne!(a.name(), b.name());
    }

    for node in siblings {
        let expected_id = match parent {
            Some(parent) => format!("{}/{}", parent, node.name()),
            None => node.name().to_string(),
        };
        prop_assert_eq!(node.id(), expected_id.as_str());
        if node.kind() == NodeKind::Folder {
            prop_assert!(!node.children().is_empty());
            prop_assert!(node.change_kind().is_none());
            check_order_and_ids(node.children(), Some(node.id()))?;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: siblings are folders first, then by accent- and case-folded name,
    /// and every id is its parent's id plus the node name.
    #[test]
    fn property_build_orders_siblings_and_derives_ids(paths in paths()) {
        let tree = build(paths.iter().map(ChangeRecord::unchanged));
        check_order_and_ids(tree.roots(), None)?;
    }

    /// PROPERTY: exactly the leaf paths become file nodes.
    #[test]
    fn property_build_files_match_leaf_paths(paths in paths()) {
        let tree = build(paths.iter().map(ChangeRecord::unchanged));
        let files: std::collections::BTreeSet<String> = tree.file_paths().into_iter().collect();
        prop_assert_eq!(files, expected_files(&paths));
    }

    /// PROPERTY: input order does not change the tree.
    #[test]
    fn property_build_ignores_input_order(paths in paths()) {
        let forward = build(paths.iter().map(ChangeRecord::unchanged));
        let backward = build(paths.iter().rev().map(ChangeRecord::unchanged));
        prop_assert_eq!(forward, backward);
    }
}
