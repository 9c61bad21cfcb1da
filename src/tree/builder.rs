//! Tree construction from flat change records.
//!
//! Every record path is split into segments; one node is materialized per
//! path prefix and reused across records, so files sharing a folder end up
//! as siblings under the same folder node. Siblings are sorted afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChronosError, ChronosResult};

use super::node::{sibling_key, ChangeKind, FileTree, TreeNode};

/// One file reported by a status query (or a directory listing when
/// `status` is absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(alias = "file")]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ChangeKind>,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, status: Option<ChangeKind>) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }

    /// A changed file
    pub fn changed(path: impl Into<String>, status: ChangeKind) -> Self {
        Self::new(path, Some(status))
    }

    /// A tracked file without changes
    pub fn unchanged(path: impl Into<String>) -> Self {
        Self::new(path, None)
    }
}

impl<S: Into<String>> From<(S, ChangeKind)> for ChangeRecord {
    fn from((path, status): (S, ChangeKind)) -> Self {
        Self::changed(path, status)
    }
}

/// Options controlling a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Initial expansion flag of every folder
    pub expanded: bool,
    /// Report a path that is both a file and a directory instead of letting
    /// the directory win
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            expanded: true,
            strict: false,
        }
    }
}

/// Build a tree with default options.
///
/// Never fails: a path reported both as a file and as an ancestor directory
/// becomes a folder.
pub fn build<I>(records: I) -> FileTree
where
    I: IntoIterator,
    I::Item: Into<ChangeRecord>,
{
    let draft = Draft::collect(records);
    for path in draft.conflicts() {
        warn!(path = %path, "path reported as both file and directory, keeping directory");
    }
    draft.freeze(true)
}

/// Build a tree with explicit options.
///
/// With `strict` set, the first file/directory conflict is returned as
/// [`ChronosError::PathConflict`].
pub fn build_with<I>(records: I, options: &BuildOptions) -> ChronosResult<FileTree>
where
    I: IntoIterator,
    I::Item: Into<ChangeRecord>,
{
    let draft = Draft::collect(records);
    let conflicts = draft.conflicts();
    if let Some(path) = conflicts.first() {
        if options.strict {
            return Err(ChronosError::PathConflict { path: path.clone() });
        }
        for path in &conflicts {
            warn!(path = %path, "path reported as both file and directory, keeping directory");
        }
    }
    Ok(draft.freeze(options.expanded))
}

/// Split a record path into its non-blank segments.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.trim().is_empty()).collect()
}

/// Mutable arena used while records are being folded in.
#[derive(Default)]
struct Draft {
    nodes: Vec<DraftNode>,
    roots: Vec<usize>,
    by_path: HashMap<String, usize>,
    records: usize,
    skipped: usize,
}

struct DraftNode {
    name: String,
    path: String,
    /// Set when some record names this exact path
    reported_as_file: bool,
    change: Option<ChangeKind>,
    children: Vec<usize>,
}

impl Draft {
    fn collect<I>(records: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ChangeRecord>,
    {
        let mut draft = Draft::default();
        for record in records {
            draft.insert(record.into());
        }
        debug!(
            records = draft.records,
            skipped = draft.skipped,
            nodes = draft.nodes.len(),
            "collected change records"
        );
        draft
    }

    fn insert(&mut self, record: ChangeRecord) {
        self.records += 1;
        let parts = segments(&record.path);
        if parts.is_empty() {
            self.skipped += 1;
            return;
        }

        let mut parent: Option<usize> = None;
        let mut prefix = String::new();
        for (i, part) in parts.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);

            let idx = match self.by_path.get(&prefix) {
                Some(&idx) => idx,
                None => {
                    let idx = self.nodes.len();
                    self.nodes.push(DraftNode {
                        name: (*part).to_string(),
                        path: prefix.clone(),
                        reported_as_file: false,
                        change: None,
                        children: Vec::new(),
                    });
                    self.by_path.insert(prefix.clone(), idx);
                    match parent {
                        Some(p) => self.nodes[p].children.push(idx),
                        None => self.roots.push(idx),
                    }
                    idx
                }
            };

            if i + 1 == parts.len() {
                let node = &mut self.nodes[idx];
                node.reported_as_file = true;
                node.change = record.status;
            }
            parent = Some(idx);
        }
    }

    /// Paths reported as files that also have children, in input order.
    fn conflicts(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.reported_as_file && !n.children.is_empty())
            .map(|n| n.path.clone())
            .collect()
    }

    fn freeze(&self, expanded: bool) -> FileTree {
        let roots = self.freeze_level(&self.roots, expanded);
        let tree = FileTree::new(roots);
        debug!(files = tree.file_count(), roots = tree.roots().len(), "built change tree");
        tree
    }

    fn freeze_level(&self, level: &[usize], expanded: bool) -> Vec<Arc<TreeNode>> {
        let mut nodes: Vec<Arc<TreeNode>> = level
            .iter()
            .map(|&idx| {
                let draft = &self.nodes[idx];
                if draft.children.is_empty() {
                    TreeNode::file(&draft.name, &draft.path, draft.change)
                } else {
                    let children = self.freeze_level(&draft.children, expanded);
                    TreeNode::folder(&draft.name, &draft.path, children, expanded)
                }
            })
            .map(Arc::new)
            .collect();
        nodes.sort_by_cached_key(|node| sibling_key(node));
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{NodeKind, SelectionState};

    fn names(nodes: &[Arc<TreeNode>]) -> Vec<&str> {
        nodes.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn build_empty_input() {
        let tree = build(Vec::<ChangeRecord>::new());
        assert!(tree.is_empty());
    }

    #[test]
    fn build_single_nested_file() {
        let tree = build([ChangeRecord::unchanged("a/b.txt")]);

        assert_eq!(tree.roots().len(), 1);
        let a = &tree.roots()[0];
        assert_eq!(a.kind(), NodeKind::Folder);
        assert_eq!(a.id(), "a");
        assert_eq!(names(a.children()), vec!["b.txt"]);
        assert_eq!(a.children()[0].kind(), NodeKind::File);
        assert_eq!(a.children()[0].path(), "a/b.txt");
    }

    #[test]
    fn build_folders_before_files() {
        let tree = build([
            ChangeRecord::unchanged("b.txt"),
            ChangeRecord::unchanged("a/x.txt"),
        ]);
        assert_eq!(names(tree.roots()), vec!["a", "b.txt"]);

        let reversed = build([
            ChangeRecord::unchanged("a/x.txt"),
            ChangeRecord::unchanged("b.txt"),
        ]);
        assert_eq!(names(reversed.roots()), vec!["a", "b.txt"]);
    }

    #[test]
    fn build_sorts_names_case_insensitively() {
        let tree = build([
            ChangeRecord::unchanged("Zeta.md"),
            ChangeRecord::unchanged("alpha.md"),
            ChangeRecord::unchanged("beta/z.md"),
            ChangeRecord::unchanged("Alpha/z.md"),
        ]);
        assert_eq!(names(tree.roots()), vec!["Alpha", "beta", "alpha.md", "Zeta.md"]);
    }

    #[test]
    fn build_collates_accented_and_mixed_case_names() {
        let tree = build(
            ["zebra.txt", "éclair.txt", "fig.txt", "a.txt", "A.txt", "Eclair.txt"]
                .map(ChangeRecord::unchanged),
        );
        assert_eq!(
            names(tree.roots()),
            vec!["a.txt", "A.txt", "Eclair.txt", "éclair.txt", "fig.txt", "zebra.txt"]
        );
    }

    #[test]
    fn build_duplicate_path_last_write_wins() {
        let tree = build([
            ("a.txt", ChangeKind::Modified),
            ("a.txt", ChangeKind::Added),
        ]);
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.roots()[0].change_kind(), Some(ChangeKind::Added));
    }

    #[test]
    fn build_shares_folders_across_records() {
        let tree = build([
            ("src/ui/menu.rs", ChangeKind::Modified),
            ("src/lib.rs", ChangeKind::Added),
            ("src/ui/input.rs", ChangeKind::Deleted),
        ]);
        let src = &tree.roots()[0];
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(names(src.children()), vec!["ui", "lib.rs"]);
        assert_eq!(names(src.children()[0].children()), vec!["input.rs", "menu.rs"]);
        assert_eq!(tree.file_count(), 3);
    }

    #[test]
    fn build_folders_never_carry_change_kind() {
        let tree = build([("docs/guide.md", ChangeKind::Added)]);
        assert_eq!(tree.roots()[0].change_kind(), None);
        assert_eq!(
            tree.find("docs/guide.md").unwrap().change_kind(),
            Some(ChangeKind::Added)
        );
    }

    #[test]
    fn build_skips_blank_paths_and_segments() {
        let tree = build([
            ChangeRecord::unchanged(""),
            ChangeRecord::unchanged("   "),
            ChangeRecord::unchanged("a//b.txt"),
            ChangeRecord::unchanged("c.txt/"),
        ]);
        assert_eq!(names(tree.roots()), vec!["a", "c.txt"]);
        assert!(tree.find("a/b.txt").is_some());
    }

    #[test]
    fn build_directory_wins_over_file() {
        let tree = build([
            ("lib", ChangeKind::Deleted),
            ("lib/mod.rs", ChangeKind::Added),
        ]);
        let lib = &tree.roots()[0];
        assert!(lib.is_folder());
        assert_eq!(lib.change_kind(), None);
        assert_eq!(lib.children().len(), 1);

        let reversed = build([
            ("lib/mod.rs", ChangeKind::Added),
            ("lib", ChangeKind::Deleted),
        ]);
        assert!(reversed.roots()[0].is_folder());
    }

    #[test]
    fn build_with_strict_reports_conflict() {
        let options = BuildOptions {
            strict: true,
            ..BuildOptions::default()
        };
        let err = build_with(
            [("lib", ChangeKind::Deleted), ("lib/mod.rs", ChangeKind::Added)],
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, ChronosError::PathConflict { ref path } if path == "lib"));
    }

    #[test]
    fn build_with_collapsed_folders() {
        let options = BuildOptions {
            expanded: false,
            ..BuildOptions::default()
        };
        let tree = build_with([("a/b/c.txt", ChangeKind::Added)], &options).unwrap();
        assert!(tree.iter().filter(|n| n.is_folder()).all(|n| !n.is_expanded()));
    }

    #[test]
    fn build_starts_unselected_and_expanded() {
        let tree = build([("a/b.txt", ChangeKind::Added)]);
        assert!(tree.iter().all(|n| n.selection() == SelectionState::Unselected));
        assert!(tree.roots()[0].is_expanded());
    }

    #[test]
    fn change_record_accepts_file_alias() {
        let records: Vec<ChangeRecord> =
            serde_json::from_str(r#"[{"file": "a.txt", "status": "added"}, {"path": "b.txt"}]"#)
                .unwrap();
        assert_eq!(records[0], ChangeRecord::changed("a.txt", ChangeKind::Added));
        assert_eq!(records[1], ChangeRecord::unchanged("b.txt"));
    }
}
