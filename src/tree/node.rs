//! TreeNode data structure and snapshot plumbing.
//!
//! A [`FileTree`] is an immutable snapshot: a forest of reference-counted
//! [`TreeNode`]s. Every operation that changes expansion or selection returns
//! a new snapshot built by path copying, so nodes outside the edited spine are
//! shared with the previous snapshot (`Arc::ptr_eq` holds for them).

use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Display name used for folded deep paths.
pub const ELLIPSIS: &str = "…";

/// How a file diverges from the last recorded snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
        }
    }
}

/// Node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// Selection state for a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// Nothing beneath this node is selected (○)
    #[default]
    Unselected,
    /// Everything beneath this node is selected (●)
    Selected,
    /// Some but not all descendants are selected (◐)
    Indeterminate,
}

impl SelectionState {
    pub fn from_bool(selected: bool) -> Self {
        if selected {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }

    /// Aggregate state of a folder from the states of its immediate children.
    ///
    /// A folder without children counts as unselected.
    pub fn aggregate<'a>(children: impl IntoIterator<Item = &'a SelectionState>) -> Self {
        let mut any_selected = false;
        let mut any_unselected = false;
        for state in children {
            match state {
                SelectionState::Selected => any_selected = true,
                SelectionState::Unselected => any_unselected = true,
                SelectionState::Indeterminate => return SelectionState::Indeterminate,
            }
            if any_selected && any_unselected {
                return SelectionState::Indeterminate;
            }
        }
        if any_selected {
            SelectionState::Selected
        } else {
            SelectionState::Unselected
        }
    }
}

/// A node in a change tree.
///
/// The node id is its full slash-delimited path, so [`TreeNode::id`] and
/// [`TreeNode::path`] return the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    name: String,
    path: String,
    kind: NodeKind,
    change: Option<ChangeKind>,
    children: Vec<Arc<TreeNode>>,
    expanded: bool,
    selection: SelectionState,
    /// Remaining path for folded nodes created by depth limiting
    tail: Option<String>,
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TreeNode", 9)?;
        state.serialize_field("id", self.id())?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("kind", &self.kind)?;
        match self.change {
            Some(change) => state.serialize_field("changeKind", &change)?,
            None => state.skip_field("changeKind")?,
        }
        state.serialize_field("expanded", &self.expanded)?;
        state.serialize_field("selectionState", &self.selection)?;
        match &self.tail {
            Some(tail) => state.serialize_field("tail", tail)?,
            None => state.skip_field("tail")?,
        }
        if self.children.is_empty() {
            state.skip_field("children")?;
        } else {
            state.serialize_field("children", &self.children)?;
        }
        state.end()
    }
}

impl TreeNode {
    pub(crate) fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        change: Option<ChangeKind>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            change,
            children: Vec::new(),
            expanded: false,
            selection: SelectionState::Unselected,
            tail: None,
        }
    }

    pub(crate) fn folder(
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<Arc<TreeNode>>,
        expanded: bool,
    ) -> Self {
        let selection = SelectionState::aggregate(children.iter().map(|c| &c.selection));
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Folder,
            change: None,
            children,
            expanded,
            selection,
            tail: None,
        }
    }

    /// Folded stand-in for a file hidden below the display depth.
    pub(crate) fn ellipsis(file: &TreeNode, tail: impl Into<String>) -> Self {
        Self {
            name: ELLIPSIS.to_string(),
            path: file.path.clone(),
            kind: NodeKind::File,
            change: file.change,
            children: Vec::new(),
            expanded: false,
            selection: file.selection,
            tail: Some(tail.into()),
        }
    }

    /// Unique key of this node (its full path)
    pub fn id(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn change_kind(&self) -> Option<ChangeKind> {
        self.change
    }

    pub fn children(&self) -> &[Arc<TreeNode>] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// True for the synthetic nodes introduced by depth limiting
    pub fn is_ellipsis(&self) -> bool {
        self.tail.is_some()
    }

    /// Path remaining below the fold, for ellipsis nodes
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Number of file nodes in this subtree (1 for a file)
    pub fn file_count(&self) -> usize {
        if self.is_file() {
            1
        } else {
            self.children.iter().map(|c| c.file_count()).sum()
        }
    }

    /// Number of selected file nodes in this subtree
    pub fn selected_file_count(&self) -> usize {
        match (self.kind, self.selection) {
            (NodeKind::File, SelectionState::Selected) => 1,
            (NodeKind::File, _) | (NodeKind::Folder, SelectionState::Unselected) => 0,
            (NodeKind::Folder, _) => self.children.iter().map(|c| c.selected_file_count()).sum(),
        }
    }

    /// Find a node by id within this subtree
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.path == id {
            return Some(self);
        }
        if !is_within(&self.path, id) {
            return None;
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub(crate) fn with_expanded(&self, expanded: bool) -> Self {
        Self {
            expanded,
            ..self.clone()
        }
    }

    /// Copy of this folder with new children and a re-aggregated state.
    pub(crate) fn with_children(&self, children: Vec<Arc<TreeNode>>) -> Self {
        let selection = if self.is_folder() {
            SelectionState::aggregate(children.iter().map(|c| &c.selection))
        } else {
            self.selection
        };
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            kind: self.kind,
            change: self.change,
            children,
            expanded: self.expanded,
            selection,
            tail: self.tail.clone(),
        }
    }

    pub(crate) fn with_file_selection(&self, selection: SelectionState) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    /// Force this node and every descendant to `state`.
    ///
    /// Children already in `state` are shared as-is: a folder that is fully
    /// selected (or unselected) has every descendant in the same state.
    pub(crate) fn forced(node: &Arc<TreeNode>, state: SelectionState) -> Arc<TreeNode> {
        if node.selection == state {
            return Arc::clone(node);
        }
        let children = node
            .children
            .iter()
            .map(|c| TreeNode::forced(c, state))
            .collect();
        Arc::new(Self {
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
            change: node.change,
            children,
            expanded: node.expanded,
            selection: state,
            tail: node.tail.clone(),
        })
    }
}

/// True when `id` lies strictly below the node at `ancestor`.
pub(crate) fn is_within(ancestor: &str, id: &str) -> bool {
    id.len() > ancestor.len() + 1
        && id.starts_with(ancestor)
        && id.as_bytes()[ancestor.len()] == b'/'
}

/// Name folded for collation: decomposed, combining marks dropped and
/// lowercased, so `Éclair` and `eclair` compare equal at the first level.
pub fn fold_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collation key for siblings.
///
/// Folders come before files and real files before ellipsis nodes. Names
/// compare by folded base letters, then accents, then case with lowercase
/// first. The raw name and the full path keep the order total.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct SiblingKey {
    kind: NodeKind,
    ellipsis: bool,
    base: String,
    accents: String,
    case: String,
    name: String,
    path: String,
}

pub(crate) fn sibling_key(node: &TreeNode) -> SiblingKey {
    SiblingKey {
        kind: node.kind,
        ellipsis: node.is_ellipsis(),
        base: fold_name(&node.name),
        accents: node.name.nfd().flat_map(char::to_lowercase).collect(),
        case: node.name.chars().map(swap_case).collect(),
        name: node.name.clone(),
        path: node.path.clone(),
    }
}

/// Uppercase letters sort after lowercase ones once swapped.
fn swap_case(c: char) -> char {
    if c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else if c.is_uppercase() {
        c.to_lowercase().next().unwrap_or(c)
    } else {
        c
    }
}

/// Replace the node with `id`, rebuilding only the spine above it.
///
/// `edit` returns `None` when the target needs no change. Returns `None` when
/// the id is unknown or nothing changed, so callers can hand back the
/// original snapshot untouched.
pub(crate) fn rewrite(
    nodes: &[Arc<TreeNode>],
    id: &str,
    edit: &mut dyn FnMut(&Arc<TreeNode>) -> Option<Arc<TreeNode>>,
) -> Option<Vec<Arc<TreeNode>>> {
    for (idx, node) in nodes.iter().enumerate() {
        let replacement = if node.path == id {
            edit(node)?
        } else if node.is_folder() && is_within(&node.path, id) {
            let children = rewrite(&node.children, id, edit)?;
            Arc::new(node.with_children(children))
        } else {
            continue;
        };
        let mut out = nodes.to_vec();
        out[idx] = replacement;
        return Some(out);
    }
    None
}

/// Immutable snapshot of a change tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileTree {
    roots: Vec<Arc<TreeNode>>,
}

impl FileTree {
    pub fn new(roots: Vec<Arc<TreeNode>>) -> Self {
        Self { roots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[Arc<TreeNode>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a node anywhere in the forest by id
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.roots.iter().find_map(|r| r.find(id))
    }

    /// Depth-first iterator over every node, parents before children
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack: Vec<&TreeNode> = self.roots.iter().rev().map(|n| n.as_ref()).collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev().map(|c| c.as_ref()));
            Some(node)
        })
    }

    /// All file paths in tree order
    pub fn file_paths(&self) -> Vec<String> {
        self.iter()
            .filter(|n| n.is_file())
            .map(|n| n.path.clone())
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.roots.iter().map(|r| r.file_count()).sum()
    }

    pub fn selected_file_count(&self) -> usize {
        self.roots.iter().map(|r| r.selected_file_count()).sum()
    }
}
