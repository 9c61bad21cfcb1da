//! Selection working set for one "create snapshot" dialog.
//!
//! A session owns the current snapshot and the selected path set derived
//! from it. It lives until the dialog is confirmed or cancelled; nothing is
//! kept afterwards.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use tracing::debug;

use super::expansion;
use super::node::{FileTree, SelectionState};
use super::selection::{self, SelectionOutcome};

#[derive(Debug, Clone)]
pub struct SelectionSession {
    tree: FileTree,
    selected: BTreeSet<String>,
}

impl SelectionSession {
    /// Open a session with `initial` preselected.
    pub fn open<S>(tree: &FileTree, initial: &BTreeSet<S>) -> Self
    where
        S: Borrow<str> + Ord,
    {
        let tree = selection::initialize_from_paths(tree, initial);
        let selected = selection::selected_paths(&tree);
        debug!(
            selected = selected.len(),
            total = tree.file_count(),
            "opened selection session"
        );
        Self { tree, selected }
    }

    /// Open a session with every file preselected.
    pub fn open_all(tree: &FileTree) -> Self {
        Self::from_outcome(selection::select_all(tree))
    }

    /// Open a session with nothing selected.
    pub fn open_empty(tree: &FileTree) -> Self {
        Self::from_outcome(selection::select_none(tree))
    }

    fn from_outcome(outcome: SelectionOutcome) -> Self {
        Self {
            tree: outcome.tree,
            selected: outcome.selected_paths,
        }
    }

    fn apply(&mut self, outcome: SelectionOutcome) {
        self.tree = outcome.tree;
        self.selected = outcome.selected_paths;
    }

    /// Current snapshot
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn selected_paths(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn total_count(&self) -> usize {
        self.tree.file_count()
    }

    /// Select or deselect a node and its subtree.
    pub fn toggle(&mut self, id: &str, selected: bool) {
        let outcome = selection::toggle(&self.tree, id, selected);
        self.apply(outcome);
    }

    /// Flip a node: a selected node is deselected, anything else is
    /// selected. Unknown ids are ignored.
    pub fn toggle_node(&mut self, id: &str) {
        let Some(node) = self.tree.find(id) else {
            debug!(id, "toggle target not found");
            return;
        };
        let select = node.selection() != SelectionState::Selected;
        self.toggle(id, select);
    }

    pub fn select_all(&mut self) {
        let outcome = selection::select_all(&self.tree);
        self.apply(outcome);
    }

    pub fn select_none(&mut self) {
        let outcome = selection::select_none(&self.tree);
        self.apply(outcome);
    }

    pub fn invert(&mut self) {
        let outcome = selection::invert(&self.tree);
        self.apply(outcome);
    }

    /// Expand or collapse a folder. Selection is unaffected.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        self.tree = expansion::set_expanded(&self.tree, id, expanded);
    }

    /// Finish the session and hand back the selected paths, sorted.
    pub fn confirm(self) -> Vec<String> {
        debug!(selected = self.selected.len(), "selection confirmed");
        self.selected.into_iter().collect()
    }

    /// Abandon the session.
    pub fn cancel(self) {
        debug!("selection cancelled");
    }
}
