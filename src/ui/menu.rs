//! TreeMenu state management and action handling.
//!
//! The menu is a cursor over the visible rows of a [`SelectionSession`]'s
//! current snapshot. Every action goes through the session, so the menu never
//! holds selection state of its own.

use crate::tree::{visible_rows, SelectionSession, VisibleRow};

use super::render::{render_help_bar, render_row, render_status_bar, RenderOptions};
use super::theme::Icons;

/// Tree menu action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeAction {
    /// Move cursor up
    Up,
    /// Move cursor down
    Down,
    /// Jump to the first row
    First,
    /// Jump to the last row
    Last,
    /// Toggle selection
    Toggle,
    /// Expand folder
    Expand,
    /// Collapse folder, or move to the parent row
    Collapse,
    /// Select all
    SelectAll,
    /// Select none
    SelectNone,
    /// Invert selection
    Invert,
    /// Confirm selection
    Confirm,
    /// Quit without confirming
    Quit,
}

/// Interactive tree menu for choosing snapshot files
pub struct TreeMenu {
    session: SelectionSession,
    rows: Vec<VisibleRow>,
    cursor: usize,
}

impl TreeMenu {
    pub fn new(session: SelectionSession) -> Self {
        let mut menu = Self {
            session,
            rows: Vec::new(),
            cursor: 0,
        };
        menu.refresh_rows();
        menu
    }

    fn refresh_rows(&mut self) {
        self.rows = visible_rows(self.session.tree());
        if !self.rows.is_empty() && self.cursor >= self.rows.len() {
            self.cursor = self.rows.len() - 1;
        }
    }

    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Row under the cursor
    pub fn current(&self) -> Option<&VisibleRow> {
        self.rows.get(self.cursor)
    }

    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    pub fn selected_count(&self) -> usize {
        self.session.selected_count()
    }

    pub fn total_count(&self) -> usize {
        self.session.total_count()
    }

    /// Handle a tree action. Returns `true` when the menu should close.
    pub fn handle_action(&mut self, action: TreeAction) -> bool {
        match action {
            TreeAction::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            TreeAction::Down => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
                false
            }
            TreeAction::First => {
                self.cursor = 0;
                false
            }
            TreeAction::Last => {
                self.cursor = self.rows.len().saturating_sub(1);
                false
            }
            TreeAction::Toggle => {
                if let Some(id) = self.current_id() {
                    self.session.toggle_node(&id);
                    self.refresh_rows();
                }
                false
            }
            TreeAction::Expand => {
                if let Some(row) = self.current() {
                    if row.node.is_folder() && !row.node.is_expanded() {
                        let id = row.node.id().to_string();
                        self.session.set_expanded(&id, true);
                        self.refresh_rows();
                    }
                }
                false
            }
            TreeAction::Collapse => {
                self.collapse_or_leave();
                false
            }
            TreeAction::SelectAll => {
                self.session.select_all();
                self.refresh_rows();
                false
            }
            TreeAction::SelectNone => {
                self.session.select_none();
                self.refresh_rows();
                false
            }
            TreeAction::Invert => {
                self.session.invert();
                self.refresh_rows();
                false
            }
            TreeAction::Confirm => true,
            TreeAction::Quit => true,
        }
    }

    fn current_id(&self) -> Option<String> {
        self.current().map(|row| row.node.id().to_string())
    }

    /// Collapse an expanded folder; anywhere else jump to the parent row.
    fn collapse_or_leave(&mut self) {
        let Some(row) = self.current() else {
            return;
        };
        if row.node.is_folder() && row.node.is_expanded() {
            let id = row.node.id().to_string();
            self.session.set_expanded(&id, false);
            self.refresh_rows();
            return;
        }
        if row.depth == 0 {
            return;
        }
        let parent_depth = row.depth - 1;
        if let Some(parent) = self.rows[..self.cursor]
            .iter()
            .rposition(|r| r.depth == parent_depth)
        {
            self.cursor = parent;
        }
    }

    /// Finish and return the selected paths, sorted.
    pub fn confirm(self) -> Vec<String> {
        self.session.confirm()
    }

    /// Abandon the menu and its session.
    pub fn cancel(self) {
        self.session.cancel();
    }

    /// Render the visible rows with the cursor column
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            out.push_str(&render_row(row, Some(i == self.cursor), options));
            out.push('\n');
        }
        out
    }

    pub fn render_status_bar(&self, icons: &Icons) -> String {
        render_status_bar(self.selected_count(), self.total_count(), icons)
    }

    pub fn render_help_bar(&self) -> String {
        render_help_bar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{build, build_limited, build_with, BuildOptions, ChangeKind, SelectionState};

    fn menu() -> TreeMenu {
        let tree = build([
            ("home/a.md", ChangeKind::Added),
            ("home/b.md", ChangeKind::Modified),
            ("project/c.md", ChangeKind::Deleted),
        ]);
        TreeMenu::new(SelectionSession::open_empty(&tree))
    }

    fn collapsed_menu() -> TreeMenu {
        let options = BuildOptions {
            expanded: false,
            ..BuildOptions::default()
        };
        let tree = build_with(
            [
                ("home/a.md", ChangeKind::Added),
                ("home/b.md", ChangeKind::Modified),
                ("project/c.md", ChangeKind::Deleted),
            ],
            &options,
        )
        .unwrap();
        TreeMenu::new(SelectionSession::open_empty(&tree))
    }

    fn ids(menu: &TreeMenu) -> Vec<&str> {
        menu.rows().iter().map(|r| r.node.id()).collect()
    }

    #[test]
    fn menu_lists_visible_rows_in_tree_order() {
        let menu = menu();
        assert_eq!(
            ids(&menu),
            vec!["home", "home/a.md", "home/b.md", "project", "project/c.md"]
        );
        assert_eq!(menu.current().unwrap().node.id(), "home");
    }

    #[test]
    fn menu_cursor_bounds() {
        let mut menu = menu();
        menu.handle_action(TreeAction::Up);
        assert_eq!(menu.cursor_position(), 0);

        for _ in 0..10 {
            menu.handle_action(TreeAction::Down);
        }
        assert_eq!(menu.cursor_position(), 4);

        menu.handle_action(TreeAction::First);
        assert_eq!(menu.cursor_position(), 0);
        menu.handle_action(TreeAction::Last);
        assert_eq!(menu.cursor_position(), 4);
    }

    #[test]
    fn menu_expand_and_collapse() {
        let mut menu = collapsed_menu();
        assert_eq!(ids(&menu), vec!["home", "project"]);

        menu.handle_action(TreeAction::Expand);
        assert_eq!(ids(&menu), vec!["home", "home/a.md", "home/b.md", "project"]);

        menu.handle_action(TreeAction::Collapse);
        assert_eq!(ids(&menu), vec!["home", "project"]);
    }

    #[test]
    fn menu_collapse_on_file_moves_to_parent() {
        let mut menu = menu();
        menu.handle_action(TreeAction::Down);
        menu.handle_action(TreeAction::Down);
        assert_eq!(menu.current().unwrap().node.id(), "home/b.md");

        menu.handle_action(TreeAction::Collapse);
        assert_eq!(menu.current().unwrap().node.id(), "home");
        assert_eq!(menu.rows().len(), 5);
    }

    #[test]
    fn menu_expand_file_no_effect() {
        let mut menu = menu();
        menu.handle_action(TreeAction::Down);
        menu.handle_action(TreeAction::Expand);
        assert_eq!(menu.rows().len(), 5);
    }

    #[test]
    fn menu_cursor_stays_valid_after_collapse() {
        let mut menu = menu();
        menu.handle_action(TreeAction::Last);
        menu.handle_action(TreeAction::Collapse);
        menu.handle_action(TreeAction::Collapse);
        assert_eq!(ids(&menu), vec!["home", "home/a.md", "home/b.md", "project"]);
        assert!(menu.cursor_position() < menu.rows().len());
    }

    #[test]
    fn menu_toggle_collapsed_folder_selects_hidden_children() {
        let mut menu = collapsed_menu();
        menu.handle_action(TreeAction::Toggle);
        assert_eq!(menu.selected_count(), 2);
        assert_eq!(menu.current().unwrap().node.selection(), SelectionState::Selected);

        menu.handle_action(TreeAction::Toggle);
        assert_eq!(menu.selected_count(), 0);
    }

    #[test]
    fn menu_toggle_file_makes_parent_partial() {
        let mut menu = menu();
        menu.handle_action(TreeAction::Down);
        menu.handle_action(TreeAction::Toggle);
        assert_eq!(menu.rows()[0].node.selection(), SelectionState::Indeterminate);
        assert_eq!(menu.confirm(), vec!["home/a.md"]);
    }

    #[test]
    fn menu_bulk_actions() {
        let mut menu = menu();
        menu.handle_action(TreeAction::SelectAll);
        assert_eq!(menu.selected_count(), 3);
        menu.handle_action(TreeAction::SelectNone);
        assert_eq!(menu.selected_count(), 0);

        menu.handle_action(TreeAction::Down);
        menu.handle_action(TreeAction::Toggle);
        menu.handle_action(TreeAction::Invert);
        assert_eq!(menu.confirm(), vec!["home/b.md", "project/c.md"]);
    }

    #[test]
    fn menu_toggle_folded_row_selects_real_path() {
        let tree = build_limited([("a/b/c/d.txt", ChangeKind::Added)], 1);
        let mut menu = TreeMenu::new(SelectionSession::open_empty(&tree));
        menu.handle_action(TreeAction::Down);
        assert!(menu.current().unwrap().node.is_ellipsis());
        menu.handle_action(TreeAction::Toggle);
        assert_eq!(menu.confirm(), vec!["a/b/c/d.txt"]);
    }

    #[test]
    fn menu_confirm_and_quit_close() {
        let mut menu = menu();
        assert!(menu.handle_action(TreeAction::Confirm));
        assert!(menu.handle_action(TreeAction::Quit));
        assert!(!menu.handle_action(TreeAction::Down));
        menu.cancel();
    }

    #[test]
    fn menu_render_marks_cursor_row() {
        let mut menu = menu();
        menu.handle_action(TreeAction::Down);
        let rendered = menu.render(&RenderOptions::plain(false));
        let lines: Vec<_> = rendered.lines().collect();
        assert!(lines[0].starts_with("  [v]"));
        assert!(lines[1].starts_with(">"));
        assert!(lines[1].ends_with("a.md [A]"));
        assert!(menu
            .render_status_bar(&Icons::new(false))
            .starts_with("Selected: 0/3 files"));
    }

    #[test]
    fn menu_empty_tree() {
        let menu = TreeMenu::new(SelectionSession::open_empty(&crate::tree::FileTree::empty()));
        assert!(menu.rows().is_empty());
        assert!(menu.current().is_none());
        assert_eq!(menu.total_count(), 0);
    }
}
