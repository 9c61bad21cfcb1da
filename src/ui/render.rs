//! Terminal rendering of change trees.
//!
//! Rendering produces plain strings; the interactive loop and the `tree`
//! command decide where they are written.

use crossterm::style::Stylize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tree::{visible_rows, FileTree, VisibleRow};

use super::theme::{self, colors, Icons};

/// How rows are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub icons: Icons,
    /// Show the tri-state selection icon
    pub selection: bool,
    /// Color change markers and folded tails
    pub color: bool,
    /// Truncate rows to this many columns
    pub width: Option<usize>,
}

impl RenderOptions {
    pub fn plain(unicode: bool) -> Self {
        Self {
            icons: Icons::new(unicode),
            selection: true,
            color: false,
            width: None,
        }
    }
}

/// Render one visible row.
///
/// `cursor` adds a cursor column: `Some(true)` marks the active row,
/// `Some(false)` pads so rows stay aligned.
pub fn render_row(row: &VisibleRow, cursor: Option<bool>, options: &RenderOptions) -> String {
    let icons = &options.icons;
    let node = &row.node;

    let mut prefix = String::new();
    match cursor {
        Some(true) => {
            prefix.push_str(icons.cursor());
            prefix.push(' ');
        }
        Some(false) => prefix.push_str(&" ".repeat(icons.cursor().width() + 1)),
        None => {}
    }
    prefix.push_str(&"  ".repeat(row.depth));

    let expand_icon = icons.expansion(node.is_expanded());
    if node.is_folder() {
        prefix.push_str(expand_icon);
        prefix.push(' ');
    } else {
        prefix.push_str(&" ".repeat(expand_icon.width() + 1));
    }

    if options.selection {
        prefix.push_str(icons.selection(node.selection()));
        prefix.push(' ');
    }

    let (label, tail) = match node.tail() {
        Some(tail) => (icons.fold().to_string(), Some(format!("/{}", tail))),
        None => (node.name().to_string(), None),
    };

    let (suffix_plain, suffix_styled) = suffix(row, options);

    let mut text = label;
    if let Some(tail) = &tail {
        text.push_str(tail);
    }
    if let Some(width) = options.width {
        let budget = width.saturating_sub(prefix.width() + suffix_plain.width());
        if text.width() > budget {
            text = truncate_to_width(&text, budget, icons.truncated());
            return format!("{}{}{}", prefix, text, suffix_styled);
        }
    }

    // Folded tails are dimmed when colors are on.
    if let (true, Some(tail)) = (options.color, &tail) {
        let head = icons.fold();
        return format!(
            "{}{}{}{}",
            prefix,
            head,
            tail.as_str().with(colors::DIM),
            suffix_styled
        );
    }
    format!("{}{}{}", prefix, text, suffix_styled)
}

fn suffix(row: &VisibleRow, options: &RenderOptions) -> (String, String) {
    let node = &row.node;
    if node.is_folder() {
        let count = node.file_count();
        let plain = if count == 1 {
            String::from(" (1 file)")
        } else {
            format!(" ({} files)", count)
        };
        return (plain.clone(), plain);
    }
    match node.change_kind() {
        Some(kind) => {
            let marker = theme::marker(kind);
            let plain = format!(" [{}]", marker);
            let styled = if options.color {
                format!(" [{}]", marker.with(theme::marker_color(kind)))
            } else {
                plain.clone()
            };
            (plain, styled)
        }
        None => (String::new(), String::new()),
    }
}

/// Render every visible row of `tree`, one per line, without a cursor.
pub fn render_tree(tree: &FileTree, options: &RenderOptions) -> String {
    let mut out = String::new();
    for row in visible_rows(tree) {
        out.push_str(&render_row(&row, None, options));
        out.push('\n');
    }
    out
}

/// Cut `text` to at most `max` columns, ending with `marker` when shortened.
pub fn truncate_to_width(text: &str, max: usize, marker: &str) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let marker_width = marker.width();
    if max <= marker_width {
        return marker.chars().take(max).collect();
    }

    let budget = max - marker_width;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(marker);
    out
}

/// Render the status bar showing selection counts
pub fn render_status_bar(selected: usize, total: usize, icons: &Icons) -> String {
    use crate::tree::SelectionState::*;

    format!(
        "Selected: {}/{} files\n\n{} = selected    {} = partial    {} = not selected",
        selected,
        total,
        icons.selection(Selected),
        icons.selection(Indeterminate),
        icons.selection(Unselected)
    )
}

/// Render the help bar showing keyboard shortcuts
pub fn render_help_bar() -> String {
    String::from(
        "[a] All    [n] None    [i] Invert    [Enter] Confirm    [q] Quit\n\
         (Use ↑↓ to navigate, Space to toggle, →← to expand/collapse)",
    )
}
