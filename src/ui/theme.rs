//! Design tokens for the chronos terminal UI.
//!
//! All icons and colors used by the renderer are sourced from this module.

use crossterm::style::Color;

use crate::tree::{ChangeKind, SelectionState};

pub mod colors {
    use super::Color;

    pub const ADDED: Color = Color::Green;
    pub const MODIFIED: Color = Color::Yellow;
    pub const DELETED: Color = Color::Red;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    // Selection states.
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
    pub const PARTIAL: &str = "◐";

    // Tree expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    pub const CURSOR: &str = "›";
    pub const TRUNCATED: &str = "…";
    pub const RULE: &str = "─";
}

pub mod icons_ascii {
    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const PARTIAL: &str = "[-]";

    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const CURSOR: &str = ">";
    pub const TRUNCATED: &str = "...";
    pub const RULE: &str = "-";
}

/// Change markers shown after file names
pub mod markers {
    pub const ADDED: &str = "A";
    pub const MODIFIED: &str = "M";
    pub const DELETED: &str = "D";
}

/// Icon set chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icons {
    unicode: bool,
}

impl Icons {
    /// `unicode` picks ●/○ style glyphs, otherwise `[x]`/`[ ]`.
    pub fn new(unicode: bool) -> Self {
        Self { unicode }
    }

    fn pick(&self, unicode: &'static str, ascii: &'static str) -> &'static str {
        if self.unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn selection(&self, state: SelectionState) -> &'static str {
        match state {
            SelectionState::Selected => self.pick(icons::SELECTED, icons_ascii::SELECTED),
            SelectionState::Unselected => self.pick(icons::UNSELECTED, icons_ascii::UNSELECTED),
            SelectionState::Indeterminate => self.pick(icons::PARTIAL, icons_ascii::PARTIAL),
        }
    }

    pub fn expansion(&self, expanded: bool) -> &'static str {
        if expanded {
            self.pick(icons::EXPAND, icons_ascii::EXPAND)
        } else {
            self.pick(icons::COLLAPSE, icons_ascii::COLLAPSE)
        }
    }

    pub fn cursor(&self) -> &'static str {
        self.pick(icons::CURSOR, icons_ascii::CURSOR)
    }

    pub fn truncated(&self) -> &'static str {
        self.pick(icons::TRUNCATED, icons_ascii::TRUNCATED)
    }

    pub fn rule(&self) -> &'static str {
        self.pick(icons::RULE, icons_ascii::RULE)
    }

    /// Name shown for folded nodes; the ellipsis glyph has no ASCII form.
    pub fn fold(&self) -> &'static str {
        self.pick(crate::tree::ELLIPSIS, icons_ascii::TRUNCATED)
    }
}

pub fn marker(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => markers::ADDED,
        ChangeKind::Modified => markers::MODIFIED,
        ChangeKind::Deleted => markers::DELETED,
    }
}

pub fn marker_color(kind: ChangeKind) -> Color {
    match kind {
        ChangeKind::Added => colors::ADDED,
        ChangeKind::Modified => colors::MODIFIED,
        ChangeKind::Deleted => colors::DELETED,
    }
}
