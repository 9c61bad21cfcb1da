//! Change list parsing.
//!
//! Converts `git status --porcelain` output or a JSON record list into
//! [`ChangeRecord`]s for the tree builder. OS clutter and repository
//! management files are dropped here so they never reach the tree.

use tracing::{debug, trace};

use crate::error::ChronosResult;
use crate::tree::{ChangeKind, ChangeRecord};

/// Entries that never show up in a change tree, matched against any path
/// segment.
pub const SYSTEM_FILES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    ".git",
    "node_modules",
    ".vscode",
    ".idea",
];

/// Repository management files hidden from snapshot selection.
pub const MANAGEMENT_FILES: &[&str] = &[".gitignore", ".chronos", ".gitattributes"];

/// Parse porcelain v1 status output.
///
/// Lines that are too short to hold a status code and a path are skipped,
/// as are ignored entries (`!!`).
pub fn parse_porcelain(output: &str) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    let mut filtered = 0usize;

    for line in output.lines() {
        let line = line.trim_end_matches('\r');
        if line.chars().count() < 4 {
            continue;
        }
        let Some(code) = line.get(..2) else {
            continue;
        };
        let Some(raw_path) = line.get(3..) else {
            continue;
        };
        let Some(status) = normalize_status(code) else {
            trace!(line, "skipping ignored entry");
            continue;
        };

        let path = unquote(renamed_target(raw_path));
        if path.is_empty() {
            continue;
        }
        if is_hidden_entry(&path) {
            filtered += 1;
            continue;
        }
        records.push(ChangeRecord::changed(path, status));
    }

    debug!(records = records.len(), filtered, "parsed porcelain status");
    records
}

/// Parse a JSON array of `{ "path": .., "status": .. }` records.
pub fn parse_json(input: &str) -> ChronosResult<Vec<ChangeRecord>> {
    let records: Vec<ChangeRecord> = serde_json::from_str(input)?;
    let total = records.len();
    let records: Vec<_> = records
        .into_iter()
        .filter(|r| !is_hidden_entry(&r.path))
        .collect();
    debug!(records = records.len(), filtered = total - records.len(), "parsed change list");
    Ok(records)
}

/// Map a two-letter porcelain code to a change kind.
///
/// `None` means the entry is ignored by git and carries no change.
pub fn normalize_status(code: &str) -> Option<ChangeKind> {
    let mut chars = code.chars();
    let index = chars.next().unwrap_or(' ');
    let worktree = chars.next().unwrap_or(' ');

    match (index, worktree) {
        ('?', '?') => return Some(ChangeKind::Added),
        ('!', '!') => return None,
        _ => {}
    }

    let kind = match index {
        'A' => ChangeKind::Added,
        'M' | 'R' => ChangeKind::Modified,
        'D' => ChangeKind::Deleted,
        _ => match worktree {
            'D' => ChangeKind::Deleted,
            _ => ChangeKind::Modified,
        },
    };
    Some(kind)
}

/// True for OS clutter and tool directories anywhere in the path.
pub fn is_system_file(path: &str) -> bool {
    path.split('/').any(|segment| SYSTEM_FILES.contains(&segment))
}

/// True for repository management files.
pub fn is_management_file(path: &str) -> bool {
    let mut segments = path.split('/');
    let first = segments.next().unwrap_or_default();
    let name = path.rsplit('/').next().unwrap_or_default();
    first == ".chronos" || MANAGEMENT_FILES.contains(&name)
}

fn is_hidden_entry(path: &str) -> bool {
    is_system_file(path) || is_management_file(path)
}

/// Rename entries read `old -> new`; the new path is the one that exists.
fn renamed_target(path: &str) -> &str {
    match path.rsplit_once(" -> ") {
        Some((_, new)) => new,
        None => path,
    }
}

/// Undo git's C-style quoting of unusual paths.
fn unquote(path: &str) -> String {
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('n') => bytes.push(b'\n'),
            Some('t') => bytes.push(b'\t'),
            Some('"') => bytes.push(b'"'),
            Some('\\') => bytes.push(b'\\'),
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            value = value * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(other) => {
                bytes.push(b'\\');
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
