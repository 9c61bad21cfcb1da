//! Directory listing for plain browsing.
//!
//! Walks a directory with the `ignore` crate and reports every file as a
//! [`ChangeRecord`] without a change kind.

use std::path::Path;

use ignore::WalkBuilder;
use tracing::{debug, trace};

use crate::error::{ChronosError, ChronosResult};
use crate::status::is_system_file;
use crate::tree::ChangeRecord;

/// List every file below `root` as root-relative, `/`-separated records.
///
/// Hidden entries and system files are skipped and `.gitignore` rules are
/// honored even outside a git checkout. The result is sorted by path.
pub fn list_directory(root: &Path) -> ChronosResult<Vec<ChangeRecord>> {
    if !root.is_dir() {
        return Err(ChronosError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .follow_links(false)
        .build();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if path.is_empty() || is_system_file(&path) {
            trace!(path = %path, "skipping entry");
            continue;
        }
        paths.push(path);
    }

    paths.sort();
    debug!(root = %root.display(), files = paths.len(), "listed directory");
    Ok(paths.into_iter().map(ChangeRecord::unchanged).collect())
}
