//! Chronos - change tree and tri-state file selection
//!
//! Chronos turns a flat list of changed files into a folder hierarchy, keeps
//! expand/collapse and tri-state selection consistent across immutable
//! snapshots, and hands back the selected file paths for a snapshot commit.

pub mod config;
pub mod error;
pub mod logging;
pub mod scan;
pub mod status;
pub mod tree;
pub mod ui;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use error::{ChronosError, ChronosResult};
pub use scan::list_directory;
pub use status::{parse_json, parse_porcelain};
pub use tree::{
    build, build_limited, build_with, fold_name, limit_depth, selected_paths, visible_rows,
    BuildOptions, ChangeKind, ChangeRecord, FileTree, NodeKind, SelectionOutcome,
    SelectionSession, SelectionState, TreeNode, VisibleRow, DEFAULT_MAX_DEPTH,
};
