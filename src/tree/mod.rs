//! Change tree engine
//!
//! Turns flat change records into a folder hierarchy and keeps expansion and
//! tri-state selection consistent across immutable snapshots.
//!
//! # Module Structure
//!
//! - `node` - TreeNode, FileTree snapshot and shared plumbing
//! - `builder` - Tree construction from change records
//! - `limit` - Depth-limited presentation with ellipsis nodes
//! - `expansion` - Expand/collapse state and visible rows
//! - `selection` - Tri-state toggling, aggregation and path extraction
//! - `session` - Selection working set for one snapshot dialog

pub mod builder;
pub mod expansion;
pub mod limit;
mod node;
pub mod selection;
mod session;

pub use builder::{build, build_with, BuildOptions, ChangeRecord};
pub use expansion::{visible_rows, VisibleRow};
pub use limit::{build_limited, limit_depth, DEFAULT_MAX_DEPTH};
pub use node::{fold_name, ChangeKind, FileTree, NodeKind, SelectionState, TreeNode, ELLIPSIS};
pub use selection::{selected_paths, SelectionOutcome};
pub use session::SelectionSession;
