//! Terminal presentation
//!
//! # Module Structure
//!
//! - `theme` - Icons, change markers and colors
//! - `terminal` - Capability detection
//! - `render` - Row, tree, status and help rendering
//! - `menu` - Cursor-driven TreeMenu over a selection session
//! - `input` - Keyboard mapping and the interactive loop

mod input;
mod menu;
pub mod render;
pub mod terminal;
pub mod theme;

pub use input::{key_to_action, run_interactive};
pub use menu::{TreeAction, TreeMenu};
pub use render::{render_row, render_tree, RenderOptions};
pub use terminal::{detect_capabilities, TerminalCapabilities};
pub use theme::Icons;
