mod browse;
mod context;
mod select;
mod tree;

pub use browse::cmd_browse;
pub use context::Context;
pub use select::cmd_select;
pub use tree::cmd_tree;
