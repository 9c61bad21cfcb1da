use std::process::ExitCode;

use anyhow::{Context as _, Result};

use chronos::ui::render_tree;
use chronos::{build_with, limit_depth, FileTree};

use super::context::{read_records, Context};
use crate::cli::InputArgs;

pub fn cmd_tree(
    ctx: &Context,
    input: &InputArgs,
    max_depth: Option<usize>,
    collapsed: bool,
) -> Result<ExitCode> {
    let records = read_records(input)?;

    let mut options = ctx.build_options();
    if collapsed {
        options.expanded = false;
    }
    let tree = build_with(records, &options).context("failed to build change tree")?;
    let tree = limit_depth(&tree, ctx.max_depth(max_depth));

    print_tree(ctx, &tree, "No changes")?;
    Ok(ExitCode::SUCCESS)
}

/// Write a tree to stdout as rows, or as JSON with `--json`.
pub(super) fn print_tree(ctx: &Context, tree: &FileTree, empty_message: &str) -> Result<()> {
    if ctx.json {
        let json = serde_json::to_string_pretty(tree).context("failed to serialize tree")?;
        println!("{}", json);
        return Ok(());
    }

    if tree.is_empty() {
        eprintln!("{}", empty_message);
        return Ok(());
    }
    print!("{}", render_tree(tree, &ctx.stdout_render_options(false)));
    Ok(())
}
