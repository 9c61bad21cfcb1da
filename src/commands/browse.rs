use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use chronos::{build_with, limit_depth, list_directory};

use super::context::Context;
use super::tree::print_tree;

pub fn cmd_browse(ctx: &Context, dir: &Path, max_depth: Option<usize>) -> Result<ExitCode> {
    let records = list_directory(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?;
    let tree = build_with(records, &ctx.build_options()).context("failed to build tree")?;
    let tree = limit_depth(&tree, ctx.max_depth(max_depth));

    print_tree(ctx, &tree, "Directory is empty")?;
    Ok(ExitCode::SUCCESS)
}
