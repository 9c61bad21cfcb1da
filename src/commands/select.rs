use std::collections::BTreeSet;
use std::process::ExitCode;

use anyhow::{bail, Context as _, Result};
use tracing::info;

use chronos::ui::{run_interactive, TreeMenu};
use chronos::{build_with, limit_depth, SelectionSession};

use super::context::{read_records, Context};
use crate::cli::InputArgs;

/// Exit code when the user leaves the menu without confirming
const CANCELLED: u8 = 1;

pub fn cmd_select(
    ctx: &Context,
    input: &InputArgs,
    none: bool,
    preselect: &[String],
    max_depth: Option<usize>,
) -> Result<ExitCode> {
    if !ctx.caps.can_prompt() {
        bail!("select needs an interactive terminal on stderr");
    }

    let records = read_records(input)?;
    let tree = build_with(records, &ctx.build_options()).context("failed to build change tree")?;
    let tree = limit_depth(&tree, ctx.max_depth(max_depth));

    let session = if !preselect.is_empty() {
        let initial: BTreeSet<&str> = preselect.iter().map(String::as_str).collect();
        SelectionSession::open(&tree, &initial)
    } else if none || !ctx.config.selection.select_all {
        SelectionSession::open_empty(&tree)
    } else {
        SelectionSession::open_all(&tree)
    };

    let menu = TreeMenu::new(session);
    let Some(paths) =
        run_interactive(menu, &ctx.menu_render_options()).context("interactive selection failed")?
    else {
        info!("selection cancelled");
        return Ok(ExitCode::from(CANCELLED));
    };

    if ctx.json {
        println!("{}", serde_json::to_string(&paths)?);
    } else {
        for path in &paths {
            println!("{}", path);
        }
    }
    Ok(ExitCode::SUCCESS)
}
