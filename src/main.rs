//! Chronos CLI - change tree browsing and snapshot file selection
//!
//! Usage: chronos <COMMAND>
//!
//! Commands:
//!   tree    Render a change list as a tree
//!   select  Pick files for a snapshot interactively
//!   browse  Render a directory listing as a tree

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use is_terminal::IsTerminal;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::Context;

/// Exit code for failures (1 is reserved for a cancelled selection)
const FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    chronos::logging::init(cli.verbose, std::io::stderr().is_terminal())
        .context("failed to initialize logging")?;

    let ctx = Context::load(&cli)?;

    match &cli.command {
        Commands::Tree {
            input,
            max_depth,
            collapsed,
        } => commands::cmd_tree(&ctx, input, *max_depth, *collapsed),
        Commands::Select {
            input,
            none,
            preselect,
            max_depth,
        } => commands::cmd_select(&ctx, input, *none, preselect, *max_depth),
        Commands::Browse { dir, max_depth } => commands::cmd_browse(&ctx, dir, *max_depth),
    }
}
