use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Chronos - browse changed files as a tree and pick what goes into a snapshot
#[derive(Parser, Debug)]
#[command(name = "chronos")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Change lists are read from stdin unless --input is given.")]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: .chronos/config.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use ASCII icons instead of Unicode
    #[arg(long, global = true)]
    pub ascii: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the change list comes from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Change list file; `-` reads stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input is `git status --porcelain` output instead of JSON
    #[arg(long)]
    pub porcelain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a change list as a tree
    Tree {
        #[command(flatten)]
        input: InputArgs,

        /// Fold paths nested deeper than this (roots are depth 0)
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Start with every folder collapsed
        #[arg(long)]
        collapsed: bool,
    },

    /// Pick files for a snapshot interactively
    Select {
        #[command(flatten)]
        input: InputArgs,

        /// Start with nothing selected
        #[arg(long, conflicts_with = "preselect")]
        none: bool,

        /// Start with only these paths selected
        #[arg(long, value_name = "PATH")]
        preselect: Vec<String>,

        /// Fold paths nested deeper than this (roots are depth 0)
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },

    /// Render a directory listing as a tree
    Browse {
        /// Directory to list
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Fold paths nested deeper than this (roots are depth 0)
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,
    },
}
