//! Settings shared by every command: resolved config, terminal
//! capabilities and change list input.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context as _, Result};
use is_terminal::IsTerminal;
use tracing::debug;

use chronos::config::{self, Config};
use chronos::ui::{detect_capabilities, Icons, RenderOptions, TerminalCapabilities};
use chronos::{parse_json, parse_porcelain, BuildOptions, ChangeRecord};

use crate::cli::{Cli, InputArgs};

pub struct Context {
    pub json: bool,
    pub config: Config,
    pub caps: TerminalCapabilities,
    force_ascii: bool,
}

impl Context {
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let loaded = config::discover(cli.config.as_deref(), &cwd).with_context(|| {
            match &cli.config {
                Some(path) => format!("failed to load config {}", path.display()),
                None => String::from("failed to load config"),
            }
        })?;
        if let Some(source) = &loaded.source {
            debug!(config = %source.display(), "using config file");
        }

        Ok(Self {
            json: cli.json,
            config: loaded.config,
            caps: detect_capabilities(),
            force_ascii: cli.ascii,
        })
    }

    pub fn icons(&self) -> Icons {
        let ascii = self.force_ascii || self.config.ui.ascii || !self.caps.supports_unicode;
        Icons::new(!ascii)
    }

    pub fn max_depth(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.config.tree.max_depth)
    }

    pub fn build_options(&self) -> BuildOptions {
        self.config.tree.build_options()
    }

    /// Options for output written to stdout.
    pub fn stdout_render_options(&self, selection: bool) -> RenderOptions {
        let tty = io::stdout().is_terminal();
        RenderOptions {
            icons: self.icons(),
            selection,
            color: tty && self.caps.supports_color,
            width: tty.then_some(usize::from(self.caps.width)),
        }
    }

    /// Options for the interactive menu, drawn on stderr.
    pub fn menu_render_options(&self) -> RenderOptions {
        RenderOptions {
            icons: self.icons(),
            selection: true,
            color: self.caps.supports_color,
            width: Some(usize::from(self.caps.width)),
        }
    }
}

/// Read and parse the change list named by `input`.
pub fn read_records(input: &InputArgs) -> Result<Vec<ChangeRecord>> {
    let text = match input.input.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read change list {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read change list from stdin")?;
            buf
        }
    };

    if input.porcelain {
        Ok(parse_porcelain(&text))
    } else if text.trim().is_empty() {
        Ok(Vec::new())
    } else {
        parse_json(&text).context("failed to parse change list")
    }
}
