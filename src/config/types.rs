//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChronosResult;
use crate::tree::{BuildOptions, DEFAULT_MAX_DEPTH};

use super::loader::{self, ConfigWarning};

/// Tree construction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Display depth for the depth-limited view (roots are depth 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Initial expansion of freshly built folders
    #[serde(default = "default_true")]
    pub expanded: bool,

    /// Report file/directory conflicts as errors
    #[serde(default)]
    pub strict: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            expanded: true,
            strict: false,
        }
    }
}

impl TreeConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            expanded: self.expanded,
            strict: self.strict,
        }
    }
}

/// Selection session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Preselect every changed file when a session opens
    #[serde(default = "default_true")]
    pub select_all: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { select_all: true }
    }
}

/// Terminal presentation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Force ASCII icons
    #[serde(default)]
    pub ascii: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ChronosResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ChronosResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }
}
