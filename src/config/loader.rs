//! Configuration discovery and loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ChronosError, ChronosResult};

use super::types::Config;

/// Project-level config location, relative to the working directory
pub const PROJECT_CONFIG: &str = ".chronos/config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Configuration together with where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the settings were read from; `None` for built-in defaults
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ChronosResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> ChronosResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ChronosError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &path_str),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration for a CLI run.
///
/// An explicit path must exist and parse. Otherwise the project config under
/// `project_root` is tried, then the user config, then built-in defaults.
/// Environment overrides are applied last in every case.
pub fn discover(explicit: Option<&Path>, project_root: &Path) -> ChronosResult<LoadedConfig> {
    let candidates: Vec<PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => {
            let mut found = vec![project_root.join(PROJECT_CONFIG)];
            if let Some(user) = user_config_path() {
                found.push(user);
            }
            found.retain(|p| p.is_file());
            found
        }
    };

    let Some(path) = candidates.into_iter().next() else {
        debug!("no config file found, using defaults");
        return Ok(LoadedConfig {
            config: with_env_overrides(Config::default()),
            ..LoadedConfig::default()
        });
    };

    let (config, warnings) = load_with_warnings(&path)?;
    for warning in &warnings {
        warn!("{}", warning);
    }
    debug!(path = %path.display(), "loaded config");
    Ok(LoadedConfig {
        config: with_env_overrides(config),
        source: Some(path),
        warnings,
    })
}

/// Apply environment variable overrides (CHRONOS_* prefix)
fn with_env_overrides(config: Config) -> Config {
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Override settings from `get_env`; unparsable values are ignored.
pub fn apply_env_overrides<F>(mut config: Config, get_env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(depth) = get_env("CHRONOS_MAX_DEPTH") {
        match depth.trim().parse::<usize>() {
            Ok(depth) => config.tree.max_depth = depth,
            Err(_) => warn!(value = %depth, "ignoring invalid CHRONOS_MAX_DEPTH"),
        }
    }

    if let Some(val) = get_env("CHRONOS_EXPANDED") {
        config.tree.expanded = parse_flag(&val);
    }

    if let Some(val) = get_env("CHRONOS_SELECT_ALL") {
        config.selection.select_all = parse_flag(&val);
    }

    if let Some(val) = get_env("CHRONOS_ASCII") {
        config.ui.ascii = parse_flag(&val);
    }

    config
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    val != "false" && val != "0" && val != "no" && val != "off"
}

/// `<user config dir>/chronos/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chronos").join("config.toml"))
}

/// Line of the unknown entry: `key = ..` for its last segment, or a
/// `[key]` header for an unknown top-level table.
fn find_line_number(content: &str, path: &str) -> Option<usize> {
    let (key, top_level) = match path.rsplit_once('.') {
        Some((_, key)) => (key, false),
        None => (path, true),
    };
    content
        .lines()
        .map(str::trim_start)
        .position(|line| {
            let assigns = line
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='));
            let header = top_level
                && line
                    .strip_prefix('[')
                    .and_then(|rest| rest.trim_end().strip_suffix(']'))
                    .is_some_and(|name| name.trim() == key);
            assigns || header
        })
        .map(|i| i + 1)
}

pub(crate) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "tree",
        "max_depth",
        "expanded",
        "strict",
        "selection",
        "select_all",
        "ui",
        "ascii",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b.len()]
}
