//! Configuration module for Chronos
//!
//! Settings are resolved in this order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CHRONOS_*)
//! 3. Project config (.chronos/config.toml)
//! 4. User config (~/.config/chronos/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_env_overrides, discover, user_config_path, ConfigWarning, LoadedConfig, PROJECT_CONFIG,
};
pub use types::{Config, SelectionConfig, TreeConfig, UiConfig};
