//! Configuration file loading for opsbridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./opsbridge.toml` or `./.opsbridge.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/opsbridge/config.toml`
//! 4. Fallback: `~/.config/opsbridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileAutomationConfig, FileBackupConfig, FileConfig, FileLogConfig, FileSupportConfig,
};
pub use loader::ConfigLoader;
