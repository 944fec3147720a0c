//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! An explicit path (from `--config`) is used as-is and must exist.
//! Otherwise these are searched in order:
//! 1. `$ECOSHELL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ecoshell/config.toml`
//! 3. `~/.ecoshell/config.toml`
//!
//! A missing file is not an error. The console never writes its config.
//!
//! # Example
//!
//! ```no_run
//! use ecoshell::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Prompt: {:?}", config.prompt());
//! println!("Interactive: {}", config.interactive());
//! ```

pub mod schema;

pub use schema::ConsoleConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default console prompt.
pub const DEFAULT_PROMPT: &str = "> ";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values from the config file
    pub file: ConsoleConfig,
    /// Where the file was found (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit` or the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path cannot be read, or if a config
    /// file exists but cannot be parsed or holds invalid values.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::search(),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read and validate one config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: ConsoleConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file in the default locations.
    fn search() -> Option<PathBuf> {
        // 1. Check $ECOSHELL_CONFIG
        if let Ok(path) = std::env::var("ECOSHELL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/ecoshell/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("ecoshell/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.ecoshell/config.toml
        dirs::home_dir()
            .map(|home| home.join(".ecoshell/config.toml"))
            .filter(|path| path.exists())
    }

    /// Path of the loaded file, if one was found.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Console prompt. Defaults to `"> "`.
    pub fn prompt(&self) -> &str {
        self.file.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    /// Whether prompting is allowed. Defaults to `true`.
    pub fn interactive(&self) -> bool {
        self.file.interactive.unwrap_or(true)
    }

    /// Whether to greet on start. Defaults to `true`.
    pub fn banner(&self) -> bool {
        self.file.banner.unwrap_or(true)
    }
}
