//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$ECOSHELL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/ecoshell/config.toml`
//! 3. `~/.ecoshell/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing; unknown keys are rejected.

use serde::Deserialize;

use super::ConfigError;

/// Console configuration file.
///
/// # Example
///
/// ```toml
/// prompt = "eco> "
/// interactive = true
/// banner = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Prompt printed before each console line
    pub prompt: Option<String>,

    /// Allow interactive prompting for omitted arguments
    pub interactive: Option<bool>,

    /// Print a greeting when the console starts
    pub banner: Option<bool>,
}

impl ConsoleConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prompt) = &self.prompt {
            if prompt.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "prompt cannot be empty".to_string(),
                ));
            }
            if prompt.contains('\n') {
                return Err(ConfigError::InvalidValue(
                    "prompt cannot contain a newline".to_string(),
                ));
            }
        }
        Ok(())
    }
}
