//! engine::errors
//!
//! Recoverable errors produced while handling one input line.
//!
//! # Design
//!
//! Every variant describes a user mistake (or a failed handler) and is
//! reported at the console boundary, after which the loop continues.
//! Messages carry the command path and the expected/found detail needed
//! to correct the input. Definition-time defects use
//! [`DefinitionError`](crate::core::types::DefinitionError) instead and
//! never surface here.
//!
//! # Example
//!
//! ```
//! use ecoshell::engine::CommandError;
//!
//! let err = CommandError::PositionalCountMismatch {
//!     command: "trip.add".to_string(),
//!     expected: 2,
//!     found: 1,
//! };
//! assert_eq!(
//!     err.to_string(),
//!     "'trip.add' expects 2 positional argument(s), found 1"
//! );
//! ```

use thiserror::Error;

use crate::ui::prompts::PromptError;

/// Errors from tokenizing, resolving, validating or running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The raw line could not be split into path, positionals and keywords.
    #[error("invalid argument format at '{fragment}': {reason}")]
    InvalidArgumentFormat {
        fragment: String,
        reason: &'static str,
    },

    /// No root command has this name.
    #[error("unknown command '{name}'. Type 'help' to list commands.")]
    UnknownCommand { name: String },

    /// The path continues past a leaf command.
    #[error("'{path}' takes no sub-commands, but '{segment}' was given")]
    NotASubcommand { path: String, segment: String },

    /// A child lookup was attempted on a leaf command.
    #[error("'{path}' has no sub-commands")]
    NoSubcommands { path: String },

    /// The parent exists but has no child of this name.
    #[error("'{parent}' has no sub-command named '{name}'")]
    SubcommandNotFound { parent: String, name: String },

    /// The command exists but the session may not use it.
    #[error("access denied to '{path}': log in first")]
    AccessDenied { path: String },

    /// The path stops at a group command.
    #[error("'{path}' needs a sub-command: {}", .available.join(", "))]
    MissingSubcommand {
        path: String,
        available: Vec<String>,
    },

    /// A keyword key matches no declared keyword.
    #[error("unknown argument '{key}' for '{command}'")]
    UnknownArgument { command: String, key: String },

    /// A required keyword was not given.
    #[error("missing required argument '--{name}' for '{command}'")]
    MissingArgument { command: String, name: String },

    /// Some, but not all, positional arguments were given.
    #[error("'{command}' expects {expected} positional argument(s), found {found}")]
    PositionalCountMismatch {
        command: String,
        expected: usize,
        found: usize,
    },

    /// A value fails its declared argument type.
    #[error(
        "invalid value {} for '{argument}' of '{command}': expected {expected}",
        render_found(.found)
    )]
    TypeMismatch {
        command: String,
        argument: String,
        expected: String,
        found: Option<String>,
    },

    /// Interactive input could not be obtained.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The handler ran and reported a failure.
    #[error("'{command}' failed: {error:#}")]
    Handler {
        command: String,
        error: anyhow::Error,
    },
}

fn render_found(found: &Option<String>) -> String {
    match found {
        Some(value) => format!("'{}'", value),
        None => "(none)".to_string(),
    }
}
