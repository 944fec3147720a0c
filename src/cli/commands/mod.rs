//! cli::commands
//!
//! Built-in console commands.
//!
//! # Architecture
//!
//! Each module exposes a `definition()` that declares one root command
//! with its arguments and handlers. [`build_forest`] registers them all.
//! Handlers receive the shared [`Context`](crate::engine::Context) and
//! the validated [`Invocation`](crate::core::tree::Invocation); they never
//! parse input themselves.
//!
//! | Command   | Namespace | Description                     |
//! |-----------|-----------|---------------------------------|
//! | `help`    | (none)    | List commands or describe one   |
//! | `exit`    | (none)    | Leave the console               |
//! | `session` | `account` | Log in, log out, show status    |

mod exit;
mod help;
mod session;

pub use help::{describe, overview};

use crate::core::tree::{CommandForest, ForestBuilder};
use crate::core::types::DefinitionError;

/// Namespace label of the account commands.
pub const ACCOUNT_NAMESPACE: &str = "account";

/// Build the console's command forest.
///
/// # Errors
///
/// Returns a [`DefinitionError`] if any declaration is invalid. This is a
/// programming error and aborts startup.
pub fn build_forest() -> Result<CommandForest, DefinitionError> {
    ForestBuilder::new()
        .register_all(None, [help::definition()?, exit::definition()])
        .register(Some(ACCOUNT_NAMESPACE), session::definition()?)
        .build()
}
