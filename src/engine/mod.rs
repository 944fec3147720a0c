//! engine
//!
//! Runs one input line: Tokenize -> Resolve -> Validate -> Dispatch.
//!
//! # Architecture
//!
//! The engine is the only place user input meets the command forest:
//!
//! 1. **Tokenize**: split the line into path, positionals and keywords
//! 2. **Resolve**: walk the forest, applying authorization at every hop
//! 3. **Validate**: bind values against the command's declared arguments,
//!    prompting for omitted positionals last
//! 4. **Dispatch**: run the handler exactly once with the bound values
//!
//! # Invariants
//!
//! - The forest is read-only; a failed line leaves no trace
//! - Every failure is a [`CommandError`] the caller reports and survives
//! - Handlers see state only through the explicit [`Context`]
//!
//! # Example
//!
//! ```
//! use ecoshell::core::arguments::ArgumentList;
//! use ecoshell::core::tree::{CommandDef, ForestBuilder};
//! use ecoshell::engine::{Context, Dispatcher};
//! use ecoshell::ui::prompts::ScriptedSource;
//!
//! let forest = ForestBuilder::new()
//!     .register(
//!         None,
//!         CommandDef::leaf("exit", "Leave", "exit", ArgumentList::empty(), |ctx, _| {
//!             ctx.exit_requested = true;
//!             Ok(())
//!         }),
//!     )
//!     .build()?;
//!
//! let mut ctx = Context::default();
//! let mut input = ScriptedSource::default();
//! Dispatcher::new(&forest).run_line("exit", &mut ctx, &mut input).unwrap();
//! assert!(ctx.exit_requested);
//! # Ok::<(), ecoshell::core::types::DefinitionError>(())
//! ```

pub mod dispatch;
pub mod errors;
pub mod gate;
pub mod tokenize;
pub mod validate;

pub use dispatch::{Dispatcher, Resolution};
pub use errors::CommandError;
pub use gate::{Authorizer, Session};
pub use tokenize::{tokenize_args, tokenize_line, KeywordToken, ParsedInput};
pub use validate::Validator;

use std::fmt;

use crate::ui::output::Verbosity;

/// State shared between the console loop and command handlers.
///
/// Created once per process and passed explicitly to every dispatch.
pub struct Context {
    /// Login state kept by the built-in session commands.
    pub session: Session,
    /// Output verbosity for handler messages.
    pub verbosity: Verbosity,
    /// Whether omitted positionals may be prompted for.
    pub interactive: bool,
    /// Set by a handler to end the console loop after the current line.
    pub exit_requested: bool,
    /// Replaces `session` for gating when set.
    authorizer: Option<Box<dyn Authorizer>>,
}

impl Context {
    pub fn new(verbosity: Verbosity, interactive: bool) -> Self {
        Self {
            session: Session::new(),
            verbosity,
            interactive,
            exit_requested: false,
            authorizer: None,
        }
    }

    /// Gate `auth_required` commands with `authorizer` instead of the
    /// built-in session.
    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Some(Box::new(authorizer));
        self
    }

    /// The authorizer consulted while resolving commands.
    pub fn authorizer(&self) -> &dyn Authorizer {
        match &self.authorizer {
            Some(authorizer) => authorizer.as_ref(),
            None => &self.session,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Verbosity::Normal, true)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("session", &self.session)
            .field("verbosity", &self.verbosity)
            .field("interactive", &self.interactive)
            .field("exit_requested", &self.exit_requested)
            .field("external_authorizer", &self.authorizer.is_some())
            .finish()
    }
}
