//! ecoshell - an interactive console built on a declarative command tree
//!
//! Feature code declares commands as a forest of named nodes. Leaves carry
//! typed argument lists and a handler; internal nodes group sub-commands
//! reached by dotted (`session.login`) or spaced (`session login`) paths.
//! The engine tokenizes each input line, resolves the path, validates
//! arguments (prompting for omitted positionals when interactive) and
//! dispatches to the handler.
//!
//! # Architecture
//!
//! - [`core`] - Argument types and specs, the command forest, configuration
//! - [`engine`] - Tokenizer, validator, dispatcher, authorization gate
//! - [`ui`] - Output helpers and line input
//! - [`cli`] - Process flags, the console loop and built-in commands
//!
//! # Example
//!
//! ```
//! use ecoshell::core::arguments::{ArgumentList, PositionalSpec};
//! use ecoshell::core::tree::{CommandDef, ForestBuilder};
//! use ecoshell::core::types::ArgumentType;
//! use ecoshell::engine::{Context, Dispatcher};
//! use ecoshell::ui::prompts::ScriptedSource;
//!
//! let args = ArgumentList::new([
//!     PositionalSpec::new("count", "How many", ArgumentType::Integer).unwrap().into(),
//! ])
//! .unwrap();
//! let forest = ForestBuilder::new()
//!     .register(None, CommandDef::leaf("add", "Add things", "add 3", args, |_ctx, call| {
//!         assert_eq!(call.get("count"), Some("3"));
//!         Ok(())
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let mut ctx = Context::default();
//! Dispatcher::new(&forest)
//!     .run_line("add 3", &mut ctx, &mut ScriptedSource::default())
//!     .unwrap();
//! ```
//!
//! # Invariants
//!
//! 1. Invalid declarations fail when the forest is built, never mid-session
//! 2. A handler only runs with fully validated arguments
//! 3. A failed line leaves no trace beyond its error message

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
