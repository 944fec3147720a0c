//! engine::dispatch
//!
//! Resolves a command path through the forest and runs the handler.
//!
//! # Lifecycle
//!
//! Every input line goes through the same stages:
//!
//! ```text
//! Tokenize -> Resolve path -> Validate keywords -> Validate/prompt positionals -> Dispatch
//! ```
//!
//! Any stage may fail with a [`CommandError`]; the forest is never
//! modified and the handler never runs for a failed line.
//!
//! # Path resolution
//!
//! The dotted segments of the path token are resolved first. While the
//! reached node is a group and positional tokens remain, the leading
//! positional is taken as the next segment, so `session login bob` and
//! `session.login bob` resolve alike. Authorization is checked at every
//! hop.
//!
//! # Invariants
//!
//! - The handler runs at most once per line, and only after validation
//! - A group is never dispatched; it must be followed by a sub-command

use tracing::{debug, info_span, trace};

use super::errors::CommandError;
use super::gate::Authorizer;
use super::tokenize::{self, ParsedInput};
use super::validate::Validator;
use super::Context;
use crate::core::tree::{CommandForest, CommandRef, Invocation};
use crate::ui::prompts::LineSource;

/// A resolved command and how many positionals its path consumed.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'f> {
    pub command: CommandRef<'f>,
    pub consumed_positionals: usize,
}

/// Runs input lines against a command forest.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'f> {
    forest: &'f CommandForest,
}

impl<'f> Dispatcher<'f> {
    pub fn new(forest: &'f CommandForest) -> Self {
        Self { forest }
    }

    pub fn forest(&self) -> &'f CommandForest {
        self.forest
    }

    /// Resolve dotted path segments to a node, which may be a group.
    ///
    /// # Errors
    ///
    /// - `UnknownCommand` if the first segment names no root
    /// - `NotASubcommand` if segments remain after a leaf
    /// - `SubcommandNotFound` if a segment names no child
    /// - `AccessDenied` if any node on the way is disabled
    pub fn resolve_path<S: AsRef<str>>(
        &self,
        segments: &[S],
        auth: &dyn Authorizer,
    ) -> Result<CommandRef<'f>, CommandError> {
        let (first, rest) = segments
            .split_first()
            .ok_or_else(|| CommandError::UnknownCommand {
                name: String::new(),
            })?;

        let mut current = self.forest.find_root(first.as_ref(), auth)?;
        trace!(node = current.name(), "resolved root");

        for segment in rest {
            current = self.step(current, segment.as_ref(), auth)?;
        }
        Ok(current)
    }

    /// Resolve the command addressed by `parsed`, consuming leading
    /// positionals as sub-command names while the node is a group.
    ///
    /// # Errors
    ///
    /// As [`resolve_path`](Self::resolve_path), plus `MissingSubcommand`
    /// when the path ends at a group.
    pub fn resolve(
        &self,
        parsed: &ParsedInput,
        auth: &dyn Authorizer,
    ) -> Result<Resolution<'f>, CommandError> {
        let mut current = self.resolve_path(&parsed.command_path, auth)?;
        let mut consumed = 0;

        while !current.is_leaf() {
            let Some(segment) = parsed.positional.get(consumed) else {
                return Err(CommandError::MissingSubcommand {
                    path: current.path_string(),
                    available: current
                        .visible_children(auth)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                });
            };
            current = self.step(current, segment, auth)?;
            consumed += 1;
        }

        Ok(Resolution {
            command: current,
            consumed_positionals: consumed,
        })
    }

    fn step(
        &self,
        current: CommandRef<'f>,
        segment: &str,
        auth: &dyn Authorizer,
    ) -> Result<CommandRef<'f>, CommandError> {
        if current.is_leaf() {
            return Err(CommandError::NotASubcommand {
                path: current.path_string(),
                segment: segment.to_string(),
            });
        }
        let next = current.child_by_name(segment, auth)?;
        trace!(node = next.name(), "resolved sub-command");
        Ok(next)
    }

    /// Resolve, validate and run one tokenized line.
    ///
    /// `input` answers prompts for omitted positional arguments.
    pub fn dispatch(
        &self,
        parsed: &ParsedInput,
        ctx: &mut Context,
        input: &mut dyn LineSource,
    ) -> Result<(), CommandError> {
        let resolution = self.resolve(parsed, ctx.authorizer())?;
        let command = resolution.command;
        let path = command.path_string();
        let _span = info_span!("command", path = %path).entered();

        let (Some(arguments), Some(handler)) = (command.arguments(), command.handler()) else {
            return Err(CommandError::MissingSubcommand {
                available: command
                    .visible_children(ctx.authorizer())
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                path,
            });
        };

        let positional = &parsed.positional[resolution.consumed_positionals..];
        let bound = Validator::new(&path, arguments).validate(
            positional,
            &parsed.keywords,
            input,
            ctx.interactive,
        )?;

        debug!("dispatching");
        let invocation = Invocation::new(command, bound);
        handler(ctx, &invocation).map_err(|error| CommandError::Handler {
            command: path.clone(),
            error,
        })
    }

    /// Tokenize and dispatch one console line. Blank lines do nothing.
    pub fn run_line(
        &self,
        line: &str,
        ctx: &mut Context,
        input: &mut dyn LineSource,
    ) -> Result<(), CommandError> {
        match tokenize::tokenize_line(line)? {
            Some(parsed) => {
                debug!(?parsed, "tokenized");
                self.dispatch(&parsed, ctx, input)
            }
            None => Ok(()),
        }
    }

    /// Tokenize and dispatch a pre-split argument vector.
    pub fn run_args<S: AsRef<str>>(
        &self,
        command: &str,
        args: &[S],
        ctx: &mut Context,
        input: &mut dyn LineSource,
    ) -> Result<(), CommandError> {
        let parsed = tokenize::tokenize_args(command, args)?;
        debug!(?parsed, "tokenized");
        self.dispatch(&parsed, ctx, input)
    }
}
