//! cli::repl
//!
//! The interactive console loop.
//!
//! Each iteration reads one line, runs it to completion and reports any
//! error before reading the next. A failed line never ends the loop; only
//! end of input or the `exit` command do.

use std::io;

use tracing::{debug, info};

use crate::engine::{Context, Dispatcher};
use crate::ui::output;
use crate::ui::prompts::LineSource;

/// Greeting printed when the console starts.
pub const BANNER: &str = "ecoshell - type 'help' to list commands, 'exit' to leave.";

/// Counts of what one console session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    /// Lines that ran without error.
    pub succeeded: usize,
    /// Lines that reported an error.
    pub failed: usize,
}

/// Read and run lines from `input` until it closes or a handler asks
/// to exit.
///
/// # Errors
///
/// Returns an error only if reading the next line fails. Command errors
/// are printed and the loop continues.
pub fn run_repl(
    dispatcher: &Dispatcher<'_>,
    ctx: &mut Context,
    input: &mut dyn LineSource,
    prompt: &str,
) -> io::Result<ReplSummary> {
    let mut summary = ReplSummary::default();

    while !ctx.exit_requested {
        let Some(line) = input.read_line(prompt)? else {
            debug!("input closed");
            break;
        };

        match dispatcher.run_line(&line, ctx, input) {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                summary.failed += 1;
                output::error(&err);
            }
        }
    }

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "console closed"
    );
    Ok(summary)
}
