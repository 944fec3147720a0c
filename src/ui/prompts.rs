//! ui::prompts
//!
//! Line input and interactive prompts.
//!
//! # Design
//!
//! All console input flows through a [`LineSource`]: the main loop reads
//! command lines from it and argument prompting reads values from the
//! same source, so a script fed on stdin answers prompts in order.
//!
//! Prompts are only shown in interactive mode. In non-interactive mode a
//! prompt fails immediately with [`PromptError::NotInteractive`].
//! Reads block until a line arrives; there is no timeout.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use super::output;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode; give all positional arguments on the command line")]
    NotInteractive,

    #[error("input closed while waiting for a value")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Somewhere lines of text come from.
pub trait LineSource {
    /// Show `prompt` (if the source displays anything) and read one line.
    ///
    /// Returns `Ok(None)` at end of input. The trailing newline is removed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads from the process's standard input, echoing prompts to stdout.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for StdinSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_newline(line)))
    }
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Serves canned lines and records every prompt shown.
///
/// Used to drive the console without a terminal.
///
/// # Example
///
/// ```
/// use ecoshell::ui::prompts::{LineSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new(["first"]);
/// assert_eq!(source.read_line("> ").unwrap().as_deref(), Some("first"));
/// assert_eq!(source.read_line("> ").unwrap(), None);
/// assert_eq!(source.prompts(), ["> ", "> "]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt passed to `read_line`, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}

/// Prompt for text input.
///
/// Returns the entered text with surrounding whitespace trimmed.
pub fn input(
    source: &mut dyn LineSource,
    message: &str,
    interactive: bool,
) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let line = source
        .read_line(&format!("{}: ", message))?
        .ok_or(PromptError::InputClosed)?;
    Ok(line.trim().to_string())
}

/// Prompt until `check` accepts the input.
///
/// Each rejected value prints the reason returned by `check` and asks
/// again.
pub fn input_until_valid<F>(
    source: &mut dyn LineSource,
    message: &str,
    interactive: bool,
    check: F,
) -> Result<String, PromptError>
where
    F: Fn(&str) -> Result<(), String>,
{
    loop {
        let value = input(source, message, interactive)?;
        match check(&value) {
            Ok(()) => return Ok(value),
            Err(reason) => output::error(reason),
        }
    }
}
