//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Regular output goes to stdout and respects the quiet flag. Errors and
//! warnings go to stderr. Diagnostic tracing is separate (see
//! [`crate::cli`]); these helpers are for messages meant for the user.

use std::fmt::Display;

/// How much the console says besides errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    #[default]
    Normal,
    /// Normal output plus `[debug]` lines
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    /// Whether regular messages and warnings are shown.
    pub fn is_chatty(self) -> bool {
        self != Verbosity::Quiet
    }

    pub fn is_debug(self) -> bool {
        self == Verbosity::Debug
    }
}

/// Print a command result to stdout.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity.is_chatty() {
        println!("{}", message);
    }
}

/// Print a state change the user asked for, such as a login.
pub fn success(message: impl Display, verbosity: Verbosity) {
    print(message, verbosity);
}

/// Print a `[debug]` line to stderr.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity.is_debug() {
        eprintln!("[debug] {}", message);
    }
}

/// Print a warning to stderr.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.is_chatty() {
        eprintln!("warning: {}", message);
    }
}

/// Print an error to stderr, even in quiet mode.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Format `name` and `description` as an aligned two-column row.
pub fn format_row(name: &str, description: &str, width: usize) -> String {
    if description.is_empty() {
        return name.to_string();
    }
    format!("{:<width$}  {}", name, description, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn quiet_silences_all_but_errors() {
        assert!(!Verbosity::Quiet.is_chatty());
        assert!(!Verbosity::Quiet.is_debug());
        assert!(Verbosity::Normal.is_chatty());
        assert!(!Verbosity::Normal.is_debug());
        assert!(Verbosity::Debug.is_chatty());
        assert!(Verbosity::Debug.is_debug());
    }

    #[test]
    fn row_alignment() {
        assert_eq!(format_row("exit", "Leave", 6), "exit    Leave");
        assert_eq!(format_row("exit", "", 6), "exit");
    }
}
