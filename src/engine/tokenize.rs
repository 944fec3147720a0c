//! engine::tokenize
//!
//! Splits raw input into a command path, positional tokens and keyword
//! tokens.
//!
//! # Rules
//!
//! - Fragments are separated by runs of whitespace; there is no quoting
//! - The first fragment is the command path; `.` separates its segments
//! - Remaining fragments are positional until the first one starting
//!   with `-`; from there on everything is keyword region
//! - In the keyword region `--name` and `-n` are keys; the next fragment
//!   is the key's value unless it also starts with `-`
//!
//! A negative number such as `-3.5` therefore always reads as a key.
//! Positional values cannot be negative.
//!
//! # Example
//!
//! ```
//! use ecoshell::engine::tokenize::tokenize_line;
//!
//! let parsed = tokenize_line("trip.add 12.5 car -c Japan --verbose")
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(parsed.command_path, ["trip", "add"]);
//! assert_eq!(parsed.positional, ["12.5", "car"]);
//! assert_eq!(parsed.keyword("c").unwrap().value.as_deref(), Some("Japan"));
//! assert_eq!(parsed.keyword("verbose").unwrap().value, None);
//! ```

use super::errors::CommandError;

/// One keyword key with its optional value, dashes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordToken {
    pub key: String,
    pub value: Option<String>,
}

/// A tokenized input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// Command path segments, root first.
    pub command_path: Vec<String>,
    /// Positional tokens in input order.
    pub positional: Vec<String>,
    /// Keyword tokens in input order; raw keys are unique.
    pub keywords: Vec<KeywordToken>,
}

impl ParsedInput {
    /// Find a keyword token by raw key.
    pub fn keyword(&self, key: &str) -> Option<&KeywordToken> {
        self.keywords.iter().find(|token| token.key == key)
    }
}

/// Tokenize one line of console input.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns `CommandError::InvalidArgumentFormat` for an empty path segment,
/// a bare `-`/`--`, a stray value in the keyword region, or a repeated key.
pub fn tokenize_line(line: &str) -> Result<Option<ParsedInput>, CommandError> {
    let mut fragments = line.split_whitespace();
    let Some(command) = fragments.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = fragments.collect();
    tokenize_args(command, &rest).map(Some)
}

/// Tokenize a pre-split argument vector.
///
/// `command` is the path token; `args` follow the same positional/keyword
/// rules as a console line. Fragments are taken as-is, so a value may
/// contain whitespace here.
pub fn tokenize_args<S: AsRef<str>>(command: &str, args: &[S]) -> Result<ParsedInput, CommandError> {
    let command_path = split_path(command)?;

    let boundary = args
        .iter()
        .position(|arg| as_str(arg).starts_with('-'))
        .unwrap_or(args.len());
    let (positional, keyword_region) = args.split_at(boundary);

    Ok(ParsedInput {
        command_path,
        positional: positional.iter().map(|s| as_str(s).to_string()).collect(),
        keywords: split_keywords(keyword_region)?,
    })
}

fn as_str<S: AsRef<str>>(s: &S) -> &str {
    s.as_ref()
}

fn split_path(command: &str) -> Result<Vec<String>, CommandError> {
    let segments: Vec<String> = command.split('.').map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
        return Err(CommandError::InvalidArgumentFormat {
            fragment: command.to_string(),
            reason: "command path has an empty segment",
        });
    }
    Ok(segments)
}

fn split_keywords<S: AsRef<str>>(region: &[S]) -> Result<Vec<KeywordToken>, CommandError> {
    let mut keywords: Vec<KeywordToken> = Vec::new();
    let mut fragments = region.iter().map(as_str).peekable();

    while let Some(fragment) = fragments.next() {
        let key = fragment
            .strip_prefix("--")
            .or_else(|| fragment.strip_prefix('-'))
            .ok_or_else(|| CommandError::InvalidArgumentFormat {
                fragment: fragment.to_string(),
                reason: "expected a keyword starting with '-'",
            })?;

        if key.is_empty() {
            return Err(CommandError::InvalidArgumentFormat {
                fragment: fragment.to_string(),
                reason: "keyword has no name",
            });
        }
        if keywords.iter().any(|token| token.key == key) {
            return Err(CommandError::InvalidArgumentFormat {
                fragment: fragment.to_string(),
                reason: "keyword given more than once",
            });
        }

        let value = fragments
            .next_if(|next| !next.starts_with('-'))
            .map(str::to_string);

        keywords.push(KeywordToken {
            key: key.to_string(),
            value,
        });
    }

    Ok(keywords)
}
