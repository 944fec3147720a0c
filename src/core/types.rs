//! core::types
//!
//! Value kinds accepted by command arguments.
//!
//! # Types
//!
//! - [`ArgumentType`] - Closed set of value kinds with a validity predicate
//! - [`DefinitionError`] - Fatal errors raised while declaring commands
//!
//! # Validation
//!
//! Every kind is checked by [`ArgumentType::is_invalid`], a pure predicate
//! over an optional raw string. Kinds that cannot be valid for any input
//! (an enum without options) are rejected at construction time instead.
//!
//! # Examples
//!
//! ```
//! use ecoshell::core::types::ArgumentType;
//!
//! assert!(!ArgumentType::Integer.is_invalid(Some("42")));
//! assert!(ArgumentType::Integer.is_invalid(Some("-42")));
//! assert!(ArgumentType::Flag.is_invalid(Some("")));
//!
//! let units = ArgumentType::enumeration(["kg", "lb"]).unwrap();
//! assert!(!units.is_invalid(Some("kg")));
//! assert!(units.is_invalid(Some("KG")));
//!
//! assert!(ArgumentType::enumeration(Vec::<String>::new()).is_err());
//! ```

use std::fmt;

use thiserror::Error;

/// Errors raised while declaring arguments and commands.
///
/// These indicate a programming defect in the code registering commands,
/// never a user mistake. They abort startup before the console begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("enum argument type must declare at least one option")]
    EmptyEnum,

    #[error("positional argument '{0}' cannot be a flag")]
    FlagPositional(String),

    #[error("invalid argument name '{name}': {reason}")]
    InvalidArgumentName { name: String, reason: &'static str },

    #[error("invalid abbreviation '{abbreviation}' for keyword '{name}'")]
    InvalidAbbreviation { name: String, abbreviation: char },

    #[error("duplicate {partition} argument '{name}'")]
    DuplicateArgument {
        partition: &'static str,
        name: String,
    },

    #[error("invalid command name '{name}': {reason}")]
    InvalidCommandName { name: String, reason: &'static str },

    #[error("command group '{0}' declares no sub-commands")]
    EmptyGroup(String),

    #[error("duplicate command name '{name}' under {scope}")]
    DuplicateCommand { name: String, scope: String },
}

/// The kind of value an argument accepts.
///
/// The set is closed. `Flag` carries no value at all and is only valid
/// on keyword arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentType {
    /// Any non-empty string.
    Text,
    /// Unsigned run of ASCII digits.
    Integer,
    /// Digits, optionally followed by `.` and more digits.
    Decimal,
    /// Presence-only switch.
    Flag,
    /// One of a fixed, case-sensitive set of options.
    Enum(EnumOptions),
}

/// Non-empty option list for [`ArgumentType::Enum`].
///
/// Only constructible through [`ArgumentType::enumeration`], which
/// guarantees at least one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOptions(Vec<String>);

impl EnumOptions {
    /// The declared options in declaration order.
    pub fn options(&self) -> &[String] {
        &self.0
    }

    /// Check whether `value` equals one of the options exactly.
    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|option| option == value)
    }
}

impl ArgumentType {
    /// Build an enum type from its options.
    ///
    /// Duplicate options are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::EmptyEnum` if no options are given.
    pub fn enumeration<I, S>(options: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for option in options {
            let option = option.into();
            if !unique.contains(&option) {
                unique.push(option);
            }
        }

        if unique.is_empty() {
            return Err(DefinitionError::EmptyEnum);
        }
        Ok(ArgumentType::Enum(EnumOptions(unique)))
    }

    /// Check whether `value` fails this type's validity rule.
    ///
    /// `None` means the argument was given without a value, which is the
    /// only valid shape for a flag and never valid for anything else.
    pub fn is_invalid(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (ArgumentType::Flag, value) => value.is_some(),
            (_, None) => true,
            (ArgumentType::Text, Some(v)) => v.is_empty(),
            (ArgumentType::Integer, Some(v)) => !is_digits(v),
            (ArgumentType::Decimal, Some(v)) => !is_decimal(v),
            (ArgumentType::Enum(options), Some(v)) => !options.contains(v),
        }
    }

    /// Check whether this is the value-less flag kind.
    pub fn is_flag(&self) -> bool {
        matches!(self, ArgumentType::Flag)
    }

    /// Short placeholder used in usage lines, e.g. `<integer>`.
    pub fn placeholder(&self) -> &'static str {
        match self {
            ArgumentType::Text => "text",
            ArgumentType::Integer => "integer",
            ArgumentType::Decimal => "decimal",
            ArgumentType::Flag => "",
            ArgumentType::Enum(_) => "choice",
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentType::Text => write!(f, "non-empty text"),
            ArgumentType::Integer => write!(f, "a whole number (digits only)"),
            ArgumentType::Decimal => write!(f, "a decimal number such as 12 or 3.5"),
            ArgumentType::Flag => write!(f, "no value (flag)"),
            ArgumentType::Enum(options) => {
                write!(f, "one of: {}", options.options().join(", "))
            }
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(s),
    }
}
