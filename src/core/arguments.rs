//! core::arguments
//!
//! Declared arguments of a command and the values bound to them.
//!
//! # Types
//!
//! - [`PositionalSpec`] - Ordered argument, prompted for when omitted
//! - [`KeywordSpec`] - Named argument (`--name` / `-n`), optionally required
//! - [`ArgumentSpec`] - Either of the above, for mixed declaration lists
//! - [`ArgumentList`] - All specs of one command, partitioned by kind
//! - [`BoundArgs`] - Validated `name -> value` map handed to handlers
//!
//! # Invariants
//!
//! - A positional spec is never a flag
//! - Names are unique within each partition of one command
//! - Keyword abbreviations are unique within one command
//!
//! # Example
//!
//! ```
//! use ecoshell::core::arguments::{ArgumentList, KeywordSpec, PositionalSpec};
//! use ecoshell::core::types::ArgumentType;
//!
//! let args = ArgumentList::new([
//!     PositionalSpec::new("distance", "Kilometres travelled", ArgumentType::Decimal)?.into(),
//!     KeywordSpec::new("country", "Where the trip happened", ArgumentType::Text)?
//!         .with_abbreviation('c')
//!         .into(),
//! ])?;
//!
//! assert_eq!(args.positional().len(), 1);
//! assert!(args.find_keyword("c").is_some());
//! assert!(args.find_keyword("country").is_some());
//! # Ok::<(), ecoshell::core::types::DefinitionError>(())
//! ```

use std::collections::{BTreeMap, HashSet};

use super::types::{ArgumentType, DefinitionError};

/// Check the shape of an argument name.
fn validate_name(name: &str) -> Result<(), DefinitionError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.starts_with('-') {
        Some("name cannot start with '-'")
    } else if name.chars().any(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DefinitionError::InvalidArgumentName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// A positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalSpec {
    name: String,
    description: String,
    kind: ArgumentType,
    prompt: Option<String>,
}

impl PositionalSpec {
    /// Declare a positional argument.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::FlagPositional` for a flag type, or
    /// `DefinitionError::InvalidArgumentName` for a malformed name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ArgumentType,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        validate_name(&name)?;
        if kind.is_flag() {
            return Err(DefinitionError::FlagPositional(name));
        }
        Ok(Self {
            name,
            description: description.into(),
            kind,
            prompt: None,
        })
    }

    /// Override the text shown when prompting for this argument.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &ArgumentType {
        &self.kind
    }

    /// Text shown when the value is requested interactively.
    pub fn prompt_text(&self) -> String {
        match &self.prompt {
            Some(prompt) => prompt.clone(),
            None => format!("Please enter a value for `{}`", self.name),
        }
    }
}

/// A keyword argument, given as `--name value` or `-n value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpec {
    name: String,
    abbreviation: Option<char>,
    description: String,
    kind: ArgumentType,
    required: bool,
}

impl KeywordSpec {
    /// Declare an optional keyword argument without an abbreviation.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::InvalidArgumentName` for a malformed name.
    /// Keyword names must be longer than one character, since one-character
    /// keys always address abbreviations.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ArgumentType,
    ) -> Result<Self, DefinitionError> {
        let name = name.into();
        validate_name(&name)?;
        if name.chars().count() < 2 {
            return Err(DefinitionError::InvalidArgumentName {
                name,
                reason: "keyword names need at least two characters",
            });
        }
        Ok(Self {
            name,
            abbreviation: None,
            description: description.into(),
            kind,
            required: false,
        })
    }

    /// Accept `-<abbreviation>` as a short form.
    pub fn with_abbreviation(mut self, abbreviation: char) -> Self {
        self.abbreviation = Some(abbreviation);
        self
    }

    /// Make the argument mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> Option<char> {
        self.abbreviation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &ArgumentType {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check whether a raw key (dashes already stripped) addresses this spec.
    ///
    /// Keys longer than one character are compared with the full name,
    /// single-character keys with the abbreviation.
    pub fn matches_key(&self, key: &str) -> bool {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.abbreviation == Some(c),
            (Some(_), Some(_)) => self.name == key,
            (None, _) => false,
        }
    }

    /// Usage fragment, e.g. `[-c|--country <text>]`.
    pub fn usage(&self) -> String {
        let mut keys = String::new();
        if let Some(abbreviation) = self.abbreviation {
            keys.push('-');
            keys.push(abbreviation);
            keys.push('|');
        }
        keys.push_str("--");
        keys.push_str(&self.name);

        let body = if self.kind.is_flag() {
            keys
        } else {
            format!("{} <{}>", keys, self.kind.placeholder())
        };

        if self.required {
            body
        } else {
            format!("[{}]", body)
        }
    }
}

/// One declared argument of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSpec {
    Positional(PositionalSpec),
    Keyword(KeywordSpec),
}

impl From<PositionalSpec> for ArgumentSpec {
    fn from(spec: PositionalSpec) -> Self {
        ArgumentSpec::Positional(spec)
    }
}

impl From<KeywordSpec> for ArgumentSpec {
    fn from(spec: KeywordSpec) -> Self {
        ArgumentSpec::Keyword(spec)
    }
}

/// The arguments declared by one command.
///
/// Built from a mixed sequence of specs; relative order is preserved
/// within each partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    positional: Vec<PositionalSpec>,
    keyword: Vec<KeywordSpec>,
}

impl ArgumentList {
    /// A command that takes no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Partition `specs` into positional and keyword arguments.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::DuplicateArgument` when a name repeats
    /// in either partition or an abbreviation repeats, and
    /// `DefinitionError::InvalidAbbreviation` for an abbreviation that is
    /// not alphanumeric.
    pub fn new<I>(specs: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = ArgumentSpec>,
    {
        let mut list = Self::default();
        let mut positional_names = HashSet::new();
        let mut keyword_names = HashSet::new();
        let mut abbreviations = HashSet::new();

        for spec in specs {
            match spec {
                ArgumentSpec::Positional(spec) => {
                    if !positional_names.insert(spec.name.clone()) {
                        return Err(DefinitionError::DuplicateArgument {
                            partition: "positional",
                            name: spec.name,
                        });
                    }
                    if keyword_names.contains(&spec.name) {
                        return Err(DefinitionError::DuplicateArgument {
                            partition: "positional and keyword",
                            name: spec.name,
                        });
                    }
                    list.positional.push(spec);
                }
                ArgumentSpec::Keyword(spec) => {
                    if !keyword_names.insert(spec.name.clone()) {
                        return Err(DefinitionError::DuplicateArgument {
                            partition: "keyword",
                            name: spec.name,
                        });
                    }
                    if positional_names.contains(&spec.name) {
                        return Err(DefinitionError::DuplicateArgument {
                            partition: "positional and keyword",
                            name: spec.name,
                        });
                    }
                    if let Some(abbreviation) = spec.abbreviation {
                        if !abbreviation.is_alphanumeric() {
                            return Err(DefinitionError::InvalidAbbreviation {
                                name: spec.name,
                                abbreviation,
                            });
                        }
                        if !abbreviations.insert(abbreviation) {
                            return Err(DefinitionError::DuplicateArgument {
                                partition: "keyword abbreviation",
                                name: abbreviation.to_string(),
                            });
                        }
                    }
                    list.keyword.push(spec);
                }
            }
        }

        Ok(list)
    }

    pub fn positional(&self) -> &[PositionalSpec] {
        &self.positional
    }

    pub fn keyword(&self) -> &[KeywordSpec] {
        &self.keyword
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Find the keyword spec addressed by a raw key.
    pub fn find_keyword(&self, key: &str) -> Option<&KeywordSpec> {
        self.keyword.iter().find(|spec| spec.matches_key(key))
    }

    /// Usage fragment covering every argument, e.g. `<a> <b> [--flag]`.
    pub fn usage(&self) -> String {
        self.positional
            .iter()
            .map(|spec| format!("<{}>", spec.name))
            .chain(self.keyword.iter().map(KeywordSpec::usage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Values bound to a command's arguments after validation.
///
/// Flags that were given are present with no value. Optional keywords
/// that were not given are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundArgs {
    values: BTreeMap<String, Option<String>>,
}

impl BoundArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    /// Get the value bound to `name`.
    ///
    /// Returns `None` for unbound names and for flags.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    /// Check whether `name` was bound at all (flags included).
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Check whether a flag was given.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(None))
    }

    /// Parse the value bound to `name`.
    ///
    /// Returns `None` if nothing is bound.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(str::parse)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over bound names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl<K, V> FromIterator<(K, V)> for BoundArgs
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
