//! engine::validate
//!
//! Binds tokenized values to a command's declared arguments.
//!
//! # Order of checks
//!
//! The order is observable and fixed:
//!
//! 1. Given positionals must match the declared count exactly, then each
//!    must satisfy its type. With none given, binding is deferred.
//! 2. Every keyword key must address a declared keyword.
//! 3. Every declared keyword is checked: required ones must be present,
//!    flags must carry no value, everything else a valid value.
//! 4. Deferred positionals are prompted for, in order, re-asking until
//!    each value is valid.
//!
//! Prompting happens only after every other check passed, so a bad
//! keyword never leaves the user answering prompts for nothing.

use tracing::{debug, trace};

use super::errors::CommandError;
use super::tokenize::KeywordToken;
use crate::core::arguments::{ArgumentList, BoundArgs, KeywordSpec};
use crate::ui::prompts::{self, LineSource};

/// Validates input for one resolved command.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    command: &'a str,
    arguments: &'a ArgumentList,
}

impl<'a> Validator<'a> {
    /// `command` is the dotted path used in error messages.
    pub fn new(command: &'a str, arguments: &'a ArgumentList) -> Self {
        Self { command, arguments }
    }

    /// Bind `positional` and `keywords`, prompting on `input` if needed.
    ///
    /// # Errors
    ///
    /// Returns the first failure in check order: `PositionalCountMismatch`,
    /// `TypeMismatch` (positional), `UnknownArgument`, `MissingArgument`,
    /// `TypeMismatch` (keyword), then `Prompt` while asking for values.
    pub fn validate(
        &self,
        positional: &[String],
        keywords: &[KeywordToken],
        input: &mut dyn LineSource,
        interactive: bool,
    ) -> Result<BoundArgs, CommandError> {
        let mut bound = BoundArgs::new();

        let deferred = self.bind_positionals(positional, &mut bound)?;
        self.check_keys(keywords)?;
        self.bind_keywords(keywords, &mut bound)?;

        if deferred {
            self.prompt_positionals(input, interactive, &mut bound)?;
        }

        debug!(command = self.command, bound = bound.len(), "arguments bound");
        Ok(bound)
    }

    /// Returns `true` when binding is deferred to prompting.
    fn bind_positionals(
        &self,
        positional: &[String],
        bound: &mut BoundArgs,
    ) -> Result<bool, CommandError> {
        let specs = self.arguments.positional();

        if positional.is_empty() {
            return Ok(!specs.is_empty());
        }

        if positional.len() != specs.len() {
            return Err(CommandError::PositionalCountMismatch {
                command: self.command.to_string(),
                expected: specs.len(),
                found: positional.len(),
            });
        }

        for (spec, value) in specs.iter().zip(positional) {
            if spec.kind().is_invalid(Some(value)) {
                return Err(CommandError::TypeMismatch {
                    command: self.command.to_string(),
                    argument: spec.name().to_string(),
                    expected: spec.kind().to_string(),
                    found: Some(value.clone()),
                });
            }
        }

        for (spec, value) in specs.iter().zip(positional) {
            bound.bind(spec.name(), Some(value.clone()));
        }
        Ok(false)
    }

    fn check_keys(&self, keywords: &[KeywordToken]) -> Result<(), CommandError> {
        match keywords
            .iter()
            .find(|token| self.arguments.find_keyword(&token.key).is_none())
        {
            Some(token) => Err(CommandError::UnknownArgument {
                command: self.command.to_string(),
                key: token.key.clone(),
            }),
            None => Ok(()),
        }
    }

    fn bind_keywords(
        &self,
        keywords: &[KeywordToken],
        bound: &mut BoundArgs,
    ) -> Result<(), CommandError> {
        for spec in self.arguments.keyword() {
            let Some(token) = keywords.iter().find(|token| spec.matches_key(&token.key)) else {
                if spec.is_required() {
                    return Err(CommandError::MissingArgument {
                        command: self.command.to_string(),
                        name: spec.name().to_string(),
                    });
                }
                continue;
            };

            if spec.kind().is_invalid(token.value.as_deref()) {
                return Err(self.keyword_mismatch(spec, token));
            }
            trace!(keyword = spec.name(), "keyword bound");
            bound.bind(spec.name(), token.value.clone());
        }
        Ok(())
    }

    fn keyword_mismatch(&self, spec: &KeywordSpec, token: &KeywordToken) -> CommandError {
        CommandError::TypeMismatch {
            command: self.command.to_string(),
            argument: spec.name().to_string(),
            expected: spec.kind().to_string(),
            found: token.value.clone(),
        }
    }

    fn prompt_positionals(
        &self,
        input: &mut dyn LineSource,
        interactive: bool,
        bound: &mut BoundArgs,
    ) -> Result<(), CommandError> {
        for spec in self.arguments.positional() {
            let value = prompts::input_until_valid(input, &spec.prompt_text(), interactive, |v| {
                if spec.kind().is_invalid(Some(v)) {
                    Err(format!("expected {}", spec.kind()))
                } else {
                    Ok(())
                }
            })?;
            bound.bind(spec.name(), Some(value));
        }
        Ok(())
    }
}
