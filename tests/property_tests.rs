//! Property-based tests for argument types, the command forest and the
//! input pipeline.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use ecoshell::core::arguments::{ArgumentList, ArgumentSpec, PositionalSpec};
use ecoshell::core::tree::{CommandDef, ForestBuilder};
use ecoshell::core::types::{ArgumentType, DefinitionError};
use ecoshell::engine::{tokenize_line, CommandError, Dispatcher, Session, Validator};
use ecoshell::ui::prompts::ScriptedSource;

/// Strategy for command and argument names.
fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Strategy for tokens that are read as positionals.
fn positional_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,10}"
}

fn noop(name: &str) -> CommandDef {
    CommandDef::leaf(name, "", "", ArgumentList::empty(), |_, _| Ok(()))
}

/// Nest `names` as groups, innermost a leaf.
fn chain(names: &[String]) -> CommandDef {
    match names.split_first() {
        Some((last, [])) => noop(last),
        Some((first, rest)) => CommandDef::group(first.as_str(), "", vec![chain(rest)]),
        None => unreachable!("chain needs at least one name"),
    }
}

/// Flip the ASCII case of every letter.
fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn integer_positionals(count: usize) -> ArgumentList {
    ArgumentList::new((0..count).map(|i| {
        ArgumentSpec::from(PositionalSpec::new(format!("arg{}", i), "", ArgumentType::Integer).unwrap())
    }))
    .unwrap()
}

// =============================================================================
// Argument types
// =============================================================================

proptest! {
    /// A flag is invalid exactly when a value is supplied.
    #[test]
    fn flag_invalid_iff_value_present(value in proptest::option::of(".*")) {
        prop_assert_eq!(ArgumentType::Flag.is_invalid(value.as_deref()), value.is_some());
    }

    /// Every non-flag type rejects a missing value.
    #[test]
    fn missing_value_invalid_for_valued_types(options in prop::collection::vec(name(), 1..4)) {
        let kinds = [
            ArgumentType::Text,
            ArgumentType::Integer,
            ArgumentType::Decimal,
            ArgumentType::enumeration(options).unwrap(),
        ];
        for kind in &kinds {
            prop_assert!(kind.is_invalid(None));
        }
    }

    /// Integers are exactly the non-empty runs of ASCII digits.
    #[test]
    fn integer_accepts_only_digits(value in "\\PC{0,12}") {
        let digits = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
        prop_assert_eq!(ArgumentType::Integer.is_invalid(Some(&value)), !digits);
    }

    #[test]
    fn digit_runs_are_integers(value in "[0-9]{1,18}") {
        prop_assert!(!ArgumentType::Integer.is_invalid(Some(&value)));
    }

    /// `whole.fraction` is a valid decimal, as is a bare whole part.
    #[test]
    fn decimals_accept_one_point(whole in "[0-9]{1,6}", fraction in "[0-9]{1,6}") {
        let with_point = format!("{}.{}", whole, fraction);
        prop_assert!(!ArgumentType::Decimal.is_invalid(Some(&with_point)));
        prop_assert!(!ArgumentType::Decimal.is_invalid(Some(&whole)));

        let two_points = format!("{}.{}.{}", whole, fraction, whole);
        prop_assert!(ArgumentType::Decimal.is_invalid(Some(&two_points)));
    }

    /// Enum membership is exact and case-sensitive.
    #[test]
    fn enum_accepts_only_members(options in prop::collection::vec(name(), 1..5), candidate in name()) {
        let kind = ArgumentType::enumeration(options.clone()).unwrap();
        for option in &options {
            prop_assert!(!kind.is_invalid(Some(option)));
        }
        prop_assert_eq!(kind.is_invalid(Some(&candidate)), !options.contains(&candidate));

        let upper = candidate.to_ascii_uppercase();
        if upper != candidate && !options.contains(&upper) {
            prop_assert!(kind.is_invalid(Some(&upper)));
        }
    }
}

// =============================================================================
// Command forest
// =============================================================================

proptest! {
    /// Resolving a node's full path returns that node.
    #[test]
    fn full_path_resolves_to_self(names in prop::collection::vec(name(), 1..6)) {
        let forest = ForestBuilder::new().register(None, chain(&names)).build().unwrap();
        let node = Dispatcher::new(&forest).resolve_path(&names, &Session::new()).unwrap();

        prop_assert_eq!(node.full_path(), names.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(node.path_string(), names.join("."));
        prop_assert!(node.is_leaf());
        prop_assert_eq!(forest.len(), names.len());
    }

    /// Path lookup ignores case.
    #[test]
    fn lookup_ignores_case(names in prop::collection::vec(name(), 1..5)) {
        let forest = ForestBuilder::new().register(None, chain(&names)).build().unwrap();
        let shouted: Vec<String> = names.iter().map(|n| n.to_ascii_uppercase()).collect();
        let node = Dispatcher::new(&forest).resolve_path(&shouted, &Session::new()).unwrap();
        prop_assert_eq!(node.path_string(), names.join("."));
    }

    /// Sibling names differing only in case never coexist.
    #[test]
    fn case_variants_collide(first in name(), parent in name(), nested in any::<bool>()) {
        let twin = swap_case(&first);
        let result = if nested {
            ForestBuilder::new()
                .register(None, CommandDef::group(parent.as_str(), "", vec![noop(&first), noop(&twin)]))
                .build()
        } else {
            ForestBuilder::new()
                .register(None, noop(&first))
                .register(Some("other"), noop(&twin))
                .build()
        };
        let is_duplicate = matches!(result, Err(DefinitionError::DuplicateCommand { .. }));
        prop_assert!(is_duplicate);
    }
}

// =============================================================================
// Input pipeline
// =============================================================================

proptest! {
    /// Plain words after the command are positionals, in order.
    #[test]
    fn words_become_positionals(command in name(), words in prop::collection::vec(positional_token(), 0..6)) {
        let line = format!("{} {}", command, words.join(" "));
        let parsed = tokenize_line(&line).unwrap().unwrap();

        prop_assert_eq!(parsed.command_path, vec![command]);
        prop_assert_eq!(parsed.positional, words);
        prop_assert!(parsed.keywords.is_empty());
    }

    /// Extra whitespace never changes the tokenized result.
    #[test]
    fn whitespace_is_insignificant(words in prop::collection::vec(positional_token(), 1..6), pad in "[ \t]{1,3}") {
        let tight = tokenize_line(&words.join(" ")).unwrap();
        let loose = tokenize_line(&format!("{}{}{}", pad, words.join(pad.as_str()), pad)).unwrap();
        prop_assert_eq!(tight, loose);
    }

    /// Any partial set of positionals is a count mismatch; none at all
    /// defers to prompting.
    #[test]
    fn partial_positionals_mismatch(declared in 1usize..5, given in 0usize..8) {
        let arguments = integer_positionals(declared);
        let values: Vec<String> = (0..given).map(|i| i.to_string()).collect();
        let mut input = ScriptedSource::default();

        let result = Validator::new("cmd", &arguments).validate(&values, &[], &mut input, false);
        match given {
            0 => {
                let not_interactive = matches!(result, Err(CommandError::Prompt(_)));
                prop_assert!(not_interactive);
            }
            n if n == declared => prop_assert_eq!(result.unwrap().len(), declared),
            n => {
                let mismatch = matches!(
                    result,
                    Err(CommandError::PositionalCountMismatch { expected, found, .. })
                        if expected == declared && found == n
                );
                prop_assert!(mismatch);
            }
        }
    }
}
