//! Pipeline tests: tokenize, resolve, validate and dispatch.
//!
//! Every test drives a [`Dispatcher`] over a small forest whose handlers
//! record what they were called with. Prompt answers come from a
//! [`ScriptedSource`], so each test also checks what was asked.

use std::cell::RefCell;
use std::rc::Rc;

use ecoshell::core::arguments::{ArgumentList, ArgumentSpec, BoundArgs, KeywordSpec, PositionalSpec};
use ecoshell::core::tree::{CommandDef, CommandForest, ForestBuilder};
use ecoshell::core::types::ArgumentType;
use ecoshell::engine::{Authorizer, CommandError, Context, Dispatcher};
use ecoshell::ui::output::Verbosity;
use ecoshell::ui::prompts::{PromptError, ScriptedSource};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Calls seen by recording handlers, as (dotted path, bound arguments).
type Calls = Rc<RefCell<Vec<(String, BoundArgs)>>>;

fn recorder(calls: &Calls, name: &str, args: ArgumentList) -> CommandDef {
    let calls = Rc::clone(calls);
    CommandDef::leaf(name, "", "", args, move |_ctx, call| {
        calls
            .borrow_mut()
            .push((call.command().path_string(), call.args().clone()));
        Ok(())
    })
}

fn positional(name: &str, kind: ArgumentType) -> ArgumentSpec {
    PositionalSpec::new(name, "", kind).unwrap().into()
}

fn keyword(name: &str, kind: ArgumentType) -> KeywordSpec {
    KeywordSpec::new(name, "", kind).unwrap()
}

fn bound(pairs: &[(&str, Option<&str>)]) -> BoundArgs {
    pairs
        .iter()
        .map(|&(name, value)| (name, value.map(str::to_string)))
        .collect()
}

/// A forest with:
/// - `add <first> <second>` (integers)
/// - `trip [-c|--country <text>] --mode <car|bus> [-q|--quick]`
/// - `log <distance>` (decimal, prompts "Distance")
/// - `account` group with `public` and `private` (auth required)
fn build(calls: &Calls) -> CommandForest {
    let add = ArgumentList::new([
        positional("first", ArgumentType::Integer),
        positional("second", ArgumentType::Integer),
    ])
    .unwrap();

    let trip = ArgumentList::new([
        keyword("country", ArgumentType::Text).with_abbreviation('c').into(),
        keyword("mode", ArgumentType::enumeration(["car", "bus"]).unwrap())
            .required()
            .into(),
        keyword("quick", ArgumentType::Flag).with_abbreviation('q').into(),
    ])
    .unwrap();

    let log = ArgumentList::new([PositionalSpec::new("distance", "", ArgumentType::Decimal)
        .unwrap()
        .with_prompt("Distance")
        .into()])
    .unwrap();

    ForestBuilder::new()
        .register(None, recorder(calls, "add", add))
        .register(None, recorder(calls, "trip", trip))
        .register(None, recorder(calls, "log", log))
        .register(
            Some("account"),
            CommandDef::group(
                "account",
                "",
                vec![
                    recorder(calls, "public", ArgumentList::empty()),
                    recorder(calls, "private", ArgumentList::empty()).auth_required(),
                ],
            ),
        )
        .build()
        .unwrap()
}

struct Harness {
    calls: Calls,
    forest: CommandForest,
    ctx: Context,
}

impl Harness {
    fn new(interactive: bool) -> Self {
        let calls = Calls::default();
        let forest = build(&calls);
        Self {
            calls,
            forest,
            ctx: Context::new(Verbosity::Quiet, interactive),
        }
    }

    fn run(&mut self, line: &str, input: &mut ScriptedSource) -> Result<(), CommandError> {
        Dispatcher::new(&self.forest).run_line(line, &mut self.ctx, input)
    }

    fn run_quietly(&mut self, line: &str) -> Result<(), CommandError> {
        self.run(line, &mut ScriptedSource::default())
    }

    fn calls(&self) -> Vec<(String, BoundArgs)> {
        self.calls.borrow().clone()
    }
}

// =============================================================================
// Positional arguments
// =============================================================================

mod positionals {
    use super::*;

    #[test]
    fn one_of_two_is_count_mismatch() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("add 5").unwrap_err();
        assert!(matches!(
            err,
            CommandError::PositionalCountMismatch { expected: 2, found: 1, .. }
        ));
        assert!(h.calls().is_empty());
    }

    #[test]
    fn bad_second_value_is_type_mismatch() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("add 5 x").unwrap_err();
        match err {
            CommandError::TypeMismatch { argument, found, .. } => {
                assert_eq!(argument, "second");
                assert_eq!(found.as_deref(), Some("x"));
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn both_values_bind() {
        let mut h = Harness::new(true);
        h.run_quietly("add 5 6").unwrap();
        assert_eq!(
            h.calls(),
            [(
                "add".to_string(),
                bound(&[("first", Some("5")), ("second", Some("6"))])
            )]
        );
    }

    #[test]
    fn omitted_values_are_prompted() {
        let mut h = Harness::new(true);
        let mut input = ScriptedSource::new(["12", "30"]);
        h.run("add", &mut input).unwrap();

        assert_eq!(
            input.prompts(),
            [
                "Please enter a value for `first`: ",
                "Please enter a value for `second`: "
            ]
        );
        assert_eq!(h.calls()[0].1.get("second"), Some("30"));
    }

    #[test]
    fn invalid_prompt_answer_is_asked_again() {
        let mut h = Harness::new(true);
        let mut input = ScriptedSource::new(["far", "", "12.5"]);
        h.run("log", &mut input).unwrap();

        assert_eq!(input.prompts(), ["Distance: ", "Distance: ", "Distance: "]);
        assert_eq!(h.calls()[0].1.get("distance"), Some("12.5"));
    }

    #[test]
    fn closed_input_during_prompt_fails() {
        let mut h = Harness::new(true);
        let mut input = ScriptedSource::new(["7"]);
        let err = h.run("add", &mut input).unwrap_err();

        assert!(matches!(err, CommandError::Prompt(PromptError::InputClosed)));
        assert!(h.calls().is_empty());
    }

    #[test]
    fn prompting_needs_interactive_mode() {
        let mut h = Harness::new(false);
        let mut input = ScriptedSource::new(["7", "8"]);
        let err = h.run("add", &mut input).unwrap_err();

        assert!(matches!(err, CommandError::Prompt(PromptError::NotInteractive)));
        assert_eq!(input.remaining(), 2);
    }
}

// =============================================================================
// Keyword arguments
// =============================================================================

mod keywords {
    use super::*;

    #[test]
    fn abbreviation_and_name_bind_same_key() {
        let mut h = Harness::new(true);
        h.run_quietly("trip -c Japan --mode car").unwrap();
        h.run_quietly("trip --country Japan --mode car").unwrap();

        let calls = h.calls();
        assert_eq!(calls[0].1, calls[1].1);
        assert_eq!(calls[0].1.get("country"), Some("Japan"));
    }

    #[test]
    fn unknown_key_fails_even_when_otherwise_valid() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("trip --mode car --foo bar").unwrap_err();
        assert!(matches!(err, CommandError::UnknownArgument { ref key, .. } if key == "foo"));
    }

    #[test]
    fn missing_required_keyword() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("trip -c Japan").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { ref name, .. } if name == "mode"));
    }

    #[test]
    fn enum_value_is_case_sensitive() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("trip --mode CAR").unwrap_err();
        assert!(matches!(err, CommandError::TypeMismatch { ref argument, .. } if argument == "mode"));
    }

    #[test]
    fn flag_with_value_is_rejected() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("trip --mode bus -q yes").unwrap_err();
        assert!(matches!(
            err,
            CommandError::TypeMismatch { ref argument, found: Some(_), .. } if argument == "quick"
        ));
    }

    #[test]
    fn flag_binds_without_value() {
        let mut h = Harness::new(true);
        h.run_quietly("trip --mode bus -q").unwrap();
        let args = &h.calls()[0].1;
        assert!(args.flag("quick"));
        assert!(!args.contains("country"));
    }

    #[test]
    fn repeated_key_is_a_format_error() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("trip --mode bus --mode car").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgumentFormat { .. }));
    }
}

// =============================================================================
// Check order
// =============================================================================

mod ordering {
    use super::*;

    #[test]
    fn unknown_key_reported_before_prompting() {
        let mut h = Harness::new(true);
        let mut input = ScriptedSource::new(["1", "2"]);
        let err = h.run("add --foo bar", &mut input).unwrap_err();

        assert!(matches!(err, CommandError::UnknownArgument { .. }));
        assert!(input.prompts().is_empty());
    }

    #[test]
    fn positional_errors_come_before_keyword_errors() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("add 1 --foo bar").unwrap_err();
        assert!(matches!(err, CommandError::PositionalCountMismatch { .. }));
    }

    #[test]
    fn failed_line_leaves_no_trace() {
        let mut h = Harness::new(true);
        let _ = h.run_quietly("add 5 x");
        let _ = h.run_quietly("trip --bogus");
        h.run_quietly("add 1 2").unwrap();
        assert_eq!(h.calls().len(), 1);
    }
}

// =============================================================================
// Paths and authorization
// =============================================================================

mod paths {
    use super::*;

    #[test]
    fn dotted_and_spaced_paths_agree() {
        let mut h = Harness::new(true);
        h.run_quietly("account.public").unwrap();
        h.run_quietly("account public").unwrap();
        h.run_quietly("ACCOUNT Public").unwrap();

        let paths: Vec<_> = h.calls().into_iter().map(|(path, _)| path).collect();
        assert_eq!(paths, ["account.public"; 3]);
    }

    #[test]
    fn group_alone_needs_sub_command() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("account").unwrap_err();
        match err {
            CommandError::MissingSubcommand { path, available } => {
                assert_eq!(path, "account");
                assert_eq!(available, ["public"]);
            }
            other => panic!("expected missing sub-command, got {other:?}"),
        }
    }

    #[test]
    fn unauthorized_child_is_denied() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("account.private").unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied { ref path } if path == "account.private"));

        h.ctx.session.login("ada");
        h.run_quietly("account private").unwrap();
        assert_eq!(h.calls().len(), 1);
    }

    /// Grants access from a shared switch, as an external login
    /// component would.
    struct Switch(Rc<RefCell<bool>>);

    impl Authorizer for Switch {
        fn is_authorized(&self) -> bool {
            *self.0.borrow()
        }
    }

    #[test]
    fn external_authorizer_gates_resolution() {
        let mut h = Harness::new(true);
        let granted = Rc::new(RefCell::new(false));
        h.ctx = Context::new(Verbosity::Quiet, true).with_authorizer(Switch(Rc::clone(&granted)));

        let err = h.run_quietly("account private").unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied { .. }));

        h.ctx.session.login("ada");
        assert!(h.run_quietly("account private").is_err());

        *granted.borrow_mut() = true;
        h.run_quietly("account private").unwrap();
        assert_eq!(h.calls().len(), 1);
    }

    #[test]
    fn denial_wins_over_deeper_errors() {
        let mut h = Harness::new(true);
        let err = h.run_quietly("account.private.deeper").unwrap_err();
        assert!(matches!(err, CommandError::AccessDenied { .. }));
    }

    #[test]
    fn unknown_names() {
        let mut h = Harness::new(true);
        assert!(matches!(
            h.run_quietly("fly").unwrap_err(),
            CommandError::UnknownCommand { .. }
        ));
        assert!(matches!(
            h.run_quietly("account.secret").unwrap_err(),
            CommandError::SubcommandNotFound { .. }
        ));
        assert!(matches!(
            h.run_quietly("add.more").unwrap_err(),
            CommandError::NotASubcommand { .. }
        ));
    }

    #[test]
    fn batch_arguments_match_line_input() {
        let mut h = Harness::new(true);
        let dispatcher = Dispatcher::new(&h.forest);
        dispatcher
            .run_args(
                "trip",
                &["--country", "New Zealand", "--mode", "bus"],
                &mut h.ctx,
                &mut ScriptedSource::default(),
            )
            .unwrap();

        assert_eq!(h.calls()[0].1.get("country"), Some("New Zealand"));
    }
}
