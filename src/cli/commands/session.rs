//! Session commands: log in, log out, show status.
//!
//! The session lives in memory only. Logging in authorizes commands
//! marked `auth_required` for the rest of the process or until logout.

use anyhow::{bail, Result};

use crate::core::arguments::{ArgumentList, KeywordSpec, PositionalSpec};
use crate::core::tree::{CommandDef, Invocation};
use crate::core::types::{ArgumentType, DefinitionError};
use crate::engine::Context;
use crate::ui::output;

/// The `session` command group.
pub fn definition() -> Result<CommandDef, DefinitionError> {
    let login_args = ArgumentList::new([
        PositionalSpec::new("username", "Who is logging in", ArgumentType::Text)?
            .with_prompt("Username")
            .into(),
        KeywordSpec::new("remember", "Remember this user next time", ArgumentType::Flag)?
            .with_abbreviation('r')
            .into(),
    ])?;

    Ok(CommandDef::group(
        "session",
        "Log in and out",
        vec![
            CommandDef::leaf(
                "login",
                "Start a session",
                "session login ada",
                login_args,
                login,
            ),
            CommandDef::leaf(
                "logout",
                "End the current session",
                "session logout",
                ArgumentList::empty(),
                logout,
            )
            .auth_required(),
            CommandDef::leaf(
                "status",
                "Show who is logged in",
                "session status",
                ArgumentList::empty(),
                status,
            ),
        ],
    )
    .with_example("session login ada"))
}

fn login(ctx: &mut Context, call: &Invocation<'_>) -> Result<()> {
    let Some(username) = call.get("username") else {
        bail!("no username bound");
    };

    if let Some(previous) = ctx.session.user() {
        if previous != username {
            output::warn(format!("replacing session for {}", previous), ctx.verbosity);
        }
    }
    ctx.session.login(username);

    output::success(format!("Logged in as {}", username), ctx.verbosity);
    if call.flag("remember") {
        output::warn(
            "--remember has no effect: sessions are not stored",
            ctx.verbosity,
        );
    }
    Ok(())
}

fn logout(ctx: &mut Context, _call: &Invocation<'_>) -> Result<()> {
    match ctx.session.logout() {
        Some(user) => output::success(format!("Logged out {}", user), ctx.verbosity),
        None => output::print("Not logged in", ctx.verbosity),
    }
    Ok(())
}

fn status(ctx: &mut Context, _call: &Invocation<'_>) -> Result<()> {
    match ctx.session.user() {
        Some(user) => output::print(format!("Logged in as {}", user), ctx.verbosity),
        None => output::print("Not logged in", ctx.verbosity),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::ForestBuilder;
    use crate::engine::{CommandError, Dispatcher};
    use crate::ui::output::Verbosity;
    use crate::ui::prompts::ScriptedSource;

    fn run(ctx: &mut Context, lines: &[&str]) -> Vec<Result<(), CommandError>> {
        let forest = ForestBuilder::new()
            .register(Some("account"), definition().unwrap())
            .build()
            .unwrap();
        let dispatcher = Dispatcher::new(&forest);
        let mut input = ScriptedSource::default();
        lines
            .iter()
            .map(|line| dispatcher.run_line(line, ctx, &mut input))
            .collect()
    }

    fn quiet() -> Context {
        Context::new(Verbosity::Quiet, false)
    }

    #[test]
    fn login_then_logout() {
        let mut ctx = quiet();
        let results = run(&mut ctx, &["session login ada -r", "session logout"]);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(ctx.session.user(), None);
    }

    #[test]
    fn logout_requires_login() {
        let mut ctx = quiet();
        let results = run(&mut ctx, &["session logout"]);
        assert!(matches!(results[0], Err(CommandError::AccessDenied { .. })));
    }

    #[test]
    fn status_never_changes_session() {
        let mut ctx = quiet();
        let results = run(&mut ctx, &["session.login grace", "session status"]);
        assert!(results.iter().all(Result::is_ok));
        assert_eq!(ctx.session.user(), Some("grace"));
    }
}
