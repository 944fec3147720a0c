//! `help` command: list commands, or describe one.
//!
//! Disabled commands are left out, so the listing always matches what
//! the current session can run.

use anyhow::Result;

use crate::core::arguments::{ArgumentList, KeywordSpec};
use crate::core::tree::{CommandDef, CommandForest, CommandRef, Invocation};
use crate::core::types::{ArgumentType, DefinitionError};
use crate::engine::{Authorizer, Context, Dispatcher};
use crate::ui::output;

pub fn definition() -> Result<CommandDef, DefinitionError> {
    let args = ArgumentList::new([KeywordSpec::new(
        "command",
        "Dotted path of the command to describe",
        ArgumentType::Text,
    )?
    .with_abbreviation('c')
    .into()])?;

    Ok(CommandDef::leaf(
        "help",
        "Show available commands",
        "help -c session.login",
        args,
        help,
    ))
}

fn help(ctx: &mut Context, call: &Invocation<'_>) -> Result<()> {
    let forest = call.command().forest();
    let text = match call.get("command") {
        Some(path) => {
            let segments: Vec<&str> = path.split('.').collect();
            let command = Dispatcher::new(forest).resolve_path(&segments, ctx.authorizer())?;
            describe(command, ctx.authorizer())
        }
        None => overview(forest, ctx.authorizer()),
    };
    output::print(text, ctx.verbosity);
    Ok(())
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0)
}

/// Visible root commands grouped by namespace.
pub fn overview(forest: &CommandForest, auth: &dyn Authorizer) -> String {
    let width = name_width(forest.roots().map(|root| root.name()));
    let mut sections = Vec::new();

    for namespace in forest.namespaces() {
        let rows: Vec<String> = forest
            .roots_of(namespace)
            .filter(|root| !root.is_disabled(auth))
            .map(|root| format!("  {}", output::format_row(root.name(), root.description(), width)))
            .collect();
        if rows.is_empty() {
            continue;
        }

        let heading = match namespace.label() {
            Some(label) => format!("{}:", label),
            None => "Commands:".to_string(),
        };
        sections.push(format!("{}\n{}", heading, rows.join("\n")));
    }

    sections.push("Type 'help -c <command>' for details.".to_string());
    sections.join("\n\n")
}

/// Description, usage, arguments and sub-commands of one command.
pub fn describe(command: CommandRef<'_>, auth: &dyn Authorizer) -> String {
    let mut lines = vec![
        format!("{} - {}", command.path_string(), command.description()),
        format!("Usage: {}", command.usage()),
    ];
    if let Some(example) = command.example() {
        lines.push(format!("Example: {}", example));
    }

    if let Some(arguments) = command.arguments().filter(|a| !a.is_empty()) {
        lines.push(String::new());
        lines.push("Arguments:".to_string());
        lines.extend(argument_rows(arguments));
    }

    let children: Vec<_> = command.children().filter(|c| !c.is_disabled(auth)).collect();
    if !children.is_empty() {
        let width = name_width(children.iter().map(|c| c.name()));
        lines.push(String::new());
        lines.push("Sub-commands:".to_string());
        lines.extend(
            children
                .iter()
                .map(|c| format!("  {}", output::format_row(c.name(), c.description(), width))),
        );
    }

    lines.join("\n")
}

fn argument_rows(arguments: &ArgumentList) -> Vec<String> {
    let positional = arguments
        .positional()
        .iter()
        .map(|spec| (format!("<{}>", spec.name()), spec.description(), spec.kind()));
    let keyword = arguments.keyword().iter().map(|spec| {
        let keys = match spec.abbreviation() {
            Some(abbreviation) => format!("-{}, --{}", abbreviation, spec.name()),
            None => format!("--{}", spec.name()),
        };
        let keys = if spec.is_required() {
            format!("{} (required)", keys)
        } else {
            keys
        };
        (keys, spec.description(), spec.kind())
    });

    let rows: Vec<(String, &str, &ArgumentType)> = positional.chain(keyword).collect();
    let width = name_width(rows.iter().map(|(keys, _, _)| keys.as_str()));
    rows.iter()
        .map(|(keys, description, kind)| {
            let detail = if description.is_empty() {
                format!("expects {}", kind)
            } else {
                format!("{}; expects {}", description, kind)
            };
            format!("  {}", output::format_row(keys, &detail, width))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::build_forest;
    use crate::engine::Session;

    fn logged_in() -> Session {
        let mut session = Session::new();
        session.login("ada");
        session
    }

    #[test]
    fn overview_groups_by_namespace() {
        let forest = build_forest().unwrap();
        let text = overview(&forest, &Session::new());
        assert!(text.starts_with("Commands:\n"));
        assert!(text.contains("\n\naccount:\n  session"));
        assert!(text.ends_with("Type 'help -c <command>' for details."));
    }

    #[test]
    fn describe_lists_arguments() {
        let forest = build_forest().unwrap();
        let login = Dispatcher::new(&forest)
            .resolve_path(&["session", "login"], &Session::new())
            .unwrap();
        let text = describe(login, &Session::new());

        assert!(text.starts_with("session.login - Start a session\n"));
        assert!(text.contains("Usage: session.login <username> [-r|--remember]"));
        assert!(text.contains("Example: session login ada"));
        assert!(text.contains("<username>"));
        assert!(text.contains("-r, --remember"));
    }

    #[test]
    fn describe_hides_disabled_children() {
        let forest = build_forest().unwrap();
        let session = Dispatcher::new(&forest)
            .resolve_path(&["session"], &Session::new())
            .unwrap();

        assert!(!describe(session, &Session::new()).contains("\n  logout"));
        assert!(describe(session, &logged_in()).contains("\n  logout"));
    }
}
