//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt for omitted arguments
//! - `--quiet` / `-q`: Minimal output; implies `--no-interactive`
//!
//! Everything after the flags is a console command run once in batch
//! mode. Without a command the interactive console starts.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

/// ecoshell - an interactive console for tracking your footprint
#[derive(Parser, Debug)]
#[command(name = "ecoshell")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Start the interactive console
    ecoshell

    # Run a single command and exit
    ecoshell help
    ecoshell session login ada")]
pub struct Cli {
    /// Read configuration from this file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long)]
    pub quiet: bool,

    /// Never prompt for omitted arguments
    #[arg(long)]
    pub no_interactive: bool,

    /// Console command to run once, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if prompting is allowed.
    ///
    /// Returns true if neither `--no-interactive` nor `--quiet` was set,
    /// the config allows it, and stdin is a terminal.
    pub fn interactive(&self, config_allows: bool) -> bool {
        if self.no_interactive || self.quiet || !config_allows {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }

    /// Split the batch command into its name and arguments.
    pub fn batch(&self) -> Option<(&str, &[String])> {
        self.command
            .split_first()
            .map(|(command, args)| (command.as_str(), args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_means_console() {
        let cli = Cli::parse_from(["ecoshell", "--debug"]);
        assert!(cli.debug);
        assert!(cli.batch().is_none());
    }

    #[test]
    fn command_keeps_hyphenated_arguments() {
        let cli = Cli::parse_from(["ecoshell", "-q", "help", "-c", "session", "--verbose"]);
        assert!(cli.quiet);
        let (command, args) = cli.batch().unwrap();
        assert_eq!(command, "help");
        assert_eq!(args, ["-c", "session", "--verbose"]);
    }

    #[test]
    fn quiet_disables_prompting() {
        let cli = Cli::parse_from(["ecoshell", "--quiet"]);
        assert!(!cli.interactive(true));
    }

    #[test]
    fn config_can_disable_prompting() {
        let cli = Cli::parse_from(["ecoshell"]);
        assert!(!cli.interactive(false));
    }

    #[test]
    fn config_path_is_captured() {
        let cli = Cli::parse_from(["ecoshell", "--config", "/tmp/eco.toml", "exit"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/eco.toml")));
        assert_eq!(cli.batch().unwrap().0, "exit");
    }
}
