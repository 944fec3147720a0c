//! cli
//!
//! Process surface of the console.
//!
//! # Responsibilities
//!
//! - Parse command-line flags and load configuration
//! - Set up diagnostic logging
//! - Build the command forest from the built-in commands
//! - Run one batch command, or the interactive console loop
//!
//! # Architecture
//!
//! The CLI layer is thin. It wires flags and config into a
//! [`Context`](crate::engine::Context) and hands every line to the
//! [`Dispatcher`](crate::engine::Dispatcher). Commands themselves live in
//! [`commands`].

pub mod args;
pub mod commands;
pub mod repl;

pub use args::Cli;

use anyhow::{Context as _, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::engine::{Context, Dispatcher};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::StdinSource;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, if a command
/// definition is invalid, or if a batch command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    let config = Config::load(cli.config.as_deref())?;
    match config.path() {
        Some(path) => output::debug(format!("using config {}", path.display()), verbosity),
        None => output::debug("no config file, using defaults", verbosity),
    }

    let forest = commands::build_forest().context("invalid command definitions")?;
    info!(commands = forest.len(), "command forest built");

    let mut ctx = Context::new(verbosity, cli.interactive(config.interactive()));
    let dispatcher = Dispatcher::new(&forest);
    let mut input = StdinSource::new();

    if let Some((command, args)) = cli.batch() {
        debug!(command, "batch mode");
        dispatcher.run_args(command, args, &mut ctx, &mut input)?;
        return Ok(());
    }

    if config.banner() {
        output::print(repl::BANNER, verbosity);
    }
    repl::run_repl(&dispatcher, &mut ctx, &mut input, config.prompt())
        .context("failed to read console input")?;
    Ok(())
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--debug` selects `debug` and the
/// default is `warn`.
fn init_logging(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
