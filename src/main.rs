//! ecoshell binary entry point.

use ecoshell::ui::output;

fn main() {
    if let Err(err) = ecoshell::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
