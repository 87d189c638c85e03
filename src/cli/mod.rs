// CLI module
// Command-line arguments, interactive menu and operator session

mod args;
mod menu;
mod session;

pub use args::{CliArgs, Command, StrategyType};
pub use menu::Menu;
pub use session::{cars_table, Session};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (e.g., invalid arguments or --help flag), clap displays
/// an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
