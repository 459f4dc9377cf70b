//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name recorded on the command span (e.g. "run", "templates").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Run { .. } => "run",
        Commands::Table { .. } => "table",
        Commands::Templates { .. } => "templates",
        Commands::Config => "config",
    }
}
