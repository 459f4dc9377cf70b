//! CLI parse: clap types for xrender. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// xrender CLI - Render CLI output as interactive chat messages
#[derive(Parser)]
#[command(name = "xrender")]
#[command(about = "Render command output as interactive chat messages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config and relative template paths resolve here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a command and render its output
    Run {
        /// Invocation text, e.g. `helm list @idx:2`; the invocation prefix is added when missing
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
        /// JSON file with the interaction state of the previous message
        #[arg(long)]
        state: Option<PathBuf>,
        /// Extra environment for the command (KEY=VALUE, repeatable)
        #[arg(long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Parse whitespace-aligned output from stdin or a file and show the columns
    Table {
        /// Read from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List loaded templates in match order
    Templates {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration
    Config,
}
