//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the runner.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_toml, format_message_json, format_message_text, format_section_heading,
    format_table, format_templates_json, format_templates_text,
};
pub use route::{invocation_text, parse_env, RunContext};
