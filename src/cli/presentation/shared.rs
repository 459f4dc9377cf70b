//! Shared presentation helpers.

use crate::config::XConfig;
use crate::error::ExecutorError;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Pretty JSON for CLI output.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, ExecutorError> {
    serde_json::to_string_pretty(value).map_err(|e| ExecutorError::Serialization(e.to_string()))
}

/// Effective configuration as TOML.
pub fn format_config_toml(config: &XConfig) -> Result<String, ExecutorError> {
    toml::to_string_pretty(config)
        .map_err(|e| ExecutorError::Config(format!("Failed to serialize config: {}", e)))
}
