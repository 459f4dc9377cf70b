//! Configuration System
//!
//! Layered configuration for the renderer: built-in defaults, a global file,
//! workspace files and `XRENDER__*` environment variables, in increasing
//! precedence. An explicit config file replaces the file layers.

use crate::error::ExecutorError;
use crate::logging::LoggingConfig;
use config::Environment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XConfig {
    /// Where templates are loaded from
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Invocation settings
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Template files or directories, in match order
    #[serde(default)]
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Prefix users type before the wrapped command, e.g. `x run`
    #[serde(default = "default_invocation_prefix")]
    pub invocation_prefix: String,

    /// Deadline for each external call (template load, command execution)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tutorial page size for templates that do not set one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Extra environment injected into every executed command; names are upper-cased
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_invocation_prefix() -> String {
    "x run".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    5
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            invocation_prefix: default_invocation_prefix(),
            timeout_secs: default_timeout_secs(),
            default_page_size: default_page_size(),
            env: BTreeMap::new(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Runner(String),
    Templates(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Runner(msg) => write!(f, "Runner: {}", msg),
            ValidationError::Templates(msg) => write!(f, "Templates: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl XConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.runner.invocation_prefix.trim().is_empty() {
            errors.push(ValidationError::Runner(
                "invocation_prefix cannot be empty".to_string(),
            ));
        }
        if self.runner.timeout_secs == 0 {
            errors.push(ValidationError::Runner(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.runner.default_page_size == 0 {
            errors.push(ValidationError::Runner(
                "default_page_size must be greater than zero".to_string(),
            ));
        }
        for (idx, source) in self.templates.sources.iter().enumerate() {
            if source.trim().is_empty() {
                errors.push(ValidationError::Templates(format!(
                    "source #{} is empty",
                    idx
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into one configuration error.
    pub fn ensure_valid(&self) -> Result<(), ExecutorError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ExecutorError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }
}

/// Builds [`XConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, workspace files and environment overrides.
    pub fn load(workspace_root: &Path) -> Result<XConfig, ExecutorError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config: XConfig = builder
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Load defaults, one explicit file and environment overrides.
    pub fn load_from_file(path: &Path) -> Result<XConfig, ExecutorError> {
        if !path.exists() {
            return Err(ExecutorError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config: XConfig = merge::builder_with_defaults()?
            .add_source(config::File::from(path))
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Path of the global config file, if a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_config_path()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("XRENDER")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("templates.sources")
        .try_parsing(true)
}
