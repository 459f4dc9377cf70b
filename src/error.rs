//! Error types for the command-output rendering pipeline.

use thiserror::Error;

/// Errors surfaced by the runner, the renderers and their collaborators.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Failed to load templates: {0}")]
    TemplateLoad(String),

    #[error("Command `{command}` failed: {reason}")]
    CommandExecution { command: String, reason: String },

    #[error(
        "No renderer available for type {requested:?}; registered types: [{}]",
        available.join(", ")
    )]
    RenderDispatch {
        requested: String,
        available: Vec<String>,
    },

    #[error("Template rendering failed: {0}")]
    TemplateRender(String),

    #[error("Renderer already registered for key {0:?}")]
    RegistryConflict(String),

    #[error("Invalid interaction state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Serialization(String),

    #[error("Operation timed out after {0}s")]
    Timeout(u64),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ExecutorError {
    fn from(err: config::ConfigError) -> Self {
        ExecutorError::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExecutorError {
    fn from(err: serde_yaml::Error) -> Self {
        ExecutorError::TemplateLoad(err.to_string())
    }
}

impl From<serde_json::Error> for ExecutorError {
    fn from(err: serde_json::Error) -> Self {
        ExecutorError::InvalidState(err.to_string())
    }
}

impl From<handlebars::RenderError> for ExecutorError {
    fn from(err: handlebars::RenderError) -> Self {
        ExecutorError::TemplateRender(err.to_string())
    }
}
