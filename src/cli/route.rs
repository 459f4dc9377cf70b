//! CLI route: single route table and run context. Dispatches to the runner and presentation.

use crate::config::{ConfigLoader, XConfig};
use crate::error::ExecutorError;
use crate::executor::ShellCommandRunner;
use crate::renderer::RendererRegistry;
use crate::runner::{RunRequest, Runner};
use crate::state::Container;
use crate::table::table_separated;
use crate::template::{FileTemplateSource, TemplateSource};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_toml, format_message_json, format_message_text, format_table,
    format_templates_json, format_templates_text,
};

/// Runtime context for CLI execution: effective config and the wired runner.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: XConfig,
    templates: Arc<dyn TemplateSource>,
    runner: Runner,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ExecutorError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        config.ensure_valid()?;
        Self::from_config(config, &workspace_root)
    }

    /// Wire the default collaborators around an already loaded configuration.
    pub fn from_config(config: XConfig, workspace_root: &Path) -> Result<Self, ExecutorError> {
        let registry = Arc::new(RendererRegistry::with_defaults(&config.runner)?);
        let templates: Arc<dyn TemplateSource> =
            Arc::new(FileTemplateSource::with_base_dir(workspace_root));
        let runner = Runner::new(
            &config,
            registry,
            Arc::clone(&templates),
            Arc::new(ShellCommandRunner::new()),
        );
        debug!(
            sources = config.templates.sources.len(),
            prefix = config.runner.invocation_prefix.as_str(),
            "Run context ready"
        );
        Ok(Self {
            config,
            templates,
            runner,
        })
    }

    pub fn config(&self) -> &XConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ExecutorError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        match &result {
            Ok(_) => info!(
                command = command_name(command),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Command finished"
            ),
            Err(e) => warn!(
                command = command_name(command),
                error = %e,
                "Command failed"
            ),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ExecutorError> {
        match command {
            Commands::Run {
                command,
                state,
                env,
                format,
            } => self.handle_run(command, state.as_deref(), env, format),
            Commands::Table { file } => self.handle_table(file.as_deref()),
            Commands::Templates { format } => self.handle_templates(format),
            Commands::Config => format_config_toml(&self.config),
        }
    }

    fn handle_run(
        &self,
        words: &[String],
        state_path: Option<&Path>,
        env: &[String],
        format: &str,
    ) -> Result<String, ExecutorError> {
        let state = match state_path {
            Some(path) => Container::from_json(&std::fs::read_to_string(path)?)?,
            None => Container::default(),
        };
        let request = RunRequest::new(invocation_text(words, &self.config.runner.invocation_prefix))
            .with_state(state)
            .with_env(parse_env(env)?);

        let message = block_on(async {
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_interrupt.cancel();
                }
            });
            self.runner.run(&request, &cancel).await
        })??;

        if format == "json" {
            format_message_json(&message)
        } else {
            Ok(format_message_text(&message))
        }
    }

    fn handle_table(&self, file: Option<&Path>) -> Result<String, ExecutorError> {
        let input = match file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Ok(format_table(&table_separated(&input)))
    }

    fn handle_templates(&self, format: &str) -> Result<String, ExecutorError> {
        let templates = block_on(self.templates.load(&self.config.templates.sources))??;
        if format == "json" {
            format_templates_json(&templates)
        } else {
            Ok(format_templates_text(&templates))
        }
    }
}

fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output, ExecutorError> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(fut))
}

/// Join CLI words into invocation text, adding the invocation prefix when absent.
pub fn invocation_text(words: &[String], prefix: &str) -> String {
    let text = words.join(" ");
    let prefix = prefix.trim();
    let has_prefix = text
        .strip_prefix(prefix)
        .map(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .unwrap_or(false);
    if has_prefix || prefix.is_empty() {
        text
    } else {
        format!("{} {}", prefix, text)
    }
}

/// Parse repeated `KEY=VALUE` flags; later duplicates win.
pub fn parse_env(pairs: &[String]) -> Result<BTreeMap<String, String>, ExecutorError> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(ExecutorError::Config(format!(
                "Invalid --env value {:?} (expected KEY=VALUE)",
                pair
            ))),
        })
        .collect()
}
