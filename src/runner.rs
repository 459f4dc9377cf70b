//! Invocation runner
//!
//! Takes one raw invocation through the whole pipeline: parse directives,
//! load templates, execute the wrapped command, then either return the raw
//! output or dispatch to the renderer registered for the matching template.
//!
//! Every external call (template load, command execution) is bounded by the
//! configured timeout and aborted as soon as the cancellation token fires.

use crate::ansi::strip_ansi;
use crate::command;
use crate::config::{RunnerConfig, XConfig};
use crate::error::ExecutorError;
use crate::executor::CommandRunner;
use crate::message::Message;
use crate::renderer::RendererRegistry;
use crate::state::Container;
use crate::template::{find_with_prefix, TemplateSource};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// One invocation as received from the chat platform.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Raw text after the invocation prefix was recognised, e.g.
    /// `x run helm list @idx:1`.
    pub command: String,
    /// Interaction state posted back by the platform.
    pub state: Container,
    /// Environment added on top of the configured one.
    pub env: BTreeMap<String, String>,
}

impl RunRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn with_state(mut self, state: Container) -> Self {
        self.state = state;
        self
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }
}

/// Orchestrates parse, load, execute and render for each invocation.
///
/// The runner holds no per-invocation state, so one instance can serve
/// concurrent requests.
pub struct Runner {
    registry: Arc<RendererRegistry>,
    templates: Arc<dyn TemplateSource>,
    executor: Arc<dyn CommandRunner>,
    template_refs: Vec<String>,
    config: RunnerConfig,
}

impl Runner {
    pub fn new(
        config: &XConfig,
        registry: Arc<RendererRegistry>,
        templates: Arc<dyn TemplateSource>,
        executor: Arc<dyn CommandRunner>,
    ) -> Self {
        let mut runner_config = config.runner.clone();
        // Config keys may arrive lower-cased from the layered loader.
        runner_config.env = runner_config
            .env
            .into_iter()
            .map(|(name, value)| (name.to_ascii_uppercase(), value))
            .collect();
        Self {
            registry,
            templates,
            executor,
            template_refs: config.templates.sources.clone(),
            config: runner_config,
        }
    }

    /// Run one invocation to a finished message.
    pub async fn run(
        &self,
        request: &RunRequest,
        cancel: &CancellationToken,
    ) -> Result<Message, ExecutorError> {
        let cmd = command::parse(&request.command);
        info!(
            command = %cmd.to_execute,
            raw = cmd.is_raw_required,
            page = cmd.page_index,
            "Handling invocation"
        );

        let templates = self
            .bounded(cancel, self.templates.load(&self.template_refs))
            .await?;
        debug!(count = templates.len(), "Templates loaded");

        let executable = cmd.executable(&self.config.invocation_prefix);
        let mut env = self.config.env.clone();
        env.extend(request.env.iter().map(|(k, v)| (k.clone(), v.clone())));

        let output = match self.bounded(cancel, self.executor.execute(executable, &env)).await {
            Ok(output) => output,
            Err(e) => {
                error!(command = executable, error = %e, "Command execution failed");
                return Err(e);
            }
        };
        debug!(command = executable, bytes = output.len(), "Command executed");

        if cmd.is_raw_required {
            debug!("Raw output requested");
            return Ok(Message::code_block(strip_ansi(&output)));
        }

        let Some(template) = find_with_prefix(&templates, executable) else {
            warn!(command = executable, "No template matches command, returning raw output");
            return Ok(Message::code_block(strip_ansi(&output)));
        };

        let renderer = self.registry.resolve(template)?;
        let message = renderer.render_message(&cmd, &output, &request.state, template)?;
        info!(
            template_type = %template.template_type,
            trigger = %template.trigger.command,
            sections = message.sections.len(),
            "Rendered message"
        );
        Ok(message)
    }

    /// Await `fut` under the configured deadline, giving up early on cancellation.
    async fn bounded<T, F>(&self, cancel: &CancellationToken, fut: F) -> Result<T, ExecutorError>
    where
        F: Future<Output = Result<T, ExecutorError>>,
    {
        let secs = self.config.timeout_secs;
        tokio::select! {
            _ = cancel.cancelled() => Err(ExecutorError::Cancelled),
            res = tokio::time::timeout(Duration::from_secs(secs), fut) => match res {
                Ok(inner) => inner,
                Err(_) => Err(ExecutorError::Timeout(secs)),
            },
        }
    }
}
