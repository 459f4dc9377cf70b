//! Command execution
//!
//! The wrapped CLI runs behind the [`CommandRunner`] trait so hosts can
//! substitute their own sandboxing or transport. [`ShellCommandRunner`] is
//! the default: it splits the command with shell-word rules and spawns the
//! binary directly, without a shell.

use crate::error::ExecutorError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::process::Stdio;
use tokio::process::Command as ProcessCommand;
use tracing::debug;

/// Executes a command and returns its standard output.
///
/// Dropping the returned future must stop the work promptly; the runner
/// relies on that for cancellation and timeouts.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn execute(
        &self,
        command: &str,
        env: &BTreeMap<String, String>,
    ) -> Result<String, ExecutorError>;
}

/// Spawns the command as a child process of this one.
#[derive(Debug, Default, Clone)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn execute(
        &self,
        command: &str,
        env: &BTreeMap<String, String>,
    ) -> Result<String, ExecutorError> {
        let failure = |reason: String| ExecutorError::CommandExecution {
            command: command.to_string(),
            reason,
        };

        let args = shlex::split(command).ok_or_else(|| failure("unbalanced quotes".to_string()))?;
        let (program, args) = args
            .split_first()
            .ok_or_else(|| failure("empty command".to_string()))?;

        debug!(program = program.as_str(), args = args.len(), "Spawning command");
        let output = ProcessCommand::new(program)
            .args(args)
            .envs(env)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| failure(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => output.status.to_string(),
                msg => format!("{}: {}", output.status, msg),
            };
            return Err(failure(reason));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
