//! Container runtime lifecycle via the compose CLI
//!
//! Thin pass-through: one `up` or `down` invocation with inherited stdio,
//! surfacing the exit status. No retries, no health checks.

use crate::error::ToolError;
use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::info;

const COMPOSE_HINT: &str = "Install Docker with the compose plugin: https://docs.docker.com/compose/";

/// Starts and stops the proxy's container group
pub struct ComposeInvoker {
    /// Compose command split into argv form (e.g., ["docker", "compose"])
    command: Vec<String>,
}

impl ComposeInvoker {
    /// Build an invoker from a configured command string.
    pub fn new(command: &str) -> Result<Self> {
        let command = shell_words::split(command)
            .with_context(|| format!("Invalid compose command: '{}'", command))?;
        if command.is_empty() {
            anyhow::bail!("Compose command is empty");
        }
        Ok(Self { command })
    }

    /// Start the container group. Runs in the foreground until compose exits.
    pub async fn up(&self) -> Result<()> {
        self.run("up").await
    }

    /// Stop and remove the container group.
    pub async fn down(&self) -> Result<()> {
        self.run("down").await
    }

    async fn run(&self, subcommand: &str) -> Result<()> {
        let (program, leading_args) = self
            .command
            .split_first()
            .expect("command checked non-empty in constructor");

        info!(tool = %program, subcommand, "Invoking compose");

        let status = Command::new(program)
            .args(leading_args)
            .arg(subcommand)
            .status()
            .await
            .map_err(|e| ToolError::from_spawn(program, COMPOSE_HINT, e))?;

        let label = format!("{} {}", self.command.join(" "), subcommand);
        ToolError::check_status(&label, status)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_command() {
        assert!(ComposeInvoker::new("").is_err());
    }

    #[test]
    fn test_new_splits_multi_word_command() {
        let invoker = ComposeInvoker::new("docker compose").unwrap();
        assert_eq!(invoker.command, vec!["docker", "compose"]);
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported_as_not_found() {
        let invoker = ComposeInvoker::new("devgate-no-such-compose").unwrap();
        let err = invoker.up().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::NotFound { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_tool_surfaces_exit_status() {
        let invoker = ComposeInvoker::new("false").unwrap();
        let err = invoker.down().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::Failed { .. })
        ));
    }
}
