//! Error kinds for external tool invocations
//!
//! Every collaborator (certificate tool, compose CLI, elevation helper) is an
//! external binary. A missing binary is its own error kind with an install
//! hint, so the operator gets remediation instead of a bare ENOENT.

use std::process::ExitStatus;
use thiserror::Error;

/// Failure modes of an external tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool binary was not found on PATH
    #[error("'{tool}' was not found on PATH. {hint}")]
    NotFound { tool: String, hint: String },

    /// The tool ran but exited unsuccessfully
    #[error("'{tool}' exited with {status}")]
    Failed { tool: String, status: ExitStatus },

    /// The tool could not be spawned for some other reason
    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// Classify a spawn error, mapping ENOENT to the dedicated kind.
    pub fn from_spawn(tool: &str, hint: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ToolError::NotFound {
                tool: tool.to_string(),
                hint: hint.to_string(),
            }
        } else {
            ToolError::Spawn {
                tool: tool.to_string(),
                source,
            }
        }
    }

    /// Turn a finished invocation's status into a result.
    pub fn check_status(tool: &str, status: ExitStatus) -> Result<(), Self> {
        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                tool: tool.to_string(),
                status,
            })
        }
    }
}
