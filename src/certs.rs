//! TLS certificate provisioning via an external issuance tool
//!
//! Shells out to an mkcert-compatible tool with explicit output filenames
//! and both domain forms as subject names, then relocates the produced
//! certificate and key into the ssl directory the proxy container mounts.

use crate::domain::DomainPair;
use crate::error::ToolError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

const MKCERT_HINT: &str = "Install mkcert: https://github.com/FiloSottile/mkcert";

/// Invokes the certificate tool and places the artifacts
pub struct CertProvisioner {
    /// Issuance command split into argv form
    command: Vec<String>,
    /// Destination directory for certificate and key
    ssl_dir: PathBuf,
}

impl CertProvisioner {
    /// Build a provisioner from a configured command string.
    pub fn new(command: &str, ssl_dir: PathBuf) -> Result<Self> {
        let command = shell_words::split(command)
            .with_context(|| format!("Invalid certificate command: '{}'", command))?;
        if command.is_empty() {
            anyhow::bail!("Certificate command is empty");
        }
        Ok(Self { command, ssl_dir })
    }

    /// Generate a certificate for both domain forms and move the two
    /// artifacts into the ssl directory, creating it if absent.
    ///
    /// The tool writes into the working directory; the relocation happens
    /// afterwards so a failed run leaves nothing behind in the ssl dir.
    pub async fn provision(&self, pair: &DomainPair) -> Result<()> {
        let cert_file = pair.cert_file_name();
        let key_file = pair.key_file_name();
        let (program, leading_args) = self
            .command
            .split_first()
            .expect("command checked non-empty in constructor");

        info!(
            tool = %program,
            domains = %format!("{} {}", pair.with_www, pair.without_www),
            "Generating TLS certificates"
        );

        let status = Command::new(program)
            .args(leading_args)
            .args(["-cert-file", &cert_file, "-key-file", &key_file])
            .arg(&pair.with_www)
            .arg(&pair.without_www)
            .status()
            .await
            .map_err(|e| ToolError::from_spawn(program, MKCERT_HINT, e))?;

        ToolError::check_status(program, status)?;

        tokio::fs::create_dir_all(&self.ssl_dir)
            .await
            .with_context(|| format!("Failed to create ssl directory '{}'", self.ssl_dir.display()))?;

        for name in [&cert_file, &key_file] {
            let source = PathBuf::from(name);
            if source.exists() {
                let dest = self.ssl_dir.join(name);
                tokio::fs::rename(&source, &dest)
                    .await
                    .with_context(|| format!("Failed to move '{}' into '{}'", name, self.ssl_dir.display()))?;
                info!(file = %name, dir = %self.ssl_dir.display(), "Moved certificate artifact");
            } else {
                debug!(file = %name, "Certificate tool produced no such file");
            }
        }

        Ok(())
    }

    /// Delete the certificate and key for a pair, returning the names of the
    /// files that were actually removed.
    pub async fn remove(&self, pair: &DomainPair) -> Result<Vec<String>> {
        let mut removed = Vec::new();

        for name in [pair.cert_file_name(), pair.key_file_name()] {
            let path = self.ssl_dir.join(&name);
            if path.exists() {
                tokio::fs::remove_file(&path)
                    .await
                    .with_context(|| format!("Failed to remove '{}'", path.display()))?;
                info!(file = %name, "Removed certificate artifact");
                removed.push(name);
            }
        }

        Ok(removed)
    }
}
