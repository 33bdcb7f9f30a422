//! Writing protected files with elevation
//!
//! The hosts file is only writable with elevation. New content is always
//! staged to a temporary file first and copied over the target in a single
//! step, so the protected file is never left half-written. Reconciliation
//! stays platform-independent; only this final write branches on platform.

use crate::error::ToolError;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write `content` to a protected path through the platform elevation helper.
pub async fn write_protected(path: &Path, content: &str) -> Result<()> {
    let staged = stage(content)?;
    debug!(staged = %staged.path().display(), target = %path.display(), "Staged protected write");
    copy_with_elevation(staged.path(), path).await?;
    info!(path = %path.display(), "Protected file updated");
    Ok(())
}

/// Write `content` to a path the current user can write directly.
///
/// Stages in the target's own directory so the final rename is atomic.
/// Used when elevation is disabled in the configuration (root runs, tests).
pub async fn write_direct(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to stage temporary file in '{}'", dir.display()))?;
    staged
        .write_all(content.as_bytes())
        .context("Failed to write staged content")?;
    staged
        .persist(path)
        .with_context(|| format!("Failed to replace '{}'", path.display()))?;

    info!(path = %path.display(), "File updated");
    Ok(())
}

fn stage(content: &str) -> Result<NamedTempFile> {
    let mut staged = NamedTempFile::new().context("Failed to create temporary staging file")?;
    staged
        .write_all(content.as_bytes())
        .context("Failed to write staged content")?;
    staged.flush().context("Failed to flush staged content")?;
    Ok(staged)
}

#[cfg(unix)]
async fn copy_with_elevation(staged: &Path, target: &Path) -> Result<()> {
    let status = tokio::process::Command::new("sudo")
        .arg("cp")
        .arg(staged)
        .arg(target)
        .status()
        .await
        .map_err(|e| ToolError::from_spawn("sudo", "Elevation requires sudo.", e))?;

    ToolError::check_status("sudo cp", status)?;
    Ok(())
}

#[cfg(windows)]
async fn copy_with_elevation(staged: &Path, target: &Path) -> Result<()> {
    // Relaunch PowerShell with elevation to perform the single copy.
    let copy_command = format!(
        "Copy-Item -Path '{}' -Destination '{}' -Force",
        staged.display(),
        target.display()
    );
    let elevated = format!(
        "Start-Process powershell -Verb RunAs -Wait -ArgumentList '-Command',\"{}\"",
        copy_command
    );

    let status = tokio::process::Command::new("powershell")
        .args(["-Command", &elevated])
        .status()
        .await
        .map_err(|e| ToolError::from_spawn("powershell", "Elevation requires PowerShell.", e))?;

    ToolError::check_status("powershell Copy-Item", status)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_direct_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "old content\n").unwrap();

        write_direct(&path, "new content\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new content\n");
    }

    #[tokio::test]
    async fn test_write_direct_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");

        write_direct(&path, "127.0.0.1   localhost\n").await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "127.0.0.1   localhost\n"
        );
    }
}
