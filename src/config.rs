//! Tool configuration
//!
//! Everything has a working default; a `devgate.toml` next to the compose
//! project (or in the user config directory) overrides individual fields.

use crate::hosts;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for both flows
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path of the system hosts file (default: platform hosts path)
    #[serde(default = "hosts::default_hosts_path")]
    pub hosts_path: PathBuf,

    /// Write the hosts file through the platform elevation helper
    /// (default: true; disable for root runs or tests)
    #[serde(default = "default_elevate")]
    pub elevate: bool,

    /// Path of the rendered proxy configuration file
    #[serde(default = "default_nginx_conf")]
    pub nginx_conf: PathBuf,

    /// Directory the certificate and key are placed in
    #[serde(default = "default_ssl_dir")]
    pub ssl_dir: PathBuf,

    /// Certificate issuance command (mkcert-compatible flags)
    #[serde(default = "default_cert_command")]
    pub cert_command: String,

    /// Compose CLI command used for `up` / `down`
    #[serde(default = "default_compose_command")]
    pub compose_command: String,
}

fn default_elevate() -> bool {
    true
}

fn default_nginx_conf() -> PathBuf {
    PathBuf::from("nginx/nginx.conf")
}

fn default_ssl_dir() -> PathBuf {
    PathBuf::from("nginx/ssl")
}

fn default_cert_command() -> String {
    "mkcert".to_string()
}

fn default_compose_command() -> String {
    "docker compose".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hosts_path: hosts::default_hosts_path(),
            elevate: default_elevate(),
            nginx_conf: default_nginx_conf(),
            ssl_dir: default_ssl_dir(),
            cert_command: default_cert_command(),
            compose_command: default_compose_command(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, or defaults.
    ///
    /// Lookup order: `devgate.toml` in the working directory, then
    /// `devgate/config.toml` under the user config directory.
    pub fn load() -> Result<Self> {
        for path in Self::candidate_paths() {
            if path.exists() {
                let config = Self::from_file(&path)?;
                info!(path = %path.display(), "Configuration loaded");
                return Ok(config);
            }
            debug!(path = %path.display(), "No config file at candidate path");
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Parse a specific configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("devgate.toml")];
        if let Some(config_dir) = dirs_next::config_dir() {
            paths.push(config_dir.join("devgate").join("config.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.elevate);
        assert_eq!(config.nginx_conf, PathBuf::from("nginx/nginx.conf"));
        assert_eq!(config.ssl_dir, PathBuf::from("nginx/ssl"));
        assert_eq!(config.cert_command, "mkcert");
        assert_eq!(config.compose_command, "docker compose");
        #[cfg(not(windows))]
        assert_eq!(config.hosts_path, PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "compose_command = \"podman compose\"").unwrap();
        writeln!(file, "elevate = false").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.compose_command, "podman compose");
        assert!(!config.elevate);
        assert_eq!(config.cert_command, "mkcert");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "elevate = \"maybe\"").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }
}
