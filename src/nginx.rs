//! Reverse-proxy configuration rendering
//!
//! Renders the full nginx.conf for one domain pair and backend port. The
//! file is overwritten as a whole on every provisioning run, never merged.

use crate::domain::DomainPair;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Render the proxy configuration for a domain pair and backend port.
///
/// Deterministic and total: the port is an uninterpreted string and is
/// interpolated verbatim, including out-of-range or non-numeric values.
pub fn render_config(pair: &DomainPair, backend_port: &str) -> String {
    format!(
        r#"events {{}}

http {{
    server {{
        listen 443 ssl;
        server_name {www} {bare};

        ssl_certificate     /etc/nginx/ssl/{www}.pem;
        ssl_certificate_key /etc/nginx/ssl/{www}-key.pem;

        location / {{
            proxy_pass https://host.docker.internal:{port};
            proxy_set_header Host $host;
            proxy_set_header X-Real-IP $remote_addr;
            proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
            proxy_set_header X-Forwarded-Proto $scheme;
        }}
    }}

    # Plain HTTP listener that redirects everything to the HTTPS server
    server {{
        listen 80;
        server_name {www} {bare};
        return 301 https://$host$request_uri;
    }}
}}
"#,
        www = pair.with_www,
        bare = pair.without_www,
        port = backend_port,
    )
}

/// Render and write the configuration file, creating parent directories.
pub async fn write_config(path: &Path, pair: &DomainPair, backend_port: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory '{}'", parent.display())
            })?;
        }
    }

    let content = render_config(pair, backend_port);
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write proxy config '{}'", path.display()))?;

    info!(path = %path.display(), domain = %pair.with_www, "Proxy configuration written");
    Ok(())
}
