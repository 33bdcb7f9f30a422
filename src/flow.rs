//! Step driver for the provision and tear-down flows
//!
//! Each flow is a fixed, ordered list of step descriptors executed by one
//! driver loop. Every step asks for confirmation first; a declined step is
//! skipped, a failed step is reported together with manual remediation
//! instructions, and the loop always continues to the next step. Only a
//! broken prompt channel aborts the run.

use crate::certs::CertProvisioner;
use crate::compose::ComposeInvoker;
use crate::config::Config;
use crate::domain::DomainPair;
use crate::hosts::{self, HostsAction};
use crate::session::{Input, Session};
use crate::{elevate, nginx};
use anyhow::{Context, Result};
use tracing::error;

/// What a step does when confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Invoke the certificate tool and place the artifacts
    ProvisionCerts,
    /// Render and overwrite the reverse-proxy configuration
    WriteProxyConfig,
    /// Reconcile the hosts file entries for the domain pair
    ReconcileHosts(HostsAction),
    /// Start the container group
    ComposeUp,
    /// Stop the container group
    ComposeDown,
    /// Delete the certificate artifacts
    RemoveCerts,
}

/// One entry in a flow's ordered step list
pub struct Step {
    pub name: &'static str,
    pub prompt: &'static str,
    pub action: StepAction,
}

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    Skipped,
    Failed,
}

/// The provisioning flow's step list, in execution order
pub fn provision_steps() -> Vec<Step> {
    vec![
        Step {
            name: "certificates",
            prompt: "Generate TLS certificates?",
            action: StepAction::ProvisionCerts,
        },
        Step {
            name: "proxy config",
            prompt: "Write the reverse-proxy configuration?",
            action: StepAction::WriteProxyConfig,
        },
        Step {
            name: "hosts entries",
            prompt: "Update hosts file automatically? (requires admin/sudo)",
            action: StepAction::ReconcileHosts(HostsAction::Add),
        },
        Step {
            name: "compose up",
            prompt: "Start Docker Compose now?",
            action: StepAction::ComposeUp,
        },
    ]
}

/// The tear-down flow's step list, in execution order
pub fn teardown_steps() -> Vec<Step> {
    vec![
        Step {
            name: "hosts entries",
            prompt: "Remove hosts file entries? (requires admin/sudo)",
            action: StepAction::ReconcileHosts(HostsAction::Remove),
        },
        Step {
            name: "compose down",
            prompt: "Stop Docker Compose?",
            action: StepAction::ComposeDown,
        },
        Step {
            name: "certificates",
            prompt: "Remove TLS certificates?",
            action: StepAction::RemoveCerts,
        },
    ]
}

/// Everything a step needs: configuration, the domain pair, and the
/// external tool invokers.
pub struct Toolkit {
    config: Config,
    pair: DomainPair,
    backend_port: Option<String>,
    certs: CertProvisioner,
    compose: ComposeInvoker,
}

impl Toolkit {
    /// The backend port is only needed by the provisioning flow.
    pub fn new(config: Config, pair: DomainPair, backend_port: Option<String>) -> Result<Self> {
        let certs = CertProvisioner::new(&config.cert_command, config.ssl_dir.clone())?;
        let compose = ComposeInvoker::new(&config.compose_command)?;
        Ok(Self {
            config,
            pair,
            backend_port,
            certs,
            compose,
        })
    }

    pub fn pair(&self) -> &DomainPair {
        &self.pair
    }

    async fn run_action(&self, action: &StepAction) -> Result<()> {
        match action {
            StepAction::ProvisionCerts => self.certs.provision(&self.pair).await,
            StepAction::WriteProxyConfig => {
                let port = self
                    .backend_port
                    .as_deref()
                    .context("Backend port is required to write the proxy config")?;
                nginx::write_config(&self.config.nginx_conf, &self.pair, port).await?;
                println!(
                    "   Proxy configuration written to {}",
                    self.config.nginx_conf.display()
                );
                Ok(())
            }
            StepAction::ReconcileHosts(hosts_action) => self.reconcile_hosts(*hosts_action).await,
            StepAction::ComposeUp => self.compose.up().await,
            StepAction::ComposeDown => self.compose.down().await,
            StepAction::RemoveCerts => {
                let removed = self.certs.remove(&self.pair).await?;
                if removed.is_empty() {
                    println!(
                        "   No certificates found in {}",
                        self.config.ssl_dir.display()
                    );
                } else {
                    for name in removed {
                        println!("   Removed {}", name);
                    }
                }
                Ok(())
            }
        }
    }

    async fn reconcile_hosts(&self, action: HostsAction) -> Result<()> {
        let path = &self.config.hosts_path;
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read hosts file '{}'", path.display()))?;

        match hosts::reconcile(&content, &self.pair, action) {
            None => {
                match action {
                    HostsAction::Add => println!("   Hosts entries already exist"),
                    HostsAction::Remove => println!("   No matching entries found in hosts file"),
                }
                Ok(())
            }
            Some(updated) => {
                // The reconciled content is staged and copied over in one
                // step; the hosts file is never written in place.
                if self.config.elevate {
                    elevate::write_protected(path, &updated).await?;
                } else {
                    elevate::write_direct(path, &updated).await?;
                }
                match action {
                    HostsAction::Add => println!("   Hosts file updated"),
                    HostsAction::Remove => println!("   Hosts file entries removed"),
                }
                Ok(())
            }
        }
    }

    /// Manual instructions shown when a step is skipped or fails.
    fn remediation(&self, action: &StepAction) -> Option<String> {
        match action {
            StepAction::ReconcileHosts(HostsAction::Add) => {
                let [www_line, bare_line] = hosts::manual_add_lines(&self.pair);
                Some(format!(
                    "   Add these lines to {} yourself:\n   {}\n   {}",
                    self.config.hosts_path.display(),
                    www_line,
                    bare_line
                ))
            }
            StepAction::ReconcileHosts(HostsAction::Remove) => Some(format!(
                "   Remove lines containing {} or {} from {} yourself.",
                self.pair.with_www,
                self.pair.without_www,
                self.config.hosts_path.display()
            )),
            StepAction::ComposeUp => Some(format!(
                "   Run \"{} up\" when ready to start the proxy.",
                self.config.compose_command
            )),
            StepAction::ComposeDown => Some(format!(
                "   Run \"{} down\" to stop the proxy.",
                self.config.compose_command
            )),
            _ => None,
        }
    }
}

/// Execute a step list against a toolkit, confirming each step.
///
/// Returns the per-step outcomes. Step failures never abort the flow; an
/// `Err` here means the prompt channel itself broke.
pub async fn run_flow<I: Input>(
    session: &mut Session<I>,
    toolkit: &Toolkit,
    steps: &[Step],
) -> Result<Vec<(&'static str, StepOutcome)>> {
    let mut outcomes = Vec::with_capacity(steps.len());

    for step in steps {
        println!();
        if !session.confirm(step.prompt)? {
            println!("   Skipped.");
            if let Some(instructions) = toolkit.remediation(&step.action) {
                println!("{}", instructions);
            }
            outcomes.push((step.name, StepOutcome::Skipped));
            continue;
        }

        match toolkit.run_action(&step.action).await {
            Ok(()) => outcomes.push((step.name, StepOutcome::Completed)),
            Err(e) => {
                error!(step = step.name, error = %e, "Step failed");
                println!("   Error: {:#}", e);
                if let Some(instructions) = toolkit.remediation(&step.action) {
                    println!("{}", instructions);
                }
                outcomes.push((step.name, StepOutcome::Failed));
            }
        }
    }

    Ok(outcomes)
}

/// Print a one-line closing summary for a finished flow.
pub fn print_summary(flow_name: &str, outcomes: &[(&'static str, StepOutcome)]) {
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|(_, outcome)| *outcome == StepOutcome::Failed)
        .map(|(name, _)| *name)
        .collect();

    println!();
    if failed.is_empty() {
        println!("{} complete!", flow_name);
    } else {
        println!(
            "{} finished with failed steps: {}. See the messages above.",
            flow_name,
            failed.join(", ")
        );
    }
}
