//! Interactive provisioning flow: certificates, proxy config, hosts
//! entries, container start.

use devgate::config::Config;
use devgate::domain::DomainPair;
use devgate::flow::{self, Toolkit};
use devgate::session::{Session, StdinInput};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("devgate=info".parse().expect("valid log directive")),
        )
        .init();

    let config = Config::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    let mut session = Session::new(StdinInput);

    println!("Proxy Setup");
    println!();

    let domain = session.ask("Enter your domain (e.g., www.smartseraina.ch): ")?;
    let pair = DomainPair::derive(&domain);

    let backend_port = session.ask("Enter the port to proxy to (e.g., 44314): ")?;

    println!();
    println!("Configuration:");
    println!("   Domain (with www): {}", pair.with_www);
    println!("   Domain (without www): {}", pair.without_www);
    println!("   Proxy port: {}", backend_port);
    println!();

    if !session.confirm("Proceed with setup?")? {
        println!("Setup cancelled.");
        return Ok(());
    }

    let toolkit = Toolkit::new(config, pair, Some(backend_port))?;
    let outcomes = flow::run_flow(&mut session, &toolkit, &flow::provision_steps()).await?;

    flow::print_summary("Setup", &outcomes);
    Ok(())
}
