//! Interactive tear-down flow: hosts entries, container stop, certificate
//! removal.

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

    println!("Proxy Cleanup");
    println!();

    let domain = session.ask("Enter the domain to remove (e.g., www.smartseraina.ch): ")?;
    let pair = DomainPair::derive(&domain);

    println!();
    println!("Will remove:");
    println!("   - {}", pair.with_www);
    println!("   - {}", pair.without_www);
    println!();

    if !session.confirm("Proceed with cleanup?")? {
        println!("Cleanup cancelled.");
        return Ok(());
    }

    let toolkit = Toolkit::new(config, pair, None)?;
    let outcomes = flow::run_flow(&mut session, &toolkit, &flow::teardown_steps()).await?;

    flow::print_summary("Cleanup", &outcomes);
    Ok(())
}
