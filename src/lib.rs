//! Devgate - interactive provisioning for a local HTTPS reverse-proxy
//! development environment
//!
//! This library backs two interactive flows that:
//! - Derive the `www.` and bare forms of an input domain
//! - Obtain TLS certificates for both forms via an external issuance tool
//! - Render an nginx reverse-proxy configuration for a backend port
//! - Idempotently add or remove the domain entries in the system hosts file
//! - Start or stop the containerized proxy through the compose CLI

pub mod certs;
pub mod compose;
pub mod config;
pub mod domain;
pub mod elevate;
pub mod error;
pub mod flow;
pub mod hosts;
pub mod nginx;
pub mod session;
