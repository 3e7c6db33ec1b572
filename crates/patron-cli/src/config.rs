//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig    # Host, port, timeouts
//! └── service: ServiceConfig  # Credential store, auth keys, image hosting
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure database and server
//! patron --postgres-url "postgresql://..." --port 8080
//!
//! # Or via environment variables
//! POSTGRES_URL="postgresql://..." PORT=8080 patron
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::anyhow;
use clap::{Args, Parser};
use patron_server::service::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the patron server:
/// - [`ServerConfig`]: Network binding and lifecycle timeouts
/// - [`ServiceConfig`]: External collaborators (credential store, image
///   hosting) and token signing
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "patron")]
#[command(about = "Patron customer-account API server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// External service configuration (credential store, image hosting).
    #[clap(flatten)]
    pub service: ServiceConfig,
}

/// Network binding and lifecycle timeouts.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Address to bind: "127.0.0.1" for localhost only, "0.0.0.0" for all
    /// interfaces.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on (1024-65535).
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// End-to-end bound, in seconds, on handling a single request,
    /// store calls and the image upload included.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// How long, in seconds, to let in-flight requests finish after a
    /// shutdown signal.
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 30)]
    pub shutdown_timeout_secs: u64,
}

/// Default host address for development.
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

/// Accepted timeout values, in seconds.
const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

impl ServerConfig {
    /// Checks every setting against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns an error when the port is privileged (< 1024) or either
    /// timeout falls outside 1-300 seconds.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port < 1024 {
            return Err(anyhow!(
                "port {} requires root privileges; pick one in 1024-65535",
                self.port
            ));
        }

        if !TIMEOUT_RANGE.contains(&self.request_timeout_secs) {
            return Err(anyhow!(
                "request timeout must be 1-300 seconds, got {}",
                self.request_timeout_secs
            ));
        }

        if !TIMEOUT_RANGE.contains(&self.shutdown_timeout_secs) {
            return Err(anyhow!(
                "shutdown timeout must be 1-300 seconds, got {}",
                self.shutdown_timeout_secs
            ));
        }

        Ok(())
    }

    /// Returns the complete socket address for server binding.
    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the graceful shutdown timeout as a `Duration`.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Returns whether the server is configured to bind to all interfaces.
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        match self.host {
            IpAddr::V4(addr) => addr.is_unspecified(),
            IpAddr::V6(addr) => addr.is_unspecified(),
        }
    }
}

impl Default for ServerConfig {
    /// Creates a development-friendly configuration with safe defaults.
    fn default() -> Self {
        Self {
            host: default_host(),
            port: 3000,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.binds_to_all_interfaces());
    }

    #[test]
    fn reject_privileged_ports() {
        let mut config = ServerConfig::default();
        config.port = 80;
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_invalid_timeouts() {
        let mut config = ServerConfig::default();

        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 60;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_addr_returns_correct_socket() {
        let config = ServerConfig::default();
        let addr = config.server_addr();
        assert_eq!(addr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(addr.port(), 3000);
    }
}
