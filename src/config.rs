// Server configuration - command line flags with environment fallbacks

use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_LOG_FILTER: &str = "card_registry=info,tower_http=info";

#[derive(Parser, Debug, Clone)]
#[command(name = "card-server", about = "Card registry HTTP server", version)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CARD_REGISTRY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "CARD_REGISTRY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Tracing filter directives (same syntax as RUST_LOG)
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address: {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
