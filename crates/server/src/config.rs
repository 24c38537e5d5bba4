//! Server configuration
//!
//! Read from `SHOWCASE_*` environment variables (after `.env` is loaded in
//! `main`), with defaults for anything unset.

use metadata_client::MetadataClientConfig;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Host is not an IP address
    #[error("Invalid SHOWCASE_HOST: {0}")]
    InvalidHost(String),

    /// Port is not a number in range
    #[error("Invalid SHOWCASE_PORT: {0}")]
    InvalidPort(String),

    /// Timeout is not a whole number of seconds
    #[error("Invalid SHOWCASE_METADATA_TIMEOUT_SECS: {0}")]
    InvalidTimeout(String),
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
    /// Metadata lookup settings
    pub metadata: MetadataClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3001,
            metadata: MetadataClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup("SHOWCASE_HOST") {
            config.host = host.parse().map_err(|_| ConfigError::InvalidHost(host))?;
        }
        if let Some(port) = lookup("SHOWCASE_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }
        if let Some(secs) = lookup("SHOWCASE_METADATA_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidTimeout(secs))?;
            config.metadata = config.metadata.with_timeout(Duration::from_secs(secs));
        }
        if let Some(url) = lookup("SHOWCASE_YOUTUBE_OEMBED_URL") {
            config.metadata = config.metadata.with_youtube_oembed_url(url);
        }
        if let Some(url) = lookup("SHOWCASE_VIMEO_API_URL") {
            config.metadata = config.metadata.with_vimeo_api_url(url);
        }

        Ok(config)
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
