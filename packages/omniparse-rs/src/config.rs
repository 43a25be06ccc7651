//! Resolved runtime configuration for the HTTP service.
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use omniparse_detect::BackendKind;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub backend: BackendKind,
    /// Base URL of the OmniParser model server, if one is deployed.
    pub omniparser_url: Option<String>,
    pub request_timeout: Duration,
    /// Request body limit, applied to JSON and multipart uploads alike.
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            backend: BackendKind::Auto,
            omniparser_url: None,
            request_timeout: Duration::from_secs(30),
            max_body_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServiceConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
