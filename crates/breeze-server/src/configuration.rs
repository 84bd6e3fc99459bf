use std::net::SocketAddr;

use anyhow::{Context, Result};
use breeze::configuration::{load, AgentSettings, ConfigError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    #[serde(default)]
    server: ServerSettings,
}

#[derive(Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub agent: AgentSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let ServerSection { server } = load()?;
        let agent = AgentSettings::new()?;
        Ok(Self { server, agent })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}
