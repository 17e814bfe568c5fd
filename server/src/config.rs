//! Server configuration from environment variables.

use std::path::PathBuf;

use thiserror::Error;

/// Listen address, data location and optional static directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `TODO_BIND_ADDR`
    pub bind_addr: String,
    /// `PORT`
    pub port: u16,
    /// `TODO_DATA_FILE`
    pub data_file: PathBuf,
    /// `TODO_STATIC_DIR`; when set, replaces the embedded page.
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: 3000,
            data_file: PathBuf::from(todo_core::DEFAULT_DATA_FILE),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = var("TODO_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(port) = var("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(file) = var("TODO_DATA_FILE") {
            config.data_file = PathBuf::from(file);
        }
        config.static_dir = var("TODO_STATIC_DIR").map(PathBuf::from);

        Ok(config)
    }

    /// The `host:port` string to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
