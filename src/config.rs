//! Server configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! YAML file, the `LISTEN` environment variable, and command-line flags
//! (applied by the binary).
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:8080"
//!   read_buffer_size: 1024
//!   max_connections: 256
//! static_files:
//!   root: "/srv/public"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds to.
    pub listen_addr: String,
    /// Size of the single read used to receive a request.
    pub read_buffer_size: usize,
    /// Maximum number of connections handled at once. `None` is unbounded.
    pub max_connections: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory that request paths are resolved against.
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: format!("0.0.0.0:{}", DEFAULT_PORT),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            max_connections: None,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads the configuration from `path` if given, then applies the
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replaces the listen address with one bound to all interfaces on `port`.
    pub fn set_port(&mut self, port: u16) {
        self.server.listen_addr = format!("0.0.0.0:{}", port);
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.read_buffer_size == 0 {
            return Err(Error::Config("read_buffer_size must be positive".into()));
        }
        match self.server.max_connections {
            Some(0) => {
                return Err(Error::Config("max_connections must be positive".into()));
            }
            Some(max) if max > Semaphore::MAX_PERMITS => {
                return Err(Error::Config(format!(
                    "max_connections must be at most {}",
                    Semaphore::MAX_PERMITS
                )));
            }
            _ => {}
        }
        Ok(())
    }
}
