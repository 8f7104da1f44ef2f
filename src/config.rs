use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "FLATSERVE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Connections served at once; extra connections are closed on accept.
    pub max_connections: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub root_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_request_line: usize,
    pub request_timeout_ms: u64,
    pub body_idle_timeout_ms: u64,
    pub max_body_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_connections: 256,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./www"),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_line: 1024,
            request_timeout_ms: 10_000,
            body_idle_timeout_ms: 5_000,
            max_body_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Per-connection limits, resolved from [`LimitsConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_request_line: usize,
    pub request_timeout: Duration,
    pub body_idle_timeout: Duration,
    pub max_body_bytes: u64,
}

impl From<&LimitsConfig> for Limits {
    fn from(cfg: &LimitsConfig) -> Self {
        Self {
            max_request_line: cfg.max_request_line,
            request_timeout: Duration::from_millis(cfg.request_timeout_ms),
            body_idle_timeout: Duration::from_millis(cfg.body_idle_timeout_ms),
            max_body_bytes: cfg.max_body_bytes,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits::from(&LimitsConfig::default())
    }
}

impl Config {
    /// Loads the config file named by `FLATSERVE_CONFIG` (defaults if unset),
    /// then applies the `LISTEN` and `ROOT_DIR` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("ROOT_DIR") {
            cfg.storage.root_dir = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;

        if cfg.server.max_connections == 0 {
            anyhow::bail!("server.max_connections must be at least 1");
        }
        if cfg.limits.max_request_line == 0 {
            anyhow::bail!("limits.max_request_line must be at least 1");
        }
        if cfg.limits.request_timeout_ms == 0 {
            anyhow::bail!("limits.request_timeout_ms must be at least 1");
        }
        if cfg.limits.body_idle_timeout_ms == 0 {
            anyhow::bail!("limits.body_idle_timeout_ms must be at least 1");
        }

        Ok(cfg)
    }

    pub fn limits(&self) -> Limits {
        Limits::from(&self.limits)
    }
}
