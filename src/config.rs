//! Configuration for the server, the HTTP client and the board controller.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables. CLI flags are applied on top by the caller.
//!
//! - `STICKYBOARD_BIND`: server bind address (default: "127.0.0.1:5001")
//! - `STICKYBOARD_URL`: base URL used by the client (default: "http://127.0.0.1:5001")
//! - `STICKYBOARD_DEBOUNCE_MS`: quiet period before a note edit is persisted (default: 250)

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "stickyboard.yaml";

pub const ENV_BIND: &str = "STICKYBOARD_BIND";
pub const ENV_URL: &str = "STICKYBOARD_URL";
pub const ENV_DEBOUNCE_MS: &str = "STICKYBOARD_DEBOUNCE_MS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub board: BoardSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5001".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server root; the notes collection lives at `{base_url}/notes`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5001".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Quiet period before a pending note edit is sent
    pub debounce_ms: u64,
    /// Initial canvas size; hosts update it through `Board::set_layout`
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            canvas_width: 1200.0,
            canvas_height: 800.0,
        }
    }
}

impl BoardSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl BoardConfig {
    /// Load the layered configuration.
    ///
    /// An explicit `path` must exist. Without one, `stickyboard.yaml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: BoardConfig = serde_yaml::from_str(&raw)?;
        Ok(config)
    }

    /// Override fields from environment variables, looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(url) = lookup(ENV_URL) {
            self.client.base_url = url;
        }
        if let Some(ms) = lookup(ENV_DEBOUNCE_MS) {
            self.board.debounce_ms = ms.trim().parse().map_err(|_| {
                BoardError::Config(format!("{} must be an integer, got '{}'", ENV_DEBOUNCE_MS, ms))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        if self.client.base_url.is_empty() {
            return Err(BoardError::Config("client.base_url cannot be empty".to_string()));
        }
        if self.client.timeout_secs == 0 {
            return Err(BoardError::Config("client.timeout_secs must be > 0".to_string()));
        }
        if !(self.board.canvas_width > 0.0 && self.board.canvas_height > 0.0) {
            return Err(BoardError::Config("canvas size must be positive".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| {
            BoardError::Config(format!("invalid bind address '{}'", self.server.bind))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = BoardConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1:5001");
        assert_eq!(config.client.base_url, "http://127.0.0.1:5001");
        assert_eq!(config.board.debounce(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "board:\n  debounce_ms: 100\nserver:\n  bind: 0.0.0.0:8080").unwrap();

        let config = BoardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.board.debounce_ms, 100);
        assert_eq!(config.board.canvas_width, 1200.0);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  bind: 0.0.0.0:8080").unwrap();
        let mut config = BoardConfig::from_file(file.path()).unwrap();

        let env: HashMap<&str, &str> = [(ENV_BIND, "127.0.0.1:9000"), (ENV_DEBOUNCE_MS, "50")]
            .into_iter()
            .collect();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.bind, "127.0.0.1:9000");
        assert_eq!(config.board.debounce_ms, 50);
    }

    #[test]
    fn test_bad_env_debounce_is_config_error() {
        let mut config = BoardConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_DEBOUNCE_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, BoardError::Config(_)));
    }

    #[test]
    fn test_invalid_bind_fails_validation() {
        let mut config = BoardConfig::default();
        config.server.bind = "not an address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = BoardConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }
}
