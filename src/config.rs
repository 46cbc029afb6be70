//! Top-level application configuration.
//!
//! Configuration is stored in `.helpdesk/config.yaml` and includes:
//! - Base URL of the ticket API
//! - Request timeout and retry budget for the HTTP client
//!
//! `HELPDESK_ROOT` relocates the config directory and `HELPDESK_API_BASE`
//! overrides the base URL without touching the file.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DeskError, Result};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";

/// Hard ceiling on retries per request
pub const MAX_RETRIES_LIMIT: u32 = 1;

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &["api_base", "request_timeout_secs", "max_retries"];

/// Returns the directory holding helpdesk configuration.
pub fn helpdesk_root() -> PathBuf {
    if let Ok(root) = env::var("HELPDESK_ROOT") {
        PathBuf::from(root)
    } else {
        PathBuf::from(".helpdesk")
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ticket API, without the `/tickets/` suffix
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Retries for transient failures (default: 1, at most 1)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        helpdesk_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that `set` would have refused, e.g. after a hand edit
    pub fn validate(&self) -> Result<()> {
        validate_api_base(&self.api_base)?;
        if self.request_timeout_secs == 0 {
            return Err(timeout_too_small());
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DeskError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        Ok(())
    }

    /// Effective base URL: environment override first, then the file value.
    ///
    /// Always returned without a trailing slash.
    pub fn api_base(&self) -> String {
        if let Ok(base) = env::var("HELPDESK_API_BASE")
            && !base.is_empty()
        {
            return base.trim_end_matches('/').to_string();
        }

        self.api_base.trim_end_matches('/').to_string()
    }

    /// Get the per-request timeout duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Retry budget clamped to the supported maximum
    pub fn max_retries(&self) -> u32 {
        self.max_retries.min(MAX_RETRIES_LIMIT)
    }

    /// Read a single key as display text
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api_base" => Ok(self.api_base.clone()),
            "request_timeout_secs" => Ok(self.request_timeout_secs.to_string()),
            "max_retries" => Ok(self.max_retries.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a single key from text, validating the value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_base" => {
                validate_api_base(value)?;
                self.api_base = value.trim_end_matches('/').to_string();
            }
            "request_timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| {
                    DeskError::Config(format!("request_timeout_secs must be a number, got '{value}'"))
                })?;
                if secs == 0 {
                    return Err(timeout_too_small());
                }
                self.request_timeout_secs = secs;
            }
            "max_retries" => {
                let retries: u32 = value.parse().map_err(|_| {
                    DeskError::Config(format!("max_retries must be a number, got '{value}'"))
                })?;
                if retries > MAX_RETRIES_LIMIT {
                    return Err(DeskError::Config(format!(
                        "max_retries must be at most {MAX_RETRIES_LIMIT}"
                    )));
                }
                self.max_retries = retries;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn timeout_too_small() -> DeskError {
    DeskError::Config("request_timeout_secs must be at least 1".to_string())
}

fn unknown_key(key: &str) -> DeskError {
    DeskError::Config(format!(
        "unknown config key '{}', expected one of: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

/// Reject anything that is not an absolute http(s) URL
pub fn validate_api_base(value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| DeskError::Config(format!("invalid api_base '{value}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DeskError::Config(format!(
            "api_base must use http or https, got '{other}'"
        ))),
    }
}
