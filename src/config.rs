//! Configuration module for Vidshelf.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, VidshelfError};

/// Environment variable that overrides `files.upload_base_path`.
pub const UPLOAD_BASE_ENV: &str = "VIDSHELF_UPLOAD_BASE";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/vidshelf.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Upload directory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory that holds every uploaded video (flat, no subdirectories).
    #[serde(default = "default_upload_base_path")]
    pub upload_base_path: String,
    /// Maximum upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_upload_base_path() -> String {
    "data/upload".to_string()
}

fn default_max_upload_size() -> u64 {
    512
}

impl FilesConfig {
    /// Maximum upload size in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_mb * 1024 * 1024
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            upload_base_path: default_upload_base_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/vidshelf.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Upload directory configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| VidshelfError::Config(format!("cannot read config: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VidshelfError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VIDSHELF_UPLOAD_BASE`: Override the upload base directory
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var(UPLOAD_BASE_ENV) {
            if !base.is_empty() {
                self.files.upload_base_path = base;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.files.upload_base_path.trim().is_empty() {
            return Err(VidshelfError::Config(format!(
                "files.upload_base_path is not set. \
                 Set it in config.toml or via {UPLOAD_BASE_ENV} environment variable."
            )));
        }
        if self.database.path.trim().is_empty() {
            return Err(VidshelfError::Config(
                "database.path is not set".to_string(),
            ));
        }
        if self.files.max_upload_size_mb == 0 {
            return Err(VidshelfError::Config(
                "files.max_upload_size_mb must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
