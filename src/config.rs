//! Configuration management for PCForge
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file with CLI and environment overrides.

use crate::cli::Cli;
use crate::error::{PcforgeError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure for PCForge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Session credential storage settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the recommendation backend
    ///
    /// Tests point this at a mock server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Credential storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keyring service the credential is stored under
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Keyring account the credential is stored under
    #[serde(default = "default_keyring_account")]
    pub keyring_account: String,
}

fn default_keyring_service() -> String {
    "pcforge".to_string()
}

fn default_keyring_account() -> String {
    "session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            keyring_account: default_keyring_account(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, applying CLI overrides
    ///
    /// When the given path does not exist, the per-user configuration
    /// directory is consulted before falling back to defaults, so the
    /// client works out of the box against a local backend.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = match Self::resolve_path(path) {
            Some(found) => {
                let contents = std::fs::read_to_string(&found)?;
                serde_yaml::from_str(&contents).map_err(PcforgeError::Yaml)?
            }
            None => {
                tracing::debug!("No configuration file at {}; using defaults", path);
                Self::default()
            }
        };

        if let Some(base) = &cli.api_base {
            tracing::debug!("Using API base override from CLI: {}", base);
            config.api.base_url = base.clone();
        }

        Ok(config)
    }

    /// Locate the configuration file to read, if any
    ///
    /// The explicit path wins; otherwise `config.yaml` in the user's
    /// configuration directory is used when present.
    fn resolve_path(path: &str) -> Option<PathBuf> {
        if Path::new(path).exists() {
            return Some(PathBuf::from(path));
        }
        let proj_dirs = ProjectDirs::from("com", "pcforge", "pcforge")?;
        let fallback = proj_dirs.config_dir().join("config.yaml");
        fallback.exists().then_some(fallback)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`PcforgeError::Config`] when the base URL does not parse or
    /// the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url)
            .map_err(|e| PcforgeError::Config(format!("invalid api.base_url: {}", e)))?;

        if self.api.timeout_seconds == 0 {
            return Err(
                PcforgeError::Config("api.timeout_seconds must be nonzero".to_string()).into(),
            );
        }
        if self.session.keyring_service.is_empty() || self.session.keyring_account.is_empty() {
            return Err(PcforgeError::Config(
                "session keyring service and account must be set".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
