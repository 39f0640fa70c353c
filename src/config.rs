//! Configuration management for codec-init
//!
//! Configuration is read once from environment variables at process entry and
//! handed to the components that need it.
//!
//! # Environment Variables
//!
//! ## Modules
//! - `CODEC_MODULE_DIR`: Directory holding one subdirectory per module - **required**
//! - `CODEC_SYSTEMD_PATH`: Directory systemd loads unit files from - **required**
//!
//! ## Health reporting
//! All three must be set, otherwise health reporting is disabled (standalone mode):
//! - `CODEC_USER_ID`: Instance identity
//! - `CODEC_API_TOKEN`: Instance credential
//! - `CODEC_API_URL`: Base URL of the control API
//!
//! ## Logging
//! - `CODEC_LOG_LEVEL`: trace|debug|info|warn|error - default: "info"
//! - `CODEC_LOG_JSON`: Emit JSON log lines (true|false) - default: "false"

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const MODULE_DIR_VAR: &str = "CODEC_MODULE_DIR";
pub const SYSTEMD_PATH_VAR: &str = "CODEC_SYSTEMD_PATH";
pub const USER_ID_VAR: &str = "CODEC_USER_ID";
pub const API_TOKEN_VAR: &str = "CODEC_API_TOKEN";
pub const API_URL_VAR: &str = "CODEC_API_URL";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is not set")]
    MissingVar(&'static str),
}

/// Credentials and endpoint for the health reporter
#[derive(Clone, PartialEq, Eq)]
pub struct HealthConfig {
    pub user_id: String,
    pub api_token: String,
    pub api_url: String,
}

impl fmt::Debug for HealthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthConfig")
            .field("user_id", &self.user_id)
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Directory scanned for modules
    pub module_dir: PathBuf,

    /// Directory unit files are written to
    pub systemd_path: PathBuf,

    /// `None` runs in standalone mode
    pub health: Option<HealthConfig>,
}

impl CodecConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`; empty values count as unset
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let module_dir = get(MODULE_DIR_VAR).ok_or(ConfigError::MissingVar(MODULE_DIR_VAR))?;
        let systemd_path =
            get(SYSTEMD_PATH_VAR).ok_or(ConfigError::MissingVar(SYSTEMD_PATH_VAR))?;

        Ok(Self {
            module_dir: PathBuf::from(module_dir),
            systemd_path: PathBuf::from(systemd_path),
            health: HealthConfig::from_lookup(&get),
        })
    }

    pub fn is_standalone(&self) -> bool {
        self.health.is_none()
    }
}

impl HealthConfig {
    /// Returns `None` unless identity, credential, and endpoint are all present
    pub fn from_lookup<L>(lookup: L) -> Option<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        Some(Self {
            user_id: lookup(USER_ID_VAR)?,
            api_token: lookup(API_TOKEN_VAR)?,
            api_url: lookup(API_URL_VAR)?,
        })
    }
}
