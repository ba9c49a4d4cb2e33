//! Process configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use ide_boot::DEFAULT_AUTH_TIMEOUT;
use ide_core::{BaseConfig, CoreError};

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8181";
const DEFAULT_PROFILE_DIR: &str = "configs";

/// Errors raised while loading startup configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },

    #[error("failed to read base configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Base(#[from] CoreError),
}

/// Startup settings for the gateway process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// `IDE_LISTEN_ADDR`
    pub listen_addr: String,
    /// `IDE_BASE_CONFIG`
    pub base_config_path: PathBuf,
    /// `IDE_PROFILE_DIR`
    pub profile_dir: PathBuf,
    /// `IDE_AUTH_TIMEOUT_MS`; `0` disables the limit.
    pub auth_timeout: Option<Duration>,
}

impl GatewayConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// See [`GatewayConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_config_path = lookup("IDE_BASE_CONFIG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingVar("IDE_BASE_CONFIG"))?;

        let auth_timeout = match lookup("IDE_AUTH_TIMEOUT_MS") {
            None => Some(DEFAULT_AUTH_TIMEOUT),
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidVar {
                    name: "IDE_AUTH_TIMEOUT_MS",
                    reason: format!("{raw:?}: {e}"),
                })?;
                (millis > 0).then(|| Duration::from_millis(millis))
            }
        };

        Ok(Self {
            listen_addr: lookup("IDE_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned()),
            base_config_path,
            profile_dir: lookup("IDE_PROFILE_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_PROFILE_DIR), PathBuf::from),
            auth_timeout,
        })
    }

    /// Load and validate the base configuration document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Base`] if it is not a valid base configuration.
    pub fn load_base(&self) -> Result<BaseConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.base_config_path).map_err(|source| ConfigError::Read {
            path: self.base_config_path.clone(),
            source,
        })?;
        Ok(BaseConfig::from_json(&text)?)
    }
}
