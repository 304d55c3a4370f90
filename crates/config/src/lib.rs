//! vr-config - settings and source configuration loading

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use vr_errors::AppError;

/// Environment variable carrying the user identifier credential.
pub const USER_ID_ENV: &str = "VAULT_USER_ID";

/// Prefix for every settings variable, e.g. `VAULT_LOG_LEVEL`.
pub const ENV_PREFIX: &str = "VAULT_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),

    #[error("Invalid vault_uri `{uri}`: {reason}")]
    InvalidUri { uri: String, reason: String },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process-level settings, read from `VAULT_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Mount of the app-id auth backend
    #[serde(default = "default_auth_mount")]
    pub auth_mount: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// File name written inside the destination directory
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_auth_mount() -> String {
    "app-id".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_output_file() -> String {
    "secrets.yaml".to_string()
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            auth_mount: default_auth_mount(),
            connect_timeout_secs: default_connect_timeout(),
            output_file: default_output_file(),
        }
    }
}

impl ResourceSettings {
    /// Load defaults overlaid with `VAULT_*` environment variables.
    ///
    /// `VAULT_USER_ID` is skipped; see [`user_id_from_env`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Env::prefixed(ENV_PREFIX).ignore(&["user_id"])),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }
}

/// Read the user identifier from the process environment.
///
/// Called once at process start; an unset variable yields an empty secret,
/// which authentication later reports as a missing credential.
pub fn user_id_from_env() -> Secret<String> {
    Secret::new(std::env::var(USER_ID_ENV).unwrap_or_default())
}

/// Connection source for the secret store.
///
/// `user_id` only ever comes from the process environment, never from the
/// request body.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub vault_uri: Url,
    pub app_id: String,
    pub user_id: Secret<String>,
}

impl SourceConfig {
    pub fn new(
        vault_uri: &str,
        app_id: impl Into<String>,
        user_id: Secret<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            vault_uri: parse_vault_uri(vault_uri)?,
            app_id: app_id.into(),
            user_id,
        })
    }
}

fn parse_vault_uri(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUri {
        uri: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{}`", other))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
