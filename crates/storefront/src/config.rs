//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `GAMEHUB_API_BASE_URL` - Catalog API base URL (default: `https://v2.api.noroff.dev`)
//! - `GAMEHUB_DATA_DIR` - Directory holding the cart and last order (default: `.gamehub`)
//! - `GAMEHUB_CACHE_TTL_SECS` - How long catalog responses are cached (default: 300)
//! - `GAMEHUB_HTTP_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `GAMEHUB_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `RUST_LOG` - Log filter (default: `gamehub_storefront=warn,gamehub_core=warn`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "https://v2.api.noroff.dev";
const DEFAULT_DATA_DIR: &str = ".gamehub";
const DEFAULT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory backing local persistent storage
    pub data_dir: PathBuf,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Log output format
    pub log_format: LogFormat,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL; the `gamehub` collection lives under it
    pub base_url: Url,
    /// Time-to-live for cached catalog responses
    pub cache_ttl: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get("GAMEHUB_DATA_DIR", DEFAULT_DATA_DIR));
        let catalog = CatalogConfig {
            base_url: parse_base_url(
                "GAMEHUB_API_BASE_URL",
                &get("GAMEHUB_API_BASE_URL", DEFAULT_API_BASE_URL),
            )?,
            cache_ttl: Duration::from_secs(parse_secs(
                "GAMEHUB_CACHE_TTL_SECS",
                &get("GAMEHUB_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS),
            )?),
            request_timeout: Duration::from_secs(parse_positive_secs(
                "GAMEHUB_HTTP_TIMEOUT_SECS",
                &get("GAMEHUB_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS),
            )?),
        };
        let log_format = parse_log_format(&get("GAMEHUB_LOG_FORMAT", "pretty"))?;

        Ok(Self {
            data_dir,
            catalog,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an http(s) base URL.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}', expected http or https", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a whole number of seconds.
fn parse_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a whole number of seconds greater than zero.
fn parse_positive_secs(key: &str, value: &str) -> Result<u64, ConfigError> {
    match parse_secs(key, value)? {
        0 => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than 0".to_string(),
        )),
        secs => Ok(secs),
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidEnvVar(
            "GAMEHUB_LOG_FORMAT".to_string(),
            format!("expected 'pretty' or 'json', got '{other}'"),
        )),
    }
}
