//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `TEEZY_API_BASE` - Backend API base URL (default: `http://127.0.0.1:8000/api`)
//! - `TEEZY_STORE_ID` - Store that receives orders (default: 1)
//! - `TEEZY_DATA_DIR` - Directory holding the persisted cart (default: `.teezy`)
//! - `TEEZY_INIT_DATA` - Host session token sent as `X-Telegram-Init-Data`
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;

use secrecy::SecretString;
use teezy_core::StoreId;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
const DEFAULT_STORE_ID: &str = "1";
const DEFAULT_DATA_DIR: &str = ".teezy";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
///
/// Implements `Debug` manually to redact the session token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Backend API base URL, without a trailing slash
    pub api_base: Url,
    /// Store identifier sent with every order
    pub store_id: StoreId,
    /// Directory for the persisted cart slot
    pub data_dir: PathBuf,
    /// Host session token, if the host platform supplied one
    pub init_data: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base.as_str())
            .field("store_id", &self.store_id)
            .field("data_dir", &self.data_dir)
            .field(
                "init_data",
                &self.init_data.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_base = parse_api_base(&get_or_default("TEEZY_API_BASE", DEFAULT_API_BASE))?;
        let store_id = get_or_default("TEEZY_STORE_ID", DEFAULT_STORE_ID)
            .parse::<StoreId>()
            .map_err(|e| ConfigError::InvalidEnvVar("TEEZY_STORE_ID".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_or_default("TEEZY_DATA_DIR", DEFAULT_DATA_DIR));
        let init_data = lookup("TEEZY_INIT_DATA")
            .filter(|value| !value.trim().is_empty())
            .map(SecretString::from);
        let sentry_dsn = lookup("SENTRY_DSN").filter(|value| !value.is_empty());

        Ok(Self {
            api_base,
            store_id,
            data_dir,
            init_data,
            sentry_dsn,
        })
    }

    /// Configuration pointing at `api_base` with every other value defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base` is not a valid http(s) URL.
    pub fn for_api_base(api_base: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| (key == "TEEZY_API_BASE").then(|| api_base.to_string()))
    }
}

/// Parse and validate the API base URL, dropping any trailing slash.
fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |msg: String| ConfigError::InvalidEnvVar("TEEZY_API_BASE".to_string(), msg);

    let url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:8000/api");
        assert_eq!(config.store_id, StoreId::new(1));
        assert_eq!(config.data_dir, PathBuf::from(".teezy"));
        assert!(config.init_data.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = load(&[("TEEZY_API_BASE", "https://shop.example.com/api/")]).unwrap();
        assert_eq!(config.api_base.as_str(), "https://shop.example.com/api");
    }

    #[test]
    fn test_invalid_store_id() {
        let err = load(&[("TEEZY_STORE_ID", "main")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TEEZY_STORE_ID"));
    }

    #[test]
    fn test_invalid_scheme() {
        let err = load(&[("TEEZY_API_BASE", "ftp://shop.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }

    #[test]
    fn test_init_data_is_secret() {
        let config = load(&[("TEEZY_INIT_DATA", "query_id=AAE&hash=abc")]).unwrap();
        assert_eq!(
            config.init_data.as_ref().unwrap().expose_secret(),
            "query_id=AAE&hash=abc"
        );

        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hash=abc"));
    }

    #[test]
    fn test_blank_init_data_ignored() {
        let config = load(&[("TEEZY_INIT_DATA", "  ")]).unwrap();
        assert!(config.init_data.is_none());
    }
}
