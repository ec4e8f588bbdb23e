//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     NEXTBUY_API_URL=http://localhost:3000                              │
//! │     NEXTBUY_FETCH_POLICY=latest_only                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.nextbuy.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://fakestoreapi.com/products, last-write-wins                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [api]
//! base_url = "https://fakestoreapi.com"
//! products_path = "/products"
//! # timeout_secs = 10      # unset = no timeout
//!
//! [catalog]
//! fetch_policy = "last_write_wins"   # or "latest_only"
//!
//! [auth]
//! admin_code = "ADMIN2024"
//! login_delay_ms = 1000
//! signup_delay_ms = 1500
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use nextbuy_core::DEFAULT_ADMIN_CODE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Fetch Policy
// =============================================================================

/// How overlapping product fetches are reconciled.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  fetch #1 ──────────────────────────────────► done (slow)               │
/// │        fetch #2 ─────────► done (fast)                                  │
/// │                                                                         │
/// │  LAST_WRITE_WINS (Default)      │  LATEST_ONLY                          │
/// │  ─────────────────────────      │  ───────────                          │
/// │  #2 applies, then #1 overwrites │  #2 applies, #1 is discarded          │
/// │  catalog shows #1's data        │  catalog shows #2's data              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPolicy {
    /// Every completion is applied in completion order.
    #[default]
    LastWriteWins,

    /// Only the most recently started fetch may write to the store.
    LatestOnly,
}

impl std::fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchPolicy::LastWriteWins => write!(f, "last_write_wins"),
            FetchPolicy::LatestOnly => write!(f, "latest_only"),
        }
    }
}

impl std::str::FromStr for FetchPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "last_write_wins" | "lww" => Ok(FetchPolicy::LastWriteWins),
            "latest_only" | "latest" => Ok(FetchPolicy::LatestOnly),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown fetch policy: '{}'. Valid options: last_write_wins, latest_only",
                other
            ))),
        }
    }
}

// =============================================================================
// API Settings
// =============================================================================

/// Where the product listing lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme and host, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the listing endpoint.
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Whole-request timeout. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://fakestoreapi.com".to_string()
}

fn default_products_path() -> String {
    "/products".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            products_path: default_products_path(),
            timeout_secs: None,
        }
    }
}

impl ApiSettings {
    /// Full URL of the listing endpoint.
    pub fn products_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.products_path
        )
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Catalog fetch settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Overlap policy for concurrent fetches.
    #[serde(default)]
    pub fetch_policy: FetchPolicy,
}

// =============================================================================
// Auth Settings
// =============================================================================

/// Simulated auth flow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Code an admin signup must present.
    #[serde(default = "default_admin_code")]
    pub admin_code: String,

    /// Simulated login latency (milliseconds).
    #[serde(default = "default_login_delay")]
    pub login_delay_ms: u64,

    /// Simulated signup latency (milliseconds).
    #[serde(default = "default_signup_delay")]
    pub signup_delay_ms: u64,
}

fn default_admin_code() -> String {
    DEFAULT_ADMIN_CODE.to_string()
}

fn default_login_delay() -> u64 {
    1000
}

fn default_signup_delay() -> u64 {
    1500
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            admin_code: default_admin_code(),
            login_delay_ms: default_login_delay(),
            signup_delay_ms: default_signup_delay(),
        }
    }
}

impl AuthSettings {
    /// Simulated login latency.
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    /// Simulated signup latency.
    pub fn signup_delay(&self) -> Duration {
        Duration::from_millis(self.signup_delay_ms)
    }
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Product API endpoint.
    #[serde(default)]
    pub api: ApiSettings,

    /// Catalog fetch behavior.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Simulated login / signup.
    #[serde(default)]
    pub auth: AuthSettings,
}

impl StorefrontConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an explicit environment lookup.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(env);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load_or_default_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// [`load_or_default`](Self::load_or_default) with an injectable
    /// environment lookup.
    pub fn load_or_default_with_env<F>(config_path: Option<PathBuf>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load_with_env(config_path, env).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(StoreError::InvalidConfig(format!(
                "API base URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if !self.api.products_path.starts_with('/') {
            return Err(StoreError::InvalidConfig(format!(
                "products_path must start with '/', got: {}",
                self.api.products_path
            )));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("NEXTBUY_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = env("NEXTBUY_PRODUCTS_PATH") {
            self.api.products_path = path;
        }

        if let Some(timeout) = env("NEXTBUY_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = Some(secs),
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric API timeout"),
            }
        }

        if let Some(policy) = env("NEXTBUY_FETCH_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %parsed, "Overriding fetch policy from environment");
                    self.catalog.fetch_policy = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring fetch policy from environment"),
            }
        }

        if let Some(code) = env("NEXTBUY_ADMIN_CODE") {
            self.auth.admin_code = code;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "nextbuy", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Full URL of the listing endpoint.
    pub fn products_url(&self) -> String {
        self.api.products_url()
    }

    /// Configured fetch overlap policy.
    pub fn fetch_policy(&self) -> FetchPolicy {
        self.catalog.fetch_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_fetch_policy_parsing() {
        assert_eq!(
            "last_write_wins".parse::<FetchPolicy>().unwrap(),
            FetchPolicy::LastWriteWins
        );
        assert_eq!(
            "latest-only".parse::<FetchPolicy>().unwrap(),
            FetchPolicy::LatestOnly
        );
        assert_eq!("LATEST".parse::<FetchPolicy>().unwrap(), FetchPolicy::LatestOnly);
        assert!("newest".parse::<FetchPolicy>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.products_url(), "https://fakestoreapi.com/products");
        assert_eq!(config.fetch_policy(), FetchPolicy::LastWriteWins);
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.auth.admin_code, "ADMIN2024");
        assert_eq!(config.auth.login_delay(), Duration::from_millis(1000));
        assert_eq!(config.auth.signup_delay(), Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_products_url_trims_trailing_slash() {
        let api = ApiSettings {
            base_url: "http://localhost:3000/".into(),
            ..Default::default()
        };
        assert_eq!(api.products_url(), "http://localhost:3000/products");
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.api.base_url = "ftp://example.com".into();
        assert!(config.validate().unwrap_err().is_config_error());

        config.api.base_url = "http://localhost:8080".into();
        config.api.products_path = "products".into();
        assert!(config.validate().is_err());

        config.api.products_path = "/products".into();
        config.api.timeout_secs = Some(0);
        assert!(config.validate().is_err());

        config.api.timeout_secs = Some(5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let config = StorefrontConfig::load_with_env(
            Some(missing),
            env_of(&[
                ("NEXTBUY_API_URL", "http://127.0.0.1:9000"),
                ("NEXTBUY_PRODUCTS_PATH", "/api/items"),
                ("NEXTBUY_API_TIMEOUT_SECS", "3"),
                ("NEXTBUY_FETCH_POLICY", "latest_only"),
                ("NEXTBUY_ADMIN_CODE", "OPEN"),
            ]),
        )
        .unwrap();

        assert_eq!(config.products_url(), "http://127.0.0.1:9000/api/items");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(config.fetch_policy(), FetchPolicy::LatestOnly);
        assert_eq!(config.auth.admin_code, "OPEN");
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig::load_with_env(
            Some(dir.path().join("absent.toml")),
            env_of(&[
                ("NEXTBUY_API_TIMEOUT_SECS", "soon"),
                ("NEXTBUY_FETCH_POLICY", "random"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.fetch_policy(), FetchPolicy::LastWriteWins);
    }

    #[test]
    fn test_env_url_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let result = StorefrontConfig::load_with_env(
            Some(dir.path().join("absent.toml")),
            env_of(&[("NEXTBUY_API_URL", "localhost:3000")]),
        );
        assert!(matches!(result, Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            "[catalog]\nfetch_policy = \"latest_only\"\n\n[auth]\nlogin_delay_ms = 10\n",
        )
        .unwrap();

        let config = StorefrontConfig::load_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.fetch_policy(), FetchPolicy::LatestOnly);
        assert_eq!(config.auth.login_delay_ms, 10);
        assert_eq!(config.auth.signup_delay_ms, 1500);
        assert_eq!(config.products_url(), "https://fakestoreapi.com/products");
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = StorefrontConfig::load_with_env(Some(path.clone()), no_env).unwrap_err();
        assert!(matches!(err, StoreError::ConfigLoadFailed(_)));

        // the fallback swallows it
        let config = StorefrontConfig::load_or_default_with_env(Some(path), no_env);
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_fallback_ignores_env_when_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let env = |key: &str| match key {
            "NEXTBUY_API_URL" => Some("http://localhost:9".to_string()),
            _ => None,
        };

        let config = StorefrontConfig::load_or_default_with_env(Some(path), env);
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.toml");

        let mut config = StorefrontConfig::default();
        config.api.base_url = "http://localhost:4000".into();
        config.api.timeout_secs = Some(7);
        config.catalog.fetch_policy = FetchPolicy::LatestOnly;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(contents.contains("fetch_policy = \"latest_only\""));

        let loaded = StorefrontConfig::load_with_env(Some(path), no_env).unwrap();
        assert_eq!(loaded, config);
    }
}
