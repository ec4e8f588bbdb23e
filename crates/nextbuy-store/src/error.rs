//! # Store Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Fetch       │  │       Domain            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  CoreError              │ │
//! │  │  ConfigLoad..   │  │  Timeout        │  │  (form validation,      │ │
//! │  │  ConfigSave..   │  │  Status         │  │   bad product record)   │ │
//! │  │  HttpClient     │  │  Decode         │  │                         │ │
//! │  │                 │  │  Superseded     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  The store itself never holds an error: a failed fetch is recorded     │
//! │  only as `Status::Error`. These types are for callers.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use nextbuy_core::CoreError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Fetch Error
// =============================================================================

/// Failure of a product listing request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or body read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The configured request timeout elapsed.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not a JSON array of product records.
    #[error("Failed to decode product listing: {0}")]
    Decode(String),

    /// A newer fetch started before this one finished; its result was dropped.
    #[error("Fetch {generation} superseded by a newer request")]
    Superseded { generation: u64 },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl FetchError {
    /// Returns true if re-triggering the fetch could succeed.
    ///
    /// Nothing retries automatically; views use this to decide whether to
    /// offer a "try again" action.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) | FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Decode(_) | FetchError::Superseded { .. } => false,
        }
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Umbrella error for the store crate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Product listing failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Domain error from nextbuy-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

impl StoreError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(FetchError::Transport("connection refused".into()).is_retryable());
        assert!(FetchError::Timeout("10s".into()).is_retryable());
        assert!(FetchError::Status { status: 503, url: "u".into() }.is_retryable());

        assert!(!FetchError::Status { status: 404, url: "u".into() }.is_retryable());
        assert!(!FetchError::Decode("expected array".into()).is_retryable());
        assert!(!FetchError::Superseded { generation: 1 }.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::Status {
            status: 502,
            url: "https://fakestoreapi.com/products".into(),
        };
        assert_eq!(err.to_string(), "HTTP 502 from https://fakestoreapi.com/products");

        let err: StoreError = err.into();
        assert!(err.to_string().contains("502"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_decode_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("{}").unwrap_err();
        assert!(matches!(FetchError::from(json_err), FetchError::Decode(_)));
    }
}
