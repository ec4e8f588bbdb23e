//! # Product API
//!
//! The remote product listing: one unauthenticated `GET` with no parameters
//! returning a JSON array of product records.
//!
//! [`ProductApi`] is the seam the fetch operation talks to. The HTTP
//! implementation lives here; tests substitute their own.

use std::sync::Arc;

use async_trait::async_trait;
use nextbuy_core::Product;
use tracing::debug;

use crate::config::ApiSettings;
use crate::error::{FetchError, StoreError, StoreResult};

/// Source of the product listing.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Fetches every product. No paging, no filters.
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;
}

#[async_trait]
impl<T: ProductApi + ?Sized> ProductApi for Arc<T> {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).list_products().await
    }
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`ProductApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    url: String,
}

impl HttpProductApi {
    /// Client for `url` with no request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        HttpProductApi {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Client built from the `[api]` settings.
    pub fn from_settings(settings: &ApiSettings) -> StoreResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| StoreError::HttpClient(e.to_string()))?;

        Ok(HttpProductApi {
            client,
            url: settings.products_url(),
        })
    }

    /// Listing URL this client requests.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        debug!(url = %self.url, "GET product listing");

        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let products: Vec<Product> = serde_json::from_slice(&body)?;

        debug!(count = products.len(), bytes = body.len(), "Decoded product listing");
        Ok(products)
    }
}
