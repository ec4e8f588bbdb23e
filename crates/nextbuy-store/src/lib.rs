//! # nextbuy-store: State Container for the NextBuy Storefront
//!
//! Wraps the pure reducers from `nextbuy-core` in a shared, observable
//! store and connects it to the product API.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront Runtime                              │
//! │                                                                         │
//! │   Views / CLI                                                           │
//! │      │  add_to_cart, increment_qty, ...          subscribe()            │
//! │      ▼                                               ▲                  │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Store (Arc<watch::Sender>)                    │  │
//! │  │                                                                  │  │
//! │  │   RootState { cart: CartState, product: CatalogState }          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │      ▲                                                                  │
//! │      │ Loading / SetProducts / Success | Error                          │
//! │  ┌───┴────────────┐        ┌────────────────────┐                      │
//! │  │ CatalogLoader  │───────►│  ProductApi        │──► GET /products     │
//! │  │ (fetch.rs)     │        │  (HttpProductApi)  │                      │
//! │  └────────────────┘        └────────────────────┘                      │
//! │                                                                         │
//! │  AuthService: form validation + simulated latency, no store access     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`store`] - The shared [`Store`] handle
//! - [`fetch`] - Product fetch operation and [`CatalogLoader`]
//! - [`api`] - [`ProductApi`] trait and HTTP client
//! - [`config`] - `storefront.toml` loading and env overrides
//! - [`auth`] - Simulated login / signup
//! - [`error`] - Store and fetch error types
//!
//! ## Usage
//! ```rust,no_run
//! use nextbuy_store::{CatalogLoader, Store, StorefrontConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorefrontConfig::load(None)?;
//! let store = Store::new();
//! let loader = CatalogLoader::from_config(store.clone(), &config)?;
//!
//! loader.load().await?;
//! if let Some(product) = store.catalog().data.first().cloned() {
//!     store.add_to_cart(product);
//! }
//! println!("{}", store.totals().total_amount);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod store;

pub use api::{HttpProductApi, ProductApi};
pub use auth::{AuthService, Registration, Session};
pub use config::{ApiSettings, AuthSettings, CatalogSettings, FetchPolicy, StorefrontConfig};
pub use error::{FetchError, StoreError, StoreResult};
pub use fetch::{fetch_products, fetch_products_with_policy, CatalogLoader};
pub use store::Store;
