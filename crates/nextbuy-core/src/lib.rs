//! # nextbuy-core: Pure State Logic for the NextBuy Storefront
//!
//! This crate holds the state shape and the transition rules of the
//! storefront: the cart, the product catalog and the root state that
//! composes them. Everything here is a plain function over owned data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     NextBuy Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Views (catalog page, cart page, forms)             │   │
//! │  │      read snapshots ◄──────────────► dispatch actions           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           nextbuy-store (Store handle, fetch, config)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ nextbuy-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │  catalog  │  │   forms   │  │   │
//! │  │   │  Product  │  │ LineItem  │  │  Status   │  │  Login    │  │   │
//! │  │   │ ProductId │  │  reduce   │  │  reduce   │  │  Signup   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, ProductId
//! - [`cart`] - Cart line items and the cart reducer
//! - [`catalog`] - Catalog state, load status and the catalog reducer
//! - [`state`] - Root state and action routing
//! - [`totals`] - Derived cart totals
//! - [`money`] - Integer-cent money for totals
//! - [`validation`] - Field validators
//! - [`forms`] - Login / signup form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use nextbuy_core::{Action, CartAction, Product, RootState};
//!
//! let mut state = RootState::default();
//! let shoe = Product::new(7, 10.0);
//!
//! state.reduce(Action::Cart(CartAction::Add(shoe.clone())));
//! state.reduce(Action::Cart(CartAction::Add(shoe)));
//!
//! assert_eq!(state.cart.len(), 1);
//! assert_eq!(state.cart.items()[0].qty, 2);
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod forms;
pub mod money;
pub mod state;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartAction, CartLineItem, CartState};
pub use catalog::{CatalogAction, CatalogState, Status};
pub use error::{CoreError, CoreResult, ValidationError};
pub use forms::{AccountType, FormErrors, LoginForm, SignupForm};
pub use money::Money;
pub use state::{Action, RootState};
pub use totals::{CartTotals, LineTotal};
pub use types::{Product, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum password length accepted by the login and signup forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of digits a phone number must have once separators are stripped.
pub const PHONE_DIGITS: usize = 10;

/// Admin verification code used when no other code is configured.
pub const DEFAULT_ADMIN_CODE: &str = "ADMIN2024";
