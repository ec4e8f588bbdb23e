//! # Root State
//!
//! Composes the two slices under fixed keys and routes actions to them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RootState                                                              │
//! │  ├── cart     ◄── Action::Cart(CartAction)                              │
//! │  └── product  ◄── Action::Catalog(CatalogAction)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The slices never read each other, so routing is static and there is no
//! cross-slice logic here.

use serde::Serialize;

use crate::cart::{CartAction, CartState};
use crate::catalog::{CatalogAction, CatalogState};

/// Any action the root state accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Routed to the cart slice.
    Cart(CartAction),

    /// Routed to the catalog slice.
    Catalog(CatalogAction),
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<CatalogAction> for Action {
    fn from(action: CatalogAction) -> Self {
        Action::Catalog(action)
    }
}

impl Action {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Cart(CartAction::Add(_)) => "cart/addToCart",
            Action::Cart(CartAction::Remove(_)) => "cart/removeFromCart",
            Action::Cart(CartAction::Increment(_)) => "cart/incrementQty",
            Action::Cart(CartAction::Decrement(_)) => "cart/decrementQty",
            Action::Catalog(CatalogAction::SetProducts(_)) => "product/setProducts",
            Action::Catalog(CatalogAction::SetStatus(_)) => "product/setStatus",
        }
    }
}

/// The whole storefront state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootState {
    /// Cart slice.
    pub cart: CartState,

    /// Catalog slice.
    pub product: CatalogState,
}

impl RootState {
    /// Creates the initial state: empty cart, empty catalog with status
    /// `Success`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `action` to its slice. Returns true if state changed.
    pub fn reduce(&mut self, action: Action) -> bool {
        match action {
            Action::Cart(action) => self.cart.reduce(action),
            Action::Catalog(action) => self.product.reduce(action),
        }
    }
}
