//! # Cart State
//!
//! The cart slice of the root state and its reducer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  View Action             CartAction              Cart State Change      │
//! │  ───────────             ──────────              ─────────────────      │
//! │                                                                         │
//! │  "Add to cart" ────────► Add(product) ─────────► qty += 1  or  push     │
//! │                                                                         │
//! │  "+" button ───────────► Increment(id) ────────► qty += 1               │
//! │                                                                         │
//! │  "-" button ───────────► Decrement(id) ────────► qty -= 1  (floor 1)    │
//! │                                                                         │
//! │  "Remove" ─────────────► Remove(id) ───────────► items.retain(..)       │
//! │                                                                         │
//! │  NOTE: Unknown ids are silently ignored. Every operation returns        │
//! │        `true` only when it changed the cart.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A product snapshot and its quantity.
///
/// `item` is a detached copy taken when the product was first added. Later
/// catalog refreshes never touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product snapshot captured at add-time.
    pub item: Product,

    /// Quantity, always >= 1.
    pub qty: u32,
}

impl CartLineItem {
    fn new(item: Product) -> Self {
        CartLineItem { item, qty: 1 }
    }

    /// Id of the product on this line.
    pub fn id(&self) -> &ProductId {
        &self.item.id
    }
}

/// Mutations accepted by the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Adds one unit of the product.
    Add(Product),

    /// Drops the line for this id.
    Remove(ProductId),

    /// Raises the line quantity by one.
    Increment(ProductId),

    /// Lowers the line quantity by one, never below one.
    Decrement(ProductId),
}

/// The cart: line items in the order they were first added.
///
/// ## Invariants
/// - At most one line per product id
/// - Every line has `qty >= 1`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the line for a product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|line| line.id() == id)
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Already in cart: quantity goes up by one, snapshot is NOT refreshed
    /// - Not in cart: appended as a new line with quantity 1
    ///
    /// Always changes the cart.
    pub fn add(&mut self, product: Product) -> bool {
        match self.get_mut(&product.id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.items.push(CartLineItem::new(product)),
        }
        true
    }

    /// Removes the line for `id`. Returns false if there was none.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|line| line.id() != id);
        self.items.len() < len_before
    }

    /// Increments the quantity for `id`. Returns false if there is no line.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.get_mut(id) {
            Some(line) => {
                line.qty = line.qty.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Decrements the quantity for `id`.
    ///
    /// A line at quantity 1 stays at 1; removal goes through [`remove`].
    /// Returns false when nothing changed.
    ///
    /// [`remove`]: CartState::remove
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.get_mut(id) {
            Some(line) if line.qty > 1 => {
                line.qty -= 1;
                true
            }
            _ => false,
        }
    }

    /// Applies an action. Returns true if the cart changed.
    pub fn reduce(&mut self, action: CartAction) -> bool {
        match action {
            CartAction::Add(product) => self.add(product),
            CartAction::Remove(id) => self.remove(&id),
            CartAction::Increment(id) => self.increment(&id),
            CartAction::Decrement(id) => self.decrement(&id),
        }
    }
}
