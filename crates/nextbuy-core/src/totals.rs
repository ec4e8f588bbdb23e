//! # Cart Totals
//!
//! Values the cart page derives from the cart slice.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CART                                              3 Items in Cart      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Backpack           $9.99   Qty: 2        Subtotal: $19.98              │
//! │  T-Shirt            $4.50   Qty: 1        Subtotal: $4.50               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Total Items: 3                           Total Amount: $24.48          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::cart::{CartLineItem, CartState};
use crate::money::Money;
use crate::types::ProductId;

/// Per-line pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineTotal {
    /// Line's product id.
    pub product_id: ProductId,
    /// Price rounded to cents.
    pub unit_price: Money,
    /// Units on the line.
    pub qty: u32,
    /// `unit_price × qty`.
    pub subtotal: Money,
}

impl From<&CartLineItem> for LineTotal {
    fn from(line: &CartLineItem) -> Self {
        let unit_price = line.item.unit_price();
        LineTotal {
            product_id: line.id().clone(),
            unit_price,
            qty: line.qty,
            subtotal: unit_price * line.qty,
        }
    }
}

/// Cart summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Distinct lines.
    pub item_count: usize,

    /// Sum of quantities.
    pub total_quantity: u64,

    /// Sum of line subtotals.
    pub total_amount: Money,

    /// Per-line breakdown in cart order.
    pub lines: Vec<LineTotal>,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        let lines: Vec<LineTotal> = cart.items().iter().map(LineTotal::from).collect();
        CartTotals {
            item_count: lines.len(),
            total_quantity: lines.iter().map(|l| l.qty as u64).sum(),
            total_amount: lines.iter().map(|l| l.subtotal).sum(),
            lines,
        }
    }
}
