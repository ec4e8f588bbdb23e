//! # Domain Types
//!
//! The product record as the storefront sees it.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Product                                      │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  id      ProductId   (JSON number or string, compared for equality)     │
//! │  price   f64         (non-negative, as sent by the API)                 │
//! │  ...     extra       (title, image, category, rating, ... passed        │
//! │                       through verbatim, never interpreted here)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `id` and `price` are required. Every other field round-trips
//! unchanged through decode and encode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Product ID
// =============================================================================

/// Identifier of a product.
///
/// The listing API uses integers; string identifiers are accepted too so the
/// store works against any listing that keeps ids unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier (`"id": 7`).
    Number(i64),

    /// Textual identifier (`"id": "sku-7"`).
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parses user input: anything that reads as an integer is numeric.
impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map(ProductId::Number)
            .unwrap_or_else(|_| ProductId::Text(s.to_string())))
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Number(id)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        ProductId::Number(id as i64)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Unit price in major currency units (e.g. `9.99`).
    pub price: f64,

    /// Descriptive fields passed through unmodified.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with only the required fields.
    pub fn new(id: impl Into<ProductId>, price: f64) -> Self {
        Product {
            id: id.into(),
            price,
            extra: Map::new(),
        }
    }

    /// Adds a pass-through field (builder style).
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Decodes a product from an arbitrary JSON value.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Returns a pass-through field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Returns the `title` field when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.field("title").and_then(Value::as_str)
    }

    /// Unit price rounded to cents.
    pub fn unit_price(&self) -> Money {
        Money::from_price(self.price)
    }
}
