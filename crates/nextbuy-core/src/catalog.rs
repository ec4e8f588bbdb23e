//! # Catalog State
//!
//! The product list and its load status.
//!
//! ## Status Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Load Status                                 │
//! │                                                                         │
//! │                 fetch starts                                            │
//! │   ┌─────────┐ ──────────────► ┌─────────┐   response decoded           │
//! │   │ Success │                 │ Loading │ ──────────────────► Success  │
//! │   │ (init)  │ ◄────────────── └─────────┘                              │
//! │   └─────────┘   (new fetch)        │                                    │
//! │        ▲                           │ transport / decode failure         │
//! │        │       new fetch           ▼                                    │
//! │        └───────────────────── ┌─────────┐                              │
//! │                               │  Error  │   data left as it was        │
//! │                               └─────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The status is a single value, not a queue: whichever write lands last
//! wins.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// Load status of the catalog.
///
/// Serialized with the storefront's wire names: `"Success"`, `"Loading"`,
/// `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// Idle or last fetch succeeded. Initial state.
    #[default]
    Success,

    /// A fetch is in flight.
    Loading,

    /// The last fetch failed.
    #[serde(rename = "error", alias = "Error")]
    Error,
}

impl Status {
    /// Returns true while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Loading => write!(f, "loading"),
            Status::Error => write!(f, "error"),
        }
    }
}

/// Mutations accepted by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Replaces the product list wholesale.
    SetProducts(Vec<Product>),

    /// Replaces the status.
    SetStatus(Status),
}

/// Catalog slice of the root state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogState {
    /// Products from the last successful fetch.
    pub data: Vec<Product>,

    /// Load status.
    pub status: Status,
}

impl CatalogState {
    /// Creates an empty catalog with status `Success`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `data` verbatim. No dedup, no merge.
    pub fn set_products(&mut self, products: Vec<Product>) -> bool {
        self.data = products;
        true
    }

    /// Replaces `status`. Returns true if it differed.
    pub fn set_status(&mut self, status: Status) -> bool {
        let changed = self.status != status;
        self.status = status;
        changed
    }

    /// Looks up a product by id.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.data.iter().find(|p| &p.id == id)
    }

    /// Applies an action. Returns true if the catalog changed.
    pub fn reduce(&mut self, action: CatalogAction) -> bool {
        match action {
            CatalogAction::SetProducts(products) => self.set_products(products),
            CatalogAction::SetStatus(status) => self.set_status(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initial_state() {
        let catalog = CatalogState::new();
        assert!(catalog.data.is_empty());
        assert_eq!(catalog.status, Status::Success);
    }

    #[test]
    fn test_set_products_replaces_wholesale() {
        let mut catalog = CatalogState::new();
        catalog.reduce(CatalogAction::SetProducts(vec![
            Product::new(1, 1.0),
            Product::new(2, 2.0),
        ]));
        catalog.reduce(CatalogAction::SetProducts(vec![
            Product::new(3, 3.0),
            Product::new(3, 3.0),
        ]));

        assert_eq!(catalog.data.len(), 2);
        assert!(catalog.find(&ProductId::from(1)).is_none());
        assert!(catalog.find(&ProductId::from(3)).is_some());
    }

    #[test]
    fn test_set_status_reports_change() {
        let mut catalog = CatalogState::new();
        assert!(catalog.set_status(Status::Loading));
        assert!(!catalog.set_status(Status::Loading));
        assert!(catalog.status.is_loading());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(Status::Success).unwrap(), json!("Success"));
        assert_eq!(serde_json::to_value(Status::Loading).unwrap(), json!("Loading"));
        assert_eq!(serde_json::to_value(Status::Error).unwrap(), json!("error"));
        assert_eq!(
            serde_json::from_value::<Status>(json!("Error")).unwrap(),
            Status::Error
        );
    }
}
