//! # Store Handle
//!
//! The single source of truth for storefront state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Store (clone = share)                         │
//! │                                                                         │
//! │   dispatch(action) ──► watch::Sender::send_if_modified                  │
//! │                          │  RootState::reduce(action) -> changed        │
//! │                          ▼                                              │
//! │                    changed? ──yes──► receivers see a new snapshot       │
//! │                          │                                              │
//! │                          no ──► silent no-op, nobody is woken           │
//! │                                                                         │
//! │   generation: AtomicU64 ── bumped by every fetch that starts            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each dispatch runs one reducer to completion under the channel's lock.
//! Nothing awaits while holding it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nextbuy_core::{
    Action, CartAction, CartState, CartTotals, CatalogAction, CatalogState, Product, ProductId,
    RootState, Status,
};
use tokio::sync::watch;
use tracing::debug;

struct StoreInner {
    state: watch::Sender<RootState>,
    generation: AtomicU64,
}

/// Shared handle to the storefront state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.borrow())
            .field("generation", &self.current_generation())
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a store with the initial state: empty cart, empty catalog,
    /// status `Success`.
    pub fn new() -> Self {
        Self::with_initial(RootState::new())
    }

    /// Creates a store seeded with `state`.
    pub fn with_initial(state: RootState) -> Self {
        let (state, _) = watch::channel(state);
        Store {
            inner: Arc::new(StoreInner {
                state,
                generation: AtomicU64::new(0),
            }),
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Applies one action. Returns true if state changed; subscribers are
    /// only notified in that case.
    pub fn dispatch(&self, action: impl Into<Action>) -> bool {
        let action = action.into();
        let name = action.name();
        let changed = self.inner.state.send_if_modified(|state| state.reduce(action));
        debug!(action = name, changed, "Dispatched");
        changed
    }

    /// Applies `actions` only if no fetch newer than `generation` has started.
    ///
    /// The generation check and every action run in one critical section, so
    /// either all of them land or none do. Returns `None` when dropped as
    /// stale, otherwise whether any action changed state.
    pub(crate) fn dispatch_if_current<I>(&self, generation: u64, actions: I) -> Option<bool>
    where
        I: IntoIterator<Item = Action>,
    {
        let mut stale = false;
        let mut names = Vec::new();
        let changed = self.inner.state.send_if_modified(|state| {
            if generation != self.current_generation() {
                stale = true;
                return false;
            }
            actions.into_iter().fold(false, |changed, action| {
                names.push(action.name());
                state.reduce(action) | changed
            })
        });

        if stale {
            debug!(generation, "Dropped stale dispatch");
            None
        } else {
            debug!(actions = ?names, changed, generation, "Dispatched");
            Some(changed)
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of `product`; a line for its id gains one instead.
    ///
    /// ```
    /// use nextbuy_core::Product;
    /// use nextbuy_store::Store;
    ///
    /// let store = Store::new();
    /// assert!(store.add_to_cart(Product::new(1, 9.99)));
    /// assert!(store.add_to_cart(Product::new(1, 9.99)));
    /// assert_eq!(store.totals().total_quantity, 2);
    /// ```
    pub fn add_to_cart(&self, product: Product) -> bool {
        self.dispatch(CartAction::Add(product))
    }

    /// Drops the line for `id`. No-op when absent.
    pub fn remove_from_cart(&self, id: impl Into<ProductId>) -> bool {
        self.dispatch(CartAction::Remove(id.into()))
    }

    /// Raises the quantity of `id` by one. No-op when absent.
    pub fn increment_qty(&self, id: impl Into<ProductId>) -> bool {
        self.dispatch(CartAction::Increment(id.into()))
    }

    /// Lowers the quantity of `id` by one, never below 1.
    pub fn decrement_qty(&self, id: impl Into<ProductId>) -> bool {
        self.dispatch(CartAction::Decrement(id.into()))
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Replaces the catalog product list.
    pub fn set_products(&self, products: Vec<Product>) -> bool {
        self.dispatch(CatalogAction::SetProducts(products))
    }

    /// Replaces the catalog load status.
    pub fn set_status(&self, status: Status) -> bool {
        self.dispatch(CatalogAction::SetStatus(status))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Owned copy of the whole state.
    pub fn snapshot(&self) -> RootState {
        self.inner.state.borrow().clone()
    }

    /// Reads the state in place. Do not call back into the store from `f`.
    pub fn with_state<R>(&self, f: impl FnOnce(&RootState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    /// Owned copy of the cart slice.
    pub fn cart(&self) -> CartState {
        self.with_state(|s| s.cart.clone())
    }

    /// Owned copy of the catalog slice.
    pub fn catalog(&self) -> CatalogState {
        self.with_state(|s| s.product.clone())
    }

    /// Current catalog load status.
    pub fn status(&self) -> Status {
        self.with_state(|s| s.product.status)
    }

    /// Quantities and amounts for the current cart.
    pub fn totals(&self) -> CartTotals {
        self.with_state(|s| CartTotals::from(&s.cart))
    }

    /// Looks a product up in the loaded catalog.
    pub fn find_product(&self, id: &ProductId) -> Option<Product> {
        self.with_state(|s| s.product.find(id).cloned())
    }

    /// Receiver that observes every state-changing dispatch.
    pub fn subscribe(&self) -> watch::Receiver<RootState> {
        self.inner.state.subscribe()
    }

    // =========================================================================
    // Fetch Generations
    // =========================================================================

    /// Starts a new fetch generation and returns its number.
    pub(crate) fn begin_fetch(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of the most recently started fetch (0 before any).
    pub fn current_generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }
}
