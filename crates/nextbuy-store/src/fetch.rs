//! # Product Fetch
//!
//! Loads the catalog from a [`ProductApi`] into the [`Store`].
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   (any) ──fetch──► Loading ──ok──► SetProducts(list) ──► Success        │
//! │                       │                                                 │
//! │                       └──err──► Error        (data left untouched)      │
//! │                                                                         │
//! │   Only the network call suspends. Cart dispatches run freely while a    │
//! │   fetch is in flight.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Fetches
//! Under [`FetchPolicy::LastWriteWins`] completions are applied in the order
//! they finish. Under [`FetchPolicy::LatestOnly`] each fetch carries a
//! generation number and a completion is dropped if a newer fetch has
//! started; the caller gets [`FetchError::Superseded`].

use std::sync::Arc;

use nextbuy_core::{Action, CatalogAction, Product, Status};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::{HttpProductApi, ProductApi};
use crate::config::{FetchPolicy, StorefrontConfig};
use crate::error::{FetchError, StoreResult};
use crate::store::Store;

/// Fetches the catalog, applying every completion (last write wins).
///
/// Returns the number of products loaded. The store never keeps the error;
/// it only records `Status::Error`.
pub async fn fetch_products<A>(store: &Store, api: &A) -> Result<usize, FetchError>
where
    A: ProductApi + ?Sized,
{
    fetch_products_with_policy(store, api, FetchPolicy::LastWriteWins).await
}

/// Fetches the catalog under an explicit overlap policy.
pub async fn fetch_products_with_policy<A>(
    store: &Store,
    api: &A,
    policy: FetchPolicy,
) -> Result<usize, FetchError>
where
    A: ProductApi + ?Sized,
{
    let generation = store.begin_fetch();
    info!(generation, %policy, "Fetching products");

    store.set_status(Status::Loading);

    match api.list_products().await {
        Ok(products) => {
            let count = products.len();
            apply_success(store, generation, policy, products)?;
            info!(generation, count, "Products loaded");
            Ok(count)
        }
        Err(err) => {
            warn!(generation, error = %err, "Failed to fetch products");
            apply(
                store,
                generation,
                policy,
                vec![CatalogAction::SetStatus(Status::Error).into()],
            )?;
            Err(err)
        }
    }
}

fn apply_success(
    store: &Store,
    generation: u64,
    policy: FetchPolicy,
    products: Vec<Product>,
) -> Result<(), FetchError> {
    apply(
        store,
        generation,
        policy,
        vec![
            CatalogAction::SetProducts(products).into(),
            CatalogAction::SetStatus(Status::Success).into(),
        ],
    )
}

/// Last-write-wins dispatches each action on its own. Latest-only applies
/// the whole batch under one generation check.
fn apply(
    store: &Store,
    generation: u64,
    policy: FetchPolicy,
    actions: Vec<Action>,
) -> Result<(), FetchError> {
    match policy {
        FetchPolicy::LastWriteWins => {
            for action in actions {
                store.dispatch(action);
            }
            Ok(())
        }
        FetchPolicy::LatestOnly => match store.dispatch_if_current(generation, actions) {
            Some(_) => Ok(()),
            None => {
                info!(generation, "Discarding superseded fetch result");
                Err(FetchError::Superseded { generation })
            }
        },
    }
}

// =============================================================================
// Catalog Loader
// =============================================================================

/// Bundles a store, an API and a policy so views can trigger fetches
/// without carrying all three around.
#[derive(Clone)]
pub struct CatalogLoader {
    store: Store,
    api: Arc<dyn ProductApi>,
    policy: FetchPolicy,
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CatalogLoader {
    /// Creates a loader over an arbitrary API.
    pub fn new(store: Store, api: Arc<dyn ProductApi>, policy: FetchPolicy) -> Self {
        CatalogLoader { store, api, policy }
    }

    /// Loader over HTTP, configured from `[api]` and `[catalog]`.
    pub fn from_config(store: Store, config: &StorefrontConfig) -> StoreResult<Self> {
        let api = HttpProductApi::from_settings(&config.api)?;
        Ok(Self::new(store, Arc::new(api), config.fetch_policy()))
    }

    /// The store this loader writes to.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// How overlapping fetches are reconciled.
    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    /// Runs one fetch to completion.
    pub async fn load(&self) -> Result<usize, FetchError> {
        fetch_products_with_policy(&self.store, self.api.as_ref(), self.policy).await
    }

    /// Fire-and-forget: runs the fetch as a task.
    pub fn spawn(&self) -> JoinHandle<Result<usize, FetchError>> {
        let loader = self.clone();
        tokio::spawn(async move { loader.load().await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    type Reply = Result<Vec<Product>, FetchError>;

    /// Replies with a fixed result.
    struct StaticApi(fn() -> Reply);

    #[async_trait]
    impl ProductApi for StaticApi {
        async fn list_products(&self) -> Reply {
            (self.0)()
        }
    }

    /// Each call waits for the next gate to be released by the test.
    struct GatedApi {
        gates: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
        calls: AtomicUsize,
    }

    impl GatedApi {
        fn new(gates: Vec<oneshot::Receiver<Reply>>) -> Self {
            GatedApi {
                gates: Mutex::new(gates.into()),
                calls: AtomicUsize::new(0),
            }
        }

        async fn wait_for_calls(&self, n: usize) {
            while self.calls.load(Ordering::SeqCst) < n {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl ProductApi for GatedApi {
        async fn list_products(&self) -> Reply {
            let gate = self.gates.lock().unwrap().pop_front();
            self.calls.fetch_add(1, Ordering::SeqCst);
            match gate {
                Some(gate) => gate
                    .await
                    .unwrap_or_else(|_| Err(FetchError::Transport("gate dropped".into()))),
                None => Err(FetchError::Transport("no gate".into())),
            }
        }
    }

    fn two_products() -> Reply {
        Ok(vec![Product::new(1, 9.99), Product::new(2, 4.5)])
    }

    fn server_error() -> Reply {
        Err(FetchError::Status {
            status: 500,
            url: "http://test/products".into(),
        })
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let store = Store::new();
        let count = fetch_products(&store, &StaticApi(two_products)).await.unwrap();

        assert_eq!(count, 2);
        let catalog = store.catalog();
        assert_eq!(catalog.status, Status::Success);
        assert_eq!(
            catalog.data,
            vec![Product::new(1, 9.99), Product::new(2, 4.5)]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_data() {
        let store = Store::new();
        store.set_products(vec![Product::new(42, 1.0)]);

        let err = fetch_products(&store, &StaticApi(server_error))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 500, .. }));
        let catalog = store.catalog();
        assert_eq!(catalog.status, Status::Error);
        assert_eq!(catalog.data, vec![Product::new(42, 1.0)]);
    }

    #[tokio::test]
    async fn test_status_is_loading_while_in_flight() {
        let (tx, rx) = oneshot::channel();
        let api = Arc::new(GatedApi::new(vec![rx]));
        let store = Store::new();
        let loader = CatalogLoader::new(store.clone(), api.clone(), FetchPolicy::default());

        let task = loader.spawn();
        api.wait_for_calls(1).await;
        assert_eq!(store.status(), Status::Loading);

        // cart is not blocked by the fetch
        assert!(store.add_to_cart(Product::new(5, 3.0)));

        tx.send(two_products()).unwrap();
        assert_eq!(task.await.unwrap().unwrap(), 2);
        assert_eq!(store.status(), Status::Success);
        assert_eq!(store.cart().len(), 1);
    }

    /// Starts fetch A then fetch B, completes B first, then A.
    async fn race(
        policy: FetchPolicy,
    ) -> (Store, Result<usize, FetchError>, Result<usize, FetchError>) {
        let (tx_a, rx_a) = oneshot::channel();
        let (tx_b, rx_b) = oneshot::channel();
        let api = Arc::new(GatedApi::new(vec![rx_a, rx_b]));
        let store = Store::new();
        let loader = CatalogLoader::new(store.clone(), api.clone(), policy);

        let first = loader.spawn();
        api.wait_for_calls(1).await;
        let second = loader.spawn();
        api.wait_for_calls(2).await;

        tx_b.send(Ok(vec![Product::new("b", 2.0)])).unwrap();
        let second = second.await.unwrap();
        tx_a.send(Ok(vec![Product::new("a", 1.0)])).unwrap();
        let first = first.await.unwrap();

        (store, first, second)
    }

    #[tokio::test]
    async fn test_last_write_wins_race() {
        let (store, first, second) = race(FetchPolicy::LastWriteWins).await;

        assert_eq!(first.unwrap(), 1);
        assert_eq!(second.unwrap(), 1);
        assert_eq!(store.catalog().data, vec![Product::new("a", 1.0)]);
        assert_eq!(store.status(), Status::Success);
    }

    #[tokio::test]
    async fn test_latest_only_discards_stale_result() {
        let (store, first, second) = race(FetchPolicy::LatestOnly).await;

        assert_eq!(second.unwrap(), 1);
        assert!(matches!(first, Err(FetchError::Superseded { generation: 1 })));
        assert_eq!(store.catalog().data, vec![Product::new("b", 2.0)]);
        assert_eq!(store.status(), Status::Success);
        assert_eq!(store.current_generation(), 2);
    }

    #[tokio::test]
    async fn test_latest_only_single_fetch_behaves_normally() {
        let store = Store::new();
        let count = fetch_products_with_policy(
            &store,
            &StaticApi(two_products),
            FetchPolicy::LatestOnly,
        )
        .await
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.status(), Status::Success);
    }
}
