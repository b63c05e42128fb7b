//! # Cart Store
//!
//! The shared, owned handle over the storefront state. Views receive a clone
//! of the handle; there is no global store.
//!
//! ## Thread Safety
//! The cart lives in `Arc<Mutex<..>>` because:
//! 1. Several views (badge, basket, product pages) hold the same store
//! 2. Deferred removals complete on a spawned task
//! 3. Each operation must apply as a whole, never interleaved with another
//!
//! The lock is never held across an `.await`.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  View Gesture          Store Call                     Event             │
//! │  ────────────          ──────────                     ─────             │
//! │                                                                         │
//! │  App start ──────────► retrieve_products(source) ───► CatalogLoaded /  │
//! │                                                       CatalogFailed    │
//! │  "Add to cart" ──────► add_to_cart(product) ────────► LineAdded /      │
//! │                                                       QuantityChanged  │
//! │  Stepper +/- ────────► change_quantity(i, dir) ─────► QuantityChanged /│
//! │                                                       LineRemoved      │
//! │  "Remove" ───────────► remove_line_with_delay(i) ───► RemovalScheduled │
//! │                          ... 700 ms later ──────────► LineRemoved      │
//! │                                                                         │
//! │  Render ─────────────► cart_count(), cart_total(), line_total(i) ...   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use storefront_core::validation::validate_catalog;
use storefront_core::{
    AddOutcome, Cart, CartLine, CatalogStatus, CoreError, CoreResult, Direction, LineId, Money,
    Product, QuantityChange,
};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{CartSettings, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::events::StoreEvent;
use crate::removal::{PendingRemoval, RemovalOutcome, RemovalTicket};
use crate::source::CatalogSource;

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only projection of the store for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub catalog_status: CatalogStatus,
    pub last_catalog_error: Option<String>,
    pub cart_count: u64,
    pub cart_total: Money,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            lines: cart.lines().to_vec(),
            catalog_status: cart.catalog_status(),
            last_catalog_error: cart.last_catalog_error().map(str::to_string),
            cart_count: cart.cart_count(),
            cart_total: cart.cart_total(),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreState {
    cart: Cart,
    /// Live deferred removals by line.
    pending: HashMap<LineId, RemovalTicket>,
    next_seq: u64,
}

impl StoreState {
    /// Cancels the deferred removal of a line that is leaving the cart by
    /// another route.
    fn cancel_pending(&mut self, id: LineId) {
        if let Some(ticket) = self.pending.remove(&id) {
            ticket.token.cancel();
        }
    }
}

#[derive(Debug)]
struct Inner {
    state: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
    removal_delay: Duration,
}

/// Cloneable handle to the storefront state.
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl CartStore {
    /// Creates a store with an empty cart and a `Loading` catalog.
    pub fn new(settings: &CartSettings) -> Self {
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        CartStore {
            inner: Arc::new(Inner {
                state: Mutex::new(StoreState::default()),
                events,
                removal_delay: settings.removal_delay(),
            }),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.cart)
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    pub fn removal_delay(&self) -> Duration {
        self.inner.removal_delay
    }

    /// Runs `f` with read access to the cart.
    ///
    /// ```rust,ignore
    /// let names: Vec<String> = store.with_cart(|c| c.lines().iter().map(|l| l.name.clone()).collect());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock().cart)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(|c| CartSnapshot::from(c))
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // A panic mid-operation cannot leave the cart half-mutated: every
        // mutation validates before it writes.
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes while the caller still holds the state lock, so events
    /// arrive in mutation order.
    fn publish(&self, event: StoreEvent) {
        // Err only means nobody is subscribed.
        let _ = self.inner.events.send(event);
    }

    fn rejected<T>(operation: &'static str, result: CoreResult<T>) -> StoreResult<T> {
        result.map_err(|e| {
            warn!(operation, error = %e, "Cart operation rejected");
            StoreError::Core(e)
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Installs the catalog; status becomes `Ready`.
    pub fn load_catalog(&self, products: Vec<Product>) -> StoreResult<()> {
        let count = products.len();
        let mut state = self.lock();
        Self::rejected("load_catalog", state.cart.load_catalog(products))?;

        info!(products = count, "Catalog loaded");
        self.publish(StoreEvent::CatalogLoaded { products: count });
        Ok(())
    }

    /// Records a catalog failure; status becomes `Failed`. Cart lines are
    /// untouched.
    pub fn report_catalog_error(&self, error: impl Into<String>) -> StoreResult<()> {
        let message = error.into();
        let mut state = self.lock();
        Self::rejected("report_catalog_error", state.cart.report_catalog_error(message.clone()))?;

        error!(error = %message, "Unable to load products");
        self.publish(StoreEvent::CatalogFailed { message });
        Ok(())
    }

    /// Fetches the catalog from `source` and settles the catalog status.
    ///
    /// Source and validation failures are absorbed into `Failed`; the only
    /// error returned is `CatalogAlreadySettled`.
    pub async fn retrieve_products<S: CatalogSource>(&self, source: &S) -> StoreResult<CatalogStatus> {
        info!(source = %source.describe(), "Retrieving products");

        let fetched = source.fetch().await.and_then(|products| {
            validate_catalog(&products).map_err(CoreError::from)?;
            Ok(products)
        });

        match fetched {
            Ok(products) => self.load_catalog(products)?,
            Err(e) => self.report_catalog_error(e.to_string())?,
        }

        Ok(self.catalog_status())
    }

    // =========================================================================
    // Line Mutations
    // =========================================================================

    /// Appends a new line for a product not yet in the cart.
    pub fn add_new_line(&self, product: &Product) -> StoreResult<LineId> {
        let mut state = self.lock();
        let id = Self::rejected("add_new_line", state.cart.add_new_line(product))?;

        debug!(line_id = %id, product = %product.name, "Line added");
        self.publish(StoreEvent::LineAdded {
            id,
            name: product.name.clone(),
        });
        Ok(id)
    }

    /// Bumps the quantity of an existing line; returns the new quantity.
    pub fn increment_existing_line(&self, product_name: &str) -> StoreResult<u32> {
        let mut state = self.lock();
        let (id, quantity) = Self::rejected(
            "increment_existing_line",
            state.cart.increment_existing_line(product_name),
        )?;

        debug!(line_id = %id, product = %product_name, quantity, "Line incremented");
        self.publish(StoreEvent::QuantityChanged { id, quantity });
        Ok(quantity)
    }

    /// Adds one unit of `product`, creating its line if needed.
    pub fn add_to_cart(&self, product: &Product) -> StoreResult<AddOutcome> {
        let mut state = self.lock();
        let outcome = Self::rejected("add_to_cart", state.cart.add_to_cart(product))?;

        match outcome {
            AddOutcome::Added(id) => {
                debug!(line_id = %id, product = %product.name, "Line added");
                self.publish(StoreEvent::LineAdded {
                    id,
                    name: product.name.clone(),
                });
            }
            AddOutcome::Incremented { id, quantity } => {
                debug!(line_id = %id, product = %product.name, quantity, "Line incremented");
                self.publish(StoreEvent::QuantityChanged { id, quantity });
            }
        }
        Ok(outcome)
    }

    /// Steps the quantity at `index`; a decrease from 1 removes the line.
    pub fn change_quantity(&self, index: usize, direction: Direction) -> StoreResult<QuantityChange> {
        let mut state = self.lock();
        let change = Self::rejected("change_quantity", state.cart.change_quantity(index, direction))?;

        match &change {
            QuantityChange::Changed { id, quantity } => {
                debug!(line_id = %id, index, quantity = *quantity, ?direction, "Quantity changed");
                self.publish(StoreEvent::QuantityChanged {
                    id: *id,
                    quantity: *quantity,
                });
            }
            QuantityChange::Removed(line) => {
                state.cancel_pending(line.id);
                debug!(line_id = %line.id, index, "Line removed by decrease");
                self.publish(StoreEvent::LineRemoved {
                    id: line.id,
                    name: line.name.clone(),
                });
            }
        }
        Ok(change)
    }

    /// Removes the line at `index` now.
    pub fn remove_line_immediate(&self, index: usize) -> StoreResult<CartLine> {
        let mut state = self.lock();
        let line = Self::rejected("remove_line_immediate", state.cart.remove_line_immediate(index))?;
        state.cancel_pending(line.id);

        debug!(line_id = %line.id, index, product = %line.name, "Line removed");
        self.publish(StoreEvent::LineRemoved {
            id: line.id,
            name: line.name.clone(),
        });
        Ok(line)
    }

    // =========================================================================
    // Deferred Removal
    // =========================================================================

    /// Marks the line at `index` as removing and removes it once the
    /// configured delay has elapsed.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// ## Errors
    /// - `IndexOutOfRange` for a bad index
    /// - `RemovalAlreadyPending` if this line is already counting down
    pub fn remove_line_with_delay(&self, index: usize) -> StoreResult<PendingRemoval> {
        let (id, seq, token) = {
            let mut state = self.lock();
            let len = state.cart.len();
            let id = Self::rejected(
                "remove_line_with_delay",
                state
                    .cart
                    .line(index)
                    .map(|l| l.id)
                    .ok_or(CoreError::IndexOutOfRange { index, len }),
            )?;

            if state.pending.get(&id).is_some_and(|t| !t.token.is_cancelled()) {
                warn!(line_id = %id, "Removal already pending");
                return Err(StoreError::RemovalAlreadyPending(id));
            }

            state.cart.mark_removing(index)?;
            state.next_seq += 1;
            let seq = state.next_seq;
            let token = CancellationToken::new();
            state.pending.insert(
                id,
                RemovalTicket {
                    seq,
                    token: token.clone(),
                },
            );

            debug!(line_id = %id, index, delay_ms = self.inner.removal_delay.as_millis() as u64, "Removal scheduled");
            self.publish(StoreEvent::RemovalScheduled { id });
            (id, seq, token)
        };

        let store = self.clone();
        let task_token = token.clone();
        let delay = self.inner.removal_delay;
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {}
            }
            store.settle_removal(id, seq, task_token.is_cancelled())
        });

        Ok(PendingRemoval::new(id, token, handle))
    }

    /// Cancels the pending removal of a line. Returns false if none is live.
    pub fn cancel_removal(&self, id: LineId) -> bool {
        let state = self.lock();
        match state.pending.get(&id) {
            Some(ticket) if !ticket.token.is_cancelled() => {
                ticket.token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Completes a deferred removal once its timer fired or it was cancelled.
    fn settle_removal(&self, id: LineId, seq: u64, cancelled: bool) -> RemovalOutcome {
        let mut state = self.lock();

        let owns_ticket = state.pending.get(&id).is_some_and(|t| t.seq == seq);
        if owns_ticket {
            state.pending.remove(&id);
        }

        if cancelled {
            if !owns_ticket && state.pending.contains_key(&id) {
                // A newer removal of the same line owns the flag now.
                return RemovalOutcome::Cancelled;
            }
            return match state.cart.clear_removing(id) {
                Ok(()) => {
                    debug!(line_id = %id, "Removal cancelled");
                    self.publish(StoreEvent::RemovalCancelled { id });
                    RemovalOutcome::Cancelled
                }
                Err(_) => RemovalOutcome::LineGone,
            };
        }

        match state.cart.remove_line_by_id(id) {
            Ok((index, line)) => {
                debug!(line_id = %id, index, product = %line.name, "Deferred removal fired");
                self.publish(StoreEvent::LineRemoved {
                    id,
                    name: line.name.clone(),
                });
                RemovalOutcome::Removed(line)
            }
            Err(_) => {
                debug!(line_id = %id, "Deferred removal found line already gone");
                RemovalOutcome::LineGone
            }
        }
    }

    // =========================================================================
    // Derived Queries
    // =========================================================================

    pub fn catalog_status(&self) -> CatalogStatus {
        self.with_cart(Cart::catalog_status)
    }

    pub fn catalog(&self) -> Vec<Product> {
        self.with_cart(|c| c.catalog().to_vec())
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.with_cart(|c| c.lines().to_vec())
    }

    pub fn cart_count(&self) -> u64 {
        self.with_cart(Cart::cart_count)
    }

    pub fn cart_total(&self) -> Money {
        self.with_cart(Cart::cart_total)
    }

    pub fn line_quantity(&self, index: usize) -> Option<u32> {
        self.with_cart(|c| c.line_quantity(index))
    }

    pub fn line_total(&self, index: usize) -> Option<Money> {
        self.with_cart(|c| c.line_total(index))
    }

    pub fn category_names(&self) -> BTreeSet<String> {
        self.with_cart(Cart::category_names)
    }

    pub fn find_line(&self, product_name: &str) -> Option<usize> {
        self.with_cart(|c| c.find_line(product_name))
    }

    pub fn quantity_of(&self, product_name: &str) -> Option<u32> {
        self.with_cart(|c| c.quantity_of(product_name))
    }

    pub fn products_in_category(&self, category: &str) -> Vec<Product> {
        self.with_cart(|c| c.products_in_category(category).into_iter().cloned().collect())
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<Product> {
        self.with_cart(|c| c.product_by_slug(slug).cloned())
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(&CartSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticCatalog;
    use tokio::sync::broadcast::error::TryRecvError;

    fn product(name: &str, cents: i64) -> Product {
        Product::new(name, "Milks", Money::from_cents(cents))
    }

    fn milk() -> Product {
        product("Cow's Milk 500ml", 5000)
    }

    fn store_with(names: &[&str]) -> CartStore {
        let store = CartStore::default();
        for name in names {
            store.add_to_cart(&product(name, 1000)).unwrap();
        }
        store
    }

    fn names(store: &CartStore) -> Vec<String> {
        store.lines().into_iter().map(|l| l.name).collect()
    }

    struct FailingCatalog;

    impl CatalogSource for FailingCatalog {
        async fn fetch(&self) -> StoreResult<Vec<Product>> {
            Err(StoreError::CatalogSource("connection refused".into()))
        }

        fn describe(&self) -> String {
            "failing catalog".into()
        }
    }

    #[test]
    fn test_add_then_add_again() {
        let store = CartStore::default();

        store.add_to_cart(&milk()).unwrap();
        assert_eq!(store.cart_count(), 1);
        assert_eq!(store.cart_total().to_string(), "50.00");

        store.add_to_cart(&milk()).unwrap();
        assert_eq!(store.lines().len(), 1);
        assert_eq!(store.line_quantity(0), Some(2));
        assert_eq!(store.cart_total().to_string(), "100.00");
    }

    #[test]
    fn test_decrease_from_one_removes() {
        let store = store_with(&["a", "b"]);
        let change = store.change_quantity(0, Direction::Decrease).unwrap();

        assert!(matches!(change, QuantityChange::Removed(_)));
        assert_eq!(names(&store), vec!["b"]);
    }

    #[test]
    fn test_out_of_range_queries() {
        let store = store_with(&["a", "b"]);
        assert_eq!(store.line_quantity(99), None);
        assert_eq!(store.line_total(99), None);
        assert_eq!(store.find_line("missing"), None);
    }

    #[test]
    fn test_contract_violations_leave_state_alone() {
        let store = store_with(&["a"]);

        assert!(store.remove_line_immediate(3).unwrap_err().is_contract_violation());
        assert!(store.change_quantity(1, Direction::Increase).is_err());
        assert!(store.increment_existing_line("z").is_err());
        assert!(store.add_new_line(&product("a", 1000)).is_err());

        assert_eq!(names(&store), vec!["a"]);
        assert_eq!(store.cart_count(), 1);
    }

    #[test]
    fn test_events_follow_mutations() {
        let store = CartStore::default();
        let mut rx = store.subscribe();

        let id = store.add_to_cart(&milk()).unwrap().line_id();
        store.add_to_cart(&milk()).unwrap();
        store.change_quantity(0, Direction::Decrease).unwrap();
        store.remove_line_immediate(0).unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            StoreEvent::LineAdded {
                id,
                name: "Cow's Milk 500ml".into()
            }
        );
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::QuantityChanged { id, quantity: 2 });
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::QuantityChanged { id, quantity: 1 });
        assert!(matches!(rx.try_recv().unwrap(), StoreEvent::LineRemoved { .. }));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_rejected_operation_publishes_nothing() {
        let store = CartStore::default();
        let mut rx = store.subscribe();

        assert!(store.remove_line_immediate(0).is_err());
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_snapshot() {
        let store = store_with(&["a", "a", "b"]);
        let snapshot = store.snapshot();

        assert_eq!(snapshot.lines.len(), 2);
        assert_eq!(snapshot.cart_count, 3);
        assert_eq!(snapshot.cart_total, Money::from_cents(3000));
        assert_eq!(snapshot.catalog_status, CatalogStatus::Loading);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["cartCount"], 3);
        assert_eq!(json["catalogStatus"], "loading");
    }

    #[tokio::test]
    async fn test_retrieve_products_ready() {
        let store = CartStore::default();
        let mut rx = store.subscribe();

        let status = store.retrieve_products(&StaticCatalog::dairy()).await.unwrap();

        assert_eq!(status, CatalogStatus::Ready);
        assert_eq!(store.catalog().len(), 5);
        let categories: Vec<String> = store.category_names().into_iter().collect();
        assert_eq!(categories, vec!["ghee", "milks", "paneer", "yogurt"]);
        assert_eq!(rx.try_recv().unwrap(), StoreEvent::CatalogLoaded { products: 5 });

        assert_eq!(store.products_in_category("milks").len(), 2);
        assert_eq!(
            store.product_by_slug("cow's-paneer-1kg").map(|p| p.price),
            Some(Money::from_cents(95000))
        );
    }

    #[tokio::test]
    async fn test_retrieve_products_failure_is_absorbed() {
        let store = store_with(&["a"]);
        let mut rx = store.subscribe();

        let status = store.retrieve_products(&FailingCatalog).await.unwrap();

        assert_eq!(status, CatalogStatus::Failed);
        assert!(store.catalog().is_empty());
        assert_eq!(names(&store), vec!["a"]);
        assert!(store
            .snapshot()
            .last_catalog_error
            .unwrap()
            .contains("connection refused"));
        assert!(matches!(rx.try_recv().unwrap(), StoreEvent::CatalogFailed { .. }));
    }

    #[tokio::test]
    async fn test_invalid_catalog_fails_load() {
        let store = CartStore::default();
        let source = StaticCatalog::new(vec![milk(), milk()]);

        let status = store.retrieve_products(&source).await.unwrap();
        assert_eq!(status, CatalogStatus::Failed);
    }

    #[tokio::test]
    async fn test_catalog_settles_once() {
        let store = CartStore::default();
        store.retrieve_products(&StaticCatalog::dairy()).await.unwrap();

        let err = store.retrieve_products(&FailingCatalog).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::CatalogAlreadySettled { .. })
        ));
        assert_eq!(store.catalog_status(), CatalogStatus::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_removal_marks_then_removes() {
        let store = store_with(&["a", "b", "c"]);
        let b = store.lines()[1].id;

        let pending = store.remove_line_with_delay(1).unwrap();
        assert_eq!(pending.line_id(), b);
        assert!(store.lines()[1].is_removing);

        // Let the timer task register its sleep, then stop just short of it.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(699)).await;
        assert_eq!(names(&store), vec!["a", "b", "c"]);

        match pending.completed().await.unwrap() {
            RemovalOutcome::Removed(line) => assert_eq!(line.id, b),
            other => panic!("expected removal, got {:?}", other),
        }
        assert_eq!(names(&store), vec!["a", "c"]);
        assert!(store.lines().iter().all(|l| !l.is_removing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_removal_survives_index_shift() {
        let store = store_with(&["a", "b", "c"]);

        let pending = store.remove_line_with_delay(2).unwrap();
        store.remove_line_immediate(0).unwrap();

        let outcome = pending.completed().await.unwrap();

        assert!(matches!(outcome, RemovalOutcome::Removed(ref line) if line.name == "c"));
        assert_eq!(names(&store), vec!["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_removal_keeps_line() {
        let store = store_with(&["a", "b"]);
        let mut rx = store.subscribe();

        let pending = store.remove_line_with_delay(0).unwrap();
        pending.cancel();
        assert!(pending.is_cancelled());

        assert_eq!(pending.completed().await.unwrap(), RemovalOutcome::Cancelled);
        assert_eq!(names(&store), vec!["a", "b"]);
        assert!(!store.lines()[0].is_removing);

        assert!(matches!(rx.try_recv().unwrap(), StoreEvent::RemovalScheduled { .. }));
        assert!(matches!(rx.try_recv().unwrap(), StoreEvent::RemovalCancelled { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_removal_by_other_route_cancels_timer() {
        let store = store_with(&["a", "b"]);

        let pending = store.remove_line_with_delay(0).unwrap();
        store.change_quantity(0, Direction::Decrease).unwrap();

        assert!(pending.is_cancelled());
        assert_eq!(pending.completed().await.unwrap(), RemovalOutcome::LineGone);
        assert_eq!(names(&store), vec!["b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_removal_of_same_line_rejected() {
        let store = store_with(&["a"]);

        let first = store.remove_line_with_delay(0).unwrap();
        let err = store.remove_line_with_delay(0).unwrap_err();
        assert!(matches!(err, StoreError::RemovalAlreadyPending(id) if id == first.line_id()));

        assert!(matches!(first.completed().await.unwrap(), RemovalOutcome::Removed(_)));
        assert!(store.lines().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_removal_by_id() {
        let store = store_with(&["a"]);
        let pending = store.remove_line_with_delay(0).unwrap();

        assert!(store.cancel_removal(pending.line_id()));
        assert!(!store.cancel_removal(pending.line_id()));
        assert_eq!(pending.completed().await.unwrap(), RemovalOutcome::Cancelled);
        assert!(!store.cancel_removal(LineId::new()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_after_cancel() {
        let store = store_with(&["a"]);

        let first = store.remove_line_with_delay(0).unwrap();
        first.cancel();
        let second = store.remove_line_with_delay(0).unwrap();

        assert_eq!(first.completed().await.unwrap(), RemovalOutcome::Cancelled);
        assert!(store.lines()[0].is_removing);
        assert!(matches!(second.completed().await.unwrap(), RemovalOutcome::Removed(_)));
        assert!(store.lines().is_empty());
    }

    #[tokio::test]
    async fn test_removal_out_of_range() {
        let store = store_with(&["a"]);
        let err = store.remove_line_with_delay(4).unwrap_err();
        assert!(err.is_contract_violation());
        assert!(!store.lines()[0].is_removing);
    }

    #[tokio::test]
    async fn test_store_clones_share_state() {
        let store = CartStore::default();
        let badge = store.clone();

        store.add_to_cart(&milk()).unwrap();
        assert_eq!(badge.cart_count(), 1);
    }
}
