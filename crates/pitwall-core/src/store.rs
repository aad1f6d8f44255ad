//! # State Store
//!
//! The single owner of [`AppState`] and the subscription registry.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  view ──► dispatch(action) ──► AppState::apply ──► Outcome             │
//! │                                                       │                 │
//! │                          Applied ◄────────────────────┤                 │
//! │                             │                         └──► Ignored     │
//! │                             ▼                              (silent)    │
//! │                    revision += 1                                        │
//! │                             │                                           │
//! │                             ▼                                           │
//! │              listeners[0](&state), listeners[1](&state), ...            │
//! │              (registration order, exactly once per operation)           │
//! │                             │                                           │
//! │                             ▼                                           │
//! │                     dispatch returns                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! Operations take `&mut self`, so they run to completion one at a time and
//! no listener ever sees a half-applied change. The registry sits behind
//! `Arc<Mutex<_>>` only so that a [`Subscription`] handle can detach itself
//! without holding a borrow of the store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, trace};

use crate::action::{Action, Outcome};
use crate::auth::{AuthField, AuthTrigger};
use crate::cart::CartTotals;
use crate::error::CoreResult;
use crate::money::Money;
use crate::state::{AppState, StatePatch};
use crate::types::{PageId, Product};

/// A subscriber callback. Receives the snapshot after each mutation.
pub type Listener = Box<dyn FnMut(&AppState) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // A listener that panicked leaves the list itself intact.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by [`StateStore::subscribe`].
///
/// Dropping the handle does NOT unsubscribe; call
/// [`Subscription::unsubscribe`]. Listeners must not unsubscribe themselves
/// from inside a notification.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Removes the listener. Returns `false` if the store is gone or the
    /// listener was already removed.
    pub fn unsubscribe(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };

        let mut registry = lock(&registry);
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        let removed = registry.listeners.len() != before;
        if removed {
            debug!(subscription = self.id, "listener unsubscribed");
        }
        removed
    }
}

/// The application state store.
pub struct StateStore {
    state: AppState,
    registry: Arc<Mutex<Registry>>,
    revision: u64,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("state", &self.state)
            .field("listeners", &self.listener_count())
            .field("revision", &self.revision)
            .finish()
    }
}

impl StateStore {
    pub fn new(state: AppState) -> Self {
        StateStore {
            state,
            registry: Arc::new(Mutex::new(Registry::default())),
            revision: 0,
        }
    }

    /// A store over the launch catalog with everything else at defaults.
    pub fn seeded() -> CoreResult<Self> {
        Ok(StateStore::new(AppState::seeded()?))
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// The current snapshot.
    pub fn get(&self) -> &AppState {
        &self.state
    }

    /// Number of applied mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }

    pub fn compute_subtotal(&self) -> Money {
        self.state.compute_subtotal()
    }

    pub fn cart_item_count(&self) -> i64 {
        self.state.cart_item_count()
    }

    pub fn cart_totals(&self) -> CartTotals {
        self.state.cart_totals()
    }

    pub fn visible_products(&self) -> Vec<&Product> {
        self.state.visible_products()
    }

    // =========================================================================
    // Subscribing
    // =========================================================================

    /// Registers `listener`. It runs after every applied mutation, after the
    /// listeners registered before it.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&AppState) + Send + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        debug!(subscription = id, listeners = registry.listeners.len(), "listener subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    // =========================================================================
    // Mutating
    // =========================================================================

    /// Applies one action; notifies once if it changed anything.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        trace!(?action, "dispatch");
        let outcome = self.state.apply(action);
        if outcome.is_applied() {
            self.commit();
        }
        outcome
    }

    /// Applies a partial update; notifies once unless the patch is empty.
    pub fn set(&mut self, patch: StatePatch) -> Outcome {
        let outcome = self.state.apply_patch(patch);
        if outcome.is_applied() {
            self.commit();
        }
        outcome
    }

    /// Runs `f` as one logical operation and notifies once afterwards,
    /// however many fields it touched.
    pub fn update<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut AppState) -> R,
    {
        let result = f(&mut self.state);
        self.commit();
        result
    }

    fn commit(&mut self) {
        self.revision += 1;
        let mut registry = lock(&self.registry);
        trace!(revision = self.revision, listeners = registry.listeners.len(), "notify");
        for (_, listener) in registry.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    // =========================================================================
    // Action API
    // =========================================================================

    pub fn navigate_to(&mut self, page: PageId) -> Outcome {
        self.dispatch(Action::NavigateTo { page })
    }

    pub fn add_to_cart(&mut self, product: Product) -> Outcome {
        self.dispatch(Action::AddToCart { product })
    }

    pub fn update_quantity(&mut self, item_id: &str, new_quantity: i64) -> Outcome {
        self.dispatch(Action::UpdateQuantity {
            item_id: item_id.to_string(),
            quantity: new_quantity,
        })
    }

    pub fn remove_from_cart(&mut self, item_id: &str) -> Outcome {
        self.dispatch(Action::RemoveFromCart {
            item_id: item_id.to_string(),
        })
    }

    pub fn clear_cart(&mut self) -> Outcome {
        self.dispatch(Action::ClearCart)
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> Outcome {
        self.dispatch(Action::SetSearchQuery {
            query: query.into(),
        })
    }

    pub fn set_auth_field(&mut self, field: AuthField, value: impl Into<String>) -> Outcome {
        self.dispatch(Action::SetAuthField {
            field,
            value: value.into(),
        })
    }

    pub fn advance_auth_step(&mut self, trigger: AuthTrigger) -> Outcome {
        self.dispatch(Action::AdvanceAuthStep { trigger })
    }

    pub fn select_product(&mut self, product: Product) -> Outcome {
        self.dispatch(Action::SelectProduct { product })
    }

    pub fn open_category(&mut self, category_id: &str) -> Outcome {
        self.dispatch(Action::OpenCategory {
            category_id: category_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(store: &StateStore) -> (Arc<AtomicUsize>, Subscription) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let sub = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (calls, sub)
    }

    fn tee(store: &StateStore, id: &str) -> Product {
        store.get().find_product(id).cloned().unwrap()
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let store = StateStore::seeded().unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let order = Arc::clone(&order);
            store.subscribe(move |_| order.lock().unwrap().push(n));
        }

        let mut store = store;
        store.navigate_to(PageId::Cart);

        assert_eq!(*order.lock().unwrap(), [0, 1, 2]);
    }

    #[test]
    fn test_listener_sees_new_snapshot() {
        let mut store = StateStore::seeded().unwrap();
        let pages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pages);
        store.subscribe(move |state| sink.lock().unwrap().push(state.current_page));

        store.navigate_to(PageId::Auth);
        store.navigate_to(PageId::Home);

        assert_eq!(*pages.lock().unwrap(), [PageId::Auth, PageId::Home]);
    }

    #[test]
    fn test_multi_field_operation_notifies_once() {
        let mut store = StateStore::seeded().unwrap();
        let (calls, _sub) = counting(&store);
        let product = tee(&store, "tee-2");

        store.select_product(product);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.set(
            StatePatch::new()
                .current_page(PageId::Category)
                .search_query("racing")
                .current_product(None),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        store.update(|state| {
            state.search_query.clear();
            state.current_page = PageId::Home;
        });
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_ignored_action_does_not_notify() {
        let mut store = StateStore::seeded().unwrap();
        let (calls, _sub) = counting(&store);

        assert_eq!(store.update_quantity("nope", 2), Outcome::Ignored);
        assert_eq!(store.advance_auth_step(AuthTrigger::SendOtp), Outcome::Ignored);
        assert_eq!(store.set(StatePatch::new()), Outcome::Ignored);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = StateStore::seeded().unwrap();
        let (calls, sub) = counting(&store);

        store.set_search_query("tee");
        assert!(sub.unsubscribe());
        store.set_search_query("cap");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped() {
        let store = StateStore::seeded().unwrap();
        let (_calls, sub) = counting(&store);
        drop(store);

        assert!(!sub.unsubscribe());
    }

    #[test]
    fn test_cart_reads_recompute() {
        let mut store = StateStore::seeded().unwrap();
        let tee1 = tee(&store, "tee-1");
        let tee2 = tee(&store, "tee-2");

        store.add_to_cart(tee1);
        store.add_to_cart(tee2.clone());
        store.add_to_cart(tee2);
        assert_eq!(store.compute_subtotal().cents(), 12997);

        store.update_quantity("tee-2", 1);
        assert_eq!(store.compute_subtotal().cents(), 8498);
        assert_eq!(store.cart_item_count(), 2);
    }
}
