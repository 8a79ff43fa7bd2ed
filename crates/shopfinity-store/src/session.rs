//! # Session & Cart Store
//!
//! Owns the signed-in user, their cart and their order history, and keeps
//! all three mirrored into storage.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SessionStore::new(storage)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  restore_session() ──► currentUser? ──no──► Anonymous                  │
//! │       │                     │ malformed ──► Recovered { key }           │
//! │       │                     ▼ yes                                       │
//! │       │               load cart_<id>, orders_<id> ──► Restored(user)   │
//! │       ▼                                                                 │
//! │  login(user) ───► flush previous user ─► load records ─► currentUser   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_to_cart / update_quantity / remove_from_cart / checkout           │
//! │       │            (each persists before it commits)                   │
//! │       ▼                                                                 │
//! │  logout() ───► write cart + orders ─► erase currentUser ─► clear memory│
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write-Before-Commit
//! Every mutation builds the next state on a copy, writes it, and only then
//! swaps it in. A failed write returns the error with the session exactly as
//! it was.
//!
//! ## Checkout Atomicity
//! The cleared cart and the extended history go out in one
//! [`Storage::set_many`] call, so storage never holds one without the other.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use shopfinity_core::{
    AddOutcome, Cart, CoreError, Order, OrderHistory, OrderIdGenerator, OrderTotals, ProductId,
    ProductRecord, QuantityChange, ShippingPolicy, User,
};

use crate::auth::AccountDirectory;
use crate::error::{StoreError, StoreResult};
use crate::repository::{
    cart_key, orders_key, CartRepository, OrderRepository, SessionRepository, CURRENT_USER_KEY,
};
use crate::storage::Storage;

// =============================================================================
// Restore Outcome
// =============================================================================

/// What [`SessionStore::restore_session`] found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RestoreOutcome {
    /// A user was signed in and their records loaded.
    Restored { user: User },

    /// Nobody was signed in.
    Anonymous,

    /// A record was malformed. It was removed along with `currentUser`, and
    /// the session starts signed out.
    Recovered { key: String },
}

// =============================================================================
// Session Store
// =============================================================================

/// The session and cart store.
///
/// ## Usage
/// ```rust
/// use shopfinity_store::{MemoryStorage, SessionStore};
///
/// let mut store = SessionStore::new(MemoryStorage::new());
/// store.restore_session();
/// assert!(store.auth_checked());
/// assert!(!store.is_authenticated());
/// ```
#[derive(Debug)]
pub struct SessionStore<S: Storage> {
    storage: S,
    policy: ShippingPolicy,
    current_user: Option<User>,
    cart: Cart,
    history: OrderHistory,
    auth_checked: bool,
    order_ids: OrderIdGenerator,
}

impl<S: Storage> SessionStore<S> {
    /// Creates a signed-out store with the default shipping policy.
    ///
    /// Call [`SessionStore::restore_session`] before serving anything.
    pub fn new(storage: S) -> Self {
        Self::with_policy(storage, ShippingPolicy::default())
    }

    pub fn with_policy(storage: S, policy: ShippingPolicy) -> Self {
        SessionStore {
            storage,
            policy,
            current_user: None,
            cart: Cart::new(),
            history: OrderHistory::new(),
            auth_checked: false,
            order_ids: OrderIdGenerator::new(),
        }
    }

    // =========================================================================
    // Session Transitions
    // =========================================================================

    /// Picks up the session persisted by a previous run.
    ///
    /// Never fails: a malformed record is logged, removed together with
    /// `currentUser`, and the session starts signed out.
    pub fn restore_session(&mut self) -> RestoreOutcome {
        let outcome = self.try_restore();
        self.auth_checked = true;
        outcome
    }

    fn try_restore(&mut self) -> RestoreOutcome {
        let user = match SessionRepository::load(&self.storage) {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("No persisted session");
                self.reset_memory();
                return RestoreOutcome::Anonymous;
            }
            Err(err) => return self.abandon_restore(CURRENT_USER_KEY.to_string(), err),
        };

        let cart = match CartRepository::load(&self.storage, &user.id) {
            Ok(cart) => cart,
            Err(err) => return self.abandon_restore(cart_key(&user.id), err),
        };

        let history = match OrderRepository::load(&self.storage, &user.id) {
            Ok(history) => history,
            Err(err) => return self.abandon_restore(orders_key(&user.id), err),
        };

        info!(
            user_id = %user.id,
            cart_lines = cart.item_count(),
            orders = history.len(),
            "Session restored"
        );

        self.order_ids.observe(&history);
        self.current_user = Some(user.clone());
        self.cart = cart;
        self.history = history;

        RestoreOutcome::Restored { user }
    }

    fn abandon_restore(&mut self, key: String, err: StoreError) -> RestoreOutcome {
        warn!(key = %key, error = %err, "Discarding unreadable session record");

        if let Err(e) = SessionRepository::clear(&mut self.storage) {
            warn!(error = %e, "Failed to erase currentUser");
        }
        if key != CURRENT_USER_KEY {
            if let Err(e) = self.storage.remove(&key) {
                warn!(key = %key, error = %e, "Failed to remove unreadable record");
            }
        }

        self.reset_memory();
        RestoreOutcome::Recovered { key }
    }

    /// Signs `user` in and loads their cart and order history.
    ///
    /// Credentials are not checked here. If someone else is signed in, their
    /// state is flushed first.
    pub fn login(&mut self, user: User) -> StoreResult<()> {
        if let Some(previous) = &self.current_user {
            debug!(previous = %previous.id, next = %user.id, "Flushing active session before login");
            self.flush()?;
        }

        let cart = self.load_or_reset(cart_key(&user.id), |s| CartRepository::load(s, &user.id))?;
        let history =
            self.load_or_reset(orders_key(&user.id), |s| OrderRepository::load(s, &user.id))?;

        SessionRepository::save(&mut self.storage, &user)?;

        info!(
            user_id = %user.id,
            cart_lines = cart.item_count(),
            orders = history.len(),
            "User logged in"
        );

        self.order_ids.observe(&history);
        self.current_user = Some(user);
        self.cart = cart;
        self.history = history;
        Ok(())
    }

    /// Loads a per-user record; a malformed one is removed and replaced
    /// with the empty value.
    fn load_or_reset<T, F>(&mut self, key: String, load: F) -> StoreResult<T>
    where
        T: Default,
        F: FnOnce(&S) -> StoreResult<T>,
    {
        match load(&self.storage) {
            Err(StoreError::PersistenceRead { reason, .. }) => {
                warn!(key = %key, reason = %reason, "Resetting malformed record");
                self.storage.remove(&key)?;
                Ok(T::default())
            }
            other => other,
        }
    }

    /// Signs out. Cart and orders are written first, then dropped from
    /// memory; the per-user records stay in storage.
    ///
    /// No-op when nobody is signed in.
    pub fn logout(&mut self) -> StoreResult<()> {
        let user_id = match &self.current_user {
            Some(user) => user.id.clone(),
            None => {
                debug!("Logout with no active user");
                return Ok(());
            }
        };

        self.flush()?;
        SessionRepository::clear(&mut self.storage)?;

        self.reset_memory();
        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Replaces the active user's record (after a profile edit).
    pub fn replace_current_user(&mut self, user: User) -> StoreResult<()> {
        let active = self.active_user_id()?;
        if active != user.id {
            return Err(StoreError::UserMismatch {
                active,
                requested: user.id,
            });
        }

        SessionRepository::save(&mut self.storage, &user)?;
        debug!(user_id = %user.id, "Current user record replaced");
        self.current_user = Some(user);
        Ok(())
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of `product` to the cart.
    pub fn add_to_cart(&mut self, product: &ProductRecord) -> StoreResult<AddOutcome> {
        let user_id = self.active_user_id()?;

        let mut next = self.cart.clone();
        let outcome = next.add_product(product)?;
        CartRepository::save(&mut self.storage, &user_id, &next)?;

        debug!(user_id = %user_id, product_id = %product.id, ?outcome, "Added to cart");
        self.cart = next;
        Ok(outcome)
    }

    /// Sets a line's quantity. `0` removes the line; negative is rejected.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> StoreResult<QuantityChange> {
        let user_id = self.active_user_id()?;

        let mut next = self.cart.clone();
        let change = next.set_quantity(product_id, quantity)?;
        if change.changed() {
            CartRepository::save(&mut self.storage, &user_id, &next)?;
            self.cart = next;
        }

        debug!(user_id = %user_id, product_id = %product_id, quantity, ?change, "Quantity updated");
        Ok(change)
    }

    /// Removes a line. Returns whether anything was removed.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> StoreResult<bool> {
        let user_id = self.active_user_id()?;

        let mut next = self.cart.clone();
        let removed = next.remove(product_id);
        if removed {
            CartRepository::save(&mut self.storage, &user_id, &next)?;
            self.cart = next;
        }

        debug!(user_id = %user_id, product_id = %product_id, removed, "Removed from cart");
        Ok(removed)
    }

    /// Turns the cart into an order.
    ///
    /// ## Steps
    /// 1. Require a user and a non-empty cart
    /// 2. Snapshot the lines into a `Processing` order with a fresh id
    /// 3. Write the empty cart and the extended history in one call
    /// 4. Commit both to memory and return the order
    pub fn checkout(&mut self) -> StoreResult<Order> {
        let user_id = self.active_user_id()?;
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let mut order_ids = self.order_ids.clone();
        let now = Utc::now();
        let order = Order::from_cart(order_ids.next_id(now), &self.cart, &self.policy, now);

        let mut history = self.history.clone();
        history.prepend(order.clone());
        let cart = Cart::new();

        let entries = vec![
            CartRepository::entry(&user_id, &cart)?,
            OrderRepository::entry(&user_id, &history)?,
        ];
        self.storage.set_many(&entries)?;

        info!(
            user_id = %user_id,
            order_id = %order.id,
            items = order.item_count(),
            total = %order.total,
            "Order placed"
        );

        self.order_ids = order_ids;
        self.cart = cart;
        self.history = history;
        Ok(order)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Whether `restore_session` has run.
    pub fn auth_checked(&self) -> bool {
        self.auth_checked
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn order_history(&self) -> &OrderHistory {
        &self.history
    }

    /// Σ quantities (the header badge).
    pub fn cart_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Totals the cart would check out at.
    pub fn cart_totals(&self) -> OrderTotals {
        self.cart.totals(&self.policy)
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.policy
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Account directory over the same storage.
    pub fn accounts(&mut self) -> AccountDirectory<'_, S> {
        AccountDirectory::new(&mut self.storage)
    }

    /// Flushes the active user's records (staying signed in) and hands the
    /// storage back.
    pub fn close(mut self) -> StoreResult<S> {
        self.flush()?;
        debug!("Session store closed");
        Ok(self.storage)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn active_user_id(&self) -> StoreResult<String> {
        self.current_user
            .as_ref()
            .map(|u| u.id.clone())
            .ok_or_else(|| CoreError::NotAuthenticated.into())
    }

    /// Writes the active user's cart and history together.
    fn flush(&mut self) -> StoreResult<()> {
        if let Some(user) = &self.current_user {
            let entries = vec![
                CartRepository::entry(&user.id, &self.cart)?,
                OrderRepository::entry(&user.id, &self.history)?,
            ];
            self.storage.set_many(&entries)?;
            debug!(user_id = %user.id, "Session flushed");
        }
        Ok(())
    }

    fn reset_memory(&mut self) {
        self.current_user = None;
        self.cart = Cart::new();
        self.history = OrderHistory::new();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStorage;
    use shopfinity_core::{Money, OrderStatus};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Memory storage whose writes can be switched off.
    #[derive(Debug, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        failing: Rc<Cell<bool>>,
    }

    impl FlakyStorage {
        fn check(&self) -> StorageResult<()> {
            if self.failing.get() {
                Err(StorageError::Unavailable("quota exceeded".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
            self.check()?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> StorageResult<()> {
            self.check()?;
            self.inner.remove(key)
        }

        fn keys(&self) -> Vec<String> {
            self.inner.keys()
        }
    }

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("User {}", id),
            email: format!("{}@example.test", id),
            phone: None,
            address: None,
            date_of_birth: None,
            created_at: Utc::now(),
        }
    }

    fn product(id: u64, cents: i64) -> ProductRecord {
        ProductRecord {
            id: ProductId(id),
            title: format!("Product {}", id),
            price: Money::from_cents(cents),
            image: format!("https://example.test/{}.jpg", id),
            description: String::new(),
            category: "electronics".to_string(),
            rating: None,
        }
    }

    fn signed_in(id: &str) -> SessionStore<MemoryStorage> {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore_session();
        store.login(user(id)).unwrap();
        store
    }

    fn quantities(store: &SessionStore<impl Storage>) -> Vec<(u64, u32)> {
        store.cart().lines().iter().map(|l| (l.id.0, l.quantity)).collect()
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    #[test]
    fn test_repeated_add_makes_one_line() {
        let mut store = signed_in("u1");
        let backpack = product(1, 10995);

        assert_eq!(store.add_to_cart(&backpack).unwrap(), AddOutcome::Created);
        assert_eq!(
            store.add_to_cart(&backpack).unwrap(),
            AddOutcome::Incremented { quantity: 2 }
        );
        store.add_to_cart(&backpack).unwrap();

        assert_eq!(quantities(&store), vec![(1, 3)]);
        assert_eq!(store.cart_count(), 3);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let mut a = signed_in("u1");
        let mut b = signed_in("u1");
        for store in [&mut a, &mut b] {
            store.add_to_cart(&product(1, 500)).unwrap();
            store.add_to_cart(&product(2, 700)).unwrap();
        }

        assert_eq!(a.update_quantity(ProductId(1), 0).unwrap(), QuantityChange::Removed);
        assert!(b.remove_from_cart(ProductId(1)).unwrap());

        assert_eq!(a.cart(), b.cart());
        assert_eq!(
            a.storage().get("cart_u1"),
            b.storage().get("cart_u1")
        );
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 500)).unwrap();
        let before = store.cart().clone();

        let err = store.update_quantity(ProductId(1), -1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidQuantity { requested: -1 })
        ));
        assert_eq!(store.cart(), &before);
    }

    #[test]
    fn test_quantity_past_cart_ceiling_is_rejected() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 5_000_000_000)).unwrap();
        let before = store.cart().clone();

        let err = store.update_quantity(ProductId(1), 4_000_000_000).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InvalidQuantity {
                requested: 4_000_000_000
            })
        ));

        assert_eq!(store.cart(), &before);
        assert_eq!(CartRepository::load(store.storage(), "u1").unwrap(), before);
        assert_eq!(store.cart_totals().subtotal.cents(), 5_000_000_000);
        assert_eq!(store.checkout().unwrap().subtotal.cents(), 5_000_000_000);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut store = signed_in("u1");

        let err = store.add_to_cart(&product(1, -50_000)).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Validation(_))));
        assert!(store.cart().is_empty());
        assert!(matches!(
            store.checkout().unwrap_err(),
            StoreError::Core(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_update_and_remove_unknown_product_are_noops() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 500)).unwrap();

        assert_eq!(
            store.update_quantity(ProductId(9), 4).unwrap(),
            QuantityChange::NotInCart
        );
        assert!(!store.remove_from_cart(ProductId(9)).unwrap());
        assert_eq!(quantities(&store), vec![(1, 1)]);
    }

    #[test]
    fn test_update_quantity_overwrites_and_persists() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 500)).unwrap();

        store.update_quantity(ProductId(1), 5).unwrap();
        assert_eq!(quantities(&store), vec![(1, 5)]);

        let stored = CartRepository::load(store.storage(), "u1").unwrap();
        assert_eq!(&stored, store.cart());
    }

    #[test]
    fn test_cart_operations_require_user() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore_session();

        let err = store.add_to_cart(&product(1, 500)).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::NotAuthenticated)));
        assert!(store.cart().is_empty());

        assert!(matches!(
            store.update_quantity(ProductId(1), 2),
            Err(StoreError::Core(CoreError::NotAuthenticated))
        ));
        assert!(matches!(
            store.remove_from_cart(ProductId(1)),
            Err(StoreError::Core(CoreError::NotAuthenticated))
        ));
        assert!(matches!(
            store.checkout(),
            Err(StoreError::Core(CoreError::NotAuthenticated))
        ));
        assert!(store.storage().keys().is_empty());
    }

    // -------------------------------------------------------------------------
    // Checkout
    // -------------------------------------------------------------------------

    #[test]
    fn test_checkout_free_shipping() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 5000)).unwrap();
        store.add_to_cart(&product(2, 6000)).unwrap();

        let order = store.checkout().unwrap();

        assert_eq!(order.subtotal.cents(), 11000);
        assert_eq!(order.shipping.cents(), 0);
        assert_eq!(order.total.cents(), 11000);
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(store.cart().is_empty());
        assert_eq!(store.order_history().latest(), Some(&order));

        let stored_cart = CartRepository::load(store.storage(), "u1").unwrap();
        let stored_orders = OrderRepository::load(store.storage(), "u1").unwrap();
        assert!(stored_cart.is_empty());
        assert_eq!(stored_orders.orders()[0], order);
    }

    #[test]
    fn test_checkout_totals_match_preview() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 6000)).unwrap();
        store.add_to_cart(&product(1, 6000)).unwrap();
        let preview = store.cart_totals();
        assert_eq!(
            (preview.subtotal.cents(), preview.shipping.cents(), preview.total.cents()),
            (12000, 0, 12000)
        );
        assert_eq!(store.checkout().unwrap().totals(), preview);

        store.add_to_cart(&product(2, 3000)).unwrap();
        let order = store.checkout().unwrap();
        assert_eq!(
            (order.subtotal.cents(), order.shipping.cents(), order.total.cents()),
            (3000, 1000, 4000)
        );
    }

    #[test]
    fn test_checkout_empty_cart_is_rejected() {
        let mut store = signed_in("u1");
        let err = store.checkout().unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::EmptyCart)));
        assert!(store.order_history().is_empty());
    }

    #[test]
    fn test_newest_order_first_and_ids_increase() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 500)).unwrap();
        let first = store.checkout().unwrap();
        store.add_to_cart(&product(2, 500)).unwrap();
        let second = store.checkout().unwrap();

        let ids: Vec<&str> = store.order_history().orders().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);

        let first: i64 = first.id.parse().unwrap();
        let second: i64 = second.id.parse().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_failed_checkout_write_changes_nothing() {
        let failing = Rc::new(Cell::new(false));
        let storage = FlakyStorage {
            inner: MemoryStorage::new(),
            failing: Rc::clone(&failing),
        };
        let mut store = SessionStore::new(storage);
        store.restore_session();
        store.login(user("u1")).unwrap();
        store.add_to_cart(&product(1, 5000)).unwrap();

        failing.set(true);
        let err = store.checkout().unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(quantities(&store), vec![(1, 1)]);
        assert!(store.order_history().is_empty());

        let err = store.add_to_cart(&product(2, 100)).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(quantities(&store), vec![(1, 1)]);

        failing.set(false);
        let stored = CartRepository::load(store.storage(), "u1").unwrap();
        assert_eq!(stored.total_quantity(), 1);
        assert!(OrderRepository::load(store.storage(), "u1").unwrap().is_empty());
    }

    // -------------------------------------------------------------------------
    // Login / Logout
    // -------------------------------------------------------------------------

    #[test]
    fn test_logout_then_login_restores_state() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 5000)).unwrap();
        store.checkout().unwrap();
        store.add_to_cart(&product(2, 700)).unwrap();
        store.add_to_cart(&product(2, 700)).unwrap();

        let cart = store.cart().clone();
        let history = store.order_history().clone();

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(store.cart().is_empty());
        assert!(store.order_history().is_empty());
        assert!(store.storage().get(CURRENT_USER_KEY).is_none());
        assert!(store.storage().get("cart_u1").is_some());

        store.login(user("u1")).unwrap();
        assert_eq!(store.cart(), &cart);
        assert_eq!(store.order_history(), &history);
    }

    #[test]
    fn test_logout_without_user_is_noop() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore_session();
        store.logout().unwrap();
        assert!(store.storage().keys().is_empty());
    }

    #[test]
    fn test_failed_logout_keeps_session() {
        let failing = Rc::new(Cell::new(false));
        let mut store = SessionStore::new(FlakyStorage {
            inner: MemoryStorage::new(),
            failing: Rc::clone(&failing),
        });
        store.login(user("u1")).unwrap();
        store.add_to_cart(&product(1, 500)).unwrap();

        failing.set(true);
        assert!(store.logout().is_err());
        assert!(store.is_authenticated());
        assert_eq!(quantities(&store), vec![(1, 1)]);
    }

    #[test]
    fn test_two_users_keep_separate_carts() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.restore_session();

        store.login(user("alice")).unwrap();
        store.add_to_cart(&product(1, 500)).unwrap();
        store.logout().unwrap();

        store.login(user("bob")).unwrap();
        assert!(store.cart().is_empty());
        store.add_to_cart(&product(2, 700)).unwrap();
        store.add_to_cart(&product(2, 700)).unwrap();
        store.logout().unwrap();

        let alice = CartRepository::load(store.storage(), "alice").unwrap();
        let bob = CartRepository::load(store.storage(), "bob").unwrap();
        assert_eq!(alice.lines()[0].id, ProductId(1));
        assert_eq!(alice.total_quantity(), 1);
        assert_eq!(bob.lines()[0].id, ProductId(2));
        assert_eq!(bob.total_quantity(), 2);
    }

    #[test]
    fn test_login_over_active_user_flushes_previous() {
        let mut store = signed_in("alice");
        store.add_to_cart(&product(1, 500)).unwrap();

        store.login(user("bob")).unwrap();
        assert_eq!(store.current_user().map(|u| u.id.as_str()), Some("bob"));
        assert!(store.cart().is_empty());

        let alice = CartRepository::load(store.storage(), "alice").unwrap();
        assert_eq!(alice.total_quantity(), 1);
    }

    #[test]
    fn test_login_resets_malformed_cart() {
        let mut storage = MemoryStorage::new();
        storage.set("cart_u1", "not a cart").unwrap();
        storage.set("orders_u1", "[]").unwrap();

        let mut store = SessionStore::new(storage);
        store.login(user("u1")).unwrap();

        assert!(store.is_authenticated());
        assert!(store.cart().is_empty());
        assert!(store.storage().get("cart_u1").is_none());
    }

    #[test]
    fn test_replace_current_user() {
        let mut store = signed_in("u1");
        let mut edited = user("u1");
        edited.name = "Renamed".to_string();

        store.replace_current_user(edited.clone()).unwrap();
        assert_eq!(store.current_user(), Some(&edited));
        assert_eq!(SessionRepository::load(store.storage()).unwrap(), Some(edited));

        let err = store.replace_current_user(user("u2")).unwrap_err();
        assert!(matches!(err, StoreError::UserMismatch { .. }));
    }

    // -------------------------------------------------------------------------
    // Restore
    // -------------------------------------------------------------------------

    #[test]
    fn test_reload_restores_user_cart_and_history() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 5000)).unwrap();
        let order = store.checkout().unwrap();
        store.add_to_cart(&product(3, 1200)).unwrap();
        let cart = store.cart().clone();

        let storage = store.close().unwrap();

        let mut reloaded = SessionStore::new(storage);
        assert!(!reloaded.auth_checked());
        let outcome = reloaded.restore_session();

        assert_eq!(outcome, RestoreOutcome::Restored { user: user_with_id(&reloaded, "u1") });
        assert!(reloaded.auth_checked());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.cart(), &cart);
        assert_eq!(reloaded.order_history().orders(), &[order.clone()]);

        // Ids keep increasing across the reload.
        let next = reloaded.checkout().unwrap();
        assert!(next.id.parse::<i64>().unwrap() > order.id.parse::<i64>().unwrap());
    }

    fn user_with_id(store: &SessionStore<MemoryStorage>, id: &str) -> User {
        let current = store.current_user().cloned().unwrap();
        assert_eq!(current.id, id);
        current
    }

    #[test]
    fn test_restore_with_nothing_persisted() {
        let mut store = SessionStore::new(MemoryStorage::new());
        assert_eq!(store.restore_session(), RestoreOutcome::Anonymous);
        assert!(store.auth_checked());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restore_corrupt_current_user() {
        let mut storage = MemoryStorage::new();
        storage.set(CURRENT_USER_KEY, "{ definitely not a user").unwrap();

        let mut store = SessionStore::new(storage);
        let outcome = store.restore_session();

        assert_eq!(
            outcome,
            RestoreOutcome::Recovered {
                key: CURRENT_USER_KEY.to_string()
            }
        );
        assert!(store.auth_checked());
        assert!(!store.is_authenticated());
        assert!(store.storage().get(CURRENT_USER_KEY).is_none());
    }

    #[test]
    fn test_restore_corrupt_orders_signs_out() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 500)).unwrap();
        let mut storage = store.close().unwrap();
        storage.set("orders_u1", r#"[{"id": 1}]"#).unwrap();

        let mut store = SessionStore::new(storage);
        let outcome = store.restore_session();

        assert_eq!(
            outcome,
            RestoreOutcome::Recovered {
                key: "orders_u1".to_string()
            }
        );
        assert!(!store.is_authenticated());
        assert!(store.storage().get("orders_u1").is_none());
        assert!(store.storage().get(CURRENT_USER_KEY).is_none());
        assert!(store.storage().get("cart_u1").is_some());
    }

    #[test]
    fn test_restore_corrupt_cart_signs_out() {
        let mut store = signed_in("u1");
        store.add_to_cart(&product(1, 500)).unwrap();
        store.checkout().unwrap();
        let mut storage = store.close().unwrap();
        storage
            .set(
                "cart_u1",
                r#"[{"id":1,"title":"Product 1","price":-5.0,"quantity":1}]"#,
            )
            .unwrap();

        let mut store = SessionStore::new(storage);
        let outcome = store.restore_session();

        assert_eq!(
            outcome,
            RestoreOutcome::Recovered {
                key: "cart_u1".to_string()
            }
        );
        assert!(store.auth_checked());
        assert!(!store.is_authenticated());
        assert!(store.cart().is_empty());
        assert!(store.storage().get("cart_u1").is_none());
        assert!(store.storage().get(CURRENT_USER_KEY).is_none());
        assert!(store.storage().get("orders_u1").is_some());
    }
}
