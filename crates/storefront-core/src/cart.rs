//! # Cart Store
//!
//! Owns the cart's line items and tells every subscriber about each change.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Call              State Change          │
//! │  ───────────              ──────────              ────────────          │
//! │                                                                         │
//! │  Click "Add" ────────────► add_item() ──────────► push or qty += n     │
//! │                                                                         │
//! │  Edit Quantity ──────────► update_quantity() ───► qty = n (n <= 0:     │
//! │                                                    remove)             │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► retain(id != ..)     │
//! │                                                                         │
//! │  Click Clear ────────────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Every write ──► notify() ──► listener(items snapshot, totals)         │
//! │                              (inline, before the write returns)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//! The store is single-threaded (`!Send`, `!Sync`). Methods take `&self` so
//! that views can share one store through an `Rc` and read it from inside a
//! listener. No borrow is held while listeners run, so a listener may query
//! the store, mutate it again, or unsubscribe itself.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{CartTotals, LineItem, LineItemDraft};
use crate::validation::validate_draft;
use crate::MAX_ITEM_QUANTITY;

/// Callback invoked with a fresh items snapshot and fresh totals.
pub type CartListener = dyn Fn(&[LineItem], &CartTotals);

type ListenerId = u64;

#[derive(Default)]
struct ListenerRegistry {
    next_id: ListenerId,
    entries: Vec<(ListenerId, Rc<CartListener>)>,
}

impl ListenerRegistry {
    fn insert(&mut self, listener: Rc<CartListener>) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Handle returned by [`CartStore::on_change`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[derive(Clone)]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl Subscription {
    /// Deregisters exactly this listener.
    ///
    /// Returns `true` the first time; later calls (or calls after the store
    /// is gone) are no-ops returning `false`.
    pub fn unsubscribe(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.id),
            None => false,
        }
    }

    /// Whether the listener is still registered with a live store.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same id increases quantity)
/// - Items keep the position of their first add
/// - Totals are never stored; [`CartStore::stats`] recomputes them
///
/// ## Caller Contract
/// [`CartStore::add_item`] does not validate. Callers must pass a
/// non-negative `unit_price_cents` and a positive `quantity`, typically
/// taken from a [`crate::BoundedCounter`]. Callers holding untrusted input
/// use [`CartStore::try_add_item`] instead.
pub struct CartStore {
    items: RefCell<Vec<LineItem>>,
    listeners: Rc<RefCell<ListenerRegistry>>,
    max_quantity: i64,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::with_max_quantity(MAX_ITEM_QUANTITY)
    }

    /// Creates an empty cart whose validating entry point caps each line at
    /// `max_quantity` units.
    pub fn with_max_quantity(max_quantity: i64) -> Self {
        CartStore {
            items: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(ListenerRegistry::default())),
            max_quantity,
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product to the cart or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Id already in cart: quantity grows by `draft.quantity`; the stored
    ///   title and price are kept
    /// - Id not in cart: a new line is appended
    ///
    /// Always notifies.
    pub fn add_item(&self, draft: LineItemDraft) {
        {
            let mut items = self.items.borrow_mut();
            if let Some(item) = items.iter_mut().find(|i| i.id == draft.id) {
                item.quantity = item.quantity.saturating_add(draft.quantity);
                debug!(id = %item.id, quantity = item.quantity, "cart line increased");
            } else {
                debug!(id = %draft.id, quantity = draft.quantity, "cart line added");
                items.push(LineItem::from(draft));
            }
        }
        self.notify();
    }

    /// Validating variant of [`CartStore::add_item`].
    ///
    /// ## Returns
    /// - `Ok(())` after the add (and its notification)
    /// - `Err(CoreError::Validation)` for a malformed draft
    /// - `Err(CoreError::QuantityTooLarge)` if the line would exceed the cap
    pub fn try_add_item(&self, draft: LineItemDraft) -> CoreResult<()> {
        validate_draft(&draft, self.max_quantity)?;

        let existing = self.quantity_of(&draft.id).unwrap_or(0);
        let requested = existing.saturating_add(draft.quantity);
        if requested > self.max_quantity {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: self.max_quantity,
            });
        }

        self.add_item(draft);
        Ok(())
    }

    /// Removes an item by id.
    ///
    /// Notifies even when the id is absent, so a view acting on stale state
    /// still gets a refresh.
    pub fn remove_item(&self, id: &str) {
        let removed = {
            let mut items = self.items.borrow_mut();
            let before = items.len();
            items.retain(|i| i.id != id);
            items.len() != before
        };
        debug!(id = %id, removed, "cart line removed");
        self.notify();
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Id not in cart: nothing happens, no notification
    /// - `quantity <= 0`: same as [`CartStore::remove_item`]
    /// - Otherwise: absolute set, then notify
    pub fn update_quantity(&self, id: &str, quantity: i64) {
        if !self.has_item(id) {
            debug!(id = %id, "update_quantity ignored for absent line");
            return;
        }

        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        {
            let mut items = self.items.borrow_mut();
            if let Some(item) = items.iter_mut().find(|i| i.id == id) {
                item.quantity = quantity;
            }
        }
        debug!(id = %id, quantity, "cart line quantity set");
        self.notify();
    }

    /// Clears all items from the cart. Always notifies.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        debug!("cart cleared");
        self.notify();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Checks whether a line with `id` exists.
    pub fn has_item(&self, id: &str) -> bool {
        self.items.borrow().iter().any(|i| i.id == id)
    }

    /// Current quantity of the line with `id`, if present.
    pub fn quantity_of(&self, id: &str) -> Option<i64> {
        self.items
            .borrow()
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.quantity)
    }

    /// Returns an owned snapshot of the lines in first-add order.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.borrow().clone()
    }

    /// Computes the totals for the current lines.
    pub fn stats(&self) -> CartTotals {
        CartTotals::from_items(&self.items.borrow())
    }

    /// Shorthand for `stats().total_cents`.
    pub fn total_cents(&self) -> i64 {
        self.stats().total_cents
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Registers a listener called after every mutation.
    ///
    /// ## Usage
    /// ```rust
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use storefront_core::{CartStore, LineItemDraft};
    ///
    /// let cart = CartStore::new();
    /// let seen = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&seen);
    /// let sub = cart.on_change(move |_items, stats| counter.set(stats.total_cents));
    ///
    /// cart.add_item(LineItemDraft::new("p1", "Widget", 500, 2));
    /// assert_eq!(seen.get(), 1000);
    ///
    /// sub.unsubscribe();
    /// cart.clear();
    /// assert_eq!(seen.get(), 1000);
    /// ```
    pub fn on_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[LineItem], &CartTotals) + 'static,
    {
        let id = self.listeners.borrow_mut().insert(Rc::new(listener));
        Subscription {
            id,
            registry: Rc::downgrade(&self.listeners),
        }
    }

    /// Calls every listener registered at the start of this cycle that is
    /// still registered when its turn comes. Each call gets its own
    /// snapshot.
    fn notify(&self) {
        let snapshot: Vec<(ListenerId, Rc<CartListener>)> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.listeners.borrow().contains(id) {
                continue;
            }
            let items = self.items();
            let stats = CartTotals::from_items(&items);
            listener(&items, &stats);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items.borrow())
            .field("listeners", &self.listener_count())
            .field("max_quantity", &self.max_quantity)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
