//! # Cart Panel
//!
//! The cart sidebar: one row per line item, each with its own counter, plus
//! a summary and a screen-reader style announcement.
//!
//! ## Render Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore change ──► listener(items, stats)                            │
//! │                           │                                             │
//! │                           ├── rows whose id vanished ──► dropped        │
//! │                           ├── surviving rows ──► counter synced         │
//! │                           ├── new ids ──► row appended (fresh counter)  │
//! │                           └── summary + announcement refreshed          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use storefront_core::{
    BoundedCounter, CartStore, CartTotals, CounterOptions, LineItem, RawQuantity, Subscription,
    ValidationError, MIN_ITEM_QUANTITY,
};
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::error::CommandError;
use crate::view::text;

/// One rendered cart line.
#[derive(Debug)]
pub struct CartRow {
    pub item: LineItem,
    pub counter: BoundedCounter,
}

#[derive(Debug, Default)]
struct PanelState {
    rows: Vec<CartRow>,
    stats: CartTotals,
}

impl PanelState {
    fn render(&mut self, items: &[LineItem], stats: &CartTotals, max_quantity: i64) {
        self.rows
            .retain(|row| items.iter().any(|item| item.id == row.item.id));

        for item in items {
            match self.rows.iter_mut().find(|row| row.item.id == item.id) {
                Some(row) => {
                    if row.counter.value() != item.quantity {
                        row.counter.set_value(item.quantity);
                    }
                    row.item = item.clone();
                }
                None => self.rows.push(CartRow {
                    item: item.clone(),
                    counter: row_counter(item.quantity, max_quantity),
                }),
            }
        }

        self.stats = *stats;
    }

    fn row_value(&self, id: &str) -> Option<i64> {
        self.rows
            .iter()
            .find(|row| row.item.id == id)
            .map(|row| row.counter.value())
    }
}

fn row_counter(quantity: i64, max_quantity: i64) -> BoundedCounter {
    CounterOptions::new()
        .initial(quantity)
        .range(MIN_ITEM_QUANTITY, max_quantity)
        .build()
        .unwrap_or_default()
}

pub struct CartPanel {
    cart: Rc<CartStore>,
    state: Rc<RefCell<PanelState>>,
    max_quantity: i64,
    subscription: Subscription,
}

impl CartPanel {
    pub fn new(cart: Rc<CartStore>, max_quantity: i64) -> Result<Self, ValidationError> {
        // Reject a bad range up front so row counters always build.
        CounterOptions::new()
            .range(MIN_ITEM_QUANTITY, max_quantity)
            .build()?;

        let state = Rc::new(RefCell::new(PanelState::default()));
        state
            .borrow_mut()
            .render(&cart.items(), &cart.stats(), max_quantity);

        let subscription = {
            let state = Rc::clone(&state);
            cart.on_change(move |items, stats| {
                state.borrow_mut().render(items, stats, max_quantity);
            })
        };

        Ok(CartPanel {
            cart,
            state,
            max_quantity,
            subscription,
        })
    }

    pub fn row_count(&self) -> usize {
        self.state.borrow().rows.len()
    }

    /// Counter value shown for a row.
    pub fn row_quantity(&self, id: &str) -> Option<i64> {
        self.state.borrow().row_value(id)
    }

    pub fn stats(&self) -> CartTotals {
        self.state.borrow().stats
    }

    // -------------------------------------------------------------------------
    // Row controls
    // -------------------------------------------------------------------------

    /// Row "+" button; no-op at the maximum.
    pub fn increase(&self, id: &str) -> Result<(), CommandError> {
        let current = self.require_row(id)?;
        if current >= self.max_quantity {
            return Ok(());
        }
        let next = self.step_row(id, |counter| {
            counter.increase();
        });
        self.cart.update_quantity(id, next);
        Ok(())
    }

    /// Row "-" button; at 1 the line is removed.
    pub fn decrease(&self, id: &str) -> Result<(), CommandError> {
        let current = self.require_row(id)?;
        if current <= MIN_ITEM_QUANTITY {
            debug!(id = %id, "decrease at minimum removes the line");
            self.cart.remove_item(id);
            return Ok(());
        }
        let next = self.step_row(id, |counter| {
            counter.decrease();
        });
        self.cart.update_quantity(id, next);
        Ok(())
    }

    /// Typed quantity. Non-numeric or non-positive input removes the line;
    /// anything else is clamped to the row's range.
    pub fn set_quantity(&self, id: &str, raw: impl Into<RawQuantity>) -> Result<(), CommandError> {
        self.require_row(id)?;
        let raw = raw.into();
        match raw.as_integer() {
            Some(quantity) if quantity > 0 => {
                let next = self.step_row(id, |counter| {
                    counter.set_value(quantity);
                });
                self.cart.update_quantity(id, next);
            }
            _ => {
                debug!(id = %id, raw = ?raw, "typed quantity removes the line");
                self.cart.remove_item(id);
            }
        }
        Ok(())
    }

    /// Row remove button. Unknown ids still trigger a refresh.
    pub fn remove(&self, id: &str) {
        self.cart.remove_item(id);
    }

    /// The clear-cart button.
    pub fn clear(&self) {
        self.cart.clear();
    }

    fn require_row(&self, id: &str) -> Result<i64, CommandError> {
        self.row_quantity(id)
            .ok_or_else(|| CommandError::NotInCart(id.to_string()))
    }

    /// Applies `step` to a row's counter and returns the new value. The
    /// panel borrow is released before the caller touches the store.
    fn step_row<F>(&self, id: &str, step: F) -> i64
    where
        F: FnOnce(&mut BoundedCounter),
    {
        let mut state = self.state.borrow_mut();
        match state.rows.iter_mut().find(|row| row.item.id == id) {
            Some(row) => {
                step(&mut row.counter);
                row.counter.value()
            }
            None => MIN_ITEM_QUANTITY,
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Polite-live-region text describing the cart.
    pub fn announcement(&self, config: &StorefrontConfig) -> String {
        let stats = self.stats();
        if stats.is_empty() {
            return text::CART_EMPTY.to_string();
        }
        format!(
            "В корзине {} {}, итого: {}",
            stats.item_count,
            text::positions(stats.item_count),
            config.format_currency(stats.total_cents)
        )
    }

    pub fn render(&self, config: &StorefrontConfig) -> String {
        let state = self.state.borrow();
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", text::CART_HEADING);

        if state.rows.is_empty() {
            let _ = writeln!(out, "{}", text::CART_EMPTY);
        }
        for row in &state.rows {
            let _ = writeln!(
                out,
                "[{}] {}  {} x [-] {} [+] = {}",
                row.item.id,
                row.item.title,
                config.format_currency(row.item.unit_price_cents),
                row.counter.value(),
                config.format_currency(row.item.line_total().cents())
            );
        }

        let _ = writeln!(out, "{} {}", text::CART_POSITIONS, state.stats.item_count);
        let _ = writeln!(out, "{} {}", text::CART_UNITS, state.stats.total_quantity);
        let _ = write!(
            out,
            "{} {}",
            text::CART_TOTAL,
            config.format_currency(state.stats.total_cents)
        );
        out
    }
}

impl Drop for CartPanel {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{LineItemDraft, MAX_ITEM_QUANTITY};

    fn panel() -> (CartPanel, Rc<CartStore>) {
        let cart = Rc::new(CartStore::new());
        let panel = CartPanel::new(Rc::clone(&cart), MAX_ITEM_QUANTITY).unwrap();
        (panel, cart)
    }

    fn add(cart: &CartStore, id: &str, price: i64, qty: i64) {
        cart.add_item(LineItemDraft::new(id, format!("Item {}", id), price, qty));
    }

    #[test]
    fn test_rows_follow_store() {
        let (panel, cart) = panel();

        add(&cart, "a", 100, 2);
        add(&cart, "b", 250, 1);
        assert_eq!(panel.row_count(), 2);
        assert_eq!(panel.stats().total_cents, 450);

        add(&cart, "a", 100, 3);
        assert_eq!(panel.row_quantity("a"), Some(5));

        cart.remove_item("a");
        assert_eq!(panel.row_count(), 1);
        assert_eq!(panel.row_quantity("a"), None);
    }

    #[test]
    fn test_panel_picks_up_existing_items() {
        let cart = Rc::new(CartStore::new());
        add(&cart, "a", 100, 4);

        let panel = CartPanel::new(Rc::clone(&cart), MAX_ITEM_QUANTITY).unwrap();

        assert_eq!(panel.row_quantity("a"), Some(4));
        assert_eq!(panel.stats().total_quantity, 4);
    }

    #[test]
    fn test_increase_and_decrease() {
        let (panel, cart) = panel();
        add(&cart, "a", 100, 2);

        panel.increase("a").unwrap();
        assert_eq!(cart.quantity_of("a"), Some(3));

        panel.decrease("a").unwrap();
        panel.decrease("a").unwrap();
        assert_eq!(cart.quantity_of("a"), Some(1));

        panel.decrease("a").unwrap();
        assert!(!cart.has_item("a"));
        assert_eq!(panel.row_count(), 0);
    }

    #[test]
    fn test_increase_at_maximum_is_noop() {
        let cart = Rc::new(CartStore::new());
        let panel = CartPanel::new(Rc::clone(&cart), 3).unwrap();
        add(&cart, "a", 100, 3);

        let notified = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&notified);
        let _sub = cart.on_change(move |_, _| *sink.borrow_mut() += 1);

        panel.increase("a").unwrap();

        assert_eq!(*notified.borrow(), 0);
        assert_eq!(cart.quantity_of("a"), Some(3));
    }

    #[test]
    fn test_typed_quantity() {
        let (panel, cart) = panel();
        add(&cart, "a", 100, 2);

        panel.set_quantity("a", "12").unwrap();
        assert_eq!(cart.quantity_of("a"), Some(12));

        panel.set_quantity("a", 5000).unwrap();
        assert_eq!(cart.quantity_of("a"), Some(999));

        panel.set_quantity("a", "0").unwrap();
        assert!(!cart.has_item("a"));
    }

    #[test]
    fn test_typed_garbage_removes_line() {
        let (panel, cart) = panel();
        add(&cart, "a", 100, 2);

        panel.set_quantity("a", "lots").unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_row_controls_require_line() {
        let (panel, _cart) = panel();

        assert_eq!(
            panel.increase("ghost"),
            Err(CommandError::NotInCart("ghost".to_string()))
        );
        assert!(panel.set_quantity("ghost", 3).is_err());
    }

    #[test]
    fn test_announcement() {
        let (panel, cart) = panel();
        let config = StorefrontConfig::default();
        assert_eq!(panel.announcement(&config), "Корзина пуста");

        add(&cart, "a", 500, 2);
        assert_eq!(
            panel.announcement(&config),
            "В корзине 1 позиция, итого: 10.00 BYN"
        );

        add(&cart, "b", 100, 1);
        add(&cart, "c", 100, 1);
        add(&cart, "d", 100, 1);
        add(&cart, "e", 100, 1);
        assert_eq!(
            panel.announcement(&config),
            "В корзине 5 позиций, итого: 14.00 BYN"
        );
    }

    #[test]
    fn test_render() {
        let (panel, cart) = panel();
        let config = StorefrontConfig::default();
        assert!(panel.render(&config).contains("Корзина пуста"));

        add(&cart, "a", 500, 2);
        let rendered = panel.render(&config);

        assert!(rendered.contains("[a] Item a  5.00 BYN x [-] 2 [+] = 10.00 BYN"));
        assert!(rendered.contains("Позиций: 1"));
        assert!(rendered.contains("Всего единиц: 2"));
        assert!(rendered.ends_with("Итого: 10.00 BYN"));
    }

    #[test]
    fn test_clear_and_drop() {
        let (panel, cart) = panel();
        add(&cart, "a", 500, 2);

        panel.clear();
        assert_eq!(panel.row_count(), 0);

        drop(panel);
        assert_eq!(cart.listener_count(), 0);
    }
}
