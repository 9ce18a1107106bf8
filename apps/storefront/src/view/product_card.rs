//! # Product Card
//!
//! One catalog entry with its own pending-quantity counter.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [p1] Widget                                             5.00 BYN      │
//! │       A widget                                                          │
//! │       [-] 3 [+]   15.00 BYN   [В корзину]                              │
//! │                                                                         │
//! │  inc / dec / qty ──► counter (1..=max) ──► in cart? update_quantity    │
//! │  toggle ──► not in cart: add_item(counter value)                       │
//! │             in cart:     remove_item, counter back to 1                │
//! │  cart listener ──► product left the cart: counter back to 1            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::{Cell, RefCell};
use std::fmt::Write as _;
use std::rc::Rc;

use storefront_core::{
    BoundedCounter, CartStore, CounterOptions, Product, RawQuantity, Subscription,
    ValidationError, MIN_ITEM_QUANTITY,
};
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::view::text;

/// Result of pressing the add/remove button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Product added; carries the cart total after the add.
    Added { cart_total_cents: i64 },
    Removed,
}

pub struct ProductCard {
    product: Product,
    cart: Rc<CartStore>,
    counter: Rc<RefCell<BoundedCounter>>,
    /// Last value pushed by the counter's change callback.
    shown_quantity: Rc<Cell<i64>>,
    in_cart: Rc<Cell<bool>>,
    subscription: Subscription,
}

impl ProductCard {
    pub fn new(
        product: Product,
        cart: Rc<CartStore>,
        max_quantity: i64,
    ) -> Result<Self, ValidationError> {
        let shown_quantity = Rc::new(Cell::new(MIN_ITEM_QUANTITY));
        let shown = Rc::clone(&shown_quantity);
        let counter = CounterOptions::new()
            .initial(MIN_ITEM_QUANTITY)
            .range(MIN_ITEM_QUANTITY, max_quantity)
            .on_change(move |quantity| shown.set(quantity))
            .build()?;
        let counter = Rc::new(RefCell::new(counter));

        let in_cart = Rc::new(Cell::new(cart.has_item(&product.id)));

        let subscription = {
            let id = product.id.clone();
            let in_cart = Rc::clone(&in_cart);
            let counter = Rc::clone(&counter);
            cart.on_change(move |items, _| {
                let now_in_cart = items.iter().any(|item| item.id == id);
                if now_in_cart == in_cart.get() {
                    return;
                }
                in_cart.set(now_in_cart);
                if !now_in_cart {
                    counter.borrow_mut().set_value(MIN_ITEM_QUANTITY);
                }
            })
        };

        Ok(ProductCard {
            product,
            cart,
            counter,
            shown_quantity,
            in_cart,
            subscription,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn in_cart(&self) -> bool {
        self.in_cart.get()
    }

    pub fn quantity(&self) -> i64 {
        self.counter.borrow().value()
    }

    /// Price times the displayed quantity.
    pub fn line_total_cents(&self) -> i64 {
        self.product
            .price()
            .multiply_quantity(self.shown_quantity.get())
            .cents()
    }

    // -------------------------------------------------------------------------
    // Quantity controls
    // -------------------------------------------------------------------------

    /// The "+" button.
    pub fn increase(&self) {
        let changed = self.counter.borrow_mut().increase();
        if changed {
            self.sync_cart_quantity();
        }
    }

    /// The "-" button. At the minimum the cart line is still resynced.
    pub fn decrease(&self) {
        self.counter.borrow_mut().decrease();
        self.sync_cart_quantity();
    }

    /// Typed quantity. Non-numeric or sub-minimum input lands on 1.
    pub fn set_quantity(&self, raw: impl Into<RawQuantity>) {
        self.counter.borrow_mut().set_value(raw);
        self.sync_cart_quantity();
    }

    fn sync_cart_quantity(&self) {
        if !self.in_cart.get() {
            return;
        }
        let quantity = self.quantity();
        debug!(id = %self.product.id, quantity, "card quantity pushed to cart");
        self.cart.update_quantity(&self.product.id, quantity);
    }

    // -------------------------------------------------------------------------
    // Add / remove
    // -------------------------------------------------------------------------

    /// The add/remove button.
    pub fn toggle(&self) -> CardAction {
        if self.in_cart.get() {
            self.cart.remove_item(&self.product.id);
            self.in_cart.set(false);
            self.counter.borrow_mut().set_value(MIN_ITEM_QUANTITY);
            CardAction::Removed
        } else {
            let draft = self.product.to_draft(self.quantity());
            self.cart.add_item(draft);
            self.in_cart.set(true);
            CardAction::Added {
                cart_total_cents: self.cart.total_cents(),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render(&self, config: &StorefrontConfig) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "[{}] {}  {}",
            self.product.id,
            self.product.title,
            config.format_currency(self.product.price_cents)
        );
        if !self.product.description.is_empty() {
            let _ = writeln!(out, "    {}", self.product.description);
        }
        let _ = write!(
            out,
            "    [-] {} [+]  {}  [{}]",
            self.shown_quantity.get(),
            config.format_currency(self.line_total_cents()),
            if self.in_cart() {
                text::REMOVE_FROM_CART
            } else {
                text::ADD_TO_CART
            }
        );
        out
    }
}

impl Drop for ProductCard {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::MAX_ITEM_QUANTITY;

    fn widget() -> Product {
        Product {
            id: "p1".to_string(),
            title: "Widget".to_string(),
            description: "A widget".to_string(),
            price_cents: 500,
            image_url: String::new(),
            alt_text: String::new(),
        }
    }

    fn card() -> (ProductCard, Rc<CartStore>) {
        let cart = Rc::new(CartStore::new());
        let card = ProductCard::new(widget(), Rc::clone(&cart), MAX_ITEM_QUANTITY).unwrap();
        (card, cart)
    }

    #[test]
    fn test_pending_quantity_does_not_touch_cart() {
        let (card, cart) = card();

        card.increase();
        card.increase();

        assert_eq!(card.quantity(), 3);
        assert_eq!(card.line_total_cents(), 1500);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_toggle_adds_with_counter_value() {
        let (card, cart) = card();
        card.set_quantity("4");

        let action = card.toggle();

        assert_eq!(action, CardAction::Added { cart_total_cents: 2000 });
        assert!(card.in_cart());
        assert_eq!(cart.quantity_of("p1"), Some(4));
    }

    #[test]
    fn test_quantity_changes_follow_into_cart() {
        let (card, cart) = card();
        card.toggle();

        card.increase();
        assert_eq!(cart.quantity_of("p1"), Some(2));

        card.set_quantity(10.7);
        assert_eq!(cart.quantity_of("p1"), Some(10));

        card.decrease();
        assert_eq!(cart.quantity_of("p1"), Some(9));
    }

    #[test]
    fn test_garbage_input_lands_on_one() {
        let (card, cart) = card();
        card.set_quantity(5);
        card.toggle();

        card.set_quantity("abc");

        assert_eq!(card.quantity(), 1);
        assert_eq!(cart.quantity_of("p1"), Some(1));
    }

    #[test]
    fn test_toggle_again_removes_and_resets() {
        let (card, cart) = card();
        card.set_quantity(5);
        card.toggle();

        assert_eq!(card.toggle(), CardAction::Removed);
        assert!(!card.in_cart());
        assert_eq!(card.quantity(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_external_removal_resets_card() {
        let (card, cart) = card();
        card.set_quantity(7);
        card.toggle();

        cart.clear();

        assert!(!card.in_cart());
        assert_eq!(card.quantity(), 1);
        assert_eq!(card.line_total_cents(), 500);
    }

    #[test]
    fn test_external_add_marks_card_in_cart() {
        let (card, cart) = card();

        cart.add_item(widget().to_draft(2));

        assert!(card.in_cart());
        // Pending quantity is independent of the cart line.
        assert_eq!(card.quantity(), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let (card, cart) = card();
        assert_eq!(cart.listener_count(), 1);

        drop(card);

        assert_eq!(cart.listener_count(), 0);
    }

    #[test]
    fn test_render() {
        let (card, _cart) = card();
        card.increase();
        let config = StorefrontConfig::default();

        let rendered = card.render(&config);

        assert!(rendered.starts_with("[p1] Widget  5.00 BYN"));
        assert!(rendered.contains("[-] 2 [+]  10.00 BYN"));
        assert!(rendered.contains(text::ADD_TO_CART));
    }

    #[test]
    fn test_invalid_max_quantity() {
        let cart = Rc::new(CartStore::new());
        assert!(ProductCard::new(widget(), cart, 0).is_err());
    }
}
