//! # Storefront
//!
//! The page: catalog cards and the cart panel wired to one shared store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Storefront                                     │
//! │                                                                         │
//! │  ┌────────────────────────────┐      ┌──────────────────────────────┐  │
//! │  │ ProductCard  (one per      │      │ CartPanel                    │  │
//! │  │ catalog product)           │      │  rows, summary, announcement │  │
//! │  └─────────────┬──────────────┘      └──────────────┬───────────────┘  │
//! │                │  Rc<CartStore>                     │                  │
//! │                └───────────────►  CartStore  ◄──────┘                  │
//! │                                  (listeners fan out to every widget)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::rc::Rc;

use storefront_core::{CartStore, Product};
use tracing::info;

use crate::config::StorefrontConfig;
use crate::error::{AppResult, CommandError};
use crate::view::{text, CartPanel, ProductCard};

pub struct Storefront {
    config: StorefrontConfig,
    cart: Rc<CartStore>,
    cards: Vec<ProductCard>,
    panel: CartPanel,
}

impl Storefront {
    /// Builds cards for `products` in catalog order.
    pub fn new(config: StorefrontConfig, products: Vec<Product>) -> AppResult<Self> {
        config.validate()?;

        let cart = Rc::new(CartStore::with_max_quantity(config.max_quantity));
        let panel = CartPanel::new(Rc::clone(&cart), config.max_quantity)?;
        let cards = products
            .into_iter()
            .map(|product| ProductCard::new(product, Rc::clone(&cart), config.max_quantity))
            .collect::<Result<Vec<_>, _>>()?;

        info!(products = cards.len(), "storefront ready");

        Ok(Storefront {
            config,
            cart,
            cards,
            panel,
        })
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn panel(&self) -> &CartPanel {
        &self.panel
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    /// Looks up a card by product id.
    pub fn card(&self, id: &str) -> Result<&ProductCard, CommandError> {
        self.cards
            .iter()
            .find(|card| card.id() == id)
            .ok_or_else(|| CommandError::UnknownProduct(id.to_string()))
    }

    pub fn render_catalog(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", text::CATALOG_HEADING);

        if self.cards.is_empty() {
            let _ = writeln!(out, "{}", text::CATALOG_EMPTY);
            let _ = write!(out, "{}", text::CATALOG_EMPTY_HINT);
            return out;
        }

        let rendered: Vec<String> = self
            .cards
            .iter()
            .map(|card| card.render(&self.config))
            .collect();
        out.push_str(&rendered.join("\n\n"));
        out
    }

    pub fn render_cart(&self) -> String {
        format!(
            "{}\n{}",
            self.panel.render(&self.config),
            self.panel.announcement(&self.config)
        )
    }
}
