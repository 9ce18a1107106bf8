//! # Domain Types
//!
//! Types that cross the boundary between the core and the view.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │   CartTotals    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id (unique)    │──►│  item_count     │       │
//! │  │  title          │   │  title          │   │  total_quantity │       │
//! │  │  price_cents    │   │  unit_price     │   │  total_cents    │       │
//! │  │  image_url ...  │   │  quantity >= 1  │   │  (derived)      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │     catalog record        owned by CartStore     fresh snapshot         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry as delivered by the catalog source.
///
/// The static catalog file uses the short keys `desc`, `img` and `alt`;
/// both spellings are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Stable identifier, also the cart key.
    pub id: String,

    /// Display name.
    pub title: String,

    /// Marketing copy shown under the image.
    #[serde(default, alias = "desc")]
    pub description: String,

    /// Price of one unit in cents.
    pub price_cents: i64,

    /// Image location.
    #[serde(default, alias = "img")]
    pub image_url: String,

    /// Alternative text for the image.
    #[serde(default, alias = "alt")]
    pub alt_text: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Builds the add-to-cart payload for `quantity` units of this product.
    pub fn to_draft(&self, quantity: i64) -> LineItemDraft {
        LineItemDraft {
            id: self.id.clone(),
            title: self.title.clone(),
            unit_price_cents: self.price_cents,
            quantity,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product's presence in the cart.
///
/// ## Invariants (maintained by `CartStore`)
/// - At most one line item per `id`
/// - `quantity >= 1`; driving it to zero or below removes the line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    /// Unit price in cents, frozen when the line was created.
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price times quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// Input to `CartStore::add_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    pub id: String,
    pub title: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

impl LineItemDraft {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        unit_price_cents: i64,
        quantity: i64,
    ) -> Self {
        LineItemDraft {
            id: id.into(),
            title: title.into(),
            unit_price_cents,
            quantity,
        }
    }
}

impl From<LineItemDraft> for LineItem {
    fn from(draft: LineItemDraft) -> Self {
        LineItem {
            id: draft.id,
            title: draft.title,
            unit_price_cents: draft.unit_price_cents,
            quantity: draft.quantity,
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregate snapshot of a cart, recomputed on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct line items.
    pub item_count: usize,
    /// Sum of all quantities.
    pub total_quantity: i64,
    /// Sum of `unit_price_cents * quantity`.
    pub total_cents: i64,
}

impl CartTotals {
    /// Folds a set of line items into totals.
    pub fn from_items(items: &[LineItem]) -> Self {
        CartTotals {
            item_count: items.len(),
            total_quantity: items
                .iter()
                .fold(0_i64, |sum, item| sum.saturating_add(item.quantity)),
            total_cents: items.iter().map(LineItem::line_total).sum::<Money>().cents(),
        }
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Product {
        Product {
            id: "p1".to_string(),
            title: "Widget".to_string(),
            description: "A widget".to_string(),
            price_cents: 500,
            image_url: "img/widget.png".to_string(),
            alt_text: "Widget photo".to_string(),
        }
    }

    #[test]
    fn test_product_accepts_catalog_file_keys() {
        let json = r#"{"id":"p1","title":"Widget","desc":"A widget",
            "priceCents":500,"img":"img/widget.png","alt":"Widget photo"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product, widget());
    }

    #[test]
    fn test_product_serializes_descriptive_keys() {
        let value = serde_json::to_value(widget()).unwrap();
        assert_eq!(value["imageUrl"], "img/widget.png");
        assert_eq!(value["altText"], "Widget photo");
        assert_eq!(value["priceCents"], 500);
    }

    #[test]
    fn test_product_to_draft() {
        let draft = widget().to_draft(3);
        assert_eq!(draft, LineItemDraft::new("p1", "Widget", 500, 3));
    }

    #[test]
    fn test_totals_from_items() {
        let items = vec![
            LineItem::from(LineItemDraft::new("a", "A", 500, 2)),
            LineItem::from(LineItemDraft::new("b", "B", 299, 3)),
        ];
        let totals = CartTotals::from_items(&items);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 5);
        assert_eq!(totals.total_cents, 1897);
        assert_eq!(totals.total().cents(), 1897);
    }

    #[test]
    fn test_totals_empty() {
        let totals = CartTotals::from_items(&[]);
        assert!(totals.is_empty());
        assert_eq!(totals, CartTotals::default());
    }
}
