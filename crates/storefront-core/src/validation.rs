//! # Validation Module
//!
//! Checks for input arriving from outside the trusted view code.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog loader                                               │
//! │  └── validate_product: malformed records are dropped                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Quantity controls                                            │
//! │  └── BoundedCounter clamps whatever the user typed                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CartStore                                                    │
//! │  ├── add_item: trusts its caller (documented precondition)             │
//! │  └── try_add_item: runs validate_draft first                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_quantity, validate_price_cents};
//!
//! assert!(validate_quantity(5, 999).is_ok());
//! assert!(validate_price_cents(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{LineItemDraft, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product id accepted from a catalog.
pub const MAX_ID_LEN: usize = 64;

/// Longest product title accepted from a catalog.
pub const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a display title.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_title;
///
/// assert!(validate_title("Widget").is_ok());
/// assert!(validate_title("  ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity against `1..=max`.
///
/// ## User Workflow
/// ```text
/// try_add_item(qty: 5)
///       │
///       ├── qty <= 0?  → MustBePositive
///       ├── qty > max? → OutOfRange
///       └── OK → add_item
/// ```
pub fn validate_quantity(qty: i64, max: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed (free items).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates counter bounds.
pub fn validate_range(minimum: i64, maximum: i64) -> ValidationResult<()> {
    if minimum > maximum {
        return Err(ValidationError::InvertedRange { minimum, maximum });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a catalog record.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_title(&product.title)?;
    validate_price_cents(product.price_cents)
}

/// Validates an add-to-cart payload.
pub fn validate_draft(draft: &LineItemDraft, max_quantity: i64) -> ValidationResult<()> {
    validate_product_id(&draft.id)?;
    validate_title(&draft.title)?;
    validate_price_cents(draft.unit_price_cents)?;
    validate_quantity(draft.quantity, max_quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_ITEM_QUANTITY;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("p1").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Widget").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1, MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(999, MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0, MAX_ITEM_QUANTITY).is_err());
        assert!(validate_quantity(-1, MAX_ITEM_QUANTITY).is_err());
        assert!(validate_quantity(1000, MAX_ITEM_QUANTITY).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(1, 999).is_ok());
        assert!(validate_range(5, 5).is_ok());
        assert_eq!(
            validate_range(10, 1),
            Err(ValidationError::InvertedRange {
                minimum: 10,
                maximum: 1
            })
        );
    }

    #[test]
    fn test_validate_draft() {
        let ok = LineItemDraft::new("p1", "Widget", 500, 2);
        assert!(validate_draft(&ok, MAX_ITEM_QUANTITY).is_ok());

        let free = LineItemDraft::new("p2", "Sticker", 0, 1);
        assert!(validate_draft(&free, MAX_ITEM_QUANTITY).is_ok());

        let negative_price = LineItemDraft::new("p1", "Widget", -5, 1);
        assert!(validate_draft(&negative_price, MAX_ITEM_QUANTITY).is_err());

        let zero_qty = LineItemDraft::new("p1", "Widget", 500, 0);
        assert!(matches!(
            validate_draft(&zero_qty, MAX_ITEM_QUANTITY),
            Err(ValidationError::MustBePositive { .. })
        ));
    }
}
