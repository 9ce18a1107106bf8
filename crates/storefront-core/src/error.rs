//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Rejected cart operations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-catalog errors (separate crate)                            │
//! │  └── CatalogError     - Catalog read/parse failures                    │
//! │                                                                         │
//! │  App errors                                                             │
//! │  └── CommandError     - What the terminal user sees                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## When Errors Occur
//! The unchecked cart and counter operations never fail: bad counter input is
//! clamped, absent ids are no-ops. Errors only come out of the validating
//! entry points (`CartStore::try_add_item`, `CounterOptions::build`, and the
//! functions in [`crate::validation`]).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Adding the item would push its quantity past the allowed maximum.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart: Widget x998
    ///      │
    ///      ▼
    /// try_add_item(Widget, qty: 5)
    ///      │
    ///      ▼
    /// QuantityTooLarge { requested: 1003, max: 999 }
    /// ```
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Lower bound is above the upper bound.
    #[error("minimum {minimum} is greater than maximum {maximum}")]
    InvertedRange { minimum: i64, maximum: i64 },

    /// Duplicate value (e.g., duplicate product id in a catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
