//! # storefront-core: Cart Logic for the Storefront
//!
//! This crate holds the only stateful logic of the storefront: the cart store
//! and the bounded quantity counter. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View (apps/storefront)                       │   │
//! │  │    Product Cards ──► Add/Remove ──► Cart Panel ──► Summary      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add_item / update_quantity / ...       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │  counter  │  │   money   │  │ validation│  │   │
//! │  │   │ CartStore │  │ Bounded-  │  │   Money   │  │   rules   │  │   │
//! │  │   │ listeners │  │ Counter   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • SINGLE-THREADED • SYNCHRONOUS NOTIFICATION          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │               storefront-catalog (Vec<Product>)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - `CartStore` with change listeners
//! - [`counter`] - `BoundedCounter` with input coercion
//! - [`types`] - Product, LineItem, CartTotals
//! - [`money`] - Money type with integer arithmetic
//! - [`validation`] - Checks for untrusted input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartStore, LineItemDraft};
//!
//! let cart = CartStore::new();
//! cart.add_item(LineItemDraft::new("p1", "Widget", 500, 2));
//! cart.update_quantity("p1", 5);
//!
//! let stats = cart.stats();
//! assert_eq!(stats.item_count, 1);
//! assert_eq!(stats.total_cents, 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod counter;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartListener, CartStore, Subscription};
pub use counter::{BoundedCounter, CounterOptions, RawQuantity};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Lowest quantity a counter accepts unless configured otherwise.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity of a single item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Matches the `max` attribute of the quantity inputs.
pub const MAX_ITEM_QUANTITY: i64 = 999;
