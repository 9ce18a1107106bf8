//! # storefront-catalog: Catalog Source for the Storefront
//!
//! Performs the storefront's single piece of I/O: reading the static product
//! catalog once at startup.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  App startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-catalog (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   CatalogSource ──► read file (timeout) ──► parse JSON array   │   │
//! │  │                                                  │              │   │
//! │  │                          skip malformed records ◄┘              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> (empty on any failure) ──► product cards                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_catalog::{load_products, CatalogSource};
//!
//! let source = CatalogSource::new("data/products.json");
//! let products = load_products(&source).await; // never fails
//! ```

pub mod error;
pub mod loader;

pub use error::{CatalogError, CatalogResult};
pub use loader::{load_products, parse_products, try_load_products, CatalogSource};
