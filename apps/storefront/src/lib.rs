//! # Storefront Library
//!
//! Terminal storefront: a product catalog with per-product quantity pickers
//! and a cart panel, all driven by one shared [`storefront_core::CartStore`].
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Environment-driven configuration
//! ├── error.rs        ◄─── AppError / CommandError
//! ├── storefront.rs   ◄─── Page aggregate (cards + panel + store)
//! ├── commands.rs     ◄─── Command parsing and the command loop
//! └── view/
//!     ├── product_card.rs
//!     ├── cart_panel.rs
//!     └── text.rs
//! ```
//!
//! ## Output Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout ◄── rendered views and command errors ("! ...")                │
//! │  stderr ◄── tracing output (RUST_LOG, default info)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod storefront;
pub mod view;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::StorefrontConfig;
use crate::error::AppResult;
use crate::storefront::Storefront;

/// Runs the storefront.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ──► tracing-subscriber, EnvFilter, stderr       │
/// │  2. Configuration ───────► StorefrontConfig::from_env + validate       │
/// │  3. Catalog ─────────────► load_products (empty on any failure)        │
/// │  4. Page ────────────────► one ProductCard per product + CartPanel     │
/// │  5. Command Loop ────────► stdin until EOF or `quit`                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> AppResult<()> {
    init_tracing();

    info!("Starting storefront");

    let config = StorefrontConfig::from_env();
    config.validate()?;
    info!(catalog = %config.catalog_path.display(), "configuration loaded");

    let products = storefront_catalog::load_products(&config.catalog_source()).await;
    info!(count = products.len(), "catalog loaded");

    let store = Storefront::new(config, products)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    commands::repl(&store, stdin.lock(), stdout.lock())?;

    info!("Storefront closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every cart mutation and command
/// - `RUST_LOG=storefront_core=trace` - Core crate only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
