//! # View Module
//!
//! Text renditions of the storefront widgets.
//!
//! ```text
//! view/
//! ├── mod.rs           ◄─── You are here (exports)
//! ├── product_card.rs  ◄─── Catalog entry with pending quantity
//! ├── cart_panel.rs    ◄─── Cart sidebar with per-line counters
//! └── text.rs          ◄─── Russian labels and plural forms
//! ```
//!
//! Every widget holds an `Rc<CartStore>` and subscribes to it on creation.
//! Widgets unsubscribe when dropped.

pub mod cart_panel;
pub mod product_card;
pub mod text;

pub use cart_panel::{CartPanel, CartRow};
pub use product_card::{CardAction, ProductCard};
