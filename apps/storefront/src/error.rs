//! # App Error Types
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  "qty p9 3"                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Command::parse ──── CommandError::MissingArgument / Unknown ──┐       │
//! │       │                                                         │       │
//! │       ▼                                                         │       │
//! │  Storefront::execute ── CommandError::UnknownProduct ──────────┤       │
//! │       │                                                         ▼       │
//! │       ▼                                            printed as "! msg"  │
//! │  Success ──► rendered view                         loop continues      │
//! │                                                                         │
//! │  AppError (I/O on stdin/stdout, bad config) ──► process exits          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// A command the user typed could not be carried out.
///
/// These are shown to the user; the command loop keeps running.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("No product with id '{0}' in the catalog")]
    UnknownProduct(String),

    #[error("'{0}' is not in the cart")]
    NotInCart(String),
}

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
