//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / Elapsed                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds the catalog path                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_products() logs it and returns an empty catalog                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Catalog retrieval errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading took longer than the configured timeout.
    #[error("Reading catalog {} timed out after {timeout:?}", .path.display())]
    Timeout { path: PathBuf, timeout: Duration },

    /// The payload is not valid JSON.
    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The payload is JSON but not an array of records.
    #[error("Catalog must be a JSON array, found {found}")]
    NotAnArray { found: &'static str },
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;
